//! Canonical type identity for bindings.
//!
//! Every binding targets a [`TypeKey`]: an opaque, value-equal identifier
//! derived from the canonical type name the front-end emits. Keys carry the
//! access-mode markers the wire format uses:
//!
//! - `W:` — weak reference (excluded from cycle detection)
//! - `P:` — lazy indirection (a provider-of wrapper, resolved at runtime)
//! - `C:` — collection aggregate (the target of element contributions)
//!
//! Weak and lazy markers describe *how* a type is accessed, not *what* it
//! is: `W:Logger` and `Logger` are the same identity, so a weak dependency
//! is satisfied by an ordinary `Logger` provider. A collection aggregate is
//! a different identity (`C:Plugin` is a bag of `Plugin`s, not a `Plugin`),
//! so the `C:` marker is part of the canonical form. Equality, hashing, and
//! ordering all go through the canonical form only.
//!
//! Unwrapping is strictly one level: parsing strips at most one leading
//! `W:` or `P:` marker.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

const WEAK_MARKER: &str = "W:";
const PROVIDER_MARKER: &str = "P:";
const COLLECTION_MARKER: &str = "C:";

/// Canonical identity of a bound type.
///
/// # Examples
///
/// ```
/// # use filament::foundation::TypeKey;
/// let plain = TypeKey::parse("Logger");
/// let weak = TypeKey::parse("W:Logger");
/// assert_eq!(plain, weak);
/// assert!(weak.is_weak());
/// assert!(!plain.is_weak());
///
/// let aggregate = TypeKey::parse("C:Plugin");
/// assert!(aggregate.is_collection());
/// assert_ne!(aggregate, TypeKey::parse("Plugin"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeKey {
    canonical: String,
    weak: bool,
    provider: bool,
    map_entry: bool,
}

impl TypeKey {
    /// Parse a key from its wire form, stripping at most one access marker.
    pub fn parse(spec: &str) -> Self {
        if let Some(rest) = spec.strip_prefix(WEAK_MARKER) {
            Self {
                canonical: rest.to_string(),
                weak: true,
                provider: false,
                map_entry: false,
            }
        } else if let Some(rest) = spec.strip_prefix(PROVIDER_MARKER) {
            Self {
                canonical: rest.to_string(),
                weak: false,
                provider: true,
                map_entry: false,
            }
        } else {
            Self {
                canonical: spec.to_string(),
                weak: false,
                provider: false,
                map_entry: false,
            }
        }
    }

    /// The aggregate key that collection contributions to `self` bind to.
    pub fn collection_of(&self) -> Self {
        Self {
            canonical: format!("{}{}", COLLECTION_MARKER, self.canonical),
            weak: false,
            provider: false,
            map_entry: false,
        }
    }

    /// Mark this key as accessed through a weak reference.
    pub fn as_weak(mut self) -> Self {
        self.weak = true;
        self
    }

    /// Mark this key as accessed through a lazy provider indirection.
    pub fn as_provider(mut self) -> Self {
        self.provider = true;
        self
    }

    /// Mark this key as the target of a keyed map-entry contribution.
    pub fn as_map_entry(mut self) -> Self {
        self.map_entry = true;
        self
    }

    /// The canonical string form (markers folded in for aggregates).
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Whether this key was reached through a weak reference.
    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// Whether this key was reached through a lazy provider indirection.
    pub fn is_provider(&self) -> bool {
        self.provider
    }

    /// Whether this key names a collection aggregate.
    pub fn is_collection(&self) -> bool {
        self.canonical.starts_with(COLLECTION_MARKER)
    }

    /// Whether this key was contributed as a keyed map entry.
    pub fn is_map_entry(&self) -> bool {
        self.map_entry
    }
}

// Identity is the canonical form alone. Access-mode flags (weak, provider,
// map entry) never distinguish keys: lookup for `W:X` must find providers
// of `X`.
impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for TypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            write!(f, "{}", WEAK_MARKER)?;
        }
        if self.provider {
            write!(f, "{}", PROVIDER_MARKER)?;
        }
        write!(f, "{}", self.canonical)
    }
}

impl From<&str> for TypeKey {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<String> for TypeKey {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TypeKey> for String {
    fn from(key: TypeKey) -> Self {
        key.to_string()
    }
}

impl PartialEq<&str> for TypeKey {
    fn eq(&self, other: &&str) -> bool {
        self.canonical == *other
    }
}
