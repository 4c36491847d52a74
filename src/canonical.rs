//! Provider canonicalization.
//!
//! Raw providers arrive in whatever shape the front-end extracted: a plain
//! binding, a weak or lazy wrapper around the target type, or a collection
//! contribution (element-of / key-value-of). Canonicalization rewrites all
//! of them into a uniform key space so the scope resolver can group and
//! look up bindings by [`TypeKey`] alone.
//!
//! Rules, applied in order with first match winning:
//!
//! 1. Lazy indirection — unwrap once, mark the key `is_provider`. The
//!    indirection is resolved at runtime, which is what lets the cycle
//!    detector treat it specially.
//! 2. Weak wrapper — unwrap once, mark the key and the binding `is_weak`.
//! 3. Collection contribution — the target becomes the collection-aggregate
//!    key and the binding is marked `is_collection_provider`. Keyed map
//!    entries additionally mark the key `is_map_entry`.
//! 4. Otherwise the identity mapping.
//!
//! Dependencies are canonicalized by the same marker rules.

use serde::Serialize;

use crate::foundation::TypeKey;
use crate::raw::{ProviderKind, RawProvider};

/// Where a binding came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugOrigin {
    /// Name of the module or component that declared the binding.
    pub source: String,
    /// Human label from the front-end (function name, annotation site).
    pub label: String,
}

/// A binding normalized into the canonical key space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalProvider {
    /// The key this binding provides.
    pub target: TypeKey,
    /// Dependency keys in declaration order.
    pub dependencies: Vec<TypeKey>,
    /// Whether this binding contributes one element to an aggregate.
    pub is_collection_provider: bool,
    /// Whether this binding is a weak reference to its target.
    pub is_weak: bool,
    /// Declaration site, carried through for diagnostics.
    pub origin: DebugOrigin,
}

/// Canonicalize a raw provider declared by `source`.
pub fn canonicalize(raw: &RawProvider, source: &str) -> CanonicalProvider {
    let parsed = TypeKey::parse(&raw.type_spec);

    let target = match raw.kind {
        ProviderKind::LazyIndirection => parsed.as_provider(),
        ProviderKind::Weak => parsed.as_weak(),
        ProviderKind::CollectionElement => parsed.collection_of(),
        ProviderKind::MapEntry => parsed.collection_of().as_map_entry(),
        ProviderKind::Standard => parsed,
    };

    CanonicalProvider {
        is_collection_provider: target.is_collection(),
        is_weak: target.is_weak(),
        dependencies: raw.dependencies.iter().map(|d| TypeKey::parse(d)).collect(),
        origin: DebugOrigin {
            source: source.to_string(),
            label: raw.debug_origin.clone(),
        },
        target,
    }
}
