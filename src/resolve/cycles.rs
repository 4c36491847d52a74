//! Intra-scope cycle detection.
//!
//! Depth-first search from the component's root key over the local
//! provider map only. Three kinds of edges never extend the search:
//!
//! - **Weak edges** — a weak dependency is resolved after construction, so
//!   it legitimately breaks a cycle.
//! - **Cross-scope edges** — a key satisfied by an ancestor scope cannot
//!   close a cycle back into this scope, because scopes form a tree.
//! - **Already-resolved keys** — each key is fully explored once; a key a
//!   cycle was reported through is also marked resolved so the same cycle
//!   is not re-reported along another path.
//!
//! Lazy-indirection edges are traversed like ordinary edges: weakness is
//! the only break.
//!
//! The reported chain is exact and closed (first key == last key). The
//! detector reads the scope and appends diagnostics; it never mutates
//! providers or bindings.

use std::collections::HashSet;

use tracing::trace;

use crate::error::ResolutionError;
use crate::foundation::TypeKey;
use crate::resolve::scope::ComponentBindings;

/// Report every dependency cycle reachable from `root` in the local map.
pub fn detect_cycles(
    bindings: &ComponentBindings<'_>,
    root: &TypeKey,
) -> Vec<ResolutionError> {
    let mut resolved = HashSet::new();
    let mut ancestors = Vec::new();
    let mut diagnostics = Vec::new();

    visit(
        root,
        bindings,
        &mut resolved,
        &mut ancestors,
        &mut diagnostics,
    );

    diagnostics
}

fn visit(
    key: &TypeKey,
    bindings: &ComponentBindings<'_>,
    resolved: &mut HashSet<TypeKey>,
    ancestors: &mut Vec<TypeKey>,
    diagnostics: &mut Vec<ResolutionError>,
) {
    if resolved.contains(key) || key.is_weak() {
        return;
    }

    if let Some(position) = ancestors.iter().position(|a| a == key) {
        let mut chain = ancestors[position..].to_vec();
        chain.push(key.clone());
        trace!(key = %key, len = chain.len() - 1, "cycle found");
        diagnostics.push(ResolutionError::CyclicalDependency { chain });
        resolved.insert(key.clone());
        return;
    }

    // Absent locally means either satisfied by an ancestor scope or already
    // reported missing by the dependency checker; neither can cycle here.
    let Some(group) = bindings.local(key) else {
        return;
    };

    ancestors.push(key.clone());
    for provider in group {
        for dependency in &provider.dependencies {
            visit(dependency, bindings, resolved, ancestors, diagnostics);
        }
    }
    ancestors.pop();
    resolved.insert(key.clone());
}
