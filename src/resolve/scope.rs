//! Per-component scope construction.
//!
//! For one component this pass expands the transitive module closure,
//! collects installed subcomponents, and builds the component's provider
//! map. The map is wrapped together with the parent scope (if any) into a
//! [`ComponentBindings`], the immutable scope-chain link every later pass
//! reads from.
//!
//! Ordering is load-bearing: the module closure is breadth-first from the
//! component's own includes, duplicate visits suppressed by a seen-set, and
//! the provider map concatenates component-own bindings, module bindings in
//! closure order, then the synthesized scope entries (seed, subcomponent
//! factories). Diagnostics come out in that same order, so equal inputs
//! produce byte-identical output.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use tracing::debug;

use crate::canonical::{canonicalize, CanonicalProvider};
use crate::error::ResolutionError;
use crate::foundation::TypeKey;
use crate::link::{LinkedComponent, LinkedInterface};

/// A component's provider map chained to its ancestors.
///
/// Immutable after construction. Lookup walks self, then the parent chain;
/// scopes form a tree, so the chain is a read-only singly-linked list that
/// child resolutions borrow for the duration of the subtree walk.
#[derive(Debug)]
pub struct ComponentBindings<'p> {
    providers: IndexMap<TypeKey, Vec<CanonicalProvider>>,
    parent: Option<&'p ComponentBindings<'p>>,
}

impl<'p> ComponentBindings<'p> {
    pub fn new(
        providers: IndexMap<TypeKey, Vec<CanonicalProvider>>,
        parent: Option<&'p ComponentBindings<'p>>,
    ) -> Self {
        Self { providers, parent }
    }

    /// Providers bound to `key` anywhere in the scope chain.
    pub fn lookup(&self, key: &TypeKey) -> Option<&[CanonicalProvider]> {
        let mut scope = Some(self);
        while let Some(bindings) = scope {
            if let Some(group) = bindings.providers.get(key) {
                return Some(group);
            }
            scope = bindings.parent;
        }
        None
    }

    /// Providers bound to `key` in this scope only.
    pub fn local(&self, key: &TypeKey) -> Option<&[CanonicalProvider]> {
        self.providers.get(key).map(Vec::as_slice)
    }

    /// This scope's own provider map, in discovery order.
    pub fn local_providers(&self) -> &IndexMap<TypeKey, Vec<CanonicalProvider>> {
        &self.providers
    }

    /// Unwrap the owned provider map once the subtree walk is done.
    pub fn into_providers(self) -> IndexMap<TypeKey, Vec<CanonicalProvider>> {
        self.providers
    }
}

/// Output of scope construction for one component.
#[derive(Debug)]
pub struct ResolvedScope {
    /// Installed subcomponents that resolved to a linked component, in
    /// first-occurrence order.
    pub subcomponents: Vec<String>,
    /// The component's provider map, grouped by key in discovery order.
    pub providers: IndexMap<TypeKey, Vec<CanonicalProvider>>,
    pub diagnostics: Vec<ResolutionError>,
}

/// Expand the module and subcomponent closure of `component` and build its
/// provider map.
pub fn resolve_scope(linked: &LinkedInterface, component: &LinkedComponent) -> ResolvedScope {
    let mut diagnostics = Vec::new();

    // Module closure, breadth-first from the component's own includes.
    let mut closure = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = component.included_modules.iter().cloned().collect();
    while let Some(name) = queue.pop_front() {
        if !seen.insert(name.clone()) {
            continue;
        }
        match linked.modules.get(&name) {
            Some(module) => {
                queue.extend(module.included_modules.iter().cloned());
                closure.push(module);
            }
            None => diagnostics.push(ResolutionError::MissingModule(name)),
        }
    }

    // Installed subcomponents: the component's own plus every closure
    // module's, first occurrence wins.
    let mut subcomponents = Vec::new();
    let mut sub_seen: HashSet<String> = HashSet::new();
    let installed = component
        .subcomponents
        .iter()
        .chain(closure.iter().flat_map(|m| m.subcomponents.iter()));
    for name in installed {
        if !sub_seen.insert(name.clone()) {
            continue;
        }
        if linked.components.contains_key(name) {
            subcomponents.push(name.clone());
        } else {
            diagnostics.push(ResolutionError::MissingSubcomponent(name.clone()));
        }
    }

    // Provider map: component-own bindings, module bindings in closure
    // order, then the synthesized scope entries.
    let mut providers: IndexMap<TypeKey, Vec<CanonicalProvider>> = IndexMap::new();
    let mut insert = |provider: CanonicalProvider| {
        providers
            .entry(provider.target.clone())
            .or_default()
            .push(provider);
    };

    for raw in &component.providers {
        insert(canonicalize(raw, &component.name));
    }
    for module in &closure {
        for raw in &module.providers {
            insert(canonicalize(raw, &module.name));
        }
    }
    insert(canonicalize(&component.seed(), &component.name));
    for name in &subcomponents {
        let sub = &linked.components[name];
        insert(canonicalize(&sub.component_factory(), name));
    }

    // A key bound more than once is legal only when every binding is a
    // collection contribution. All bindings stay in the map either way.
    for (key, group) in &providers {
        if group.len() > 1 && group.iter().any(|p| !p.is_collection_provider) {
            diagnostics.push(ResolutionError::DuplicateProvider {
                key: key.clone(),
                providers: group.clone(),
            });
        }
    }

    debug!(
        component = %component.name,
        modules = closure.len(),
        subcomponents = subcomponents.len(),
        keys = providers.len(),
        diagnostics = diagnostics.len(),
        "scope resolved"
    );

    ResolvedScope {
        subcomponents,
        providers,
        diagnostics,
    }
}
