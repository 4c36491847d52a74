//! Resolution passes over a linked interface.
//!
//! For each root component the resolver runs the pass sequence and then
//! recurses into installed subcomponents with the parent's bindings
//! chained as ancestor scope:
//!
//! ```text
//! Link → Scope Construction → Dependency Check → Cycle Detection → Tree
//!            ^^^^^^^^             ^^^^^^^^          ^^^^^^^^
//!         resolve/scope        resolve/deps     resolve/cycles
//! ```
//!
//! Diagnostics never abort resolution: each pass appends what it finds and
//! the walk continues, so a single run reports every defect. Diagnostics
//! attach to the component in whose resolution they were produced.

pub mod cycles;
pub mod deps;
pub mod scope;
pub mod tree;

use tracing::debug;

pub use cycles::detect_cycles;
pub use deps::{check_dependencies, suggestion_index, SuggestionIndex};
pub use scope::{resolve_scope, ComponentBindings, ResolvedScope};
pub use tree::{ComponentId, ResolvedComponent, ResolvedTree};

use crate::foundation::TypeKey;
use crate::link::{LinkedComponent, LinkedInterface};

/// Resolve every root component of `linked` into its own tree.
///
/// Roots are visited in post-merge input order. An interface with no root
/// components yields an empty result.
pub fn resolve_components(linked: &LinkedInterface) -> Vec<ResolvedTree> {
    let suggestions = suggestion_index(linked);

    linked
        .roots()
        .map(|root| {
            debug!(root = %root.name, "resolving root component");
            let mut arena = Vec::new();
            let mut active = Vec::new();
            let root_id = resolve_component(
                linked,
                root,
                None,
                &suggestions,
                &mut arena,
                &mut active,
            );
            ResolvedTree::new(arena, root_id)
        })
        .collect()
}

/// Resolve one component, then its installed subcomponents with this
/// component's bindings as their parent scope. Nodes are pushed into the
/// arena as their subtree completes, so children precede parents.
fn resolve_component(
    linked: &LinkedInterface,
    component: &LinkedComponent,
    parent: Option<&ComponentBindings<'_>>,
    suggestions: &SuggestionIndex,
    arena: &mut Vec<ResolvedComponent>,
    active: &mut Vec<String>,
) -> ComponentId {
    let scope = resolve_scope(linked, component);
    let mut diagnostics = scope.diagnostics;

    let bindings = ComponentBindings::new(scope.providers, parent);
    let root_type = TypeKey::parse(&component.root_type);

    diagnostics.extend(check_dependencies(&bindings, &root_type, suggestions));
    diagnostics.extend(detect_cycles(&bindings, &root_type));

    active.push(component.name.clone());
    let mut children = Vec::new();
    for name in &scope.subcomponents {
        // A component installing itself through its own descendants would
        // never terminate; scopes form a tree, so the repeated installation
        // cannot change any lookup and is skipped.
        if active.iter().any(|a| a == name) {
            debug!(component = %name, "skipping re-entrant installation");
            continue;
        }
        let sub = &linked.components[name];
        children.push(resolve_component(
            linked,
            sub,
            Some(&bindings),
            suggestions,
            arena,
            active,
        ));
    }
    active.pop();

    let id = ComponentId(arena.len());
    arena.push(ResolvedComponent {
        name: component.name.clone(),
        providers_by_type: bindings.into_providers(),
        parent: None,
        children: children.clone(),
        diagnostics,
    });
    for child in children {
        arena[child.0].parent = Some(id);
    }

    id
}
