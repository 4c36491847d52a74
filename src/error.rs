//! Resolution diagnostics.
//!
//! Diagnostics are collected, never thrown: every pass appends
//! [`ResolutionError`] values to the component being resolved and keeps
//! going, so one run surfaces every defect in the graph. The only fatal
//! condition is the absence of any root component, which yields an empty
//! result rather than a diagnostic.

use serde::Serialize;
use thiserror::Error;

use crate::canonical::CanonicalProvider;
use crate::foundation::TypeKey;
use crate::resolve::tree::ResolvedTree;

/// A defect found while resolving a component graph.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ResolutionError {
    /// A module is referenced but absent from the linked interface.
    #[error("module '{0}' is referenced but not defined")]
    MissingModule(String),

    /// A subcomponent is installed but absent from the linked interface.
    #[error("subcomponent '{0}' is installed but not defined")]
    MissingSubcomponent(String),

    /// Several providers bound to the same key where at least one is not a
    /// collection contribution. All of them remain in the provider map.
    #[error("multiple providers bound to '{key}'")]
    DuplicateProvider {
        key: TypeKey,
        providers: Vec<CanonicalProvider>,
    },

    /// A declared dependency has no provider anywhere in the scope chain.
    /// The component's own root object uses `depended_upon: None`.
    #[error("no provider in scope for '{dependency}'")]
    MissingProvider {
        dependency: TypeKey,
        depended_upon: Option<CanonicalProvider>,
        suggested_modules: Vec<String>,
    },

    /// An intra-scope dependency cycle. The chain is closed: the first and
    /// last key are the same.
    #[error("cyclical dependency: {}", format_chain(.chain))]
    CyclicalDependency { chain: Vec<TypeKey> },
}

fn format_chain(chain: &[TypeKey]) -> String {
    chain
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Renders every diagnostic in a resolved tree with component attribution.
///
/// Produces one block per diagnostic:
///
/// ```text
/// error: no provider in scope for 'Svc'
///   --> component Root
///    = note: required by 'provideApp' (M1)
///    = help: install one of these modules: MSvc
/// ```
pub fn format_diagnostics(tree: &ResolvedTree) -> String {
    let mut output = String::new();

    for node in tree.iter() {
        for error in &node.diagnostics {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&format!("error: {}\n", error));
            output.push_str(&format!("  --> component {}\n", node.name));

            match error {
                ResolutionError::DuplicateProvider { providers, .. } => {
                    for provider in providers {
                        output.push_str(&format!(
                            "   = note: bound by '{}' ({})\n",
                            provider.origin.label, provider.origin.source
                        ));
                    }
                }
                ResolutionError::MissingProvider {
                    depended_upon,
                    suggested_modules,
                    ..
                } => {
                    if let Some(provider) = depended_upon {
                        output.push_str(&format!(
                            "   = note: required by '{}' ({})\n",
                            provider.origin.label, provider.origin.source
                        ));
                    } else {
                        output.push_str("   = note: required as the component's root object\n");
                    }
                    if !suggested_modules.is_empty() {
                        output.push_str(&format!(
                            "   = help: install one of these modules: {}\n",
                            suggested_modules.join(", ")
                        ));
                    }
                }
                _ => {}
            }
        }
    }

    output
}
