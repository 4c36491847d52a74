//! Dependency satisfaction checking.
//!
//! Every binding defined in a component's own scope must have each of its
//! dependencies satisfied somewhere in the scope chain (the component
//! itself or an ancestor). Bindings merely visible through the parent were
//! already checked where they were defined.
//!
//! Weak and lazy dependencies are not exempt: they must still resolve to a
//! provider in scope. Their markers only change how the cycle detector
//! treats the edge.
//!
//! Unsatisfied dependencies carry remediation hints: the set of modules
//! anywhere in the linked interface whose bindings could satisfy the key.
//! That index is global (a hint, not a scope assertion) and is computed
//! once per resolution run.

use indexmap::IndexMap;
use tracing::debug;

use crate::canonical::canonicalize;
use crate::error::ResolutionError;
use crate::foundation::TypeKey;
use crate::link::LinkedInterface;
use crate::resolve::scope::ComponentBindings;

/// Module names that could satisfy each key, in module declaration order.
pub type SuggestionIndex = IndexMap<TypeKey, Vec<String>>;

/// Build the global remediation-hint index for one linked interface.
///
/// Module names are deduplicated per key, first occurrence first.
pub fn suggestion_index(linked: &LinkedInterface) -> SuggestionIndex {
    let mut index: SuggestionIndex = IndexMap::new();

    for module in linked.modules.values() {
        for raw in &module.providers {
            let key = canonicalize(raw, &module.name).target;
            let names = index.entry(key).or_default();
            if !names.contains(&module.name) {
                names.push(module.name.clone());
            }
        }
    }

    index
}

/// Check every locally defined binding of `bindings`, plus the component's
/// root object as a synthetic external dependency.
pub fn check_dependencies(
    bindings: &ComponentBindings<'_>,
    root_type: &TypeKey,
    suggestions: &SuggestionIndex,
) -> Vec<ResolutionError> {
    let mut diagnostics = Vec::new();

    for group in bindings.local_providers().values() {
        for provider in group {
            for dependency in &provider.dependencies {
                if bindings.lookup(dependency).is_none() {
                    diagnostics.push(ResolutionError::MissingProvider {
                        dependency: dependency.clone(),
                        depended_upon: Some(provider.clone()),
                        suggested_modules: suggested(suggestions, dependency),
                    });
                }
            }
        }
    }

    if bindings.lookup(root_type).is_none() {
        diagnostics.push(ResolutionError::MissingProvider {
            dependency: root_type.clone(),
            depended_upon: None,
            suggested_modules: suggested(suggestions, root_type),
        });
    }

    debug!(
        root = %root_type,
        missing = diagnostics.len(),
        "dependency check complete"
    );

    diagnostics
}

fn suggested(suggestions: &SuggestionIndex, key: &TypeKey) -> Vec<String> {
    suggestions.get(key).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::CanonicalProvider;
    use crate::link::link;
    use crate::raw::{ProviderKind, RawInterface, RawModule, RawProvider};

    fn provider(type_spec: &str, deps: &[&str]) -> RawProvider {
        RawProvider {
            type_spec: type_spec.to_string(),
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            debug_origin: format!("provide{}", type_spec),
            kind: ProviderKind::Standard,
        }
    }

    fn bindings_of(providers: Vec<CanonicalProvider>) -> ComponentBindings<'static> {
        let mut map: IndexMap<TypeKey, Vec<CanonicalProvider>> = IndexMap::new();
        for p in providers {
            map.entry(p.target.clone()).or_default().push(p);
        }
        ComponentBindings::new(map, None)
    }

    fn canonical(type_spec: &str, deps: &[&str], source: &str) -> CanonicalProvider {
        canonicalize(&provider(type_spec, deps), source)
    }

    #[test]
    fn test_satisfied_scope_is_clean() {
        let bindings = bindings_of(vec![
            canonical("App", &["Svc"], "M1"),
            canonical("Svc", &[], "M1"),
        ]);

        let diagnostics =
            check_dependencies(&bindings, &TypeKey::parse("App"), &IndexMap::new());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_missing_dependency_with_suggestion() {
        let linked = link(RawInterface {
            modules: vec![RawModule {
                type_name: "MSvc".to_string(),
                providers: vec![provider("Svc", &[])],
                included_modules: Vec::new(),
                subcomponents: Vec::new(),
            }],
            components: Vec::new(),
        });
        let suggestions = suggestion_index(&linked);

        let bindings = bindings_of(vec![canonical("App", &["Svc"], "M1")]);
        let diagnostics = check_dependencies(&bindings, &TypeKey::parse("App"), &suggestions);

        match &diagnostics[..] {
            [ResolutionError::MissingProvider {
                dependency,
                depended_upon: Some(binding),
                suggested_modules,
            }] => {
                assert_eq!(*dependency, TypeKey::parse("Svc"));
                assert_eq!(binding.target, TypeKey::parse("App"));
                assert_eq!(suggested_modules, &vec!["MSvc".to_string()]);
            }
            other => panic!("expected one missing-provider diagnostic, got {:?}", other),
        }
    }

    #[test]
    fn test_unsatisfiable_root_uses_nil_binding() {
        let bindings = bindings_of(Vec::new());
        let diagnostics =
            check_dependencies(&bindings, &TypeKey::parse("App"), &IndexMap::new());

        match &diagnostics[..] {
            [ResolutionError::MissingProvider {
                dependency,
                depended_upon: None,
                ..
            }] => assert_eq!(*dependency, TypeKey::parse("App")),
            other => panic!("expected root diagnostic, got {:?}", other),
        }
    }

    #[test]
    fn test_weak_dependency_still_required() {
        let bindings = bindings_of(vec![canonical("App", &["W:Svc"], "M1")]);
        let diagnostics =
            check_dependencies(&bindings, &TypeKey::parse("App"), &IndexMap::new());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_weak_dependency_satisfied_by_plain_provider() {
        let bindings = bindings_of(vec![
            canonical("App", &["W:Svc", "P:Svc"], "M1"),
            canonical("Svc", &[], "M1"),
        ]);
        let diagnostics =
            check_dependencies(&bindings, &TypeKey::parse("App"), &IndexMap::new());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_parent_scope_satisfies_local_dependency() {
        let mut parent_map: IndexMap<TypeKey, Vec<CanonicalProvider>> = IndexMap::new();
        let logger = canonical("Logger", &[], "Parent");
        parent_map.insert(logger.target.clone(), vec![logger]);
        let parent = ComponentBindings::new(parent_map, None);

        let mut child_map: IndexMap<TypeKey, Vec<CanonicalProvider>> = IndexMap::new();
        let worker = canonical("Worker", &["Logger"], "Child");
        child_map.insert(worker.target.clone(), vec![worker]);
        let child = ComponentBindings::new(child_map, Some(&parent));

        let diagnostics =
            check_dependencies(&child, &TypeKey::parse("Worker"), &IndexMap::new());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_suggestion_index_dedupes_in_order() {
        let linked = link(RawInterface {
            modules: vec![
                RawModule {
                    type_name: "MA".to_string(),
                    providers: vec![provider("Svc", &[]), provider("Svc", &[])],
                    included_modules: Vec::new(),
                    subcomponents: Vec::new(),
                },
                RawModule {
                    type_name: "MB".to_string(),
                    providers: vec![provider("Svc", &[])],
                    included_modules: Vec::new(),
                    subcomponents: Vec::new(),
                },
            ],
            components: Vec::new(),
        });

        let index = suggestion_index(&linked);
        assert_eq!(
            index[&TypeKey::parse("Svc")],
            vec!["MA".to_string(), "MB".to_string()]
        );
    }
}
