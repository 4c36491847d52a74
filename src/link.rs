//! Declaration linking.
//!
//! The front-end emits one raw declaration per site, so a module or
//! component declared across several compilation units arrives as several
//! partial records sharing a canonical type name. Linking folds them into
//! at most one record per name: every list-valued field is concatenated in
//! left-to-right input order, which keeps downstream diagnostic ordering
//! deterministic. Module and component namespaces are disjoint.
//!
//! Linking never fails and emits no diagnostics; dangling name references
//! are the scope resolver's concern.

use indexmap::IndexMap;

use crate::raw::{ProviderKind, RawComponent, RawInterface, RawModule, RawProvider};

/// A module with all partial declarations merged.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedModule {
    pub name: String,
    pub providers: Vec<RawProvider>,
    pub included_modules: Vec<String>,
    pub subcomponents: Vec<String>,
}

/// A component with all partial declarations merged.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedComponent {
    pub name: String,
    pub is_root: bool,
    /// The type this component builds.
    pub root_type: String,
    pub providers: Vec<RawProvider>,
    pub included_modules: Vec<String>,
    pub subcomponents: Vec<String>,
    /// Explicit seed provider, if any declaration carried one.
    pub seed_provider: Option<RawProvider>,
    /// Explicit component-factory provider, if any declaration carried one.
    pub component_factory_provider: Option<RawProvider>,
}

impl LinkedComponent {
    /// The external input to this scope.
    ///
    /// Synthesized as a dependency-free `<Name>.Seed` binding when no
    /// declaration carried one, so it is always a member of the final
    /// provider map.
    pub fn seed(&self) -> RawProvider {
        self.seed_provider.clone().unwrap_or_else(|| RawProvider {
            type_spec: format!("{}.Seed", self.name),
            dependencies: Vec::new(),
            debug_origin: "seed".to_string(),
            kind: ProviderKind::Standard,
        })
    }

    /// The provider ancestors use to instantiate this component.
    ///
    /// Injected into the parent scope; synthesized as `<Name>.Factory`
    /// when no declaration carried one.
    pub fn component_factory(&self) -> RawProvider {
        self.component_factory_provider
            .clone()
            .unwrap_or_else(|| RawProvider {
                type_spec: format!("{}.Factory", self.name),
                dependencies: Vec::new(),
                debug_origin: "componentFactory".to_string(),
                kind: ProviderKind::Standard,
            })
    }
}

/// All declarations after linking; at most one record per unique name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedInterface {
    pub modules: IndexMap<String, LinkedModule>,
    pub components: IndexMap<String, LinkedComponent>,
}

impl LinkedInterface {
    /// Root components in post-merge input order.
    pub fn roots(&self) -> impl Iterator<Item = &LinkedComponent> {
        self.components.values().filter(|c| c.is_root)
    }
}

/// Fold raw declarations into a [`LinkedInterface`].
pub fn link(raw: RawInterface) -> LinkedInterface {
    let mut linked = LinkedInterface::default();

    for module in raw.modules {
        match linked.modules.get_mut(&module.type_name) {
            Some(existing) => merge_module(existing, module),
            None => {
                linked.modules.insert(
                    module.type_name.clone(),
                    LinkedModule {
                        name: module.type_name,
                        providers: module.providers,
                        included_modules: module.included_modules,
                        subcomponents: module.subcomponents,
                    },
                );
            }
        }
    }

    for component in raw.components {
        match linked.components.get_mut(&component.type_name) {
            Some(existing) => merge_component(existing, component),
            None => {
                linked.components.insert(
                    component.type_name.clone(),
                    LinkedComponent {
                        name: component.type_name,
                        is_root: component.is_root,
                        root_type: component.root_type,
                        providers: component.providers,
                        included_modules: component.included_modules,
                        subcomponents: component.subcomponents,
                        seed_provider: component.seed_provider,
                        component_factory_provider: component.component_factory_provider,
                    },
                );
            }
        }
    }

    tracing::debug!(
        modules = linked.modules.len(),
        components = linked.components.len(),
        "declarations linked"
    );

    linked
}

fn merge_module(existing: &mut LinkedModule, other: RawModule) {
    existing.providers.extend(other.providers);
    existing.included_modules.extend(other.included_modules);
    existing.subcomponents.extend(other.subcomponents);
}

// List fields concatenate; is_root is OR-combined; the remaining scalar
// fields keep the first declaration.
fn merge_component(existing: &mut LinkedComponent, other: RawComponent) {
    existing.is_root |= other.is_root;
    existing.providers.extend(other.providers);
    existing.included_modules.extend(other.included_modules);
    existing.subcomponents.extend(other.subcomponents);
    if existing.seed_provider.is_none() {
        existing.seed_provider = other.seed_provider;
    }
    if existing.component_factory_provider.is_none() {
        existing.component_factory_provider = other.component_factory_provider;
    }
}
