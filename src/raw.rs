//! Unlinked declarations as emitted by the front-end.
//!
//! This is passive data: one `RawModule`/`RawComponent` per declaration
//! site, possibly several per type name when a declaration spans
//! compilation units. Type identities are opaque canonical-name strings;
//! the front-end is responsible for normalizing generics and namespaces
//! into that form.

use serde::{Deserialize, Serialize};

/// Everything the front-end extracted from one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInterface {
    #[serde(default)]
    pub modules: Vec<RawModule>,
    #[serde(default)]
    pub components: Vec<RawComponent>,
}

/// A reusable bundle of bindings and subcomponent installations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModule {
    /// Canonical type name of the module.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub providers: Vec<RawProvider>,
    #[serde(default)]
    pub included_modules: Vec<String>,
    #[serde(default)]
    pub subcomponents: Vec<String>,
}

/// A named scope that owns bindings and builds a root object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComponent {
    /// Canonical type name of the component.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Whether this component is constructed externally (a resolution root).
    #[serde(default)]
    pub is_root: bool,
    /// The type this component builds.
    pub root_type: String,
    #[serde(default)]
    pub providers: Vec<RawProvider>,
    #[serde(default)]
    pub included_modules: Vec<String>,
    #[serde(default)]
    pub subcomponents: Vec<String>,
    /// External input to this scope. Synthesized by the linker when absent.
    #[serde(default)]
    pub seed_provider: Option<RawProvider>,
    /// Provider injected into the parent scope so ancestors can instantiate
    /// this component. Synthesized by the linker when absent.
    #[serde(default)]
    pub component_factory_provider: Option<RawProvider>,
}

/// A single binding declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProvider {
    /// Canonical name of the provided type, possibly marker-prefixed.
    #[serde(rename = "type")]
    pub type_spec: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Human label for diagnostics (function name, annotation site).
    #[serde(default)]
    pub debug_origin: String,
    #[serde(default)]
    pub kind: ProviderKind,
}

/// How a binding was declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderKind {
    #[default]
    Standard,
    /// Contributes one element to a collection aggregate.
    CollectionElement,
    /// Contributes one keyed entry to a collection aggregate.
    MapEntry,
    /// A weak reference to the target type.
    Weak,
    /// A provider-of wrapper, resolved lazily at runtime.
    LazyIndirection,
}
