//! # Filament
//!
//! Static dependency-injection graph resolver and validator.
//!
//! Filament consumes a language-neutral description of DI declarations
//! (components, subcomponents, modules, providers) as extracted by a
//! front-end, and produces one fully resolved tree per root component with
//! diagnostics describing every graph defect. A downstream generator emits
//! builder code from the resolved trees; a non-empty diagnostics list on
//! any node means the caller should not generate for that root.
//!
//! ## Pipeline
//!
//! ```text
//! RawInterface ──link──▶ LinkedInterface ──resolve──▶ [ResolvedTree]
//!                              │
//!            per root:  scope construction → dependency check
//!                          → cycle detection → tree building
//! ```
//!
//! - **Linking** merges partial declarations sharing a canonical type name
//!   across compilation units. It never fails.
//! - **Scope construction** expands the transitive module closure, collects
//!   installed subcomponents, and builds the per-component provider map.
//! - **Dependency checking** verifies every locally defined binding against
//!   the scope chain (the component and its ancestors).
//! - **Cycle detection** walks the local dependency graph from the root
//!   key; weak edges break, cross-scope edges cannot cycle.
//!
//! Diagnostics are collected, never thrown: resolution always runs to
//! completion so one run surfaces all defects.
//!
//! ## Usage
//!
//! ```
//! use filament::raw::RawInterface;
//!
//! let raw: RawInterface = serde_json::from_str(r#"{
//!     "modules": [{
//!         "type": "AppModule",
//!         "providers": [
//!             {"type": "App", "dependencies": ["Svc"], "debugOrigin": "provideApp"},
//!             {"type": "Svc", "debugOrigin": "provideSvc"}
//!         ]
//!     }],
//!     "components": [{
//!         "type": "Root",
//!         "isRoot": true,
//!         "rootType": "App",
//!         "includedModules": ["AppModule"]
//!     }]
//! }"#).unwrap();
//!
//! let trees = filament::resolve(raw);
//! assert_eq!(trees.len(), 1);
//! assert!(!trees[0].has_diagnostics());
//! ```

pub mod canonical;
pub mod error;
pub mod foundation;
pub mod link;
pub mod raw;
pub mod resolve;

pub use canonical::{canonicalize, CanonicalProvider, DebugOrigin};
pub use error::{format_diagnostics, ResolutionError};
pub use foundation::TypeKey;
pub use link::{link, LinkedComponent, LinkedInterface, LinkedModule};
pub use raw::{ProviderKind, RawComponent, RawInterface, RawModule, RawProvider};
pub use resolve::{
    resolve_components, ComponentBindings, ComponentId, ResolvedComponent, ResolvedTree,
};

/// Link and resolve in one step.
pub fn resolve(raw: RawInterface) -> Vec<ResolvedTree> {
    resolve_components(&link(raw))
}

/// Resolver version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
