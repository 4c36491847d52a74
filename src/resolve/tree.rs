//! Resolved output tree.
//!
//! Ownership in the output flows strictly downward: a tree owns all of its
//! nodes in a single arena, and nodes refer to each other by
//! [`ComponentId`] index. The upward `parent` edge is therefore just an
//! index, never an owning reference, and no structural cycles can exist in
//! resolved data. Navigation goes through the tree.

use indexmap::IndexMap;
use serde::Serialize;

use crate::canonical::CanonicalProvider;
use crate::error::ResolutionError;
use crate::foundation::TypeKey;

/// Index of a node within its owning [`ResolvedTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ComponentId(pub usize);

/// One resolved component scope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedComponent {
    /// Canonical type name of the component.
    pub name: String,
    /// Final provider map, grouped by key in discovery order.
    pub providers_by_type: IndexMap<TypeKey, Vec<CanonicalProvider>>,
    /// Set for every node except the entered root.
    pub parent: Option<ComponentId>,
    /// Installed subcomponents, in installation order.
    pub children: Vec<ComponentId>,
    /// Defects found while resolving this component and its closure.
    pub diagnostics: Vec<ResolutionError>,
}

/// The resolved DAG for one root component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTree {
    nodes: Vec<ResolvedComponent>,
    root: ComponentId,
}

impl ResolvedTree {
    pub(crate) fn new(nodes: Vec<ResolvedComponent>, root: ComponentId) -> Self {
        Self { nodes, root }
    }

    /// The entered root component.
    pub fn root(&self) -> &ResolvedComponent {
        &self.nodes[self.root.0]
    }

    pub fn root_id(&self) -> ComponentId {
        self.root
    }

    pub fn get(&self, id: ComponentId) -> &ResolvedComponent {
        &self.nodes[id.0]
    }

    /// The parent of `id`, or `None` for the entered root.
    pub fn parent_of(&self, id: ComponentId) -> Option<&ResolvedComponent> {
        self.nodes[id.0].parent.map(|p| &self.nodes[p.0])
    }

    pub fn children_of(&self, id: ComponentId) -> impl Iterator<Item = &ResolvedComponent> {
        self.nodes[id.0].children.iter().map(|c| &self.nodes[c.0])
    }

    /// All nodes, in resolution completion order (children before parents).
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedComponent> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether any node carries a diagnostic. Callers gate code generation
    /// on this.
    pub fn has_diagnostics(&self) -> bool {
        self.nodes.iter().any(|n| !n.diagnostics.is_empty())
    }

    /// Find a node by component name.
    pub fn find(&self, name: &str) -> Option<&ResolvedComponent> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

impl std::ops::Index<ComponentId> for ResolvedTree {
    type Output = ResolvedComponent;

    fn index(&self, id: ComponentId) -> &ResolvedComponent {
        &self.nodes[id.0]
    }
}
