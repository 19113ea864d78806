//! # Geometry Sets
//!
//! A [`GeometrySet`] is an ordered, duplicate-free collection of nodes tagged
//! with a [`Geometry`] dimensionality. Sets are referenced by boundary
//! conditions and couplings and written to the topology sections of the
//! input file.
//!
//! Nodes of a set are [`SetNode`]s: either a real node or an integer
//! placeholder left by the legacy importer, which [`GeometrySet::link_nodes`]
//! later replaces with the node it points to.
//!
//! ## Adding nodes
//!
//! [`GeometrySet::add`] takes a [`NodeInput`]. A single node is checked
//! against the current content and rejected if present. A batch of nodes is
//! appended without that scan: bulk additions come from generators and
//! trusted imports where the per-node check would be quadratic.
//!
//! ```rust
//! use std::rc::Rc;
//! use mesh_core::geometry_set::GeometrySet;
//! use mesh_core::kinds::Geometry;
//! use mesh_core::node::Node;
//!
//! let a = Rc::new(Node::new([0.0, 0.0, 0.0]));
//! let b = Rc::new(Node::new([1.0, 0.0, 0.0]));
//!
//! let mut set = GeometrySet::new(Geometry::Line);
//! set.add(vec![Rc::clone(&a), Rc::clone(&b)])?;
//! assert_eq!(set.len(), 2);
//!
//! // Adding a single node that is already present fails.
//! assert!(set.add(Rc::clone(&a)).is_err());
//! # Ok::<(), mesh_core::errors::MeshError>(())
//! ```

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::errors::{MeshError, MeshResult};
use crate::item::{AnyItem, Item, ItemKind, MeshItem};
use crate::kinds::Geometry;
use crate::node::Node;

// ============================================================================
// Set Nodes
// ============================================================================

/// A node reference that may still be a deferred placeholder.
#[derive(Debug, Clone)]
pub enum SetNode {
    /// 0-based index into the node list of the file being imported
    Unresolved(usize),
    /// A real node
    Resolved(Rc<Node>),
}

impl SetNode {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SetNode::Resolved(_))
    }

    pub fn as_node(&self) -> Option<&Rc<Node>> {
        match self {
            SetNode::Resolved(node) => Some(node),
            SetNode::Unresolved(_) => None,
        }
    }

    /// The resolved node, or an `UnresolvedNode` error naming `context`
    pub fn require_node(&self, context: &str) -> MeshResult<&Rc<Node>> {
        match self {
            SetNode::Resolved(node) => Ok(node),
            SetNode::Unresolved(index) => Err(MeshError::unresolved_node(*index, context)),
        }
    }
}

impl PartialEq for SetNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SetNode::Unresolved(a), SetNode::Unresolved(b)) => a == b,
            (SetNode::Resolved(a), SetNode::Resolved(b)) => a.id() == b.id(),
            _ => false,
        }
    }
}

impl From<Rc<Node>> for SetNode {
    fn from(node: Rc<Node>) -> Self {
        SetNode::Resolved(node)
    }
}

impl From<&Rc<Node>> for SetNode {
    fn from(node: &Rc<Node>) -> Self {
        SetNode::Resolved(Rc::clone(node))
    }
}

impl From<usize> for SetNode {
    fn from(index: usize) -> Self {
        SetNode::Unresolved(index)
    }
}

/// Replace every placeholder in `slots` with the node it indexes.
pub(crate) fn resolve_slots(slots: &mut [SetNode], nodes: &[Rc<Node>], context: &str) -> MeshResult<()> {
    for slot in slots.iter_mut() {
        if let SetNode::Unresolved(index) = *slot {
            let node = nodes
                .get(index)
                .ok_or_else(|| MeshError::unresolved_node(index, context))?;
            *slot = SetNode::Resolved(Rc::clone(node));
        }
    }
    Ok(())
}

// ============================================================================
// Node Input
// ============================================================================

/// Argument of [`GeometrySet::add`]: one node or a batch.
#[derive(Debug, Clone)]
pub enum NodeInput {
    One(SetNode),
    Many(Vec<SetNode>),
}

impl From<SetNode> for NodeInput {
    fn from(node: SetNode) -> Self {
        NodeInput::One(node)
    }
}

impl From<Rc<Node>> for NodeInput {
    fn from(node: Rc<Node>) -> Self {
        NodeInput::One(SetNode::Resolved(node))
    }
}

impl From<&Rc<Node>> for NodeInput {
    fn from(node: &Rc<Node>) -> Self {
        NodeInput::One(SetNode::from(node))
    }
}

impl From<usize> for NodeInput {
    fn from(index: usize) -> Self {
        NodeInput::One(SetNode::Unresolved(index))
    }
}

impl From<Vec<SetNode>> for NodeInput {
    fn from(nodes: Vec<SetNode>) -> Self {
        NodeInput::Many(nodes)
    }
}

impl From<Vec<Rc<Node>>> for NodeInput {
    fn from(nodes: Vec<Rc<Node>>) -> Self {
        NodeInput::Many(nodes.into_iter().map(SetNode::Resolved).collect())
    }
}

impl From<&[Rc<Node>]> for NodeInput {
    fn from(nodes: &[Rc<Node>]) -> Self {
        NodeInput::Many(nodes.iter().map(SetNode::from).collect())
    }
}

impl From<Vec<usize>> for NodeInput {
    fn from(indices: Vec<usize>) -> Self {
        NodeInput::Many(indices.into_iter().map(SetNode::Unresolved).collect())
    }
}

// ============================================================================
// GeometrySet
// ============================================================================

/// An ordered set of nodes of one geometry kind.
#[derive(Debug)]
pub struct GeometrySet {
    base: MeshItem,
    geometry: Geometry,
    nodes: RefCell<Vec<SetNode>>,
}

impl GeometrySet {
    /// Create an empty set
    pub fn new(geometry: Geometry) -> Self {
        GeometrySet {
            base: MeshItem::empty(),
            geometry,
            nodes: RefCell::new(Vec::new()),
        }
    }

    /// Create a set and add `nodes` to it
    pub fn with_nodes(geometry: Geometry, nodes: impl Into<NodeInput>) -> MeshResult<Self> {
        let mut set = Self::new(geometry);
        set.add(nodes)?;
        Ok(set)
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.base = self.base.with_comments(comments);
        self
    }

    /// Build a set from the topology lines of a legacy input file.
    ///
    /// The second token of each line is the 1-based node number; it is
    /// stored as a 0-based placeholder to be linked once all nodes are read.
    ///
    /// ```rust
    /// use mesh_core::geometry_set::{GeometrySet, SetNode};
    /// use mesh_core::kinds::Geometry;
    ///
    /// let set = GeometrySet::from_dat(Geometry::Point, &["NODE 5 DNODE 1", "NODE 9 DNODE 1"], Vec::new())?;
    /// assert_eq!(set.nodes().to_vec(), vec![SetNode::Unresolved(4), SetNode::Unresolved(8)]);
    /// # Ok::<(), mesh_core::errors::MeshError>(())
    /// ```
    pub fn from_dat<S: AsRef<str>>(geometry: Geometry, lines: &[S], comments: Vec<String>) -> MeshResult<Self> {
        let mut indices = Vec::with_capacity(lines.len());
        for line in lines {
            let line = line.as_ref();
            let token = line
                .split_whitespace()
                .nth(1)
                .ok_or_else(|| MeshError::parse(line, "Missing node number"))?;
            let number: usize = token
                .parse()
                .map_err(|_| MeshError::parse(line, format!("'{}' is not a node number", token)))?;
            let index = number
                .checked_sub(1)
                .ok_or_else(|| MeshError::parse(line, "Node numbers start at 1"))?;
            indices.push(index);
        }
        Ok(Self::with_nodes(geometry, indices)?.with_comments(comments))
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    /// Borrow the current node list
    pub fn nodes(&self) -> Ref<'_, [SetNode]> {
        Ref::map(self.nodes.borrow(), |nodes| nodes.as_slice())
    }

    /// Iterate over the nodes in insertion order
    pub fn iter(&self) -> Nodes<'_> {
        Nodes {
            nodes: self.nodes.borrow(),
            position: 0,
        }
    }

    pub fn contains(&self, node: &SetNode) -> bool {
        self.nodes.borrow().contains(node)
    }

    /// All nodes, failing on the first placeholder
    pub fn resolved_nodes(&self) -> MeshResult<Vec<Rc<Node>>> {
        self.iter()
            .map(|node| node.require_node("geometry set").cloned())
            .collect()
    }

    /// Add one node or a batch of nodes.
    ///
    /// A single node already in the set is a `DuplicateEntry` error. A batch
    /// is appended as given; duplicates inside it are not detected.
    pub fn add(&mut self, value: impl Into<NodeInput>) -> MeshResult<()> {
        let nodes = self.nodes.get_mut();
        match value.into() {
            NodeInput::One(node) => {
                if nodes.contains(&node) {
                    return Err(MeshError::duplicate_entry(
                        describe_node(&node),
                        format!("{} set", self.geometry),
                    ));
                }
                nodes.push(node);
            }
            NodeInput::Many(batch) => nodes.extend(batch),
        }
        Ok(())
    }

    /// Bulk-add nodes taken from a heterogeneous item list.
    ///
    /// Every entry must be a node; the first other entry fails with
    /// `TypeMismatch` and nothing is added.
    pub fn add_items(&mut self, items: &[AnyItem]) -> MeshResult<()> {
        let mut batch = Vec::with_capacity(items.len());
        for item in items {
            match item.as_node() {
                Some(node) => batch.push(SetNode::Resolved(Rc::clone(node))),
                None => {
                    return Err(MeshError::type_mismatch(
                        item.kind().name(),
                        ItemKind::Node.name(),
                    ))
                }
            }
        }
        self.add(batch)
    }

    /// Replace placeholders with the nodes they index.
    pub fn link_nodes(&self, nodes: &[Rc<Node>]) -> MeshResult<()> {
        resolve_slots(&mut self.nodes.borrow_mut(), nodes, "geometry set")
    }
}

fn describe_node(node: &SetNode) -> String {
    match node {
        SetNode::Resolved(node) => format!("Node {}", crate::item::short_id(node.id())),
        SetNode::Unresolved(index) => format!("node placeholder {}", index),
    }
}

impl Item for GeometrySet {
    fn base(&self) -> &MeshItem {
        &self.base
    }

    /// One `NODE <node> <DNODE|DLINE|...> <set>` line per node.
    fn payload_lines(&self) -> MeshResult<Vec<String>> {
        let set_index = self.base.require_index("GeometrySet")?;
        let set_name = self.geometry.set_name();
        self.iter()
            .map(|node| {
                let node_index = node.require_node("geometry set")?.base().require_index("Node")?;
                Ok(format!("NODE {} {} {}", node_index, set_name, set_index))
            })
            .collect()
    }
}

/// Iterator over the nodes of a [`GeometrySet`]
pub struct Nodes<'a> {
    nodes: Ref<'a, Vec<SetNode>>,
    position: usize,
}

impl Iterator for Nodes<'_> {
    type Item = SetNode;

    fn next(&mut self) -> Option<SetNode> {
        let node = self.nodes.get(self.position)?.clone();
        self.position += 1;
        Some(node)
    }
}

impl<'a> IntoIterator for &'a GeometrySet {
    type Item = SetNode;
    type IntoIter = Nodes<'a>;

    fn into_iter(self) -> Nodes<'a> {
        self.iter()
    }
}
