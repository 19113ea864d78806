//! # Mesh Items
//!
//! [`MeshItem`] is the base unit of the mesh model: a uniquely identified
//! entity with an optional verbatim payload, attached comment lines and a
//! global index slot that the numbering pass fills in.
//!
//! Typed items (nodes, elements, sets, ...) embed a `MeshItem` and implement
//! the [`Item`] trait. Heterogeneous collections hold them through the closed
//! sum [`AnyItem`], whose tag [`ItemKind`] is what containers validate.
//!
//! ## Sharing
//!
//! Items are shared through `Rc`. The global index sits in a `Cell`, so an
//! index assigned through one holder is seen by every other holder of the
//! same item.
//!
//! ## Example
//!
//! ```rust
//! use mesh_core::item::{Item, MeshItem};
//!
//! let item = MeshItem::raw("MAT 1 MAT_Struct_StVenantKirchhoff YOUNG 1.0 NUE 0.3 DENS 1.0")
//!     .with_comments(vec!["// steel".to_string()]);
//!
//! assert_eq!(item.global_index(), None);
//! let lines = item.render()?;
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[0], "// steel");
//! # Ok::<(), mesh_core::errors::MeshError>(())
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::boundary_condition::BoundaryCondition;
use crate::coupling::Coupling;
use crate::element::Element;
use crate::errors::{MeshError, MeshResult};
use crate::geometry_set::GeometrySet;
use crate::material::Material;
use crate::node::Node;

// ============================================================================
// Payload
// ============================================================================

/// Verbatim content of an item, one or several output lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Line(String),
    Lines(Vec<String>),
}

impl Payload {
    /// The payload as a sequence of lines
    pub fn lines(&self) -> Vec<String> {
        match self {
            Payload::Line(line) => vec![line.clone()],
            Payload::Lines(lines) => lines.clone(),
        }
    }
}

impl From<&str> for Payload {
    fn from(line: &str) -> Self {
        Payload::Line(line.to_string())
    }
}

impl From<String> for Payload {
    fn from(line: String) -> Self {
        Payload::Line(line)
    }
}

impl From<Vec<String>> for Payload {
    fn from(lines: Vec<String>) -> Self {
        Payload::Lines(lines)
    }
}

// ============================================================================
// MeshItem
// ============================================================================

/// Base data shared by every entity of a mesh.
#[derive(Debug)]
pub struct MeshItem {
    id: Uuid,
    payload: Option<Payload>,
    global_index: Cell<Option<usize>>,
    comments: Vec<String>,
}

impl MeshItem {
    /// Create an item with an optional payload and comment lines.
    pub fn new(payload: Option<Payload>, comments: Vec<String>) -> Self {
        MeshItem {
            id: Uuid::new_v4(),
            payload,
            global_index: Cell::new(None),
            comments,
        }
    }

    /// An item with neither payload nor comments
    pub fn empty() -> Self {
        Self::new(None, Vec::new())
    }

    /// An item rendered verbatim from `payload`
    pub fn raw(payload: impl Into<Payload>) -> Self {
        Self::new(Some(payload.into()), Vec::new())
    }

    /// Replace the comment lines of this item
    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.comments = comments;
        self
    }

    /// Identity of this item
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Global index, `None` until the numbering pass has run
    pub fn global_index(&self) -> Option<usize> {
        self.global_index.get()
    }

    /// Assign the global index. Called by the numbering pass.
    pub fn set_global_index(&self, index: usize) {
        self.global_index.set(Some(index));
    }

    pub fn clear_global_index(&self) {
        self.global_index.set(None);
    }

    /// Global index, or a `MissingIndex` error naming `what`
    pub fn require_index(&self, what: &str) -> MeshResult<usize> {
        self.global_index
            .get()
            .ok_or_else(|| MeshError::missing_index(format!("{} {}", what, short_id(self.id))))
    }
}

/// First eight hex digits of an id, for error messages
pub(crate) fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

// ============================================================================
// Item Trait
// ============================================================================

/// Common interface of everything that can be written to the input file.
pub trait Item {
    /// The embedded base item
    fn base(&self) -> &MeshItem;

    /// Lines describing this item, without comments
    fn payload_lines(&self) -> MeshResult<Vec<String>>;

    /// Comment lines followed by the payload lines
    fn render(&self) -> MeshResult<Vec<String>> {
        let mut lines = self.base().comments().to_vec();
        lines.extend(self.payload_lines()?);
        Ok(lines)
    }

    fn id(&self) -> Uuid {
        self.base().id()
    }

    fn global_index(&self) -> Option<usize> {
        self.base().global_index()
    }
}

impl Item for MeshItem {
    fn base(&self) -> &MeshItem {
        self
    }

    fn payload_lines(&self) -> MeshResult<Vec<String>> {
        Ok(self.payload.as_ref().map(Payload::lines).unwrap_or_default())
    }
}

// ============================================================================
// Item Kinds
// ============================================================================

/// Tag of each item category, used for container type checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Raw,
    Node,
    Element,
    Material,
    GeometrySet,
    BoundaryCondition,
    Coupling,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Raw => "MeshItem",
            ItemKind::Node => "Node",
            ItemKind::Element => "Element",
            ItemKind::Material => "Material",
            ItemKind::GeometrySet => "GeometrySet",
            ItemKind::BoundaryCondition => "BoundaryCondition",
            ItemKind::Coupling => "Coupling",
        }
    }

    /// Comma separated names, for error messages
    pub fn list(kinds: &[ItemKind]) -> String {
        kinds
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// AnyItem
// ============================================================================

/// A shared reference to an item of any category.
///
/// Cloning an `AnyItem` clones the reference, never the item.
#[derive(Debug, Clone)]
pub enum AnyItem {
    Raw(Rc<MeshItem>),
    Node(Rc<Node>),
    Element(Rc<Element>),
    Material(Rc<Material>),
    GeometrySet(Rc<GeometrySet>),
    BoundaryCondition(Rc<BoundaryCondition>),
    Coupling(Rc<Coupling>),
}

impl AnyItem {
    pub fn kind(&self) -> ItemKind {
        match self {
            AnyItem::Raw(_) => ItemKind::Raw,
            AnyItem::Node(_) => ItemKind::Node,
            AnyItem::Element(_) => ItemKind::Element,
            AnyItem::Material(_) => ItemKind::Material,
            AnyItem::GeometrySet(_) => ItemKind::GeometrySet,
            AnyItem::BoundaryCondition(_) => ItemKind::BoundaryCondition,
            AnyItem::Coupling(_) => ItemKind::Coupling,
        }
    }

    fn as_item(&self) -> &dyn Item {
        match self {
            AnyItem::Raw(item) => &**item,
            AnyItem::Node(node) => &**node,
            AnyItem::Element(element) => &**element,
            AnyItem::Material(material) => &**material,
            AnyItem::GeometrySet(set) => &**set,
            AnyItem::BoundaryCondition(bc) => &**bc,
            AnyItem::Coupling(coupling) => &**coupling,
        }
    }

    pub fn base(&self) -> &MeshItem {
        self.as_item().base()
    }

    pub fn id(&self) -> Uuid {
        self.base().id()
    }

    pub fn render(&self) -> MeshResult<Vec<String>> {
        self.as_item().render()
    }

    /// True if both references point to the same item
    pub fn same_item(&self, other: &AnyItem) -> bool {
        self.id() == other.id()
    }

    /// Short human readable label, e.g. `GeometrySet 1a2b3c4d`
    pub fn describe(&self) -> String {
        format!("{} {}", self.kind(), short_id(self.id()))
    }

    pub fn as_geometry_set(&self) -> Option<&Rc<GeometrySet>> {
        match self {
            AnyItem::GeometrySet(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_boundary_condition(&self) -> Option<&Rc<BoundaryCondition>> {
        match self {
            AnyItem::BoundaryCondition(bc) => Some(bc),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Rc<Node>> {
        match self {
            AnyItem::Node(node) => Some(node),
            _ => None,
        }
    }
}

macro_rules! any_item_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<Rc<$ty>> for AnyItem {
                fn from(item: Rc<$ty>) -> Self {
                    AnyItem::$variant(item)
                }
            }
        )*
    };
}

any_item_from! {
    Raw => MeshItem,
    Node => Node,
    Element => Element,
    Material => Material,
    GeometrySet => GeometrySet,
    BoundaryCondition => BoundaryCondition,
    Coupling => Coupling,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_has_no_index() {
        let item = MeshItem::empty();
        assert_eq!(item.global_index(), None);
        assert!(item.comments().is_empty());
        assert!(item.render().unwrap().is_empty());
    }

    #[test]
    fn test_render_comments_before_payload() {
        let item = MeshItem::new(
            Some(Payload::Lines(vec!["a".into(), "b".into()])),
            vec!["// c".into()],
        );
        assert_eq!(item.render().unwrap(), vec!["// c", "a", "b"]);
    }

    #[test]
    fn test_single_line_payload() {
        let item = MeshItem::raw("FUNCT1");
        assert_eq!(item.render().unwrap(), vec!["FUNCT1"]);
    }

    #[test]
    fn test_index_visible_through_aliases() {
        let item = Rc::new(MeshItem::empty());
        let alias = AnyItem::from(Rc::clone(&item));
        item.set_global_index(7);
        assert_eq!(alias.base().global_index(), Some(7));
        item.clear_global_index();
        assert!(alias.base().require_index("item").is_err());
    }

    #[test]
    fn test_identity_not_structure() {
        let a = AnyItem::from(Rc::new(MeshItem::raw("x")));
        let b = AnyItem::from(Rc::new(MeshItem::raw("x")));
        assert!(!a.same_item(&b));
        assert!(a.same_item(&a.clone()));
        assert_eq!(a.kind(), ItemKind::Raw);
    }

    #[test]
    fn test_kind_list() {
        assert_eq!(
            ItemKind::list(&[ItemKind::Raw, ItemKind::GeometrySet]),
            "MeshItem, GeometrySet"
        );
    }
}
