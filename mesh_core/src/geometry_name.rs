//! # Named Geometry Sets
//!
//! [`GeometryName`] labels geometry sets with unique names, e.g. the start
//! and end points of a generated beam. Mesh generators return one so the
//! caller can apply boundary conditions by name. Names keep their insertion
//! order, which is the order the sets are added to a mesh.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use mesh_core::geometry_name::GeometryName;
//! use mesh_core::geometry_set::GeometrySet;
//! use mesh_core::kinds::Geometry;
//!
//! let mut names = GeometryName::new();
//! names.set("start", Rc::new(GeometrySet::new(Geometry::Point)))?;
//! names.set("line", Rc::new(GeometrySet::new(Geometry::Line)))?;
//!
//! assert_eq!(names.keys().collect::<Vec<_>>(), vec!["start", "line"]);
//! assert!(names.set("start", Rc::new(GeometrySet::new(Geometry::Point))).is_err());
//! # Ok::<(), mesh_core::errors::MeshError>(())
//! ```

use std::rc::Rc;

use crate::errors::{MeshError, MeshResult};
use crate::geometry_set::{GeometrySet, SetNode};
use crate::node::Node;

/// Value accepted by [`GeometryName::set`]
#[derive(Debug, Clone)]
pub enum GeometryValue {
    /// An existing geometry set
    Set(Rc<GeometrySet>),
    /// A bare node list; building a set from it is not supported yet
    Nodes(Vec<SetNode>),
}

impl From<Rc<GeometrySet>> for GeometryValue {
    fn from(set: Rc<GeometrySet>) -> Self {
        GeometryValue::Set(set)
    }
}

impl From<&Rc<GeometrySet>> for GeometryValue {
    fn from(set: &Rc<GeometrySet>) -> Self {
        GeometryValue::Set(Rc::clone(set))
    }
}

impl From<Vec<SetNode>> for GeometryValue {
    fn from(nodes: Vec<SetNode>) -> Self {
        GeometryValue::Nodes(nodes)
    }
}

impl From<Vec<Rc<Node>>> for GeometryValue {
    fn from(nodes: Vec<Rc<Node>>) -> Self {
        GeometryValue::Nodes(nodes.into_iter().map(SetNode::Resolved).collect())
    }
}

/// Ordered name -> geometry set registry
#[derive(Debug, Clone, Default)]
pub struct GeometryName {
    entries: Vec<(String, Rc<GeometrySet>)>,
}

impl GeometryName {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `name`.
    ///
    /// Names are unique: registering an existing name is a `DuplicateEntry`
    /// error and keeps the first set. A [`GeometryValue::Nodes`] value fails
    /// with `Unimplemented`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<GeometryValue>) -> MeshResult<()> {
        let name = name.into();
        let set = match value.into() {
            GeometryValue::Set(set) => set,
            GeometryValue::Nodes(_) => {
                return Err(MeshError::unimplemented(
                    "Creating a geometry set from a node list in a GeometryName",
                ))
            }
        };
        if self.contains(&name) {
            return Err(MeshError::duplicate_entry(
                format!("name '{}'", name),
                "GeometryName",
            ));
        }
        self.entries.push((name, set));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Rc<GeometrySet>> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, set)| set)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// (name, set) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rc<GeometrySet>)> {
        self.entries.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// Sets in insertion order
    pub fn sets(&self) -> impl Iterator<Item = &Rc<GeometrySet>> {
        self.entries.iter().map(|(_, set)| set)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
