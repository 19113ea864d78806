//! Mesh nodes
//!
//! A node carries its reference coordinates and, after
//! [`Mesh::set_node_links`](crate::mesh::Mesh::set_node_links), weak
//! back-references to the elements it belongs to.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::element::Element;
use crate::errors::{MeshError, MeshResult};
use crate::item::{Item, MeshItem};

/// A node of the finite element mesh
#[derive(Debug)]
pub struct Node {
    base: MeshItem,
    coordinates: [f64; 3],
    imported: bool,
    element_links: RefCell<Vec<Weak<Element>>>,
}

impl Node {
    pub fn new(coordinates: [f64; 3]) -> Self {
        Node {
            base: MeshItem::empty(),
            coordinates,
            imported: false,
            element_links: RefCell::new(Vec::new()),
        }
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.base = self.base.with_comments(comments);
        self
    }

    /// Read a `NODE <n> COORD <x> <y> <z>` line.
    pub fn from_dat(line: &str, comments: Vec<String>) -> MeshResult<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 6 || tokens[0] != "NODE" || tokens[2] != "COORD" {
            return Err(MeshError::parse(line, "Expected 'NODE <n> COORD <x> <y> <z>'"));
        }
        let mut coordinates = [0.0; 3];
        for (value, token) in coordinates.iter_mut().zip(&tokens[3..6]) {
            *value = token
                .parse()
                .map_err(|_| MeshError::parse(line, format!("'{}' is not a coordinate", token)))?;
        }
        let mut node = Node::new(coordinates).with_comments(comments);
        node.imported = true;
        Ok(node)
    }

    pub fn coordinates(&self) -> [f64; 3] {
        self.coordinates
    }

    /// True for nodes read from an input file
    pub fn is_imported(&self) -> bool {
        self.imported
    }

    /// Elements linked to this node that are still alive
    pub fn linked_elements(&self) -> Vec<Rc<Element>> {
        self.element_links
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }

    pub(crate) fn link_element(&self, element: &Rc<Element>) {
        self.element_links.borrow_mut().push(Rc::downgrade(element));
    }

    pub(crate) fn clear_element_links(&self) {
        self.element_links.borrow_mut().clear();
    }
}

impl Item for Node {
    fn base(&self) -> &MeshItem {
        &self.base
    }

    fn payload_lines(&self) -> MeshResult<Vec<String>> {
        let index = self.base.require_index("Node")?;
        let [x, y, z] = self.coordinates;
        Ok(vec![format!("NODE {} COORD {} {} {}", index, x, y, z)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dat() {
        let node = Node::from_dat("NODE 12 COORD 0.5 -1 2e-3", vec!["// tip".into()]).unwrap();
        assert_eq!(node.coordinates(), [0.5, -1.0, 0.002]);
        assert_eq!(node.base().comments(), ["// tip".to_string()]);
        assert_eq!(node.global_index(), None);
        assert!(node.is_imported());
        assert!(!Node::new([0.0; 3]).is_imported());
    }

    #[test]
    fn test_from_dat_errors() {
        assert!(Node::from_dat("NODE 1 COORD 0 0", Vec::new()).is_err());
        assert!(Node::from_dat("NODE 1 POS 0 0 0", Vec::new()).is_err());
        assert!(Node::from_dat("NODE 1 COORD a 0 0", Vec::new()).is_err());
    }

    #[test]
    fn test_render() {
        let node = Node::new([1.0, 0.25, -3.0]);
        assert!(node.render().is_err());
        node.base().set_global_index(4);
        assert_eq!(node.render().unwrap(), vec!["NODE 4 COORD 1 0.25 -3"]);
    }
}
