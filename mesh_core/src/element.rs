//! Finite elements
//!
//! An element is written as its number, its element name (e.g.
//! `BEAM3R HERM2LINE3`), the numbers of its nodes, an optional material
//! reference and a trailing parameter string. Beam elements additionally
//! carry a [`BeamFormulation`], which couplings compare across nodes.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::errors::{MeshError, MeshResult};
use crate::geometry_set::{resolve_slots, SetNode};
use crate::item::{Item, MeshItem};
use crate::kinds::BeamType;
use crate::material::Material;
use crate::node::Node;

/// Beam formulation of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamFormulation {
    pub beam_type: BeamType,
    /// Rotations are interpolated as rotation vectors (Kirchhoff beams only)
    pub rotvec: bool,
}

impl BeamFormulation {
    pub fn new(beam_type: BeamType) -> Self {
        BeamFormulation {
            beam_type,
            rotvec: true,
        }
    }

    /// Formulation implied by an element name and its parameter string
    pub fn detect(name: &str, parameters: &str) -> Option<Self> {
        let beam_type = BeamType::from_element_name(name)?;
        let rotvec = match beam_type {
            BeamType::Kirchhoff => read_rotvec(parameters).unwrap_or(true),
            _ => true,
        };
        Some(BeamFormulation { beam_type, rotvec })
    }
}

/// Value following the `ROTVEC` keyword, if present
fn read_rotvec(parameters: &str) -> Option<bool> {
    let mut tokens = parameters.split_whitespace();
    tokens.find(|token| *token == "ROTVEC")?;
    match tokens.next()? {
        "0" | "false" => Some(false),
        _ => Some(true),
    }
}

/// An element of the finite element mesh
#[derive(Debug)]
pub struct Element {
    base: MeshItem,
    name: String,
    nodes: RefCell<Vec<SetNode>>,
    material: Option<Rc<Material>>,
    parameters: String,
    formulation: Option<BeamFormulation>,
}

impl Element {
    /// Create an element. The beam formulation is recognised from `name`.
    pub fn new(name: impl Into<String>, nodes: Vec<Rc<Node>>, parameters: impl Into<String>) -> Self {
        let name = name.into();
        let parameters = parameters.into();
        let formulation = BeamFormulation::detect(&name, &parameters);
        Element {
            base: MeshItem::empty(),
            name,
            nodes: RefCell::new(nodes.into_iter().map(SetNode::Resolved).collect()),
            material: None,
            parameters,
            formulation,
        }
    }

    pub fn with_material(mut self, material: Rc<Material>) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_formulation(mut self, formulation: Option<BeamFormulation>) -> Self {
        self.formulation = formulation;
        self
    }

    pub fn with_comments(mut self, comments: Vec<String>) -> Self {
        self.base = self.base.with_comments(comments);
        self
    }

    /// Read an element line of a legacy input file.
    ///
    /// Layout: `<n> <name> <name> <node>... <parameters>`. Node numbers are
    /// stored as 0-based placeholders and linked after the import.
    pub fn from_dat(line: &str, comments: Vec<String>) -> MeshResult<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(MeshError::parse(line, "Too few tokens for an element"));
        }
        let name = tokens[1..3].join(" ");

        let mut nodes = Vec::new();
        let mut rest = None;
        for (position, token) in tokens[3..].iter().enumerate() {
            match token.parse::<usize>() {
                Ok(number) => {
                    let index = number
                        .checked_sub(1)
                        .ok_or_else(|| MeshError::parse(line, "Node numbers start at 1"))?;
                    nodes.push(SetNode::Unresolved(index));
                }
                Err(_) => {
                    rest = Some(3 + position);
                    break;
                }
            }
        }
        let rest = rest.ok_or_else(|| MeshError::parse(line, "Element has no parameters after its nodes"))?;
        if nodes.is_empty() {
            return Err(MeshError::parse(line, "Element has no nodes"));
        }
        let parameters = tokens[rest..].join(" ");
        let formulation = BeamFormulation::detect(&name, &parameters);

        Ok(Element {
            base: MeshItem::new(None, comments),
            name,
            nodes: RefCell::new(nodes),
            material: None,
            parameters,
            formulation,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    pub fn material(&self) -> Option<&Rc<Material>> {
        self.material.as_ref()
    }

    pub fn formulation(&self) -> Option<BeamFormulation> {
        self.formulation
    }

    pub fn nodes(&self) -> Vec<SetNode> {
        self.nodes.borrow().clone()
    }

    /// Nodes of this element that are already resolved
    pub fn resolved_nodes(&self) -> Vec<Rc<Node>> {
        self.nodes
            .borrow()
            .iter()
            .filter_map(|node| node.as_node().cloned())
            .collect()
    }

    /// Interior nodes of a beam element.
    ///
    /// Line elements list their two end nodes first, so every node after the
    /// second one is interior. Elements without a beam formulation have none.
    pub fn middle_nodes(&self) -> Vec<Rc<Node>> {
        if self.formulation.is_none() {
            return Vec::new();
        }
        self.nodes
            .borrow()
            .iter()
            .skip(2)
            .filter_map(|node| node.as_node().cloned())
            .collect()
    }

    pub(crate) fn link_nodes(&self, nodes: &[Rc<Node>]) -> MeshResult<()> {
        resolve_slots(&mut self.nodes.borrow_mut(), nodes, "element")
    }
}

impl Item for Element {
    fn base(&self) -> &MeshItem {
        &self.base
    }

    fn payload_lines(&self) -> MeshResult<Vec<String>> {
        let mut tokens = vec![self.base.require_index("Element")?.to_string(), self.name.clone()];
        for node in self.nodes.borrow().iter() {
            let index = node.require_node("element")?.base().require_index("Node")?;
            tokens.push(index.to_string());
        }
        if let Some(material) = &self.material {
            tokens.push(format!("MAT {}", material.base().require_index("Material")?));
        }
        if !self.parameters.is_empty() {
            tokens.push(self.parameters.clone());
        }
        Ok(vec![tokens.join(" ")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_formulation() {
        let reissner = BeamFormulation::detect("BEAM3R HERM2LINE3", "TRIADS 0 0 0").unwrap();
        assert_eq!(reissner.beam_type, BeamType::Reissner);
        assert!(reissner.rotvec);

        let kirchhoff = BeamFormulation::detect("BEAM3K LINE3", "WK 1 ROTVEC 0 MAT 1").unwrap();
        assert_eq!(kirchhoff.beam_type, BeamType::Kirchhoff);
        assert!(!kirchhoff.rotvec);

        assert!(BeamFormulation::detect("SOLIDH8 HEX8", "MAT 1").is_none());
    }

    #[test]
    fn test_from_dat() {
        let element = Element::from_dat("3 BEAM3R HERM2LINE3 1 3 2 MAT 1 TRIADS 0 0 0", Vec::new()).unwrap();
        assert_eq!(element.name(), "BEAM3R HERM2LINE3");
        assert_eq!(
            element.nodes(),
            vec![SetNode::Unresolved(0), SetNode::Unresolved(2), SetNode::Unresolved(1)]
        );
        assert_eq!(element.parameters(), "MAT 1 TRIADS 0 0 0");
        assert_eq!(element.formulation().map(|f| f.beam_type), Some(BeamType::Reissner));
    }

    #[test]
    fn test_from_dat_requires_parameters() {
        assert!(Element::from_dat("1 SOLIDH8 HEX8 1 2 3 4", Vec::new()).is_err());
        assert!(Element::from_dat("1 SOLIDH8 HEX8 MAT 1", Vec::new()).is_err());
    }

    #[test]
    fn test_render_with_material() {
        let nodes: Vec<_> = (0..2).map(|i| Rc::new(Node::new([i as f64, 0.0, 0.0]))).collect();
        nodes[0].base().set_global_index(1);
        nodes[1].base().set_global_index(2);
        let material = Rc::new(Material::new("MAT_BeamReissnerElastHyper YOUNG 1"));
        material.base().set_global_index(5);

        let element = Element::new("BEAM3R LINE2", nodes, "TRIADS 0 0 0 0 0 0")
            .with_material(Rc::clone(&material));
        element.base().set_global_index(1);
        assert_eq!(
            element.render().unwrap(),
            vec!["1 BEAM3R LINE2 1 2 MAT 5 TRIADS 0 0 0 0 0 0"]
        );
    }

    #[test]
    fn test_middle_nodes() {
        let nodes: Vec<_> = (0..3).map(|i| Rc::new(Node::new([i as f64, 0.0, 0.0]))).collect();
        let beam = Element::new(
            "BEAM3R HERM2LINE3",
            vec![Rc::clone(&nodes[0]), Rc::clone(&nodes[2]), Rc::clone(&nodes[1])],
            "",
        );
        let middle = beam.middle_nodes();
        assert_eq!(middle.len(), 1);
        assert_eq!(middle[0].id(), nodes[1].id());

        let solid = Element::new("SOLIDH8 HEX8", nodes.clone(), "MAT 1");
        assert!(solid.middle_nodes().is_empty());
    }

    #[test]
    fn test_link_nodes() {
        let nodes: Vec<_> = (0..3).map(|i| Rc::new(Node::new([i as f64, 0.0, 0.0]))).collect();
        let element = Element::from_dat("1 BEAM3R LINE2 3 1 MAT 1", Vec::new()).unwrap();
        assert!(element.resolved_nodes().is_empty());
        element.link_nodes(&nodes).unwrap();
        let linked = element.resolved_nodes();
        assert_eq!(linked[0].id(), nodes[2].id());
        assert_eq!(linked[1].id(), nodes[0].id());
    }
}
