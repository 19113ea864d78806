//! # Couplings
//!
//! A [`Coupling`] ties several nodes together by constraining a subset of
//! their degrees of freedom. Which DOFs are active depends on the coupling
//! type and on the beam formulation of the elements at the coupled nodes,
//! so all of those elements must share one formulation. This is checked when
//! the coupling is rendered, after the node-element links exist.
//!
//! | type  | Reissner                            | other formulations              |
//! |-------|-------------------------------------|---------------------------------|
//! | joint | `NUMDOF 9 ONOFF 1 1 1 0 0 0 0 0 0`  | `NUMDOF 7 ONOFF 1 1 1 0 0 0 0`  |
//! | fix   | `NUMDOF 9 ONOFF 1 1 1 1 1 1 0 0 0`  | `NUMDOF 7 ONOFF 1 1 1 1 1 1 0`  |

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::element::BeamFormulation;
use crate::errors::{MeshError, MeshResult};
use crate::geometry_set::GeometrySet;
use crate::item::{Item, MeshItem};
use crate::kinds::{BeamType, Geometry};
use crate::node::Node;

/// What a coupling constrains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingType {
    /// Positions are coupled, rotations are free
    Joint,
    /// Positions and rotations are coupled
    Fix,
    /// A DOF description written verbatim
    Custom(String),
}

impl From<&str> for CouplingType {
    fn from(description: &str) -> Self {
        CouplingType::Custom(description.to_string())
    }
}

/// A multi-node constraint
#[derive(Debug)]
pub struct Coupling {
    base: MeshItem,
    node_set: Rc<GeometrySet>,
    coupling_type: CouplingType,
}

impl Coupling {
    /// Couple `nodes`. The nodes are gathered into a point geometry set.
    pub fn new(nodes: Vec<Rc<Node>>, coupling_type: CouplingType) -> MeshResult<Self> {
        let node_set = GeometrySet::with_nodes(Geometry::Point, nodes)?;
        Ok(Coupling {
            base: MeshItem::empty(),
            node_set: Rc::new(node_set),
            coupling_type,
        })
    }

    pub fn node_set(&self) -> &Rc<GeometrySet> {
        &self.node_set
    }

    pub fn coupling_type(&self) -> &CouplingType {
        &self.coupling_type
    }

    /// Common formulation of every element at every coupled node.
    fn common_formulation(&self) -> MeshResult<BeamFormulation> {
        let nodes = self.node_set.resolved_nodes()?;
        let first = nodes
            .first()
            .ok_or_else(|| MeshError::invariant("Coupling has no nodes"))?
            .linked_elements()
            .into_iter()
            .next()
            .ok_or_else(|| MeshError::invariant("First node of the coupling is not linked to an element"))?;
        let reference = first
            .formulation()
            .ok_or_else(|| MeshError::invariant("Coupled element has no beam formulation"))?;

        for node in &nodes {
            for element in node.linked_elements() {
                let formulation = element
                    .formulation()
                    .ok_or_else(|| MeshError::invariant("Coupled element has no beam formulation"))?;
                if formulation.beam_type != reference.beam_type {
                    return Err(MeshError::invariant(format!(
                        "The first element in this coupling is of the type \"{}\", another one is of type \"{}\"; \
                         they have to be of the same kind",
                        reference.beam_type, formulation.beam_type
                    )));
                }
                if reference.beam_type == BeamType::Kirchhoff && !formulation.rotvec {
                    return Err(MeshError::invariant(
                        "Couplings for Kirchhoff beams with rotvec == false are not implemented",
                    ));
                }
            }
        }
        Ok(reference)
    }

    /// The DOF activation string of this coupling
    pub fn dof_description(&self) -> MeshResult<String> {
        let formulation = self.common_formulation()?;
        let reissner = formulation.beam_type == BeamType::Reissner;
        let description = match (&self.coupling_type, reissner) {
            (CouplingType::Joint, true) => "NUMDOF 9 ONOFF 1 1 1 0 0 0 0 0 0",
            (CouplingType::Joint, false) => "NUMDOF 7 ONOFF 1 1 1 0 0 0 0",
            (CouplingType::Fix, true) => "NUMDOF 9 ONOFF 1 1 1 1 1 1 0 0 0",
            (CouplingType::Fix, false) => "NUMDOF 7 ONOFF 1 1 1 1 1 1 0",
            (CouplingType::Custom(description), _) => description.as_str(),
        };
        Ok(description.to_string())
    }
}

impl Item for Coupling {
    fn base(&self) -> &MeshItem {
        &self.base
    }

    fn payload_lines(&self) -> MeshResult<Vec<String>> {
        let description = self.dof_description()?;
        let set_index = self.node_set.base().require_index("GeometrySet")?;
        Ok(vec![format!("E {} - {}", set_index, description)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    struct Fixture {
        nodes: Vec<Rc<Node>>,
        _elements: Vec<Rc<Element>>,
    }

    /// Two nodes, each linked to one element of the given name.
    fn fixture(first: &str, second: &str) -> Fixture {
        let nodes: Vec<_> = (0..4).map(|i| Rc::new(Node::new([i as f64, 0.0, 0.0]))).collect();
        let elements = vec![
            Rc::new(Element::new(first, vec![Rc::clone(&nodes[0]), Rc::clone(&nodes[1])], "")),
            Rc::new(Element::new(second, vec![Rc::clone(&nodes[2]), Rc::clone(&nodes[3])], "")),
        ];
        for element in &elements {
            for node in element.resolved_nodes() {
                node.link_element(element);
            }
        }
        Fixture {
            nodes: vec![Rc::clone(&nodes[1]), Rc::clone(&nodes[2])],
            _elements: elements,
        }
    }

    #[test]
    fn test_joint_reissner() {
        let f = fixture("BEAM3R LINE2", "BEAM3R LINE2");
        let coupling = Coupling::new(f.nodes.clone(), CouplingType::Joint).unwrap();
        coupling.node_set().base().set_global_index(3);
        assert_eq!(
            coupling.render().unwrap(),
            vec!["E 3 - NUMDOF 9 ONOFF 1 1 1 0 0 0 0 0 0"]
        );
    }

    #[test]
    fn test_fix_kirchhoff() {
        let f = fixture("BEAM3K LINE3", "BEAM3K LINE3");
        let coupling = Coupling::new(f.nodes.clone(), CouplingType::Fix).unwrap();
        coupling.node_set().base().set_global_index(1);
        assert_eq!(coupling.render().unwrap(), vec!["E 1 - NUMDOF 7 ONOFF 1 1 1 1 1 1 0"]);
    }

    #[test]
    fn test_custom_passthrough() {
        let f = fixture("BEAM3EB LINE2", "BEAM3EB LINE2");
        let coupling = Coupling::new(f.nodes.clone(), "NUMDOF 6 ONOFF 1 1 1 0 0 0".into()).unwrap();
        coupling.node_set().base().set_global_index(2);
        assert_eq!(coupling.render().unwrap(), vec!["E 2 - NUMDOF 6 ONOFF 1 1 1 0 0 0"]);
    }

    #[test]
    fn test_formulation_mismatch() {
        let f = fixture("BEAM3R LINE2", "BEAM3EB LINE2");
        let coupling = Coupling::new(f.nodes.clone(), CouplingType::Joint).unwrap();
        coupling.node_set().base().set_global_index(1);
        let err = coupling.render().unwrap_err();
        match err {
            MeshError::InvariantViolation { reason } => {
                assert!(reason.contains("reissner"));
                assert!(reason.contains("euler_bernoulli"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_kirchhoff_without_rotvec_unsupported() {
        let nodes: Vec<_> = (0..2).map(|i| Rc::new(Node::new([i as f64, 0.0, 0.0]))).collect();
        let element = Rc::new(Element::new("BEAM3K LINE3", nodes.clone(), "WK 1 ROTVEC 0"));
        for node in &nodes {
            node.link_element(&element);
        }
        let coupling = Coupling::new(nodes, CouplingType::Fix).unwrap();
        coupling.node_set().base().set_global_index(1);
        let err = coupling.render().unwrap_err();
        assert!(err.to_string().contains("not implemented"));
    }

    #[test]
    fn test_unlinked_nodes() {
        let nodes = vec![Rc::new(Node::new([0.0; 3]))];
        let coupling = Coupling::new(nodes, CouplingType::Joint).unwrap();
        assert_eq!(coupling.render().unwrap_err().error_code(), "INVARIANT_VIOLATION");
    }
}
