//! Boundary conditions
//!
//! A boundary condition applies a description string (prescribed DOFs,
//! values, functions) to a geometry set. It is written as
//! `E <set index> - <description>` in the section of its kind and geometry.

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::{MeshError, MeshResult};
use crate::item::{AnyItem, Item, MeshItem};
use crate::kinds::{BoundaryConditionKind, Geometry};
use crate::geometry_set::GeometrySet;

/// Geometry set of a boundary condition, possibly still a placeholder
#[derive(Debug, Clone)]
pub enum SetRef {
    /// 0-based position in the imported set list of the condition's geometry
    Unresolved(usize),
    Resolved(Rc<GeometrySet>),
}

/// A boundary condition on a geometry set
#[derive(Debug)]
pub struct BoundaryCondition {
    base: MeshItem,
    kind: BoundaryConditionKind,
    geometry: Geometry,
    geometry_set: RefCell<SetRef>,
    description: String,
}

impl BoundaryCondition {
    pub fn new(kind: BoundaryConditionKind, geometry_set: Rc<GeometrySet>, description: impl Into<String>) -> Self {
        BoundaryCondition {
            base: MeshItem::empty(),
            kind,
            geometry: geometry_set.geometry(),
            geometry_set: RefCell::new(SetRef::Resolved(geometry_set)),
            description: description.into(),
        }
    }

    /// Read an `E <set> - <description>` line of a condition section.
    pub fn from_dat(
        kind: BoundaryConditionKind,
        geometry: Geometry,
        line: &str,
        comments: Vec<String>,
    ) -> MeshResult<Self> {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("E") {
            return Err(MeshError::parse(line, "Expected 'E <set> - <description>'"));
        }
        let set_number: usize = tokens
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or_else(|| MeshError::parse(line, "Missing geometry set number"))?;
        let set_index = set_number
            .checked_sub(1)
            .ok_or_else(|| MeshError::parse(line, "Set numbers start at 1"))?;
        if tokens.next() != Some("-") {
            return Err(MeshError::parse(line, "Expected '-' after the set number"));
        }
        let description = tokens.collect::<Vec<_>>().join(" ");

        Ok(BoundaryCondition {
            base: MeshItem::new(None, comments),
            kind,
            geometry,
            geometry_set: RefCell::new(SetRef::Unresolved(set_index)),
            description,
        })
    }

    pub fn kind(&self) -> BoundaryConditionKind {
        self.kind
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Container key of this condition
    pub fn key(&self) -> (BoundaryConditionKind, Geometry) {
        (self.kind, self.geometry)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The geometry set, if already resolved
    pub fn geometry_set(&self) -> Option<Rc<GeometrySet>> {
        match &*self.geometry_set.borrow() {
            SetRef::Resolved(set) => Some(Rc::clone(set)),
            SetRef::Unresolved(_) => None,
        }
    }

    /// Resolve a placeholder against the imported sets of this geometry.
    pub(crate) fn link_geometry_set(&self, sets: &[AnyItem]) -> MeshResult<()> {
        let index = match &*self.geometry_set.borrow() {
            SetRef::Unresolved(index) => *index,
            SetRef::Resolved(_) => return Ok(()),
        };
        let item = sets
            .get(index)
            .ok_or_else(|| MeshError::unresolved_node(index, "boundary condition geometry set"))?;
        let set = item
            .as_geometry_set()
            .ok_or_else(|| MeshError::type_mismatch(item.kind().name(), "GeometrySet"))?;
        *self.geometry_set.borrow_mut() = SetRef::Resolved(Rc::clone(set));
        Ok(())
    }
}

impl Item for BoundaryCondition {
    fn base(&self) -> &MeshItem {
        &self.base
    }

    fn payload_lines(&self) -> MeshResult<Vec<String>> {
        let set = self.geometry_set().ok_or_else(|| {
            MeshError::invariant("Boundary condition references an unlinked geometry set")
        })?;
        let set_index = set.base().require_index("GeometrySet")?;
        Ok(vec![format!("E {} - {}", set_index, self.description)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dat() {
        let bc = BoundaryCondition::from_dat(
            BoundaryConditionKind::Dirichlet,
            Geometry::Point,
            "E 2 - NUMDOF 9 ONOFF 1 1 1 0 0 0 0 0 0 VAL 0 0 0 0 0 0 0 0 0 FUNCT 0 0 0 0 0 0 0 0 0",
            Vec::new(),
        )
        .unwrap();
        assert_eq!(bc.key(), (BoundaryConditionKind::Dirichlet, Geometry::Point));
        assert!(bc.description().starts_with("NUMDOF 9 ONOFF"));
        assert!(bc.geometry_set().is_none());
        assert!(bc.render().is_err());
    }

    #[test]
    fn test_from_dat_errors() {
        let parse = |line| {
            BoundaryCondition::from_dat(BoundaryConditionKind::Neumann, Geometry::Line, line, Vec::new())
        };
        assert!(parse("DLINE 2").is_err());
        assert!(parse("E x - NUMDOF 1").is_err());
        assert!(parse("E 1 NUMDOF 1").is_err());
    }

    #[test]
    fn test_link_and_render() {
        let set = Rc::new(GeometrySet::new(Geometry::Point));
        let raw = Rc::new(MeshItem::raw("NODE 1 DNODE 1"));
        let sets = vec![AnyItem::from(Rc::clone(&set)), AnyItem::from(raw)];

        let bc = BoundaryCondition::from_dat(
            BoundaryConditionKind::Dirichlet,
            Geometry::Point,
            "E 1 - NUMDOF 3 ONOFF 1 1 1",
            Vec::new(),
        )
        .unwrap();
        bc.link_geometry_set(&sets).unwrap();
        set.base().set_global_index(4);
        assert_eq!(bc.render().unwrap(), vec!["E 4 - NUMDOF 3 ONOFF 1 1 1"]);

        let raw_bc = BoundaryCondition::from_dat(
            BoundaryConditionKind::Dirichlet,
            Geometry::Point,
            "E 2 - NUMDOF 3 ONOFF 1 1 1",
            Vec::new(),
        )
        .unwrap();
        let err = raw_bc.link_geometry_set(&sets).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_MISMATCH");
    }

    #[test]
    fn test_new_takes_geometry_of_set() {
        let set = Rc::new(GeometrySet::new(Geometry::Surface));
        let bc = BoundaryCondition::new(BoundaryConditionKind::Neumann, set, "NUMDOF 3 ONOFF 0 0 1");
        assert_eq!(bc.key(), (BoundaryConditionKind::Neumann, Geometry::Surface));
    }
}
