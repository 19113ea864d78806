//! Closed enumerations used as container keys and formulation tags
//!
//! This module defines the fixed key sets of the mesh model: the geometry
//! dimensionality of a set, the boundary-condition type, and the beam
//! formulation of an element. Each enumeration carries the section and
//! keyword names it maps to in the input file.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// Geometry Dimensionality
// ============================================================================

/// Dimensionality of a geometry set
///
/// # Example
/// ```
/// use mesh_core::kinds::Geometry;
///
/// assert_eq!(Geometry::Point.set_name(), "DNODE");
/// assert_eq!(Geometry::Surface.topology_section(), "DSURF-NODE TOPOLOGY");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    Point,
    Line,
    Surface,
    Volume,
}

impl Geometry {
    /// All geometry kinds in declaration order
    pub const ALL: [Geometry; 4] = [
        Geometry::Point,
        Geometry::Line,
        Geometry::Surface,
        Geometry::Volume,
    ];

    /// Keyword binding a node to a set of this kind (`NODE 3 DNODE 1`)
    pub fn set_name(&self) -> &'static str {
        match self {
            Geometry::Point => "DNODE",
            Geometry::Line => "DLINE",
            Geometry::Surface => "DSURFACE",
            Geometry::Volume => "DVOLUME",
        }
    }

    /// Name of the topology section listing sets of this kind
    pub fn topology_section(&self) -> &'static str {
        match self {
            Geometry::Point => "DNODE-NODE TOPOLOGY",
            Geometry::Line => "DLINE-NODE TOPOLOGY",
            Geometry::Surface => "DSURF-NODE TOPOLOGY",
            Geometry::Volume => "DVOL-NODE TOPOLOGY",
        }
    }

    /// Counter keyword written at the top of a condition section
    pub fn counter(&self) -> &'static str {
        match self {
            Geometry::Point => "DPOINT",
            Geometry::Line => "DLINE",
            Geometry::Surface => "DSURF",
            Geometry::Volume => "DVOL",
        }
    }

    /// Keyword used in the design description block
    pub fn design_count(&self) -> &'static str {
        match self {
            Geometry::Point => "NDPOINT",
            Geometry::Line => "NDLINE",
            Geometry::Surface => "NDSURF",
            Geometry::Volume => "NDVOL",
        }
    }

    /// Word used inside condition section names
    fn condition_word(&self) -> &'static str {
        match self {
            Geometry::Point => "POINT",
            Geometry::Line => "LINE",
            Geometry::Surface => "SURF",
            Geometry::Volume => "VOL",
        }
    }

    /// Look up the geometry kind of a topology section name
    pub fn from_topology_section(name: &str) -> Option<Geometry> {
        Geometry::ALL
            .into_iter()
            .find(|geometry| geometry.topology_section() == name)
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Geometry::Point => "point",
            Geometry::Line => "line",
            Geometry::Surface => "surface",
            Geometry::Volume => "volume",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// Boundary Condition Types
// ============================================================================

/// Type of a boundary condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryConditionKind {
    /// Prescribed degrees of freedom
    Dirichlet,
    /// Prescribed loads
    Neumann,
}

impl BoundaryConditionKind {
    /// All boundary condition kinds in declaration order
    pub const ALL: [BoundaryConditionKind; 2] =
        [BoundaryConditionKind::Dirichlet, BoundaryConditionKind::Neumann];

    fn condition_word(&self) -> &'static str {
        match self {
            BoundaryConditionKind::Dirichlet => "DIRICH",
            BoundaryConditionKind::Neumann => "NEUMANN",
        }
    }

    /// Name of the section holding conditions of this kind on `geometry`
    ///
    /// # Example
    /// ```
    /// use mesh_core::kinds::{BoundaryConditionKind, Geometry};
    ///
    /// assert_eq!(
    ///     BoundaryConditionKind::Dirichlet.section_name(Geometry::Line),
    ///     "DESIGN LINE DIRICH CONDITIONS"
    /// );
    /// ```
    pub fn section_name(&self, geometry: Geometry) -> String {
        format!(
            "DESIGN {} {} CONDITIONS",
            geometry.condition_word(),
            self.condition_word()
        )
    }

    /// Look up the (kind, geometry) key of a condition section name
    pub fn from_section_name(name: &str) -> Option<(BoundaryConditionKind, Geometry)> {
        CONDITION_SECTIONS.get(name).copied()
    }
}

impl std::fmt::Display for BoundaryConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BoundaryConditionKind::Dirichlet => "dirichlet",
            BoundaryConditionKind::Neumann => "neumann",
        };
        write!(f, "{}", name)
    }
}

static CONDITION_SECTIONS: Lazy<HashMap<String, (BoundaryConditionKind, Geometry)>> =
    Lazy::new(|| {
        let mut sections = HashMap::new();
        for kind in BoundaryConditionKind::ALL {
            for geometry in Geometry::ALL {
                sections.insert(kind.section_name(geometry), (kind, geometry));
            }
        }
        sections
    });

// ============================================================================
// Beam Formulation
// ============================================================================

/// Beam element formulation
///
/// The formulation decides the degree-of-freedom layout of the element nodes,
/// which couplings have to respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeamType {
    /// Shear-deformable (Simo-Reissner) beam, 9 nodal DOFs
    Reissner,
    /// Shear-free Kirchhoff-Love beam, 7 nodal DOFs
    Kirchhoff,
    /// Torsion-free Euler-Bernoulli beam
    EulerBernoulli,
}

impl BeamType {
    /// Element keyword of this formulation
    pub fn element_keyword(&self) -> &'static str {
        match self {
            BeamType::Reissner => "BEAM3R",
            BeamType::Kirchhoff => "BEAM3K",
            BeamType::EulerBernoulli => "BEAM3EB",
        }
    }

    /// Recognise the formulation from an element keyword
    ///
    /// ```
    /// use mesh_core::kinds::BeamType;
    ///
    /// assert_eq!(BeamType::from_element_name("BEAM3R HERM2LINE3"), Some(BeamType::Reissner));
    /// assert_eq!(BeamType::from_element_name("SOLIDH8 HEX8"), None);
    /// ```
    pub fn from_element_name(name: &str) -> Option<BeamType> {
        let keyword = name.split_whitespace().next()?;
        [BeamType::Reissner, BeamType::Kirchhoff, BeamType::EulerBernoulli]
            .into_iter()
            .find(|beam_type| beam_type.element_keyword() == keyword)
    }
}

impl std::fmt::Display for BeamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BeamType::Reissner => "reissner",
            BeamType::Kirchhoff => "kirchhoff",
            BeamType::EulerBernoulli => "euler_bernoulli",
        };
        write!(f, "{}", name)
    }
}
