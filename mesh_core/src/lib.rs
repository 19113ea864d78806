//! # mesh_core - Beam Finite Element Mesh Model
//!
//! `mesh_core` builds the in-memory model of a beam simulation mesh (nodes,
//! elements, materials, geometry sets, boundary conditions, couplings) and
//! writes it as a structured-text solver input file. Existing input files can
//! be imported, merged with generated meshes, renumbered and written again.
//!
//! ## Design Philosophy
//!
//! - **Shared items**: Items are `Rc`-shared between meshes, sets and
//!   containers; numbering through one holder is seen by all
//! - **Checked containers**: Every keyed list declares the item kinds it
//!   accepts and rejects duplicates
//! - **Late numbering**: Global indices are assigned in one pass right
//!   before writing, so merged meshes never carry stale numbers
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use mesh_core::{BoundaryCondition, BoundaryConditionKind, Element, Geometry, GeometrySet,
//!     InputFile, Node};
//!
//! let mut input = InputFile::default();
//! let mesh = input.mesh_mut();
//!
//! let nodes: Vec<_> = (0..3).map(|i| Rc::new(Node::new([i as f64, 0.0, 0.0]))).collect();
//! for node in &nodes {
//!     mesh.add_node(Rc::clone(node))?;
//! }
//! mesh.add_element(Rc::new(Element::new("BEAM3R LINE3", nodes.clone(), "TRIADS 0 0 0 0 0 0 0 0 0")))?;
//!
//! let start = Rc::new(GeometrySet::with_nodes(Geometry::Point, &nodes[0..1])?);
//! mesh.add_bc(Rc::new(BoundaryCondition::new(
//!     BoundaryConditionKind::Dirichlet,
//!     start,
//!     "NUMDOF 9 ONOFF 1 1 1 1 1 1 0 0 0 VAL 0 0 0 0 0 0 0 0 0 FUNCT 0 0 0 0 0 0 0 0 0",
//! )))?;
//!
//! let text = input.to_dat_string(false)?;
//! assert!(text.contains("NODE 1 DNODE 1"));
//! # Ok::<(), mesh_core::MeshError>(())
//! ```
//!
//! ## Modules
//!
//! - [`item`] - Base item, the `Item` trait and the `AnyItem` sum
//! - [`node`], [`element`], [`material`] - Mesh entities
//! - [`geometry_set`] - Node sets with deferred node resolution
//! - [`container`] - Keyed, type-checked item lists
//! - [`geometry_name`] - Named geometry sets
//! - [`boundary_condition`], [`coupling`] - Conditions on geometry sets
//! - [`mesh`] - Mesh aggregate and the numbering pass
//! - [`input_file`] - Legacy input file import and rendering
//! - [`settings`] - Configuration and key registries
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic file writes

pub mod boundary_condition;
pub mod container;
pub mod coupling;
pub mod element;
pub mod errors;
pub mod file_io;
pub mod geometry_name;
pub mod geometry_set;
pub mod input_file;
pub mod item;
pub mod kinds;
pub mod material;
pub mod mesh;
pub mod node;
pub mod settings;

// Re-export commonly used types at crate root for convenience
pub use boundary_condition::BoundaryCondition;
pub use container::{BoundaryConditionContainer, Container, ContainerKind, GeometrySetContainer};
pub use coupling::{Coupling, CouplingType};
pub use element::{BeamFormulation, Element};
pub use errors::{MeshError, MeshResult};
pub use geometry_name::{GeometryName, GeometryValue};
pub use geometry_set::{GeometrySet, NodeInput, SetNode};
pub use input_file::{InputFile, InputLine, InputSection};
pub use item::{AnyItem, Item, ItemKind, MeshItem};
pub use kinds::{BeamType, BoundaryConditionKind, Geometry};
pub use material::Material;
pub use mesh::{Mesh, MeshSummary};
pub use node::Node;
pub use settings::{KeyRegistry, MeshSettings};
