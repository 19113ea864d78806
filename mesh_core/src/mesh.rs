//! # Mesh
//!
//! A [`Mesh`] collects everything that ends up in an input file: nodes,
//! elements, materials, functions, couplings, geometry sets and boundary
//! conditions. Meshes are built incrementally and merged with
//! [`Mesh::add_mesh`]; items may be shared between several meshes.
//!
//! ## Numbering
//!
//! Items carry no index until [`Mesh::assign_global_indices`] runs. Every
//! category is numbered `1..` in insertion order; boundary conditions are
//! numbered per (kind, geometry) list and geometry sets per geometry, after
//! the sets referenced by boundary conditions and couplings have been
//! gathered by [`Mesh::unique_geometry_sets`].
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use mesh_core::coupling::CouplingType;
//! use mesh_core::element::Element;
//! use mesh_core::item::Item;
//! use mesh_core::mesh::Mesh;
//! use mesh_core::node::Node;
//!
//! let mut mesh = Mesh::default();
//! let nodes: Vec<_> = (0..4).map(|i| Rc::new(Node::new([i as f64, 0.0, 0.0]))).collect();
//! for node in &nodes {
//!     mesh.add_node(Rc::clone(node))?;
//! }
//! mesh.add_element(Rc::new(Element::new("BEAM3R LINE2", nodes[0..2].to_vec(), "")))?;
//! mesh.add_element(Rc::new(Element::new("BEAM3R LINE2", nodes[2..4].to_vec(), "")))?;
//! mesh.couple_nodes(vec![Rc::clone(&nodes[1]), Rc::clone(&nodes[2])], CouplingType::Fix)?;
//!
//! let sets = mesh.assign_global_indices()?;
//! assert_eq!(nodes[3].global_index(), Some(4));
//! assert_eq!(sets.item_count(), 1);
//! # Ok::<(), mesh_core::errors::MeshError>(())
//! ```

use std::collections::HashSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::boundary_condition::BoundaryCondition;
use crate::container::{BoundaryConditionContainer, GeometrySetContainer};
use crate::coupling::{Coupling, CouplingType};
use crate::element::Element;
use crate::errors::{MeshError, MeshResult};
use crate::geometry_name::GeometryName;
use crate::geometry_set::GeometrySet;
use crate::item::{short_id, AnyItem, Item, ItemKind, MeshItem};
use crate::kinds::Geometry;
use crate::material::Material;
use crate::node::Node;
use crate::settings::KeyRegistry;

/// Item counts of a mesh
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub nodes: usize,
    pub elements: usize,
    pub materials: usize,
    pub functions: usize,
    pub couplings: usize,
    pub geometry_sets: usize,
    pub boundary_conditions: usize,
}

/// A finite element mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    nodes: Vec<Rc<Node>>,
    elements: Vec<Rc<Element>>,
    materials: Vec<Rc<Material>>,
    functions: Vec<Rc<MeshItem>>,
    couplings: Vec<Rc<Coupling>>,
    imported_couplings: Vec<Rc<MeshItem>>,
    geometry_sets: GeometrySetContainer,
    boundary_conditions: BoundaryConditionContainer,
    /// Identities of every listed node, element, material, function and coupling
    ids: HashSet<Uuid>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new(&KeyRegistry::default())
    }
}

fn duplicate<T: Item>(kind: ItemKind, item: &T) -> MeshError {
    MeshError::duplicate_entry(format!("{} {}", kind, short_id(item.id())), "mesh")
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum::<f64>().sqrt()
}

/// Assign `1..` in order
fn number<T: Item>(items: &[Rc<T>]) {
    for (i, item) in items.iter().enumerate() {
        item.base().set_global_index(i + 1);
    }
}

impl Mesh {
    /// An empty mesh whose containers are seeded from `registry`
    pub fn new(registry: &KeyRegistry) -> Self {
        Mesh {
            nodes: Vec::new(),
            elements: Vec::new(),
            materials: Vec::new(),
            functions: Vec::new(),
            couplings: Vec::new(),
            imported_couplings: Vec::new(),
            geometry_sets: GeometrySetContainer::with_registry(registry),
            boundary_conditions: BoundaryConditionContainer::with_registry(registry),
            ids: HashSet::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn nodes(&self) -> &[Rc<Node>] {
        &self.nodes
    }

    pub fn elements(&self) -> &[Rc<Element>] {
        &self.elements
    }

    pub fn materials(&self) -> &[Rc<Material>] {
        &self.materials
    }

    pub fn functions(&self) -> &[Rc<MeshItem>] {
        &self.functions
    }

    pub fn couplings(&self) -> &[Rc<Coupling>] {
        &self.couplings
    }

    /// Coupling lines of an imported file, kept verbatim
    pub fn imported_couplings(&self) -> &[Rc<MeshItem>] {
        &self.imported_couplings
    }

    pub fn geometry_sets(&self) -> &GeometrySetContainer {
        &self.geometry_sets
    }

    pub fn boundary_conditions(&self) -> &BoundaryConditionContainer {
        &self.boundary_conditions
    }

    pub(crate) fn geometry_sets_mut(&mut self) -> &mut GeometrySetContainer {
        &mut self.geometry_sets
    }

    pub(crate) fn boundary_conditions_mut(&mut self) -> &mut BoundaryConditionContainer {
        &mut self.boundary_conditions
    }

    /// True if the mesh has neither nodes nor elements
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.elements.is_empty()
    }

    // ========================================================================
    // Adding Items
    // ========================================================================

    pub fn add_node(&mut self, node: Rc<Node>) -> MeshResult<()> {
        if !self.ids.insert(node.id()) {
            return Err(duplicate(ItemKind::Node, &*node));
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn add_element(&mut self, element: Rc<Element>) -> MeshResult<()> {
        if !self.ids.insert(element.id()) {
            return Err(duplicate(ItemKind::Element, &*element));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Add a material; a material already in the mesh is skipped.
    pub fn add_material(&mut self, material: Rc<Material>) {
        if !self.ids.insert(material.id()) {
            log::warn!("Material {} is already in the mesh", short_id(material.id()));
            return;
        }
        self.materials.push(material);
    }

    /// Add a function; a function already in the mesh is skipped.
    pub fn add_function(&mut self, function: Rc<MeshItem>) {
        if !self.ids.insert(function.id()) {
            log::warn!("Function {} is already in the mesh", short_id(function.id()));
            return;
        }
        self.functions.push(function);
    }

    pub fn add_coupling(&mut self, coupling: Rc<Coupling>) -> MeshResult<()> {
        if !self.ids.insert(coupling.id()) {
            return Err(duplicate(ItemKind::Coupling, &*coupling));
        }
        self.couplings.push(coupling);
        Ok(())
    }

    /// Add an imported coupling line. It is written before the couplings
    /// added with [`Mesh::add_coupling`], in the same section.
    pub(crate) fn add_imported_coupling(&mut self, line: Rc<MeshItem>) -> MeshResult<()> {
        if !self.ids.insert(line.id()) {
            return Err(duplicate(ItemKind::Raw, &*line));
        }
        self.imported_couplings.push(line);
        Ok(())
    }

    pub fn add_geometry_set(&mut self, set: Rc<GeometrySet>) -> MeshResult<()> {
        self.geometry_sets.append(set.geometry(), set)
    }

    /// Add a boundary condition under its (kind, geometry) key.
    pub fn add_bc(&mut self, bc: Rc<BoundaryCondition>) -> MeshResult<()> {
        self.boundary_conditions.append(bc.key(), bc)
    }

    /// Add every set of `names`, in name order.
    pub fn add_geometry_name(&mut self, names: &GeometryName) -> MeshResult<()> {
        for set in names.sets() {
            self.add_geometry_set(Rc::clone(set))?;
        }
        Ok(())
    }

    /// Add an item of any category.
    ///
    /// A bare [`MeshItem`] has no section of its own and is rejected.
    pub fn add(&mut self, item: AnyItem) -> MeshResult<()> {
        match item {
            AnyItem::Node(node) => self.add_node(node),
            AnyItem::Element(element) => self.add_element(element),
            AnyItem::Material(material) => {
                self.add_material(material);
                Ok(())
            }
            AnyItem::GeometrySet(set) => self.add_geometry_set(set),
            AnyItem::BoundaryCondition(bc) => self.add_bc(bc),
            AnyItem::Coupling(coupling) => self.add_coupling(coupling),
            AnyItem::Raw(_) => Err(MeshError::type_mismatch(
                ItemKind::Raw.name(),
                ItemKind::list(&[
                    ItemKind::Node,
                    ItemKind::Element,
                    ItemKind::Material,
                    ItemKind::GeometrySet,
                    ItemKind::BoundaryCondition,
                    ItemKind::Coupling,
                ]),
            )),
        }
    }

    /// Merge the content of `other` into this mesh.
    ///
    /// Items are shared, not copied. A duplicate aborts the merge and leaves
    /// the items merged so far in place.
    pub fn add_mesh(&mut self, other: &Mesh) -> MeshResult<()> {
        for node in &other.nodes {
            self.add_node(Rc::clone(node))?;
        }
        for element in &other.elements {
            self.add_element(Rc::clone(element))?;
        }
        for material in &other.materials {
            self.add_material(Rc::clone(material));
        }
        for function in &other.functions {
            self.add_function(Rc::clone(function));
        }
        for line in &other.imported_couplings {
            self.add_imported_coupling(Rc::clone(line))?;
        }
        for coupling in &other.couplings {
            self.add_coupling(Rc::clone(coupling))?;
        }
        self.geometry_sets.extend(&other.geometry_sets)?;
        self.boundary_conditions.extend(&other.boundary_conditions)?;
        log::debug!(
            "Merged mesh with {} nodes and {} elements",
            other.nodes.len(),
            other.elements.len()
        );
        Ok(())
    }

    // ========================================================================
    // Couplings
    // ========================================================================

    /// Couple `nodes` and add the coupling to the mesh.
    pub fn couple_nodes(&mut self, nodes: Vec<Rc<Node>>, coupling_type: CouplingType) -> MeshResult<Rc<Coupling>> {
        let coupling = Rc::new(Coupling::new(nodes, coupling_type)?);
        self.add_coupling(Rc::clone(&coupling))?;
        Ok(coupling)
    }

    /// Couple every group of mesh nodes lying within `eps` of each other.
    ///
    /// Interior nodes of beam elements and nodes read from an input file
    /// are never coupled. Each group is
    /// formed around its first node in mesh order. Returns the number of
    /// couplings created.
    pub fn couple_close_nodes(&mut self, eps: f64, coupling_type: CouplingType) -> MeshResult<usize> {
        let middle: HashSet<Uuid> = self
            .elements
            .iter()
            .flat_map(|element| element.middle_nodes())
            .map(|node| node.id())
            .collect();
        let candidates: Vec<Rc<Node>> = self
            .nodes
            .iter()
            .filter(|node| !node.is_imported() && !middle.contains(&node.id()))
            .cloned()
            .collect();

        let mut grouped = vec![false; candidates.len()];
        let mut groups = Vec::new();
        for i in 0..candidates.len() {
            if grouped[i] {
                continue;
            }
            let reference = candidates[i].coordinates();
            let mut group = vec![Rc::clone(&candidates[i])];
            for j in (i + 1)..candidates.len() {
                if !grouped[j] && distance(reference, candidates[j].coordinates()) < eps {
                    grouped[j] = true;
                    group.push(Rc::clone(&candidates[j]));
                }
            }
            if group.len() > 1 {
                groups.push(group);
            }
        }

        let count = groups.len();
        for group in groups {
            self.couple_nodes(group, coupling_type.clone())?;
        }
        log::debug!("Created {} couplings between close nodes", count);
        Ok(count)
    }

    // ========================================================================
    // Linking and Numbering
    // ========================================================================

    /// Resolve the placeholders left by a legacy import.
    ///
    /// Element and set nodes index the node list; boundary condition sets
    /// index the set list of their geometry.
    pub(crate) fn link_placeholders(&self) -> MeshResult<()> {
        for element in &self.elements {
            element.link_nodes(&self.nodes)?;
        }
        for (_, items) in self.geometry_sets.iter() {
            for set in items.iter().filter_map(AnyItem::as_geometry_set) {
                set.link_nodes(&self.nodes)?;
            }
        }
        for (&(_, geometry), items) in self.boundary_conditions.iter() {
            for bc in items.iter().filter_map(AnyItem::as_boundary_condition) {
                bc.link_geometry_set(self.geometry_sets.get(&geometry))?;
            }
        }
        Ok(())
    }

    /// Every geometry set that will be written, numbered per geometry.
    ///
    /// Starts from a copy of the mesh's own sets and adds the sets of
    /// boundary conditions and couplings; a set reachable several ways is
    /// listed once, at its first position.
    pub fn unique_geometry_sets(&self) -> MeshResult<GeometrySetContainer> {
        let mut sets = self.geometry_sets.copy();
        for (_, items) in self.boundary_conditions.iter() {
            for bc in items.iter().filter_map(AnyItem::as_boundary_condition) {
                if let Some(set) = bc.geometry_set() {
                    sets.append_unique(set.geometry(), AnyItem::from(set))?;
                }
            }
        }
        for coupling in &self.couplings {
            let set = Rc::clone(coupling.node_set());
            sets.append_unique(set.geometry(), AnyItem::from(set))?;
        }

        for (_, items) in sets.iter() {
            for (i, item) in items.iter().enumerate() {
                item.base().set_global_index(i + 1);
            }
        }
        Ok(sets)
    }

    /// Number every item of the mesh.
    ///
    /// Returns the numbered geometry sets, which include the sets of boundary
    /// conditions and couplings.
    pub fn assign_global_indices(&self) -> MeshResult<GeometrySetContainer> {
        let sets = self.unique_geometry_sets()?;
        number(&self.nodes);
        number(&self.elements);
        number(&self.materials);
        number(&self.functions);
        number(&self.couplings);
        for (_, items) in self.boundary_conditions.iter() {
            for (i, item) in items.iter().enumerate() {
                item.base().set_global_index(i + 1);
            }
        }
        log::debug!(
            "Numbered {} nodes, {} elements, {} geometry sets",
            self.nodes.len(),
            self.elements.len(),
            sets.item_count()
        );
        Ok(sets)
    }

    /// Rebuild the element back-references of all nodes.
    ///
    /// A node may take part in at most one coupling.
    pub fn set_node_links(&self) -> MeshResult<()> {
        for node in &self.nodes {
            node.clear_element_links();
        }
        for element in &self.elements {
            for node in element.resolved_nodes() {
                node.clear_element_links();
            }
        }
        for element in &self.elements {
            for node in element.resolved_nodes() {
                node.link_element(element);
            }
        }

        let mut coupled: HashSet<Uuid> = HashSet::new();
        for coupling in &self.couplings {
            for node in coupling.node_set().resolved_nodes()? {
                if !coupled.insert(node.id()) {
                    return Err(MeshError::invariant(format!(
                        "Node {} is part of more than one coupling",
                        short_id(node.id())
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            nodes: self.nodes.len(),
            elements: self.elements.len(),
            materials: self.materials.len(),
            functions: self.functions.len(),
            couplings: self.couplings.len() + self.imported_couplings.len(),
            geometry_sets: self.geometry_sets.item_count(),
            boundary_conditions: self.boundary_conditions.item_count(),
        }
    }

    /// Number of geometry sets of `geometry` added directly to the mesh
    pub fn geometry_set_count(&self, geometry: Geometry) -> usize {
        self.geometry_sets.get(&geometry).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::BoundaryConditionKind;

    fn line_mesh(n_elements: usize, offset: f64) -> (Mesh, Vec<Rc<Node>>) {
        let mut mesh = Mesh::default();
        let nodes: Vec<_> = (0..=n_elements)
            .map(|i| Rc::new(Node::new([offset + i as f64, 0.0, 0.0])))
            .collect();
        for node in &nodes {
            mesh.add_node(Rc::clone(node)).unwrap();
        }
        for pair in nodes.windows(2) {
            mesh.add_element(Rc::new(Element::new("BEAM3R LINE2", pair.to_vec(), "")))
                .unwrap();
        }
        (mesh, nodes)
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut mesh = Mesh::default();
        let node = Rc::new(Node::new([0.0; 3]));
        mesh.add_node(Rc::clone(&node)).unwrap();
        let err = mesh.add_node(node).unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_ENTRY");
        assert_eq!(mesh.nodes().len(), 1);
    }

    #[test]
    fn test_materials_and_functions_deduplicated() {
        let mut mesh = Mesh::default();
        let material = Rc::new(Material::new("MAT_BeamReissnerElastHyper YOUNG 1"));
        mesh.add_material(Rc::clone(&material));
        mesh.add_material(material);
        let function = Rc::new(MeshItem::raw("COMPONENT 0 SYMBOLIC_FUNCTION_OF_SPACE_TIME t"));
        mesh.add_function(Rc::clone(&function));
        mesh.add_function(function);
        assert_eq!(mesh.materials().len(), 1);
        assert_eq!(mesh.functions().len(), 1);
    }

    #[test]
    fn test_add_dispatches_on_kind() {
        let mut mesh = Mesh::default();
        mesh.add(AnyItem::from(Rc::new(Node::new([0.0; 3])))).unwrap();
        mesh.add(AnyItem::from(Rc::new(GeometrySet::new(Geometry::Line)))).unwrap();
        assert_eq!(mesh.nodes().len(), 1);
        assert_eq!(mesh.geometry_set_count(Geometry::Line), 1);

        let err = mesh.add(AnyItem::from(Rc::new(MeshItem::raw("x")))).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_MISMATCH");
    }

    #[test]
    fn test_add_mesh_shares_items() {
        let (mut a, _) = line_mesh(1, 0.0);
        let (b, b_nodes) = line_mesh(2, 10.0);
        a.add_mesh(&b).unwrap();
        assert_eq!(a.nodes().len(), 5);
        assert_eq!(a.elements().len(), 3);
        assert_eq!(a.nodes()[2].id(), b_nodes[0].id());

        // The nodes are already in `a` now.
        assert!(a.add_mesh(&b).is_err());
    }

    #[test]
    fn test_add_geometry_name() {
        let mut names = GeometryName::new();
        names.set("start", Rc::new(GeometrySet::new(Geometry::Point))).unwrap();
        names.set("end", Rc::new(GeometrySet::new(Geometry::Point))).unwrap();
        let mut mesh = Mesh::default();
        mesh.add_geometry_name(&names).unwrap();
        assert_eq!(mesh.geometry_set_count(Geometry::Point), 2);
    }

    #[test]
    fn test_unique_sets_include_references() {
        let (mut mesh, nodes) = line_mesh(2, 0.0);
        let start = Rc::new(GeometrySet::with_nodes(Geometry::Point, &nodes[0..1]).unwrap());
        let end = Rc::new(GeometrySet::with_nodes(Geometry::Point, &nodes[2..3]).unwrap());
        mesh.add_geometry_set(Rc::clone(&start)).unwrap();
        mesh.add_bc(Rc::new(BoundaryCondition::new(
            BoundaryConditionKind::Dirichlet,
            Rc::clone(&start),
            "NUMDOF 9 ONOFF 1 1 1 1 1 1 0 0 0",
        )))
        .unwrap();
        mesh.add_bc(Rc::new(BoundaryCondition::new(
            BoundaryConditionKind::Neumann,
            Rc::clone(&end),
            "NUMDOF 9 ONOFF 0 0 1 0 0 0 0 0 0",
        )))
        .unwrap();

        let sets = mesh.unique_geometry_sets().unwrap();
        assert_eq!(sets.get(&Geometry::Point).len(), 2);
        assert_eq!(start.global_index(), Some(1));
        assert_eq!(end.global_index(), Some(2));
        // The mesh's own container is untouched.
        assert_eq!(mesh.geometry_set_count(Geometry::Point), 1);
    }

    #[test]
    fn test_assign_global_indices() {
        let (mesh, nodes) = line_mesh(3, 0.0);
        let key = (BoundaryConditionKind::Dirichlet, Geometry::Point);
        mesh.assign_global_indices().unwrap();
        let indices: Vec<_> = nodes.iter().map(|n| n.global_index()).collect();
        assert_eq!(indices, vec![Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(mesh.elements()[2].global_index(), Some(3));
        assert!(mesh.boundary_conditions().get(&key).is_empty());
    }

    #[test]
    fn test_node_links_and_coupling_render() {
        let (mut mesh, nodes) = line_mesh(1, 0.0);
        let (other, other_nodes) = line_mesh(1, 1.0);
        mesh.add_mesh(&other).unwrap();
        let coupling = mesh
            .couple_nodes(vec![Rc::clone(&nodes[1]), Rc::clone(&other_nodes[0])], CouplingType::Joint)
            .unwrap();

        mesh.assign_global_indices().unwrap();
        mesh.set_node_links().unwrap();
        assert_eq!(nodes[1].linked_elements().len(), 1);
        assert_eq!(
            coupling.render().unwrap(),
            vec!["E 1 - NUMDOF 9 ONOFF 1 1 1 0 0 0 0 0 0"]
        );

        // Linking twice does not duplicate back-references.
        mesh.set_node_links().unwrap();
        assert_eq!(nodes[1].linked_elements().len(), 1);
    }

    #[test]
    fn test_node_in_two_couplings() {
        let (mut mesh, nodes) = line_mesh(2, 0.0);
        mesh.couple_nodes(nodes[0..2].to_vec(), CouplingType::Fix).unwrap();
        mesh.couple_nodes(nodes[1..3].to_vec(), CouplingType::Fix).unwrap();
        let err = mesh.set_node_links().unwrap_err();
        assert_eq!(err.error_code(), "INVARIANT_VIOLATION");
    }

    #[test]
    fn test_couple_close_nodes() {
        let (mut mesh, _) = line_mesh(1, 0.0);
        let (other, _) = line_mesh(1, 1.0);
        let (third, _) = line_mesh(1, 5.0);
        mesh.add_mesh(&other).unwrap();
        mesh.add_mesh(&third).unwrap();
        let count = mesh.couple_close_nodes(1e-8, CouplingType::Fix).unwrap();
        assert_eq!(count, 1);
        assert_eq!(mesh.couplings()[0].node_set().len(), 2);
    }

    #[test]
    fn test_couple_close_nodes_skips_middle_nodes() {
        let mut mesh = Mesh::default();
        let points = [
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [2.0, 0.0, 0.0],
            [3.0, 0.0, 0.0],
        ];
        let nodes: Vec<_> = points.iter().map(|&p| Rc::new(Node::new(p))).collect();
        for node in &nodes {
            mesh.add_node(Rc::clone(node)).unwrap();
        }
        // The interior node of the first beam sits on the start of the second.
        mesh.add_element(Rc::new(Element::new("BEAM3R HERM2LINE3", nodes[0..3].to_vec(), "")))
            .unwrap();
        mesh.add_element(Rc::new(Element::new("BEAM3R LINE2", nodes[3..5].to_vec(), "")))
            .unwrap();
        mesh.add_element(Rc::new(Element::new("BEAM3R LINE2", nodes[5..7].to_vec(), "")))
            .unwrap();

        assert_eq!(mesh.couple_close_nodes(1e-8, CouplingType::Fix).unwrap(), 1);
        let coupled = mesh.couplings()[0].node_set().resolved_nodes().unwrap();
        assert_eq!(coupled[0].id(), nodes[1].id());
        assert_eq!(coupled[1].id(), nodes[5].id());
    }

    #[test]
    fn test_couple_close_nodes_uses_distance() {
        let mut mesh = Mesh::default();
        let eps = 1e-3;
        // Within eps on every axis, but eps * 0.8 * sqrt(3) apart.
        mesh.add_node(Rc::new(Node::new([0.0; 3]))).unwrap();
        mesh.add_node(Rc::new(Node::new([0.8 * eps; 3]))).unwrap();
        assert_eq!(mesh.couple_close_nodes(eps, CouplingType::Fix).unwrap(), 0);

        mesh.add_node(Rc::new(Node::new([0.5 * eps, 0.0, 0.0]))).unwrap();
        assert_eq!(mesh.couple_close_nodes(eps, CouplingType::Fix).unwrap(), 1);
        assert_eq!(mesh.couplings()[0].node_set().len(), 2);
    }

    #[test]
    fn test_cloned_mesh_keeps_identities() {
        let (mesh, nodes) = line_mesh(2, 0.0);
        let mut copy = mesh.clone();
        assert!(copy.add_node(Rc::clone(&nodes[1])).is_err());
        assert!(copy.add_element(Rc::clone(&mesh.elements()[0])).is_err());
        copy.add_node(Rc::new(Node::new([9.0, 0.0, 0.0]))).unwrap();
        assert_eq!(copy.nodes().len(), 4);
        assert_eq!(mesh.nodes().len(), 3);
    }

    #[test]
    fn test_summary() {
        let (mesh, _) = line_mesh(2, 0.0);
        let summary = mesh.summary();
        assert_eq!(summary.nodes, 3);
        assert_eq!(summary.elements, 2);
        assert_eq!(summary.geometry_sets, 0);
    }
}
