//! # Keyed Item Containers
//!
//! A [`Container`] maps category keys to ordered, duplicate-free lists of
//! items. Each container declares the [`ItemKind`]s it accepts; anything else
//! is rejected with [`MeshError::TypeMismatch`]. Adding the same item twice
//! under one key is a [`MeshError::DuplicateEntry`].
//!
//! Two specialisations are pre-seeded with every key of a [`KeyRegistry`], so
//! each key is present (with an empty list) right after construction:
//!
//! - [`BoundaryConditionContainer`] - keyed by (condition kind, geometry)
//! - [`GeometrySetContainer`] - keyed by geometry
//!
//! Keys iterate in seeding order, then in order of first use.
//!
//! ## Merging
//!
//! [`Container::extend`] replays every entry of another container of the
//! same [`ContainerKind`] through [`Container::append`]. The checks run per
//! entry: if one fails, the entries merged before it stay merged.
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use mesh_core::container::GeometrySetContainer;
//! use mesh_core::geometry_set::GeometrySet;
//! use mesh_core::kinds::Geometry;
//!
//! let mut sets = GeometrySetContainer::default();
//! assert!(sets.get(&Geometry::Volume).is_empty());
//!
//! let set = Rc::new(GeometrySet::new(Geometry::Line));
//! sets.append(Geometry::Line, Rc::clone(&set))?;
//! assert!(sets.append(Geometry::Line, set).is_err());
//! # Ok::<(), mesh_core::errors::MeshError>(())
//! ```

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::errors::{MeshError, MeshResult};
use crate::geometry_set::GeometrySet;
use crate::item::{AnyItem, ItemKind};
use crate::kinds::{BoundaryConditionKind, Geometry};
use crate::settings::KeyRegistry;

/// Key of a boundary condition list
pub type BoundaryConditionKey = (BoundaryConditionKind, Geometry);

/// Boundary conditions grouped by (kind, geometry)
pub type BoundaryConditionContainer = Container<BoundaryConditionKey>;

/// Geometry sets grouped by geometry
pub type GeometrySetContainer = Container<Geometry>;

const BOUNDARY_CONDITION_ITEMS: &[ItemKind] = &[ItemKind::Raw, ItemKind::BoundaryCondition];
const GEOMETRY_SET_ITEMS: &[ItemKind] = &[ItemKind::Raw, ItemKind::GeometrySet];

/// Which specialisation a container is; only equal kinds can be merged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Generic,
    BoundaryConditions,
    GeometrySets,
}

/// One key with its items and their identities
#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    items: Vec<AnyItem>,
    ids: HashSet<Uuid>,
}

impl<K> Entry<K> {
    fn new(key: K) -> Self {
        Entry {
            key,
            items: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Push `item` unless it is already listed; returns whether it was added.
    fn insert(&mut self, item: AnyItem) -> bool {
        if !self.ids.insert(item.id()) {
            return false;
        }
        self.items.push(item);
        true
    }
}

/// Ordered multi-list keyed by `K`.
///
/// Cloning a container copies the lists but shares the items.
#[derive(Debug, Clone)]
pub struct Container<K> {
    kind: ContainerKind,
    accepted: &'static [ItemKind],
    entries: Vec<Entry<K>>,
}

impl<K: Clone + PartialEq + fmt::Debug> Container<K> {
    /// An empty generic container accepting `accepted`
    pub fn new(accepted: &'static [ItemKind]) -> Self {
        Container {
            kind: ContainerKind::Generic,
            accepted,
            entries: Vec::new(),
        }
    }

    fn seeded(kind: ContainerKind, accepted: &'static [ItemKind], keys: impl IntoIterator<Item = K>) -> Self {
        Container {
            kind,
            accepted,
            entries: keys.into_iter().map(Entry::new).collect(),
        }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Item kinds this container accepts
    pub fn accepted(&self) -> &'static [ItemKind] {
        self.accepted
    }

    fn check_type(&self, item: &AnyItem) -> MeshResult<()> {
        if self.accepted.contains(&item.kind()) {
            Ok(())
        } else {
            Err(MeshError::type_mismatch(
                item.kind().name(),
                ItemKind::list(self.accepted),
            ))
        }
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.key == key)
    }

    fn entry_mut(&mut self, key: K) -> &mut Entry<K> {
        let index = match self.position(&key) {
            Some(index) => index,
            None => {
                self.entries.push(Entry::new(key));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Add `item` to the list of `key`, creating the list if needed.
    pub fn append(&mut self, key: K, item: impl Into<AnyItem>) -> MeshResult<()> {
        let item = item.into();
        self.check_type(&item)?;
        let target = format!("{:?}", key);
        let description = item.describe();
        if !self.entry_mut(key).insert(item) {
            return Err(MeshError::duplicate_entry(description, target));
        }
        Ok(())
    }

    /// Add `item` unless it is already listed under `key`.
    ///
    /// Returns whether the item was added.
    pub(crate) fn append_unique(&mut self, key: K, item: AnyItem) -> MeshResult<bool> {
        self.check_type(&item)?;
        Ok(self.entry_mut(key).insert(item))
    }

    /// Merge every entry of `other` into this container.
    pub fn extend(&mut self, other: &Container<K>) -> MeshResult<()> {
        if other.kind != self.kind {
            return Err(MeshError::type_mismatch(
                format!("{:?} container", other.kind),
                format!("{:?} container", self.kind),
            ));
        }
        for entry in &other.entries {
            for item in &entry.items {
                self.append(entry.key.clone(), item.clone())?;
            }
        }
        log::debug!(
            "Merged {} items into {:?} container",
            other.item_count(),
            self.kind
        );
        Ok(())
    }

    /// Items listed under `key`; empty if the key is unknown
    pub fn get(&self, key: &K) -> &[AnyItem] {
        self.position(key)
            .map(|index| self.entries[index].items.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|entry| &entry.key)
    }

    /// (key, items) pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[AnyItem])> {
        self.entries.iter().map(|entry| (&entry.key, entry.items.as_slice()))
    }

    /// Total number of items over all keys
    pub fn item_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.items.len()).sum()
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }
}

impl BoundaryConditionContainer {
    /// A container with an empty list for every (kind, geometry) pair
    pub fn with_registry(registry: &KeyRegistry) -> Self {
        Self::seeded(
            ContainerKind::BoundaryConditions,
            BOUNDARY_CONDITION_ITEMS,
            registry.boundary_condition_keys(),
        )
    }
}

impl Default for BoundaryConditionContainer {
    fn default() -> Self {
        Self::with_registry(&KeyRegistry::default())
    }
}

impl GeometrySetContainer {
    /// A container with an empty list for every geometry
    pub fn with_registry(registry: &KeyRegistry) -> Self {
        Self::seeded(
            ContainerKind::GeometrySets,
            GEOMETRY_SET_ITEMS,
            registry.geometries.iter().copied(),
        )
    }

    /// Shallow copy: new lists holding the same set references.
    ///
    /// Appending to the copy leaves this container unchanged; changes made to
    /// a shared set are seen through both.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Typed geometry sets under `geometry`, skipping verbatim entries
    pub fn sets(&self, geometry: Geometry) -> impl Iterator<Item = &Rc<GeometrySet>> {
        self.get(&geometry).iter().filter_map(AnyItem::as_geometry_set)
    }
}

impl Default for GeometrySetContainer {
    fn default() -> Self {
        Self::with_registry(&KeyRegistry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary_condition::BoundaryCondition;
    use crate::item::{Item, MeshItem};
    use crate::node::Node;

    fn set(geometry: Geometry) -> Rc<GeometrySet> {
        Rc::new(GeometrySet::new(geometry))
    }

    #[test]
    fn test_specialised_containers_are_preseeded() {
        let bcs = BoundaryConditionContainer::default();
        assert_eq!(bcs.key_count(), 8);
        assert!(bcs.iter().all(|(_, items)| items.is_empty()));

        let sets = GeometrySetContainer::default();
        let keys: Vec<_> = sets.keys().copied().collect();
        assert_eq!(keys, Geometry::ALL.to_vec());
        assert_eq!(sets.item_count(), 0);
    }

    #[test]
    fn test_registry_controls_keys() {
        let registry = KeyRegistry {
            boundary_conditions: vec![BoundaryConditionKind::Neumann],
            geometries: vec![Geometry::Line, Geometry::Point],
        };
        let bcs = BoundaryConditionContainer::with_registry(&registry);
        let keys: Vec<_> = bcs.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                (BoundaryConditionKind::Neumann, Geometry::Line),
                (BoundaryConditionKind::Neumann, Geometry::Point),
            ]
        );
    }

    #[test]
    fn test_generic_container_starts_empty() {
        let mut container: Container<&'static str> = Container::new(&[ItemKind::Raw]);
        assert_eq!(container.key_count(), 0);
        container.append("materials", Rc::new(MeshItem::raw("MAT 1"))).unwrap();
        assert_eq!(container.keys().collect::<Vec<_>>(), vec![&"materials"]);
    }

    #[test]
    fn test_duplicate_append_leaves_list_unchanged() {
        let mut sets = GeometrySetContainer::default();
        let line = set(Geometry::Line);
        sets.append(Geometry::Line, Rc::clone(&line)).unwrap();
        let err = sets.append(Geometry::Line, Rc::clone(&line)).unwrap_err();
        assert_eq!(err.error_code(), "DUPLICATE_ENTRY");
        assert_eq!(sets.get(&Geometry::Line).len(), 1);

        // The same item under another key is allowed.
        sets.append(Geometry::Surface, line).unwrap();
        assert_eq!(sets.item_count(), 2);
    }

    #[test]
    fn test_type_mismatch_names_kinds() {
        let mut sets = GeometrySetContainer::default();
        let node = Rc::new(Node::new([0.0; 3]));
        let err = sets.append(Geometry::Point, node).unwrap_err();
        assert_eq!(
            err,
            MeshError::type_mismatch("Node", "MeshItem, GeometrySet")
        );
        assert!(sets.get(&Geometry::Point).is_empty());
    }

    #[test]
    fn test_extend_replays_entries() {
        let mut target = GeometrySetContainer::default();
        let mut source = GeometrySetContainer::default();
        let a = set(Geometry::Point);
        let b = set(Geometry::Volume);
        source.append(Geometry::Point, Rc::clone(&a)).unwrap();
        source.append(Geometry::Volume, Rc::clone(&b)).unwrap();

        target.extend(&source).unwrap();
        assert_eq!(target.item_count(), 2);
        assert!(target.get(&Geometry::Volume)[0].same_item(&AnyItem::from(b)));

        // Merging again hits the duplicate check.
        assert!(target.extend(&source).is_err());
    }

    #[test]
    fn test_extend_rejects_other_kind_without_changes() {
        let mut target = GeometrySetContainer::default();
        let mut generic: Container<Geometry> = Container::new(GEOMETRY_SET_ITEMS);
        generic.append(Geometry::Point, set(Geometry::Point)).unwrap();

        let err = target.extend(&generic).unwrap_err();
        assert_eq!(err.error_code(), "TYPE_MISMATCH");
        assert_eq!(target.item_count(), 0);
    }

    #[test]
    fn test_failed_extend_is_partial() {
        let shared = set(Geometry::Line);
        let mut target = GeometrySetContainer::default();
        target.append(Geometry::Line, Rc::clone(&shared)).unwrap();

        let mut source = GeometrySetContainer::default();
        source.append(Geometry::Point, set(Geometry::Point)).unwrap();
        source.append(Geometry::Line, shared).unwrap();

        assert!(target.extend(&source).is_err());
        assert_eq!(target.get(&Geometry::Point).len(), 1);
        assert_eq!(target.get(&Geometry::Line).len(), 1);
    }

    #[test]
    fn test_copy_is_shallow() {
        let mut original = GeometrySetContainer::default();
        let line = set(Geometry::Line);
        original.append(Geometry::Line, Rc::clone(&line)).unwrap();

        let mut copy = original.copy();
        assert!(copy.get(&Geometry::Line)[0].same_item(&original.get(&Geometry::Line)[0]));

        let added = set(Geometry::Line);
        copy.append(Geometry::Line, Rc::clone(&added)).unwrap();
        assert_eq!(copy.get(&Geometry::Line).len(), 2);
        assert_eq!(original.get(&Geometry::Line).len(), 1);

        // Each copy tracks its own identities.
        assert!(copy.append(Geometry::Line, Rc::clone(&line)).is_err());
        assert!(copy.append(Geometry::Line, Rc::clone(&added)).is_err());
        original.append(Geometry::Line, added).unwrap();

        line.base().set_global_index(9);
        assert_eq!(copy.get(&Geometry::Line)[0].base().global_index(), Some(9));
    }

    #[test]
    fn test_boundary_condition_entries() {
        let mut bcs = BoundaryConditionContainer::default();
        let key = (BoundaryConditionKind::Dirichlet, Geometry::Point);
        let bc = Rc::new(BoundaryCondition::new(key.0, set(Geometry::Point), "NUMDOF 3 ONOFF 1 1 1"));
        bcs.append(key, bc).unwrap();
        bcs.append(key, Rc::new(MeshItem::raw("E 1 - NUMDOF 3 ONOFF 0 0 1"))).unwrap();
        assert!(bcs.append(key, set(Geometry::Point)).is_err());
        assert_eq!(bcs.get(&key).len(), 2);
    }

    #[test]
    fn test_typed_set_view() {
        let mut sets = GeometrySetContainer::default();
        sets.append(Geometry::Point, Rc::new(MeshItem::raw("NODE 1 DNODE 1"))).unwrap();
        sets.append(Geometry::Point, set(Geometry::Point)).unwrap();
        assert_eq!(sets.sets(Geometry::Point).count(), 1);
    }
}
