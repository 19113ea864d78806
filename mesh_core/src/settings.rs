//! # Settings
//!
//! Configuration for building and exporting a mesh. Settings are plain data
//! passed into constructors; nothing in mesh_core reads ambient global state.
//!
//! ## Example
//!
//! ```rust
//! use mesh_core::settings::MeshSettings;
//!
//! let settings = MeshSettings::from_json_str(r#"{ "maintainer": "Jane", "section_width": 60 }"#)?;
//! assert_eq!(settings.section_width, 60);
//! assert!(settings.import_mesh_full);
//! # Ok::<(), mesh_core::errors::MeshError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{MeshError, MeshResult};
use crate::file_io;
use crate::kinds::{BoundaryConditionKind, Geometry};

/// Default width of a section header line
pub const DEFAULT_SECTION_WIDTH: usize = 80;

/// The key enumerations containers are pre-seeded with.
///
/// Order matters: containers iterate their keys in the order listed here,
/// which fixes the section order of the exported file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRegistry {
    /// Boundary condition kinds, in export order
    pub boundary_conditions: Vec<BoundaryConditionKind>,
    /// Geometry kinds, in export order
    pub geometries: Vec<Geometry>,
}

impl Default for KeyRegistry {
    fn default() -> Self {
        KeyRegistry {
            boundary_conditions: BoundaryConditionKind::ALL.to_vec(),
            geometries: Geometry::ALL.to_vec(),
        }
    }
}

impl KeyRegistry {
    /// Every (boundary condition, geometry) pair, kinds varying slowest
    pub fn boundary_condition_keys(&self) -> Vec<(BoundaryConditionKind, Geometry)> {
        self.boundary_conditions
            .iter()
            .flat_map(|&kind| self.geometries.iter().map(move |&geometry| (kind, geometry)))
            .collect()
    }
}

/// Settings for mesh construction and input file export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSettings {
    /// Total width of a `----NAME` section header line
    pub section_width: usize,

    /// Import legacy geometry sets and boundary conditions as typed objects.
    ///
    /// When false they are kept as verbatim items and exported unchanged.
    pub import_mesh_full: bool,

    /// Person responsible for the generated input file
    pub maintainer: String,

    /// Free text written into the file header
    pub description: Option<String>,

    /// Key enumerations used to pre-seed containers
    pub keys: KeyRegistry,
}

impl Default for MeshSettings {
    fn default() -> Self {
        MeshSettings {
            section_width: DEFAULT_SECTION_WIDTH,
            import_mesh_full: true,
            maintainer: String::new(),
            description: None,
            keys: KeyRegistry::default(),
        }
    }
}

impl MeshSettings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> MeshResult<Self> {
        let settings: MeshSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> MeshResult<Self> {
        let contents = file_io::read_text(path)?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> MeshResult<()> {
        if self.keys.geometries.is_empty() {
            return Err(MeshError::invalid_input(
                "keys.geometries",
                "[]",
                "At least one geometry kind is required",
            ));
        }
        Ok(())
    }
}
