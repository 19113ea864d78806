//! Materials
//!
//! A material is either a definition string, written as
//! `MAT <index> <definition>` with the index assigned by the numbering pass,
//! or a verbatim line taken from an imported file, written unchanged.
//!
//! Beam materials with a circular cross-section can be built from their
//! physical parameters:
//!
//! ```rust
//! use mesh_core::material::{BeamMaterialParameters, Material};
//!
//! let params = BeamMaterialParameters {
//!     radius: 0.5,
//!     youngs_modulus: 100.0,
//!     nu: 0.3,
//!     density: 1.0,
//! };
//! let material = Material::beam_reissner(&params, 1.0)?;
//! assert!(material.definition().starts_with("MAT_BeamReissnerElastHyper YOUNG 100"));
//! # Ok::<(), mesh_core::errors::MeshError>(())
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{MeshError, MeshResult};
use crate::item::{Item, MeshItem};

/// Physical parameters shared by all beam materials
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamMaterialParameters {
    /// Cross-section radius
    pub radius: f64,
    /// Young's modulus
    pub youngs_modulus: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Mass density
    pub density: f64,
}

impl BeamMaterialParameters {
    fn validate(&self) -> MeshResult<()> {
        if self.radius <= 0.0 {
            return Err(MeshError::invalid_input(
                "radius",
                self.radius.to_string(),
                "Radius must be positive",
            ));
        }
        if self.youngs_modulus <= 0.0 {
            return Err(MeshError::invalid_input(
                "youngs_modulus",
                self.youngs_modulus.to_string(),
                "Young's modulus must be positive",
            ));
        }
        Ok(())
    }

    /// Shear modulus G = E / (2 (1 + nu))
    pub fn shear_modulus(&self) -> f64 {
        self.youngs_modulus / (2.0 * (1.0 + self.nu))
    }
}

/// Area and moments of inertia of a beam cross-section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    pub area: f64,
    pub mom2: f64,
    pub mom3: f64,
    pub polar: f64,
}

impl CrossSection {
    /// Solid circular cross-section
    pub fn circular(radius: f64) -> Self {
        let area = PI * radius.powi(2);
        let mom2 = PI * radius.powi(4) * 0.25;
        CrossSection {
            area,
            mom2,
            mom3: mom2,
            polar: 2.0 * mom2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Definition {
    /// Rendered as `MAT <index> <definition>`
    Numbered(String),
    /// Rendered unchanged
    Verbatim(String),
}

/// A material referenced by elements
#[derive(Debug)]
pub struct Material {
    base: MeshItem,
    definition: Definition,
}

impl Material {
    /// A material written as `MAT <index> <definition>`
    pub fn new(definition: impl Into<String>) -> Self {
        Material {
            base: MeshItem::empty(),
            definition: Definition::Numbered(definition.into()),
        }
    }

    /// A material line kept exactly as imported, including its number
    pub fn verbatim(line: impl Into<String>, comments: Vec<String>) -> Self {
        Material {
            base: MeshItem::new(None, comments),
            definition: Definition::Verbatim(line.into()),
        }
    }

    /// Hyperelastic Simo-Reissner beam material with a circular section
    pub fn beam_reissner(params: &BeamMaterialParameters, shear_correction: f64) -> MeshResult<Self> {
        params.validate()?;
        let section = CrossSection::circular(params.radius);
        Ok(Self::new(format!(
            "MAT_BeamReissnerElastHyper YOUNG {} POISSONRATIO {} DENS {} CROSSAREA {} \
             SHEARCORR {} MOMINPOL {} MOMIN2 {} MOMIN3 {}",
            params.youngs_modulus,
            params.nu,
            params.density,
            section.area,
            shear_correction,
            section.polar,
            section.mom2,
            section.mom3,
        )))
    }

    /// Hyperelastic Kirchhoff-Love beam material with a circular section
    pub fn beam_kirchhoff(params: &BeamMaterialParameters, is_fad: bool) -> MeshResult<Self> {
        params.validate()?;
        let section = CrossSection::circular(params.radius);
        Ok(Self::new(format!(
            "MAT_BeamKirchhoffElastHyper YOUNG {} SHEARMOD {} DENS {} CROSSAREA {} \
             MOMINPOL {} MOMIN2 {} MOMIN3 {} FAD {}",
            params.youngs_modulus,
            params.shear_modulus(),
            params.density,
            section.area,
            section.polar,
            section.mom2,
            section.mom3,
            if is_fad { "yes" } else { "no" },
        )))
    }

    pub fn definition(&self) -> &str {
        match &self.definition {
            Definition::Numbered(definition) | Definition::Verbatim(definition) => definition,
        }
    }

    pub fn is_verbatim(&self) -> bool {
        matches!(self.definition, Definition::Verbatim(_))
    }
}

impl Item for Material {
    fn base(&self) -> &MeshItem {
        &self.base
    }

    fn payload_lines(&self) -> MeshResult<Vec<String>> {
        match &self.definition {
            Definition::Numbered(definition) => {
                let index = self.base.require_index("Material")?;
                Ok(vec![format!("MAT {} {}", index, definition)])
            }
            Definition::Verbatim(line) => Ok(vec![line.clone()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> BeamMaterialParameters {
        BeamMaterialParameters {
            radius: 1.0,
            youngs_modulus: 2.0,
            nu: 0.0,
            density: 0.0,
        }
    }

    #[test]
    fn test_circular_section() {
        let section = CrossSection::circular(1.0);
        assert!((section.area - PI).abs() < 1e-12);
        assert!((section.mom2 - PI / 4.0).abs() < 1e-12);
        assert!((section.polar - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_numbered_render() {
        let material = Material::new("MAT_Struct_StVenantKirchhoff YOUNG 1 NUE 0 DENS 0");
        assert!(material.render().is_err());
        material.base().set_global_index(3);
        assert_eq!(
            material.render().unwrap(),
            vec!["MAT 3 MAT_Struct_StVenantKirchhoff YOUNG 1 NUE 0 DENS 0"]
        );
    }

    #[test]
    fn test_verbatim_ignores_index() {
        let material = Material::verbatim("MAT 10 ELAST_CoupNeoHooke YOUNG 0.16 NUE 0.45", vec!["// a".into()]);
        material.base().set_global_index(1);
        assert!(material.is_verbatim());
        assert_eq!(
            material.render().unwrap(),
            vec!["// a", "MAT 10 ELAST_CoupNeoHooke YOUNG 0.16 NUE 0.45"]
        );
    }

    #[test]
    fn test_kirchhoff_shear_modulus() {
        let material = Material::beam_kirchhoff(&params(), false).unwrap();
        assert!(material.definition().contains("SHEARMOD 1 "));
        assert!(material.definition().ends_with("FAD no"));
    }

    #[test]
    fn test_invalid_radius() {
        let mut p = params();
        p.radius = 0.0;
        let err = Material::beam_reissner(&p, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }
}
