//! # Input Files
//!
//! An [`InputFile`] is a [`Mesh`] together with the generic sections of a
//! solver input file. It can import an existing legacy input file, and it
//! renders the complete file: generic sections first, then the mesh sections
//! in the fixed order the solver expects.
//!
//! ## Rendering
//!
//! [`InputFile::render`] runs the numbering pass before writing any mesh
//! section, so every cross reference (element nodes, material numbers, set
//! numbers in boundary conditions) matches the numbers written.
//!
//! ## Example
//!
//! ```rust
//! use mesh_core::input_file::InputFile;
//! use mesh_core::settings::MeshSettings;
//!
//! let dat = "\
//! -----------------------------------------------------------------NODE COORDS
//! NODE 1 COORD 0 0 0
//! NODE 2 COORD 1 0 0
//! ----------------------------------------------------------STRUCTURE ELEMENTS
//! 1 BEAM3R LINE2 1 2 MAT 1 TRIADS 0 0 0 0 0 0
//! ";
//!
//! let mut input = InputFile::new(MeshSettings::default());
//! input.read_dat_str(dat)?;
//! let lines = input.render(false)?;
//! assert!(lines.contains(&"NODE 2 COORD 1 0 0".to_string()));
//! assert!(lines.contains(&"1 BEAM3R LINE2 1 2 MAT 1 TRIADS 0 0 0 0 0 0".to_string()));
//! # Ok::<(), mesh_core::errors::MeshError>(())
//! ```

mod reader;
mod section;

use std::path::Path;

use crate::errors::{MeshError, MeshResult};
use crate::file_io;
use crate::item::{AnyItem, Item};
use crate::kinds::Geometry;
use crate::mesh::Mesh;
use crate::settings::MeshSettings;

pub use section::{section_header, InputLine, InputSection};

/// Element sections of other physics fields; imported but never written
const SKIPPED_SECTIONS: [&str; 9] = [
    "FLUID ELEMENTS",
    "ALE ELEMENTS",
    "LUBRICATION ELEMENTS",
    "TRANSPORT ELEMENTS",
    "TRANSPORT2 ELEMENTS",
    "THERMO ELEMENTS",
    "ACOUSTIC ELEMENTS",
    "CELL ELEMENTS",
    "CELLSCATRA ELEMENTS",
];

const COUPLING_SECTION: &str = "DESIGN POINT COUPLING CONDITIONS";

/// A complete solver input file
#[derive(Debug, Clone)]
pub struct InputFile {
    mesh: Mesh,
    settings: MeshSettings,
    dat_header: Vec<String>,
    sections: Vec<InputSection>,
    dat_loaded: bool,
}

impl Default for InputFile {
    fn default() -> Self {
        Self::new(MeshSettings::default())
    }
}

impl InputFile {
    pub fn new(settings: MeshSettings) -> Self {
        InputFile {
            mesh: Mesh::new(&settings.keys),
            settings,
            dat_header: Vec::new(),
            sections: Vec::new(),
            dat_loaded: false,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn settings(&self) -> &MeshSettings {
        &self.settings
    }

    /// Lines of an imported file that preceded its first section
    pub fn dat_header(&self) -> &[String] {
        &self.dat_header
    }

    pub fn sections(&self) -> &[InputSection] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&InputSection> {
        self.sections.iter().find(|section| section.name() == name)
    }

    /// Add a generic section; a section with the same name is merged into
    /// the existing one.
    pub fn add_section(&mut self, section: InputSection) -> MeshResult<()> {
        match self.sections.iter_mut().find(|existing| existing.name() == section.name()) {
            Some(existing) => existing.merge(&section, false),
            None => {
                self.sections.push(section);
                Ok(())
            }
        }
    }

    /// Remove and return a generic section
    pub fn delete_section(&mut self, name: &str) -> MeshResult<InputSection> {
        let position = self
            .sections
            .iter()
            .position(|section| section.name() == name)
            .ok_or_else(|| MeshError::invalid_input("section", name, "Section does not exist"))?;
        Ok(self.sections.remove(position))
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Comment block written at the top of a generated file
    fn header_lines(&self) -> Vec<String> {
        let rule = format!("// {}", "-".repeat(self.settings.section_width.saturating_sub(3)));
        let mut lines = vec![
            rule.clone(),
            format!("// Input file created with mesh_core {}", env!("CARGO_PKG_VERSION")),
            format!("// Maintainer: {}", self.settings.maintainer),
            format!("// Date:       {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S")),
        ];
        if let Some(description) = &self.settings.description {
            lines.push(format!("// Description: {}", description));
        }
        lines.push(rule);
        lines
    }

    fn push_section<'a>(
        &self,
        lines: &mut Vec<String>,
        name: &str,
        counter: Option<String>,
        items: impl IntoIterator<Item = &'a AnyItem>,
    ) -> MeshResult<()> {
        lines.push(section_header(name, self.settings.section_width));
        lines.extend(counter);
        for item in items {
            lines.extend(item.render()?);
        }
        Ok(())
    }

    /// All lines of the input file.
    ///
    /// Numbers every item of the mesh. With `header` set, a comment block
    /// with maintainer and date is written first.
    pub fn render(&self, header: bool) -> MeshResult<Vec<String>> {
        let width = self.settings.section_width;
        let mut lines = Vec::new();

        if header {
            lines.extend(self.header_lines());
        }
        lines.extend(self.dat_header.iter().cloned());

        for section in &self.sections {
            if SKIPPED_SECTIONS.contains(&section.name()) {
                log::debug!("Skipping section {}", section.name());
                continue;
            }
            lines.extend(section.render(width));
        }

        let sets = self.mesh.assign_global_indices()?;

        let materials: Vec<AnyItem> = self.mesh.materials().iter().cloned().map(AnyItem::from).collect();
        self.push_section(&mut lines, "MATERIALS", None, &materials)?;

        for (i, function) in self.mesh.functions().iter().enumerate() {
            lines.push(section_header(&format!("FUNCT{}", i + 1), width));
            lines.extend(function.render()?);
        }

        lines.push(section_header("DESIGN DESCRIPTION", width));
        for geometry in Geometry::ALL {
            lines.push(format!("{} {}", geometry.design_count(), sets.get(&geometry).len()));
        }

        for (&(kind, geometry), items) in self.mesh.boundary_conditions().iter() {
            if items.is_empty() {
                continue;
            }
            self.push_section(
                &mut lines,
                &kind.section_name(geometry),
                Some(format!("{} {}", geometry.counter(), items.len())),
                items,
            )?;
        }

        let couplings = self.mesh.couplings();
        if !couplings.is_empty() {
            self.mesh.set_node_links()?;
        }
        let items: Vec<AnyItem> = self
            .mesh
            .imported_couplings()
            .iter()
            .cloned()
            .map(AnyItem::from)
            .chain(couplings.iter().cloned().map(AnyItem::from))
            .collect();
        if !items.is_empty() {
            self.push_section(
                &mut lines,
                COUPLING_SECTION,
                Some(format!("DPOINT {}", items.len())),
                &items,
            )?;
        }

        for (geometry, items) in sets.iter() {
            if !items.is_empty() {
                self.push_section(&mut lines, geometry.topology_section(), None, items)?;
            }
        }

        lines.push(section_header("NODE COORDS", width));
        for node in self.mesh.nodes() {
            lines.extend(node.render()?);
        }
        lines.push(section_header("STRUCTURE ELEMENTS", width));
        for element in self.mesh.elements() {
            lines.extend(element.render()?);
        }
        lines.push(section_header("END", width));

        Ok(lines)
    }

    /// The rendered file as one string, lines separated by newlines
    pub fn to_dat_string(&self, header: bool) -> MeshResult<String> {
        Ok(self.render(header)?.join("\n"))
    }

    /// Render and write the file atomically to `path`.
    pub fn write(&self, path: &Path, header: bool) -> MeshResult<()> {
        let mut contents = self.to_dat_string(header)?;
        contents.push('\n');
        file_io::write_atomic(path, &contents)?;
        log::info!("Wrote input file {}", path.display());
        Ok(())
    }
}
