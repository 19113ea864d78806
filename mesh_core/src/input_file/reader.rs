//! Import of legacy input files
//!
//! The file is split at header lines (lines starting with `-----`). Mesh
//! sections are routed into the mesh, everything else becomes a generic
//! section. Comment and blank lines inside a mesh section are attached to the
//! item that follows them; trailing ones are dropped.
//!
//! References between imported items are written as 1-based numbers. They
//! are read as placeholders and resolved once the whole file is read.

use std::path::Path;
use std::rc::Rc;

use crate::boundary_condition::BoundaryCondition;
use crate::element::Element;
use crate::errors::{MeshError, MeshResult};
use crate::file_io;
use crate::geometry_set::GeometrySet;
use crate::item::{AnyItem, MeshItem, Payload};
use crate::kinds::{BoundaryConditionKind, Geometry};
use crate::material::Material;
use crate::node::Node;

use super::{InputFile, InputSection, COUPLING_SECTION};

/// A data line with the comment lines preceding it
type Commented = (String, Vec<String>);

fn is_comment(line: &str) -> bool {
    line.is_empty() || line.starts_with("//")
}

fn group_comments(data: &[String]) -> Vec<Commented> {
    let mut groups = Vec::new();
    let mut comments = Vec::new();
    for line in data {
        if is_comment(line) {
            comments.push(line.clone());
        } else {
            groups.push((line.clone(), std::mem::take(&mut comments)));
        }
    }
    groups
}

/// Set number of a topology line (`NODE <n> DNODE <set>`)
fn set_number(line: &str) -> MeshResult<usize> {
    line.split_whitespace()
        .nth(3)
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| MeshError::parse(line, "Missing set number"))
}

impl InputFile {
    /// Import a legacy input file from `path`.
    pub fn read_dat(&mut self, path: &Path) -> MeshResult<()> {
        let text = file_io::read_text(path)?;
        self.read_dat_str(&text)?;
        log::info!(
            "Read input file {} ({} nodes, {} elements)",
            path.display(),
            self.mesh.nodes().len(),
            self.mesh.elements().len()
        );
        Ok(())
    }

    /// Import a legacy input file from its text.
    ///
    /// Only one file can be imported, and only into an empty mesh.
    pub fn read_dat_str(&mut self, text: &str) -> MeshResult<()> {
        if self.dat_loaded {
            return Err(MeshError::invalid_input(
                "input file",
                "second import",
                "It is not possible to import two input files",
            ));
        }
        if !self.mesh.is_empty() {
            return Err(MeshError::invalid_input(
                "input file",
                "non-empty mesh",
                "An input file can only be imported into an empty mesh",
            ));
        }

        let mut header: Option<String> = None;
        let mut data = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.starts_with("-----") {
                self.add_dat_section(header.as_deref(), std::mem::take(&mut data))?;
                header = Some(line.to_string());
            } else {
                data.push(line.to_string());
            }
        }
        self.add_dat_section(header.as_deref(), data)?;

        self.mesh.link_placeholders()?;
        self.dat_loaded = true;
        Ok(())
    }

    fn add_dat_section(&mut self, header: Option<&str>, data: Vec<String>) -> MeshResult<()> {
        let Some(header) = header else {
            if !(data.len() == 1 && data[0].is_empty()) {
                self.dat_header.extend(data);
            }
            return Ok(());
        };
        let name = header.trim_start_matches('-');
        log::debug!("Importing section {}", name);

        match name {
            "MATERIALS" => {
                for (line, comments) in group_comments(&data) {
                    self.mesh.add_material(Rc::new(Material::verbatim(line, comments)));
                }
            }
            "NODE COORDS" => {
                for (line, comments) in group_comments(&data) {
                    self.mesh.add_node(Rc::new(Node::from_dat(&line, comments)?))?;
                }
            }
            "STRUCTURE ELEMENTS" => {
                for (line, comments) in group_comments(&data) {
                    self.mesh.add_element(Rc::new(Element::from_dat(&line, comments)?))?;
                }
            }
            "DESIGN DESCRIPTION" | "END" => {}
            COUPLING_SECTION => {
                // The first line holds the count.
                for (line, comments) in group_comments(&data).into_iter().skip(1) {
                    let item = MeshItem::new(Some(Payload::Line(line)), comments);
                    self.mesh.add_imported_coupling(Rc::new(item))?;
                }
            }
            _ if name.starts_with("FUNCT") => {
                let mut lines = data;
                while lines.last().is_some_and(|line| line.is_empty()) {
                    lines.pop();
                }
                self.mesh.add_function(Rc::new(MeshItem::raw(Payload::Lines(lines))));
            }
            _ => {
                if let Some((kind, geometry)) = BoundaryConditionKind::from_section_name(name) {
                    self.add_boundary_conditions(kind, geometry, &data)?;
                } else if let Some(geometry) = Geometry::from_topology_section(name) {
                    self.add_geometry_sets(geometry, &data)?;
                } else {
                    if name.ends_with("CONDITIONS") || name.ends_with("TOPOLOGY") {
                        log::warn!("Section {} is kept verbatim", name);
                    }
                    self.add_section(InputSection::from_lines(name, &data)?)?;
                }
            }
        }
        Ok(())
    }

    /// Condition lines; the first line holds the count and is skipped.
    fn add_boundary_conditions(
        &mut self,
        kind: BoundaryConditionKind,
        geometry: Geometry,
        data: &[String],
    ) -> MeshResult<()> {
        let full = self.settings.import_mesh_full;
        for (line, comments) in group_comments(data).into_iter().skip(1) {
            let item = if full {
                AnyItem::from(Rc::new(BoundaryCondition::from_dat(kind, geometry, &line, comments)?))
            } else {
                AnyItem::from(Rc::new(MeshItem::new(Some(Payload::Line(line)), comments)))
            };
            self.mesh.boundary_conditions_mut().append((kind, geometry), item)?;
        }
        Ok(())
    }

    /// Topology lines, grouped into one set per set number.
    fn add_geometry_sets(&mut self, geometry: Geometry, data: &[String]) -> MeshResult<()> {
        let mut groups: Vec<(usize, Vec<String>, Vec<String>)> = Vec::new();
        for (line, comments) in group_comments(data) {
            let number = set_number(&line)?;
            match groups.last_mut() {
                Some((current, lines, _)) if *current == number => lines.push(line),
                _ => groups.push((number, vec![line], comments)),
            }
        }

        let full = self.settings.import_mesh_full;
        for (_, lines, comments) in groups {
            let item = if full {
                AnyItem::from(Rc::new(GeometrySet::from_dat(geometry, &lines, comments)?))
            } else {
                AnyItem::from(Rc::new(MeshItem::new(Some(Payload::Lines(lines)), comments)))
            };
            self.mesh.geometry_sets_mut().append(geometry, item)?;
        }
        Ok(())
    }
}
