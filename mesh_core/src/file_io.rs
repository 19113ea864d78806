//! # File I/O Module
//!
//! Reading and writing input files:
//! - **Atomic writes**: Write to `.tmp`, sync, rename, so an interrupted
//!   write never leaves a truncated input file behind
//! - **Uniform errors**: Every I/O failure becomes a [`MeshError::FileError`]
//!   naming the operation and the path
//!
//! ## Example
//!
//! ```rust,no_run
//! use mesh_core::file_io::{read_text, write_atomic};
//! use std::path::Path;
//!
//! let path = Path::new("beam.dat");
//! write_atomic(path, "-----------------------------------------------------------------------END\n")?;
//! let text = read_text(path)?;
//! # Ok::<(), mesh_core::errors::MeshError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{MeshError, MeshResult};

/// Temporary path used while writing `path`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp_path = path.to_path_buf();
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp_path.set_extension(extension);
    tmp_path
}

/// Write `contents` to `path` with atomic write semantics.
///
/// The write process:
/// 1. Write to a temporary file next to `path`
/// 2. Sync to disk (fsync)
/// 3. Rename the temporary file to `path`
pub fn write_atomic(path: &Path, contents: &str) -> MeshResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        MeshError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        MeshError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        MeshError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        MeshError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Read a whole text file.
pub fn read_text(path: &Path) -> MeshResult<String> {
    let mut file = File::open(path)
        .map_err(|e| MeshError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| MeshError::file_error("read", path.display().to_string(), e.to_string()))?;

    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_file_path(name: &str) -> PathBuf {
        temp_dir().join(format!("mesh_core_test_{}.dat", name))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/path/to/beam.dat")),
            Path::new("/path/to/beam.dat.tmp")
        );
        assert_eq!(tmp_path_for(Path::new("beam")), Path::new("beam.tmp"));
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let path = temp_file_path("roundtrip");
        write_atomic(&path, "NODE 1 COORD 0 0 0\n").unwrap();
        assert_eq!(read_text(&path).unwrap(), "NODE 1 COORD 0 0 0\n");
        assert!(!tmp_path_for(&path).exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let path = temp_file_path("replace");
        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(read_text(&path).unwrap(), "second");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_text(&temp_file_path("does_not_exist")).unwrap_err();
        assert!(matches!(err, MeshError::FileError { ref operation, .. } if operation == "open"));
    }
}
