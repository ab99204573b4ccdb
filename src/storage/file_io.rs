//! Whole-file blob I/O for the filesystem backend
//!
//! Writes go to a hidden sibling (`.expenses.json.tmp`) that is fsynced and
//! renamed over the target, so readers see either the old or the new blob.

use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{SpendError, SpendResult};

fn storage_error(action: &str, path: &Path, err: io::Error) -> SpendError {
    SpendError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Contents of `path`, or `None` when the file does not exist
pub fn read_blob<P: AsRef<Path>>(path: P) -> SpendResult<Option<String>> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(storage_error("read", path, e)),
    }
}

/// Replace `path` with `contents` via write-sync-rename
pub fn write_blob_atomic<P: AsRef<Path>>(path: P, contents: &str) -> SpendResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    let temp_path = temp_sibling(path);
    let written = File::create(&temp_path).and_then(|mut file| {
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&temp_path, path)) {
        let _ = fs::remove_file(&temp_path);
        return Err(storage_error("write", path, e));
    }

    trace!(path = %path.display(), bytes = contents.len(), "Wrote blob");
    Ok(())
}

/// Delete `path`; a file that is already gone counts as removed
pub fn remove_blob<P: AsRef<Path>>(path: P) -> SpendResult<()> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(storage_error("remove", path, e)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(read_blob(temp_dir.path().join("absent.json")).unwrap(), None);
    }

    #[test]
    fn test_write_replaces_and_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");

        write_blob_atomic(&path, r#"[{"id":"a"}]"#).unwrap();
        write_blob_atomic(&path, "[]").unwrap();

        assert_eq!(read_blob(&path).unwrap().as_deref(), Some("[]"));
        assert!(!temp_sibling(&path).exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("x/y/categories.json");

        write_blob_atomic(&path, "[]").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_write_over_a_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("taken");
        fs::create_dir(&path).unwrap();

        let err = write_blob_atomic(&path, "[]").unwrap_err();
        assert!(matches!(err, SpendError::Storage(_)));
        assert!(!temp_sibling(&path).exists());
    }

    #[test]
    fn test_remove_twice() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        write_blob_atomic(&path, "[]").unwrap();

        remove_blob(&path).unwrap();
        remove_blob(&path).unwrap();
        assert!(!path.exists());
    }
}
