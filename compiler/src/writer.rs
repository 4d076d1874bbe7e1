//! Writes generated code to disk, leaving the file alone when the content is
//! already up to date so its modification time does not change.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::GenError;

#[derive(Debug, PartialEq)]
pub enum WriteOutcome {
    Written {
        path:  PathBuf,
        bytes: usize,
    },
    /// The file already held exactly this content.
    Unchanged {
        path: PathBuf,
    },
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written { path, .. } => path,
            WriteOutcome::Unchanged { path } => path,
        }
    }

    pub fn was_written(&self) -> bool {
        matches!(self, WriteOutcome::Written { .. })
    }
}

/// Previous content of `path`. Anything unreadable counts as empty.
pub fn read_previous(path: &Path) -> Vec<u8> {
    match fs::read(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no previous content");
            Vec::new()
        }
    }
}

pub fn is_up_to_date(path: &Path, content: &str) -> bool {
    read_previous(path) == content.as_bytes()
}

/// Replaces the file at `path` with `content` unless it already matches.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome, GenError> {
    if is_up_to_date(path, content) {
        info!(path = %path.display(), "output unchanged, not writing");
        return Ok(WriteOutcome::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| GenError::Write {
                path:   parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(path, content).map_err(|e| GenError::Write {
        path:   path.to_path_buf(),
        source: e,
    })?;

    info!(path = %path.display(), bytes = content.len(), "wrote output");
    Ok(WriteOutcome::Written {
        path:  path.to_path_buf(),
        bytes: content.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.rs");

        let outcome = write_if_changed(&path, "pub struct Ok;\n").unwrap();
        assert_eq!(outcome, WriteOutcome::Written { path: path.clone(), bytes: 15 });
        assert_eq!(fs::read_to_string(&path).unwrap(), "pub struct Ok;\n");
    }

    #[test]
    fn test_second_write_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.rs");

        assert!(write_if_changed(&path, "a").unwrap().was_written());
        let outcome = write_if_changed(&path, "a").unwrap();
        assert!(!outcome.was_written());
        assert_eq!(outcome.path(), path.as_path());

        assert!(write_if_changed(&path, "b").unwrap().was_written());
        assert_eq!(fs::read_to_string(&path).unwrap(), "b");
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("auto/td/api.rs");

        assert!(write_if_changed(&path, "x").unwrap().was_written());
        assert!(path.exists());
    }

    #[test]
    fn test_unreadable_previous_is_empty() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a file.
        assert!(read_previous(dir.path()).is_empty());
        assert!(is_up_to_date(&dir.path().join("missing.rs"), ""));
        assert!(!is_up_to_date(&dir.path().join("missing.rs"), "x"));
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        // The target path is an existing directory.
        let err = write_if_changed(dir.path(), "x").unwrap_err();
        assert!(matches!(err, GenError::Write { .. }), "{:?}", err);
    }
}
