//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use walkdir::WalkDir;

use plank_core::application::{error::ExecError, ports::Filesystem};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> Result<String, ExecError> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), ExecError> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn append_file(&self, path: &Path, content: &str) -> Result<(), ExecError> {
        use io::Write;
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| map_io_error(path, e, "open file for append"))?;
        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "append to file"))
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), ExecError> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn copy_dir(&self, source: &Path, dest: &Path) -> Result<(), ExecError> {
        if !source.is_dir() {
            return Err(ExecError::NotFound {
                path: source.to_path_buf(),
            });
        }
        for entry in WalkDir::new(source).min_depth(1) {
            let entry = entry.map_err(|e| ExecError::Io {
                path: source.to_path_buf(),
                reason: format!("directory walk error: {e}"),
            })?;
            let rel = entry.path().strip_prefix(source).map_err(|_| ExecError::Io {
                path: entry.path().to_path_buf(),
                reason: "failed to relativise path during copy".into(),
            })?;
            let target = dest.join(rel);
            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)
                    .map_err(|e| map_io_error(&target, e, "create directory"))?;
            } else if entry.file_type().is_file() {
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| map_io_error(parent, e, "create directory"))?;
                }
                std::fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(&target, e, "copy file"))?;
            }
            // Symlinks and other special types are skipped.
        }
        Ok(())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ExecError {
    if e.kind() == io::ErrorKind::NotFound {
        return ExecError::NotFound {
            path: path.to_path_buf(),
        };
    }
    ExecError::Io {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_and_read_round_trip() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = temp.path().join("a.txt");

        fs.write_file(&path, "hello").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn append_requires_existing_file() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = temp.path().join("missing.txt");

        assert!(matches!(
            fs.append_file(&path, "x"),
            Err(ExecError::NotFound { .. })
        ));
    }

    #[test]
    fn append_extends_content() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = temp.path().join("log.txt");

        fs.write_file(&path, "one\n").unwrap();
        fs.append_file(&path, "two\n").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn copy_dir_preserves_nested_layout() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let src = temp.path().join("assets");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::write(src.join("top.rb"), "top").unwrap();
        std::fs::write(src.join("nested/deep.rb"), "deep").unwrap();

        let dst = temp.path().join("target/app/admin");
        fs.copy_dir(&src, &dst).unwrap();

        assert_eq!(fs.read_to_string(&dst.join("top.rb")).unwrap(), "top");
        assert_eq!(
            fs.read_to_string(&dst.join("nested/deep.rb")).unwrap(),
            "deep"
        );
    }

    #[test]
    fn copy_dir_missing_source_is_not_found() {
        let temp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        assert!(matches!(
            fs.copy_dir(&temp.path().join("nope"), &temp.path().join("dst")),
            Err(ExecError::NotFound { .. })
        ));
    }
}
