//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use plank_core::application::{error::ExecError, ports::Filesystem};

/// In-memory filesystem for testing.
///
/// Cloning is cheap and shares state, so a test can hold one handle while
/// the executor owns another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file without going through the port (testing helper).
    pub fn seed_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let mut inner = self.inner.write().unwrap();
        let path = path.into();
        if let Some(parent) = path.parent() {
            inner.directories.insert(parent.to_path_buf());
        }
        inner.files.insert(path, content.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files in path order.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, ExecError> {
        let inner = self.inner.read().map_err(poisoned)?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| ExecError::NotFound {
                path: path.to_path_buf(),
            })
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<(), ExecError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &str) -> Result<(), ExecError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        match inner.files.get_mut(path) {
            Some(existing) => {
                existing.push_str(content);
                Ok(())
            }
            None => Err(ExecError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), ExecError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn copy_dir(&self, source: &Path, dest: &Path) -> Result<(), ExecError> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        if !inner.directories.contains(source)
            && !inner.files.keys().any(|p| p.starts_with(source))
        {
            return Err(ExecError::NotFound {
                path: source.to_path_buf(),
            });
        }
        let copied: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter(|(p, _)| p.starts_with(source))
            .map(|(p, c)| {
                let rel = p.strip_prefix(source).expect("prefix checked above");
                (dest.join(rel), c.clone())
            })
            .collect();
        inner.directories.insert(dest.to_path_buf());
        inner.files.extend(copied);
        Ok(())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> ExecError {
    ExecError::Io {
        path: PathBuf::new(),
        reason: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_files_are_visible_through_the_port() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/t/a.txt", "x");
        assert!(fs.exists(Path::new("/t/a.txt")));
        assert_eq!(fs.read_to_string(Path::new("/t/a.txt")).unwrap(), "x");
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let handle = fs.clone();
        fs.write_file(Path::new("/t/a.txt"), "x").unwrap();
        assert_eq!(handle.read_file("/t/a.txt").as_deref(), Some("x"));
    }

    #[test]
    fn copy_dir_rewrites_prefix() {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/assets/admin/dashboard.rb", "dash");
        fs.seed_file("/assets/admin/nested/page.rb", "page");

        fs.copy_dir(Path::new("/assets/admin"), Path::new("/t/app/admin"))
            .unwrap();

        assert_eq!(
            fs.read_file("/t/app/admin/dashboard.rb").as_deref(),
            Some("dash")
        );
        assert_eq!(
            fs.read_file("/t/app/admin/nested/page.rb").as_deref(),
            Some("page")
        );
    }

    #[test]
    fn copy_dir_missing_source_fails() {
        let fs = MemoryFilesystem::new();
        assert!(matches!(
            fs.copy_dir(Path::new("/nope"), Path::new("/t")),
            Err(ExecError::NotFound { .. })
        ));
    }

    #[test]
    fn create_dir_all_registers_ancestors() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/t/a/b/c")).unwrap();
        assert!(fs.exists(Path::new("/t/a")));
        assert!(fs.exists(Path::new("/t/a/b/c")));
    }
}
