use std::fmt;
use std::path::{Path, PathBuf};

use super::DomainError;

/// A path inside the target project, guaranteed to be relative.
///
/// Invariant: never absolute. Enforced at construction and on deserialize,
/// so a plan manifest cannot smuggle an absolute target path past the
/// executor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the path is absolute (use `try_new` for fallible).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::try_new(path).expect("RelativePath cannot be absolute")
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() {
            Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })
        } else {
            Ok(Self(path))
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolve against a target root directory.
    pub fn resolved_in(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl serde::Serialize for RelativePath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.display().to_string())
    }
}

impl<'de> serde::Deserialize<'de> for RelativePath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::try_new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_accepted() {
        let p = RelativePath::try_new("app/models/post.rb").unwrap();
        assert_eq!(p.to_string(), "app/models/post.rb");
    }

    #[test]
    fn absolute_paths_rejected() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    #[should_panic]
    fn new_panics_on_absolute() {
        RelativePath::new("/tmp/x");
    }

    #[test]
    fn resolved_in_joins_root() {
        let p = RelativePath::from("config/routes.rb");
        assert_eq!(
            p.resolved_in(Path::new("/work/app")),
            PathBuf::from("/work/app/config/routes.rb")
        );
    }

    #[test]
    fn deserialize_rejects_absolute() {
        let err = toml_like_roundtrip("/abs/path");
        assert!(err.is_err());
    }

    fn toml_like_roundtrip(s: &str) -> Result<RelativePath, serde_json::Error> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
    }
}
