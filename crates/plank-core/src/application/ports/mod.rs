//! Driven ports — what the executor needs from the outside world.
//!
//! `plank-adapters` provides the production implementations; tests use the
//! in-memory and recording variants from the same crate.

use std::collections::BTreeMap;
use std::path::Path;

use super::error::{ExecError, GeneratorError};

/// Filesystem operations against the target directory.
///
/// All content is UTF-8 text. Implemented by
/// `plank_adapters::filesystem::LocalFilesystem` (production) and
/// `plank_adapters::filesystem::MemoryFilesystem` (testing).
pub trait Filesystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String, ExecError>;

    fn write_file(&self, path: &Path, content: &str) -> Result<(), ExecError>;

    /// Append to an existing file; `NotFound` if it does not exist.
    fn append_file(&self, path: &Path, content: &str) -> Result<(), ExecError>;

    fn create_dir_all(&self, path: &Path) -> Result<(), ExecError>;

    /// Recursively copy every file under `source` into `dest`.
    fn copy_dir(&self, source: &Path, dest: &Path) -> Result<(), ExecError>;
}

/// The external code generator collaborator.
///
/// Opaque and framework specific: it produces files in the target directory
/// as a side effect, and its failures are propagated verbatim.
pub trait Generator: Send + Sync {
    fn generate(&self, kind: &str, args: &[String]) -> Result<(), GeneratorError>;
}

/// The external task runner collaborator (schema drops, migrations, …).
///
/// Returns the process exit code; spawning failures are `Io`. A non-zero
/// code is not an error at this layer — the executor decides that.
pub trait TaskRunner: Send + Sync {
    fn run_task(&self, command: &str, env: &BTreeMap<String, String>) -> Result<i32, ExecError>;
}
