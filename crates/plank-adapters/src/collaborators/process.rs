//! Process-spawning collaborator adapters.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument};

use plank_core::application::{
    error::{ExecError, GeneratorError},
    ports::{Generator, TaskRunner},
};

/// Runs the external code generator as a child process.
///
/// Invokes `<program> generate <kind> <args…>` in the target directory and
/// treats any non-zero exit as a generator failure, with stderr forwarded
/// verbatim into the error message.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    program: String,
    workdir: PathBuf,
}

impl CommandGenerator {
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
        }
    }
}

impl Generator for CommandGenerator {
    #[instrument(skip(self), fields(program = %self.program))]
    fn generate(&self, kind: &str, args: &[String]) -> Result<(), GeneratorError> {
        debug!(kind, ?args, "spawning generator");
        let output = Command::new(&self.program)
            .arg("generate")
            .arg(kind)
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| GeneratorError::new(kind, format!("failed to spawn: {e}")))?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(GeneratorError::new(kind, stderr.trim().to_string()))
        }
    }
}

/// Runs task commands through `sh -c` in the target directory.
///
/// The extra environment from the operation is layered on top of the
/// inherited process environment. Returns the child's exit code; the
/// executor decides whether non-zero is fatal.
#[derive(Debug, Clone)]
pub struct ShellTaskRunner {
    /// Task launcher prefix, e.g. `bin/rails` or `make`.
    launcher: String,
    workdir: PathBuf,
}

impl ShellTaskRunner {
    pub fn new(launcher: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            launcher: launcher.into(),
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl TaskRunner for ShellTaskRunner {
    #[instrument(skip(self, env), fields(launcher = %self.launcher))]
    fn run_task(&self, command: &str, env: &BTreeMap<String, String>) -> Result<i32, ExecError> {
        debug!(command, "running task");
        let status = Command::new("sh")
            .arg("-c")
            .arg(format!("{} {}", self.launcher, command))
            .current_dir(&self.workdir)
            .envs(env)
            .status()
            .map_err(|e| ExecError::Io {
                path: self.workdir.clone(),
                reason: format!("failed to spawn task `{command}`: {e}"),
            })?;

        // A killed process has no exit code; report it as failure.
        Ok(status.code().unwrap_or(-1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn task_runner_returns_exit_code() {
        let temp = TempDir::new().unwrap();
        let runner = ShellTaskRunner::new("exit", temp.path());
        assert_eq!(runner.run_task("0", &BTreeMap::new()).unwrap(), 0);
        assert_eq!(runner.run_task("3", &BTreeMap::new()).unwrap(), 3);
    }

    #[test]
    fn task_runner_passes_environment() {
        let temp = TempDir::new().unwrap();
        // `test` exits 0 only when the variable is set to the expected value.
        let runner = ShellTaskRunner::new("test", temp.path());
        let env: BTreeMap<String, String> =
            [("PROBE".to_string(), "yes".to_string())].into_iter().collect();
        assert_eq!(runner.run_task("\"$PROBE\" = yes", &env).unwrap(), 0);
        assert_ne!(
            runner.run_task("\"$PROBE\" = yes", &BTreeMap::new()).unwrap(),
            0
        );
    }

    #[test]
    fn generator_spawn_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let gen = CommandGenerator::new("definitely-not-a-real-program-xyz", temp.path());
        let err = gen.generate("model", &["post".into()]).unwrap_err();
        assert_eq!(err.kind, "model");
        assert!(err.message.contains("failed to spawn"));
    }
}
