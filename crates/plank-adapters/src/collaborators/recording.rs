//! Recording collaborator doubles for tests and dry runs.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use plank_core::application::{
    error::{ExecError, GeneratorError},
    ports::{Generator, TaskRunner},
};

/// A generator call captured by [`RecordingGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCall {
    pub kind: String,
    pub args: Vec<String>,
}

/// Generator double that records every call instead of spawning anything.
///
/// Clones share the call log. Optionally configured to fail on a specific
/// generator kind, for failure-path tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingGenerator {
    calls: Arc<Mutex<Vec<GeneratorCall>>>,
    fail_on: Arc<Mutex<Option<String>>>,
}

impl RecordingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent calls with this `kind` fail.
    pub fn fail_on(&self, kind: impl Into<String>) {
        *self.fail_on.lock().unwrap() = Some(kind.into());
    }

    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Generator for RecordingGenerator {
    fn generate(&self, kind: &str, args: &[String]) -> Result<(), GeneratorError> {
        self.calls.lock().unwrap().push(GeneratorCall {
            kind: kind.to_string(),
            args: args.to_vec(),
        });
        if self.fail_on.lock().unwrap().as_deref() == Some(kind) {
            return Err(GeneratorError::new(kind, "simulated generator failure"));
        }
        Ok(())
    }
}

/// A task invocation captured by [`RecordingTaskRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCall {
    pub command: String,
    pub env: BTreeMap<String, String>,
}

/// Task-runner double that records commands and returns a scripted exit code.
#[derive(Debug, Clone, Default)]
pub struct RecordingTaskRunner {
    calls: Arc<Mutex<Vec<TaskCall>>>,
    exit_codes: Arc<Mutex<BTreeMap<String, i32>>>,
}

impl RecordingTaskRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a non-zero exit code for a specific command.
    pub fn exit_with(&self, command: impl Into<String>, code: i32) {
        self.exit_codes.lock().unwrap().insert(command.into(), code);
    }

    pub fn calls(&self) -> Vec<TaskCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl TaskRunner for RecordingTaskRunner {
    fn run_task(&self, command: &str, env: &BTreeMap<String, String>) -> Result<i32, ExecError> {
        self.calls.lock().unwrap().push(TaskCall {
            command: command.to_string(),
            env: env.clone(),
        });
        Ok(self
            .exit_codes
            .lock()
            .unwrap()
            .get(command)
            .copied()
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_records_calls_in_order() {
        let gen = RecordingGenerator::new();
        gen.generate("model", &["post".into(), "title:string".into()])
            .unwrap();
        gen.generate("admin:install", &[]).unwrap();

        let calls = gen.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].kind, "model");
        assert_eq!(calls[1].kind, "admin:install");
    }

    #[test]
    fn generator_fail_on_matches_kind() {
        let gen = RecordingGenerator::new();
        gen.fail_on("admin:install");
        assert!(gen.generate("model", &[]).is_ok());
        assert!(gen.generate("admin:install", &[]).is_err());
    }

    #[test]
    fn task_runner_scripts_exit_codes() {
        let tasks = RecordingTaskRunner::new();
        tasks.exit_with("db:migrate", 1);
        assert_eq!(tasks.run_task("db:create", &BTreeMap::new()).unwrap(), 0);
        assert_eq!(tasks.run_task("db:migrate", &BTreeMap::new()).unwrap(), 1);
        assert_eq!(tasks.calls().len(), 2);
    }
}
