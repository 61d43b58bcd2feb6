//! Adapter interfaces for external processes.
//!
//! Setup steps never talk to pip or the interpreter directly; they go
//! through a `CommandRunner` so the execution backend can be swapped.

pub mod process;

use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

// Re-export the process adapter
pub use process::ProcessRunner;

/// Captured result of one external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status zero
    pub success: bool,

    /// Exit code (None when terminated by a signal)
    pub exit_code: Option<i32>,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// A successful output with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given exit code and stderr
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Attach stderr to an output
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }
}

/// Trait for running external commands to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Human-readable runner name
    fn name(&self) -> &str;

    /// Run `program` with `args`, wait for it and capture its output.
    ///
    /// A non-zero exit is reported through `CommandOutput::success`;
    /// `Err` is reserved for processes that could not be started at all.
    async fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput>;
}
