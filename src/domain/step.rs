//! Setup steps and their outcomes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::adapters::CommandOutput;

/// A single command invocation in the setup sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupStep {
    /// Executable to run
    pub program: PathBuf,

    /// Arguments passed to the executable
    pub args: Vec<String>,

    /// Header printed before the step runs
    pub description: String,
}

impl SetupStep {
    /// Create a new step
    pub fn new(
        program: impl Into<PathBuf>,
        args: impl IntoIterator<Item = impl Into<String>>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }

    /// Render the step as a shell-like command line (display only)
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|arg| {
            if arg.contains(char::is_whitespace) {
                format!("\"{}\"", arg)
            } else {
                arg.clone()
            }
        }));
        parts.join(" ")
    }
}

/// Result of executing a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Description of the step that ran
    pub description: String,

    /// Command line that was executed
    pub command: String,

    /// Whether the command exited successfully
    pub success: bool,

    /// Exit code, if the process produced one
    pub exit_code: Option<i32>,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,

    /// Wall-clock time spent in the command
    pub duration_ms: u64,
}

impl StepOutcome {
    /// Build an outcome from a finished command
    pub fn from_output(step: &SetupStep, output: CommandOutput, duration_ms: u64) -> Self {
        Self {
            description: step.description.clone(),
            command: step.command_line(),
            success: output.success,
            exit_code: output.exit_code,
            stdout: output.stdout,
            stderr: output.stderr,
            duration_ms,
        }
    }

    /// Build an outcome for a command that could not be started
    pub fn spawn_failed(step: &SetupStep, error: String, duration_ms: u64) -> Self {
        Self {
            description: step.description.clone(),
            command: step.command_line(),
            success: false,
            exit_code: None,
            stdout: String::new(),
            stderr: error,
            duration_ms,
        }
    }

    /// True when the step succeeded but wrote to stderr
    pub fn has_warnings(&self) -> bool {
        self.success && !self.stderr.is_empty()
    }

    /// One-line summary of a failed exit
    pub fn failure_summary(&self) -> String {
        match self.exit_code {
            Some(code) => format!(
                "Command '{}' returned non-zero exit status {}.",
                self.command, code
            ),
            None => format!("Command '{}' terminated without an exit code.", self.command),
        }
    }
}
