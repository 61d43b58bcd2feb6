//! Process adapter backed by `tokio::process`.
//!
//! Spawns the command with piped stdout/stderr and waits for it to exit.
//! There is no timeout: pip installs of large wheels can legitimately run
//! for many minutes.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{CommandOutput, CommandRunner};

/// Runs commands as real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create a new process runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    fn name(&self) -> &str {
        "process"
    }

    async fn run(&self, program: &Path, args: &[String]) -> Result<CommandOutput> {
        debug!(program = %program.display(), ?args, "Spawning command");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to run '{}'", program.display()))?;

        Ok(CommandOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_name() {
        assert_eq!(ProcessRunner::new().name(), "process");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_stdout_and_stderr() {
        let runner = ProcessRunner::new();
        let args = vec!["-c".to_string(), "echo out; echo err >&2".to_string()];

        let output = runner.run(Path::new("sh"), &args).await.unwrap();

        assert!(output.success);
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(output.stdout, "out\n");
        assert_eq!(output.stderr, "err\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_is_not_an_error() {
        let runner = ProcessRunner::new();
        let args = vec!["-c".to_string(), "echo broken >&2; exit 3".to_string()];

        let output = runner.run(Path::new("sh"), &args).await.unwrap();

        assert!(!output.success);
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stderr, "broken\n");
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let runner = ProcessRunner::new();
        let result = runner
            .run(Path::new("/nonexistent/qml-setup/pip"), &[])
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/qml-setup/pip"));
    }
}
