//! Setup failures.
//!
//! Both kinds are terminal: the sequence stops and the process exits 1.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SetupError {
    #[error("Virtual environment not found at {}", .python.display())]
    EnvironmentMissing { python: PathBuf },

    #[error("{description} failed: {stderr}")]
    CommandFailed {
        description: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}
