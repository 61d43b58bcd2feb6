//! qml-setup - Environment bootstrapper for the QML project
//!
//! Prepares the project's virtual environment for notebook work:
//! upgrades pip, installs the fixed dependency set and registers the
//! `qml-project` Jupyter kernel.
//!
//! # Architecture
//!
//! Setup is a strictly ordered list of steps:
//! - The environment interpreter must exist before anything runs
//! - Each step runs one external command and captures its output
//! - The first failing step aborts the remaining ones
//!
//! # Modules
//!
//! - `adapters`: External process execution (`CommandRunner`)
//! - `core`: Setup plan, bootstrapper and errors
//! - `domain`: Data structures (SetupStep, StepOutcome, SetupRun)
//! - `config`: Environment directory and notebook resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Run the full setup
//! qml-setup
//!
//! # Show the commands without running them
//! qml-setup plan
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{CommandOutput, CommandRunner, ProcessRunner};
pub use crate::core::{Bootstrapper, SetupError, SetupPlan};
pub use domain::{RunState, SetupRun, SetupStep, StepOutcome};
