//! Domain types for the setup tool.
//!
//! This module contains the core data structures:
//! - SetupStep: One command invocation with its description
//! - StepOutcome: What a step produced
//! - SetupRun: The record of one setup attempt

pub mod run;
pub mod step;

// Re-export commonly used types
pub use run::{RunState, SetupRun};
pub use step::{SetupStep, StepOutcome};
