//! Core setup logic.
//!
//! This module contains:
//! - Plan: The fixed, ordered list of setup steps
//! - Bootstrapper: Precondition check and step execution
//! - Error: The two ways setup can fail

pub mod bootstrap;
pub mod error;
pub mod plan;

// Re-export commonly used types
pub use bootstrap::Bootstrapper;
pub use error::SetupError;
pub use plan::{SetupPlan, KERNEL_DISPLAY_NAME, KERNEL_NAME, PACKAGES};
