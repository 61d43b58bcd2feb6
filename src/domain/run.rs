//! Setup run state.
//!
//! A SetupRun is the record of one attempt to bootstrap the environment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::step::StepOutcome;

/// One setup attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupRun {
    /// Unique identifier for this run
    pub id: Uuid,

    /// Current state of the run
    pub state: RunState,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished (if applicable)
    pub completed_at: Option<DateTime<Utc>>,

    /// Outcomes of the steps that were attempted, in order
    pub outcomes: Vec<StepOutcome>,
}

impl Default for SetupRun {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupRun {
    /// Start a new run
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: RunState::Running,
            started_at: Utc::now(),
            completed_at: None,
            outcomes: Vec::new(),
        }
    }

    /// Record the outcome of an attempted step
    pub fn record(&mut self, outcome: StepOutcome) {
        self.outcomes.push(outcome);
    }

    /// Mark the run as completed
    pub fn complete(&mut self) {
        self.state = RunState::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Mark the run as failed
    pub fn fail(&mut self, error: impl Into<String>) {
        self.state = RunState::Failed {
            error: error.into(),
        };
        self.completed_at = Some(Utc::now());
    }

    /// True only when every step ran and succeeded
    pub fn succeeded(&self) -> bool {
        matches!(self.state, RunState::Completed)
    }

    /// Number of external commands that were invoked
    pub fn invocations(&self) -> usize {
        self.outcomes.len()
    }

    /// Total run duration in milliseconds (if complete)
    pub fn duration_ms(&self) -> Option<i64> {
        self.completed_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }
}

/// State of a setup run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunState {
    /// Steps are still executing
    Running,

    /// All steps succeeded
    Completed,

    /// A step (or the precondition) failed
    Failed { error: String },
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Running => write!(f, "running"),
            RunState::Completed => write!(f, "completed"),
            RunState::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}
