//! Environment bootstrapper.
//!
//! Checks that the virtual environment exists, then runs the setup plan
//! one step at a time. The first failing step ends the run; later steps
//! are never attempted.

use std::io::Write;
use std::sync::Mutex;
use std::time::Instant;

use tracing::{error, info, instrument, warn};

use crate::adapters::{CommandRunner, ProcessRunner};
use crate::config::paths::EnvironmentPaths;
use crate::domain::{SetupRun, SetupStep, StepOutcome};

use super::error::SetupError;
use super::plan::{SetupPlan, KERNEL_DISPLAY_NAME};

/// Width of the `=` rules framing each section of the transcript
const RULE_WIDTH: usize = 60;

/// Destination of the console transcript
type Transcript = Mutex<Box<dyn Write + Send>>;

/// Runs the setup plan against one environment
pub struct Bootstrapper<R = ProcessRunner> {
    environment: EnvironmentPaths,
    plan: SetupPlan,
    runner: R,
    notebook: String,
    transcript: Transcript,
}

impl Bootstrapper<ProcessRunner> {
    /// Create a bootstrapper that spawns real processes
    pub fn new(environment: EnvironmentPaths, notebook: impl Into<String>) -> Self {
        Self::with_runner(environment, notebook, ProcessRunner::new())
    }
}

impl<R: CommandRunner> Bootstrapper<R> {
    /// Create a bootstrapper with a custom command runner
    pub fn with_runner(
        environment: EnvironmentPaths,
        notebook: impl Into<String>,
        runner: R,
    ) -> Self {
        let plan = SetupPlan::for_environment(&environment);
        Self {
            environment,
            plan,
            runner,
            notebook: notebook.into(),
            transcript: Mutex::new(Box::new(std::io::stdout())),
        }
    }

    /// Write the console transcript somewhere other than stdout
    pub fn with_transcript(mut self, writer: impl Write + Send + 'static) -> Self {
        self.transcript = Mutex::new(Box::new(writer));
        self
    }

    /// Suppress the console transcript (outcomes are still recorded)
    pub fn quiet(self) -> Self {
        self.with_transcript(std::io::sink())
    }

    /// The plan this bootstrapper executes
    pub fn plan(&self) -> &SetupPlan {
        &self.plan
    }

    /// The underlying command runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the whole setup sequence
    #[instrument(skip(self), fields(venv = %self.environment.root.display()))]
    pub async fn run(&self) -> SetupRun {
        let mut run = SetupRun::new();
        info!(run_id = %run.id, runner = self.runner.name(), "Starting environment setup");

        match self.execute(&mut run).await {
            Ok(()) => {
                run.complete();
                info!(
                    run_id = %run.id,
                    steps = run.invocations(),
                    "Environment setup completed"
                );
                self.print_success();
            }
            Err(e) => {
                error!(run_id = %run.id, error = %e, "Environment setup failed");
                run.fail(e.to_string());
            }
        }

        run
    }

    /// Precondition check, then each step in order
    async fn execute(&self, run: &mut SetupRun) -> Result<(), SetupError> {
        self.say("QML Project Kernel Setup");
        self.say("=".repeat(RULE_WIDTH));

        self.check_environment()?;

        for step in self.plan.steps() {
            let outcome = self.run_step(step).await;
            let failure = (!outcome.success).then(|| SetupError::CommandFailed {
                description: outcome.description.clone(),
                exit_code: outcome.exit_code,
                stderr: outcome.stderr.trim().to_string(),
            });
            run.record(outcome);

            if let Some(err) = failure {
                return Err(err);
            }
        }

        Ok(())
    }

    /// Fail unless the environment's interpreter exists
    fn check_environment(&self) -> Result<(), SetupError> {
        if self.environment.python_exists() {
            return Ok(());
        }

        let python = self.environment.python.clone();
        self.say(format!(
            "Error: Virtual environment not found at {}",
            python.display()
        ));
        self.say("Please create a virtual environment first:");
        self.say(format!(
            "  python3 -m venv {}",
            self.environment.root.display()
        ));

        Err(SetupError::EnvironmentMissing { python })
    }

    /// Run one step, print its output and record the outcome
    async fn run_step(&self, step: &SetupStep) -> StepOutcome {
        self.say("");
        self.say("=".repeat(RULE_WIDTH));
        self.say(&step.description);
        self.say("=".repeat(RULE_WIDTH));

        info!(step = %step.description, command = %step.command_line(), "Running step");
        let start = Instant::now();
        let result = self.runner.run(&step.program, &step.args).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(output) => {
                let outcome = StepOutcome::from_output(step, output, duration_ms);
                if outcome.success {
                    self.say(&outcome.stdout);
                    if outcome.has_warnings() {
                        warn!(step = %step.description, "Step wrote to stderr");
                        self.say(format!("Warnings: {}", outcome.stderr));
                    }
                    info!(step = %step.description, duration_ms, "Step completed");
                } else {
                    self.report_failure(&outcome.failure_summary(), &outcome);
                }
                outcome
            }
            Err(e) => {
                let outcome = StepOutcome::spawn_failed(step, format!("{:#}", e), duration_ms);
                self.report_failure(&format!("{:#}", e), &outcome);
                outcome
            }
        }
    }

    fn report_failure(&self, failure: &str, outcome: &StepOutcome) {
        error!(step = %outcome.description, exit_code = ?outcome.exit_code, "Step failed");
        self.say(format!("Error: {}", failure));
        self.say(format!("Output: {}", outcome.stdout));
        self.say(format!("Error: {}", outcome.stderr));
    }

    fn print_success(&self) {
        self.say("");
        self.say("=".repeat(RULE_WIDTH));
        self.say("✅ Setup complete!");
        self.say("=".repeat(RULE_WIDTH));
        self.say("");
        self.say("Next steps:");
        self.say(format!("1. In VS Code, open {}", self.notebook));
        self.say("2. Click the kernel selector in the top right");
        self.say(format!("3. Select '{}' from the list", KERNEL_DISPLAY_NAME));
        self.say("4. Run your notebook!");
    }

    fn say(&self, line: impl AsRef<str>) {
        // A broken transcript must not abort setup
        if let Ok(mut out) = self.transcript.lock() {
            let _ = writeln!(out, "{}", line.as_ref());
            let _ = out.flush();
        }
    }
}
