//! Command-line interface for qml-setup.
//!
//! With no subcommand the full setup runs. `plan` and `config` only
//! inspect what setup would do.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::paths::{display_relative, kernel_spec_dir};
use crate::config::{self, Overrides, ResolvedConfig};
use crate::core::{Bootstrapper, SetupPlan, KERNEL_DISPLAY_NAME, KERNEL_NAME};

/// qml-setup - Prepare the QML project's virtual environment and Jupyter kernel
#[derive(Parser, Debug)]
#[command(name = "qml-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print the run record as JSON on stdout (transcript moves to stderr)
    #[arg(long, global = true)]
    pub json: bool,

    /// Virtual environment directory [default: .venv]
    #[arg(long, env = "QML_SETUP_VENV", global = true)]
    pub venv: Option<PathBuf>,

    /// Notebook named in the next-step instructions [default: QML_Autoencoder.ipynb]
    #[arg(long, env = "QML_SETUP_NOTEBOOK", global = true)]
    pub notebook: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upgrade pip, install dependencies and register the kernel (default)
    Run,

    /// Show the commands setup would run, without running them
    Plan,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// Returns `Ok(false)` when setup ran but failed; the caller maps that
    /// to exit code 1.
    pub async fn execute(self) -> Result<bool> {
        let config = config::load_config(self.overrides())?;

        match self.command.unwrap_or(Commands::Run) {
            Commands::Run => run_setup(&config, self.json).await,
            Commands::Plan => show_plan(&config, self.json).map(|_| true),
            Commands::Config => show_config(&config, self.json).map(|_| true),
        }
    }

    /// Flag/env values that take precedence over the config file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            venv: self.venv.clone(),
            notebook: self.notebook.clone(),
        }
    }
}

async fn run_setup(config: &ResolvedConfig, json: bool) -> Result<bool> {
    let mut bootstrapper = Bootstrapper::new(config.environment.clone(), config.notebook.clone());
    if json {
        bootstrapper = bootstrapper.with_transcript(std::io::stderr());
    }

    let run = bootstrapper.run().await;

    if json {
        let rendered =
            serde_json::to_string_pretty(&run).context("Failed to serialize setup run")?;
        println!("{}", rendered);
    }

    Ok(run.succeeded())
}

fn show_plan(config: &ResolvedConfig, json: bool) -> Result<()> {
    let plan = SetupPlan::for_environment(&config.environment);

    if json {
        let rendered =
            serde_json::to_string_pretty(plan.steps()).context("Failed to serialize plan")?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Setup plan ({} steps):", plan.len());
    for step in plan.steps() {
        println!();
        println!("  {}", step.description);
        println!("    $ {}", step.command_line());
    }

    if !config.environment.python_exists() {
        println!();
        println!(
            "Note: {} does not exist yet; create it with `python3 -m venv {}`",
            config.environment.python.display(),
            config.environment.root.display()
        );
    }

    Ok(())
}

fn show_config(config: &ResolvedConfig, json: bool) -> Result<()> {
    let kernel_dir = kernel_spec_dir(KERNEL_NAME);

    if json {
        let value = serde_json::json!({
            "venv": config.environment.root,
            "python": config.environment.python,
            "pip": config.environment.pip,
            "python_exists": config.environment.python_exists(),
            "notebook": config.notebook,
            "config_file": config.config_file,
            "kernel_name": KERNEL_NAME,
            "kernel_display_name": KERNEL_DISPLAY_NAME,
            "kernel_spec_dir": kernel_dir,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    println!("qml-setup configuration:");
    println!();
    match &config.config_file {
        Some(path) => println!("  Config file: {}", path.display()),
        None => println!("  Config file: (none, using defaults)"),
    }
    println!(
        "  Environment: {}",
        display_relative(&config.environment.root, &cwd)
    );
    println!(
        "  Interpreter: {}{}",
        display_relative(&config.environment.python, &cwd),
        if config.environment.python_exists() {
            ""
        } else {
            " (missing)"
        }
    );
    println!(
        "  Installer:   {}",
        display_relative(&config.environment.pip, &cwd)
    );
    println!("  Notebook:    {}", config.notebook);
    println!();
    println!("  Kernel:      {} ({})", KERNEL_NAME, KERNEL_DISPLAY_NAME);
    match kernel_dir {
        Some(dir) => println!("  Kernel spec: {}", dir.display()),
        None => println!("  Kernel spec: (unknown data directory)"),
    }

    Ok(())
}
