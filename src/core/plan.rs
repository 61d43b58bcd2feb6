//! The fixed setup plan.
//!
//! Three steps, always in this order: upgrade pip, install the project
//! dependencies, register the Jupyter kernel.

use crate::config::paths::EnvironmentPaths;
use crate::domain::SetupStep;

/// Packages installed into the environment, in install order
pub const PACKAGES: [&str; 7] = [
    "ipykernel",
    "jupyter",
    "torch",
    "torchvision",
    "numpy",
    "pennylane",
    "medmnist",
];

/// Internal kernel name (`jupyter kernelspec list`)
pub const KERNEL_NAME: &str = "qml-project";

/// Kernel name shown in notebook kernel pickers
pub const KERNEL_DISPLAY_NAME: &str = "Python (QML Project)";

/// Ordered list of setup steps for one environment
#[derive(Debug, Clone)]
pub struct SetupPlan {
    steps: Vec<SetupStep>,
}

impl SetupPlan {
    /// Build the standard plan for an environment
    pub fn for_environment(env: &EnvironmentPaths) -> Self {
        let upgrade = SetupStep::new(
            &env.pip,
            ["install", "--upgrade", "pip"],
            "Step 1: Upgrading pip",
        );

        let install = SetupStep::new(
            &env.pip,
            std::iter::once("install").chain(PACKAGES),
            format!("Step 2: Installing packages: {}", PACKAGES.join(", ")),
        );

        let register = SetupStep::new(
            &env.python,
            [
                "-m".to_string(),
                "ipykernel".to_string(),
                "install".to_string(),
                "--user".to_string(),
                format!("--name={}", KERNEL_NAME),
                format!("--display-name={}", KERNEL_DISPLAY_NAME),
            ],
            "Step 3: Registering Jupyter kernel",
        );

        Self {
            steps: vec![upgrade, install, register],
        }
    }

    /// Steps in execution order
    pub fn steps(&self) -> &[SetupStep] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the plan has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
