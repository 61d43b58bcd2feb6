//! Canonical paths inside the virtual environment.
//!
//! Single source of truth - import this instead of hardcoding
//! `.venv/bin/python` style paths.
//!
//! ## Layout
//!
//! | Platform | Interpreter | Installer |
//! |----------|-------------|-----------|
//! | Unix | `<venv>/bin/python` | `<venv>/bin/pip` |
//! | Windows | `<venv>\Scripts\python.exe` | `<venv>\Scripts\pip.exe` |

use std::path::{Path, PathBuf};

/// Default virtual environment directory, relative to the working directory
pub const DEFAULT_VENV_DIR: &str = ".venv";

/// Directory holding the environment's executables
#[cfg(windows)]
pub const BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
pub const BIN_DIR: &str = "bin";

/// Interpreter executable name
#[cfg(windows)]
pub const PYTHON_EXE: &str = "python.exe";
#[cfg(not(windows))]
pub const PYTHON_EXE: &str = "python";

/// Package installer executable name
#[cfg(windows)]
pub const PIP_EXE: &str = "pip.exe";
#[cfg(not(windows))]
pub const PIP_EXE: &str = "pip";

/// Resolved executable paths for one virtual environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentPaths {
    /// The environment directory itself
    pub root: PathBuf,

    /// The environment's interpreter
    pub python: PathBuf,

    /// The environment's package installer
    pub pip: PathBuf,
}

impl EnvironmentPaths {
    /// Derive interpreter and installer paths from an environment directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let bin = root.join(BIN_DIR);
        Self {
            python: bin.join(PYTHON_EXE),
            pip: bin.join(PIP_EXE),
            root,
        }
    }

    /// Whether the interpreter exists on disk
    pub fn python_exists(&self) -> bool {
        self.python.exists()
    }
}

impl Default for EnvironmentPaths {
    fn default() -> Self {
        Self::new(DEFAULT_VENV_DIR)
    }
}

/// Directory where Jupyter stores a user-level kernel spec.
///
/// Mirrors `jupyter --data-dir`: `~/.local/share/jupyter` on Linux,
/// `~/Library/Jupyter` on macOS, `%APPDATA%\jupyter` on Windows.
pub fn kernel_spec_dir(kernel_name: &str) -> Option<PathBuf> {
    jupyter_data_dir().map(|dir| dir.join("kernels").join(kernel_name))
}

#[cfg(target_os = "macos")]
fn jupyter_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library").join("Jupyter"))
}

#[cfg(not(target_os = "macos"))]
fn jupyter_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("jupyter"))
}

/// Display helper: show a path relative to `base` when possible
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}
