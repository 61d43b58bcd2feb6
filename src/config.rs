//! Configuration for qml-setup.
//!
//! Configuration sources (highest priority first):
//! 1. CLI flags or their env vars (--venv/QML_SETUP_VENV,
//!    --notebook/QML_SETUP_NOTEBOOK), parsed by clap
//! 2. Config file (.qml-setup/config.yaml)
//! 3. Defaults (.venv, QML_Autoencoder.ipynb)
//!
//! Config file discovery:
//! - Searches current directory and parents for .qml-setup/config.yaml
//! - Paths in config file are relative to the directory containing .qml-setup/

pub mod paths;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use self::paths::{EnvironmentPaths, DEFAULT_VENV_DIR};

/// Notebook the setup instructions point at
pub const DEFAULT_NOTEBOOK: &str = "QML_Autoencoder.ipynb";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    pub notebook: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Virtual environment directory (relative to the project root)
    pub venv: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Virtual environment executables
    pub environment: EnvironmentPaths,
    /// Notebook named in the next-step instructions
    pub notebook: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            environment: EnvironmentPaths::default(),
            notebook: DEFAULT_NOTEBOOK.to_string(),
            config_file: None,
        }
    }
}

/// Values supplied on the command line (or via the matching env vars)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub venv: Option<PathBuf>,
    pub notebook: Option<String>,
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".qml-setup").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Resolve configuration starting the file search at `start`
pub fn resolve_config(start: &Path, overrides: Overrides) -> Result<ResolvedConfig> {
    let config_file = find_config_file(start);

    let (file_venv, file_notebook) = match config_file {
        Some(ref config_path) => {
            let config = load_config_file(config_path)?;

            // Project root is the parent of .qml-setup/
            let base_dir = config_path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(Path::new("."));

            let venv = config
                .paths
                .venv
                .as_deref()
                .map(|venv| resolve_path(base_dir, venv));

            (venv, config.notebook)
        }
        None => (None, None),
    };

    let venv = overrides
        .venv
        .or(file_venv)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_VENV_DIR));

    let notebook = overrides
        .notebook
        .or(file_notebook)
        .unwrap_or_else(|| DEFAULT_NOTEBOOK.to_string());

    Ok(ResolvedConfig {
        environment: EnvironmentPaths::new(venv),
        notebook,
        config_file,
    })
}

/// Load configuration from all sources
pub fn load_config(overrides: Overrides) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    resolve_config(&cwd, overrides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) -> PathBuf {
        let dir = root.join(".qml-setup");
        std::fs::create_dir_all(&dir).unwrap();
        let config_path = dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", body).unwrap();
        config_path
    }

    #[test]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();

        let config = resolve_config(temp.path(), Overrides::default()).unwrap();

        assert_eq!(config.environment, EnvironmentPaths::new(".venv"));
        assert_eq!(config.notebook, "QML_Autoencoder.ipynb");
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            r#"
version: "1.0"
paths:
  venv: envs/qml
notebook: Classifier.ipynb
"#,
        );

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.venv, Some("envs/qml".to_string()));
        assert_eq!(config.notebook, Some("Classifier.ipynb".to_string()));
    }

    #[test]
    fn test_config_file_found_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            r#"
version: "1.0"
paths:
  venv: envs/qml
"#,
        );
        let nested = temp.path().join("notebooks").join("drafts");
        std::fs::create_dir_all(&nested).unwrap();

        let config = resolve_config(&nested, Overrides::default()).unwrap();

        assert_eq!(config.environment.root, temp.path().join("envs/qml"));
        assert_eq!(config.notebook, DEFAULT_NOTEBOOK);
        assert!(config.config_file.is_some());
    }

    #[test]
    fn test_overrides_beat_config_file() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            r#"
version: "1.0"
paths:
  venv: envs/qml
notebook: FromFile.ipynb
"#,
        );

        let overrides = Overrides {
            venv: Some(PathBuf::from("/opt/venvs/qml")),
            notebook: Some("FromEnv.ipynb".to_string()),
        };
        let config = resolve_config(temp.path(), overrides).unwrap();

        assert_eq!(config.environment.root, PathBuf::from("/opt/venvs/qml"));
        assert_eq!(config.notebook, "FromEnv.ipynb");
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "paths: [not, a, map]");

        let result = resolve_config(temp.path(), Overrides::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, ".venv"),
            PathBuf::from("/home/user/project/.venv")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/venv"),
            PathBuf::from("/absolute/venv")
        );
    }
}
