//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treestore/treestore.toml`
//! 3. Environment variables: `TREESTORE_*` prefix
//! 4. Command line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, InputFormat};

/// Unified configuration for treestore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Input file used when a command omits `--input`
    pub default_file: Option<PathBuf>,
    /// Default input format
    pub format: InputFormat,
    /// Print the `type` tag next to item ids
    pub show_type: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_file: None,
            format: InputFormat::Auto,
            show_type: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_file: Option<PathBuf>,
    pub format: Option<InputFormat>,
    pub show_type: Option<bool>,
}

/// Get the XDG config directory for treestore.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treestore").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treestore.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Load settings from defaults, the global config file and `TREESTORE_*` variables.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_with_global(global_config_path().as_deref())
    }

    /// Like [`Settings::load`], reading the global layer from `global_path`.
    pub fn load_with_global(global_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = global_path {
            if path.exists() {
                debug!(path = %path.display(), "loading global config");
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_file: overlay
                .default_file
                .clone()
                .or_else(|| self.default_file.clone()),
            format: overlay.format.unwrap_or(self.format),
            show_type: overlay.show_type.unwrap_or(self.show_type),
        }
    }

    fn expand_paths(&mut self) {
        if let Some(file) = &self.default_file {
            let expanded = expand_env_vars(file.to_string_lossy().as_ref());
            self.default_file = Some(PathBuf::from(expanded));
        }
    }

    /// Apply TREESTORE_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("TREESTORE").separator("__"))
            .build()
            .map_err(config_err)?;
        settings.apply_overrides(&config)
    }

    fn apply_overrides(mut self, config: &Config) -> Result<Self, ApplicationError> {
        if let Ok(val) = config.get_string("default_file") {
            self.default_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("format") {
            self.format = val.parse()?;
        }
        if let Ok(val) = config.get_bool("show_type") {
            self.show_type = val;
        }
        Ok(self)
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
