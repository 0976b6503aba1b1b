//! Configuration loading from files and environment
//!
//! All operations return new instances rather than mutating in place.

use std::path::{Path, PathBuf};

use super::types::{Config, PartialConfig};
use crate::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources with hierarchy
///
/// # Errors
///
/// Returns error if:
/// - A config file is malformed TOML
/// - An environment override does not parse
/// - Config values fail validation
pub fn load_config() -> Result<Config> {
    let project = project_config_path()?;
    load_config_from(global_config_path().as_deref(), &project, |key| {
        std::env::var(key).ok()
    })
}

/// Load configuration from explicit paths and an environment lookup.
///
/// Missing files are skipped.
///
/// # Errors
///
/// Same as [`load_config`].
pub fn load_config_from<F>(global: Option<&Path>, project: &Path, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    // 1. Start with built-in defaults
    let config = Config::default();

    // 2. Global config if it exists
    let config = match global.filter(|path| path.exists()) {
        Some(path) => config.merged(load_toml_file(path)?),
        None => config,
    };

    // 3. Project config overrides global
    let config = if project.exists() {
        config.merged(load_toml_file(project)?)
    } else {
        config
    };

    // 4. Environment variable overrides
    let config = config.apply_env_with(env)?;

    // 5. Validate
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════
// PATH HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "formloom")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
pub fn project_config_path() -> Result<PathBuf> {
    std::env::current_dir()
        .map(|dir| dir.join(".formloom").join("config.toml"))
        .map_err(|e| Error::io_error(format!("Failed to get current directory: {e}")))
}

/// Load one TOML file as a partial layer
///
/// # Errors
///
/// Returns error if:
/// - Path is a directory instead of a file
/// - File cannot be read
/// - TOML is malformed
pub fn load_toml_file(path: &Path) -> Result<PartialConfig> {
    if path.is_dir() {
        return Err(Error::io_error(format!(
            "Config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::io_error(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::parse_error(format!(
            "Failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES
// ═══════════════════════════════════════════════════════════════════════════

impl Config {
    /// Apply `FORMLOOM_*` overrides read through `env`.
    ///
    /// # Errors
    ///
    /// Returns error if a value does not parse
    pub fn apply_env_with<F>(mut self, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = env("FORMLOOM_SPAM_THRESHOLD") {
            self.spam.threshold = parse_env("FORMLOOM_SPAM_THRESHOLD", &value)?;
        }

        if let Some(value) = env("FORMLOOM_URL_LIMIT") {
            self.spam.url_limit = parse_env("FORMLOOM_URL_LIMIT", &value)?;
        }

        // Empty or "none" lifts the cap
        if let Some(value) = env("FORMLOOM_HISTORY_LIMIT") {
            let value = value.trim();
            self.history.limit = if value.is_empty() || value.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(parse_env("FORMLOOM_HISTORY_LIMIT", value)?)
            };
        }

        if let Some(value) = env("FORMLOOM_MAX_FIELDS") {
            self.forms.max_fields = parse_env("FORMLOOM_MAX_FIELDS", &value)?;
        }

        Ok(self)
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::invalid_config(format!("Invalid {key} value '{value}': {e}")))
}
