// Configuration loading and parsing (careerline.toml).

use careerline_core::navigator::{NavSettings, BOTTOM_TOLERANCE, BUFFER_TOP, VIEW_BUFFER};
use careerline_core::normalize::NormalizeOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Config file name inside `config/` (and `defaults/`).
pub const CONFIG_FILE: &str = "careerline.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// careerline.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataPaths,
    #[serde(default)]
    pub normalize: NormalizeOptions,
    #[serde(default)]
    pub navigator: NavigatorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input files, relative to the working directory. `.csv` and `.json` are
/// supported.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub hitters: String,
    pub pitchers: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Element id of the navigation panel.
    pub nav_id: String,
    pub buffer_top: f64,
    pub view_buffer: f64,
    pub bottom_tolerance: f64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        NavigatorConfig {
            nav_id: "nav".into(),
            buffer_top: BUFFER_TOP,
            view_buffer: VIEW_BUFFER,
            bottom_tolerance: BOTTOM_TOLERANCE,
        }
    }
}

impl NavigatorConfig {
    pub fn settings(&self) -> NavSettings {
        NavSettings {
            buffer_top: self.buffer_top,
            view_buffer: self.view_buffer,
            bottom_tolerance: self.bottom_tolerance,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Where to write the processed JSON. Stdout when omitted.
    #[serde(default)]
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/careerline.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config)?;

    Ok(config)
}

fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

/// Seed `config/careerline.toml` from `defaults/` on first run. Returns the
/// path written, or `None` when a config file is already in place.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let copy_error = |action: &str, path: &Path, e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("failed to {action} {}: {e}", path.display()),
    };

    let content = std::fs::read(&source).map_err(|e| copy_error("read", &source, e))?;
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| copy_error("create", dir, e))?;
    }
    std::fs::write(&target, content).map_err(|e| copy_error("write", &target, e))?;

    info!("Created {} from defaults", target.display());
    Ok(Some(target))
}

/// Load config relative to the current working directory, seeding it from
/// defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let paths: &[(&str, &str)] = &[
        ("data.hitters", config.data.hitters.as_str()),
        ("data.pitchers", config.data.pitchers.as_str()),
    ];
    for (field, value) in paths {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    let nav = &config.navigator;
    if nav.nav_id.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "navigator.nav_id".into(),
            message: "must not be empty".into(),
        });
    }

    let distances: &[(&str, f64)] = &[
        ("navigator.buffer_top", nav.buffer_top),
        ("navigator.view_buffer", nav.view_buffer),
        ("navigator.bottom_tolerance", nav.bottom_tolerance),
    ];
    for (field, value) in distances {
        if !value.is_finite() || *value < 0.0 {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: format!("must be a finite value >= 0, got {value}"),
            });
        }
    }

    if let Some(path) = &config.output.path {
        if path.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "output.path".into(),
                message: "must not be empty when set".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
