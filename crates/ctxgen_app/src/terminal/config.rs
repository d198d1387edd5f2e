//! Configuration resolution for the terminal client.
//!
//! Sources, highest precedence first: command line, environment, the RON
//! config file, built-in defaults. Empty values count as unset.

use std::fs;
use std::path::{Path, PathBuf};

use ctxgen_logging::ctx_info;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://context-gen-app-980c368d206f.herokuapp.com";
pub const API_URL_ENV: &str = "CONTEXT_GEN_API_URL";
pub const TRACKING_URL_ENV: &str = "CONTEXT_GEN_TRACKING_URL";
pub const CONFIG_FILENAME: &str = "ctxgen.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("{name} is not a usable http(s) URL: {value}")]
    InvalidUrl { name: &'static str, value: String },
}

/// Contents of `ctxgen.ron`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub tracking_endpoint: Option<String>,
    pub log_tracking: bool,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub tracking_endpoint: Option<String>,
    pub log_tracking: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EnvValues {
    pub api_url: Option<String>,
    pub tracking_endpoint: Option<String>,
}

impl EnvValues {
    pub fn from_process() -> Self {
        Self {
            api_url: std::env::var(API_URL_ENV).ok(),
            tracking_endpoint: std::env::var(TRACKING_URL_ENV).ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Service base endpoint without a trailing slash.
    pub api_base: String,
    pub tracking_endpoint: Option<String>,
    pub log_tracking: bool,
}

/// Reads the config file. An explicit `path` must exist; the default
/// `./ctxgen.ron` is optional.
pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILENAME), false),
    };
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(FileConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.clone(),
        message: err.to_string(),
    })?;
    ctx_info!("Loaded config from {:?}", path);
    Ok(config)
}

pub fn resolve(
    cli: &CliOverrides,
    env: &EnvValues,
    file: FileConfig,
) -> Result<ResolvedConfig, ConfigError> {
    let api_url = first_set([
        cli.api_url.as_deref(),
        env.api_url.as_deref(),
        file.api_url.as_deref(),
    ])
    .unwrap_or(DEFAULT_API_URL);
    let api_base = normalize_endpoint("api url", api_url)?;

    let tracking_endpoint = first_set([
        cli.tracking_endpoint.as_deref(),
        env.tracking_endpoint.as_deref(),
        file.tracking_endpoint.as_deref(),
    ])
    .map(|raw| normalize_endpoint("tracking endpoint", raw))
    .transpose()?;

    Ok(ResolvedConfig {
        api_base,
        tracking_endpoint,
        log_tracking: cli.log_tracking || file.log_tracking,
    })
}

fn first_set<const N: usize>(candidates: [Option<&str>; N]) -> Option<&str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
}

fn normalize_endpoint(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = || ConfigError::InvalidUrl {
        name,
        value: raw.to_string(),
    };
    let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}
