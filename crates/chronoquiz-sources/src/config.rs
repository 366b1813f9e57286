//! Source configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use chronoquiz_core::loader::RetryPolicy;
use chronoquiz_core::traits::EventSource;

use crate::file::FileSource;
use crate::http::HttpSource;

/// Name given to the source created from `CHRONOQUIZ_URL`.
pub const ENV_SOURCE_NAME: &str = "remote";

/// Configuration for a single event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Http {
        url: String,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
    File {
        path: PathBuf,
    },
}

/// Top-level chronoquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChronoquizConfig {
    /// Source configurations keyed by name.
    #[serde(default)]
    pub sources: HashMap<String, SourceConfig>,
    /// Source used when none is named on the command line.
    #[serde(default = "default_source")]
    pub default_source: String,
    /// Total fetch attempts before giving up.
    #[serde(default = "default_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry in milliseconds; doubles each retry.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Questions per session when not given on the command line.
    #[serde(default = "chronoquiz_core::model::default_length")]
    pub default_length: usize,
}

fn default_source() -> String {
    ENV_SOURCE_NAME.to_string()
}
fn default_attempts() -> u32 {
    3
}
fn default_retry_delay() -> u64 {
    1000
}

impl Default for ChronoquizConfig {
    fn default() -> Self {
        Self {
            sources: HashMap::new(),
            default_source: default_source(),
            max_attempts: default_attempts(),
            retry_delay_ms: default_retry_delay(),
            default_length: chronoquiz_core::model::default_length(),
        }
    }
}

impl ChronoquizConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.retry_delay_ms),
        )
    }

    /// Look up a source by name, or the default source.
    pub fn source(&self, name: Option<&str>) -> Result<&SourceConfig> {
        let name = name.unwrap_or(&self.default_source);
        self.sources.get(name).with_context(|| {
            let mut available: Vec<&String> = self.sources.keys().collect();
            available.sort();
            format!(
                "source '{name}' not found in config. Available: {available:?}. \
                 Run `chronoquiz init` or set CHRONOQUIZ_URL."
            )
        })
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Http { url, timeout_secs } => SourceConfig::Http {
            url: resolve_env_vars(url),
            timeout_secs: *timeout_secs,
        },
        SourceConfig::File { path } => SourceConfig::File {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `chronoquiz.toml` in the current directory
/// 2. `~/.config/chronoquiz/config.toml`
///
/// Environment variable override: `CHRONOQUIZ_URL`.
pub fn load_config() -> Result<ChronoquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ChronoquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("chronoquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => ChronoquizConfig::default(),
    };

    if let Ok(url) = std::env::var("CHRONOQUIZ_URL") {
        let timeout_secs = match config.sources.get(ENV_SOURCE_NAME) {
            Some(SourceConfig::Http { timeout_secs, .. }) => *timeout_secs,
            _ => None,
        };
        config.sources.insert(
            ENV_SOURCE_NAME.into(),
            SourceConfig::Http { url, timeout_secs },
        );
    }

    config.sources = config
        .sources
        .iter()
        .map(|(k, v)| (k.clone(), resolve_source_config(v)))
        .collect();

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<ChronoquizConfig> {
    let config: ChronoquizConfig = toml::from_str(content)?;
    anyhow::ensure!(config.max_attempts >= 1, "max_attempts must be at least 1");
    anyhow::ensure!(config.default_length >= 1, "default_length must be at least 1");
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("chronoquiz"))
}

/// Create a source instance from its configuration.
pub fn create_source(config: &SourceConfig) -> Box<dyn EventSource> {
    match config {
        SourceConfig::Http { url, timeout_secs } => Box::new(HttpSource::new(url, *timeout_secs)),
        SourceConfig::File { path } => Box::new(FileSource::new(path)),
    }
}
