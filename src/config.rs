use crate::mcp::contracts::{DEFAULT_INSTRUCTIONS, DEFAULT_SERVER_NAME, DEFAULT_SERVER_VERSION};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Server settings. Read from an optional JSON file; CLI flags are applied on top.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub server_name: String,
    pub server_version: String,
    pub instructions: String,
    /// Exit on an unparsable request line instead of answering with a parse error.
    pub strict_envelopes: bool,
    /// Answer unknown methods with a method-not-found error instead of `{}`.
    pub reject_unknown_methods: bool,
    /// Seed for quote selection; entropy when unset.
    pub quote_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_version: DEFAULT_SERVER_VERSION.to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            strict_envelopes: false,
            reject_unknown_methods: false,
            quote_seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl ServerConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
