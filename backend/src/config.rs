//! Server configuration, read from an optional JSON file.

use linecross_core::geometry::{IntersectOptions, ParallelTest, DEFAULT_TOLERANCE};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::controller::CanvasSize;

/// Path to a JSON config file.
pub const CONFIG_ENV: &str = "LINECROSS_CONFIG";
/// Overrides `bind` from the file.
pub const ADDR_ENV: &str = "LINECROSS_ADDR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid bind address {0:?}")]
    Addr(String),
    #[error("Invalid tolerance {0}: must be finite and non-negative")]
    Tolerance(f64),
    #[error("Invalid parallel_epsilon {0}: must be finite and non-negative")]
    ParallelEpsilon(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Canvas size until the first client resize.
    pub canvas: CanvasSize,
    /// Slack around each segment's bounding box, in canvas units.
    pub tolerance: f64,
    /// When set, near-parallel lines within this determinant are skipped.
    pub parallel_epsilon: Option<f64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            canvas: CanvasSize::default(),
            tolerance: DEFAULT_TOLERANCE,
            parallel_epsilon: None,
        }
    }
}

impl ServerConfig {
    /// Load from `LINECROSS_CONFIG` (if set) and apply `LINECROSS_ADDR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };
        if let Ok(addr) = std::env::var(ADDR_ENV) {
            config.bind = addr.parse().map_err(|_| ConfigError::Addr(addr))?;
        }
        Ok(config)
    }

    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path, source })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        if !config.tolerance.is_finite() || config.tolerance < 0.0 {
            return Err(ConfigError::Tolerance(config.tolerance));
        }
        if let Some(eps) = config.parallel_epsilon {
            if !eps.is_finite() || eps < 0.0 {
                return Err(ConfigError::ParallelEpsilon(eps));
            }
        }
        Ok(config)
    }

    pub fn intersect_options(&self) -> IntersectOptions {
        IntersectOptions {
            tolerance: self.tolerance,
            parallel: match self.parallel_epsilon {
                Some(eps) => ParallelTest::Epsilon(eps),
                None => ParallelTest::Exact,
            },
        }
    }
}
