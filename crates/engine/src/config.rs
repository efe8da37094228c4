//! Store configuration
//!
//! Selects the locking strategy and, optionally, a fixed seed for editor-pick
//! sampling. Configuration can be built in code or loaded from TOML:
//!
//! ```toml
//! locking = "two_level"   # or "single_lock"
//! sampling_seed = 42      # optional
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Locking strategy of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockingMode {
    /// One store-wide read/write lock; every mutation is exclusive
    SingleLock,
    /// Structural lock plus per-key locks
    #[default]
    TwoLevel,
}

impl LockingMode {
    /// Name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            LockingMode::SingleLock => "single_lock",
            LockingMode::TwoLevel => "two_level",
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Store configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Locking strategy
    pub locking: LockingMode,
    /// Fixed seed for editor-pick sampling; entropy when unset
    pub sampling_seed: Option<u64>,
}

impl StoreConfig {
    /// Two-level locking, unseeded sampling
    pub fn two_level() -> Self {
        Self {
            locking: LockingMode::TwoLevel,
            ..Default::default()
        }
    }

    /// Single store-wide lock, unseeded sampling
    pub fn single_lock() -> Self {
        Self {
            locking: LockingMode::SingleLock,
            ..Default::default()
        }
    }

    /// Use a fixed sampling seed
    pub fn with_sampling_seed(mut self, seed: u64) -> Self {
        self.sampling_seed = Some(seed);
        self
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
