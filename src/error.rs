//! Unified error type for Stockroom.
//!
//! Store operations fail with [`CatalogError`]; opening from a config file can
//! also fail with [`ConfigError`]. This module folds both into one type so
//! callers can use `?` across the whole facade.

use stockroom_core::{CatalogError, ErrorKind, Isbn};
use stockroom_engine::ConfigError;
use thiserror::Error;

/// All Stockroom errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A store operation was rejected
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for Stockroom operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The catalog error code, if this is a store failure.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Catalog(e) => Some(e.kind()),
            Error::Config(_) => None,
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only a stock shortfall qualifies: the same purchase may succeed once
    /// copies are restocked.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Catalog(e) if e.is_retryable())
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Catalog(e) if e.is_not_found())
    }

    /// Keys whose stock fell short, for a failed purchase.
    pub fn short_isbns(&self) -> &[Isbn] {
        match self {
            Error::Catalog(CatalogError::InsufficientStock { isbns }) => isbns,
            _ => &[],
        }
    }
}
