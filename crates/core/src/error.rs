//! Error types for catalog operations
//!
//! Every public operation returns a single [`CatalogError`] for the whole
//! batch. Errors are never reported per item.
//!
//! ## Error Kinds
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | InvalidArgument | Malformed key, non-positive count, negative price/rating, negative K, empty title/author, repeated key |
//! | NotFound | Key referenced but absent from the catalog |
//! | AlreadyExists | Key passed to add-books is already present |
//! | InsufficientStock | A buy exceeds the available copies of one or more keys |
//! | NullInput | The request container itself is absent |
//!
//! All kinds except `InsufficientStock` are detected before any mutation.
//! `InsufficientStock` is raised after the sale misses of the under-stocked
//! entries have been recorded.

use crate::types::Isbn;
use thiserror::Error;

/// Stable code for each error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed argument
    InvalidArgument,
    /// Entry missing
    NotFound,
    /// Entry already present
    AlreadyExists,
    /// Not enough copies to satisfy a buy
    InsufficientStock,
    /// Request container absent
    NullInput,
}

impl ErrorKind {
    /// Canonical code string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::AlreadyExists => "AlreadyExists",
            ErrorKind::InsufficientStock => "InsufficientStock",
            ErrorKind::NullInput => "NullInput",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a catalog operation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// An argument failed validation
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong
        reason: String,
    },

    /// The key is not in the catalog
    #[error("isbn {isbn} is not available")]
    NotFound {
        /// Missing key
        isbn: Isbn,
    },

    /// The key is already in the catalog
    #[error("isbn {isbn} is duplicated")]
    AlreadyExists {
        /// Existing key
        isbn: Isbn,
    },

    /// At least one entry had fewer copies than requested
    #[error("insufficient stock for isbns {isbns:?}")]
    InsufficientStock {
        /// Under-stocked keys, ascending
        isbns: Vec<Isbn>,
    },

    /// The request container was absent
    #[error("null input")]
    NullInput,
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    /// Build an `InvalidArgument` error
    pub fn invalid(reason: impl Into<String>) -> Self {
        CatalogError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            CatalogError::NotFound { .. } => ErrorKind::NotFound,
            CatalogError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            CatalogError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
            CatalogError::NullInput => ErrorKind::NullInput,
        }
    }

    /// Check if this error may succeed on retry
    ///
    /// Only stock shortages are retryable: a later replenish can satisfy the
    /// same request. Everything else is a property of the request itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::InsufficientStock { .. })
    }

    /// Check if this is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    /// Check if this is an invalid-argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CatalogError::InvalidArgument { .. })
    }
}
