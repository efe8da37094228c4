//! Command handlers, one per contract.

pub mod book_store;
pub mod stock_manager;

use stockroom_core::{CatalogError, Result};

/// Unwrap a request container, reporting an absent one as `NullInput`
pub(crate) fn require<T>(items: Option<Vec<T>>) -> Result<Vec<T>> {
    items.ok_or(CatalogError::NullInput)
}
