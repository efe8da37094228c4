//! Capability traits exposed to callers
//!
//! The catalog offers two contracts over the same underlying state:
//! - [`StockManager`]: administrative and stocking operations
//! - [`BookStore`]: customer-facing operations
//!
//! [`CatalogStore`] ties both together; every store implementation provides
//! it, so callers can pick a locking strategy without changing code.
//!
//! Each method is one atomic request. Batched arguments are validated in
//! full before anything is applied, and a failure is reported once for the
//! whole batch.

use crate::book::{Book, StockBook};
use crate::error::Result;
use crate::types::{BookCopy, BookEditorPick, BookRating, Isbn, NewBook};

/// Administrative contract
pub trait StockManager {
    /// Add new entries
    ///
    /// Fails with `AlreadyExists` if any key is already present.
    fn add_books(&self, books: &[NewBook]) -> Result<()>;

    /// Replenish stock of existing entries
    fn add_copies(&self, copies: &[BookCopy]) -> Result<()>;

    /// Snapshot every entry, ascending by isbn
    fn stock_books(&self) -> Result<Vec<StockBook>>;

    /// Snapshot the given entries, ascending by isbn
    fn stock_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>>;

    /// Set or clear editor-pick flags
    fn update_editor_picks(&self, picks: &[BookEditorPick]) -> Result<()>;

    /// Snapshot every entry that has recorded sale misses
    fn books_in_demand(&self) -> Result<Vec<StockBook>>;

    /// Remove the given entries
    fn remove_books(&self, isbns: &[Isbn]) -> Result<()>;

    /// Remove every entry
    fn remove_all_books(&self) -> Result<()>;
}

/// Customer-facing contract
pub trait BookStore {
    /// Buy copies of several entries at once
    ///
    /// Either every requested entry has enough copies and all are sold, or
    /// nothing is sold and the request fails with `InsufficientStock`. On that
    /// failure the shortfall of each under-stocked entry is still added to its
    /// sale-miss counter.
    fn buy_books(&self, copies: &[BookCopy]) -> Result<()>;

    /// Customer snapshots of the given entries, ascending by isbn
    fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>>;

    /// Up to `k` entries flagged as editor picks, sampled uniformly
    fn get_editor_picks(&self, k: i32) -> Result<Vec<Book>>;

    /// Up to `k` entries with the highest average rating, best first
    fn get_top_rated_books(&self, k: i32) -> Result<Vec<Book>>;

    /// Submit ratings
    fn rate_books(&self, ratings: &[BookRating]) -> Result<()>;
}

/// Both contracts on a single shareable instance
pub trait CatalogStore: StockManager + BookStore + Send + Sync {
    /// Short name of the locking strategy, for logs and metrics labels
    fn strategy(&self) -> &'static str;
}
