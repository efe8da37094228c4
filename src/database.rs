//! Main entry point for Stockroom.
//!
//! This module provides the `Stockroom` handle, which owns one catalog store
//! and hands out its two contracts.

use std::path::Path;
use std::sync::Arc;

use stockroom_core::{
    Book, BookCopy, BookEditorPick, BookRating, BookStore, CatalogStore, Isbn, NewBook,
    StockBook, StockManager,
};
use stockroom_engine::{LockingMode, StoreConfig};
use stockroom_executor::Executor;

use crate::error::Result;

/// A shared catalog store.
///
/// Create one with [`Stockroom::open`] or [`Stockroom::builder`]. The handle is
/// cheap to clone and every clone operates on the same catalog, so it can be
/// passed to as many threads as needed.
///
/// # Example
///
/// ```ignore
/// use stockroom::prelude::*;
///
/// let shop = Stockroom::open();
/// shop.stock_manager()
///     .add_books(&[NewBook::new(1, "Dune", "Frank Herbert", 9.5, 3)])?;
/// shop.book_store().buy_books(&[BookCopy::new(1, 1)])?;
/// ```
#[derive(Clone)]
pub struct Stockroom {
    inner: Arc<dyn CatalogStore>,
    locking: LockingMode,
}

impl Stockroom {
    /// Open an empty catalog with default settings (two-level locking).
    pub fn open() -> Self {
        Self::builder().open()
    }

    /// Open an empty catalog configured from a TOML file.
    ///
    /// # Example
    ///
    /// ```toml
    /// locking = "single_lock"
    /// sampling_seed = 7
    /// ```
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = StoreConfig::from_file(path)?;
        tracing::debug!(path = %path.display(), "loaded store config");
        Ok(Self::builder().config(config).open())
    }

    /// Create a builder for catalog configuration.
    pub fn builder() -> StockroomBuilder {
        StockroomBuilder::new()
    }

    /// The administrative contract.
    pub fn stock_manager(&self) -> &dyn StockManager {
        self
    }

    /// The customer contract.
    pub fn book_store(&self) -> &dyn BookStore {
        self
    }

    /// A command executor sharing this catalog.
    pub fn executor(&self) -> Executor {
        Executor::new(Arc::clone(&self.inner))
    }

    /// The locking strategy this catalog was opened with.
    pub fn locking_mode(&self) -> LockingMode {
        self.locking
    }
}

impl StockManager for Stockroom {
    fn add_books(&self, books: &[NewBook]) -> stockroom_core::Result<()> {
        self.inner.add_books(books)
    }

    fn add_copies(&self, copies: &[BookCopy]) -> stockroom_core::Result<()> {
        self.inner.add_copies(copies)
    }

    fn stock_books(&self) -> stockroom_core::Result<Vec<StockBook>> {
        self.inner.stock_books()
    }

    fn stock_books_by_isbn(&self, isbns: &[Isbn]) -> stockroom_core::Result<Vec<StockBook>> {
        self.inner.stock_books_by_isbn(isbns)
    }

    fn update_editor_picks(&self, picks: &[BookEditorPick]) -> stockroom_core::Result<()> {
        self.inner.update_editor_picks(picks)
    }

    fn books_in_demand(&self) -> stockroom_core::Result<Vec<StockBook>> {
        self.inner.books_in_demand()
    }

    fn remove_books(&self, isbns: &[Isbn]) -> stockroom_core::Result<()> {
        self.inner.remove_books(isbns)
    }

    fn remove_all_books(&self) -> stockroom_core::Result<()> {
        self.inner.remove_all_books()
    }
}

impl BookStore for Stockroom {
    fn buy_books(&self, copies: &[BookCopy]) -> stockroom_core::Result<()> {
        self.inner.buy_books(copies)
    }

    fn get_books(&self, isbns: &[Isbn]) -> stockroom_core::Result<Vec<Book>> {
        self.inner.get_books(isbns)
    }

    fn get_editor_picks(&self, k: i32) -> stockroom_core::Result<Vec<Book>> {
        self.inner.get_editor_picks(k)
    }

    fn get_top_rated_books(&self, k: i32) -> stockroom_core::Result<Vec<Book>> {
        self.inner.get_top_rated_books(k)
    }

    fn rate_books(&self, ratings: &[BookRating]) -> stockroom_core::Result<()> {
        self.inner.rate_books(ratings)
    }
}

impl std::fmt::Debug for Stockroom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stockroom")
            .field("strategy", &self.inner.strategy())
            .finish()
    }
}

/// Builder for catalog configuration.
///
/// # Example
///
/// ```ignore
/// // Production: fine-grained locking, entropy-seeded picks
/// let shop = Stockroom::builder().two_level().open();
///
/// // Tests: coarse baseline with reproducible editor picks
/// let shop = Stockroom::builder()
///     .single_lock()
///     .sampling_seed(42)
///     .open();
/// ```
#[derive(Debug, Clone, Default)]
pub struct StockroomBuilder {
    config: StoreConfig,
}

impl StockroomBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the structural lock plus per-key locks (default).
    pub fn two_level(mut self) -> Self {
        self.config.locking = LockingMode::TwoLevel;
        self
    }

    /// Use one store-wide lock for every operation.
    pub fn single_lock(mut self) -> Self {
        self.config.locking = LockingMode::SingleLock;
        self
    }

    /// Seed editor-pick sampling so results are reproducible.
    pub fn sampling_seed(mut self, seed: u64) -> Self {
        self.config.sampling_seed = Some(seed);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Open an empty catalog.
    pub fn open(self) -> Stockroom {
        Stockroom {
            inner: stockroom_engine::open(&self.config),
            locking: self.config.locking,
        }
    }
}
