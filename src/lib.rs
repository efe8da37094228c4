//! # Stockroom
//!
//! Concurrent in-memory book catalog.
//!
//! Stockroom keeps one entry per ISBN and serves two contracts over the same
//! catalog: a [`StockManager`] for administration and a [`BookStore`] for
//! customers. Every batch request is all-or-nothing and readers never observe
//! a half-applied batch.
//!
//! ## Quick Start
//!
//! ```ignore
//! use stockroom::prelude::*;
//!
//! let shop = Stockroom::open();
//!
//! shop.stock_manager().add_books(&[
//!     NewBook::new(1, "Dune", "Frank Herbert", 9.5, 3).with_editor_pick(true),
//! ])?;
//!
//! shop.book_store().buy_books(&[BookCopy::new(1, 2)])?;
//! shop.book_store().rate_books(&[BookRating::new(1, 5)])?;
//!
//! let picks = shop.book_store().get_editor_picks(1)?;
//! ```
//!
//! ## Locking
//!
//! The default store takes a structural lock for changes to the key set and
//! one reader-writer lock per entry for everything else, always in ascending
//! ISBN order. Operations on disjoint ISBNs proceed in parallel. A single
//! store-wide lock is available as a baseline via
//! [`StockroomBuilder::single_lock`].

#![warn(missing_docs)]

mod database;
mod error;

pub mod prelude;

// Re-export main entry points
pub use database::{Stockroom, StockroomBuilder};
pub use error::{Error, Result};

// Re-export contracts and data types
pub use stockroom_core::{
    Book, BookCopy, BookEditorPick, BookRating, BookStore, CatalogError, CatalogStore,
    ErrorKind, Isbn, NewBook, StockBook, StockManager, UNRATED,
};
pub use stockroom_engine::{ConfigError, LockingMode, StoreConfig};
pub use stockroom_executor::{Command, Contract, Executor, Output};
