//! Core types and traits for Stockroom
//!
//! This crate defines the foundational types used throughout the system:
//! - Isbn: Identifier of a catalog entry
//! - Request types: NewBook, BookCopy, BookRating, BookEditorPick
//! - Entry halves and snapshots: BookDescriptor, BookStock, StockBook, Book
//! - CatalogError: Error kinds shared by every store
//! - StockManager / BookStore: The two operation contracts

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod book;
pub mod error;
pub mod traits;
pub mod types;

pub use book::{split_new_book, Book, BookDescriptor, BookStock, Entry, StockBook, UNRATED};
pub use error::{CatalogError, ErrorKind, Result};
pub use traits::{BookStore, CatalogStore, StockManager};
pub use types::{BookCopy, BookEditorPick, BookRating, Isbn, NewBook};
