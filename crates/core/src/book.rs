//! Catalog entry record and snapshots
//!
//! An entry is split into two halves:
//! - [`BookDescriptor`]: immutable fields fixed at creation
//! - [`BookStock`]: mutable content (stock, sale misses, ratings, editor pick)
//!
//! Stores decide where each half lives. The mutable half is always accessed
//! under a lock; callers only ever see [`StockBook`] or [`Book`] snapshots,
//! which are plain copies decoupled from live state.

use crate::types::{Isbn, NewBook};
use serde::{Deserialize, Serialize};

/// Average rating reported for an entry that was never rated
pub const UNRATED: f32 = -1.0;

/// Immutable fields of a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDescriptor {
    /// Identifier
    pub isbn: Isbn,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Price
    pub price: f32,
}

/// Mutable content of a catalog entry
///
/// All counters are non-negative. `sale_misses` only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookStock {
    /// Copies currently in stock
    pub num_copies: i64,
    /// Accumulated unmet demand
    pub sale_misses: i64,
    /// Sum of all ratings received
    pub total_rating: i64,
    /// Number of ratings received
    pub times_rated: i64,
    /// Featured by an editor
    pub editor_pick: bool,
}

impl BookStock {
    /// Fresh content with the given stock and flag
    pub fn new(num_copies: i64, editor_pick: bool) -> Self {
        Self {
            num_copies,
            editor_pick,
            ..Default::default()
        }
    }

    /// Whether `requested` copies can be sold right now
    pub fn has_copies(&self, requested: i64) -> bool {
        self.num_copies >= requested
    }

    /// Copies missing to satisfy `requested` (zero when in stock)
    pub fn shortfall(&self, requested: i64) -> i64 {
        (requested - self.num_copies).max(0)
    }

    /// Add copies to stock
    pub fn add_copies(&mut self, copies: i64) {
        self.num_copies += copies;
    }

    /// Remove sold copies from stock
    ///
    /// Callers check [`has_copies`](Self::has_copies) for the whole batch
    /// before selling anything.
    pub fn sell_copies(&mut self, copies: i64) {
        debug_assert!(self.has_copies(copies), "selling more copies than in stock");
        self.num_copies -= copies;
    }

    /// Record unmet demand
    pub fn add_sale_miss(&mut self, missed: i64) {
        self.sale_misses += missed;
    }

    /// Record one rating
    pub fn add_rating(&mut self, rating: i64) {
        self.total_rating += rating;
        self.times_rated += 1;
    }

    /// Average rating, or [`UNRATED`] if never rated
    pub fn average_rating(&self) -> f32 {
        average(self.total_rating, self.times_rated)
    }
}

fn average(total: i64, count: i64) -> f32 {
    if count > 0 {
        total as f32 / count as f32
    } else {
        UNRATED
    }
}

/// Full catalog entry: descriptor plus mutable content
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Immutable fields
    pub descriptor: BookDescriptor,
    /// Mutable content
    pub stock: BookStock,
}

impl Entry {
    /// Build the entry described by a validated [`NewBook`]
    pub fn from_new_book(book: &NewBook) -> Self {
        let (descriptor, stock) = split_new_book(book);
        Self { descriptor, stock }
    }

    /// Stock-manager snapshot
    pub fn stock_book(&self) -> StockBook {
        StockBook::from_parts(&self.descriptor, &self.stock)
    }

    /// Customer snapshot
    pub fn book(&self) -> Book {
        Book::from_descriptor(&self.descriptor)
    }
}

/// Split a validated [`NewBook`] into its immutable and mutable halves
pub fn split_new_book(book: &NewBook) -> (BookDescriptor, BookStock) {
    let descriptor = BookDescriptor {
        isbn: book.isbn,
        title: book.title.clone(),
        author: book.author.clone(),
        price: book.price,
    };
    let stock = BookStock::new(i64::from(book.num_copies), book.editor_pick);
    (descriptor, stock)
}

/// Snapshot of every visible field of an entry
///
/// Returned by stock-manager reads. Taken while holding at least a shared
/// lock on the entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBook {
    /// Identifier
    pub isbn: Isbn,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Price
    pub price: f32,
    /// Copies in stock
    pub num_copies: i64,
    /// Accumulated unmet demand
    pub sale_misses: i64,
    /// Sum of ratings
    pub total_rating: i64,
    /// Number of ratings
    pub times_rated: i64,
    /// Editor-pick flag
    pub editor_pick: bool,
}

impl StockBook {
    /// Assemble a snapshot from both halves of an entry
    pub fn from_parts(descriptor: &BookDescriptor, stock: &BookStock) -> Self {
        Self {
            isbn: descriptor.isbn,
            title: descriptor.title.clone(),
            author: descriptor.author.clone(),
            price: descriptor.price,
            num_copies: stock.num_copies,
            sale_misses: stock.sale_misses,
            total_rating: stock.total_rating,
            times_rated: stock.times_rated,
            editor_pick: stock.editor_pick,
        }
    }

    /// Average rating, or [`UNRATED`] if never rated
    pub fn average_rating(&self) -> f32 {
        average(self.total_rating, self.times_rated)
    }

    /// Customer view of this snapshot
    pub fn to_book(&self) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
        }
    }
}

/// Customer-facing snapshot of an entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier
    pub isbn: Isbn,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Price
    pub price: f32,
}

impl Book {
    /// Snapshot the immutable fields
    pub fn from_descriptor(descriptor: &BookDescriptor) -> Self {
        Self {
            isbn: descriptor.isbn,
            title: descriptor.title.clone(),
            author: descriptor.author.clone(),
            price: descriptor.price,
        }
    }
}
