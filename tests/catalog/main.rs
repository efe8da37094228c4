//! Catalog Test Suite
//!
//! Single-threaded behavior of both store strategies through the public
//! facade. Every scenario runs against the two-level store and the
//! single-lock baseline, which must agree on all observable results.
//!
//! ## Modules
//!
//! - `basic_ops`: Add, replenish, snapshot, remove
//! - `atomicity`: All-or-nothing validation of batch requests
//! - `purchases`: Buying, shortfalls and books in demand
//! - `ratings`: Rating submissions and top-rated ranking
//! - `editor_picks`: Editor-pick flags and sampling
//! - `facade`: Builder, config files and the command executor
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test catalog
//! cargo test --test catalog atomicity::
//! ```

use stockroom::prelude::*;
use stockroom::{CatalogError, ErrorKind};

// Test modules
pub mod atomicity;
pub mod editor_picks;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// One empty catalog per locking strategy
pub fn stores() -> Vec<Stockroom> {
    vec![
        Stockroom::builder().two_level().open(),
        Stockroom::builder().single_lock().open(),
    ]
}

/// A well-formed new book
pub fn book(isbn: i32, copies: i32) -> NewBook {
    NewBook::new(isbn, format!("Title {}", isbn), format!("Author {}", isbn), 10.0, copies)
}

/// A catalog preloaded with `(isbn, copies)` pairs, one per strategy
pub fn stocked(books: &[(i32, i32)]) -> Vec<Stockroom> {
    stores()
        .into_iter()
        .map(|shop| {
            let new_books: Vec<NewBook> = books.iter().map(|(i, c)| book(*i, *c)).collect();
            shop.stock_manager().add_books(&new_books).unwrap();
            shop
        })
        .collect()
}

/// Isbns of a list of customer snapshots
pub fn isbns(books: &[Book]) -> Vec<i32> {
    books.iter().map(|b| b.isbn.get()).collect()
}

/// Full snapshot of one entry
pub fn stock_of(shop: &Stockroom, isbn: i32) -> StockBook {
    shop.stock_manager()
        .stock_books_by_isbn(&[Isbn::new(isbn)])
        .unwrap()
        .remove(0)
}

/// Assert an error is of the given kind, naming the strategy on failure
pub fn assert_kind<T: std::fmt::Debug>(
    shop: &Stockroom,
    result: std::result::Result<T, CatalogError>,
    kind: ErrorKind,
) {
    match result {
        Err(e) => assert_eq!(e.kind(), kind, "{:?}: {}", shop, e),
        Ok(v) => panic!("{:?}: expected {} but got {:?}", shop, kind, v),
    }
}
