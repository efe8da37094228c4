//! Book store command handlers.

use stockroom_core::{BookCopy, BookRating, BookStore, CatalogStore, Isbn, Result};

use super::require;
use crate::Output;

/// Handle BuyBooks command.
pub fn buy_books(store: &dyn CatalogStore, copies: Option<Vec<BookCopy>>) -> Result<Output> {
    store.buy_books(&require(copies)?)?;
    Ok(Output::Unit)
}

/// Handle GetBooks command.
pub fn get_books(store: &dyn CatalogStore, isbns: Option<Vec<Isbn>>) -> Result<Output> {
    Ok(Output::Books(store.get_books(&require(isbns)?)?))
}

/// Handle GetEditorPicks command.
pub fn get_editor_picks(store: &dyn CatalogStore, k: i32) -> Result<Output> {
    Ok(Output::Books(store.get_editor_picks(k)?))
}

/// Handle GetTopRatedBooks command.
pub fn get_top_rated_books(store: &dyn CatalogStore, k: i32) -> Result<Output> {
    Ok(Output::Books(store.get_top_rated_books(k)?))
}

/// Handle RateBooks command.
pub fn rate_books(store: &dyn CatalogStore, ratings: Option<Vec<BookRating>>) -> Result<Output> {
    store.rate_books(&require(ratings)?)?;
    Ok(Output::Unit)
}
