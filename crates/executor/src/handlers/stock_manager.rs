//! Stock manager command handlers.

use stockroom_core::{BookCopy, BookEditorPick, CatalogStore, Isbn, NewBook, Result, StockManager};

use super::require;
use crate::Output;

/// Handle AddBooks command.
pub fn add_books(store: &dyn CatalogStore, books: Option<Vec<NewBook>>) -> Result<Output> {
    store.add_books(&require(books)?)?;
    Ok(Output::Unit)
}

/// Handle AddCopies command.
pub fn add_copies(store: &dyn CatalogStore, copies: Option<Vec<BookCopy>>) -> Result<Output> {
    store.add_copies(&require(copies)?)?;
    Ok(Output::Unit)
}

/// Handle StockBooks command.
pub fn stock_books(store: &dyn CatalogStore) -> Result<Output> {
    Ok(Output::StockBooks(store.stock_books()?))
}

/// Handle StockBooksByIsbn command.
pub fn stock_books_by_isbn(store: &dyn CatalogStore, isbns: Option<Vec<Isbn>>) -> Result<Output> {
    Ok(Output::StockBooks(
        store.stock_books_by_isbn(&require(isbns)?)?,
    ))
}

/// Handle UpdateEditorPicks command.
pub fn update_editor_picks(
    store: &dyn CatalogStore,
    picks: Option<Vec<BookEditorPick>>,
) -> Result<Output> {
    store.update_editor_picks(&require(picks)?)?;
    Ok(Output::Unit)
}

/// Handle BooksInDemand command.
pub fn books_in_demand(store: &dyn CatalogStore) -> Result<Output> {
    Ok(Output::StockBooks(store.books_in_demand()?))
}

/// Handle RemoveBooks command.
pub fn remove_books(store: &dyn CatalogStore, isbns: Option<Vec<Isbn>>) -> Result<Output> {
    store.remove_books(&require(isbns)?)?;
    Ok(Output::Unit)
}

/// Handle RemoveAllBooks command.
pub fn remove_all_books(store: &dyn CatalogStore) -> Result<Output> {
    store.remove_all_books()?;
    Ok(Output::Unit)
}
