//! Command dispatch.

use std::sync::Arc;

use stockroom_core::{CatalogStore, Result};

use crate::handlers::{book_store, stock_manager};
use crate::{Command, Output};

/// Runs commands against one store
///
/// Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct Executor {
    store: Arc<dyn CatalogStore>,
}

impl Executor {
    /// Create an executor over a store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// Execute one command as exactly one store operation
    pub fn execute(&self, command: Command) -> Result<Output> {
        let name = command.name();
        let contract = command.contract();
        let store = self.store.as_ref();

        let result = match command {
            Command::AddBooks { books } => stock_manager::add_books(store, books),
            Command::AddCopies { copies } => stock_manager::add_copies(store, copies),
            Command::StockBooks => stock_manager::stock_books(store),
            Command::StockBooksByIsbn { isbns } => stock_manager::stock_books_by_isbn(store, isbns),
            Command::UpdateEditorPicks { picks } => {
                stock_manager::update_editor_picks(store, picks)
            }
            Command::BooksInDemand => stock_manager::books_in_demand(store),
            Command::RemoveBooks { isbns } => stock_manager::remove_books(store, isbns),
            Command::RemoveAllBooks => stock_manager::remove_all_books(store),
            Command::BuyBooks { copies } => book_store::buy_books(store, copies),
            Command::GetBooks { isbns } => book_store::get_books(store, isbns),
            Command::GetEditorPicks { k } => book_store::get_editor_picks(store, k),
            Command::GetTopRatedBooks { k } => book_store::get_top_rated_books(store, k),
            Command::RateBooks { ratings } => book_store::rate_books(store, ratings),
        };

        if let Err(e) = &result {
            tracing::debug!(command = name, ?contract, kind = %e.kind(), error = %e, "command failed");
        }
        result
    }
}
