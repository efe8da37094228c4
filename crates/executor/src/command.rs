//! Command and output types
//!
//! A [`Command`] is one client request. The executor maps every command to
//! exactly one store operation, so a transport built on these types can never
//! split a request across several operations.
//!
//! Batched commands carry `Option<Vec<_>>`. A missing container is reported
//! as `NullInput`; an empty one is a valid no-op request.

use serde::{Deserialize, Serialize};
use stockroom_core::{Book, BookCopy, BookEditorPick, BookRating, Isbn, NewBook, StockBook};

/// Which of the two contracts a command belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contract {
    /// Administrative and stocking operations
    StockManager,
    /// Customer-facing operations
    BookStore,
}

/// One client request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    // Stock manager contract
    /// Add new entries
    AddBooks {
        /// Entries to add
        books: Option<Vec<NewBook>>,
    },
    /// Replenish stock
    AddCopies {
        /// Copies to add
        copies: Option<Vec<BookCopy>>,
    },
    /// Snapshot every entry
    StockBooks,
    /// Snapshot the given entries
    StockBooksByIsbn {
        /// Entries to read
        isbns: Option<Vec<Isbn>>,
    },
    /// Set or clear editor-pick flags
    UpdateEditorPicks {
        /// Flag updates
        picks: Option<Vec<BookEditorPick>>,
    },
    /// Snapshot entries with recorded sale misses
    BooksInDemand,
    /// Remove the given entries
    RemoveBooks {
        /// Entries to remove
        isbns: Option<Vec<Isbn>>,
    },
    /// Remove every entry
    RemoveAllBooks,

    // Book store contract
    /// Buy copies
    BuyBooks {
        /// Copies to buy
        copies: Option<Vec<BookCopy>>,
    },
    /// Customer snapshots of the given entries
    GetBooks {
        /// Entries to read
        isbns: Option<Vec<Isbn>>,
    },
    /// Sample editor picks
    GetEditorPicks {
        /// Maximum number of results
        k: i32,
    },
    /// Highest-rated entries
    GetTopRatedBooks {
        /// Maximum number of results
        k: i32,
    },
    /// Submit ratings
    RateBooks {
        /// Ratings to add
        ratings: Option<Vec<BookRating>>,
    },
}

impl Command {
    /// Command name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddBooks { .. } => "add_books",
            Command::AddCopies { .. } => "add_copies",
            Command::StockBooks => "stock_books",
            Command::StockBooksByIsbn { .. } => "stock_books_by_isbn",
            Command::UpdateEditorPicks { .. } => "update_editor_picks",
            Command::BooksInDemand => "books_in_demand",
            Command::RemoveBooks { .. } => "remove_books",
            Command::RemoveAllBooks => "remove_all_books",
            Command::BuyBooks { .. } => "buy_books",
            Command::GetBooks { .. } => "get_books",
            Command::GetEditorPicks { .. } => "get_editor_picks",
            Command::GetTopRatedBooks { .. } => "get_top_rated_books",
            Command::RateBooks { .. } => "rate_books",
        }
    }

    /// Contract this command belongs to
    pub fn contract(&self) -> Contract {
        match self {
            Command::AddBooks { .. }
            | Command::AddCopies { .. }
            | Command::StockBooks
            | Command::StockBooksByIsbn { .. }
            | Command::UpdateEditorPicks { .. }
            | Command::BooksInDemand
            | Command::RemoveBooks { .. }
            | Command::RemoveAllBooks => Contract::StockManager,
            Command::BuyBooks { .. }
            | Command::GetBooks { .. }
            | Command::GetEditorPicks { .. }
            | Command::GetTopRatedBooks { .. }
            | Command::RateBooks { .. } => Contract::BookStore,
        }
    }
}

/// Successful result of a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "output", content = "data", rename_all = "snake_case")]
pub enum Output {
    /// The operation has no result value
    Unit,
    /// Stock-manager snapshots
    StockBooks(Vec<StockBook>),
    /// Customer snapshots
    Books(Vec<Book>),
}
