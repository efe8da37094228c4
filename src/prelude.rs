//! Convenient imports for Stockroom.
//!
//! ```ignore
//! use stockroom::prelude::*;
//!
//! let shop = Stockroom::open();
//! shop.stock_manager().stock_books()?;
//! ```

// Main entry point
pub use crate::database::{Stockroom, StockroomBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Contracts
pub use stockroom_core::{BookStore, CatalogStore, StockManager};

// Requests and snapshots
pub use stockroom_core::{Book, BookCopy, BookEditorPick, BookRating, Isbn, NewBook, StockBook};

// Configuration
pub use stockroom_engine::{LockingMode, StoreConfig};
