//! Core types for the catalog
//!
//! This module defines the identifiers and request types used throughout
//! the system:
//! - [`Isbn`]: Unique identifier for a catalog entry
//! - [`NewBook`]: Descriptor for an entry being added
//! - [`BookCopy`]: Copy count request (buy or replenish)
//! - [`BookRating`]: Rating submission
//! - [`BookEditorPick`]: Editor-pick flag update
//!
//! Request types are transient. They are built by callers, validated by the
//! store, and never kept after the operation returns.

use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog entry
///
/// The inner value is signed so that malformed identifiers coming from a
/// transport layer can be represented and rejected by validation. Only
/// strictly positive values name a valid entry.
///
/// Ordering is numeric. Multi-key lock acquisition sorts by this ordering,
/// so every caller locks keys in the same global order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Isbn(i32);

impl Isbn {
    /// Create an Isbn from its raw value (not validated)
    ///
    /// # Examples
    ///
    /// ```
    /// use stockroom_core::Isbn;
    ///
    /// let isbn = Isbn::new(3044560);
    /// assert!(isbn.is_valid());
    /// assert!(!Isbn::new(-1).is_valid());
    /// ```
    pub const fn new(raw: i32) -> Self {
        Isbn(raw)
    }

    /// Raw integer value
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Whether this identifier can name an entry
    pub const fn is_valid(self) -> bool {
        self.0 > 0
    }
}

impl From<i32> for Isbn {
    fn from(raw: i32) -> Self {
        Isbn(raw)
    }
}

impl std::fmt::Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Descriptor for a new catalog entry
///
/// Carries the immutable fields plus the initial stock and editor-pick flag.
/// Sale misses and ratings always start at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    /// Identifier; must not already exist in the catalog
    pub isbn: Isbn,
    /// Title (non-empty)
    pub title: String,
    /// Author (non-empty)
    pub author: String,
    /// Price (non-negative)
    pub price: f32,
    /// Initial number of copies (at least one)
    pub num_copies: i32,
    /// Initial editor-pick flag
    pub editor_pick: bool,
}

impl NewBook {
    /// Create a descriptor that is not an editor pick
    pub fn new(
        isbn: impl Into<Isbn>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f32,
        num_copies: i32,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            price,
            num_copies,
            editor_pick: false,
        }
    }

    /// Set the initial editor-pick flag
    pub fn with_editor_pick(mut self, editor_pick: bool) -> Self {
        self.editor_pick = editor_pick;
        self
    }
}

/// Request to buy or replenish copies of one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookCopy {
    /// Target entry
    pub isbn: Isbn,
    /// Number of copies (must be positive)
    pub num_copies: i32,
}

impl BookCopy {
    /// Create a copy request
    pub fn new(isbn: impl Into<Isbn>, num_copies: i32) -> Self {
        Self {
            isbn: isbn.into(),
            num_copies,
        }
    }
}

/// Rating submission for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookRating {
    /// Target entry
    pub isbn: Isbn,
    /// Rating value (must be non-negative)
    pub rating: i32,
}

impl BookRating {
    /// Create a rating submission
    pub fn new(isbn: impl Into<Isbn>, rating: i32) -> Self {
        Self {
            isbn: isbn.into(),
            rating,
        }
    }
}

/// Editor-pick flag update for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookEditorPick {
    /// Target entry
    pub isbn: Isbn,
    /// New flag value
    pub editor_pick: bool,
}

impl BookEditorPick {
    /// Create an editor-pick update
    pub fn new(isbn: impl Into<Isbn>, editor_pick: bool) -> Self {
        Self {
            isbn: isbn.into(),
            editor_pick,
        }
    }
}
