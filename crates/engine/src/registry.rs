//! Entry registry and request validation
//!
//! [`EntryRegistry`] maps each live isbn to a per-entry slot. It is the data
//! structure both store variants share:
//! - the two-level store keeps immutable descriptors here and the mutable
//!   content in its lock table
//! - the single-lock store keeps whole entries here
//!
//! The registry always sits behind a store's structural lock, so it needs no
//! synchronization of its own.
//!
//! ## Validation
//!
//! Every `validate_*` method checks a whole batch and returns the first
//! failure in request order. Stores call them before touching any entry, so a
//! failed batch never leaves partial effects behind.
//!
//! Mutating batches may not name the same isbn twice; read and removal
//! batches are treated as sets.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::ops::Index;

use rustc_hash::FxHashSet;
use stockroom_core::{
    BookCopy, BookEditorPick, BookRating, CatalogError, Isbn, NewBook, Result,
};

/// Ordered map from isbn to entry slot
#[derive(Debug, Clone)]
pub struct EntryRegistry<S> {
    entries: BTreeMap<Isbn, S>,
}

impl<S> EntryRegistry<S> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an isbn is present
    pub fn contains(&self, isbn: Isbn) -> bool {
        self.entries.contains_key(&isbn)
    }

    /// Slot for an isbn
    pub fn get(&self, isbn: Isbn) -> Option<&S> {
        self.entries.get(&isbn)
    }

    /// Mutable slot for an isbn
    pub fn get_mut(&mut self, isbn: Isbn) -> Option<&mut S> {
        self.entries.get_mut(&isbn)
    }

    /// Insert a slot, returning the one it replaced
    pub fn insert(&mut self, isbn: Isbn, slot: S) -> Option<S> {
        self.entries.insert(isbn, slot)
    }

    /// Remove a slot
    pub fn remove(&mut self, isbn: Isbn) -> Option<S> {
        self.entries.remove(&isbn)
    }

    /// Remove every slot
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Isbns in ascending order
    pub fn keys(&self) -> Vec<Isbn> {
        self.entries.keys().copied().collect()
    }

    /// Slots in ascending isbn order
    pub fn iter(&self) -> btree_map::Iter<'_, Isbn, S> {
        self.entries.iter()
    }

    /// Mutable slots in ascending isbn order
    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, Isbn, S> {
        self.entries.iter_mut()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check that an isbn is well formed and present
    pub fn validate_present(&self, isbn: Isbn) -> Result<()> {
        validate_isbn(isbn)?;
        if !self.contains(isbn) {
            return Err(CatalogError::NotFound { isbn });
        }
        Ok(())
    }

    /// Check that an isbn is well formed and not yet present
    pub fn validate_absent(&self, isbn: Isbn) -> Result<()> {
        validate_isbn(isbn)?;
        if self.contains(isbn) {
            return Err(CatalogError::AlreadyExists { isbn });
        }
        Ok(())
    }

    /// Validate a batch of new entries
    pub fn validate_new_books(&self, books: &[NewBook]) -> Result<()> {
        let mut seen = FxHashSet::default();
        for book in books {
            self.validate_absent(book.isbn)?;
            if !seen.insert(book.isbn) {
                return Err(CatalogError::AlreadyExists { isbn: book.isbn });
            }
            validate_new_book_fields(book)?;
        }
        Ok(())
    }

    /// Validate a batch of copy requests (buy or replenish)
    pub fn validate_copies(&self, copies: &[BookCopy]) -> Result<()> {
        let mut seen = FxHashSet::default();
        for copy in copies {
            self.validate_present(copy.isbn)?;
            ensure_first(&mut seen, copy.isbn)?;
            if copy.num_copies < 1 {
                return Err(CatalogError::invalid(format!(
                    "number of copies {} for isbn {} must be positive",
                    copy.num_copies, copy.isbn
                )));
            }
        }
        Ok(())
    }

    /// Validate a batch of rating submissions
    pub fn validate_ratings(&self, ratings: &[BookRating]) -> Result<()> {
        let mut seen = FxHashSet::default();
        for rating in ratings {
            self.validate_present(rating.isbn)?;
            ensure_first(&mut seen, rating.isbn)?;
            if rating.rating < 0 {
                return Err(CatalogError::invalid(format!(
                    "rating {} for isbn {} must not be negative",
                    rating.rating, rating.isbn
                )));
            }
        }
        Ok(())
    }

    /// Validate a batch of editor-pick updates
    pub fn validate_editor_picks(&self, picks: &[BookEditorPick]) -> Result<()> {
        let mut seen = FxHashSet::default();
        for pick in picks {
            self.validate_present(pick.isbn)?;
            ensure_first(&mut seen, pick.isbn)?;
        }
        Ok(())
    }

    /// Validate a set of isbns for reading or removal
    pub fn validate_isbns(&self, isbns: &[Isbn]) -> Result<()> {
        isbns.iter().try_for_each(|isbn| self.validate_present(*isbn))
    }
}

impl<S> Default for EntryRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Index<Isbn> for EntryRegistry<S> {
    type Output = S;

    /// # Panics
    ///
    /// Panics if the isbn is absent. Stores only index with keys they have
    /// validated or locked under the structural lock.
    fn index(&self, isbn: Isbn) -> &S {
        match self.entries.get(&isbn) {
            Some(slot) => slot,
            None => panic!("entry registry: isbn {} missing while locked", isbn),
        }
    }
}

/// Check that an isbn can name an entry
pub fn validate_isbn(isbn: Isbn) -> Result<()> {
    if !isbn.is_valid() {
        return Err(CatalogError::invalid(format!("isbn {} is invalid", isbn)));
    }
    Ok(())
}

/// Check a result-count argument, converting it to a length
pub fn validate_k(k: i32) -> Result<usize> {
    usize::try_from(k).map_err(|_| {
        CatalogError::invalid(format!("number of books {} must not be negative", k))
    })
}

fn validate_new_book_fields(book: &NewBook) -> Result<()> {
    if book.title.trim().is_empty() {
        return Err(CatalogError::invalid(format!(
            "book {} has an empty title",
            book.isbn
        )));
    }
    if book.author.trim().is_empty() {
        return Err(CatalogError::invalid(format!(
            "book {} has an empty author",
            book.isbn
        )));
    }
    if book.price.is_nan() || book.price < 0.0 {
        return Err(CatalogError::invalid(format!(
            "book {} has invalid price {}",
            book.isbn, book.price
        )));
    }
    if book.num_copies < 1 {
        return Err(CatalogError::invalid(format!(
            "book {} must start with at least one copy, got {}",
            book.isbn, book.num_copies
        )));
    }
    Ok(())
}

fn ensure_first(seen: &mut FxHashSet<Isbn>, isbn: Isbn) -> Result<()> {
    if !seen.insert(isbn) {
        return Err(CatalogError::invalid(format!(
            "isbn {} appears more than once in the request",
            isbn
        )));
    }
    Ok(())
}
