//! Two-level locking store
//!
//! The store coordinator for concurrent structural and content changes.
//!
//! ## Locks
//!
//! - **Structural lock**: one read/write lock over the entry registry.
//!   Operations that add or remove keys take it exclusively; every other
//!   operation takes it shared.
//! - **Per-key locks**: the [`LockTable`] holds one read/write lock per live
//!   key, owning that entry's mutable content.
//!
//! ## Protocol
//!
//! ```text
//! 1. Take the structural lock (exclusive for add/remove, shared otherwise)
//! 2. Validate the whole request against the registry
//! 3. Take per-key locks for exactly the keys involved, in ascending order
//! 4. Mutate or snapshot
//! 5. Release per-key locks, then the structural lock
//! ```
//!
//! Registry and lock table change together, under the exclusive structural
//! lock, so a key is in one iff it is in the other.
//!
//! ## Guarantees
//!
//! - Multi-key writes are atomic to readers: every per-key lock of the batch
//!   is held before the first mutation.
//! - No dirty reads: mutation only starts after validation succeeds, and
//!   readers hold shared per-key locks.
//! - Deadlock freedom: structural lock always first, per-key locks always in
//!   canonical order.
//! - Writers on disjoint keys run in parallel.

use parking_lot::RwLock;
use stockroom_concurrency::LockTable;
use stockroom_core::{
    split_new_book, Book, BookCopy, BookDescriptor, BookEditorPick, BookRating, BookStock,
    BookStore, CatalogError, CatalogStore, Isbn, NewBook, Result, StockBook, StockManager,
};
use tracing::debug;

use crate::registry::{validate_k, EntryRegistry};
use crate::selection::{rank_by_rating, sample_without_replacement, sampling_rng, Rated};

/// Store coordinator using a structural lock plus per-key locks
pub struct TwoLevelStore {
    /// Structural lock over key existence; the registry holds descriptors
    catalog: RwLock<EntryRegistry<BookDescriptor>>,
    /// Per-key locks owning each entry's mutable content
    locks: LockTable<Isbn, BookStock>,
    /// Fixed seed for editor-pick sampling
    sampling_seed: Option<u64>,
}

impl TwoLevelStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_sampling_seed(None)
    }

    /// Create an empty store with an optional sampling seed
    pub fn with_sampling_seed(sampling_seed: Option<u64>) -> Self {
        Self {
            catalog: RwLock::new(EntryRegistry::new()),
            locks: LockTable::new(),
            sampling_seed,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.catalog.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.catalog.read().is_empty()
    }

    /// Stock snapshots for a key set; structural lock held by the caller
    fn snapshot_stock(
        &self,
        registry: &EntryRegistry<BookDescriptor>,
        isbns: &[Isbn],
    ) -> Vec<StockBook> {
        let guards = self.locks.acquire_read(isbns);
        guards
            .iter()
            .map(|(isbn, stock)| StockBook::from_parts(&registry[isbn], stock))
            .collect()
    }

    /// Stock snapshots of every entry matching `keep`
    fn snapshot_all_where(&self, keep: impl Fn(&BookStock) -> bool) -> Vec<StockBook> {
        let registry = self.catalog.read();
        let guards = self.locks.acquire_all_read();
        guards
            .iter()
            .filter(|(_, stock)| keep(*stock))
            .map(|(isbn, stock)| StockBook::from_parts(&registry[isbn], stock))
            .collect()
    }
}

impl Default for TwoLevelStore {
    fn default() -> Self {
        Self::new()
    }
}

fn isbns_of<T>(items: &[T], isbn: impl Fn(&T) -> Isbn) -> Vec<Isbn> {
    items.iter().map(isbn).collect()
}

// ============================================================================
// Stock manager operations
// ============================================================================

impl StockManager for TwoLevelStore {
    fn add_books(&self, books: &[NewBook]) -> Result<()> {
        let mut registry = self.catalog.write();
        registry.validate_new_books(books)?;

        let mut slots = Vec::with_capacity(books.len());
        for book in books {
            let (descriptor, stock) = split_new_book(book);
            registry.insert(book.isbn, descriptor);
            slots.push((book.isbn, stock));
        }
        self.locks.register(slots);

        debug!(count = books.len(), total = registry.len(), "books added");
        Ok(())
    }

    fn add_copies(&self, copies: &[BookCopy]) -> Result<()> {
        let registry = self.catalog.read();
        registry.validate_copies(copies)?;

        let mut guards = self.locks.acquire_write(&isbns_of(copies, |c| c.isbn));
        for copy in copies {
            guards[copy.isbn].add_copies(i64::from(copy.num_copies));
        }
        guards.release();

        debug!(count = copies.len(), "copies added");
        Ok(())
    }

    fn stock_books(&self) -> Result<Vec<StockBook>> {
        Ok(self.snapshot_all_where(|_| true))
    }

    fn stock_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        let registry = self.catalog.read();
        registry.validate_isbns(isbns)?;
        Ok(self.snapshot_stock(&registry, isbns))
    }

    fn update_editor_picks(&self, picks: &[BookEditorPick]) -> Result<()> {
        let registry = self.catalog.read();
        registry.validate_editor_picks(picks)?;

        let mut guards = self.locks.acquire_write(&isbns_of(picks, |p| p.isbn));
        for pick in picks {
            guards[pick.isbn].editor_pick = pick.editor_pick;
        }
        guards.release();

        debug!(count = picks.len(), "editor picks updated");
        Ok(())
    }

    fn books_in_demand(&self) -> Result<Vec<StockBook>> {
        Ok(self.snapshot_all_where(|stock| stock.sale_misses > 0))
    }

    fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        let mut registry = self.catalog.write();
        registry.validate_isbns(isbns)?;

        let removed = self.locks.unregister(isbns);
        for (isbn, _) in &removed {
            registry.remove(*isbn);
        }

        debug!(count = removed.len(), total = registry.len(), "books removed");
        Ok(())
    }

    fn remove_all_books(&self) -> Result<()> {
        let mut registry = self.catalog.write();
        let count = registry.len();
        self.locks.clear();
        registry.clear();

        debug!(count, "all books removed");
        Ok(())
    }
}

// ============================================================================
// Customer operations
// ============================================================================

impl BookStore for TwoLevelStore {
    fn buy_books(&self, copies: &[BookCopy]) -> Result<()> {
        let registry = self.catalog.read();
        registry.validate_copies(copies)?;

        let mut guards = self.locks.acquire_write(&isbns_of(copies, |c| c.isbn));

        let misses: Vec<(Isbn, i64)> = copies
            .iter()
            .filter_map(|copy| {
                let missed = guards[copy.isbn].shortfall(i64::from(copy.num_copies));
                (missed > 0).then_some((copy.isbn, missed))
            })
            .collect();

        if !misses.is_empty() {
            // Demand is recorded even though the whole purchase fails
            for (isbn, missed) in &misses {
                guards[*isbn].add_sale_miss(*missed);
            }
            guards.release();

            let mut isbns: Vec<Isbn> = misses.iter().map(|(isbn, _)| *isbn).collect();
            isbns.sort_unstable();
            debug!(?isbns, "purchase rejected, sale misses recorded");
            return Err(CatalogError::InsufficientStock { isbns });
        }

        for copy in copies {
            guards[copy.isbn].sell_copies(i64::from(copy.num_copies));
        }
        guards.release();

        debug!(count = copies.len(), "books bought");
        Ok(())
    }

    fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        let registry = self.catalog.read();
        registry.validate_isbns(isbns)?;

        let guards = self.locks.acquire_read(isbns);
        Ok(guards
            .iter()
            .map(|(isbn, _)| Book::from_descriptor(&registry[isbn]))
            .collect())
    }

    fn get_editor_picks(&self, k: i32) -> Result<Vec<Book>> {
        let k = validate_k(k)?;

        let picks: Vec<Book> = {
            let registry = self.catalog.read();
            let guards = self.locks.acquire_all_read();
            guards
                .iter()
                .filter(|(_, stock)| stock.editor_pick)
                .map(|(isbn, _)| Book::from_descriptor(&registry[isbn]))
                .collect()
        };

        let mut rng = sampling_rng(self.sampling_seed);
        Ok(sample_without_replacement(picks, k, &mut rng))
    }

    fn get_top_rated_books(&self, k: i32) -> Result<Vec<Book>> {
        let k = validate_k(k)?;

        let candidates: Vec<Rated> = {
            let registry = self.catalog.read();
            let guards = self.locks.acquire_all_read();
            guards
                .iter()
                .map(|(isbn, stock)| Rated {
                    average: stock.average_rating(),
                    book: Book::from_descriptor(&registry[isbn]),
                })
                .collect()
        };

        Ok(rank_by_rating(candidates, k))
    }

    fn rate_books(&self, ratings: &[BookRating]) -> Result<()> {
        let registry = self.catalog.read();
        registry.validate_ratings(ratings)?;

        let mut guards = self.locks.acquire_write(&isbns_of(ratings, |r| r.isbn));
        for rating in ratings {
            guards[rating.isbn].add_rating(i64::from(rating.rating));
        }
        guards.release();

        debug!(count = ratings.len(), "books rated");
        Ok(())
    }
}

impl CatalogStore for TwoLevelStore {
    fn strategy(&self) -> &'static str {
        "two_level"
    }
}
