//! Single-lock store
//!
//! Baseline implementation of the catalog contracts: one read/write lock over
//! the whole registry. Reads share it; every mutation, including content-only
//! changes such as buys and ratings, takes it exclusively.
//!
//! Observable results match [`TwoLevelStore`](crate::TwoLevelStore) exactly;
//! only the achievable parallelism differs.

use parking_lot::RwLock;
use stockroom_core::{
    Book, BookCopy, BookEditorPick, BookRating, BookStore, CatalogError, CatalogStore, Entry,
    Isbn, NewBook, Result, StockBook, StockManager,
};
use stockroom_concurrency::canonical;
use tracing::debug;

use crate::registry::{validate_k, EntryRegistry};
use crate::selection::{rank_by_rating, sample_without_replacement, sampling_rng, Rated};

/// Store guarded by one store-wide read/write lock
pub struct SingleLockStore {
    catalog: RwLock<EntryRegistry<Entry>>,
    sampling_seed: Option<u64>,
}

impl SingleLockStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_sampling_seed(None)
    }

    /// Create an empty store with an optional sampling seed
    pub fn with_sampling_seed(sampling_seed: Option<u64>) -> Self {
        Self {
            catalog: RwLock::new(EntryRegistry::new()),
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
}

impl Default for SingleLockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StockManager for SingleLockStore {
    fn add_books(&self, books: &[NewBook]) -> Result<()> {
        let mut registry = self.catalog.write();
        registry.validate_new_books(books)?;

        for book in books {
            registry.insert(book.isbn, Entry::from_new_book(book));
        }

        debug!(count = books.len(), total = registry.len(), "books added");
        Ok(())
    }

    fn add_copies(&self, copies: &[BookCopy]) -> Result<()> {
        let mut registry = self.catalog.write();
        registry.validate_copies(copies)?;

        for copy in copies {
            if let Some(entry) = registry.get_mut(copy.isbn) {
                entry.stock.add_copies(i64::from(copy.num_copies));
            }
        }
        Ok(())
    }

    fn stock_books(&self) -> Result<Vec<StockBook>> {
        let registry = self.catalog.read();
        Ok(registry.iter().map(|(_, entry)| entry.stock_book()).collect())
    }

    fn stock_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        let registry = self.catalog.read();
        registry.validate_isbns(isbns)?;
        Ok(canonical(isbns)
            .into_iter()
            .map(|isbn| registry[isbn].stock_book())
            .collect())
    }

    fn update_editor_picks(&self, picks: &[BookEditorPick]) -> Result<()> {
        let mut registry = self.catalog.write();
        registry.validate_editor_picks(picks)?;

        for pick in picks {
            if let Some(entry) = registry.get_mut(pick.isbn) {
                entry.stock.editor_pick = pick.editor_pick;
            }
        }
        Ok(())
    }

    fn books_in_demand(&self) -> Result<Vec<StockBook>> {
        let registry = self.catalog.read();
        Ok(registry
            .iter()
            .filter(|(_, entry)| entry.stock.sale_misses > 0)
            .map(|(_, entry)| entry.stock_book())
            .collect())
    }

    fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        let mut registry = self.catalog.write();
        registry.validate_isbns(isbns)?;

        for isbn in isbns {
            registry.remove(*isbn);
        }

        debug!(total = registry.len(), "books removed");
        Ok(())
    }

    fn remove_all_books(&self) -> Result<()> {
        let mut registry = self.catalog.write();
        registry.clear();
        Ok(())
    }
}

impl BookStore for SingleLockStore {
    fn buy_books(&self, copies: &[BookCopy]) -> Result<()> {
        let mut registry = self.catalog.write();
        registry.validate_copies(copies)?;

        let mut misses: Vec<(Isbn, i64)> = copies
            .iter()
            .filter_map(|copy| {
                let missed = registry[copy.isbn]
                    .stock
                    .shortfall(i64::from(copy.num_copies));
                (missed > 0).then_some((copy.isbn, missed))
            })
            .collect();

        if !misses.is_empty() {
            misses.sort_unstable_by_key(|(isbn, _)| *isbn);
            for (isbn, missed) in &misses {
                if let Some(entry) = registry.get_mut(*isbn) {
                    entry.stock.add_sale_miss(*missed);
                }
            }
            let isbns: Vec<Isbn> = misses.into_iter().map(|(isbn, _)| isbn).collect();
            debug!(?isbns, "purchase rejected, sale misses recorded");
            return Err(CatalogError::InsufficientStock { isbns });
        }

        for copy in copies {
            if let Some(entry) = registry.get_mut(copy.isbn) {
                entry.stock.sell_copies(i64::from(copy.num_copies));
            }
        }
        Ok(())
    }

    fn get_books(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        let registry = self.catalog.read();
        registry.validate_isbns(isbns)?;
        Ok(canonical(isbns)
            .into_iter()
            .map(|isbn| registry[isbn].book())
            .collect())
    }

    fn get_editor_picks(&self, k: i32) -> Result<Vec<Book>> {
        let k = validate_k(k)?;

        let picks: Vec<Book> = {
            let registry = self.catalog.read();
            registry
                .iter()
                .filter(|(_, entry)| entry.stock.editor_pick)
                .map(|(_, entry)| entry.book())
                .collect()
        };

        let mut rng = sampling_rng(self.sampling_seed);
        Ok(sample_without_replacement(picks, k, &mut rng))
    }

    fn get_top_rated_books(&self, k: i32) -> Result<Vec<Book>> {
        let k = validate_k(k)?;

        let candidates: Vec<Rated> = {
            let registry = self.catalog.read();
            registry
                .iter()
                .map(|(_, entry)| Rated {
                    average: entry.stock.average_rating(),
                    book: entry.book(),
                })
                .collect()
        };

        Ok(rank_by_rating(candidates, k))
    }

    fn rate_books(&self, ratings: &[BookRating]) -> Result<()> {
        let mut registry = self.catalog.write();
        registry.validate_ratings(ratings)?;

        for rating in ratings {
            if let Some(entry) = registry.get_mut(rating.isbn) {
                entry.stock.add_rating(i64::from(rating.rating));
            }
        }
        Ok(())
    }
}

impl CatalogStore for SingleLockStore {
    fn strategy(&self) -> &'static str {
        "single_lock"
    }
}
