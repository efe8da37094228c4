//! Concurrency Test Suite
//!
//! Multi-threaded guarantees of both store strategies:
//! - Multi-key writes are atomic to readers
//! - Rejected batches are never observed half-applied
//! - Conflicting operations serialize without losing updates
//! - Random workloads never deadlock
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test concurrency --release
//! ```

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use stockroom::prelude::*;

// Test modules
pub mod atomic_reads;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Upper bound for a test workload before it is treated as deadlocked
pub const WATCHDOG: Duration = Duration::from_secs(60);

/// One empty catalog per locking strategy
pub fn stores() -> Vec<Stockroom> {
    vec![
        Stockroom::builder().two_level().open(),
        Stockroom::builder().single_lock().open(),
    ]
}

/// A catalog preloaded with `(isbn, copies)` pairs, one per strategy
pub fn stocked(books: &[(i32, i32)]) -> Vec<Stockroom> {
    stores()
        .into_iter()
        .map(|shop| {
            let new_books: Vec<NewBook> = books
                .iter()
                .map(|(isbn, copies)| NewBook::new(*isbn, "Title", "Author", 5.0, *copies))
                .collect();
            shop.stock_manager().add_books(&new_books).unwrap();
            shop
        })
        .collect()
}

/// Copy counts of the given isbns, read as one snapshot
pub fn copies_of(shop: &Stockroom, isbns: &[i32]) -> Vec<i64> {
    let keys: Vec<Isbn> = isbns.iter().map(|i| Isbn::new(*i)).collect();
    shop.stock_manager()
        .stock_books_by_isbn(&keys)
        .unwrap()
        .iter()
        .map(|b| b.num_copies)
        .collect()
}

/// Run a workload on another thread, failing if it does not finish in time
pub fn with_watchdog<F>(name: &str, workload: F)
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        workload();
        let _ = tx.send(());
    });

    match rx.recv_timeout(WATCHDOG) {
        Ok(()) => handle.join().unwrap(),
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            // The workload panicked; surface its message
            if let Err(panic) = handle.join() {
                std::panic::resume_unwind(panic);
            }
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            panic!("{}: workload did not finish within {:?}", name, WATCHDOG)
        }
    }
}
