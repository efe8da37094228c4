//! Atomic Read Tests
//!
//! Readers must see either none or all of a multi-key write, and never
//! anything from a rejected batch.

use crate::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};

const ROUNDS: usize = 2_000;

/// Buy-all and add-all of two entries are seen as one step
#[test]
fn test_multi_key_writes_are_atomic_to_readers() {
    const M: i32 = 7;

    for shop in stocked(&[(1, M), (2, M)]) {
        let done = Arc::new(AtomicBool::new(false));
        let barrier = Arc::new(Barrier::new(2));

        let writer = {
            let shop = shop.clone();
            let done = Arc::clone(&done);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let batch = [BookCopy::new(1, M), BookCopy::new(2, M)];
                for _ in 0..ROUNDS {
                    shop.book_store().buy_books(&batch).unwrap();
                    shop.stock_manager().add_copies(&batch).unwrap();
                }
                done.store(true, Ordering::Release);
            })
        };

        let reader = {
            let shop = shop.clone();
            let done = Arc::clone(&done);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut reads = 0usize;
                while !done.load(Ordering::Acquire) || reads == 0 {
                    let copies = copies_of(&shop, &[1, 2]);
                    assert!(
                        copies == vec![0, 0] || copies == vec![i64::from(M), i64::from(M)],
                        "{:?} observed a partial batch: {:?}",
                        shop,
                        copies
                    );
                    reads += 1;
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(copies_of(&shop, &[1, 2]), vec![i64::from(M), i64::from(M)]);
    }
}

/// Full-catalog snapshots are consistent across entries too
#[test]
fn test_stock_books_snapshot_is_consistent() {
    const M: i32 = 3;

    for shop in stocked(&[(1, M), (2, M), (3, M)]) {
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let shop = shop.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let batch = [BookCopy::new(1, M), BookCopy::new(3, M)];
                for _ in 0..ROUNDS {
                    shop.book_store().buy_books(&batch).unwrap();
                    shop.stock_manager().add_copies(&batch).unwrap();
                }
                done.store(true, Ordering::Release);
            })
        };

        while !done.load(Ordering::Acquire) {
            let books = shop.stock_manager().stock_books().unwrap();
            assert_eq!(books.len(), 3);
            assert_eq!(books[0].num_copies, books[2].num_copies);
            assert_eq!(books[1].num_copies, i64::from(M));
        }
        writer.join().unwrap();
    }
}

/// A batch rejected by validation is never visible, even briefly
#[test]
fn test_rejected_batches_are_never_observed() {
    for shop in stocked(&[(1, 1), (2, 1)]) {
        let done = Arc::new(AtomicBool::new(false));

        let writer = {
            let shop = shop.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    // Valid first element, invalid last element
                    let err = shop
                        .stock_manager()
                        .add_copies(&[BookCopy::new(1, 10), BookCopy::new(2, 0)])
                        .unwrap_err();
                    assert!(!err.is_retryable());

                    let err = shop
                        .book_store()
                        .rate_books(&[BookRating::new(1, 5), BookRating::new(99, 5)])
                        .unwrap_err();
                    assert!(err.is_not_found());
                }
                done.store(true, Ordering::Release);
            })
        };

        while !done.load(Ordering::Acquire) {
            let books = shop
                .stock_manager()
                .stock_books_by_isbn(&[Isbn::new(1)])
                .unwrap();
            assert_eq!(books[0].num_copies, 1);
            assert_eq!(books[0].times_rated, 0);
        }
        writer.join().unwrap();
    }
}
