//! All-or-Nothing Tests
//!
//! A rejected batch must leave every entry exactly as it was, no matter
//! where in the batch the bad element sits.

use crate::*;
use proptest::prelude::*;

fn snapshot(shop: &Stockroom) -> Vec<StockBook> {
    shop.stock_manager().stock_books().unwrap()
}

#[test]
fn test_bad_element_anywhere_rejects_whole_add() {
    for shop in stocked(&[(1, 1)]) {
        let before = snapshot(&shop);

        let mut batch = vec![book(2, 1), book(3, 1), book(4, 1)];
        batch[2].title = "   ".to_string();
        assert_kind(&shop, shop.stock_manager().add_books(&batch), ErrorKind::InvalidArgument);

        let batch = vec![book(2, 1), book(1, 1)];
        assert_kind(&shop, shop.stock_manager().add_books(&batch), ErrorKind::AlreadyExists);

        let batch = vec![book(5, 1), book(5, 2)];
        assert_kind(&shop, shop.stock_manager().add_books(&batch), ErrorKind::AlreadyExists);

        assert_eq!(snapshot(&shop), before);
    }
}

#[test]
fn test_new_book_fields_are_validated() {
    for shop in stores() {
        let cases = vec![
            NewBook::new(0, "Title", "Author", 1.0, 1),
            NewBook::new(-3, "Title", "Author", 1.0, 1),
            NewBook::new(1, "", "Author", 1.0, 1),
            NewBook::new(1, "Title", "", 1.0, 1),
            NewBook::new(1, "Title", "Author", -0.5, 1),
            NewBook::new(1, "Title", "Author", f32::NAN, 1),
            NewBook::new(1, "Title", "Author", 1.0, 0),
            NewBook::new(1, "Title", "Author", 1.0, -2),
        ];
        for case in cases {
            assert_kind(
                &shop,
                shop.stock_manager().add_books(&[case]),
                ErrorKind::InvalidArgument,
            );
        }
        assert!(snapshot(&shop).is_empty());

        // Free books are allowed
        shop.stock_manager()
            .add_books(&[NewBook::new(1, "Title", "Author", 0.0, 1)])
            .unwrap();
    }
}

#[test]
fn test_missing_isbn_rejects_reads_and_removes() {
    for shop in stocked(&[(1, 1), (2, 1)]) {
        let before = snapshot(&shop);
        let keys = [Isbn::new(1), Isbn::new(9)];

        assert_kind(&shop, shop.stock_manager().remove_books(&keys), ErrorKind::NotFound);
        assert_kind(&shop, shop.book_store().get_books(&keys), ErrorKind::NotFound);
        assert_kind(
            &shop,
            shop.stock_manager().stock_books_by_isbn(&keys),
            ErrorKind::NotFound,
        );
        assert_kind(
            &shop,
            shop.stock_manager().remove_books(&[Isbn::new(0)]),
            ErrorKind::InvalidArgument,
        );

        assert_eq!(snapshot(&shop), before);
    }
}

#[test]
fn test_repeated_isbn_rejects_mutating_batches() {
    for shop in stocked(&[(1, 5)]) {
        let before = snapshot(&shop);

        assert_kind(
            &shop,
            shop.stock_manager()
                .add_copies(&[BookCopy::new(1, 1), BookCopy::new(1, 1)]),
            ErrorKind::InvalidArgument,
        );
        assert_kind(
            &shop,
            shop.book_store()
                .buy_books(&[BookCopy::new(1, 1), BookCopy::new(1, 1)]),
            ErrorKind::InvalidArgument,
        );
        assert_kind(
            &shop,
            shop.book_store()
                .rate_books(&[BookRating::new(1, 1), BookRating::new(1, 2)]),
            ErrorKind::InvalidArgument,
        );
        assert_kind(
            &shop,
            shop.stock_manager().update_editor_picks(&[
                BookEditorPick::new(1, true),
                BookEditorPick::new(1, false),
            ]),
            ErrorKind::InvalidArgument,
        );

        assert_eq!(snapshot(&shop), before);
    }
}

#[test]
fn test_invalid_counts_reject_before_any_change() {
    for shop in stocked(&[(1, 5), (2, 5)]) {
        let before = snapshot(&shop);

        assert_kind(
            &shop,
            shop.stock_manager()
                .add_copies(&[BookCopy::new(1, 2), BookCopy::new(2, 0)]),
            ErrorKind::InvalidArgument,
        );
        assert_kind(
            &shop,
            shop.book_store()
                .buy_books(&[BookCopy::new(1, 1), BookCopy::new(2, -1)]),
            ErrorKind::InvalidArgument,
        );
        assert_kind(
            &shop,
            shop.book_store()
                .rate_books(&[BookRating::new(1, 4), BookRating::new(2, -1)]),
            ErrorKind::InvalidArgument,
        );

        assert_eq!(snapshot(&shop), before);
    }
}

// =============================================================================
// Property Tests
// =============================================================================

const STOCKED: i32 = 4;
const INITIAL_COPIES: i32 = 3;

fn copy_batch() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-1i32..7, -1i32..6), 0..6)
}

/// Whether a copy batch passes validation against isbns `1..=STOCKED`
fn batch_is_valid(batch: &[(i32, i32)]) -> bool {
    let mut seen = std::collections::HashSet::new();
    batch
        .iter()
        .all(|(isbn, copies)| (1..=STOCKED).contains(isbn) && seen.insert(*isbn) && *copies >= 1)
}

fn fresh_stores() -> Vec<Stockroom> {
    let books: Vec<(i32, i32)> = (1..=STOCKED).map(|i| (i, INITIAL_COPIES)).collect();
    stocked(&books)
}

proptest! {
    /// Property: add_copies either applies every element or none
    #[test]
    fn prop_add_copies_is_all_or_nothing(batch in copy_batch()) {
        let copies: Vec<BookCopy> = batch.iter().map(|(i, c)| BookCopy::new(*i, *c)).collect();
        let valid = batch_is_valid(&batch);

        for shop in fresh_stores() {
            let before = snapshot(&shop);
            let result = shop.stock_manager().add_copies(&copies);
            prop_assert_eq!(result.is_ok(), valid);

            let after = snapshot(&shop);
            if valid {
                for (b, a) in before.iter().zip(&after) {
                    let added: i64 = batch
                        .iter()
                        .filter(|(i, _)| *i == b.isbn.get())
                        .map(|(_, c)| i64::from(*c))
                        .sum();
                    prop_assert_eq!(a.num_copies, b.num_copies + added);
                }
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    /// Property: buy_books sells every element or none, recording shortfalls
    #[test]
    fn prop_buy_books_is_all_or_nothing(batch in copy_batch()) {
        let copies: Vec<BookCopy> = batch.iter().map(|(i, c)| BookCopy::new(*i, *c)).collect();
        let valid = batch_is_valid(&batch);
        let short: Vec<(i32, i32)> = batch
            .iter()
            .copied()
            .filter(|(_, c)| *c > INITIAL_COPIES)
            .collect();

        for shop in fresh_stores() {
            let before = snapshot(&shop);
            let result = shop.book_store().buy_books(&copies);
            let after = snapshot(&shop);

            if !valid {
                let err = result.unwrap_err();
                prop_assert_ne!(err.kind(), ErrorKind::InsufficientStock);
                prop_assert_eq!(after, before);
            } else if !short.is_empty() {
                let mut expected: Vec<Isbn> = short.iter().map(|(i, _)| Isbn::new(*i)).collect();
                expected.sort();
                prop_assert_eq!(result, Err(CatalogError::InsufficientStock { isbns: expected }));
                for (b, a) in before.iter().zip(&after) {
                    prop_assert_eq!(a.num_copies, b.num_copies);
                    let missed = short
                        .iter()
                        .find(|(i, _)| *i == b.isbn.get())
                        .map_or(0, |(_, c)| i64::from(*c - INITIAL_COPIES));
                    prop_assert_eq!(a.sale_misses, b.sale_misses + missed);
                }
            } else {
                prop_assert!(result.is_ok());
                for (b, a) in before.iter().zip(&after) {
                    let sold = batch
                        .iter()
                        .find(|(i, _)| *i == b.isbn.get())
                        .map_or(0, |(_, c)| i64::from(*c));
                    prop_assert_eq!(a.num_copies, b.num_copies - sold);
                    prop_assert_eq!(a.sale_misses, 0);
                }
            }
        }
    }
}
