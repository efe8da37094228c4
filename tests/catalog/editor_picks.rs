//! Editor Pick Tests
//!
//! Flag updates and random sampling of flagged entries.

use std::collections::HashSet;

use crate::*;

fn flag(shop: &Stockroom, isbns: &[i32], pick: bool) {
    let picks: Vec<BookEditorPick> = isbns.iter().map(|i| BookEditorPick::new(*i, pick)).collect();
    shop.stock_manager().update_editor_picks(&picks).unwrap();
}

#[test]
fn test_update_editor_picks_sets_and_clears() {
    for shop in stocked(&[(1, 1), (2, 1), (3, 1)]) {
        flag(&shop, &[1, 3], true);
        assert!(stock_of(&shop, 1).editor_pick);
        assert!(!stock_of(&shop, 2).editor_pick);

        flag(&shop, &[3], false);
        let picks = shop.book_store().get_editor_picks(10).unwrap();
        assert_eq!(isbns(&picks), vec![1]);
    }
}

#[test]
fn test_editor_picks_are_a_distinct_subset() {
    for shop in stocked(&[(1, 1), (2, 1), (3, 1), (4, 1), (5, 1), (6, 1)]) {
        flag(&shop, &[1, 2, 4, 6], true);
        let flagged: HashSet<i32> = [1, 2, 4, 6].into_iter().collect();

        for _ in 0..20 {
            let picks = shop.book_store().get_editor_picks(3).unwrap();
            let unique: HashSet<i32> = isbns(&picks).into_iter().collect();
            assert_eq!(picks.len(), 3);
            assert_eq!(unique.len(), 3);
            assert!(unique.is_subset(&flagged));
        }
    }
}

#[test]
fn test_editor_picks_short_catalog_returns_all() {
    for shop in stocked(&[(1, 1), (2, 1), (3, 1)]) {
        flag(&shop, &[2, 3], true);
        let picks = shop.book_store().get_editor_picks(5).unwrap();
        assert_eq!(isbns(&picks), vec![2, 3]);
        assert!(shop.book_store().get_editor_picks(0).unwrap().is_empty());
    }
}

#[test]
fn test_editor_picks_reject_negative_count() {
    for shop in stores() {
        assert_kind(
            &shop,
            shop.book_store().get_editor_picks(-1),
            ErrorKind::InvalidArgument,
        );
    }
}

#[test]
fn test_seeded_sampling_matches_across_stores() {
    let books: Vec<NewBook> = (1..=30).map(|i| book(i, 1).with_editor_pick(true)).collect();
    let picks: Vec<Vec<i32>> = [
        Stockroom::builder().two_level().sampling_seed(99).open(),
        Stockroom::builder().single_lock().sampling_seed(99).open(),
    ]
    .iter()
    .map(|shop| {
        shop.stock_manager().add_books(&books).unwrap();
        isbns(&shop.book_store().get_editor_picks(6).unwrap())
    })
    .collect();

    assert_eq!(picks[0].len(), 6);
    assert_eq!(picks[0], picks[1]);
}

#[test]
fn test_flag_update_missing_isbn_changes_nothing() {
    for shop in stocked(&[(1, 1)]) {
        let result = shop.stock_manager().update_editor_picks(&[
            BookEditorPick::new(1, true),
            BookEditorPick::new(-4, true),
        ]);
        assert_kind(&shop, result, ErrorKind::InvalidArgument);
        assert!(!stock_of(&shop, 1).editor_pick);
    }
}
