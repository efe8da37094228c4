//! Result selection for editor picks and top-rated queries
//!
//! Both queries first snapshot their candidates under the store's locks, then
//! select from the snapshot with no lock held.
//!
//! Sampling uses a random source created for the call, never shared state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stockroom_core::{Book, Isbn};

/// Random source for one sampling call
///
/// A configured seed makes selection reproducible; otherwise the generator is
/// seeded from OS entropy.
pub fn sampling_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Pick `k` distinct items uniformly at random, without replacement
///
/// Returns every item when there are no more than `k`. Picked items keep
/// their relative input order.
pub fn sample_without_replacement<T, R>(items: Vec<T>, k: usize, rng: &mut R) -> Vec<T>
where
    R: Rng + ?Sized,
{
    if items.len() <= k {
        return items;
    }

    let mut picked = rand::seq::index::sample(rng, items.len(), k).into_vec();
    picked.sort_unstable();

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    picked
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}

/// Candidate for top-rated ranking
#[derive(Debug, Clone)]
pub struct Rated {
    /// Average rating, or the unrated sentinel
    pub average: f32,
    /// Snapshot returned to the caller
    pub book: Book,
}

impl Rated {
    fn isbn(&self) -> Isbn {
        self.book.isbn
    }
}

/// Best `k` candidates by average rating, highest first
///
/// Unrated entries carry the -1 sentinel, so they rank below every rated
/// entry. Equal averages are ordered by ascending isbn.
pub fn rank_by_rating(mut candidates: Vec<Rated>, k: usize) -> Vec<Book> {
    candidates.sort_by(|a, b| {
        b.average
            .total_cmp(&a.average)
            .then_with(|| a.isbn().cmp(&b.isbn()))
    });
    candidates.truncate(k);
    candidates.into_iter().map(|rated| rated.book).collect()
}
