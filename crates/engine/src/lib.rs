//! Store engine for Stockroom
//!
//! This crate provides the store coordinators and everything they share:
//! - TwoLevelStore: Structural lock plus per-key locks
//! - SingleLockStore: One store-wide lock, used as a baseline
//! - EntryRegistry: Key-to-entry map and request validation
//! - selection: Editor-pick sampling and top-rated ranking
//! - StoreConfig: Locking mode and sampling seed
//!
//! Both stores implement [`CatalogStore`], so [`open`] can hand out either one
//! behind the same trait object.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod registry;
pub mod selection;
pub mod single_lock;
pub mod two_level;

use std::sync::Arc;

use stockroom_core::CatalogStore;

pub use config::{ConfigError, LockingMode, StoreConfig};
pub use registry::EntryRegistry;
pub use single_lock::SingleLockStore;
pub use two_level::TwoLevelStore;

/// Create an empty store for the given configuration
pub fn open(config: &StoreConfig) -> Arc<dyn CatalogStore> {
    tracing::info!(
        locking = config.locking.as_str(),
        seeded = config.sampling_seed.is_some(),
        "opening catalog store"
    );
    match config.locking {
        LockingMode::TwoLevel => Arc::new(TwoLevelStore::with_sampling_seed(config.sampling_seed)),
        LockingMode::SingleLock => {
            Arc::new(SingleLockStore::with_sampling_seed(config.sampling_seed))
        }
    }
}
