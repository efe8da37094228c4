//! Per-key lock table
//!
//! Owns one read/write lock per live key. Each lock owns the mutable content
//! of its entry, so holding a guard is the only way to see or change it.
//!
//! ## Concurrency Contract
//!
//! - `register` / `unregister` / `clear` mutate the slot map. Callers invoke
//!   them only while holding the store's structural lock exclusively, so no
//!   thread can be mid-acquisition on a key that is being destroyed.
//! - `acquire_read` / `acquire_write` may run concurrently from any number
//!   of threads holding the structural lock shared.
//! - The slot map is guarded by its own mutex, separate from the structural
//!   lock. That mutex is held only to look up slot handles and is released
//!   before blocking on any per-key lock.
//!
//! ## Deadlock Avoidance
//!
//! Every multi-key acquisition dedupes and sorts its keys first, then locks
//! them in ascending order. Since all threads follow the same global order,
//! no cycle of waiters can form.
//!
//! ## Release
//!
//! Guard sets release their locks on drop. Early returns, `?` propagation
//! and unwinding all release every lock taken by the set.
//!
//! ## Contract Violations
//!
//! Asking for a key with no registered slot is a bug in the caller (the store
//! validates every key before locking). It panics rather than returning an
//! error.

use parking_lot::lock_api::{ArcRwLockReadGuard, ArcRwLockWriteGuard};
use parking_lot::{Mutex, RawRwLock, RwLock};
use rustc_hash::FxHashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

type Slot<V> = Arc<RwLock<V>>;

/// Table of per-key read/write locks
pub struct LockTable<K, V> {
    /// Slot map, guarded by the table's own mutex
    slots: Mutex<FxHashMap<K, Slot<V>>>,
}

impl<K, V> LockTable<K, V>
where
    K: Copy + Ord + Hash + Debug,
{
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(FxHashMap::default()),
        }
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// Check if no key is registered
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// Check if a key has a lock slot
    pub fn contains(&self, key: &K) -> bool {
        self.slots.lock().contains_key(key)
    }

    /// Registered keys in canonical order
    pub fn keys(&self) -> Vec<K> {
        let mut keys: Vec<K> = self.slots.lock().keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    // ========================================================================
    // Slot lifecycle (structural lock held exclusively)
    // ========================================================================

    /// Create lock slots holding the given initial content
    ///
    /// # Panics
    ///
    /// Panics if a key is already registered.
    pub fn register(&self, entries: impl IntoIterator<Item = (K, V)>) {
        let mut slots = self.slots.lock();
        for (key, value) in entries {
            let previous = slots.insert(key, Arc::new(RwLock::new(value)));
            assert!(
                previous.is_none(),
                "lock table: key {:?} registered twice",
                key
            );
        }
        tracing::trace!(registered = slots.len(), "lock slots registered");
    }

    /// Destroy the lock slots of the given keys, returning their content
    ///
    /// # Panics
    ///
    /// Panics if a key is not registered.
    pub fn unregister(&self, keys: &[K]) -> Vec<(K, V)>
    where
        V: Clone,
    {
        let mut slots = self.slots.lock();
        let mut removed = Vec::with_capacity(keys.len());
        for key in canonical(keys) {
            let slot = slots.remove(&key).unwrap_or_else(|| missing_slot(&key));
            // With the structural lock held exclusively nobody else holds a
            // handle, so the content can usually be moved out.
            let value = match Arc::try_unwrap(slot) {
                Ok(lock) => lock.into_inner(),
                Err(shared) => shared.read().clone(),
            };
            removed.push((key, value));
        }
        tracing::trace!(remaining = slots.len(), "lock slots unregistered");
        removed
    }

    /// Destroy every lock slot
    pub fn clear(&self) {
        self.slots.lock().clear();
    }

    // ========================================================================
    // Acquisition (structural lock held, shared or exclusive)
    // ========================================================================

    /// Take shared locks on every key, in canonical order
    pub fn acquire_read(&self, keys: &[K]) -> ReadGuards<K, V> {
        let handles = self.handles(&canonical(keys));
        let guards = handles
            .into_iter()
            .map(|(key, slot)| (key, slot.read_arc()))
            .collect();
        ReadGuards { guards }
    }

    /// Take exclusive locks on every key, in canonical order
    pub fn acquire_write(&self, keys: &[K]) -> WriteGuards<K, V> {
        let handles = self.handles(&canonical(keys));
        let guards = handles
            .into_iter()
            .map(|(key, slot)| (key, slot.write_arc()))
            .collect();
        WriteGuards { guards }
    }

    /// Take shared locks on every registered key
    pub fn acquire_all_read(&self) -> ReadGuards<K, V> {
        let handles = {
            let slots = self.slots.lock();
            let mut handles: Vec<(K, Slot<V>)> = slots
                .iter()
                .map(|(key, slot)| (*key, Arc::clone(slot)))
                .collect();
            handles.sort_unstable_by_key(|(key, _)| *key);
            handles
        };
        let guards = handles
            .into_iter()
            .map(|(key, slot)| (key, slot.read_arc()))
            .collect();
        ReadGuards { guards }
    }

    /// Clone slot handles for sorted keys; the table mutex is released on return
    fn handles(&self, sorted: &[K]) -> Vec<(K, Slot<V>)> {
        let slots = self.slots.lock();
        sorted
            .iter()
            .map(|key| {
                let slot = slots.get(key).unwrap_or_else(|| missing_slot(key));
                (*key, Arc::clone(slot))
            })
            .collect()
    }
}

impl<K, V> Default for LockTable<K, V>
where
    K: Copy + Ord + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Dedupe and sort keys into the global acquisition order
pub fn canonical<K: Copy + Ord>(keys: &[K]) -> Vec<K> {
    let mut sorted = keys.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

#[cold]
fn missing_slot<K: Debug>(key: &K) -> ! {
    panic!("lock table: no lock registered for key {:?}", key)
}

#[cold]
fn not_locked<K: Debug>(key: &K) -> ! {
    panic!("lock table: key {:?} is not held by this guard set", key)
}

// ============================================================================
// Guard sets
// ============================================================================

/// Shared locks on a set of keys, released on drop
pub struct ReadGuards<K, V> {
    /// Sorted by key
    guards: Vec<(K, ArcRwLockReadGuard<RawRwLock, V>)>,
}

impl<K: Copy + Ord, V> ReadGuards<K, V> {
    /// Content of a locked key
    pub fn get(&self, key: &K) -> Option<&V> {
        self.guards
            .binary_search_by(|(k, _)| k.cmp(key))
            .ok()
            .map(|idx| &*self.guards[idx].1)
    }

    /// Locked entries in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.guards.iter().map(|(key, guard)| (*key, &**guard))
    }

    /// Number of locks held
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Check if no lock is held
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Release every lock now
    pub fn release(self) {
        drop(self);
    }
}

impl<K: Copy + Ord + Debug, V> Index<K> for ReadGuards<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        self.get(&key).unwrap_or_else(|| not_locked(&key))
    }
}

/// Exclusive locks on a set of keys, released on drop
pub struct WriteGuards<K, V> {
    /// Sorted by key
    guards: Vec<(K, ArcRwLockWriteGuard<RawRwLock, V>)>,
}

impl<K: Copy + Ord, V> WriteGuards<K, V> {
    fn position(&self, key: &K) -> Option<usize> {
        self.guards.binary_search_by(|(k, _)| k.cmp(key)).ok()
    }

    /// Content of a locked key
    pub fn get(&self, key: &K) -> Option<&V> {
        self.position(key).map(|idx| &*self.guards[idx].1)
    }

    /// Mutable content of a locked key
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.position(key).map(|idx| &mut *self.guards[idx].1)
    }

    /// Locked entries in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.guards.iter().map(|(key, guard)| (*key, &**guard))
    }

    /// Number of locks held
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Check if no lock is held
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Release every lock now
    pub fn release(self) {
        drop(self);
    }
}

impl<K: Copy + Ord + Debug, V> Index<K> for WriteGuards<K, V> {
    type Output = V;

    fn index(&self, key: K) -> &V {
        self.get(&key).unwrap_or_else(|| not_locked(&key))
    }
}

impl<K: Copy + Ord + Debug, V> IndexMut<K> for WriteGuards<K, V> {
    fn index_mut(&mut self, key: K) -> &mut V {
        match self.position(&key) {
            Some(idx) => &mut *self.guards[idx].1,
            None => not_locked(&key),
        }
    }
}
