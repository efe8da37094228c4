//! Concurrency layer for Stockroom
//!
//! This crate implements the per-key half of the two-level locking protocol:
//! - LockTable: One read/write lock per live key, owning that key's content
//! - ReadGuards / WriteGuards: Locks on a key set, taken in canonical order
//!   and released on drop
//!
//! The structural half (one process-wide read/write lock) lives with the
//! store that owns the entry registry.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod lock_table;

pub use lock_table::{canonical, LockTable, ReadGuards, WriteGuards};
