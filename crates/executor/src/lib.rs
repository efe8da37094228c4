//! Command execution layer for Stockroom
//!
//! Transports do not call store methods directly. They decode a [`Command`],
//! hand it to an [`Executor`], and encode the [`Output`] or error. Each
//! command runs as exactly one store operation, which keeps request
//! atomicity intact across the transport boundary.
//!
//! Commands and outputs are serde types; the wire format is the caller's
//! choice.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
mod executor;
pub mod handlers;

pub use command::{Command, Contract, Output};
pub use executor::Executor;
