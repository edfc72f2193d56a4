//! Client cart and wishlist state management.
//!
//! # Architecture
//!
//! - [`CartState`] owns the in-memory cart/wishlist collections
//! - [`CartCommand`] is the full set of mutations, applied through one
//!   exhaustive reducer
//! - [`CartStore`] wraps the state behind a lock, persists a snapshot on
//!   every mutation, and notifies subscribers through a watch channel
//! - [`CartStorage`] is the durable key-value seam (file-backed in
//!   production, in-memory in tests)
//!
//! Every command is a total function: bad input degrades to a no-op with a
//! diagnostic, never an error surfaced to the UI. Persistence is
//! best-effort; when the snapshot cannot be written the store keeps
//! operating in-memory.

mod command;
mod persistence;
mod state;
mod store;

pub use command::CartCommand;
pub use persistence::{CartStorage, FileCartStorage, MemoryCartStorage, StorageError};
pub use state::{CartLine, CartSnapshot, CartState, PersistedCart, ProductSummary, WishlistEntry};
pub use store::CartStore;
