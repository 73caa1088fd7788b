//! In-memory resource store with change notification for the Corral API.
//!
//! This crate is the single owner of the two record collections
//! (capacities, unicorns). Every mutation -- create, replace, delete --
//! goes through [`Collection`], which holds the records behind a
//! [`tokio::sync::RwLock`] and re-publishes the *entire* collection to
//! every subscriber after each successful write via a
//! [`tokio::sync::broadcast`] channel.
//!
//! # Design
//!
//! - **Single write path**: HTTP handlers and socket-originated mutations
//!   call the same five operations; nothing else touches the records.
//! - **Full-snapshot notification**: no diffing, no per-record events.
//!   Each broadcast carries the whole updated collection.
//! - **Fire-and-forget delivery**: zero subscribers is not an error, and
//!   a lagged subscriber skips ahead to the newest snapshot.
//! - **Monotonic ids**: each collection keeps a high-water mark, so an id
//!   is never reused, even after the record holding the maximum id is
//!   deleted.
//! - **No partial commits**: an operation either mutates the collection
//!   and broadcasts exactly once, or fails and leaves both untouched.

pub mod collection;
pub mod error;
pub mod fixtures;
pub mod store;

pub use collection::Collection;
pub use error::StoreError;
pub use store::Store;
