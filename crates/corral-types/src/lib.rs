//! Shared type definitions for the Corral demo API.
//!
//! This crate holds the two entity kinds served by the store --
//! [`Capacity`] and [`Unicorn`] -- together with their creation payloads
//! ([`CapacityDraft`], [`UnicornDraft`]) and the [`Record`] trait that the
//! store is generic over.
//!
//! Payload validation lives here too, next to the types it constrains,
//! using the `validator` derive. The store itself trusts its inputs; the
//! HTTP and socket layers validate before calling in.

pub mod capacity;
pub mod record;
pub mod unicorn;

pub use capacity::{Capacity, CapacityDraft};
pub use record::{Normalize, Record};
pub use unicorn::{Unicorn, UnicornDraft};
