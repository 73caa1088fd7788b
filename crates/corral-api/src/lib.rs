//! API server for the Corral demo: REST CRUD plus live mirror channels.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **REST endpoints** for the two store collections (`/capacities`,
//!   `/unicorns`): list, get by id, create, full replace, delete
//! - **Mirror channels** (`/ws/capacities`, `/ws/unicorns`): `WebSocket`
//!   subscribers receive the full collection once on connect and again
//!   after every successful mutation, and may submit create / replace /
//!   delete frames of their own
//! - **Counter channel** (`/ws/count`): a periodic random-walk value,
//!   plus a `saw-one` client event that bumps the counter
//! - **Static photos** (`/unicorns/photos/...`) served from a directory
//! - **Minimal HTML status page** (`GET /`) with collection counts and
//!   endpoint links
//!
//! # Architecture
//!
//! All REST and socket mutations funnel into the same
//! [`corral_store::Store`] operations, so every write path produces
//! exactly one full-snapshot broadcast on the affected collection's
//! channel. `WebSocket` clients receive snapshots via a broadcast
//! channel with automatic lag handling; a slow client skips ahead and
//! never holds up a mutation.

pub mod counter;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use counter::Counter;
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
