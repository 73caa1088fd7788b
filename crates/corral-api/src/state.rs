//! Shared application state for the API server.
//!
//! [`AppState`] bundles the resource store, the live counter, and the
//! static photo directory. It is created once by the process entry
//! point, wrapped in an [`Arc`], and injected into handlers via Axum's
//! `State` extractor -- no ambient or static state anywhere.

use std::path::PathBuf;
use std::sync::Arc;

use corral_store::Store;

use crate::counter::Counter;

/// Shared state for the Axum application.
pub struct AppState {
    /// The resource store owning both collections.
    pub store: Arc<Store>,
    /// The random-walk counter broadcast on `/ws/count`.
    pub counter: Counter,
    /// Directory the unicorn photos are served from.
    pub photos_dir: PathBuf,
}

impl AppState {
    /// Bundle the store, counter, and photo directory into app state.
    pub fn new(store: Arc<Store>, counter: Counter, photos_dir: PathBuf) -> Self {
        Self {
            store,
            counter,
            photos_dir,
        }
    }
}
