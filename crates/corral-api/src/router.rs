//! Axum router construction for the Corral API.
//!
//! Assembles all routes (REST + `WebSocket` + static photos) into a
//! single [`Router`] with CORS middleware enabled for cross-origin
//! dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the Corral server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET|POST /capacities`, `GET|PUT|DELETE /capacities/{id}`
/// - `GET|POST /unicorns`, `GET|PUT|DELETE /unicorns/{id}`
/// - `GET /unicorns/photos/...` -- static photo files
/// - `GET /ws/capacities`, `GET /ws/unicorns` -- mirror channels
/// - `GET /ws/count` -- counter channel
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let photos = ServeDir::new(&state.photos_dir);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // Capacities
        .route(
            "/capacities",
            get(handlers::list_capacities).post(handlers::create_capacity),
        )
        .route(
            "/capacities/{id}",
            get(handlers::get_capacity)
                .put(handlers::replace_capacity)
                .delete(handlers::delete_capacity),
        )
        // Unicorns
        .route(
            "/unicorns",
            get(handlers::list_unicorns).post(handlers::create_unicorn),
        )
        .route(
            "/unicorns/{id}",
            get(handlers::get_unicorn)
                .put(handlers::replace_unicorn)
                .delete(handlers::delete_unicorn),
        )
        // Static unicorn photos
        .nest_service("/unicorns/photos", photos)
        // WebSocket channels
        .route("/ws/capacities", get(ws::ws_capacities))
        .route("/ws/unicorns", get(ws::ws_unicorns))
        .route("/ws/count", get(ws::ws_count))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
