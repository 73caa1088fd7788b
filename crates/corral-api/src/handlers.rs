//! REST endpoint handlers for the Corral API.
//!
//! All handlers go through the shared [`AppState`] and its store; payload
//! validation happens here, before the store is touched, so a rejected
//! request never mutates a collection or triggers a broadcast.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/capacities` | List all capacities |
//! | `GET` | `/capacities/{id}` | Get a single capacity |
//! | `POST` | `/capacities` | Create a capacity |
//! | `PUT` | `/capacities/{id}` | Replace a capacity in full |
//! | `DELETE` | `/capacities/{id}` | Delete a capacity |
//! | `GET` | `/unicorns` | List all unicorns |
//! | `GET` | `/unicorns/{id}` | Get a single unicorn |
//! | `POST` | `/unicorns` | Create a unicorn |
//! | `PUT` | `/unicorns/{id}` | Replace a unicorn in full |
//! | `DELETE` | `/unicorns/{id}` | Delete a unicorn |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use corral_types::{Capacity, CapacityDraft, Normalize as _, Unicorn, UnicornDraft};
use tracing::info;
use validator::Validate as _;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing collection counts and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let capacity_count = state.store.capacities.len().await;
    let unicorn_count = state.store.unicorns.len().await;
    let count = state.counter.value();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Corral</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        a:hover {{ text-decoration: underline; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        hr {{ border: none; border-top: 1px solid #30363d; margin: 1.5rem 0; }}
    </style>
</head>
<body>
    <h1>Corral</h1>
    <p>Unicorn demo API</p>

    <div>
        <div class="metric">
            <div class="label">Capacities</div>
            <div class="value">{capacity_count}</div>
        </div>
        <div class="metric">
            <div class="label">Unicorns</div>
            <div class="value">{unicorn_count}</div>
        </div>
        <div class="metric">
            <div class="label">Count</div>
            <div class="value">{count}</div>
        </div>
    </div>

    <hr>

    <h2>REST</h2>
    <ul>
        <li><a href="/capacities">/capacities</a> -- GET, POST; /capacities/:id -- GET, PUT, DELETE</li>
        <li><a href="/unicorns">/unicorns</a> -- GET, POST; /unicorns/:id -- GET, PUT, DELETE</li>
        <li>/unicorns/photos/:file -- static unicorn photos</li>
    </ul>

    <h2>WebSocket</h2>
    <ul>
        <li><code>ws://host:port/ws/capacities</code> -- capacities mirror</li>
        <li><code>ws://host:port/ws/unicorns</code> -- unicorns mirror</li>
        <li><code>ws://host:port/ws/count</code> -- live counter</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// /capacities
// ---------------------------------------------------------------------------

/// List all capacities, insertion order preserved.
pub async fn list_capacities(State(state): State<Arc<AppState>>) -> Json<Vec<Capacity>> {
    Json(state.store.capacities.list().await)
}

/// Get a single capacity by id.
pub async fn get_capacity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Capacity>, ApiError> {
    Ok(Json(state.store.capacities.get(id).await?))
}

/// Create a capacity. The store assigns the id; a client-supplied id is
/// ignored.
pub async fn create_capacity(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<CapacityDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = draft.normalized();
    draft.validate()?;

    let record = state.store.capacities.create(draft).await;
    info!(id = record.id, "capacity created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Replace a capacity in full. The payload id must equal the path id.
pub async fn replace_capacity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(record): Json<Capacity>,
) -> Result<Json<Capacity>, ApiError> {
    let record = record.normalized();
    record.validate()?;

    let updated = state.store.capacities.replace(id, record).await?;
    info!(id, "capacity replaced");
    Ok(Json(updated))
}

/// Delete a capacity by id.
pub async fn delete_capacity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.store.capacities.remove(id).await?;
    info!(id, "capacity deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// /unicorns
// ---------------------------------------------------------------------------

/// List all unicorns, insertion order preserved.
pub async fn list_unicorns(State(state): State<Arc<AppState>>) -> Json<Vec<Unicorn>> {
    Json(state.store.unicorns.list().await)
}

/// Get a single unicorn by id.
pub async fn get_unicorn(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Unicorn>, ApiError> {
    Ok(Json(state.store.unicorns.get(id).await?))
}

/// Create a unicorn. The draft carries no id; a client-supplied id is
/// rejected at deserialization.
pub async fn create_unicorn(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<UnicornDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = draft.normalized();
    draft.validate()?;

    let record = state.store.unicorns.create(draft).await;
    info!(id = record.id, name = %record.name, "unicorn created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Replace a unicorn in full. The payload id must equal the path id.
pub async fn replace_unicorn(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(record): Json<Unicorn>,
) -> Result<Json<Unicorn>, ApiError> {
    let record = record.normalized();
    record.validate()?;

    let updated = state.store.unicorns.replace(id, record).await?;
    info!(id, "unicorn replaced");
    Ok(Json(updated))
}

/// Delete a unicorn by id.
pub async fn delete_unicorn(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.store.unicorns.remove(id).await?;
    info!(id, "unicorn deleted");
    Ok(StatusCode::NO_CONTENT)
}
