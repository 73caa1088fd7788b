//! `WebSocket` handlers: collection mirror channels and the counter.
//!
//! # Mirror channels
//!
//! `GET /ws/capacities` and `GET /ws/unicorns` upgrade to a `WebSocket`
//! on which the client immediately receives the full collection as a
//! JSON array, then again after every successful mutation -- whichever
//! path the mutation came in on. There is no buffering or replay: a
//! client that falls behind skips to the newest snapshot.
//!
//! Clients may also submit mutations as JSON text frames:
//!
//! ```json
//! {"action": "create",  "record": { ...draft... }}
//! {"action": "replace", "record": { ...full record... }}
//! {"action": "delete",  "id": 3}
//! ```
//!
//! Socket mutations run through the same validation and store
//! operations as HTTP requests. A rejected frame produces an
//! `{"error": ...}` reply to the sender only; other subscribers see
//! nothing until a mutation actually succeeds.
//!
//! # Counter channel
//!
//! `GET /ws/count` streams the random-walk counter as bare JSON numbers
//! at the broadcast interval. A client text frame `saw-one` bumps the
//! counter by one; the bumped value rides the next periodic broadcast.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use corral_store::Collection;
use corral_types::{Normalize, Record};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

/// Client event that bumps the counter by one.
pub const SAW_ONE_EVENT: &str = "saw-one";

/// A client-submitted mutation on a mirror channel.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum MutationFrame<D, R> {
    /// Create a record from a draft payload.
    Create {
        /// The draft to create from.
        record: D,
    },
    /// Replace the record addressed by the payload's own id.
    Replace {
        /// The full replacement record.
        record: R,
    },
    /// Delete a record by id.
    Delete {
        /// The id to delete.
        id: u64,
    },
}

/// Upgrade to the capacities mirror channel.
///
/// # Route
///
/// `GET /ws/capacities`
pub async fn ws_capacities(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        mirror_channel(socket, &state.store.capacities).await;
    })
}

/// Upgrade to the unicorns mirror channel.
///
/// # Route
///
/// `GET /ws/unicorns`
pub async fn ws_unicorns(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| async move {
        mirror_channel(socket, &state.store.unicorns).await;
    })
}

/// Upgrade to the counter channel.
///
/// # Route
///
/// `GET /ws/count`
pub async fn ws_count(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| count_channel(socket, state))
}

/// Run one mirror channel: push the current snapshot, then forward
/// every broadcast and apply client mutation frames until disconnect.
async fn mirror_channel<T>(mut socket: WebSocket, collection: &Collection<T>)
where
    T: Record + Normalize + Validate + Serialize + DeserializeOwned,
    T::Draft: Normalize + Validate + DeserializeOwned,
{
    debug!(channel = collection.name(), "mirror client connected");

    // Snapshot and receiver are taken together, so the push-on-connect
    // frame is exactly the state the first broadcast will supersede.
    let (snapshot, mut rx) = collection.subscribe().await;
    if send_snapshot(&mut socket, &snapshot).await.is_err() {
        debug!(channel = collection.name(), "mirror client disconnected (initial send failed)");
        return;
    }

    loop {
        tokio::select! {
            // A mutation broadcast from the store.
            result = rx.recv() => {
                match result {
                    Ok(records) => {
                        if send_snapshot(&mut socket, &records).await.is_err() {
                            debug!(channel = collection.name(), "mirror client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(channel = collection.name(), skipped = n, "mirror client lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!(channel = collection.name(), "broadcast channel closed, shutting down mirror");
                        return;
                    }
                }
            }
            // A frame from the client.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = apply_frame(collection, text.as_str()).await {
                            warn!(channel = collection.name(), error = %e, "socket mutation rejected");
                            let body = serde_json::json!({ "error": e.to_string() });
                            if socket.send(Message::Text(body.to_string().into())).await.is_err() {
                                return;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(channel = collection.name(), "mirror client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(channel = collection.name(), "websocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore binary and pong frames.
                    }
                }
            }
        }
    }
}

/// Serialize a snapshot and send it as one text frame.
///
/// A serialization failure is logged and swallowed; only a transport
/// failure (client gone) is returned as an error.
async fn send_snapshot<T: Serialize>(
    socket: &mut WebSocket,
    records: &[T],
) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(records) {
        Ok(j) => j,
        Err(e) => {
            warn!("failed to serialize snapshot: {e}");
            return Ok(());
        }
    };
    socket.send(Message::Text(json.into())).await
}

/// Parse and apply one client mutation frame through the store.
async fn apply_frame<T>(collection: &Collection<T>, frame: &str) -> Result<(), ApiError>
where
    T: Record + Normalize + Validate + Serialize + DeserializeOwned,
    T::Draft: Normalize + Validate + DeserializeOwned,
{
    let frame: MutationFrame<T::Draft, T> = serde_json::from_str(frame)?;
    match frame {
        MutationFrame::Create { record } => {
            let draft = record.normalized();
            draft.validate()?;
            let created = collection.create(draft).await;
            debug!(channel = collection.name(), id = created.id(), "socket create applied");
        }
        MutationFrame::Replace { record } => {
            let record = record.normalized();
            record.validate()?;
            let id = record.id();
            collection.replace(id, record).await?;
            debug!(channel = collection.name(), id, "socket replace applied");
        }
        MutationFrame::Delete { id } => {
            collection.remove(id).await?;
            debug!(channel = collection.name(), id, "socket delete applied");
        }
    }
    Ok(())
}

/// Run the counter channel: forward each broadcast value and handle
/// `saw-one` events until disconnect.
async fn count_channel(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("counter client connected");

    let mut rx = state.counter.subscribe();

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(value) => {
                        if socket.send(Message::Text(value.to_string().into())).await.is_err() {
                            debug!("counter client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(skipped = n, "counter client lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("counter broadcast closed, shutting down");
                        return;
                    }
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if text.trim() == SAW_ONE_EVENT {
                            let value = state.counter.saw_one();
                            debug!(value, "saw-one received");
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("counter client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("websocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore binary and pong frames.
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use corral_store::{Store, StoreError};
    use corral_types::Capacity;

    use super::*;

    fn store() -> Store {
        Store::with_fixtures("http://localhost:3000")
    }

    #[tokio::test]
    async fn create_frame_goes_through_the_store() {
        let store = store();
        let (_, mut rx) = store.capacities.subscribe().await;

        apply_frame(
            &store.capacities,
            r#"{"action": "create", "record": {"label": "Ghost"}}"#,
        )
        .await
        .unwrap();

        assert_eq!(store.capacities.get(5).await.unwrap().label, "Ghost");
        // Exactly one snapshot broadcast for the mutation.
        assert_eq!(rx.recv().await.unwrap().len(), 5);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn replace_frame_targets_the_payload_id() {
        let store = store();
        apply_frame(
            &store.capacities,
            r#"{"action": "replace", "record": {"id": 2, "label": "Sprint"}}"#,
        )
        .await
        .unwrap();

        let records = store.capacities.list().await;
        assert_eq!(
            records.last(),
            Some(&Capacity {
                id: 2,
                label: String::from("Sprint")
            })
        );
    }

    #[tokio::test]
    async fn delete_frame_removes_the_record() {
        let store = store();
        apply_frame(&store.capacities, r#"{"action": "delete", "id": 2}"#)
            .await
            .unwrap();

        assert_eq!(
            store.capacities.get(2).await,
            Err(StoreError::NotFound {
                collection: "capacities",
                id: 2
            })
        );
    }

    #[tokio::test]
    async fn invalid_frames_are_rejected_without_mutation() {
        let store = store();
        let (_, mut rx) = store.capacities.subscribe().await;

        // Not a mutation frame at all.
        assert!(matches!(
            apply_frame(&store.capacities, "hello").await,
            Err(ApiError::Serialization(_))
        ));
        // Fails validation.
        assert!(matches!(
            apply_frame(
                &store.capacities,
                r#"{"action": "create", "record": {"label": ""}}"#
            )
            .await,
            Err(ApiError::Validation(_))
        ));
        // Unknown id.
        assert!(matches!(
            apply_frame(&store.capacities, r#"{"action": "delete", "id": 99}"#).await,
            Err(ApiError::NotFound(_))
        ));

        assert_eq!(store.capacities.len().await, 4);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unicorn_frames_are_validated_like_http_payloads() {
        let store = store();
        let result = apply_frame(
            &store.unicorns,
            r#"{"action": "create", "record": {
                "name": "Ghost",
                "birthyear": 1700,
                "weight": 10.0,
                "photo": "",
                "hobbies": [],
                "capacities": []
            }}"#,
        )
        .await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(store.unicorns.len().await, 10);
    }
}
