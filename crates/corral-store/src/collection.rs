//! A single named collection of records with snapshot broadcasting.

use corral_types::Record;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use crate::error::StoreError;

/// Capacity of the per-collection broadcast channel.
///
/// If a subscriber falls behind by more than this many snapshots it will
/// receive a [`broadcast::error::RecvError::Lagged`] and skip to the
/// newest one.
const BROADCAST_CAPACITY: usize = 256;

/// Records plus the id high-water mark, guarded together so a
/// read-modify-write sequence is atomic with respect to other writers.
struct Inner<T> {
    /// All records, in insertion order.
    records: Vec<T>,
    /// The id the next `create` will assign. Never decreases.
    next_id: u64,
}

/// An ordered, in-memory collection of records.
///
/// Owns the records exclusively. Every successful mutation broadcasts
/// the full updated collection to all current subscribers; failed
/// operations broadcast nothing.
pub struct Collection<T: Record> {
    /// Collection name, used in errors and logs.
    name: &'static str,
    inner: RwLock<Inner<T>>,
    events: broadcast::Sender<Vec<T>>,
}

impl<T: Record> Collection<T> {
    /// Create an empty collection. The first assigned id is 1.
    pub fn new(name: &'static str) -> Self {
        Self::seeded(name, Vec::new())
    }

    /// Create a collection pre-populated with `records`.
    ///
    /// The id high-water mark starts just above the largest seeded id,
    /// so created records never collide with fixtures.
    pub fn seeded(name: &'static str, records: Vec<T>) -> Self {
        let max_id = records.iter().map(Record::id).max().unwrap_or(0);
        let (events, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            name,
            inner: RwLock::new(Inner {
                records,
                next_id: max_id.saturating_add(1),
            }),
            events,
        }
    }

    /// The collection's name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Current number of records.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Whether the collection holds no records.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    /// Return a snapshot of the collection, insertion order preserved.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.records.clone()
    }

    /// Look up a single record by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record carries `id`.
    pub async fn get(&self, id: u64) -> Result<T, StoreError> {
        self.inner
            .read()
            .await
            .records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(StoreError::NotFound {
                collection: self.name,
                id,
            })
    }

    /// Create a record from a draft, assigning the next id.
    ///
    /// The payload must already be validated; the store trusts its
    /// inputs. Appends the record and broadcasts the new snapshot.
    pub async fn create(&self, draft: T::Draft) -> T {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id = inner.next_id.saturating_add(1);

        let record = T::from_draft(draft, id);
        inner.records.push(record.clone());
        self.broadcast(&inner.records);
        record
    }

    /// Replace the record addressed by `id` with `record`, in full.
    ///
    /// The replacement is appended at the end of the collection rather
    /// than taking the old record's position, so insertion order is not
    /// preserved across updates. Broadcasts the new snapshot on success.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IdMismatch`] if `record` carries a
    /// different id than `id`, or [`StoreError::NotFound`] if no record
    /// with `id` exists. Either way the collection is unchanged and
    /// nothing is broadcast.
    pub async fn replace(&self, id: u64, record: T) -> Result<T, StoreError> {
        if record.id() != id {
            return Err(StoreError::IdMismatch {
                path_id: id,
                payload_id: record.id(),
            });
        }

        let mut inner = self.inner.write().await;
        if !inner.records.iter().any(|r| r.id() == id) {
            return Err(StoreError::NotFound {
                collection: self.name,
                id,
            });
        }

        inner.records.retain(|r| r.id() != id);
        inner.records.push(record.clone());
        self.broadcast(&inner.records);
        Ok(record)
    }

    /// Remove the record addressed by `id`.
    ///
    /// Broadcasts the new snapshot on success.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record with `id` exists;
    /// the collection is unchanged and nothing is broadcast.
    pub async fn remove(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.records.iter().any(|r| r.id() == id) {
            return Err(StoreError::NotFound {
                collection: self.name,
                id,
            });
        }

        inner.records.retain(|r| r.id() != id);
        self.broadcast(&inner.records);
        Ok(())
    }

    /// Subscribe to snapshot broadcasts.
    ///
    /// Returns the current snapshot together with the receiver, taken
    /// under one read lock, so the snapshot is exactly the state the
    /// first received broadcast will supersede. Subscribers never see
    /// snapshots from before they connected.
    pub async fn subscribe(&self) -> (Vec<T>, broadcast::Receiver<Vec<T>>) {
        let inner = self.inner.read().await;
        (inner.records.clone(), self.events.subscribe())
    }

    /// Publish a snapshot to all current subscribers.
    ///
    /// Returns the number of subscribers that received it. `send`
    /// errors only when there are zero receivers, which is normal when
    /// no mirror clients are connected.
    fn broadcast(&self, records: &[T]) -> usize {
        let delivered = self.events.send(records.to_vec()).unwrap_or(0);
        debug!(
            collection = self.name,
            records = records.len(),
            subscribers = delivered,
            "snapshot broadcast"
        );
        delivered
    }
}
