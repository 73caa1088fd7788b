//! Error types for store operations.

/// Errors returned by [`Collection`](crate::Collection) operations.
///
/// All errors are local to a single operation: the collection is left
/// untouched and no notification is broadcast.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record with the requested id exists in the collection.
    #[error("{collection} '{id}' not found")]
    NotFound {
        /// Name of the collection that was searched.
        collection: &'static str,
        /// The id that was not found.
        id: u64,
    },

    /// A replace payload carried a different id than the one addressed.
    ///
    /// Record ids are immutable after creation; a replacement must keep
    /// the id it targets.
    #[error("incoherent id: path addresses '{path_id}' but payload carries '{payload_id}'")]
    IdMismatch {
        /// The id addressed by the caller (the request path).
        path_id: u64,
        /// The id found inside the payload.
        payload_id: u64,
    },
}
