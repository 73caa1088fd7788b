//! The `Capacity` entity: a named ability a unicorn can have.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::record::{Normalize, Record};

/// A capacity record as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Capacity {
    /// Unique id, assigned by the store at creation time.
    pub id: u64,
    /// Display label (e.g. "Strong").
    #[validate(length(min = 1, message = "label must not be empty"))]
    pub label: String,
}

/// Creation payload for a capacity.
///
/// Carries no id field. A client-supplied `id` key is silently ignored
/// on deserialization; the store always assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CapacityDraft {
    /// Display label for the new capacity.
    #[validate(length(min = 1, message = "label must not be empty"))]
    pub label: String,
}

impl Normalize for Capacity {}

impl Normalize for CapacityDraft {}

impl Record for Capacity {
    type Draft = CapacityDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(draft: CapacityDraft, id: u64) -> Self {
        Self {
            id,
            label: draft.label,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use validator::Validate as _;

    use super::*;

    #[test]
    fn empty_label_is_rejected() {
        let draft = CapacityDraft {
            label: String::new(),
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn client_supplied_id_is_ignored_on_create() {
        let draft: CapacityDraft =
            serde_json::from_str(r#"{"id": 99, "label": "Ghost"}"#).unwrap();
        assert_eq!(draft.label, "Ghost");

        let record = Capacity::from_draft(draft, 5);
        assert_eq!(record.id, 5);
    }
}
