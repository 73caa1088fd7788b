//! The `Unicorn` entity and its payload validation.
//!
//! Validation mirrors the API contract: a non-empty name, a birthyear in
//! a plausible historical range, a photo that is either a URI or empty,
//! and duplicate-free hobby and capacity lists. Capacity references are
//! NOT checked against the capacities collection; a dangling id is
//! accepted silently.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl, ValidationError};

use crate::record::{Normalize, Record};

/// Earliest accepted birthyear.
const MIN_BIRTHYEAR: i32 = 1800;

/// A unicorn record as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Unicorn {
    /// Unique id, assigned by the store at creation time and immutable
    /// afterwards.
    pub id: u64,
    /// Display name.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Year of birth, between 1800 and the current year.
    #[validate(custom(function = birthyear_in_range))]
    pub birthyear: i32,
    /// Weight in kilograms.
    pub weight: f64,
    /// Photo URI. May be empty when no photo exists.
    #[validate(custom(function = uri_or_empty))]
    pub photo: String,
    /// Hobby labels. Trimmed on intake; duplicates are rejected.
    #[validate(custom(function = no_duplicate_hobbies))]
    pub hobbies: Vec<String>,
    /// Ids of capacities this unicorn has. Duplicates are rejected.
    #[validate(custom(function = no_duplicate_capacities))]
    pub capacities: Vec<u64>,
}

/// Creation payload for a unicorn.
///
/// Has no id field, and unknown keys are rejected on deserialization,
/// so a client-supplied `id` on create fails with a client error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UnicornDraft {
    /// Display name for the new unicorn.
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    /// Year of birth, between 1800 and the current year.
    #[validate(custom(function = birthyear_in_range))]
    pub birthyear: i32,
    /// Weight in kilograms.
    pub weight: f64,
    /// Photo URI. May be empty when no photo exists.
    #[validate(custom(function = uri_or_empty))]
    pub photo: String,
    /// Hobby labels. Trimmed on intake; duplicates are rejected.
    #[validate(custom(function = no_duplicate_hobbies))]
    pub hobbies: Vec<String>,
    /// Ids of capacities this unicorn has. Duplicates are rejected.
    #[validate(custom(function = no_duplicate_capacities))]
    pub capacities: Vec<u64>,
}

impl Normalize for Unicorn {
    /// Trim surrounding whitespace from every hobby, so validation and
    /// the store both see the values that will actually be kept.
    fn normalized(mut self) -> Self {
        self.hobbies = trim_all(self.hobbies);
        self
    }
}

impl Normalize for UnicornDraft {
    /// Trim surrounding whitespace from every hobby, so validation and
    /// the store both see the values that will actually be kept.
    fn normalized(mut self) -> Self {
        self.hobbies = trim_all(self.hobbies);
        self
    }
}

impl Record for Unicorn {
    type Draft = UnicornDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_draft(draft: UnicornDraft, id: u64) -> Self {
        Self {
            id,
            name: draft.name,
            birthyear: draft.birthyear,
            weight: draft.weight,
            photo: draft.photo,
            hobbies: draft.hobbies,
            capacities: draft.capacities,
        }
    }
}

/// Trim every entry, reallocating only the ones that change.
fn trim_all(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| {
            if v.trim().len() == v.len() {
                v
            } else {
                v.trim().to_owned()
            }
        })
        .collect()
}

/// The birthyear must fall between [`MIN_BIRTHYEAR`] and the current year.
fn birthyear_in_range(value: i32) -> Result<(), ValidationError> {
    let current_year = Utc::now().year();
    if (MIN_BIRTHYEAR..=current_year).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("birthyear_range")
            .with_message(format!("birthyear must be between {MIN_BIRTHYEAR} and {current_year}").into()))
    }
}

/// The photo field accepts a valid URI or the empty string.
fn uri_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("photo_uri")
            .with_message("photo must be a URI or empty".into()))
    }
}

/// Hobbies are a set: no entry may appear twice.
fn no_duplicate_hobbies(values: &[String]) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for value in values {
        if !seen.insert(value.as_str()) {
            return Err(ValidationError::new("duplicate_hobby")
                .with_message(format!("duplicate hobby: {value}").into()));
        }
    }
    Ok(())
}

/// Capacity references are a set: no id may appear twice.
fn no_duplicate_capacities(values: &[u64]) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(ValidationError::new("duplicate_capacity")
                .with_message(format!("duplicate capacity id: {value}").into()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> UnicornDraft {
        UnicornDraft {
            name: String::from("Baby"),
            birthyear: 2020,
            weight: 10.0,
            photo: String::from("http://localhost:3000/unicorns/photos/unicorn-1.jpg"),
            hobbies: vec![String::from("Sleep"), String::from("Cry")],
            capacities: vec![1, 2],
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn birthyear_before_1800_is_rejected() {
        let mut d = draft();
        d.birthyear = 1799;
        assert!(d.validate().is_err());
    }

    #[test]
    fn birthyear_in_the_future_is_rejected() {
        let mut d = draft();
        d.birthyear = Utc::now().year() + 1;
        assert!(d.validate().is_err());
    }

    #[test]
    fn empty_photo_is_accepted() {
        let mut d = draft();
        d.photo = String::new();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn non_uri_photo_is_rejected() {
        let mut d = draft();
        d.photo = String::from("not a uri");
        assert!(d.validate().is_err());
    }

    #[test]
    fn duplicate_hobbies_are_rejected() {
        let mut d = draft();
        d.hobbies = vec![String::from("Sleep"), String::from("Sleep")];
        assert!(d.validate().is_err());
    }

    #[test]
    fn hobbies_duplicated_after_trimming_are_rejected() {
        let mut d = draft();
        d.hobbies = vec![String::from("Sleep"), String::from(" Sleep ")];
        let d = d.normalized();
        assert_eq!(d.hobbies, vec!["Sleep", "Sleep"]);
        assert!(d.validate().is_err());
    }

    #[test]
    fn duplicate_capacity_refs_are_rejected() {
        let mut d = draft();
        d.capacities = vec![3, 3];
        assert!(d.validate().is_err());
    }

    #[test]
    fn dangling_capacity_ref_is_accepted() {
        let mut d = draft();
        d.capacities = vec![9999];
        assert!(d.validate().is_ok());
    }

    #[test]
    fn client_supplied_id_on_create_is_rejected() {
        let json = r#"{
            "id": 42,
            "name": "Baby",
            "birthyear": 2020,
            "weight": 10.0,
            "photo": "",
            "hobbies": [],
            "capacities": []
        }"#;
        assert!(serde_json::from_str::<UnicornDraft>(json).is_err());
    }
}
