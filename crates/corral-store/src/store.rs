//! The process-wide store context holding both collections.

use corral_types::{Capacity, Unicorn};

use crate::collection::Collection;
use crate::fixtures;

/// Channel / collection name for capacities.
pub const CAPACITIES: &str = "capacities";
/// Channel / collection name for unicorns.
pub const UNICORNS: &str = "unicorns";

/// The two named collections, owned together.
///
/// This is the explicit context object the process entry point creates
/// and hands to every handler and notifier -- there is no ambient or
/// static state. Wrap it in an `Arc` to share.
pub struct Store {
    /// The capacities collection.
    pub capacities: Collection<Capacity>,
    /// The unicorns collection.
    pub unicorns: Collection<Unicorn>,
}

impl Store {
    /// Create a store with two empty collections.
    pub fn new() -> Self {
        Self {
            capacities: Collection::new(CAPACITIES),
            unicorns: Collection::new(UNICORNS),
        }
    }

    /// Create a store seeded with the demo fixtures.
    ///
    /// `base_url` is the public URL prefix used to build the fixture
    /// unicorns' photo links.
    pub fn with_fixtures(base_url: &str) -> Self {
        Self {
            capacities: Collection::seeded(CAPACITIES, fixtures::capacities()),
            unicorns: Collection::seeded(UNICORNS, fixtures::unicorns(base_url)),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
