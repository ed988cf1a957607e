//! External data sources read by membership and period blueprints
//!
//! The engine never owns or mutates these. A membership source may be live (for
//! example curricula still loading), in which case membership rule results can
//! change between calls; consistency is whatever the source's reads provide.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::compare::DateRange;

/// Read-only lookup of named value sets, keyed by `(category, identifier)`.
///
/// A category is e.g. `"major"`, an identifier a curriculum code such as
/// `"DSD24"`, and the set holds the course codes that belong to it.
pub trait MembershipSource: fmt::Debug + Send + Sync {
    /// Identifiers of every set registered under `category`.
    fn available_sets(&self, category: &str) -> Vec<String>;

    /// Whether `value` belongs to the set, or `None` if no such set exists.
    fn is_member(&self, category: &str, identifier: &str, value: &str) -> Option<bool>;

    fn has_set(&self, category: &str, identifier: &str) -> bool {
        self.available_sets(category)
            .iter()
            .any(|id| id == identifier)
    }
}

type SetsByIdentifier = HashMap<String, HashSet<String>>;

/// In-memory membership source that can be updated while rules hold it.
#[derive(Debug, Default)]
pub struct MembershipSets {
    sets: RwLock<HashMap<String, SetsByIdentifier>>,
}

impl MembershipSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `{category: {identifier: [values]}}`, the shape of a curricula file.
    pub fn from_map(map: HashMap<String, HashMap<String, Vec<String>>>) -> Self {
        let sets = map
            .into_iter()
            .map(|(category, by_id)| {
                let by_id = by_id
                    .into_iter()
                    .map(|(id, values)| (id, values.into_iter().collect()))
                    .collect();
                (category, by_id)
            })
            .collect();
        Self {
            sets: RwLock::new(sets),
        }
    }

    /// Insert or replace a whole set.
    pub fn insert_set<I, S>(&self, category: &str, identifier: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: HashSet<String> = values.into_iter().map(Into::into).collect();
        debug!(
            "Loaded {} set '{}' with {} values",
            category,
            identifier,
            values.len()
        );
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        sets.entry(category.to_string())
            .or_default()
            .insert(identifier.to_string(), values);
    }

    /// Add one value to an existing set. Returns false if the set does not exist.
    pub fn add_value(&self, category: &str, identifier: &str, value: &str) -> bool {
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        match sets.get_mut(category).and_then(|c| c.get_mut(identifier)) {
            Some(set) => {
                set.insert(value.to_string());
                true
            }
            None => false,
        }
    }

    /// Remove one value from a set. Returns true if it was present.
    pub fn remove_value(&self, category: &str, identifier: &str, value: &str) -> bool {
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        sets.get_mut(category)
            .and_then(|c| c.get_mut(identifier))
            .is_some_and(|set| set.remove(value))
    }

    pub fn remove_set(&self, category: &str, identifier: &str) -> bool {
        let mut sets = self.sets.write().unwrap_or_else(PoisonError::into_inner);
        sets.get_mut(category)
            .is_some_and(|c| c.remove(identifier).is_some())
    }
}

impl MembershipSource for MembershipSets {
    fn available_sets(&self, category: &str) -> Vec<String> {
        let sets = self.sets.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<String> = sets
            .get(category)
            .map(|c| c.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    fn is_member(&self, category: &str, identifier: &str, value: &str) -> Option<bool> {
        let sets = self.sets.read().unwrap_or_else(PoisonError::into_inner);
        sets.get(category)
            .and_then(|c| c.get(identifier))
            .map(|set| set.contains(value))
    }

    fn has_set(&self, category: &str, identifier: &str) -> bool {
        let sets = self.sets.read().unwrap_or_else(PoisonError::into_inner);
        sets.get(category)
            .is_some_and(|c| c.contains_key(identifier))
    }
}

/// An academic teaching period, e.g. "2025-26 Period II".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub id: String,
    pub name: String,
    pub academic_year: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn new(
        id: &str,
        name: &str,
        academic_year: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            academic_year: academic_year.to_string(),
            start,
            end,
        }
    }

    pub fn span(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}
