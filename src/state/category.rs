//! Bounded, deduplicated category tags

use super::FormError;
use serde::{Deserialize, Serialize};

/// Upper bound on category tags per card
pub const MAX_CATEGORIES: usize = 5;

/// Ordered set of short text tags. Append order is preserved for display;
/// values are unique by case-sensitive exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<String>);

impl CategorySet {
    /// Rebuild from restored values, dropping duplicates and anything past
    /// the cap so the invariant holds even for hand-edited snapshots.
    pub fn from_vec(values: Vec<String>) -> Self {
        let mut set = Self::default();
        for value in values {
            if set.0.len() == MAX_CATEGORIES {
                break;
            }
            if !value.is_empty() && !set.0.contains(&value) {
                set.0.push(value);
            }
        }
        set
    }

    /// Add a tag. Whitespace is trimmed first; an empty result is a silent
    /// no-op (`Ok(false)`). A full set or an exact duplicate is a rejected
    /// mutation the caller surfaces to the user.
    pub fn add(&mut self, value: &str) -> Result<bool, FormError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(false);
        }
        if self.0.len() >= MAX_CATEGORIES {
            return Err(FormError::CategorySetFull);
        }
        if self.0.iter().any(|c| c == value) {
            return Err(FormError::DuplicateCategory);
        }
        self.0.push(value.to_string());
        Ok(true)
    }

    /// Remove the first exact match. Returns whether anything changed.
    pub fn remove(&mut self, value: &str) -> bool {
        match self.0.iter().position(|c| c == value) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_CATEGORIES
    }
}
