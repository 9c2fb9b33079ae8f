//! Case control: subcases and their set selections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Subcase ID reserved for global defaults
pub const GLOBAL_SUBCASE: i32 = 0;

/// Set selection for one case-control key: set ID plus free-form options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseEntry {
    pub set_id: i32,
    #[serde(default)]
    pub options: Vec<String>,
}

/// A subcase: case-control keys (`SPC`, `LOAD`, ...) mapped to set selections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Subcase {
    /// Subcase ID (0 holds the global defaults)
    pub id: i32,
    /// Entries keyed by upper-case case-control key
    #[serde(default)]
    pub entries: BTreeMap<String, CaseEntry>,
}

impl Subcase {
    /// Create an empty subcase
    pub fn new(id: i32) -> Self {
        Self {
            id,
            entries: BTreeMap::new(),
        }
    }

    /// Add a `key = set_id` selection; keys are case-insensitive
    pub fn with(mut self, key: &str, set_id: i32) -> Self {
        self.insert(key, set_id, Vec::new());
        self
    }

    /// Insert a selection with options
    pub fn insert(&mut self, key: &str, set_id: i32, options: Vec<String>) {
        self.entries
            .insert(key.to_ascii_uppercase(), CaseEntry { set_id, options });
    }

    /// Look up a key, yielding `(set_id, options)`
    pub fn get(&self, key: &str) -> Option<(i32, &[String])> {
        self.entries
            .get(&key.to_ascii_uppercase())
            .map(|e| (e.set_id, e.options.as_slice()))
    }

    /// Whether the key is present
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_uppercase())
    }

    /// This subcase with every key it lacks filled in from `defaults`
    pub fn overlay_on(&self, defaults: &Subcase) -> Subcase {
        let mut entries = defaults.entries.clone();
        entries.extend(self.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        Subcase {
            id: self.id,
            entries,
        }
    }
}
