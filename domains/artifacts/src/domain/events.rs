//! Event map: the code↔name translation table for table event scripts
//!
//! The map is built once per operation from the configured JSON document, an
//! object keyed by event codes (as strings) with display names as values.
//! The reverse direction must be unambiguous: two codes sharing a display
//! name would make a pushed file resolve to either row, so duplicates are
//! rejected at load time as a configuration error.

use std::collections::HashMap;
use std::path::Path;

use scriptsync_common::{Error, Result};

/// Validated two-way lookup between event codes and display names
#[derive(Debug, Clone, Default)]
pub struct EventMap {
    by_code: HashMap<i32, String>,
    by_name: HashMap<String, i32>,
}

impl EventMap {
    /// Build the map from (code, name) entries, validating both directions
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i32, String)>,
    {
        let mut by_code = HashMap::new();
        let mut by_name = HashMap::new();

        for (code, name) in entries {
            if let Some(previous) = by_code.insert(code, name.clone()) {
                return Err(Error::Config(format!(
                    "event code {} is mapped twice ('{}' and '{}')",
                    code, previous, name
                )));
            }
            if let Some(previous) = by_name.insert(name.clone(), code) {
                return Err(Error::Config(format!(
                    "event name '{}' is mapped to both code {} and code {}",
                    name, previous, code
                )));
            }
        }

        Ok(Self { by_code, by_name })
    }

    /// Parse the map from the event document's JSON text
    pub fn from_json(doc: &str) -> Result<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(doc)?;
        let entries = raw
            .into_iter()
            .map(|(code, name)| {
                let code = code.parse::<i32>().map_err(|_| {
                    Error::Config(format!("event code '{}' is not an integer", code))
                })?;
                Ok((code, name))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_entries(entries)
    }

    /// Load the map from the configured document path
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "events file not found in {}",
                path.display()
            )));
        }
        let doc = std::fs::read_to_string(path)?;
        Self::from_json(&doc)
    }

    /// Display name for an event code
    pub fn name_for(&self, code: i32) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    /// Event code for a display name (the push direction)
    pub fn code_for(&self, name: &str) -> Option<i32> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}
