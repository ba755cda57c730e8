//! Identifier translation tables for known JavaScript libraries.
//!
//! A `MappingSet` is the merged view the transducer consults: discovered
//! documentation mappings layered over the bundled library table, most
//! specific source winning. Absence of a mapping is a valid empty result,
//! never an error.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, trace};

const DEFAULT_LIBRARY: &str = "default";

/// Bundled library tables, compiled into the binary.
const BUNDLED_TABLES: &[&str] = &[
    include_str!("../../rules/azure-ai-agents.json"),
    include_str!("../../rules/azure-openai.json"),
    include_str!("../../rules/default.json"),
];

#[derive(Debug, Deserialize)]
struct LibraryTableFile {
    #[allow(dead_code)]
    version: String,
    library: String,
    mappings: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingSet {
    entries: HashMap<String, String>,
}

impl MappingSet {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn insert(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.entries.insert(from.into(), to.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Layer `other` underneath this set: entries already present win.
    pub fn merge_fallback(&mut self, other: &MappingSet) {
        for (from, to) in &other.entries {
            self.entries
                .entry(from.clone())
                .or_insert_with(|| to.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

static BUILTIN_TABLES: Lazy<HashMap<String, MappingSet>> = Lazy::new(|| {
    BUNDLED_TABLES
        .iter()
        .map(|raw| {
            let file: LibraryTableFile =
                serde_json::from_str(raw).expect("bundled library table is valid JSON");
            trace!(library = %file.library, count = file.mappings.len(), "loaded bundled table");
            (file.library, MappingSet::from_entries(file.mappings))
        })
        .collect()
});

/// Built-in mapping table for `library`. Unknown libraries fall back to the
/// default table.
pub fn builtin_for_library(library: &str) -> MappingSet {
    match BUILTIN_TABLES.get(library) {
        Some(set) => {
            debug!(library, count = set.len(), "using bundled library table");
            set.clone()
        }
        None => {
            debug!(library, "no bundled table, using default");
            BUILTIN_TABLES
                .get(DEFAULT_LIBRARY)
                .cloned()
                .unwrap_or_default()
        }
    }
}

/// Merge discovered mappings over the built-in table for `library`.
/// Discovered entries win on key collisions.
pub fn resolve(library: &str, discovered: MappingSet) -> MappingSet {
    let mut merged = discovered;
    merged.merge_fallback(&builtin_for_library(library));
    debug!(library, count = merged.len(), "resolved mapping set");
    merged
}
