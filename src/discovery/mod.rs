//! Best-effort discovery of method-name mappings from API documentation.
//!
//! Discovery never fails conversion: network errors, bad status codes and
//! unrecognizable pages all degrade to an empty `MappingSet` with a warning.
//! Discovered names are only required to be well-formed identifiers; the
//! Python-side key is guessed by snake_casing the discovered name.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

use crate::mappings::MappingSet;

const USER_AGENT: &str = "sample-porter";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cap on discovered methods, to keep a sprawling docs page from
/// overwhelming the mapping set.
const MAX_DISCOVERED_METHODS: usize = 50;
const MAX_NAME_LEN: usize = 50;

static METHOD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Headers with method names
        r"(?i)<h[2-4][^>]*>([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
        // Code blocks with methods
        r"(?i)<code[^>]*>([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
        // Function definitions
        r"(?i)function\s+([a-zA-Z_][a-zA-Z0-9_]*)\s*\(",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("method pattern is valid"))
    .collect()
});

pub trait MethodDiscoverer: Send + Sync {
    fn discover(&self, docs_url: &str) -> MappingSet;
}

/// Fetches a documentation page and scrapes candidate method names out of
/// the raw HTML with a handful of regex shapes. Intentionally heuristic.
pub struct HtmlDocsDiscoverer {
    client: reqwest::blocking::Client,
}

impl HtmlDocsDiscoverer {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HtmlDocsDiscoverer {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodDiscoverer for HtmlDocsDiscoverer {
    fn discover(&self, docs_url: &str) -> MappingSet {
        if docs_url.is_empty() {
            return MappingSet::new();
        }

        debug!(url = docs_url, "fetching API documentation");

        let response = match self.client.get(docs_url).send() {
            Ok(response) => response,
            Err(e) => {
                warn!(url = docs_url, error = %e, "failed to fetch API docs");
                return MappingSet::new();
            }
        };

        if !response.status().is_success() {
            warn!(
                url = docs_url,
                status = response.status().as_u16(),
                "failed to fetch API docs"
            );
            return MappingSet::new();
        }

        let body = match response.text() {
            Ok(body) => body,
            Err(e) => {
                warn!(url = docs_url, error = %e, "failed to read API docs body");
                return MappingSet::new();
            }
        };

        let mappings = extract_method_mappings(&body);
        debug!(count = mappings.len(), "discovered API method mappings");
        mappings
    }
}

/// Extract candidate method names from HTML and key them by their guessed
/// Python-side spelling. Duplicates are dropped, first occurrence wins.
pub fn extract_method_mappings(html: &str) -> MappingSet {
    let mut seen = HashSet::new();
    let mut mappings = MappingSet::new();

    for pattern in METHOD_PATTERNS.iter() {
        for capture in pattern.captures_iter(html) {
            let name = &capture[1];
            if name.len() >= MAX_NAME_LEN || !seen.insert(name.to_string()) {
                continue;
            }

            let key = snake_case(name);
            if !mappings.contains(&key) {
                mappings.insert(key, name);
            }
            // Already snake_case names map to themselves through the line
            // above; camelCase names additionally hit on the exact spelling.
            if !mappings.contains(name) {
                mappings.insert(name, name);
            }

            if seen.len() >= MAX_DISCOVERED_METHODS {
                return mappings;
            }
        }
    }

    mappings
}

/// Guess the Python spelling of a camelCase identifier.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
