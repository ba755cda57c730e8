//! Fetches Python sample files from a GitHub repository subfolder.
//!
//! A web URL (`https://github.com/{owner}/{repo}/tree/{ref}/{path}`) is
//! rewritten to a contents-API URL, then directories are listed recursively
//! and every `.py` file downloaded. A failed subdirectory listing is logged
//! and skipped; a failed top-level listing aborts the whole fetch.

use serde::Deserialize;
use std::thread;
use std::time::Duration;
use tracing::{debug, trace, warn};

use crate::error::FetchError;

const USER_AGENT: &str = "sample-porter";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(500);
const SOURCE_SUFFIX: &str = ".py";

/// One fetched file: repository-relative path plus content. Immutable once
/// fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub name: String,
    pub path: String,
    pub content: String,
}

pub trait SampleSource: Send + Sync {
    fn fetch_units(&self, repo_url: &str) -> Result<Vec<SourceUnit>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    entry_type: String,
    url: String,
    download_url: Option<String>,
}

/// Rewrite a GitHub web URL into a contents-API URL. Already-API URLs pass
/// through unchanged; anything else is rejected.
pub fn contents_api_url(repo_url: &str) -> Result<String, FetchError> {
    let url = repo_url.trim();

    if url.contains("api.github.com") {
        return Ok(url.to_string());
    }

    if !url.contains("github.com") {
        return Err(FetchError::invalid_url(url));
    }

    let parts = url
        .trim_start_matches("https://github.com/")
        .trim_start_matches("http://github.com/")
        .trim_end_matches('/');
    let segments: Vec<&str> = parts.split('/').collect();

    if segments.len() < 2 || segments[0].is_empty() || segments[1].is_empty() {
        return Err(FetchError::invalid_url(url));
    }

    let owner = segments[0];
    let repo = segments[1].trim_end_matches(".git");

    // `/tree/{ref}/{path}` URLs skip the tree marker and the ref segment.
    let rest = if segments.get(2) == Some(&"tree") {
        segments.get(4..).unwrap_or(&[])
    } else {
        segments.get(2..).unwrap_or(&[])
    };

    let api_path = if rest.is_empty() {
        String::new()
    } else {
        format!("/{}", rest.join("/"))
    };

    Ok(format!(
        "https://api.github.com/repos/{owner}/{repo}/contents{api_path}"
    ))
}

pub struct GithubFetcher {
    client: reqwest::blocking::Client,
    token: Option<String>,
    max_attempts: u32,
}

impl GithubFetcher {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            token: std::env::var("GITHUB_TOKEN").ok(),
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Bounded retry on transport failures and 5xx responses. 4xx responses
    /// are returned to the caller untouched; retrying those never helps.
    fn get_with_retry(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                thread::sleep(RETRY_BACKOFF * (attempt - 1));
            }

            let mut request = self.client.get(url);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            match request.send() {
                Ok(response) if response.status().is_server_error() => {
                    last_error = format!("HTTP {}", response.status().as_u16());
                    trace!(url, attempt, status = response.status().as_u16(), "retrying");
                }
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = e.to_string();
                    trace!(url, attempt, error = %e, "retrying");
                }
            }
        }

        Err(FetchError::transport(url, self.max_attempts, last_error))
    }

    fn fetch_directory(
        &self,
        api_url: &str,
        units: &mut Vec<SourceUnit>,
    ) -> Result<(), FetchError> {
        trace!(url = api_url, "listing directory");
        let response = self.get_with_retry(api_url)?;

        match response.status().as_u16() {
            404 => return Err(FetchError::not_found(api_url)),
            403 => return Err(FetchError::access_denied(api_url)),
            status if !response.status().is_success() => {
                return Err(FetchError::http_status(api_url, status));
            }
            _ => {}
        }

        let entries: Vec<ContentsEntry> = response
            .json()
            .map_err(|e| FetchError::decode(api_url, e.to_string()))?;

        for entry in entries {
            match entry.entry_type.as_str() {
                "file" if entry.name.ends_with(SOURCE_SUFFIX) => {
                    debug!(path = %entry.path, "found Python file");
                    match self.download_file(&entry) {
                        Ok(Some(unit)) => units.push(unit),
                        Ok(None) => {}
                        Err(e) => return Err(e),
                    }
                }
                "dir" => {
                    if let Err(e) = self.fetch_directory(&entry.url, units) {
                        warn!(path = %entry.path, error = %e, "skipping subdirectory");
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn download_file(&self, entry: &ContentsEntry) -> Result<Option<SourceUnit>, FetchError> {
        let Some(download_url) = &entry.download_url else {
            warn!(path = %entry.path, "file entry has no download URL, skipping");
            return Ok(None);
        };

        let response = self.get_with_retry(download_url)?;
        if !response.status().is_success() {
            warn!(
                path = %entry.path,
                status = response.status().as_u16(),
                "failed to download file, skipping"
            );
            return Ok(None);
        }

        let content = response
            .text()
            .map_err(|e| FetchError::decode(download_url, e.to_string()))?;

        Ok(Some(SourceUnit {
            name: entry.name.clone(),
            path: entry.path.clone(),
            content,
        }))
    }
}

impl Default for GithubFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for GithubFetcher {
    fn fetch_units(&self, repo_url: &str) -> Result<Vec<SourceUnit>, FetchError> {
        let api_url = contents_api_url(repo_url)?;
        debug!(url = %api_url, "fetching Python samples");

        let mut units = Vec::new();
        self.fetch_directory(&api_url, &mut units)?;

        debug!(count = units.len(), "fetched Python sample files");
        Ok(units)
    }
}
