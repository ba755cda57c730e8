use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("unsupported URL format: {url} (expected a GitHub repository URL)")]
    InvalidUrl { url: String },

    #[error("repository or path not found: {url}")]
    NotFound { url: String },

    #[error("access denied or rate limited: {url}")]
    AccessDenied { url: String },

    #[error("HTTP {status} fetching '{url}'")]
    HttpStatus { url: String, status: u16 },

    #[error("request to '{url}' failed after {attempts} attempts: {message}")]
    Transport {
        url: String,
        attempts: u32,
        message: String,
    },

    #[error("failed to decode response from '{url}': {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }

    pub fn access_denied(url: impl Into<String>) -> Self {
        Self::AccessDenied { url: url.into() }
    }

    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    pub fn transport(url: impl Into<String>, attempts: u32, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            attempts,
            message: message.into(),
        }
    }

    pub fn decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            message: message.into(),
        }
    }
}
