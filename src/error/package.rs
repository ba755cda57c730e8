use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("failed to create output file '{path}': {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create output directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write entry '{name}': {message}")]
    WriteEntry { name: String, message: String },

    #[error("failed to finalize archive '{path}': {message}")]
    Finalize { path: PathBuf, message: String },
}

impl PackageError {
    pub fn create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Create {
            path: path.into(),
            source,
        }
    }

    pub fn create_directory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDirectory {
            path: path.into(),
            source,
        }
    }

    pub fn write_entry(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriteEntry {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn finalize(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Finalize {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_display() {
        let io_err = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = PackageError::create("/tmp/out.zip", io_err);
        assert!(err.to_string().contains("failed to create output file"));
        assert!(err.to_string().contains("/tmp/out.zip"));
    }

    #[test]
    fn test_write_entry_display() {
        let err = PackageError::write_entry("sample.js", "disk full");
        assert_eq!(
            err.to_string(),
            "failed to write entry 'sample.js': disk full"
        );
    }
}
