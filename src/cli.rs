use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

pub const DEFAULT_LIBRARY: &str = "@azure/ai-agents";
pub const DEFAULT_OUTPUT: &str = "js-samples.zip";

#[derive(Parser, Debug)]
#[command(name = "sample-porter")]
#[command(about = "Convert Python code samples from a GitHub repository to JavaScript", long_about = None)]
pub struct Args {
    /// URL to a GitHub repository subfolder containing Python samples
    #[arg(value_name = "REPO_URL")]
    pub repo_url: String,

    /// JavaScript library name to target
    #[arg(short, long, default_value = DEFAULT_LIBRARY)]
    pub library: String,

    /// URL to API reference documentation for the JavaScript library
    #[arg(short, long, value_name = "URL")]
    pub docs: Option<String>,

    /// Output file (.zip) or directory path
    #[arg(short, long, default_value = DEFAULT_OUTPUT, value_name = "PATH")]
    pub output: PathBuf,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output destination, decided by the path's extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Archive(PathBuf),
    Directory(PathBuf),
}

impl OutputTarget {
    pub fn from_path(path: &Path) -> Self {
        if path.extension().and_then(|e| e.to_str()) == Some("zip") {
            Self::Archive(path.to_path_buf())
        } else {
            Self::Directory(path.to_path_buf())
        }
    }
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if self.repo_url.trim().is_empty() {
            anyhow::bail!("Repository URL must not be empty");
        }
        if !self.repo_url.contains("github.com") {
            anyhow::bail!(
                "Unsupported URL format: {} (expected a GitHub repository URL)",
                self.repo_url
            );
        }
        if let Some(docs) = &self.docs {
            if !docs.starts_with("http://") && !docs.starts_with("https://") {
                anyhow::bail!("Documentation URL must be an http(s) URL: {docs}");
            }
        }
        if self.library.trim().is_empty() {
            anyhow::bail!("Library name must not be empty");
        }
        Ok(())
    }

    pub fn output_target(&self) -> OutputTarget {
        OutputTarget::from_path(&self.output)
    }
}
