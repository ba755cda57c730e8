//! Packaging of converted units: a single ZIP archive or a directory tree
//! mirroring the source-relative paths.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::PackageError;

use super::ConvertedUnit;

pub fn write_zip(units: &[ConvertedUnit], path: &Path) -> Result<(), PackageError> {
    debug!(count = units.len(), path = %path.display(), "writing archive");

    let file = File::create(path).map_err(|e| PackageError::create(path, e))?;
    let mut writer = ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for unit in units {
        writer
            .start_file(&unit.target_path, options)
            .map_err(|e| PackageError::write_entry(&unit.target_path, e.to_string()))?;
        writer
            .write_all(unit.text.as_bytes())
            .map_err(|e| PackageError::write_entry(&unit.target_path, e.to_string()))?;
    }

    writer
        .finish()
        .map_err(|e| PackageError::finalize(path, e.to_string()))?;

    debug!(path = %path.display(), "archive written");
    Ok(())
}

pub fn write_directory(units: &[ConvertedUnit], dir: &Path) -> Result<(), PackageError> {
    debug!(count = units.len(), path = %dir.display(), "writing directory tree");

    fs::create_dir_all(dir).map_err(|e| PackageError::create_directory(dir, e))?;

    for unit in units {
        let target = dir.join(sanitize_relative(&unit.target_path));
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| PackageError::create_directory(parent, e))?;
        }
        fs::write(&target, &unit.text)
            .map_err(|e| PackageError::write_entry(&unit.target_path, e.to_string()))?;
    }

    Ok(())
}

/// Strip root and parent components so an entry can never escape the
/// output directory.
fn sanitize_relative(path: &str) -> PathBuf {
    Path::new(path)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}
