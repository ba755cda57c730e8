use serde::Serialize;
use std::fmt::Write as _;

use super::ConvertedUnit;

/// Per-batch conversion report, rendered for the CLI and serializable for
/// programmatic callers.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub files_converted: usize,
    pub total_annotations: usize,
    pub files: Vec<FileSummary>,
}

#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub source_path: String,
    pub target_path: String,
    pub annotations: usize,
}

impl BatchSummary {
    pub fn from_units(units: &[ConvertedUnit]) -> Self {
        let files: Vec<FileSummary> = units
            .iter()
            .map(|unit| FileSummary {
                source_path: unit.source_path.clone(),
                target_path: unit.target_path.clone(),
                annotations: unit.annotations.len(),
            })
            .collect();

        Self {
            files_converted: files.len(),
            total_annotations: files.iter().map(|f| f.annotations).sum(),
            files,
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Converted {} file(s)", self.files_converted);

        for file in &self.files {
            if file.annotations > 0 {
                let _ = writeln!(
                    out,
                    "  {} -> {} ({} line(s) need review)",
                    file.source_path, file.target_path, file.annotations
                );
            } else {
                let _ = writeln!(out, "  {} -> {}", file.source_path, file.target_path);
            }
        }

        if self.total_annotations > 0 {
            let _ = writeln!(
                out,
                "{} line(s) could not be confidently converted; see `// unconverted:` comments",
                self.total_annotations
            );
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transducer::{FallbackAnnotation, TransduceOutput};

    fn unit(path: &str, annotation_count: usize) -> ConvertedUnit {
        ConvertedUnit::new(
            path,
            TransduceOutput {
                text: String::from("x"),
                annotations: (0..annotation_count)
                    .map(|i| FallbackAnnotation::new(i + 1, "reason"))
                    .collect(),
            },
        )
    }

    #[test]
    fn test_summary_counts() {
        let units = vec![unit("a.py", 0), unit("b.py", 2)];
        let summary = BatchSummary::from_units(&units);
        assert_eq!(summary.files_converted, 2);
        assert_eq!(summary.total_annotations, 2);
    }

    #[test]
    fn test_render_mentions_review_lines() {
        let units = vec![unit("a.py", 3)];
        let rendered = BatchSummary::from_units(&units).render();
        assert!(rendered.contains("a.py -> a.js"));
        assert!(rendered.contains("3 line(s) need review"));
    }

    #[test]
    fn test_render_clean_batch_has_no_warning() {
        let units = vec![unit("a.py", 0)];
        let rendered = BatchSummary::from_units(&units).render();
        assert!(!rendered.contains("need review"));
        assert!(!rendered.contains("could not be confidently"));
    }
}
