use crate::transducer::{FallbackAnnotation, TransduceOutput};

const SOURCE_EXTENSION: &str = ".py";
const TARGET_EXTENSION: &str = ".js";

/// One converted file: the source-relative path with its extension
/// rewritten, the produced text, and any fallback annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedUnit {
    pub source_path: String,
    pub target_path: String,
    pub text: String,
    pub annotations: Vec<FallbackAnnotation>,
}

impl ConvertedUnit {
    pub fn new(source_path: impl Into<String>, output: TransduceOutput) -> Self {
        let source_path = source_path.into();
        let target_path = target_path_for(&source_path);
        Self {
            source_path,
            target_path,
            text: output.text,
            annotations: output.annotations,
        }
    }
}

/// Rewrite a source path's extension for the target language.
pub fn target_path_for(source_path: &str) -> String {
    match source_path.strip_suffix(SOURCE_EXTENSION) {
        Some(stem) => format!("{stem}{TARGET_EXTENSION}"),
        None => format!("{source_path}{TARGET_EXTENSION}"),
    }
}
