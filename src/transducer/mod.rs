//! The line transducer: a single forward pass over Python source producing
//! JavaScript-looking text.
//!
//! Total over any input: malformed nesting degrades to annotated
//! pass-through and the conversion never fails. The only state carried
//! across lines is the indentation stack and a flag for an in-progress
//! multi-line string; conversion of one unit is independent of every other
//! unit.

mod context;
mod indent;
mod rules;

pub use context::ConversionContext;
pub use rules::{LibCall, LineOutcome};

use serde::Serialize;
use tracing::trace;

use indent::IndentTracker;

/// Marker noting low-confidence output at a specific source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackAnnotation {
    /// 1-based line number in the source unit.
    pub line: usize,
    pub reason: String,
}

impl FallbackAnnotation {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransduceOutput {
    pub text: String,
    pub annotations: Vec<FallbackAnnotation>,
}

const ANNOTATION_MARKER: &str = "// unconverted:";

/// Convert one source unit. Pure: identical input and context always yield
/// identical output.
pub fn convert(source: &str, ctx: &ConversionContext) -> TransduceOutput {
    let mut out: Vec<String> = Vec::new();
    let mut annotations: Vec<FallbackAnnotation> = Vec::new();
    let mut tracker = IndentTracker::new();
    let mut multiline_delim: Option<&'static str> = None;
    let mut prev_indent = 0usize;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;

        // Inside a multi-line string: pass through until the closing
        // delimiter, which becomes the template-literal backtick.
        if let Some(delim) = multiline_delim {
            if raw.contains(delim) {
                out.push(raw.replacen(delim, "`", 1));
                multiline_delim = None;
            } else {
                out.push(raw.to_string());
            }
            continue;
        }

        let stripped = raw.trim();
        if stripped.is_empty() {
            out.push(raw.to_string());
            continue;
        }

        let lead_len = raw.len() - raw.trim_start().len();
        let lead = &raw[..lead_len];
        let indent = lead_len;

        if stripped.starts_with('#') {
            // Comments dedent like any other line; the closers come first.
            for opener in tracker.close_at_or_above(indent) {
                out.push(close_brace(opener));
            }
            out.push(format!("{lead}{}", rules::rewrite_comment(stripped)));
            prev_indent = indent;
            continue;
        }

        // A line with an odd number of triple-quote delimiters opens a
        // multi-line string; its remainder is continuation, not rules.
        if let Some(delim) = opens_multiline(stripped) {
            out.push(raw.replacen(delim, "`", 1));
            multiline_delim = Some(delim);
            prev_indent = indent;
            continue;
        }

        let (code, inline_comment) = rules::split_inline_comment(stripped);
        let block = rules::match_block_construct(code, &ctx.mappings, ctx.await_mapped_calls);

        if let Some(block) = &block {
            if block.continues {
                for opener in tracker.close_above(indent) {
                    out.push(close_brace(opener));
                }
                record_unmapped(&block.calls, line_no, lead, &mut out, &mut annotations);
                if tracker.top() == Some(indent) {
                    out.push(format!(
                        "{lead}{}",
                        with_comment(&block.text, inline_comment)
                    ));
                } else {
                    // Continuation with nothing open: malformed nesting.
                    let reason = "block continuation without an open block";
                    annotations.push(FallbackAnnotation::new(line_no, reason));
                    out.push(format!("{lead}{ANNOTATION_MARKER} {reason}"));
                    out.push(raw.to_string());
                }
                prev_indent = indent;
                continue;
            }
        }

        let closed = tracker.close_at_or_above(indent);
        for opener in &closed {
            out.push(close_brace(*opener));
        }
        if closed.is_empty() && indent < prev_indent && tracker.is_empty() {
            // Dedent past every open block; nothing to close.
            let reason = "dedent without an open block";
            trace!(line = line_no, "excess dedent");
            annotations.push(FallbackAnnotation::new(line_no, reason));
            out.push(format!("{lead}{ANNOTATION_MARKER} {reason}"));
        }

        if let Some(block) = block {
            record_unmapped(&block.calls, line_no, lead, &mut out, &mut annotations);
            out.push(format!(
                "{lead}{}",
                with_comment(&block.text, inline_comment)
            ));
            if block.opens {
                tracker.open(indent);
            }
            prev_indent = indent;
            continue;
        }

        if let Some(reason) = rules::unconvertible_reason(code) {
            annotations.push(FallbackAnnotation::new(line_no, reason.clone()));
            out.push(format!("{lead}{ANNOTATION_MARKER} {reason}"));
            out.push(raw.to_string());
            prev_indent = indent;
            continue;
        }

        let outcome = rules::rewrite_expression(stripped, &ctx.mappings, ctx.await_mapped_calls);
        record_unmapped(&outcome.calls, line_no, lead, &mut out, &mut annotations);
        out.push(format!("{lead}{}", outcome.text));
        prev_indent = indent;
    }

    for opener in tracker.drain_all() {
        out.push(close_brace(opener));
    }

    let mut text = out.join("\n");
    if source.ends_with('\n') && !text.is_empty() {
        text.push('\n');
    }

    TransduceOutput { text, annotations }
}

fn close_brace(opener_indent: usize) -> String {
    format!("{}}}", " ".repeat(opener_indent))
}

fn with_comment(text: &str, comment: Option<&str>) -> String {
    match comment {
        Some(comment) => format!("{text}  {}", rules::rewrite_comment(comment)),
        None => text.to_string(),
    }
}

fn opens_multiline(stripped: &str) -> Option<&'static str> {
    for delim in ["\"\"\"", "'''"] {
        if stripped.matches(delim).count() % 2 == 1 {
            return Some(delim);
        }
    }
    None
}

fn record_unmapped(
    calls: &[LibCall],
    line_no: usize,
    lead: &str,
    out: &mut Vec<String>,
    annotations: &mut Vec<FallbackAnnotation>,
) {
    for call in calls {
        if let LibCall::Unmapped { name } = call {
            let reason = format!("no mapping found for call `{name}`");
            out.push(format!("{lead}{ANNOTATION_MARKER} {reason}"));
            annotations.push(FallbackAnnotation::new(line_no, reason));
        }
    }
}
