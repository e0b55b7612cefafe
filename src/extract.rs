//! Structured Extractor
//!
//! Turns raw backend text (possibly wrapped in Markdown code fences or
//! surrounded by whitespace) into a parsed JSON record.
//!
//! Policy: strip recognized fence markers only, then parse strictly. A
//! reply that does not parse is a hard `MalformedResponse`, never coerced
//! to defaults; default substitution happens one layer up and only for
//! missing *fields*, not for an unparsable *document*.
//!
//! This is a pure function: no I/O, same input always yields the same
//! record or the same failure.

use serde_json::Value;
use tracing::debug;

use crate::types::{Result, VeriscanError};

/// The backend's best-effort structured answer: a loosely-typed record
/// that may be missing keys or hold out-of-range values.
pub type ExtractedRecord = Value;

/// Extract a structured record from raw backend text.
pub fn extract_record(raw_text: &str) -> Result<ExtractedRecord> {
    let cleaned = strip_code_fences(raw_text.trim());

    match serde_json::from_str(cleaned.trim()) {
        Ok(value) => Ok(value),
        Err(err) => {
            debug!("Backend reply failed to parse as JSON: {}", err);
            Err(VeriscanError::malformed(raw_text))
        }
    }
}

/// Strip leading/trailing Markdown code fences (``` or ```json).
fn strip_code_fences(text: &str) -> &str {
    let mut result = text;

    if result.starts_with("```") {
        // Drop the opening fence line, including any language tag
        result = match result.find('\n') {
            Some(newline) => &result[newline + 1..],
            None => "",
        };
    }

    if let Some(stripped) = result.trim_end().strip_suffix("```") {
        result = stripped;
    }

    result
}
