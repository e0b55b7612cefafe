//! Citation Collector
//!
//! Extracts web source citations from backend grounding metadata.
//!
//! Candidates are walked in backend-supplied order; only grounding chunks
//! carrying a web source contribute. Missing titles fall back to a generic
//! placeholder and missing urls to the empty string, so the citation list
//! stays aligned with what the backend grounded on. Duplicates and
//! empty-url citations pass through unchanged. Never fails: no groundable
//! chunk yields an empty sequence.

use crate::constants::defaults;
use crate::gateway::ReplyCandidate;
use crate::types::Citation;

/// Collect citations from all candidates, preserving order.
pub fn collect(candidates: &[ReplyCandidate]) -> Vec<Citation> {
    candidates
        .iter()
        .flat_map(|candidate| candidate.grounding_chunks.iter())
        .filter_map(|chunk| chunk.web.as_ref())
        .map(|web| Citation {
            title: web
                .title
                .clone()
                .unwrap_or_else(|| defaults::citation::TITLE.to_string()),
            url: web.uri.clone().unwrap_or_default(),
        })
        .collect()
}
