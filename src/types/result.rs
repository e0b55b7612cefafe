//! Caller-Facing Result Schemas
//!
//! The durable output types of the engine. Serialized field names are part
//! of the caller contract (`deepfakeProbability`, `analysisSteps`, ...), so
//! every struct here uses camelCase renaming.
//!
//! Totality invariant: every field of every result is present and
//! type-correct regardless of how incomplete the backend reply was. The
//! normalizer is the sole writer and the sole guarantor of that invariant.

use serde::{Deserialize, Serialize};

// =============================================================================
// Verdict & Confidence
// =============================================================================

/// Binary classification exposed to callers. Closed set: no "unknown"
/// state exists in the caller-facing schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "REAL")]
    Real,
    #[serde(rename = "LIKELY_FAKE")]
    LikelyFake,
}

/// Display bucket derived from the numeric confidence. Never
/// backend-supplied, always computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

// =============================================================================
// Media Analysis Result
// =============================================================================

/// One named sub-score of the forensic analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStep {
    /// 0-100
    pub score: u8,
    pub explanation: String,
    pub confidence_qualifier: String,
}

/// The fixed set of four sub-scores. Always fully populated, even when the
/// backend supplied none of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSteps {
    pub integrity: AnalysisStep,
    pub consistency: AnalysisStep,
    pub ai_patterns: AnalysisStep,
    pub temporal: AnalysisStep,
}

/// One explanation point surfaced by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub point: String,
    pub detail: String,
    pub category: String,
    /// Media timecode the point refers to, when applicable
    pub timestamp: String,
}

/// The durable media-analysis output handed to the caller by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Opaque unique id assigned at normalization time
    pub id: String,
    /// Millisecond timestamp assigned at normalization time
    pub timestamp: i64,
    pub verdict: Verdict,
    /// 0-100
    pub confidence: u8,
    pub confidence_level: ConfidenceLevel,
    /// 0-100
    pub deepfake_probability: u8,
    pub summary: String,
    pub user_recommendation: String,
    pub manipulation_type: String,
    pub guidance: String,
    pub analysis_steps: AnalysisSteps,
    pub explanations: Vec<Explanation>,
    pub file_metadata: super::request::FileMetadata,
}

// =============================================================================
// Text Analysis Result
// =============================================================================

/// One verified claim from fact-check mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub claim: String,
    pub status: String,
    pub source_url: String,
    pub category: String,
}

/// Parallel result structure for the text modes (AI detection, fact-check)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysisResult {
    /// 0-100
    pub ai_probability: u8,
    pub verdict_label: String,
    pub ai_signals: Vec<String>,
    pub human_signals: Vec<String>,
    pub summary: String,
    /// Populated in fact-check mode only; empty otherwise
    pub claims: Vec<Claim>,
    pub sources: Vec<Citation>,
}

// =============================================================================
// Source Trace Result
// =============================================================================

/// One finding from the reverse source lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceFinding {
    #[serde(rename = "type")]
    pub kind: String,
    pub detail: String,
}

/// Output of the reverse source trace orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTraceResult {
    pub summary: String,
    pub original_event: String,
    pub manipulation_detected: bool,
    /// 0-100
    pub confidence: u8,
    pub findings: Vec<TraceFinding>,
    pub sources: Vec<Citation>,
}

// =============================================================================
// Citations & Generated Media
// =============================================================================

/// A web source citation from backend grounding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub title: String,
    pub url: String,
}

/// Inline media produced by a generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::request::FileMetadata;

    fn sample_step() -> AnalysisStep {
        AnalysisStep {
            score: 50,
            explanation: "Analyzing...".to_string(),
            confidence_qualifier: "Medium".to_string(),
        }
    }

    #[test]
    fn test_verdict_wire_names() {
        assert_eq!(serde_json::to_string(&Verdict::Real).unwrap(), "\"REAL\"");
        assert_eq!(
            serde_json::to_string(&Verdict::LikelyFake).unwrap(),
            "\"LIKELY_FAKE\""
        );
    }

    #[test]
    fn test_analysis_result_field_names() {
        let result = AnalysisResult {
            id: "abc".to_string(),
            timestamp: 0,
            verdict: Verdict::Real,
            confidence: 90,
            confidence_level: ConfidenceLevel::High,
            deepfake_probability: 10,
            summary: "s".to_string(),
            user_recommendation: "r".to_string(),
            manipulation_type: "m".to_string(),
            guidance: "g".to_string(),
            analysis_steps: AnalysisSteps {
                integrity: sample_step(),
                consistency: sample_step(),
                ai_patterns: sample_step(),
                temporal: sample_step(),
            },
            explanations: vec![],
            file_metadata: FileMetadata::new("f.png", 1),
        };

        let json = serde_json::to_value(&result).unwrap();
        for key in [
            "id",
            "timestamp",
            "verdict",
            "confidence",
            "confidenceLevel",
            "deepfakeProbability",
            "summary",
            "userRecommendation",
            "manipulationType",
            "guidance",
            "analysisSteps",
            "explanations",
            "fileMetadata",
        ] {
            assert!(json.get(key).is_some(), "missing field {key}");
        }
        assert!(json["analysisSteps"].get("aiPatterns").is_some());
        assert!(
            json["analysisSteps"]["integrity"]
                .get("confidenceQualifier")
                .is_some()
        );
    }

    #[test]
    fn test_trace_finding_type_field_name() {
        let finding = TraceFinding {
            kind: "metadata".to_string(),
            detail: "EXIF stripped".to_string(),
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert!(json.get("type").is_some());
    }
}
