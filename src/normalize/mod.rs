//! Result Normalizer / Verdict Policy
//!
//! The decision core of the engine: converts a loosely-typed
//! `ExtractedRecord` (possibly missing fields, possibly holding values of
//! the wrong shape) into a total, schema-complete result for the requested
//! classification mode. Pure transformation plus default injection; no
//! backend I/O happens here.
//!
//! ## Verdict decision rule (media mode)
//!
//! Evaluated in this exact precedence order:
//!
//! 1. declared REAL and probability (absent → 0) strictly below 50 → REAL
//! 2. probability strictly above 50 → LIKELY_FAKE
//! 3. declared REAL (covers the 50 / absent-probability edge) → REAL
//! 4. otherwise → LIKELY_FAKE
//!
//! The backend's categorical verdict and its numeric score can disagree;
//! the numeric score wins when unambiguous, the categorical label breaks
//! the tie at the midpoint, and anything short of a clear REAL signal
//! classifies as fake.
//!
//! ## Totality
//!
//! Every field of every result is populated: absent or misshapen fields
//! get the documented defaults. Only an unparsable document is an error,
//! and that is raised earlier by the extractor.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::constants::defaults;
use crate::extract::ExtractedRecord;
use crate::types::{
    AnalysisResult, AnalysisStep, AnalysisSteps, Citation, Claim, ConfidenceLevel, Explanation,
    FileMetadata, SourceTraceResult, TextAnalysisMode, TextAnalysisResult, TraceFinding, Verdict,
    json_bool, json_number, json_score_or, json_string, json_string_array,
};

// =============================================================================
// Verdict Policy
// =============================================================================

/// Apply the four-branch verdict rule to a (declared verdict, probability)
/// pair. Pure function; `None` probability is treated as 0.
pub fn decide_verdict(declared: Option<Verdict>, probability: Option<f64>) -> Verdict {
    let declared_real = matches!(declared, Some(Verdict::Real));
    let probability = probability.unwrap_or(0.0);

    if declared_real && probability < 50.0 {
        Verdict::Real
    } else if probability > 50.0 {
        Verdict::LikelyFake
    } else if declared_real {
        Verdict::Real
    } else {
        Verdict::LikelyFake
    }
}

/// Derive the display bucket from the numeric confidence.
/// Boundaries are exclusive on the High side: 85 is still Medium.
pub fn bucket_confidence(confidence: u8) -> ConfidenceLevel {
    if confidence > 85 {
        ConfidenceLevel::High
    } else if confidence < 50 {
        ConfidenceLevel::Low
    } else {
        ConfidenceLevel::Medium
    }
}

/// Read the backend's categorical verdict, if it declared a recognizable one.
fn declared_verdict(record: &Value) -> Option<Verdict> {
    match record.get("verdict").and_then(|v| v.as_str()) {
        Some("REAL") => Some(Verdict::Real),
        Some("LIKELY_FAKE") => Some(Verdict::LikelyFake),
        _ => None,
    }
}

// =============================================================================
// Media Normalization
// =============================================================================

/// Normalize a media-analysis record into a total `AnalysisResult`.
///
/// A fresh id and timestamp are assigned here, at normalization time: two
/// results for the same request are never equal by identity.
pub fn normalize_media(record: &ExtractedRecord, file_metadata: FileMetadata) -> AnalysisResult {
    let declared = declared_verdict(record);
    let probability = json_number(record, "deepfakeProbability");

    if declared.is_none() || probability.is_none() {
        debug!(
            declared = declared.is_some(),
            probability = probability.is_some(),
            "Backend record is missing verdict signals, policy defaults apply"
        );
    }

    let verdict = decide_verdict(declared, probability);
    let confidence = json_score_or(record, "confidence", defaults::media::CONFIDENCE);

    AnalysisResult {
        id: Uuid::new_v4().to_string(),
        timestamp: Utc::now().timestamp_millis(),
        verdict,
        confidence,
        confidence_level: bucket_confidence(confidence),
        deepfake_probability: json_score_or(
            record,
            "deepfakeProbability",
            defaults::media::DEEPFAKE_PROBABILITY,
        ),
        summary: text_field_or(record, "summary", defaults::media::SUMMARY),
        user_recommendation: text_field_or(
            record,
            "userRecommendation",
            defaults::media::USER_RECOMMENDATION,
        ),
        manipulation_type: text_field_or(
            record,
            "manipulationType",
            defaults::media::MANIPULATION_TYPE,
        ),
        guidance: text_field_or(record, "guidance", defaults::media::GUIDANCE),
        analysis_steps: parse_steps(record.get("analysisSteps")),
        explanations: parse_explanations(record.get("explanations")),
        file_metadata,
    }
}

/// Free-text fields must end up non-empty: blank strings count as absent.
fn text_field_or(record: &Value, key: &str, default: &str) -> String {
    match json_string(record, key) {
        Some(text) if !text.trim().is_empty() => text,
        _ => default.to_string(),
    }
}

fn default_step() -> AnalysisStep {
    AnalysisStep {
        score: defaults::media::STEP_SCORE,
        explanation: defaults::media::STEP_EXPLANATION.to_string(),
        confidence_qualifier: defaults::media::STEP_QUALIFIER.to_string(),
    }
}

fn parse_step(value: Option<&Value>) -> AnalysisStep {
    match value {
        Some(step) if step.is_object() => AnalysisStep {
            score: json_score_or(step, "score", defaults::media::STEP_SCORE),
            explanation: text_field_or(step, "explanation", defaults::media::STEP_EXPLANATION),
            confidence_qualifier: text_field_or(
                step,
                "confidenceQualifier",
                defaults::media::STEP_QUALIFIER,
            ),
        },
        _ => default_step(),
    }
}

/// Parse the fixed four-step group. An absent or misshapen group defaults
/// whole; a present group defaults per sub-step.
fn parse_steps(value: Option<&Value>) -> AnalysisSteps {
    match value {
        Some(group) if group.is_object() => AnalysisSteps {
            integrity: parse_step(group.get("integrity")),
            consistency: parse_step(group.get("consistency")),
            ai_patterns: parse_step(group.get("aiPatterns")),
            temporal: parse_step(group.get("temporal")),
        },
        _ => AnalysisSteps {
            integrity: default_step(),
            consistency: default_step(),
            ai_patterns: default_step(),
            temporal: default_step(),
        },
    }
}

/// Parse the explanation sequence. A non-sequence value yields an empty
/// list; non-object elements are dropped.
fn parse_explanations(value: Option<&Value>) -> Vec<Explanation> {
    value
        .and_then(|v| v.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter(|entry| entry.is_object())
                .map(|entry| Explanation {
                    point: json_string(entry, "point").unwrap_or_default(),
                    detail: json_string(entry, "detail").unwrap_or_default(),
                    category: text_field_or(
                        entry,
                        "category",
                        defaults::media::EXPLANATION_CATEGORY,
                    ),
                    timestamp: json_string(entry, "timestamp").unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// Text Normalization
// =============================================================================

/// Normalize a text-analysis record. Claims are parsed in fact-check mode
/// only; the citation list is supplied by the caller (collected from
/// grounding metadata when the mode enables it).
pub fn normalize_text(
    record: &ExtractedRecord,
    mode: TextAnalysisMode,
    sources: Vec<Citation>,
) -> TextAnalysisResult {
    TextAnalysisResult {
        ai_probability: json_score_or(record, "aiProbability", defaults::text::AI_PROBABILITY),
        verdict_label: text_field_or(record, "verdictLabel", defaults::text::VERDICT_LABEL),
        ai_signals: json_string_array(record, "aiSignals"),
        human_signals: json_string_array(record, "humanSignals"),
        summary: text_field_or(record, "summary", defaults::text::SUMMARY),
        claims: match mode {
            TextAnalysisMode::FactCheck => parse_claims(record.get("claims")),
            TextAnalysisMode::AiDetect => Vec::new(),
        },
        sources,
    }
}

fn parse_claims(value: Option<&Value>) -> Vec<Claim> {
    value
        .and_then(|v| v.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter(|entry| entry.is_object())
                .map(|entry| Claim {
                    claim: json_string(entry, "claim").unwrap_or_default(),
                    status: text_field_or(entry, "status", defaults::text::CLAIM_STATUS),
                    source_url: json_string(entry, "sourceUrl").unwrap_or_default(),
                    category: text_field_or(entry, "category", defaults::text::CLAIM_CATEGORY),
                })
                .collect()
        })
        .unwrap_or_default()
}

// =============================================================================
// Source Trace Normalization
// =============================================================================

/// Normalize a reverse source-trace record.
pub fn normalize_trace(record: &ExtractedRecord, sources: Vec<Citation>) -> SourceTraceResult {
    SourceTraceResult {
        summary: text_field_or(record, "summary", defaults::trace::SUMMARY),
        original_event: text_field_or(record, "originalEvent", defaults::trace::ORIGINAL_EVENT),
        manipulation_detected: json_bool(record, "manipulationDetected", false),
        confidence: json_score_or(record, "confidence", defaults::trace::CONFIDENCE),
        findings: parse_findings(record.get("findings")),
        sources,
    }
}

fn parse_findings(value: Option<&Value>) -> Vec<TraceFinding> {
    value
        .and_then(|v| v.as_array())
        .map(|entries| {
            entries
                .iter()
                .filter(|entry| entry.is_object())
                .map(|entry| TraceFinding {
                    kind: json_string(entry, "type").unwrap_or_default(),
                    detail: json_string(entry, "detail").unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn metadata() -> FileMetadata {
        FileMetadata::new("clip.mp4", 2048)
    }

    // -------------------------------------------------------------------------
    // Verdict policy
    // -------------------------------------------------------------------------

    #[test]
    fn test_verdict_rule_table() {
        use Verdict::{LikelyFake, Real};

        assert_eq!(decide_verdict(Some(Real), Some(30.0)), Real);
        assert_eq!(decide_verdict(Some(Real), Some(70.0)), LikelyFake);
        assert_eq!(decide_verdict(Some(LikelyFake), Some(70.0)), LikelyFake);
        assert_eq!(decide_verdict(Some(Real), Some(50.0)), Real);
        assert_eq!(decide_verdict(None, None), LikelyFake);
        // Absent probability counts as 0: a declared REAL stays REAL
        assert_eq!(decide_verdict(Some(Real), None), Real);
        // LIKELY_FAKE below the midpoint stays fake: no clear REAL signal
        assert_eq!(decide_verdict(Some(LikelyFake), Some(30.0)), LikelyFake);
        // Probability alone can acquit nothing: 50 without a label is fake
        assert_eq!(decide_verdict(None, Some(50.0)), LikelyFake);
    }

    proptest! {
        #[test]
        fn prop_verdict_is_total(declared in prop_oneof![
            Just(None),
            Just(Some(Verdict::Real)),
            Just(Some(Verdict::LikelyFake)),
        ], probability in prop_oneof![
            Just(None),
            (0.0f64..=100.0).prop_map(Some),
        ]) {
            // Exactly one of the two verdicts, for every input pair
            let verdict = decide_verdict(declared, probability);
            prop_assert!(matches!(verdict, Verdict::Real | Verdict::LikelyFake));
        }
    }

    #[test]
    fn test_confidence_bucketing() {
        assert_eq!(bucket_confidence(90), ConfidenceLevel::High);
        assert_eq!(bucket_confidence(49), ConfidenceLevel::Low);
        assert_eq!(bucket_confidence(50), ConfidenceLevel::Medium);
        assert_eq!(bucket_confidence(85), ConfidenceLevel::Medium);
        assert_eq!(bucket_confidence(86), ConfidenceLevel::High);
        assert_eq!(bucket_confidence(0), ConfidenceLevel::Low);
        assert_eq!(bucket_confidence(100), ConfidenceLevel::High);
    }

    // -------------------------------------------------------------------------
    // Media normalization
    // -------------------------------------------------------------------------

    #[test]
    fn test_end_to_end_scenario() {
        let record = json!({"verdict": "REAL", "deepfakeProbability": 20, "confidence": 90});
        let result = normalize_media(&record, metadata());

        assert_eq!(result.verdict, Verdict::Real);
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
        assert_eq!(result.deepfake_probability, 20);
        assert_eq!(result.summary, "Forensic analysis complete.");
        assert_eq!(result.analysis_steps.integrity.score, 50);
        assert_eq!(result.analysis_steps.temporal.explanation, "Analyzing...");
        assert!(result.explanations.is_empty());
    }

    #[test]
    fn test_empty_record_gets_full_default_table() {
        let result = normalize_media(&json!({}), metadata());

        assert_eq!(result.verdict, Verdict::LikelyFake);
        assert_eq!(result.confidence, 50);
        assert_eq!(result.confidence_level, ConfidenceLevel::Medium);
        assert_eq!(result.deepfake_probability, 50);
        assert_eq!(result.summary, "Forensic analysis complete.");
        assert_eq!(result.user_recommendation, "Verify manually.");
        assert_eq!(result.manipulation_type, "Digital Synthesis");
        assert_eq!(result.guidance, "Caution advised.");
        assert_eq!(result.analysis_steps.ai_patterns.score, 50);
        assert_eq!(
            result.analysis_steps.consistency.confidence_qualifier,
            "Medium"
        );
        assert!(result.explanations.is_empty());
        assert_eq!(result.file_metadata, metadata());
    }

    #[test]
    fn test_declared_real_with_absent_probability_is_real() {
        let record = json!({"verdict": "REAL"});
        let result = normalize_media(&record, metadata());
        assert_eq!(result.verdict, Verdict::Real);
        // The output field still carries the substitution default
        assert_eq!(result.deepfake_probability, 50);
    }

    #[test]
    fn test_partial_steps_group_defaults_per_step() {
        let record = json!({"analysisSteps": {
            "integrity": {"score": 80, "explanation": "No splices found", "confidenceQualifier": "High"}
        }});
        let result = normalize_media(&record, metadata());

        assert_eq!(result.analysis_steps.integrity.score, 80);
        assert_eq!(
            result.analysis_steps.integrity.explanation,
            "No splices found"
        );
        assert_eq!(result.analysis_steps.consistency.score, 50);
        assert_eq!(result.analysis_steps.temporal.explanation, "Analyzing...");
    }

    #[test]
    fn test_misshapen_steps_group_defaults_whole() {
        let record = json!({"analysisSteps": "not an object"});
        let result = normalize_media(&record, metadata());
        assert_eq!(result.analysis_steps.integrity.score, 50);
        assert_eq!(result.analysis_steps.ai_patterns.score, 50);
    }

    #[test]
    fn test_explanations_parsed_in_order() {
        let record = json!({"explanations": [
            {"point": "Lighting", "detail": "Shadow direction shifts", "category": "Visual", "timestamp": "0:12"},
            {"point": "Audio", "detail": "Phoneme timing drift"},
            "stray string"
        ]});
        let result = normalize_media(&record, metadata());

        assert_eq!(result.explanations.len(), 2);
        assert_eq!(result.explanations[0].point, "Lighting");
        assert_eq!(result.explanations[0].timestamp, "0:12");
        assert_eq!(result.explanations[1].category, "General");
        assert_eq!(result.explanations[1].timestamp, "");
    }

    #[test]
    fn test_non_sequence_explanations_become_empty() {
        let record = json!({"explanations": {"point": "not a list"}});
        let result = normalize_media(&record, metadata());
        assert!(result.explanations.is_empty());
    }

    #[test]
    fn test_blank_text_fields_are_defaulted() {
        let record = json!({"summary": "  ", "guidance": ""});
        let result = normalize_media(&record, metadata());
        assert_eq!(result.summary, "Forensic analysis complete.");
        assert_eq!(result.guidance, "Caution advised.");
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        let record = json!({"confidence": 250, "deepfakeProbability": -10});
        let result = normalize_media(&record, metadata());
        assert_eq!(result.confidence, 100);
        assert_eq!(result.confidence_level, ConfidenceLevel::High);
        assert_eq!(result.deepfake_probability, 0);
    }

    #[test]
    fn test_idempotence_except_identity() {
        let record = json!({"verdict": "REAL", "deepfakeProbability": 20, "confidence": 72});
        let first = normalize_media(&record, metadata());
        let second = normalize_media(&record, metadata());

        assert_ne!(first.id, second.id);

        let mut aligned = second.clone();
        aligned.id = first.id.clone();
        aligned.timestamp = first.timestamp;
        assert_eq!(first, aligned);
    }

    proptest! {
        /// Totality: for any subset of the optional fields, every result
        /// field is populated and in range.
        #[test]
        fn prop_normalize_media_is_total(
            verdict in prop_oneof![
                Just(None),
                Just(Some("REAL")),
                Just(Some("LIKELY_FAKE")),
                Just(Some("garbage")),
            ],
            probability in prop_oneof![Just(None), (-50i64..200).prop_map(Some)],
            confidence in prop_oneof![Just(None), (-50i64..200).prop_map(Some)],
            with_summary in any::<bool>(),
            with_steps in any::<bool>(),
            with_explanations in any::<bool>(),
        ) {
            let mut record = serde_json::Map::new();
            if let Some(v) = verdict {
                record.insert("verdict".into(), json!(v));
            }
            if let Some(p) = probability {
                record.insert("deepfakeProbability".into(), json!(p));
            }
            if let Some(c) = confidence {
                record.insert("confidence".into(), json!(c));
            }
            if with_summary {
                record.insert("summary".into(), json!("present"));
            }
            if with_steps {
                record.insert("analysisSteps".into(), json!({"integrity": {"score": 10}}));
            }
            if with_explanations {
                record.insert("explanations".into(), json!([{"point": "p"}]));
            }

            let result = normalize_media(&Value::Object(record), metadata());

            prop_assert!(!result.id.is_empty());
            prop_assert!(result.timestamp > 0);
            prop_assert!(result.confidence <= 100);
            prop_assert!(result.deepfake_probability <= 100);
            prop_assert!(!result.summary.is_empty());
            prop_assert!(!result.user_recommendation.is_empty());
            prop_assert!(!result.manipulation_type.is_empty());
            prop_assert!(!result.guidance.is_empty());
            prop_assert!(result.analysis_steps.integrity.score <= 100);
            prop_assert!(!result.analysis_steps.temporal.explanation.is_empty());
        }
    }

    // -------------------------------------------------------------------------
    // Text normalization
    // -------------------------------------------------------------------------

    #[test]
    fn test_text_defaults() {
        let result = normalize_text(&json!({}), TextAnalysisMode::AiDetect, vec![]);

        assert_eq!(result.ai_probability, 0);
        assert_eq!(result.verdict_label, "STRICT");
        assert!(result.ai_signals.is_empty());
        assert!(result.human_signals.is_empty());
        assert_eq!(result.summary, "Analysis complete.");
        assert!(result.claims.is_empty());
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_text_signals_pass_through() {
        let record = json!({
            "aiProbability": 88,
            "verdictLabel": "LIKELY_AI",
            "aiSignals": ["uniform sentence length", "low burstiness"],
            "humanSignals": ["typo in paragraph 2"],
            "summary": "Likely machine written."
        });
        let result = normalize_text(&record, TextAnalysisMode::AiDetect, vec![]);

        assert_eq!(result.ai_probability, 88);
        assert_eq!(result.verdict_label, "LIKELY_AI");
        assert_eq!(result.ai_signals.len(), 2);
        assert_eq!(result.human_signals.len(), 1);
    }

    #[test]
    fn test_claims_parsed_only_in_fact_check_mode() {
        let record = json!({"claims": [
            {"claim": "X happened", "status": "VERIFIED", "sourceUrl": "https://s.example", "category": "News"}
        ]});

        let detect = normalize_text(&record, TextAnalysisMode::AiDetect, vec![]);
        assert!(detect.claims.is_empty());

        let fact_check = normalize_text(&record, TextAnalysisMode::FactCheck, vec![]);
        assert_eq!(fact_check.claims.len(), 1);
        assert_eq!(fact_check.claims[0].status, "VERIFIED");
    }

    #[test]
    fn test_claim_element_defaults() {
        let record = json!({"claims": [{"claim": "Y happened"}]});
        let result = normalize_text(&record, TextAnalysisMode::FactCheck, vec![]);

        let claim = &result.claims[0];
        assert_eq!(claim.claim, "Y happened");
        assert_eq!(claim.status, "UNVERIFIED");
        assert_eq!(claim.source_url, "");
        assert_eq!(claim.category, "General");
    }

    #[test]
    fn test_text_sources_attached_verbatim() {
        let sources = vec![Citation {
            title: "Verified Source".to_string(),
            url: String::new(),
        }];
        let result = normalize_text(&json!({}), TextAnalysisMode::FactCheck, sources.clone());
        assert_eq!(result.sources, sources);
    }

    // -------------------------------------------------------------------------
    // Source trace normalization
    // -------------------------------------------------------------------------

    #[test]
    fn test_trace_defaults() {
        let result = normalize_trace(&json!({}), vec![]);

        assert_eq!(result.summary, "Source trace complete.");
        assert_eq!(result.original_event, "Unknown");
        assert!(!result.manipulation_detected);
        assert_eq!(result.confidence, 50);
        assert!(result.findings.is_empty());
    }

    #[test]
    fn test_trace_findings_parsed() {
        let record = json!({
            "summary": "Image traced to a 2019 press photo.",
            "originalEvent": "G7 Summit 2019",
            "manipulationDetected": true,
            "confidence": 95,
            "findings": [
                {"type": "provenance", "detail": "Earliest crawl 2019-08-26"},
                {"type": "manipulation", "detail": "Background crowd composited"}
            ]
        });
        let result = normalize_trace(&record, vec![]);

        assert!(result.manipulation_detected);
        assert_eq!(result.confidence, 95);
        assert_eq!(result.findings.len(), 2);
        assert_eq!(result.findings[0].kind, "provenance");
    }
}
