pub mod error;
pub mod request;
pub mod result;
pub mod utils;

pub use error::{Result, VeriscanError};
pub use request::{AnalysisRequest, FileMetadata, MediaKind, MediaPayload};
pub use result::{
    AnalysisResult, AnalysisStep, AnalysisSteps, Citation, Claim, ConfidenceLevel, Explanation,
    GeneratedImage, SourceTraceResult, TextAnalysisResult, TraceFinding, Verdict,
};
pub use utils::{
    json_bool, json_number, json_score_or, json_string, json_string_array, json_string_or,
};

/// Classification mode applied by the text normalizer.
///
/// Fact-check mode additionally parses verified claims and attaches
/// grounding citations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnalysisMode {
    AiDetect,
    FactCheck,
}
