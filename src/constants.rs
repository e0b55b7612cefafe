//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers and default strings should be defined here.

/// Backend gateway constants
pub mod gateway {
    /// Default API base for the generateContent-style backend
    pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Environment slot holding the backend credential
    pub const CREDENTIAL_ENV: &str = "GEMINI_API_KEY";

    /// Sentinel value treated as an absent credential
    pub const CREDENTIAL_SENTINEL: &str = "undefined";

    /// Default HTTP request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

    /// Fixed interval between long-running operation status checks (seconds)
    pub const POLL_INTERVAL_SECS: u64 = 10;
}

/// Default model selectors per use case
pub mod models {
    pub const MEDIA_ANALYSIS: &str = "gemini-3-flash-preview";
    pub const TEXT_DETECTION: &str = "gemini-3-flash-preview";
    pub const FACT_CHECK: &str = "gemini-3-pro-preview";
    pub const SOURCE_TRACE: &str = "gemini-3-pro-preview";
    pub const TRANSCRIPTION: &str = "gemini-3-flash-preview";
    pub const CERTIFICATE: &str = "gemini-3-flash-preview";
    pub const ASSISTANT: &str = "gemini-3-flash-preview";
    pub const IMAGE_GENERATION: &str = "gemini-2.5-flash-image";
    pub const VIDEO_GENERATION: &str = "veo-3.1-fast-generate-preview";
}

/// Default-substitution values injected by the normalizer when the backend
/// record is missing a field or holds one of the wrong shape.
pub mod defaults {
    /// Media analysis defaults
    pub mod media {
        pub const CONFIDENCE: u8 = 50;
        pub const DEEPFAKE_PROBABILITY: u8 = 50;
        pub const SUMMARY: &str = "Forensic analysis complete.";
        pub const USER_RECOMMENDATION: &str = "Verify manually.";
        pub const MANIPULATION_TYPE: &str = "Digital Synthesis";
        pub const GUIDANCE: &str = "Caution advised.";
        pub const STEP_SCORE: u8 = 50;
        pub const STEP_EXPLANATION: &str = "Analyzing...";
        pub const STEP_QUALIFIER: &str = "Medium";
        pub const EXPLANATION_CATEGORY: &str = "General";
    }

    /// Text analysis defaults
    pub mod text {
        pub const AI_PROBABILITY: u8 = 0;
        pub const VERDICT_LABEL: &str = "STRICT";
        pub const SUMMARY: &str = "Analysis complete.";
        pub const CLAIM_STATUS: &str = "UNVERIFIED";
        pub const CLAIM_CATEGORY: &str = "General";
    }

    /// Source trace defaults
    pub mod trace {
        pub const SUMMARY: &str = "Source trace complete.";
        pub const ORIGINAL_EVENT: &str = "Unknown";
        pub const CONFIDENCE: u8 = 50;
    }

    /// Citation defaults
    pub mod citation {
        pub const TITLE: &str = "Verified Source";
    }

    /// Fallback line when certificate generation returns an empty reply
    pub const CERTIFICATE_FALLBACK: &str = "Forensic report generation failed.";
}

/// Synthetic media generation defaults
pub mod generation {
    pub const DEFAULT_ASPECT_RATIO: &str = "1:1";
    pub const VIDEO_ASPECT_RATIO: &str = "16:9";
    pub const VIDEO_RESOLUTION: &str = "720p";
    pub const VIDEO_COUNT: u32 = 1;
}
