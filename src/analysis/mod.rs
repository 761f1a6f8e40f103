// src/analysis/mod.rs
//! Analysis client: one photo and one mode in, free-text commentary out.
//!
//! The concrete backend sits behind [`ImageAnalyzer`] so the HTTP handlers
//! and the CLI stay oblivious to which AI answers, and tests can drop in a
//! canned one.

pub mod gemini;

pub use gemini::GeminiAnalyzer;

use crate::image::EncodedImage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Substituted when the backend answers 200 but the candidates carry no text.
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "⚠️ Empty response from backend.";

const FACE_INSTRUCTION: &str = "Rate the face in this photo. Be honest but kind: \
comment on the standout features, expression and photogenic quality, and finish \
with an overall score written exactly as X/10.";

const CURRENT_LOOK_INSTRUCTION: &str = "Rate the current look in this photo: \
outfit, styling, grooming and overall vibe. Say what works, what to change, and \
finish with an overall score written exactly as X/10.";

/// Which instruction template goes out with the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    Face,
    CurrentLook,
}

impl AnalysisMode {
    /// The fixed instruction sent alongside the image. Both templates ask
    /// for an `X/10` score, but nothing enforces that the model complies —
    /// the formatter copes either way.
    pub fn instruction(&self) -> &'static str {
        match self {
            AnalysisMode::Face => FACE_INSTRUCTION,
            AnalysisMode::CurrentLook => CURRENT_LOOK_INSTRUCTION,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Face => "face",
            AnalysisMode::CurrentLook => "current-look",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected mode selector, kept verbatim for the error message.
#[derive(Error, Debug)]
#[error("unknown analysis mode \"{0}\" (expected \"face\" or \"current-look\")")]
pub struct UnknownMode(pub String);

impl FromStr for AnalysisMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "face" => Ok(AnalysisMode::Face),
            "current-look" => Ok(AnalysisMode::CurrentLook),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Why an analysis attempt failed.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("analysis API error: {status} - {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        // A reqwest error renders the request URL, and ours carries the API
        // key in the query string. Strip it before the error can reach a
        // response body or a log line.
        AnalysisError::Network(err.without_url())
    }
}

/// Seam between the analysis flow and the concrete AI backend.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// One attempt, no retries. The caller decides what a failure means
    /// (HTTP 502, CLI error line, fallback relay notice).
    async fn analyze(
        &self,
        image: &EncodedImage,
        mode: AnalysisMode,
    ) -> Result<String, AnalysisError>;
}
