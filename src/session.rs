// src/session.rs
//! Per-run context. One upload = one session; concurrent requests never
//! share state, and a new upload supersedes the previous session wholesale.

use uuid::Uuid;

use crate::analysis::AnalysisMode;
use crate::image::EncodedImage;

/// Relayed in place of commentary when analysis failed and only the raw
/// photo is worth forwarding.
pub const ANALYSIS_FAILED_NOTICE: &str = "Gemini failed, sending raw image.";

/// Everything one analysis run carries: the image, the chosen mode, and —
/// once the backend has answered — the commentary.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub id: String,
    pub image: EncodedImage,
    pub mode: AnalysisMode,
    commentary: Option<String>,
}

impl AnalysisSession {
    pub fn new(image: EncodedImage, mode: AnalysisMode) -> Self {
        Self {
            id: generate_session_id(),
            image,
            mode,
            commentary: None,
        }
    }

    /// Record the commentary produced for this run.
    pub fn set_commentary(&mut self, text: impl Into<String>) {
        self.commentary = Some(text.into());
    }

    pub fn commentary(&self) -> Option<&str> {
        self.commentary.as_deref()
    }

    /// What the relay should carry: the commentary when there is one,
    /// otherwise the fixed failure notice accompanying the raw photo.
    pub fn relay_message(&self) -> &str {
        self.commentary.as_deref().unwrap_or(ANALYSIS_FAILED_NOTICE)
    }
}

/// Generates a new random session ID (UUID v4)
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}
