// src/analysis/gemini.rs
//! Gemini `generateContent` client for photo commentary.
//!
//! One POST per analysis: the mode's instruction text plus the image as
//! inline data. No retries and no streaming — the commentary is short and
//! the caller already treats failure as a first-class outcome.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{AnalysisError, AnalysisMode, EMPTY_RESPONSE_PLACEHOLDER, ImageAnalyzer};
use crate::config::CONFIG;
use crate::image::EncodedImage;

pub struct GeminiAnalyzer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiAnalyzer {
    /// Build a client against a specific endpoint. Tests point `base_url`
    /// at a local fake server.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        }
    }

    /// Build the production client: `GEMINI_API_KEY` from the environment,
    /// endpoint and model from config.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY not set"))?;

        Ok(Self::new(
            api_key,
            CONFIG.gemini_base_url.clone(),
            CONFIG.gemini_model.clone(),
            Duration::from_secs(CONFIG.gemini_timeout),
        ))
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
}

#[derive(Serialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

// ============================================================================
// Analyzer Implementation
// ============================================================================

#[async_trait]
impl ImageAnalyzer for GeminiAnalyzer {
    async fn analyze(
        &self,
        image: &EncodedImage,
        mode: AnalysisMode,
    ) -> Result<String, AnalysisError> {
        let api_request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiPart {
                        text: Some(mode.instruction().to_string()),
                        inline_data: None,
                    },
                    GeminiPart {
                        text: None,
                        inline_data: Some(GeminiInlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.payload.clone(),
                        }),
                    },
                ],
            }],
        };

        // The key travels in the query string; keep this URL out of logs.
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&api_request)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api { status, body });
        }

        let api_response: GeminiResponse = response.json().await?;

        // Concatenate the text parts of the first candidate
        let text: String = api_response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Ok(EMPTY_RESPONSE_PLACEHOLDER.to_string());
        }

        Ok(text)
    }
}
