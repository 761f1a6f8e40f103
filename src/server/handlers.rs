// src/server/handlers.rs
// HTTP handlers for the analysis API

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::error::{ApiError, ApiResult};
use crate::analysis::AnalysisMode;
use crate::format::AnalysisReport;
use crate::image::EncodedImage;
use crate::session::AnalysisSession;
use crate::state::AppState;

/// Request body for `POST /api/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "imageDataUrl")]
    pub image_data_url: String,
    /// Parsed by hand so an unknown mode comes back as a 400, not a
    /// deserialization rejection.
    pub mode: String,
}

/// `POST /api/analyze` — run one full rating cycle: decode the uploaded
/// image, ask the analysis backend for commentary, format the result, and
/// kick off a best-effort Telegram forward in the background.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let image = EncodedImage::from_data_url(&request.image_data_url)
            .map_err(|err| ApiError::bad_request(format!("Invalid image payload: {err}")))?;
        let mode = request
            .mode
            .parse::<AnalysisMode>()
            .map_err(|err| ApiError::bad_request(err.to_string()))?;

        let mut session = AnalysisSession::new(image, mode);
        info!(
            "Session {}: analyzing {} image ({} mode)",
            session.id, session.image.mime_type, session.mode
        );

        let text = match state.analyzer.analyze(&session.image, session.mode).await {
            Ok(text) => text,
            Err(err) => {
                error!("Session {}: analysis failed: {}", session.id, err);
                // The photo still goes out, tagged with the failure notice.
                spawn_relay(&state, &session);
                return Err(ApiError::bad_gateway(err.to_string()));
            }
        };

        session.set_commentary(text.as_str());
        let report = AnalysisReport::from_text(text);
        info!("Session {}: rated {}/10", session.id, report.rating);
        spawn_relay(&state, &session);

        Ok(Json(report))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

/// `GET /health` — liveness probe with the relay wiring status.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "relay": state.relay_status(),
    }))
}

/// Forward the session's photo and message without gating the HTTP
/// response on Telegram. Delivery failures are logged by the relay and
/// summarized here.
fn spawn_relay(state: &AppState, session: &AnalysisSession) {
    let Some(relay) = state.relay.clone() else {
        return;
    };
    let image = session.image.clone();
    let message = session.relay_message().to_string();
    let session_id = session.id.clone();

    tokio::spawn(async move {
        if relay.forward(&image, &message).await {
            info!("Session {session_id}: forwarded to Telegram");
        } else {
            warn!("Session {session_id}: Telegram forward incomplete");
        }
    });
}
