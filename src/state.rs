// src/state.rs

use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::{GeminiAnalyzer, ImageAnalyzer};
use crate::relay::TelegramRelay;

/// Shared service handles for the HTTP server and CLI.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn ImageAnalyzer>,
    pub relay: Option<Arc<TelegramRelay>>,
}

impl AppState {
    /// Wire explicit services (tests swap in canned analyzers here).
    pub fn new(analyzer: Arc<dyn ImageAnalyzer>, relay: Option<Arc<TelegramRelay>>) -> Self {
        Self { analyzer, relay }
    }

    /// Assemble the production services from the environment. A missing
    /// Gemini key is fatal; a missing Telegram credential only disables
    /// forwarding.
    pub fn from_env() -> anyhow::Result<Self> {
        let analyzer: Arc<dyn ImageAnalyzer> = Arc::new(GeminiAnalyzer::from_env()?);

        let relay = match TelegramRelay::from_env() {
            Some(relay) => {
                info!("✅ Telegram relay enabled");
                Some(Arc::new(relay))
            }
            None => {
                warn!("⚠️  TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID not set - relay disabled");
                None
            }
        };

        Ok(Self { analyzer, relay })
    }

    pub fn relay_status(&self) -> &'static str {
        if self.relay.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    }
}
