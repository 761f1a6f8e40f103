// src/relay/telegram.rs
//! Telegram Bot API client: one `sendPhoto` multipart upload, then one
//! `sendMessage` per commentary chunk.

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

use super::{MESSAGE_CHUNK_SIZE, RelayError, chunk_message};
use crate::config::CONFIG;
use crate::image::EncodedImage;

pub struct TelegramRelay {
    client: Client,
    bot_token: String,
    chat_id: String,
    base_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

impl TelegramRelay {
    /// Build a relay against a specific endpoint. Tests point `base_url`
    /// at a local fake server.
    pub fn new(
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Build the production relay from `TELEGRAM_BOT_TOKEN` and
    /// `TELEGRAM_CHAT_ID`. Either one missing or empty means the relay is
    /// disabled and the rest of the service runs without it.
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|v| !v.is_empty())?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .ok()
            .filter(|v| !v.is_empty())?;

        Some(Self::new(
            bot_token,
            chat_id,
            CONFIG.telegram_base_url.clone(),
            Duration::from_secs(CONFIG.telegram_timeout),
        ))
    }

    // The token is part of the URL path; keep these URLs out of logs.
    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.bot_token, method)
    }

    async fn send_photo(&self, image: &EncodedImage) -> Result<(), RelayError> {
        let bytes = image.decode()?;
        let filename = format!("photo.{}", image.file_extension());

        let form = reqwest::multipart::Form::new()
            .text("chat_id", self.chat_id.clone())
            .part(
                "photo",
                reqwest::multipart::Part::bytes(bytes).file_name(filename),
            );

        let response = self
            .client
            .post(self.method_url("sendPhoto"))
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Api { status, body });
        }

        Ok(())
    }

    async fn send_message(&self, text: &str) -> Result<(), RelayError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Api { status, body });
        }

        Ok(())
    }

    /// Forward one photo and its commentary, photo first, then the text in
    /// chunk order. Every sub-call failure is logged and swallowed — a bad
    /// chunk does not stop the later ones. Returns true only when
    /// everything was delivered.
    pub async fn forward(&self, image: &EncodedImage, message: &str) -> bool {
        let mut delivered = true;

        if let Err(err) = self.send_photo(image).await {
            warn!("Telegram photo send failed: {}", err);
            delivered = false;
        }

        for chunk in chunk_message(message, MESSAGE_CHUNK_SIZE) {
            if let Err(err) = self.send_message(&chunk).await {
                warn!("Telegram message send failed: {}", err);
                delivered = false;
            }
        }

        delivered
    }
}
