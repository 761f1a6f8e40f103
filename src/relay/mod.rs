// src/relay/mod.rs
//! Best-effort forwarding of the photo and commentary to a Telegram chat.
//!
//! Nothing in here is allowed to fail the analysis flow: every error is
//! logged and swallowed, and callers only learn an overall yes/no.

pub mod telegram;

pub use telegram::TelegramRelay;

use thiserror::Error;

/// Per-call text limit the relay honors when splitting commentary.
pub const MESSAGE_CHUNK_SIZE: usize = 1024;

/// Why a single relay sub-call failed. Only ever logged inside `forward`;
/// the public surface is the returned bool.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Telegram API error: {status} - {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("image payload invalid: {0}")]
    Image(#[from] crate::image::DataUrlError),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        // A reqwest error renders the request URL, and every Bot API URL
        // embeds the bot token in its path. Strip it before `forward` logs
        // the failure.
        RelayError::Network(err.without_url())
    }
}

/// Split a message into fixed-size chunks, counting characters rather than
/// bytes so multi-byte text never lands on a split boundary. No word-break
/// awareness; `chunk_size` must be non-zero.
pub fn chunk_message(text: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chunk_size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
