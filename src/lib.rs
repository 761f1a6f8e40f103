// src/lib.rs
//! lookrate: photo in, star rating out, best-effort Telegram forward on
//! the side.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod format;
pub mod image;
pub mod progress;
pub mod relay;
pub mod server;
pub mod session;
pub mod state;
