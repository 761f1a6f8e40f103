// src/config/mod.rs
// All tunables come from the environment (.env supported); secrets do not
// live here — GEMINI_API_KEY / TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID are
// read by the client constructors and never stored or logged.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct LookrateConfig {
    // ── Server Configuration
    pub host: String,
    pub port: u16,
    pub static_dir: String,

    // ── Gemini Configuration
    pub gemini_base_url: String,
    pub gemini_model: String,

    // ── Telegram Configuration
    pub telegram_base_url: String,

    // ── Timeouts (in seconds)
    pub gemini_timeout: u64,
    pub telegram_timeout: u64,

    // ── Logging Configuration
    pub log_level: String,
}

// Handles values with trailing comments and extra whitespace, the way they
// come out of hand-edited .env files.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => {
                    eprintln!("Config: {} = {} (from environment)", key, clean_val);
                    parsed
                }
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl LookrateConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            host: env_var_or("LOOKRATE_HOST", "0.0.0.0".to_string()),
            port: env_var_or("LOOKRATE_PORT", 8080),
            static_dir: env_var_or("LOOKRATE_STATIC_DIR", "static".to_string()),
            gemini_base_url: env_var_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com".to_string(),
            ),
            gemini_model: env_var_or("GEMINI_MODEL", "gemini-2.5-flash".to_string()),
            telegram_base_url: env_var_or(
                "TELEGRAM_BASE_URL",
                "https://api.telegram.org".to_string(),
            ),
            gemini_timeout: env_var_or("GEMINI_TIMEOUT", 60),
            telegram_timeout: env_var_or("TELEGRAM_TIMEOUT", 30),
            log_level: env_var_or("LOOKRATE_LOG_LEVEL", "info".to_string()),
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug(&self) -> bool {
        self.log_level.to_lowercase() == "debug"
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<LookrateConfig> = Lazy::new(LookrateConfig::from_env);
