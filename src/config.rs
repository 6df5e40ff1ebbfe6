//! # Configuration Module
//!
//! Runtime configuration for the bot: the Telegram credential and the OCR
//! processing settings. Built once at startup and shared read-only across
//! message handlers.

use anyhow::{Context, Result};
use std::env;

// Constants for OCR configuration
pub const DEFAULT_LANGUAGES: &str = "eng";
pub const FORMAT_DETECTION_BUFFER_SIZE: usize = 32;
pub const MIN_FORMAT_BYTES: usize = 8;
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024; // 10MB limit for image payloads

/// Configuration for OCR processing
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// OCR language codes (e.g., "eng", "eng+fra")
    pub languages: String,
    /// Number of leading bytes inspected for format detection
    pub buffer_size: usize,
    /// Minimum bytes required for format detection
    pub min_format_bytes: usize,
    /// Maximum allowed image size in bytes
    pub max_image_bytes: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.to_string(),
            buffer_size: FORMAT_DETECTION_BUFFER_SIZE,
            min_format_bytes: MIN_FORMAT_BYTES,
            max_image_bytes: MAX_IMAGE_BYTES,
        }
    }
}

/// Top-level bot configuration
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot API token
    pub token: String,
    /// OCR processing settings
    pub ocr: OcrConfig,
}

impl BotConfig {
    /// Build the configuration from environment variables.
    ///
    /// `TELEGRAM_BOT_TOKEN` is required. `OCR_LANGUAGES` optionally
    /// overrides the Tesseract language set.
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN must be set")?;

        let mut ocr = OcrConfig::default();
        if let Ok(languages) = env::var("OCR_LANGUAGES") {
            if !languages.is_empty() {
                ocr.languages = languages;
            }
        }

        Ok(Self { token, ocr })
    }
}
