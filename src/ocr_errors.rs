//! # OCR Error Types Module
//!
//! Custom error types for the image-to-text extraction path, one variant
//! per processing stage that can fail.

/// Custom error types for OCR operations
#[derive(Debug, Clone)]
pub enum OcrError {
    /// Image byte validation errors (size bounds, unknown format)
    Validation(String),
    /// OCR engine initialization errors
    Initialization(String),
    /// Image loading errors
    ImageLoad(String),
    /// Text extraction errors
    Extraction(String),
}

impl std::fmt::Display for OcrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OcrError::Validation(msg) => write!(f, "Validation error: {msg}"),
            OcrError::Initialization(msg) => write!(f, "Initialization error: {msg}"),
            OcrError::ImageLoad(msg) => write!(f, "Image load error: {msg}"),
            OcrError::Extraction(msg) => write!(f, "Extraction error: {msg}"),
        }
    }
}

impl std::error::Error for OcrError {}
