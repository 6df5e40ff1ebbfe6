//! # OCR Module
//!
//! Converts raw image bytes into best-effort text using Tesseract OCR.
//! Bytes are validated (size bounds, magic-byte format sniff) before the
//! engine is initialized; corrupt or unsupported input is a hard error
//! rather than an empty result. No image preprocessing is performed.

use crate::config::OcrConfig;
use crate::ocr_errors::OcrError;
use leptess::LepTess;
use log::info;

/// Check whether the byte buffer starts with the magic number of an image
/// format Tesseract can process
pub fn is_supported_image_format(bytes: &[u8], config: &OcrConfig) -> bool {
    if bytes.len() < config.min_format_bytes {
        info!(
            "Not enough bytes to determine image format (got {}, need at least {})",
            bytes.len(),
            config.min_format_bytes
        );
        return false;
    }

    let header = &bytes[..bytes.len().min(config.buffer_size)];
    match image::guess_format(header) {
        Ok(format) => {
            // Tesseract supports: PNG, JPEG/JPG, BMP, TIFF
            let supported = matches!(
                format,
                image::ImageFormat::Png
                    | image::ImageFormat::Jpeg
                    | image::ImageFormat::Bmp
                    | image::ImageFormat::Tiff
            );

            if supported {
                info!("Detected supported image format: {format:?}");
            } else {
                info!("Detected unsupported image format: {format:?}");
            }

            supported
        }
        Err(e) => {
            info!("Could not determine image format: {e}");
            false
        }
    }
}

/// Validate image bytes before handing them to the OCR engine
fn validate_image_bytes(bytes: &[u8], config: &OcrConfig) -> Result<(), OcrError> {
    if bytes.is_empty() {
        return Err(OcrError::Validation("image is empty".to_string()));
    }

    if bytes.len() as u64 > config.max_image_bytes {
        return Err(OcrError::Validation(format!(
            "image is too large ({} bytes, limit is {})",
            bytes.len(),
            config.max_image_bytes
        )));
    }

    if !is_supported_image_format(bytes, config) {
        return Err(OcrError::Validation(
            "unsupported or unrecognized image format".to_string(),
        ));
    }

    Ok(())
}

/// Extract text from in-memory image bytes using Tesseract OCR.
///
/// The returned text is whitespace-normalized: lines are trimmed and blank
/// lines dropped. An image in which Tesseract finds no text yields an
/// empty string, which is a successful extraction, not an error.
pub fn extract_text_from_bytes(bytes: &[u8], config: &OcrConfig) -> Result<String, OcrError> {
    info!(
        "Starting OCR text extraction from {} bytes of image data",
        bytes.len()
    );

    validate_image_bytes(bytes, config)?;

    // Create a new Tesseract instance for the configured languages
    let mut tess = LepTess::new(None, &config.languages)
        .map_err(|e| OcrError::Initialization(format!("failed to initialize Tesseract: {e}")))?;

    // Load the image for OCR processing directly from the buffer
    tess.set_image_from_mem(bytes)
        .map_err(|e| OcrError::ImageLoad(format!("failed to load image for OCR: {e}")))?;

    // Extract text from the image
    let extracted_text = tess
        .get_utf8_text()
        .map_err(|e| OcrError::Extraction(format!("failed to extract text from image: {e}")))?;

    // Clean up the extracted text (remove extra whitespace and empty lines)
    let cleaned_text = extracted_text
        .trim()
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<&str>>()
        .join("\n");

    info!(
        "OCR extraction completed. Extracted {} characters of text",
        cleaned_text.len()
    );

    Ok(cleaned_text)
}
