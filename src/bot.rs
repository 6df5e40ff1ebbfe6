//! # Bot Module
//!
//! Message routing for the bot: classifies each incoming Telegram message,
//! dispatches it to the matching flow, and builds the single reply. Solver
//! and OCR failures are converted into user-facing replies here; only
//! transport errors escape to the dispatcher.

use anyhow::Result;
use log::{error, info};
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::FileId;

use crate::config::BotConfig;
use crate::ocr;
use crate::ocr_errors::OcrError;
use crate::solver::{self, Resolution};

/// Greeting sent in response to the /start command
pub const GREETING: &str =
    "Hello! Send me a mathematical expression, or a photo of one, and I will solve it.";

/// Reply sent when a text message cannot be solved
pub const COULD_NOT_SOLVE: &str = "Could not solve the expression.";

/// One incoming message, classified by shape
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// The /start command
    Start,
    /// A plain text message, treated as an expression to solve
    Expression(String),
    /// A photo; holds the file id of its largest size variant
    Photo(FileId),
    /// Anything else (other commands, documents, stickers, ...)
    Unsupported,
}

/// Classify the body of a text message
pub fn classify_text(text: &str) -> InboundEvent {
    if text.starts_with('/') {
        if text == "/start" {
            InboundEvent::Start
        } else {
            InboundEvent::Unsupported
        }
    } else {
        InboundEvent::Expression(text.to_string())
    }
}

/// Classify one incoming Telegram message
pub fn classify(msg: &Message) -> InboundEvent {
    if let Some(text) = msg.text() {
        classify_text(text)
    } else if let Some(largest_photo) = msg.photo().and_then(|photos| photos.last()) {
        InboundEvent::Photo(largest_photo.file.id.clone())
    } else {
        InboundEvent::Unsupported
    }
}

/// Build the reply for a text-path resolution.
///
/// On success only the result is sent; the user already sees their own
/// message in the chat, so the original text is not echoed back.
pub fn expression_reply(outcome: &Resolution) -> String {
    match outcome {
        Resolution::Solved { simplified, .. } => format!("Result: {simplified}"),
        Resolution::Unparseable { .. } => COULD_NOT_SOLVE.to_string(),
    }
}

/// Build the reply for a photo-path resolution.
///
/// OCR output is unreliable, so the reply always echoes the extracted text
/// verbatim alongside the result or the failure notice.
pub fn photo_reply(outcome: &Resolution) -> String {
    match outcome {
        Resolution::Solved {
            original,
            simplified,
        } => format!("Text from image: {original}\nResult: {simplified}"),
        Resolution::Unparseable { original } => {
            format!("Could not solve the text read from the image: {original}")
        }
    }
}

/// Build the user-facing reply for a failed image extraction
pub fn ocr_failure_reply(err: &OcrError) -> String {
    match err {
        OcrError::Validation(msg) => format!("Could not process the image: {msg}."),
        OcrError::ImageLoad(_) => {
            "Could not read the image. Please try a clearer photo.".to_string()
        }
        OcrError::Initialization(_) | OcrError::Extraction(_) => {
            "Text recognition failed. Please try again with another photo.".to_string()
        }
    }
}

/// Download the raw bytes of a Telegram file.
///
/// Transport failures propagate to the caller; no reply is sent for them.
async fn download_image_bytes(bot: &Bot, file_id: FileId) -> Result<Vec<u8>> {
    let file = bot.get_file(file_id).await?;
    let url = format!(
        "https://api.telegram.org/file/bot{}/{}",
        bot.token(),
        file.path
    );

    let response = reqwest::get(&url).await?.error_for_status()?;
    let bytes = response.bytes().await?;

    Ok(bytes.to_vec())
}

async fn handle_expression_message(bot: &Bot, chat_id: ChatId, text: &str) -> Result<()> {
    info!("Received expression text from chat {chat_id}: {text}");

    let outcome = solver::resolve(text);
    bot.send_message(chat_id, expression_reply(&outcome))
        .await?;

    Ok(())
}

async fn handle_photo_message(
    bot: &Bot,
    chat_id: ChatId,
    file_id: FileId,
    config: &BotConfig,
) -> Result<()> {
    info!("Received photo from chat {chat_id}");

    // The image buffer is scoped to this call and freed on return
    let bytes = download_image_bytes(bot, file_id).await?;

    let reply = match ocr::extract_text_from_bytes(&bytes, &config.ocr) {
        Ok(extracted_text) => {
            info!(
                "Extracted {} characters of text from photo in chat {chat_id}",
                extracted_text.len()
            );
            photo_reply(&solver::resolve(&extracted_text))
        }
        Err(e) => {
            error!("OCR processing failed for chat {chat_id}: {e}");
            ocr_failure_reply(&e)
        }
    };

    bot.send_message(chat_id, reply).await?;

    Ok(())
}

/// Handle one incoming Telegram message.
///
/// Every supported message shape yields exactly one reply; unsupported
/// shapes yield none.
pub async fn message_handler(bot: Bot, msg: Message, config: Arc<BotConfig>) -> Result<()> {
    match classify(&msg) {
        InboundEvent::Start => {
            info!("Received /start from chat {}", msg.chat.id);
            bot.send_message(msg.chat.id, GREETING).await?;
        }
        InboundEvent::Expression(text) => {
            handle_expression_message(&bot, msg.chat.id, &text).await?;
        }
        InboundEvent::Photo(file_id) => {
            handle_photo_message(&bot, msg.chat.id, file_id, &config).await?;
        }
        InboundEvent::Unsupported => {
            // Deliberately no reply for unrecognized message shapes
            info!("Ignoring unsupported message from chat {}", msg.chat.id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_command_classification() {
        assert_eq!(classify_text("/start"), InboundEvent::Start);
    }

    #[test]
    fn test_unknown_commands_are_unsupported() {
        assert_eq!(classify_text("/help"), InboundEvent::Unsupported);
        assert_eq!(classify_text("/start now"), InboundEvent::Unsupported);
    }

    #[test]
    fn test_plain_text_classifies_as_expression() {
        assert_eq!(
            classify_text("2+2"),
            InboundEvent::Expression("2+2".to_string())
        );
    }

    #[test]
    fn test_solved_expression_reply_contains_result() {
        let outcome = Resolution::Solved {
            original: "2+2".to_string(),
            simplified: "4".to_string(),
        };
        let reply = expression_reply(&outcome);

        assert!(reply.contains('4'));
        assert_ne!(reply, COULD_NOT_SOLVE);
    }

    #[test]
    fn test_unparseable_expression_reply_is_fixed() {
        let outcome = Resolution::Unparseable {
            original: "hello".to_string(),
        };
        assert_eq!(expression_reply(&outcome), COULD_NOT_SOLVE);
    }

    #[test]
    fn test_photo_reply_always_echoes_extracted_text() {
        let solved = Resolution::Solved {
            original: "3*3".to_string(),
            simplified: "9".to_string(),
        };
        let reply = photo_reply(&solved);
        assert!(reply.contains("3*3"));
        assert!(reply.contains('9'));

        let unparseable = Resolution::Unparseable {
            original: "scribble".to_string(),
        };
        assert!(photo_reply(&unparseable).contains("scribble"));
    }

    #[test]
    fn test_ocr_failure_replies_are_user_facing() {
        let errors = [
            OcrError::Validation("too large".to_string()),
            OcrError::Initialization("no tessdata".to_string()),
            OcrError::ImageLoad("bad pixels".to_string()),
            OcrError::Extraction("engine failure".to_string()),
        ];

        for err in &errors {
            let reply = ocr_failure_reply(err);
            assert!(!reply.is_empty());
        }
    }
}
