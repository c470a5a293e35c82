//! Audio upload Lambda handler.
//!
//! The mini-app posts a recorded track as `multipart/form-data` with the
//! user's `chat_id`; the track is forwarded to that chat with `sendAudio`.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::multipart::{MultipartForm, boundary_from_content_type, parse_multipart};
use crate::api::helpers::{ResponseEnvelope, err_response, ok_message};
use crate::api::parsing::{decode_base64_body, get_header_value, is_base64_encoded};
use crate::core::config::AppConfig;
use crate::core::models::AudioUpload;
use crate::errors::BotError;
use crate::telegram::{AudioSender, TelegramClient};

pub const RECORDING_FILE_NAME: &str = "recording.mp3";

pub struct AudioUploadHandler {
    sender: Arc<dyn AudioSender>,
}

impl AudioUploadHandler {
    #[must_use]
    pub fn new(sender: Arc<dyn AudioSender>) -> Self {
        Self { sender }
    }

    /// # Errors
    ///
    /// Returns an error if the Bot API client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        Ok(Self::new(Arc::new(TelegramClient::new(
            config.bot_token.clone(),
        )?)))
    }

    pub async fn handle_request(&self, event: &Value) -> ResponseEnvelope {
        self.process(event)
            .await
            .with_header("Access-Control-Allow-Origin", "*")
    }

    async fn process(&self, event: &Value) -> ResponseEnvelope {
        info!("send-audio function invoked");

        let content_type = event
            .get("headers")
            .and_then(|h| get_header_value(h, "Content-Type"))
            .unwrap_or_default();
        info!(%content_type, "Upload content type");

        if !content_type.contains("multipart/form-data") {
            warn!("Rejected upload with non-multipart content type");
            return err_response(400, "Expected multipart/form-data");
        }

        let body = match read_body(event) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Could not decode upload body");
                return err_response(400, &e.to_string());
            }
        };

        // A malformed form falls through to the field checks below.
        let form = match boundary_from_content_type(content_type) {
            Some(boundary) => parse_multipart(body, &boundary).await.unwrap_or_else(|e| {
                warn!(error = %e, "Upload body is not a readable form");
                MultipartForm::default()
            }),
            None => {
                warn!("Multipart content type has no boundary");
                MultipartForm::default()
            }
        };

        let Some(chat_id) = form.text("chat_id") else {
            warn!("Upload is missing chat_id");
            return err_response(400, "chat_id not provided");
        };

        let audio = match form.field("audio") {
            Some(field) if !field.data.is_empty() => field.data.clone(),
            _ => {
                warn!(%chat_id, "Upload is missing the audio file");
                return err_response(400, "Audio file is missing or empty");
            }
        };

        let upload = AudioUpload {
            chat_id,
            file_name: RECORDING_FILE_NAME.to_string(),
            bytes: audio,
        };
        info!(chat_id = %upload.chat_id, size = upload.bytes.len(), "Forwarding track to Telegram");

        match self.sender.send_audio(&upload).await {
            Ok(()) => {
                info!(chat_id = %upload.chat_id, "Track delivered");
                ok_message("Track sent to Telegram")
            }
            Err(BotError::ApiError(description)) => {
                error!(%description, "Telegram rejected the track");
                err_response(500, &format!("Telegram error: {description}"))
            }
            Err(e) => {
                error!(error = %e, "Failed to deliver track");
                err_response(500, &format!("Server error: {e}"))
            }
        }
    }
}

fn read_body(event: &Value) -> Result<Vec<u8>, BotError> {
    let body = event.get("body").and_then(Value::as_str).unwrap_or_default();
    if is_base64_encoded(event) {
        return decode_base64_body(body);
    }
    Ok(body.as_bytes().to_vec())
}

/// Lambda entry point for the audio upload function.
///
/// # Errors
///
/// Never fails at the runtime level.
#[tracing::instrument(level = "info", skip(handler, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(
    handler: &AudioUploadHandler,
    event: LambdaEvent<Value>,
) -> Result<ResponseEnvelope, Error> {
    Ok(handler.handle_request(&event.payload).await)
}
