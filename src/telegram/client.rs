//! Telegram Bot API client
//!
//! Thin wrapper over the HTTP Bot API. Calls are made once; delivery retries
//! are left to Telegram and the hosting platform.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::core::models::{AudioUpload, OutgoingMessage};
use crate::errors::BotError;

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Capability used by command handlers to reply in a chat.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the message could not be delivered.
    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), BotError>;
}

/// Capability used by the audio upload function.
#[async_trait]
pub trait AudioSender: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the track could not be delivered.
    async fn send_audio(&self, upload: &AudioUpload) -> Result<(), BotError>;
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    token: String,
    base_url: Url,
}

impl TelegramClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(token: impl Into<String>) -> Result<Self, BotError> {
        Self::with_base_url(token, TELEGRAM_API_BASE)
    }

    /// Points the client at a different Bot API server (local server, tests).
    ///
    /// # Errors
    ///
    /// Returns `BotError::ConfigError` for an unparsable base URL and
    /// `BotError::HttpError` if the HTTP client cannot be built.
    pub fn with_base_url(token: impl Into<String>, base_url: &str) -> Result<Self, BotError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| BotError::ConfigError(format!("Bot API base URL: {e}")))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| BotError::HttpError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            token: token.into(),
            base_url,
        })
    }

    fn method_url(&self, method: &str) -> Result<Url, BotError> {
        self.base_url
            // "./" keeps `bot<id>:` from being read as a URL scheme.
            .join(&format!("./bot{}/{}", self.token, method))
            .map_err(|e| BotError::ConfigError(format!("Bot API URL for {method}: {e}")))
    }

    /// Registers `url` as the bot's webhook.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or Telegram rejects the URL.
    pub async fn set_webhook(&self, url: &Url) -> Result<(), BotError> {
        let resp = self
            .http
            .post(self.method_url("setWebhook")?)
            .json(&json!({ "url": url.as_str() }))
            .send()
            .await?;

        check_response("setWebhook", resp).await
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), BotError> {
        debug!(chat_id = message.chat_id, "Calling sendMessage");
        let resp = self
            .http
            .post(self.method_url("sendMessage")?)
            .json(message)
            .send()
            .await?;

        check_response("sendMessage", resp).await
    }
}

#[async_trait]
impl AudioSender for TelegramClient {
    async fn send_audio(&self, upload: &AudioUpload) -> Result<(), BotError> {
        debug!(
            chat_id = %upload.chat_id,
            size = upload.bytes.len(),
            "Calling sendAudio"
        );
        let audio = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str("audio/mpeg")?;
        let form = Form::new()
            .text("chat_id", upload.chat_id.clone())
            .part("audio", audio);

        let resp = self
            .http
            .post(self.method_url("sendAudio")?)
            .multipart(form)
            .send()
            .await?;

        check_response("sendAudio", resp).await
    }
}

/// Telegram answers errors with a non-2xx status and an `ok: false` body,
/// so the body is decoded before the status is considered.
async fn check_response(method: &str, resp: reqwest::Response) -> Result<(), BotError> {
    let status = resp.status();
    let body: ApiResponse = match resp.json().await {
        Ok(body) => body,
        Err(e) => {
            warn!(method, %status, "Undecodable Bot API response");
            return Err(BotError::HttpError(format!(
                "{method} HTTP {status}: {}",
                e.without_url()
            )));
        }
    };

    if body.ok {
        return Ok(());
    }

    let description = body
        .description
        .unwrap_or_else(|| format!("{method} failed with HTTP {status}"));
    warn!(method, %status, %description, "Bot API call rejected");
    Err(BotError::ApiError(description))
}
