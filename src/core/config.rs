use std::env;
use std::fmt;

use url::Url;

use crate::errors::BotError;

/// Webhook address the Netlify deployment serves updates on.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://creatmy.netlify.app/.netlify/functions/telegram-bot";

#[derive(Clone)]
pub struct AppConfig {
    pub bot_token: String,
}

impl AppConfig {
    /// Reads the bot credential from `BOT_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns `BotError::ConfigError` when the variable is unset or blank.
    pub fn from_env() -> Result<Self, BotError> {
        let bot_token = env::var("BOT_TOKEN")
            .map_err(|e| BotError::ConfigError(format!("BOT_TOKEN: {e}")))?;
        Self::new(bot_token)
    }

    /// # Errors
    ///
    /// Returns `BotError::ConfigError` for a blank token.
    pub fn new(bot_token: impl Into<String>) -> Result<Self, BotError> {
        let bot_token = bot_token.into().trim().to_string();
        if bot_token.is_empty() {
            return Err(BotError::ConfigError("BOT_TOKEN is empty".to_string()));
        }
        Ok(Self { bot_token })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bot_token", &"<redacted>")
            .finish()
    }
}

/// Reads `WEBHOOK_URL`, falling back to [`DEFAULT_WEBHOOK_URL`].
///
/// # Errors
///
/// Returns `BotError::ConfigError` if the value is not an absolute https URL.
pub fn webhook_url_from_env() -> Result<Url, BotError> {
    let raw = env::var("WEBHOOK_URL").unwrap_or_else(|_| DEFAULT_WEBHOOK_URL.to_string());
    parse_webhook_url(&raw)
}

pub(crate) fn parse_webhook_url(raw: &str) -> Result<Url, BotError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| BotError::ConfigError(format!("WEBHOOK_URL: {e}")))?;
    if url.scheme() != "https" {
        return Err(BotError::ConfigError(
            "WEBHOOK_URL: Telegram only delivers to https endpoints".to_string(),
        ));
    }
    Ok(url)
}
