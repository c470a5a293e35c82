use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("No body provided")]
    MissingBody,

    #[error("Invalid update: {0}")]
    InvalidUpdate(String),

    #[error("Telegram API error: {0}")]
    ApiError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Invalid multipart payload: {0}")]
    MultipartError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        // The request URL embeds the bot token.
        BotError::HttpError(error.without_url().to_string())
    }
}
