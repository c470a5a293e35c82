use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One inbound Telegram update carrying a message.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: Option<i64>,
    pub message: Message,
}

impl Update {
    #[must_use]
    pub fn chat_id(&self) -> i64 {
        self.message.chat.id
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.message.text.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: Option<i64>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub date: Option<i64>,
    /// Fields the webhook does not interpret (entities, photos, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

/// Text formatting modes understood by `sendMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub url: String,
}

impl InlineKeyboardButton {
    #[must_use]
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

/// Payload for `sendMessage`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingMessage {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// A recorded track headed for `sendAudio`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    pub chat_id: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}
