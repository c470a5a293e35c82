//! Response envelopes returned to the hosting platform.

use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// `{statusCode, headers?, body}` as expected by Lambda / Netlify Functions.
///
/// `body` is the JSON-encoded string of a small object, never a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    fn new(status_code: u16, body: &Value) -> Self {
        Self {
            status_code,
            headers: BTreeMap::new(),
            body: body.to_string(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Decoded `body`, mostly useful for assertions.
    #[must_use]
    pub fn body_json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// Returns a 200 OK response carrying `{"status": ...}`.
#[must_use]
pub fn ok_status(status: &str) -> ResponseEnvelope {
    ResponseEnvelope::new(200, &json!({ "status": status }))
}

/// Returns a 200 OK response carrying `{"message": ...}`.
#[must_use]
pub fn ok_message(message: &str) -> ResponseEnvelope {
    ResponseEnvelope::new(200, &json!({ "message": message }))
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> ResponseEnvelope {
    ResponseEnvelope::new(status_code, &json!({ "error": message }))
}
