use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::models::Update;
use crate::errors::BotError;

/// Pulls the raw body out of a hosting event, undoing base64 transport
/// encoding when the platform flags it.
///
/// # Errors
///
/// `MissingBody` for an absent, null or empty body; `InvalidUpdate` for a
/// non-string body or one that fails to decode.
pub fn extract_body(payload: &Value) -> Result<Option<String>, BotError> {
    let body = match payload.get("body") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s,
        Some(other) => {
            return Err(BotError::InvalidUpdate(format!(
                "body is not a string: {other}"
            )));
        }
    };

    if is_base64_encoded(payload) {
        let bytes = decode_base64_body(body)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| BotError::InvalidUpdate(format!("body is not UTF-8: {e}")))?;
        return Ok(Some(text));
    }

    Ok(Some(body.clone()))
}

pub fn is_base64_encoded(payload: &Value) -> bool {
    payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// # Errors
///
/// Returns `InvalidUpdate` if `body` is not valid standard base64.
pub fn decode_base64_body(body: &str) -> Result<Vec<u8>, BotError> {
    STANDARD
        .decode(body.trim())
        .map_err(|e| BotError::InvalidUpdate(format!("base64 body: {e}")))
}

/// Decodes a webhook body into an [`Update`].
///
/// # Errors
///
/// `MissingBody` when there is nothing to parse, `InvalidUpdate` when the
/// body is not JSON or has no `message.chat.id`.
pub fn parse_update(body: Option<&str>) -> Result<Update, BotError> {
    let body = match body {
        Some(b) if !b.is_empty() => b,
        _ => return Err(BotError::MissingBody),
    };

    serde_json::from_str::<Update>(body).map_err(|e| BotError::InvalidUpdate(e.to_string()))
}

/// Returns the command name carried by the first word of `text`.
///
/// `/Start payload` yields `start`. An `@username` suffix is accepted only
/// when it names `bot_username`; a command addressed to any other bot, or
/// text that does not open with `/`, yields `None`.
pub fn extract_command(text: &str, bot_username: Option<&str>) -> Option<String> {
    let token = text.split_whitespace().next()?;
    let token = token.strip_prefix('/')?;
    let name = match token.split_once('@') {
        None => token,
        Some((name, addressee)) => {
            let ours = bot_username.map(|u| u.trim_start_matches('@'))?;
            if !addressee.eq_ignore_ascii_case(ours) {
                return None;
            }
            name
        }
    };
    if name.is_empty() {
        return None;
    }
    Some(name.to_lowercase())
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}
