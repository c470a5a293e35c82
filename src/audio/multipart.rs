//! `multipart/form-data` decoding for the audio upload body.

use bytes::Bytes;
use futures::stream;
use std::convert::Infallible;

use crate::errors::BotError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<FormField>,
}

impl MultipartForm {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Trimmed UTF-8 value of a text field.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        let field = self.field(name)?;
        let value = std::str::from_utf8(&field.data).ok()?.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

impl From<multer::Error> for BotError {
    fn from(error: multer::Error) -> Self {
        BotError::MultipartError(error.to_string())
    }
}

/// Boundary from a `multipart/form-data` content type, `None` when the
/// header is another media type or lacks the parameter.
pub fn boundary_from_content_type(content_type: &str) -> Option<String> {
    multer::parse_boundary(content_type).ok()
}

/// Decodes a complete, already buffered request body.
///
/// # Errors
///
/// Returns `BotError::MultipartError` when the body is not a well-formed
/// multipart stream for `boundary`.
pub async fn parse_multipart(body: Vec<u8>, boundary: &str) -> Result<MultipartForm, BotError> {
    let chunks = stream::iter([Ok::<Bytes, Infallible>(Bytes::from(body))]);
    let mut multipart = multer::Multipart::new(chunks, boundary.to_string());

    let mut form = MultipartForm::default();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };
        let file_name = field.file_name().map(ToString::to_string);
        let data = field.bytes().await?.to_vec();

        form.fields.push(FormField {
            name,
            file_name,
            data,
        });
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_requires_form_data_media_type() {
        assert_eq!(
            boundary_from_content_type("multipart/form-data; boundary=abc").as_deref(),
            Some("abc")
        );
        assert_eq!(boundary_from_content_type("application/json; boundary=abc"), None);
        assert_eq!(boundary_from_content_type("multipart/form-data"), None);
    }

    #[test]
    fn text_ignores_blank_values() {
        let form = MultipartForm {
            fields: vec![FormField {
                name: "chat_id".to_string(),
                file_name: None,
                data: b"  ".to_vec(),
            }],
        };
        assert_eq!(form.text("chat_id"), None);
        assert_eq!(form.text("audio"), None);
    }
}
