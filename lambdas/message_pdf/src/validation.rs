use serde::Serialize;
use thiserror::Error;

pub(crate) const MAX_MESSAGE_LENGTH: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum ErrorCode {
    MissingParameter,
    MessageTooLong,
    InvalidCharacters,
    InternalError,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MessageError {
    #[error("Message parameter is required")]
    MissingParameter,
    #[error("Message is too long (max {max} characters)")]
    TooLong { max: usize },
    #[error("Message must contain only ASCII characters")]
    InvalidCharacters,
}

impl MessageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MessageError::MissingParameter => ErrorCode::MissingParameter,
            MessageError::TooLong { .. } => ErrorCode::MessageTooLong,
            MessageError::InvalidCharacters => ErrorCode::InvalidCharacters,
        }
    }
}

/// A message that passed validation and is safe to embed as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedMessage(String);

impl ValidatedMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Checks run in a fixed order: presence, length, then character set.
pub(crate) fn validate_message(message: Option<&str>) -> Result<ValidatedMessage, MessageError> {
    let message = match message {
        Some(message) if !message.is_empty() => message,
        _ => return Err(MessageError::MissingParameter),
    };

    // Length is counted in UTF-16 units, the way browsers and JS clients count it.
    if message.encode_utf16().count() > MAX_MESSAGE_LENGTH {
        return Err(MessageError::TooLong {
            max: MAX_MESSAGE_LENGTH,
        });
    }

    if !message.is_ascii() {
        return Err(MessageError::InvalidCharacters);
    }

    Ok(ValidatedMessage(escape_html(message)))
}

pub(crate) fn escape_html(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len());
    for c in message.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
