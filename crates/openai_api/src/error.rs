use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum OpenAiApiError {
    MissingApiKey,
    InvalidBaseUrl(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    Serde(JsonError),
    EmptyCompletion,
    Unknown(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(rename = "error")]
    pub value: Option<ErrorPayloadFields>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayloadFields {
    pub message: Option<String>,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

impl ErrorPayloadFields {
    pub fn message_or_fallback(&self) -> Option<String> {
        let explicit = self.message.as_deref().and_then(non_empty_string)?;
        let label = self
            .code
            .as_deref()
            .and_then(non_empty_string)
            .or_else(|| self.type_.as_deref().and_then(non_empty_string));

        match label {
            Some(label) => Some(format!("{explicit} ({label})")),
            None => Some(explicit.to_owned()),
        }
    }
}

impl fmt::Display for OpenAiApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "api key is required"),
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::EmptyCompletion => write!(f, "completion carried no content"),
            Self::Unknown(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for OpenAiApiError {}

impl From<reqwest::Error> for OpenAiApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for OpenAiApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    let parsed = match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => payload,
        Err(_) => {
            return if body.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                body.to_string()
            };
        }
    };

    if let Some(error) = parsed.value {
        if let Some(message) = error.message_or_fallback() {
            return message;
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

fn non_empty_string(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
