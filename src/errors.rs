//! Error types for the Websupport API client

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

const JSON_MEDIA_TYPE: &str = "application/json";

/// Errors returned by [`crate::api::WebsupportClient`]
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build request: {0}")]
    Construction(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Protocol(#[from] ApiError),

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to write response body: {0}")]
    Sink(#[from] std::io::Error),

    #[error("Response envelope with status {0:?} carried no item")]
    EmptyEnvelope(String),
}

/// An error status (400-599) returned by the API, classified by the shape of its body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("FATAL ERROR: Unable to parse returned error message - incorrect Content-Type")]
    IncorrectContentType,

    #[error("FATAL ERROR: Unable to parse returned error message - Failed to unmarshal response JSON")]
    Unparsable,

    #[error("ERROR DATA (Status code = {code}): {message} \n")]
    Coded { code: u16, message: String },

    #[error("ERROR DATA (Status code = {status}): {} \n", .messages.join(" | "))]
    Fields { status: u16, messages: Vec<String> },
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Option<ErrorData>,
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorData {
    #[serde(default)]
    content: Option<Vec<String>>,
    #[serde(default)]
    name: Option<Vec<String>>,
}

impl ApiError {
    /// Classify an error response from its status, `Content-Type` and body.
    pub fn from_response(status: StatusCode, content_type: &str, body: &[u8]) -> Self {
        if !content_type.starts_with(JSON_MEDIA_TYPE) {
            return ApiError::IncorrectContentType;
        }

        let response: ErrorResponse = match serde_json::from_slice(body) {
            Ok(response) => response,
            Err(_) => return ApiError::Unparsable,
        };

        match (response.code, response.message) {
            (Some(code), Some(message)) if code != 0 && !message.is_empty() => {
                ApiError::Coded { code, message }
            }
            _ => {
                let errors = response.errors.unwrap_or_default();
                ApiError::Fields {
                    status: status.as_u16(),
                    messages: errors
                        .name
                        .unwrap_or_default()
                        .into_iter()
                        .chain(errors.content.unwrap_or_default())
                        .collect(),
                }
            }
        }
    }
}
