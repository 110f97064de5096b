//! The failure shapes a remote call can produce.
//!
//! Failures are decoded once, at the HTTP boundary, into [`ErrorShape`].
//! Everything downstream matches on the enum instead of probing fields.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::traits::HttpError;

/// Sentinel statuses for requests that never produced a usable response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportStatus {
    /// The request could not be sent or the connection dropped.
    FetchError,
    /// A response arrived but its body could not be decoded.
    ParsingError,
    /// The request did not complete in time.
    TimeoutError,
}

impl TransportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportStatus::FetchError => "FETCH_ERROR",
            TransportStatus::ParsingError => "PARSING_ERROR",
            TransportStatus::TimeoutError => "TIMEOUT_ERROR",
        }
    }
}

impl fmt::Display for TransportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One field-level validation failure reported by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationError {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: serde_json::Value::Null,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    #[serde(default)]
    pub validation_errors: Vec<ValidationError>,
}

/// Body of a failed API response:
/// `{ success: false, message?, error?, details?: { validationErrors? } }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorPayload {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<ErrorDetails>,
}

impl ApiErrorPayload {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    pub fn with_validation_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            success: Some(false),
            details: Some(ErrorDetails {
                validation_errors: errors,
            }),
            ..Default::default()
        }
    }

    /// Validation entries in the order the API sent them.
    pub fn validation_errors(&self) -> &[ValidationError] {
        self.details
            .as_ref()
            .map(|d| d.validation_errors.as_slice())
            .unwrap_or(&[])
    }
}

/// A failed query or mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorShape {
    /// No usable response was received.
    Network {
        status: TransportStatus,
        message: Option<String>,
    },
    /// The server answered with a non-success status.
    Api {
        status: u16,
        payload: Option<ApiErrorPayload>,
    },
    /// A client-side failure unrelated to the transport.
    Generic { message: Option<String> },
}

impl ErrorShape {
    pub fn fetch(message: impl Into<String>) -> Self {
        ErrorShape::Network {
            status: TransportStatus::FetchError,
            message: Some(message.into()),
        }
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        ErrorShape::Network {
            status: TransportStatus::ParsingError,
            message: Some(message.into()),
        }
    }

    pub fn status(status: u16) -> Self {
        ErrorShape::Api {
            status,
            payload: None,
        }
    }

    pub fn api(status: u16, payload: ApiErrorPayload) -> Self {
        ErrorShape::Api {
            status,
            payload: Some(payload),
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        ErrorShape::Generic {
            message: Some(message.into()),
        }
    }

    /// Decode a non-success HTTP response. A body that is not an error
    /// payload leaves `payload` empty; the status still classifies it.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let payload = serde_json::from_slice::<ApiErrorPayload>(body).ok();
        ErrorShape::Api { status, payload }
    }

    /// The API payload, if this is an API failure that carried one.
    pub fn payload(&self) -> Option<&ApiErrorPayload> {
        match self {
            ErrorShape::Api { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// HTTP status for API failures.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ErrorShape::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transport sentinel for network failures.
    pub fn transport_status(&self) -> Option<TransportStatus> {
        match self {
            ErrorShape::Network { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<HttpError> for ErrorShape {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::TimedOut(msg) => ErrorShape::Network {
                status: TransportStatus::TimeoutError,
                message: Some(msg),
            },
            HttpError::BadUrl(msg) => ErrorShape::generic(format!("Invalid URL: {}", msg)),
            other => ErrorShape::fetch(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ErrorShape {
    fn from(err: serde_json::Error) -> Self {
        ErrorShape::parsing(err.to_string())
    }
}

impl fmt::Display for ErrorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::normalize::normalize(Some(self)))
    }
}

impl std::error::Error for ErrorShape {}
