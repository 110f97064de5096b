//! Turns any [`ErrorShape`] into the one message a screen shows.
//!
//! Resolution order, first match wins:
//!
//! 1. payload `message`
//! 2. payload `details.validationErrors`, messages joined with `", "`
//! 3. payload `error`
//! 4. mapped HTTP status or transport sentinel
//! 5. message of a generic failure
//! 6. [`FALLBACK_MESSAGE`]
//!
//! All functions here are total: an absent error is accepted and yields the
//! fallback, an empty mapping, or `false`.

use std::collections::BTreeMap;

use super::shape::{ErrorShape, TransportStatus};

pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred. Please try again.";
pub const UNAUTHORIZED_MESSAGE: &str = "Authentication required. Please log in.";
pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";
pub const NOT_FOUND_MESSAGE: &str = "Resource not found.";
pub const UNPROCESSABLE_MESSAGE: &str = "Invalid data provided. Please check your input.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

fn status_message(status: u16) -> Option<&'static str> {
    match status {
        401 => Some(UNAUTHORIZED_MESSAGE),
        403 => Some(FORBIDDEN_MESSAGE),
        404 => Some(NOT_FOUND_MESSAGE),
        422 => Some(UNPROCESSABLE_MESSAGE),
        500 => Some(SERVER_ERROR_MESSAGE),
        _ => None,
    }
}

fn transport_message(status: TransportStatus) -> Option<&'static str> {
    match status {
        TransportStatus::FetchError | TransportStatus::ParsingError => Some(NETWORK_MESSAGE),
        TransportStatus::TimeoutError => None,
    }
}

/// Map an error to a single user-facing message.
pub fn normalize(error: Option<&ErrorShape>) -> String {
    let Some(error) = error else {
        return FALLBACK_MESSAGE.to_string();
    };

    if let Some(payload) = error.payload() {
        if let Some(message) = non_empty(payload.message.as_deref()) {
            return message.to_string();
        }

        let validation = payload.validation_errors();
        if !validation.is_empty() {
            return validation
                .iter()
                .map(|v| v.message.as_str())
                .collect::<Vec<_>>()
                .join(", ");
        }

        if let Some(message) = non_empty(payload.error.as_deref()) {
            return message.to_string();
        }
    }

    let mapped = match error {
        ErrorShape::Api { status, .. } => status_message(*status),
        ErrorShape::Network { status, .. } => transport_message(*status),
        ErrorShape::Generic { .. } => None,
    };
    if let Some(message) = mapped {
        return message.to_string();
    }

    if let ErrorShape::Generic { message } = error {
        if let Some(message) = non_empty(message.as_deref()) {
            return message.to_string();
        }
    }

    FALLBACK_MESSAGE.to_string()
}

/// Field-level validation messages keyed by field name.
///
/// When the API reports the same field twice, the later entry wins.
pub fn extract_validation_errors(error: Option<&ErrorShape>) -> BTreeMap<String, String> {
    error
        .and_then(ErrorShape::payload)
        .map(|payload| {
            payload
                .validation_errors()
                .iter()
                .map(|v| (v.field.clone(), v.message.clone()))
                .collect()
        })
        .unwrap_or_default()
}

/// True for transport failures (`FETCH_ERROR`, `PARSING_ERROR`).
pub fn is_network_error(error: Option<&ErrorShape>) -> bool {
    matches!(
        error.and_then(ErrorShape::transport_status),
        Some(TransportStatus::FetchError | TransportStatus::ParsingError)
    )
}

/// True when the server answered 401.
pub fn is_auth_error(error: Option<&ErrorShape>) -> bool {
    error.and_then(ErrorShape::http_status) == Some(401)
}

impl ErrorShape {
    /// Shorthand for [`normalize`].
    pub fn user_message(&self) -> String {
        normalize(Some(self))
    }

    pub fn is_network(&self) -> bool {
        is_network_error(Some(self))
    }

    pub fn is_auth(&self) -> bool {
        is_auth_error(Some(self))
    }

    pub fn validation_messages(&self) -> BTreeMap<String, String> {
        extract_validation_errors(Some(self))
    }
}
