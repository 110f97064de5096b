//! Error handling for the Blueprint client.
//!
//! - [`ErrorShape`]: the failure of a query or mutation, decoded once at the
//!   HTTP boundary into `Network | Api | Generic`
//! - [`normalize`] and friends: total functions that turn a failure into the
//!   message, field errors, or flags a screen needs
//! - [`ErrorCategory`]: retry / re-auth classification
//! - [`BlueprintError`]: storage and configuration failures
//!
//! | Input | Message |
//! |-------|---------|
//! | payload `message` | verbatim |
//! | payload validation errors | messages joined with `", "` |
//! | payload `error` | verbatim |
//! | 401 / 403 / 404 / 422 / 500 | fixed text |
//! | `FETCH_ERROR` / `PARSING_ERROR` | network text |
//! | generic failure with message | verbatim |
//! | anything else | fallback |

mod category;
mod client;
mod normalize;
mod shape;

pub use category::ErrorCategory;
pub use client::{BlueprintError, BlueprintResult};
pub use normalize::{
    extract_validation_errors, is_auth_error, is_network_error, normalize, FALLBACK_MESSAGE,
    FORBIDDEN_MESSAGE, NETWORK_MESSAGE, NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE,
    UNAUTHORIZED_MESSAGE, UNPROCESSABLE_MESSAGE,
};
pub use shape::{ApiErrorPayload, ErrorDetails, ErrorShape, TransportStatus, ValidationError};

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// A response body flows through decoding, classification and messaging.
    #[test]
    fn test_response_to_message() {
        let body = br#"{"success": false, "error": "Studio not found"}"#;
        let shape = ErrorShape::from_response(404, body);

        assert_eq!(shape.category(), ErrorCategory::User);
        assert!(!shape.is_retryable());
        assert_eq!(normalize(Some(&shape)), "Studio not found");
    }

    #[test]
    fn test_unauthorized_response_requires_sign_in() {
        let shape = ErrorShape::from_response(401, b"");
        assert!(is_auth_error(Some(&shape)));
        assert_eq!(shape.category(), ErrorCategory::Auth);
        assert_eq!(shape.user_message(), UNAUTHORIZED_MESSAGE);
    }
}
