//! Coarse classification of [`ErrorShape`] values.
//!
//! Presentation uses the category to decide between a retry action, a
//! redirect to sign-in, or inline field errors.

use std::fmt;

use super::shape::ErrorShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures: connection, timeout, unreadable body.
    Network,
    /// The session is missing or expired (HTTP 401).
    Auth,
    /// Backend failures (HTTP 5xx, 429).
    Server,
    /// The request was rejected as the user sent it (other 4xx).
    User,
    /// Client-side failures that never reached the network.
    Client,
}

impl ErrorCategory {
    /// Classify a failure.
    pub fn of(error: &ErrorShape) -> Self {
        match error {
            ErrorShape::Network { .. } => ErrorCategory::Network,
            ErrorShape::Api { status, .. } => match *status {
                401 => ErrorCategory::Auth,
                408 => ErrorCategory::Network,
                429 | 500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::User,
            },
            ErrorShape::Generic { .. } => ErrorCategory::Client,
        }
    }

    /// Whether showing a retry action makes sense.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::User => "user",
            ErrorCategory::Client => "client",
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Auth => "Sign in again to continue",
            ErrorCategory::Server => "The server may be experiencing issues. Please try again later",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::Client => "This may be a bug. Please report this issue if it persists",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ErrorShape {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::of(self)
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }
}
