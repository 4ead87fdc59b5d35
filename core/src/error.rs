//! Error types for the todo API client.
//!
//! # Design
//! `NotAuthenticated` gets a dedicated variant because it is synthesized
//! locally — an authorized operation attempted with no stored token fails
//! before any request is built and never touches the network. All non-2xx
//! responses land in `Http` with the raw status code and body; network
//! failures and malformed bodies land in `Transport` without further
//! distinction.

use std::fmt;

/// Errors returned by `ApiClient` build and parse methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// An authorized operation was attempted with no stored session token.
    /// Synthesized client-side; no request was built.
    NotAuthenticated,

    /// The server returned a non-2xx status. `message` is the raw response
    /// body, not further parsed.
    Http { status: u16, message: String },

    /// Network failure (DNS, connection refused, timeout) or a success
    /// response whose body could not be read as the expected type.
    Transport(String),
}

impl ApiError {
    /// The single human-readable line a view surfaces for this failure.
    ///
    /// For `Http` this is the raw server body (the service responds with
    /// plain-text messages), falling back to the status code when the body
    /// is blank.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotAuthenticated => "not authenticated".to_string(),
            ApiError::Http { status, message } => {
                let trimmed = message.trim_end();
                if trimmed.is_empty() {
                    format!("HTTP {status}")
                } else {
                    trimmed.to_string()
                }
            }
            ApiError::Transport(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotAuthenticated => write!(f, "not authenticated"),
            ApiError::Http { status, message } => {
                write!(f, "HTTP {status}: {}", message.trim_end())
            }
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
