//! Error types for the Shelfwise client.

use crate::types::ErrorEnvelope;
use thiserror::Error;

/// Errors that can occur when talking to a Shelfwise server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("server unreachable: {0}")]
    ServerUnreachable(String),

    /// Server returned an error response
    #[error("server error ({status}): {}", message.as_deref().unwrap_or("no detail"))]
    Server {
        status: u16,
        /// The `error` field of the response envelope, when present.
        message: Option<String>,
    },

    /// Authentication required but no valid token available
    #[error("authentication required")]
    AuthRequired,

    /// Login rejected (invalid credentials)
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid server URL
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a successful response body
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Build an error from a non-success response, extracting the server's
    /// `error` envelope field when the body carries one.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorEnvelope>()
            .await
            .ok()
            .map(|envelope| envelope.error);
        ClientError::Server { status, message }
    }

    /// The message to show a user for this failure.
    ///
    /// The server's envelope convention collapses every failure into a
    /// human-readable `error` string; anything without one (transport
    /// failures, bodiless responses) displays as the literal `"Error."`.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => "Error.".to_string(),
        }
    }
}

/// Result type for Shelfwise client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
