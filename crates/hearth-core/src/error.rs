// SPDX-FileCopyrightText: 2026 Hearth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Hearth platform client.

use thiserror::Error;

/// The primary error type used across the Hearth client crates.
///
/// API failures from the remote server are normalized into the [`Api`]
/// variant regardless of which domain client observed them. A `status` of
/// `0` means no response was received at all (connection refused, DNS
/// failure, timeout).
///
/// [`Api`]: HearthError::Api
#[derive(Debug, Error)]
pub enum HearthError {
    /// Normalized API failure: server-supplied message plus HTTP status.
    #[error("{message}")]
    Api { message: String, status: u16 },

    /// Configuration errors (invalid values, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Token store errors (unreadable or unwritable token file).
    #[error("token store error: {message}")]
    Token {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Hosted checkout handoff errors (malformed payment session).
    #[error("checkout error: {0}")]
    Checkout(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Message used when the server never produced a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

impl HearthError {
    /// Construct a normalized API error from a status code and message.
    pub fn api(message: impl Into<String>, status: u16) -> Self {
        HearthError::Api {
            message: message.into(),
            status,
        }
    }

    /// Construct the canonical no-response error (`status == 0`).
    pub fn network() -> Self {
        HearthError::Api {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            status: 0,
        }
    }

    /// The HTTP status carried by an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            HearthError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// No response was received from the server. Retryable by user action.
    pub fn is_network(&self) -> bool {
        self.status() == Some(0)
    }

    /// The server rejected our credentials or session (401). The standard
    /// reaction outside of the login flow is to invalidate the session.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The request was well-formed but semantically invalid (400).
    pub fn is_validation(&self) -> bool {
        self.status() == Some(400)
    }

    /// A business-rule conflict, e.g. cancelling an already-cancelled
    /// booking or signing up with a duplicate email (409).
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// The referenced resource does not exist (404). Rendered as an empty
    /// or error state in the relevant view, never a global failure.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
