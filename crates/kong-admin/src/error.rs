use thiserror::Error;

/// Top-level error type for the `kong-admin` crate.
///
/// Local validation, transport, Admin API status, and decode failures are
/// kept apart so callers can tell "fix your input" from "the gateway said no".
/// A failed call never affects later calls on the same client.
#[derive(Debug, Error)]
pub enum Error {
    // ── Local validation ────────────────────────────────────────────
    /// A required reference or field was missing or empty.
    /// Raised before any request is sent.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup error (CA certificate or client builder).
    #[error("TLS error: {0}")]
    Tls(String),

    /// The client's cancellation token fired while a call was pending.
    #[error("request cancelled")]
    Cancelled,

    // ── Admin API ───────────────────────────────────────────────────
    /// Non-2xx response from the Admin API.
    ///
    /// `message` and `name` come from Kong's `{"message", "name", "code"}`
    /// error body when present; `body` is always the raw payload.
    #[error("Admin API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        name: Option<String>,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status of an Admin API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the endpoint rejected the HTTP verb (405).
    pub fn is_method_not_allowed(&self) -> bool {
        matches!(self, Self::Api { status: 405, .. })
    }

    /// Returns `true` if the call was rejected locally, before any request.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    pub(crate) fn empty(field: &'static str) -> Self {
        Self::InvalidInput {
            field,
            reason: "cannot be empty",
        }
    }
}
