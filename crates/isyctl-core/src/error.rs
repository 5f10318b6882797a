// ── Core error types ──
//
// User-facing errors from isyctl-core. Consumers never see HTTP status
// codes or XML decode failures directly; the `From<isyctl_api::Error>`
// impl folds them into the transport family.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("No device or scene matches '{name}'")]
    NotFound { name: String },

    #[error("'{operation}' is not applicable to {entity}")]
    NotApplicable { operation: String, entity: String },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Address already registered: {address}")]
    DuplicateAddress { address: String },

    #[error("Controller reported an unparseable status: '{raw}'")]
    UnparseableStatus { raw: String },

    // ── Transport errors ─────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Network failure, non-success status, or unreadable response.
    ///
    /// Never retried; the caller must not assume a partial state change.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::AuthenticationFailed { .. }
                | Self::Timeout { .. }
                | Self::Api { .. }
        )
    }

    pub(crate) fn not_applicable(operation: &str, entity: impl Into<String>) -> Self {
        Self::NotApplicable {
            operation: operation.into(),
            entity: entity.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<isyctl_api::Error> for CoreError {
    fn from(err: isyctl_api::Error) -> Self {
        match err {
            isyctl_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            isyctl_api::Error::Transport(ref e) => {
                if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            isyctl_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            isyctl_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            isyctl_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            isyctl_api::Error::Http { status, url } => CoreError::Api {
                message: format!("controller returned HTTP {status} for {url}"),
                status: Some(status),
            },
            isyctl_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("unreadable controller response: {message}"),
                status: None,
            },
        }
    }
}
