use thiserror::Error;

use crate::response::StatusCode;

/// Top-level error type for the `wcdctl-api` crate.
///
/// Covers transport, session, builder and protocol failures. The replay
/// driver in `wcdctl-core` inspects these to decide between retrying,
/// skipping an entry, or aborting the run.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device answered with an HTTP status other than 200.
    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Session ─────────────────────────────────────────────────────
    /// Login returned 200 but no `sessionID` header.
    #[error("login succeeded but the device returned no sessionID header")]
    MissingSessionId,

    /// An authenticated operation was called before `login`.
    #[error("operation requires an authenticated session -- call login first")]
    Unauthenticated,

    // ── Builder ─────────────────────────────────────────────────────
    /// Misuse of the request builder (child on a leaf, empty tag).
    #[error("invalid operation on <{tag}>: {reason}")]
    InvalidOperation { tag: String, reason: &'static str },

    /// The built document could not be written out.
    #[error("XML serialization failed: {0}")]
    Serialization(String),

    // ── Protocol ────────────────────────────────────────────────────
    /// The response is not a well-formed status envelope.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// The device reported a status other than OK / NotFound.
    #[error("device rejected request ({status}): {message}")]
    DeviceRejected { status: StatusCode, message: String },
}

impl Error {
    /// Returns `true` for failures below the WCD protocol: network errors
    /// and non-200 HTTP answers. These abort a replay run.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::HttpStatus { .. } | Self::Tls(_) | Self::InvalidUrl(_)
        )
    }

    /// Returns `true` if logging in again might resolve this error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated
                | Self::DeviceRejected {
                    status: StatusCode::AuthenticationError,
                    ..
                }
        )
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }
}
