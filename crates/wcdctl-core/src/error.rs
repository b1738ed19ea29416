// ── Core error types ──
//
// Errors from loading a capture and driving a replay run. Protocol and
// transport failures from `wcdctl-api` are carried through unchanged so
// callers can still ask `is_transport()` / `is_auth_expired()`.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── API errors ───────────────────────────────────────────────────
    #[error(transparent)]
    Api(#[from] wcdctl_api::Error),

    // ── Capture errors ───────────────────────────────────────────────
    #[error("Cannot read HAR file {path}: {source}")]
    HarIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid HAR file: {0}")]
    HarDecode(#[from] serde_json::Error),

    // ── Replay errors ────────────────────────────────────────────────
    /// A recorded request cannot be rebuilt for sending.
    #[error("Entry {index}: {message}")]
    InvalidEntry { index: usize, message: String },
}

impl CoreError {
    /// Whether the underlying failure is below the WCD protocol.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_transport())
    }
}
