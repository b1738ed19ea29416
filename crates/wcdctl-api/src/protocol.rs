// Status-driven request protocol
//
// Decides what a caller does next with a response: hand it back, log in
// again and resend, drop the request as rejected, or give up on an
// unrecognised answer. The direct client uses `ActionStatus::ensure_success`
// instead and fails fast; the replay driver uses this classification.

use tracing::trace;

use crate::endpoints::KEEP_ALIVE_PATH;
use crate::response::{StatusCode, WcdResponse};

/// Next step for a request after its response has been read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// `OK` or `NotFound`: return the response to the caller.
    Success,
    /// `AuthenticationError`: refresh the session and resend the same request.
    Reauthenticate,
    /// `PayloadError`: the body was rejected; do not retry.
    PayloadRejected,
    /// No status, or a body that is not a status envelope.
    Unknown,
}

/// Classify a parsed status code.
pub fn classify(status: Option<StatusCode>) -> Disposition {
    match status {
        Some(StatusCode::Ok | StatusCode::NotFound) => Disposition::Success,
        Some(StatusCode::AuthenticationError) => Disposition::Reauthenticate,
        Some(StatusCode::PayloadError) => Disposition::PayloadRejected,
        None => Disposition::Unknown,
    }
}

/// Parse and classify a raw response body.
///
/// Bodies that fail to parse (no `ActionStatus`, unknown code, not XML) are
/// `Unknown` and come back without a response.
pub fn classify_body(body: &str) -> (Disposition, Option<WcdResponse>) {
    match WcdResponse::parse(body) {
        Ok(response) => (classify(response.status_code()), Some(response)),
        Err(e) => {
            trace!(error = %e, "response is not a status envelope");
            (Disposition::Unknown, None)
        }
    }
}

/// Keep-alive requests answer outside the status envelope and are never
/// classified.
pub fn is_keep_alive(url: &str) -> bool {
    url.contains(KEEP_ALIVE_PATH)
}
