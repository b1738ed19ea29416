// wcdctl-core: HAR capture model and replay driver on top of wcdctl-api.

pub mod error;
pub mod har;
pub mod replay;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use har::{Har, HarEntry, HarRequest};
pub use replay::{EntryOutcome, FilterReason, ReplayDriver, ReplayOptions, ReplayReport};
