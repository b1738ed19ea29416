// wcdctl-api: Async Rust client for the WCD HTTP+XML switch management API

pub mod auth;
pub mod builder;
pub mod endpoints;
pub mod error;
pub mod fields;
pub mod payloads;
pub mod protocol;
pub mod requests;
pub mod response;
pub mod sections;
pub mod transport;
pub mod wcd;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::{Credentials, SessionToken};
pub use builder::{Action, RequestNode};
pub use endpoints::SectionQuery;
pub use error::Error;
pub use fields::{Settings, WireValue};
pub use protocol::{Disposition, classify, classify_body};
pub use response::{ActionStatus, StatusCode, WcdResponse};
pub use sections::{Section, SystemAction};
pub use transport::{TlsMode, TransportConfig};
pub use wcd::{RawRequest, RawResponse, WcdClient};
