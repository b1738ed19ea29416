// WCD client modules
//
// Session handling, section reads/writes and system actions against the
// switch's `wcd?{...}` endpoint, all answered with an `ActionStatus`
// envelope.

pub mod auth;
pub mod client;
pub mod config;
pub mod system;

pub use client::{RawRequest, RawResponse, WcdClient};
