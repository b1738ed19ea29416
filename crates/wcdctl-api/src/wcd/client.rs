// WCD HTTP client
//
// Wraps `reqwest::Client` with the device's session header, status envelope
// parsing and URL construction. Endpoint groups (auth, configuration,
// system) live in sibling files as inherent methods.

use std::sync::RwLock;

use reqwest::header::HeaderMap;
use reqwest::Method;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{SESSION_HEADER, SessionToken};
use crate::builder::RequestNode;
use crate::error::Error;
use crate::response::WcdResponse;
use crate::transport::TransportConfig;

/// A request sent verbatim, as recorded elsewhere (e.g. a HAR capture).
#[derive(Debug, Clone)]
pub struct RawRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Status and body of a raw exchange. Nothing is interpreted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP client for one device.
///
/// Holds at most one session token. Every authenticated call checks for it
/// up front and fails with [`Error::Unauthenticated`] when there is none.
/// The direct API is fail-fast: any status other than OK / NotFound comes
/// back as [`Error::DeviceRejected`].
pub struct WcdClient {
    http: reqwest::Client,
    base_url: Url,
    /// Replaced on every login, cleared on logout.
    session: RwLock<Option<SessionToken>>,
}

impl WcdClient {
    /// Create a client for the device at `base_url` (e.g. `https://169.254.1.0/`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            session: RwLock::new(None),
        }
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── Session token ────────────────────────────────────────────────

    /// Snapshot of the current session token.
    pub fn session(&self) -> Option<SessionToken> {
        self.session.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().expect("session lock poisoned").is_some()
    }

    pub(crate) fn set_session(&self, token: SessionToken) {
        debug!("storing session token");
        *self.session.write().expect("session lock poisoned") = Some(token);
    }

    /// Forget the current token (e.g. after the device rejected it).
    pub fn clear_session(&self) {
        trace!("clearing session token");
        *self.session.write().expect("session lock poisoned") = None;
    }

    /// The token for an authenticated call, or `Unauthenticated`.
    pub(crate) fn require_session(&self) -> Result<SessionToken, Error> {
        self.session().ok_or(Error::Unauthenticated)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Authenticated GET, returning the parsed and checked envelope.
    pub(crate) async fn get(&self, url: Url) -> Result<WcdResponse, Error> {
        let token = self.require_session()?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(SESSION_HEADER, token.as_str())
            .send()
            .await?;

        Self::parse_envelope(resp).await
    }

    /// Authenticated GET returning the raw body, for answers outside the
    /// status envelope (system actions, downloads).
    pub(crate) async fn get_text(&self, url: Url) -> Result<String, Error> {
        let token = self.require_session()?;
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url.clone())
            .header(SESSION_HEADER, token.as_str())
            .send()
            .await?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(resp.text().await?)
    }

    /// Authenticated POST of a request document.
    pub(crate) async fn post(&self, url: Url, document: &RequestNode) -> Result<WcdResponse, Error> {
        let token = self.require_session()?;
        let body = document.to_xml()?;
        debug!("POST {}", url);
        trace!(payload = %String::from_utf8_lossy(&body), "request body");

        let resp = self
            .http
            .post(url)
            .header(SESSION_HEADER, token.as_str())
            .body(body)
            .send()
            .await?;

        Self::parse_envelope(resp).await
    }

    /// Check the HTTP status, parse the `ActionStatus` envelope and fail on
    /// any device status other than OK / NotFound.
    async fn parse_envelope(resp: reqwest::Response) -> Result<WcdResponse, Error> {
        let status = resp.status();
        let url = resp.url().to_string();

        if status != reqwest::StatusCode::OK {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp.text().await?;
        trace!(%url, body = %body, "response body");

        let response = WcdResponse::parse(&body)?;
        debug!(status = %response.action_status(), "device answered");
        response.action_status().ensure_success()?;
        Ok(response)
    }

    /// Send a request as-is and hand back status and body.
    ///
    /// No session header is added and nothing is parsed; the caller owns
    /// the headers and the interpretation.
    pub async fn send_raw(&self, request: RawRequest) -> Result<RawResponse, Error> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .http
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(RawResponse { status, body })
    }
}
