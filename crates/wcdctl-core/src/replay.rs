// ── Replay driver ──
//
// Resends a recorded browser session against a live device, one entry at
// a time and in recorded order. The session token in each request is
// swapped for our own; an `AuthenticationError` triggers a fresh login and
// a resend of the same entry. Rejected payloads are recorded and skipped.

use chrono::Local;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use strum::{AsRefStr, Display};
use tracing::{debug, error, info, warn};
use url::Url;

use wcdctl_api::auth::SESSION_HEADER;
use wcdctl_api::endpoints;
use wcdctl_api::protocol::{classify_body, is_keep_alive};
use wcdctl_api::{
    Credentials, Disposition, RawRequest, SessionToken, StatusCode, WcdClient, WcdResponse,
};

use crate::error::CoreError;
use crate::har::{HarEntry, HarRequest};

// ── Options & results ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Set the device clock to local time right after login.
    pub set_time: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self { set_time: true }
    }
}

/// Why an entry was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FilterReason {
    /// Recorded login; the driver logs in on its own.
    Login,
    /// Writes admin user entries (password changes).
    AdminUser,
    /// Sets the clock; the driver sets its own.
    TimeSetting,
}

/// What happened to one recorded entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum EntryOutcome {
    Filtered { reason: FilterReason },
    /// Keep-alive answered 200.
    KeepAlive,
    Completed { status: StatusCode },
    /// The device refused the body; the raw answer is kept for inspection.
    PayloadRejected {
        status_string: Option<String>,
        body: String,
    },
    /// Not a status envelope, or a keep-alive that did not answer 200.
    Unknown { http_status: u16 },
    /// The recorded request could not be rebuilt and was not sent.
    Invalid { message: String },
}

/// Result of a replay run, one outcome per entry in recorded order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub outcomes: Vec<EntryOutcome>,
    pub reauthentications: usize,
}

impl ReplayReport {
    pub fn completed(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Completed { .. } | EntryOutcome::KeepAlive))
    }

    pub fn filtered(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Filtered { .. }))
    }

    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::PayloadRejected { .. }))
    }

    pub fn unknown(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Unknown { .. }))
    }

    pub fn invalid(&self) -> usize {
        self.count(|o| matches!(o, EntryOutcome::Invalid { .. }))
    }

    fn count(&self, pred: impl Fn(&EntryOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

// ── Driver ──────────────────────────────────────────────────────────

/// Replays HAR entries through a [`WcdClient`].
///
/// The driver owns the credentials so it can log in again whenever the
/// device reports an expired session. There is no retry cap: a device that
/// keeps answering `AuthenticationError` right after a successful login
/// keeps the run on the same entry.
pub struct ReplayDriver<'a> {
    client: &'a WcdClient,
    credentials: Credentials,
    options: ReplayOptions,
}

impl<'a> ReplayDriver<'a> {
    pub fn new(client: &'a WcdClient, credentials: Credentials, options: ReplayOptions) -> Self {
        Self {
            client,
            credentials,
            options,
        }
    }

    /// Log in, optionally set the clock, then replay `entries` in order.
    ///
    /// Transport failures and failed logins abort the run. Every answer the
    /// device gives, whatever its HTTP status, is recorded in the report, as
    /// are entries that cannot be rebuilt.
    pub async fn run(&self, entries: &[HarEntry]) -> Result<ReplayReport, CoreError> {
        self.client.login(&self.credentials).await?;
        if self.options.set_time {
            let now = Local::now().naive_local();
            self.client.set_time(now).await?;
        }

        let total = entries.len();
        info!("replaying {total} entries against {}", self.client.base_url());

        let mut report = ReplayReport::default();
        for (index, entry) in entries.iter().enumerate() {
            let position = index + 1;
            let request = &entry.request;
            info!("[{position} / {total}] {} {}", request.method, request.url);

            let outcome = if let Some(reason) = filter_reason(request) {
                info!("[{position} / {total}] skipped ({reason})");
                EntryOutcome::Filtered { reason }
            } else {
                self.replay_entry(index, total, request, &mut report.reauthentications)
                    .await?
            };
            report.outcomes.push(outcome);
        }

        info!(
            completed = report.completed(),
            filtered = report.filtered(),
            rejected = report.rejected(),
            unknown = report.unknown(),
            invalid = report.invalid(),
            reauthentications = report.reauthentications,
            "replay finished"
        );
        Ok(report)
    }

    async fn replay_entry(
        &self,
        index: usize,
        total: usize,
        request: &HarRequest,
        reauthentications: &mut usize,
    ) -> Result<EntryOutcome, CoreError> {
        let position = index + 1;
        loop {
            let token = self
                .client
                .session()
                .ok_or(wcdctl_api::Error::Unauthenticated)?;
            let raw = match build_request(index, request, self.client.base_url(), &token) {
                Ok(raw) => raw,
                Err(e) => {
                    error!("[{position} / {total}] cannot rebuild entry: {e}");
                    return Ok(EntryOutcome::Invalid {
                        message: e.to_string(),
                    });
                }
            };
            let response = self.client.send_raw(raw).await?;

            if is_keep_alive(&request.url) {
                info!("[{position} / {total}] session keep-alive");
                return Ok(if response.status == 200 {
                    EntryOutcome::KeepAlive
                } else {
                    EntryOutcome::Unknown {
                        http_status: response.status,
                    }
                });
            }

            let (disposition, parsed) = classify_body(&response.body);
            let status = parsed.as_ref().and_then(WcdResponse::status_code);
            match (disposition, status) {
                (Disposition::Reauthenticate, _) => {
                    warn!("[{position} / {total}] session expired, logging in again");
                    self.client.relogin(&self.credentials).await?;
                    *reauthentications += 1;
                }
                (Disposition::Success, Some(status)) => {
                    if let Some(parsed) = &parsed {
                        info!("[{position} / {total}] result - {}", parsed.action_status());
                    }
                    return Ok(EntryOutcome::Completed { status });
                }
                (Disposition::PayloadRejected, _) => {
                    let status_string = parsed
                        .as_ref()
                        .and_then(|p| p.action_status().status_string())
                        .map(str::to_owned);
                    error!(
                        status_string = status_string.as_deref().unwrap_or("None"),
                        "[{position} / {total}] payload rejected"
                    );
                    debug!(body = %response.body, "rejected response");
                    return Ok(EntryOutcome::PayloadRejected {
                        status_string,
                        body: response.body,
                    });
                }
                _ => {
                    info!(
                        http_status = response.status,
                        "[{position} / {total}] unknown response format"
                    );
                    return Ok(EntryOutcome::Unknown {
                        http_status: response.status,
                    });
                }
            }
        }
    }
}

// ── Entry handling ──────────────────────────────────────────────────

/// Entries that must never be resent.
pub fn filter_reason(request: &HarRequest) -> Option<FilterReason> {
    if request.url.contains("System.xml?action=login") {
        return Some(FilterReason::Login);
    }
    if request.url.contains("wcd") {
        let text = request.text();
        if text.contains("AdminUserEntry") {
            return Some(FilterReason::AdminUser);
        }
        if text.contains("TimeSetting action=\"set\"") {
            return Some(FilterReason::TimeSetting);
        }
    }
    None
}

/// Rebuild a recorded request for `base` with our session token.
///
/// The recorded `sessionID` header (any case) gets the current token.
/// HTTP/2 pseudo headers, `Host` and `Content-Length` are dropped so the
/// HTTP client can set them for the new target and body.
pub fn build_request(
    index: usize,
    request: &HarRequest,
    base: &Url,
    token: &SessionToken,
) -> Result<RawRequest, CoreError> {
    let invalid = |message: String| CoreError::InvalidEntry { index, message };

    let method = Method::from_bytes(request.method.as_bytes())
        .map_err(|_| invalid(format!("unsupported HTTP method '{}'", request.method)))?;
    let url = endpoints::rebase(&request.url, base)?;

    let mut headers = HeaderMap::new();
    for header in &request.headers {
        let name = header.name.as_str();
        if name.starts_with(':')
            || name.eq_ignore_ascii_case("host")
            || name.eq_ignore_ascii_case("content-length")
        {
            continue;
        }

        let value = if name.eq_ignore_ascii_case(SESSION_HEADER) {
            token.as_str()
        } else {
            header.value.as_str()
        };

        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| invalid(format!("invalid header name '{name}'")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| invalid(format!("invalid value for header '{name}'")))?;
        headers.append(name, value);
    }

    let text = request.text();
    let body = (!text.is_empty()).then(|| text.to_owned());

    Ok(RawRequest {
        method,
        url,
        headers,
        body,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::har::{HarHeader, HarPostData};

    fn request(method: &str, url: &str, body: &str) -> HarRequest {
        HarRequest {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            post_data: (!body.is_empty()).then(|| HarPostData {
                mime_type: Some("application/xml".into()),
                text: body.into(),
            }),
        }
    }

    fn header(name: &str, value: &str) -> HarHeader {
        HarHeader {
            name: name.into(),
            value: value.into(),
        }
    }

    #[test]
    fn filters_recorded_login() {
        let req = request(
            "GET",
            "https://10.0.0.1/System.xml?action=login&user=cisco&password=cisco",
            "",
        );
        assert_eq!(filter_reason(&req), Some(FilterReason::Login));
    }

    #[test]
    fn filters_admin_and_time_writes() {
        let admin = request(
            "POST",
            "https://10.0.0.1/wcd?{UserAccountList}",
            "<DeviceConfiguration><AdminUserEntry/></DeviceConfiguration>",
        );
        assert_eq!(filter_reason(&admin), Some(FilterReason::AdminUser));

        let time = request(
            "POST",
            "https://10.0.0.1/wcd?",
            "<DeviceConfiguration><TimeSetting action=\"set\"/></DeviceConfiguration>",
        );
        assert_eq!(filter_reason(&time), Some(FilterReason::TimeSetting));
    }

    #[test]
    fn time_reads_and_other_urls_pass() {
        let read = request("GET", "https://10.0.0.1/wcd?{TimeSetting}", "");
        assert_eq!(filter_reason(&read), None);

        let not_wcd = request(
            "POST",
            "https://10.0.0.1/other.xml",
            "<AdminUserEntry/>",
        );
        assert_eq!(filter_reason(&not_wcd), None);
    }

    #[test]
    fn rebuilds_headers_for_new_session() {
        let mut req = request(
            "POST",
            "https://192.168.1.254/wcd?{VLANList}",
            "<DeviceConfiguration/>",
        );
        req.headers = vec![
            header(":authority", "192.168.1.254"),
            header("Host", "192.168.1.254"),
            header("Content-Length", "22"),
            header("SessionId", "stale"),
            header("Content-Type", "application/xml"),
        ];

        let base = Url::parse("https://10.0.0.1/").unwrap();
        let raw = build_request(0, &req, &base, &SessionToken::new("fresh")).unwrap();

        assert_eq!(raw.method, Method::POST);
        assert_eq!(raw.url.as_str(), "https://10.0.0.1/wcd?{VLANList}");
        assert_eq!(raw.headers.len(), 2);
        assert_eq!(raw.headers.get("sessionid").unwrap(), "fresh");
        assert_eq!(raw.headers.get("content-type").unwrap(), "application/xml");
        assert!(raw.headers.get("host").is_none());
        assert_eq!(raw.body.as_deref(), Some("<DeviceConfiguration/>"));
    }

    #[test]
    fn empty_body_is_none() {
        let req = request("GET", "https://192.168.1.254/wcd?{STP}", "");
        let base = Url::parse("https://10.0.0.1/").unwrap();
        let raw = build_request(0, &req, &base, &SessionToken::new("t")).unwrap();
        assert!(raw.body.is_none());
    }

    #[test]
    fn bad_method_names_the_entry() {
        let req = request("BAD METHOD", "https://192.168.1.254/wcd?", "");
        let base = Url::parse("https://10.0.0.1/").unwrap();
        let err = build_request(7, &req, &base, &SessionToken::new("t")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidEntry { index: 7, .. }));
    }

    #[test]
    fn report_counts() {
        let report = ReplayReport {
            outcomes: vec![
                EntryOutcome::Filtered {
                    reason: FilterReason::Login,
                },
                EntryOutcome::KeepAlive,
                EntryOutcome::Completed {
                    status: StatusCode::Ok,
                },
                EntryOutcome::PayloadRejected {
                    status_string: None,
                    body: String::new(),
                },
                EntryOutcome::Unknown { http_status: 200 },
                EntryOutcome::Invalid {
                    message: "Entry 3: invalid header name".into(),
                },
            ],
            reauthentications: 1,
        };
        assert_eq!(report.completed(), 2);
        assert_eq!(report.filtered(), 1);
        assert_eq!(report.rejected(), 1);
        assert_eq!(report.unknown(), 1);
        assert_eq!(report.invalid(), 1);
    }
}
