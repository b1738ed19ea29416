// Endpoint URL construction
//
// The WCD endpoint takes brace-delimited section queries: `wcd?{A}{B&k=v}`.
// Braces are written literally (the `url` crate leaves them alone in the
// query component); only filter keys and values are form-urlencoded.

use std::fmt;
use std::str::FromStr;

use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::error::Error;
use crate::sections::{Section, SystemAction};

/// Path of the idle-session keep-alive resource.
pub const KEEP_ALIVE_PATH: &str = "/device/authenticate_user.xml";

/// One `{...}` group of a WCD query: a section plus optional filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionQuery {
    section: String,
    filters: Vec<(String, String)>,
}

impl SectionQuery {
    pub fn new(section: Section) -> Self {
        Self {
            section: section.wire_name().to_owned(),
            filters: Vec::new(),
        }
    }

    /// A section the enumeration does not cover, passed through verbatim.
    pub fn raw(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            filters: Vec::new(),
        }
    }

    /// Add a `&key=value` filter.
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Shorthand for the common `interfaceName` filter.
    pub fn for_interface(section: Section, interface_name: impl Into<String>) -> Self {
        Self::new(section).filter("interfaceName", interface_name)
    }

    pub fn section(&self) -> &str {
        &self.section
    }
}

impl From<Section> for SectionQuery {
    fn from(section: Section) -> Self {
        Self::new(section)
    }
}

impl fmt::Display for SectionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.section)?;
        for (key, value) in &self.filters {
            let key: String = byte_serialize(key.as_bytes()).collect();
            let value: String = byte_serialize(value.as_bytes()).collect();
            write!(f, "&{key}={value}")?;
        }
        Ok(())
    }
}

impl FromStr for SectionQuery {
    type Err = Error;

    /// Parses `Section[&key=value...]`. Known sections may use their
    /// symbolic name; anything else is kept verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('&');
        let name = parts.next().unwrap_or_default().trim();
        if name.is_empty() || name.contains(['{', '}']) {
            return Err(Error::InvalidOperation {
                tag: s.to_owned(),
                reason: "section query needs a section name and no braces",
            });
        }
        let mut query = name
            .parse::<Section>()
            .map_or_else(|_| Self::raw(name), Self::new);
        for part in parts {
            let (key, value) = part.split_once('=').ok_or_else(|| Error::InvalidOperation {
                tag: s.to_owned(),
                reason: "section filters must look like key=value",
            })?;
            query = query.filter(key, value);
        }
        Ok(query)
    }
}

// ── URL builders ────────────────────────────────────────────────────

/// Device base URL for a bare host: `https://{host}/`.
pub fn host_url(host: &str) -> Result<Url, Error> {
    Ok(Url::parse(&format!("https://{host}/"))?)
}

fn join(base: &Url, rest: &str) -> Result<Url, Error> {
    let base = base.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/{rest}"))?)
}

/// `System.xml?action=login&user={u}&password={p}`
pub fn login_url(base: &Url, user: &str, password: &str) -> Result<Url, Error> {
    let user: String = byte_serialize(user.as_bytes()).collect();
    let password: String = byte_serialize(password.as_bytes()).collect();
    join(
        base,
        &format!("System.xml?action=login&user={user}&password={password}"),
    )
}

/// `System.xml?action=logout`
pub fn logout_url(base: &Url) -> Result<Url, Error> {
    join(base, "System.xml?action=logout")
}

/// `device/authenticate_user.xml`
pub fn keep_alive_url(base: &Url) -> Result<Url, Error> {
    join(base, KEEP_ALIVE_PATH.trim_start_matches('/'))
}

/// Brace-delimited query string for `queries`, without the `wcd?` prefix.
pub fn wcd_query(queries: &[SectionQuery]) -> String {
    queries.iter().map(|q| format!("{{{q}}}")).collect()
}

/// `wcd?{Q1}{Q2}...`; plain `wcd?` when `queries` is empty.
pub fn wcd_url(base: &Url, queries: &[SectionQuery]) -> Result<Url, Error> {
    join(base, &format!("wcd?{}", wcd_query(queries)))
}

/// `System.xml?action={action}`
pub fn system_action_url(base: &Url, action: SystemAction) -> Result<Url, Error> {
    join(base, &format!("System.xml?action={}", action.wire_name()))
}

/// `http_download?action={action}`
pub fn http_download_url(base: &Url, action: &str) -> Result<Url, Error> {
    let action: String = byte_serialize(action.as_bytes()).collect();
    join(base, &format!("http_download?action={action}"))
}

/// Move a recorded URL onto `base`, keeping its path and query.
///
/// Used when replaying captures taken against another address.
pub fn rebase(recorded: &str, base: &Url) -> Result<Url, Error> {
    let recorded = Url::parse(recorded)?;
    let mut rest = recorded.path().trim_start_matches('/').to_owned();
    if let Some(query) = recorded.query() {
        rest.push('?');
        rest.push_str(query);
    }
    join(base, &rest)
}
