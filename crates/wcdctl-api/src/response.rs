// WCD response envelope
//
// Every WCD answer carries an `<ActionStatus>` element somewhere in the
// document; read operations add a `<DeviceConfiguration>` payload next to it.
// Fields inside `ActionStatus` are optional on the wire.

use std::fmt;

use serde::Serialize;
use xmltree::{Element, XMLNode};

use crate::error::Error;

/// Device status code. The set is closed: anything else is a protocol error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusCode {
    /// `-1`: requested section or resource absent.
    NotFound,
    /// `0`: request succeeded.
    Ok,
    /// `3`: malformed or rejected request body.
    PayloadError,
    /// `4`: session token invalid or expired.
    AuthenticationError,
}

impl StatusCode {
    /// Map the wire text onto the enumeration. Unknown codes yield `None`.
    pub fn from_wire(code: &str) -> Option<Self> {
        match code.trim() {
            "-1" => Some(Self::NotFound),
            "0" => Some(Self::Ok),
            "3" => Some(Self::PayloadError),
            "4" => Some(Self::AuthenticationError),
            _ => None,
        }
    }

    pub fn wire_value(self) -> &'static str {
        match self {
            Self::NotFound => "-1",
            Self::Ok => "0",
            Self::PayloadError => "3",
            Self::AuthenticationError => "4",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "NotFound",
            Self::Ok => "OK",
            Self::PayloadError => "PayloadError",
            Self::AuthenticationError => "AuthenticationError",
        };
        write!(f, "{name} ({})", self.wire_value())
    }
}

/// Parsed `<ActionStatus>` header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStatus {
    version: Option<String>,
    #[serde(rename = "requestURL")]
    request_url: Option<String>,
    status_code: Option<StatusCode>,
    device_status_code: Option<String>,
    status_string: Option<String>,
}

impl ActionStatus {
    fn from_element(element: &Element) -> Result<Self, Error> {
        let status_code = match descendant_text(element, "statusCode") {
            Some(code) => Some(
                StatusCode::from_wire(&code)
                    .ok_or_else(|| Error::malformed(format!("unknown statusCode '{code}'")))?,
            ),
            None => None,
        };

        Ok(Self {
            version: descendant_text(element, "version"),
            request_url: descendant_text(element, "requestURL"),
            status_code,
            device_status_code: descendant_text(element, "deviceStatusCode"),
            status_string: descendant_text(element, "statusString"),
        })
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn request_url(&self) -> Option<&str> {
        self.request_url.as_deref()
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code
    }

    pub fn device_status_code(&self) -> Option<&str> {
        self.device_status_code.as_deref()
    }

    pub fn status_string(&self) -> Option<&str> {
        self.status_string.as_deref()
    }

    /// Fail unless the device reported OK, NotFound, or no code at all.
    pub fn ensure_success(&self) -> Result<(), Error> {
        match self.status_code {
            None | Some(StatusCode::Ok | StatusCode::NotFound) => Ok(()),
            Some(status) => Err(Error::DeviceRejected {
                status,
                message: self
                    .status_string
                    .clone()
                    .unwrap_or_else(|| "no statusString".into()),
            }),
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let none = "None";
        write!(
            f,
            "<ActionStatus/{} requestURL={} statusCode={} statusString={}>",
            self.version.as_deref().unwrap_or(none),
            self.request_url.as_deref().unwrap_or(none),
            self.status_code
                .map_or_else(|| none.to_owned(), |c| c.to_string()),
            self.status_string.as_deref().unwrap_or(none),
        )
    }
}

/// A complete WCD response: status header plus optional data payload.
#[derive(Debug, Clone)]
pub struct WcdResponse {
    action_status: ActionStatus,
    device_configuration: Option<Element>,
}

impl WcdResponse {
    /// Parse a response body.
    ///
    /// Fails with [`Error::MalformedResponse`] when the body is not XML, has
    /// no `ActionStatus` element, or carries an unknown status code.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let root = Element::parse(text.as_bytes())
            .map_err(|e| Error::malformed(format!("invalid XML: {e}")))?;
        Self::from_element(&root)
    }

    pub fn from_element(root: &Element) -> Result<Self, Error> {
        let status_element = find_descendant(root, "ActionStatus")
            .ok_or_else(|| Error::malformed("can't find <ActionStatus> element"))?;
        let action_status = ActionStatus::from_element(status_element)?;
        let device_configuration = find_descendant(root, "DeviceConfiguration").cloned();

        Ok(Self {
            action_status,
            device_configuration,
        })
    }

    pub fn action_status(&self) -> &ActionStatus {
        &self.action_status
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        self.action_status.status_code
    }

    /// Returned configuration data, present for read operations.
    pub fn device_configuration(&self) -> Option<&Element> {
        self.device_configuration.as_ref()
    }
}

/// Depth-first search over `element` and all of its descendants.
pub(crate) fn find_descendant<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
    if element.name == name {
        return Some(element);
    }
    element.children.iter().find_map(|node| match node {
        XMLNode::Element(child) => find_descendant(child, name),
        _ => None,
    })
}

/// Trimmed text of the first descendant named `name`, if non-empty.
fn descendant_text(element: &Element, name: &str) -> Option<String> {
    element.children.iter().find_map(|node| match node {
        XMLNode::Element(child) => find_descendant(child, name),
        _ => None,
    })
    .and_then(|found| found.get_text())
    .map(|text| text.trim().to_owned())
    .filter(|text| !text.is_empty())
}
