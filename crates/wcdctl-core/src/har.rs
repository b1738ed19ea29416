// ── HAR capture model ──
//
// Just enough of the HTTP Archive format to resend recorded requests.
// Responses, timings and page data are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::CoreError;

/// Top-level HAR document.
#[derive(Debug, Clone, Deserialize)]
pub struct Har {
    pub log: HarLog,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HarLog {
    #[serde(default)]
    pub entries: Vec<HarEntry>,
}

/// One recorded exchange.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarEntry {
    #[serde(default)]
    pub started_date_time: Option<String>,
    pub request: HarRequest,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarRequest {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: Vec<HarHeader>,
    #[serde(default)]
    pub post_data: Option<HarPostData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HarHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarPostData {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl Har {
    /// Decode a HAR document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and decode a HAR file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::HarIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn entries(&self) -> &[HarEntry] {
        &self.log.entries
    }
}

impl HarRequest {
    /// Recorded body, empty when the request had none.
    pub fn text(&self) -> &str {
        self.post_data.as_ref().map_or("", |data| data.text.as_str())
    }

    /// First header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CAPTURE: &str = r#"{
        "log": {
            "version": "1.2",
            "creator": { "name": "Firefox", "version": "125.0" },
            "entries": [
                {
                    "startedDateTime": "2024-05-02T10:00:00.000+02:00",
                    "request": {
                        "method": "GET",
                        "url": "https://192.168.1.254/wcd?{VLANList}",
                        "httpVersion": "HTTP/1.1",
                        "headers": [
                            { "name": "Host", "value": "192.168.1.254" },
                            { "name": "sessionID", "value": "UserId=1&abc&" }
                        ],
                        "cookies": []
                    },
                    "response": { "status": 200 },
                    "timings": { "wait": 12 }
                },
                {
                    "request": {
                        "method": "POST",
                        "url": "https://192.168.1.254/wcd?{VLANList}",
                        "headers": [],
                        "postData": {
                            "mimeType": "application/xml",
                            "text": "<DeviceConfiguration/>"
                        }
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn decodes_requests_and_ignores_the_rest() {
        let har = Har::from_json(CAPTURE).unwrap();
        let entries = har.entries();
        assert_eq!(entries.len(), 2);

        let first = &entries[0].request;
        assert_eq!(first.method, "GET");
        assert_eq!(first.url, "https://192.168.1.254/wcd?{VLANList}");
        assert_eq!(first.header("SESSIONID"), Some("UserId=1&abc&"));
        assert_eq!(first.text(), "");

        let second = &entries[1].request;
        assert_eq!(second.text(), "<DeviceConfiguration/>");
        assert!(entries[1].started_date_time.is_none());
    }

    #[test]
    fn missing_entries_is_empty() {
        let har = Har::from_json(r#"{ "log": {} }"#).unwrap();
        assert!(har.entries().is_empty());
    }

    #[test]
    fn not_a_har_document() {
        let err = Har::from_json("[]").unwrap_err();
        assert!(matches!(err, CoreError::HarDecode(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Har::load(Path::new("/nonexistent/capture.har")).unwrap_err();
        match err {
            CoreError::HarIo { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/capture.har"));
            }
            other => panic!("expected HarIo, got: {other:?}"),
        }
    }
}
