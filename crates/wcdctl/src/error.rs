//! CLI error types with miette diagnostics.
//!
//! Maps api, core and config errors into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wcdctl_api::StatusCode;
use wcdctl_config::ConfigError;
use wcdctl_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const REJECTED: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to switch at {url}")]
    #[diagnostic(
        code(wcdctl::connection_failed),
        help(
            "Check that the switch is powered and reachable.\n\
             URL: {url}\n\
             Try: wcdctl login --host <address>"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(wcdctl::tls_error),
        help(
            "Switches use a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or configure ca_cert in your profile."
        )
    )]
    TlsError { message: String },

    #[error("Switch answered HTTP {status} for {url}")]
    #[diagnostic(code(wcdctl::http_status))]
    HttpStatus { status: u16, url: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(wcdctl::timeout),
        help("Increase timeout with --timeout or check the switch's load.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(wcdctl::auth_failed),
        help(
            "Verify the username and password.\n\
             Run: wcdctl config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    // ── Device answers ───────────────────────────────────────────────
    #[error("Switch rejected the request ({status}): {message}")]
    #[diagnostic(
        code(wcdctl::rejected),
        help("Check field names and values; run with -vv to see the request body.")
    )]
    Rejected { status: StatusCode, message: String },

    #[error("Unexpected answer from switch: {message}")]
    #[diagnostic(code(wcdctl::malformed_response))]
    MalformedResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wcdctl::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(wcdctl::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: wcdctl config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No switch address configured")]
    #[diagnostic(
        code(wcdctl::no_config),
        help(
            "Pass --host, set WCDCTL_HOST, or create a profile with: wcdctl config init\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(wcdctl::config))]
    Config(Box<figment::Error>),

    #[error("Keyring error: {message}")]
    #[diagnostic(code(wcdctl::keyring))]
    Keyring { message: String },

    // ── Replay ───────────────────────────────────────────────────────
    #[error("Cannot use HAR capture: {message}")]
    #[diagnostic(
        code(wcdctl::har),
        help("Export the capture from the browser's network panel as HAR.")
    )]
    Har { message: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } | Self::HttpStatus { .. } => {
                exit_code::CONNECTION
            }
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoConfig { .. } | Self::ProfileNotFound { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── Error mapping ────────────────────────────────────────────────────

impl From<wcdctl_api::Error> for CliError {
    fn from(err: wcdctl_api::Error) -> Self {
        use wcdctl_api::Error as ApiError;

        match err {
            ApiError::Transport(e) => {
                if e.is_timeout() {
                    CliError::Timeout
                } else {
                    CliError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        source: Box::new(e),
                    }
                }
            }
            ApiError::HttpStatus { status, url } => CliError::HttpStatus { status, url },
            ApiError::InvalidUrl(e) => CliError::Validation {
                field: "host".into(),
                reason: e.to_string(),
            },
            ApiError::Tls(message) => CliError::TlsError { message },
            ApiError::MissingSessionId => CliError::AuthFailed {
                profile: "current".into(),
                message: "the switch issued no session".into(),
            },
            ApiError::Unauthenticated => CliError::AuthFailed {
                profile: "current".into(),
                message: "not logged in".into(),
            },
            ApiError::DeviceRejected {
                status: StatusCode::AuthenticationError,
                message,
            } => CliError::AuthFailed {
                profile: "current".into(),
                message,
            },
            ApiError::DeviceRejected { status, message } => CliError::Rejected { status, message },
            ApiError::InvalidOperation { tag, reason } => CliError::Validation {
                field: tag,
                reason: reason.into(),
            },
            ApiError::Serialization(message) | ApiError::MalformedResponse { message } => {
                CliError::MalformedResponse { message }
            }
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(e) => e.into(),
            CoreError::HarIo { path, source } => CliError::Har {
                message: format!("{}: {source}", path.display()),
            },
            CoreError::HarDecode(e) => CliError::Har {
                message: e.to_string(),
            },
            CoreError::InvalidEntry { index, message } => CliError::Har {
                message: format!("entry {}: {message}", index + 1),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoHost { .. } => CliError::NoConfig {
                path: wcdctl_config::config_path().display().to_string(),
            },
            ConfigError::Keyring(e) => CliError::Keyring {
                message: e.to_string(),
            },
            ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_auth_errors_map_to_auth_exit_code() {
        let err: CliError = wcdctl_api::Error::DeviceRejected {
            status: StatusCode::AuthenticationError,
            message: "bad password".into(),
        }
        .into();
        assert!(matches!(err, CliError::AuthFailed { .. }));
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn payload_errors_map_to_rejected() {
        let err: CliError = wcdctl_api::Error::DeviceRejected {
            status: StatusCode::PayloadError,
            message: "Invalid VLAN ID".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::REJECTED);
        assert!(err.to_string().contains("Invalid VLAN ID"));
    }

    #[test]
    fn core_errors_unwrap_api_errors() {
        let err: CliError = CoreError::Api(wcdctl_api::Error::HttpStatus {
            status: 502,
            url: "https://10.0.0.1/wcd".into(),
        })
        .into();
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn missing_host_is_usage_error() {
        let err: CliError = ConfigError::NoHost {
            profile: "default".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
