//! Shared configuration for wcdctl.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation to the settings a `WcdClient` is built from. The CLI layers
//! its flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use wcdctl_api::{Credentials, TlsMode, TransportConfig};

/// Keyring service name; entries are keyed `{profile}/password`.
pub const KEYRING_SERVICE: &str = "wcdctl";

/// Factory login of the switch, used when nothing else is configured.
pub const FACTORY_USERNAME: &str = "cisco";
pub const FACTORY_PASSWORD: &str = "cisco";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no host configured for profile '{profile}'")]
    NoHost { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named switch profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Accept the switch's self-signed certificate.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: default_insecure(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

/// A named switch profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Switch address, host or host:port (e.g., "169.254.1.0").
    #[serde(default)]
    pub host: String,

    /// "https" (default) or "http".
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Login user; the factory default when unset.
    pub username: Option<String>,

    /// Password (plaintext, prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout, in seconds.
    pub timeout: Option<u64>,
}

fn default_scheme() -> String {
    "https".into()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            host: String::new(),
            scheme: default_scheme(),
            username: None,
            password: None,
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

/// Everything needed to build a `WcdClient` and log in.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "wcdctl", "wcdctl").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("wcdctl");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path`, then `WCDCTL_*` variables (`__` separates nesting,
/// e.g. `WCDCTL_DEFAULTS__TIMEOUT=60`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("WCDCTL_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/password"),
    )?)
}

/// Store a profile password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

/// Resolve the login password without CLI flags.
///
/// Order: `password_env` → `WCDCTL_PASSWORD` → keyring → plaintext →
/// factory default.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> SecretString {
    // 1. Env vars
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return SecretString::from(val);
        }
    }
    if let Ok(val) = std::env::var("WCDCTL_PASSWORD") {
        return SecretString::from(val);
    }

    // 2. Keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(pw) = entry.get_password() {
            return SecretString::from(pw);
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = profile.password {
        return SecretString::from(pw.clone());
    }

    SecretString::from(FACTORY_PASSWORD.to_owned())
}

/// Resolve username + password without CLI flags.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Credentials {
    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var("WCDCTL_USERNAME").ok())
        .unwrap_or_else(|| FACTORY_USERNAME.into());
    Credentials::new(username, resolve_password(profile, profile_name))
}

// ── Translation ─────────────────────────────────────────────────────

/// `{scheme}://{host}/` for a profile.
pub fn base_url(profile: &Profile, profile_name: &str) -> Result<Url, ConfigError> {
    let host = profile.host.trim();
    if host.is_empty() {
        return Err(ConfigError::NoHost {
            profile: profile_name.into(),
        });
    }
    if !matches!(profile.scheme.as_str(), "https" | "http") {
        return Err(ConfigError::Validation {
            field: "scheme".into(),
            reason: format!("expected 'https' or 'http', got '{}'", profile.scheme),
        });
    }

    let raw = format!("{}://{host}/", profile.scheme);
    Url::parse(&raw).map_err(|_| ConfigError::Validation {
        field: "host".into(),
        reason: format!("invalid host: {host}"),
    })
}

/// TLS mode: custom CA wins, then the insecure flag, else system roots.
pub fn tls_mode(profile: &Profile, defaults: &Defaults) -> TlsMode {
    if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    }
}

/// Build `ClientSettings` from a profile, no CLI flag overrides.
pub fn profile_to_client_settings(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientSettings, ConfigError> {
    let base_url = base_url(profile, profile_name)?;
    let credentials = resolve_credentials(profile, profile_name);
    let transport = TransportConfig {
        tls: tls_mode(profile, defaults),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    };

    Ok(ClientSettings {
        base_url,
        credentials,
        transport,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    fn profile(host: &str) -> Profile {
        Profile {
            host: host.into(),
            ..Profile::default()
        }
    }

    #[test]
    fn loads_profiles_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[defaults]
timeout = 10

[profiles.lab]
host = "10.0.0.2"
username = "admin"
password = "hunter2"
insecure = false
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("lab"));
        assert_eq!(cfg.defaults.timeout, 10);
        assert_eq!(cfg.defaults.output, "table");
        assert!(cfg.defaults.insecure);

        let lab = &cfg.profiles["lab"];
        assert_eq!(lab.host, "10.0.0.2");
        assert_eq!(lab.scheme, "https");
        assert_eq!(lab.username.as_deref(), Some("admin"));
        assert_eq!(lab.insecure, Some(false));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert("default".into(), profile("169.254.1.0"));
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["default"].host, "169.254.1.0");
    }

    #[test]
    fn base_url_from_host_and_scheme() {
        let url = base_url(&profile("169.254.1.0"), "default").unwrap();
        assert_eq!(url.as_str(), "https://169.254.1.0/");

        let mut plain = profile("10.0.0.2:8080");
        plain.scheme = "http".into();
        assert_eq!(
            base_url(&plain, "default").unwrap().as_str(),
            "http://10.0.0.2:8080/"
        );
    }

    #[test]
    fn base_url_rejects_bad_input() {
        assert!(matches!(
            base_url(&profile("  "), "lab"),
            Err(ConfigError::NoHost { profile }) if profile == "lab"
        ));

        let mut ftp = profile("10.0.0.2");
        ftp.scheme = "ftp".into();
        assert!(matches!(
            base_url(&ftp, "lab"),
            Err(ConfigError::Validation { field, .. }) if field == "scheme"
        ));
    }

    #[test]
    fn tls_mode_precedence() {
        let defaults = Defaults::default();
        let mut p = profile("10.0.0.2");
        assert_eq!(tls_mode(&p, &defaults), TlsMode::DangerAcceptInvalid);

        p.insecure = Some(false);
        assert_eq!(tls_mode(&p, &defaults), TlsMode::System);

        p.ca_cert = Some(PathBuf::from("/etc/wcd-ca.pem"));
        assert_eq!(
            tls_mode(&p, &defaults),
            TlsMode::CustomCa(PathBuf::from("/etc/wcd-ca.pem"))
        );
    }

    #[test]
    fn password_from_named_env_var() {
        let mut p = profile("10.0.0.2");
        p.password = Some("plaintext".into());
        p.password_env = Some("PATH".into());

        let expected = std::env::var("PATH").unwrap();
        let secret = resolve_password(&p, "wcdctl-test-nonexistent-profile");
        assert_eq!(secret.expose_secret(), expected);
    }

    #[test]
    fn client_settings_timeout_falls_back_to_defaults() {
        let defaults = Defaults {
            timeout: 12,
            ..Defaults::default()
        };
        let mut p = profile("10.0.0.2");
        p.username = Some("admin".into());

        let settings = profile_to_client_settings(&p, "default", &defaults).unwrap();
        assert_eq!(settings.transport.timeout, Duration::from_secs(12));
        assert_eq!(settings.credentials.username, "admin");
        assert_eq!(settings.base_url.as_str(), "https://10.0.0.2/");
    }
}
