//! CLI configuration: thin wrapper around `wcdctl_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--host, --username, --password, ...).

use secrecy::SecretString;

use wcdctl_api::Credentials;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use wcdctl_config::{
    ClientSettings, Config, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for error help.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Apply flag overrides to a profile. Flags win over profile values.
pub fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref host) = global.host {
        profile.host.clone_from(host);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    profile
}

/// Build `ClientSettings` from the config file, profile, and CLI overrides.
///
/// Without a matching profile the flags alone must name the switch. An
/// explicitly requested profile that does not exist is an error.
pub fn resolve_client_settings(
    global: &GlobalOpts,
    config: &Config,
) -> Result<ClientSettings, CliError> {
    let profile_name = active_profile_name(global, config);

    let profile = match config.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        None => Profile::default(),
    };

    let profile = apply_overrides(profile, global);
    let mut settings =
        wcdctl_config::profile_to_client_settings(&profile, &profile_name, &config.defaults)?;

    if let Some(ref password) = global.password {
        settings.credentials = Credentials::new(
            settings.credentials.username.clone(),
            SecretString::from(password.clone()),
        );
    }

    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["wcdctl"];
        argv.extend_from_slice(args);
        argv.push("login");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn lab_config() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                host: "10.0.0.2".into(),
                username: Some("admin".into()),
                password: Some("from-file".into()),
                timeout: Some(5),
                ..Profile::default()
            },
        );
        cfg.default_profile = Some("lab".into());
        cfg
    }

    #[test]
    fn host_flag_alone_is_enough() {
        let settings =
            resolve_client_settings(&global(&["--host", "10.0.0.9"]), &Config::default()).unwrap();
        assert_eq!(settings.base_url.as_str(), "https://10.0.0.9/");
    }

    #[test]
    fn flags_override_profile() {
        let opts = global(&["--host", "10.0.0.3", "--password", "flag", "--timeout", "60"]);
        let settings = resolve_client_settings(&opts, &lab_config()).unwrap();

        assert_eq!(settings.base_url.as_str(), "https://10.0.0.3/");
        assert_eq!(settings.credentials.username, "admin");
        assert_eq!(settings.credentials.password.expose_secret(), "flag");
        assert_eq!(settings.transport.timeout.as_secs(), 60);
    }

    #[test]
    fn explicit_unknown_profile_is_an_error() {
        let err = resolve_client_settings(&global(&["--profile", "nope"]), &lab_config())
            .unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "lab"));
    }

    #[test]
    fn no_profile_and_no_host() {
        let err = resolve_client_settings(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }
}
