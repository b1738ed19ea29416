//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::commands::util::prompt_err;
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

const MASK: &str = "********";

/// Replace plaintext passwords before display.
fn redact(cfg: &mut Config) {
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(MASK.into());
        }
    }
}

fn store_in_keyring(profile_name: &str, password: &str) -> Result<(), CliError> {
    wcdctl_config::store_password(profile_name, password).map_err(|e| CliError::Keyring {
        message: format!("failed to store password: {e}"),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("wcdctl configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Switch address
            let host: String = Input::new()
                .with_prompt("Switch address")
                .interact_text()
                .map_err(prompt_err)?;

            // 3. Credentials
            let username: String = Input::new()
                .with_prompt("Username")
                .default(wcdctl_config::FACTORY_USERNAME.into())
                .interact_text()
                .map_err(prompt_err)?;

            let password = rpassword::prompt_password("Password (empty for factory default): ")
                .map_err(prompt_err)?;

            let password_field = if password.is_empty() {
                None
            } else {
                let store_choices = &[
                    "Store password in system keyring (recommended)",
                    "Save to config file (plaintext)",
                ];
                let store_selection = Select::new()
                    .with_prompt("Where to store the password?")
                    .items(store_choices)
                    .default(0)
                    .interact()
                    .map_err(prompt_err)?;

                if store_selection == 0 {
                    store_in_keyring(&profile_name, &password)?;
                    eprintln!("   ✓ Password stored in system keyring");
                    None
                } else {
                    Some(password)
                }
            };

            // 4. TLS
            let insecure = Confirm::new()
                .with_prompt("Accept the switch's self-signed certificate?")
                .default(true)
                .interact()
                .map_err(prompt_err)?;

            // 5. Merge into the existing config
            let profile = Profile {
                host,
                username: Some(username),
                password: password_field,
                insecure: Some(insecure),
                ..Profile::default()
            };

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: wcdctl login");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            redact(&mut cfg);
            let out = output::render_single(global.output, &cfg, |c| {
                toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n({e})"))
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Set password ────────────────────────────────────────────
        ConfigCommand::SetPassword { profile } => {
            let cfg = config::load_config_or_default();
            let profile_name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

            let password = rpassword::prompt_password(format!("Password for '{profile_name}': "))
                .map_err(prompt_err)?;
            if password.is_empty() {
                return Err(CliError::Validation {
                    field: "password".into(),
                    reason: "password cannot be empty".into(),
                });
            }

            store_in_keyring(&profile_name, &password)?;
            eprintln!("✓ Password for '{profile_name}' stored in system keyring");
            Ok(())
        }
    }
}
