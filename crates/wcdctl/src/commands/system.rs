//! Session check and configuration file download.

use std::path::Path;

use wcdctl_api::{Credentials, WcdClient};

use crate::cli::GlobalOpts;
use crate::commands::done;
use crate::error::CliError;
use crate::output;

/// The session is already open by the time this runs.
#[allow(clippy::unnecessary_wraps)]
pub fn login(
    client: &WcdClient,
    credentials: &Credentials,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    done(
        &format!(
            "Logged in to {} as {}",
            client.base_url(),
            credentials.username
        ),
        global,
    );
    Ok(())
}

pub async fn download_config(
    client: &WcdClient,
    file: Option<&Path>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let body = client.download_config().await?;
    match file {
        Some(path) => {
            std::fs::write(path, &body)?;
            done(&format!("Configuration written to {}", path.display()), global);
        }
        None => output::print_output(&body, global.quiet),
    }
    Ok(())
}
