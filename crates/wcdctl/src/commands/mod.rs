//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod config_cmd;
pub mod get;
pub mod ports;
pub mod replay;
pub mod set;
pub mod stp;
pub mod system;
pub mod util;

use tracing::warn;

use wcdctl_api::{Credentials, WcdClient};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a switch-bound command to the appropriate handler.
///
/// Direct commands run inside one session: log in, run, log out. Replay
/// manages its own session.
pub async fn dispatch(
    cmd: Command,
    client: &WcdClient,
    credentials: &Credentials,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Command::Replay(args) = cmd {
        return replay::handle(client, credentials, args, global).await;
    }

    client.login(credentials).await?;

    let result = match cmd {
        Command::Login => system::login(client, credentials, global),
        Command::Get(args) => get::handle(client, args, global).await,
        Command::IdleTimeout { seconds } => set::idle_timeout(client, seconds, global).await,
        Command::Time(args) => set::time(client, args, global).await,
        Command::Vlan { ids } => set::vlans(client, &ids, global).await,
        Command::Section(args) => set::section(client, args, global).await,
        Command::Interface(args) => set::interface(client, args, global).await,
        Command::Aging { seconds } => set::aging(client, seconds, global).await,
        Command::Switchport(args) => ports::switchport(client, args, global).await,
        Command::Lldp { interface, state } => ports::lldp(client, &interface, state, global).await,
        Command::Cdp { interface, disable } => {
            ports::cdp(client, &interface, !disable, global).await
        }
        Command::Poe(args) => ports::poe(client, args, global).await,
        Command::PortSecurity(args) => ports::port_security(client, args, global).await,
        Command::Dot1x(args) => ports::dot1x(client, args, global).await,
        Command::Stp(args) => stp::handle(client, args, global).await,
        Command::DownloadConfig { file } => {
            system::download_config(client, file.as_deref(), global).await
        }
        // Config, Completions and Replay are handled before this point
        Command::Replay(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    };

    if let Err(e) = client.logout().await {
        warn!(error = %e, "logout failed");
    }

    result
}

/// Print a one-line confirmation for a write.
pub(crate) fn done(message: &str, global: &GlobalOpts) {
    if !global.quiet {
        eprintln!("✓ {message}");
    }
}
