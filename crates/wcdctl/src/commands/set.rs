//! Single-value and free-form section writes.

use wcdctl_api::WcdClient;

use crate::cli::{GlobalOpts, InterfaceArgs, SectionArgs, TimeArgs};
use crate::commands::done;
use crate::commands::util::to_settings;
use crate::error::CliError;

pub async fn idle_timeout(
    client: &WcdClient,
    seconds: u32,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    client.set_max_idle_timeout(seconds).await?;
    if seconds == 0 {
        done("Idle timeout disabled", global);
    } else {
        done(&format!("Idle timeout set to {seconds}s"), global);
    }
    Ok(())
}

pub async fn time(client: &WcdClient, args: TimeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let at = args
        .at
        .unwrap_or_else(|| chrono::Local::now().naive_local());
    client.set_time(at).await?;
    done(&format!("Clock set to {}", at.format("%Y-%m-%d %H:%M:%S")), global);
    Ok(())
}

/// Create each VLAN in order, stopping at the first rejection.
pub async fn vlans(client: &WcdClient, ids: &[u16], global: &GlobalOpts) -> Result<(), CliError> {
    for &id in ids {
        client.set_vlan_id(id).await?;
        done(&format!("VLAN {id} created"), global);
    }
    Ok(())
}

pub async fn section(
    client: &WcdClient,
    args: SectionArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let settings = to_settings(&args.values);
    client.set_section_settings(args.section, &settings).await?;
    done(&format!("{} updated", args.section), global);
    Ok(())
}

pub async fn interface(
    client: &WcdClient,
    args: InterfaceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let settings = to_settings(&args.values);
    client
        .set_interface_section_settings(args.section, &args.interface, &settings)
        .await?;
    done(&format!("{} {} updated", args.section, args.interface), global);
    Ok(())
}

pub async fn aging(client: &WcdClient, seconds: u32, global: &GlobalOpts) -> Result<(), CliError> {
    client.set_aging_interval(seconds).await?;
    done(&format!("MAC aging set to {seconds}s"), global);
    Ok(())
}
