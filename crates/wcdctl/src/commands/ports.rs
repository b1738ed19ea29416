//! Per-port writes: VLAN membership, discovery protocols, PoE, security.

use wcdctl_api::WcdClient;
use wcdctl_api::fields::LldpPortState;
use wcdctl_api::requests::{Dot1xSettings, PoeSettings, PortSecuritySettings, SwitchportSettings};

use crate::cli::{Dot1xArgs, GlobalOpts, PoeArgs, PortSecurityArgs, SwitchportArgs};
use crate::commands::done;
use crate::error::CliError;

fn nothing_to_set(interface: &str) -> CliError {
    CliError::Validation {
        field: interface.into(),
        reason: "no settings given".into(),
    }
}

pub async fn switchport(
    client: &WcdClient,
    args: SwitchportArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let settings = SwitchportSettings {
        mode: args.mode,
        general_pvid: args.pvid,
        general_tagged_vlans: args.tagged,
        general_untagged_vlans: args.untagged,
        trunk_member_vlans: args.trunk_members,
    };
    if settings.to_settings().is_empty() {
        return Err(nothing_to_set(&args.interface));
    }
    client.set_switchport(&args.interface, &settings).await?;
    done(&format!("{} VLAN membership updated", args.interface), global);
    Ok(())
}

pub async fn lldp(
    client: &WcdClient,
    interface: &str,
    state: LldpPortState,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    client.set_lldp_port_state(interface, state).await?;
    done(&format!("{interface} LLDP state updated"), global);
    Ok(())
}

pub async fn cdp(
    client: &WcdClient,
    interface: &str,
    enabled: bool,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    client.set_cdp_enabled(interface, enabled).await?;
    let state = if enabled { "enabled" } else { "disabled" };
    done(&format!("{interface} CDP {state}"), global);
    Ok(())
}

pub async fn poe(client: &WcdClient, args: PoeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let settings = PoeSettings {
        admin_enable: args.admin,
        power_priority: args.priority,
    };
    if settings.to_settings().is_empty() {
        return Err(nothing_to_set(&args.interface));
    }
    client.set_poe(&args.interface, &settings).await?;
    done(&format!("{} PoE updated", args.interface), global);
    Ok(())
}

pub async fn port_security(
    client: &WcdClient,
    args: PortSecurityArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let settings = PortSecuritySettings {
        max_mac_count: args.max_macs,
        lock: args.lock,
        learning_mode: args.learning_mode,
    };
    if settings.to_settings().is_empty() {
        return Err(nothing_to_set(&args.interface));
    }
    client.set_port_security(&args.interface, &settings).await?;
    done(&format!("{} port security updated", args.interface), global);
    Ok(())
}

pub async fn dot1x(client: &WcdClient, args: Dot1xArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let settings = Dot1xSettings {
        authentication_method: args.auth_method,
        host_mode: args.host_mode,
        port_control: args.port_control,
        max_eap_requests: args.max_eap_requests,
        quiet_period: args.quiet_period,
        reauthentication_period: args.reauth_period,
        server_timeout: args.server_timeout,
        supplicant_timeout: args.supplicant_timeout,
        resending_eap: args.resend_eap,
        action_on_violation: args.violation_action,
    };
    if settings.to_settings().is_empty() {
        return Err(nothing_to_set(&args.interface));
    }
    client.set_dot1x(&args.interface, &settings).await?;
    done(&format!("{} 802.1X updated", args.interface), global);
    Ok(())
}
