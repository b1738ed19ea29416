// ── Typed request structs for configuration calls ──
//
// Each struct turns into an ordered `Settings` row. Optional fields are
// left out of the row when unset so the device keeps its current value.

use crate::fields::{
    ActionOnViolationType, AdminPortControlType, HostMode, LearningMode,
    LockInterfaceAdminEnabled, MacAuthenticationMethod, PoeAdminEnable, PowerPriority, Settings,
    SwitchPortModeAdmin,
};

// ── VLAN membership ────────────────────────────────────────────────

/// Port VLAN membership (`VLANInterfaceISList` row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchportSettings {
    pub mode: Option<SwitchPortModeAdmin>,
    pub general_pvid: Option<u16>,
    /// VLAN list such as `2350-2351`.
    pub general_tagged_vlans: Option<String>,
    pub general_untagged_vlans: Option<String>,
    pub trunk_member_vlans: Option<String>,
}

impl SwitchportSettings {
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::new();
        if let Some(mode) = self.mode {
            settings = settings.set_field("switchportModeAdmin", mode);
        }
        settings
            .set_opt("generalPVID", self.general_pvid)
            .set_opt("generalTaggedVLANs", self.general_tagged_vlans.as_deref())
            .set_opt("generalUntaggedVLANs", self.general_untagged_vlans.as_deref())
            .set_opt("trunkMemberVLANs", self.trunk_member_vlans.as_deref())
    }
}

// ── PoE ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoeSettings {
    pub admin_enable: Option<PoeAdminEnable>,
    pub power_priority: Option<PowerPriority>,
}

impl PoeSettings {
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::new();
        if let Some(admin) = self.admin_enable {
            settings = settings.set_field("adminEnable", admin);
        }
        if let Some(priority) = self.power_priority {
            settings = settings.set_field("powerPriority", priority);
        }
        settings
    }
}

// ── Port security ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortSecuritySettings {
    pub max_mac_count: Option<u32>,
    pub lock: Option<LockInterfaceAdminEnabled>,
    pub learning_mode: Option<LearningMode>,
}

impl PortSecuritySettings {
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::new().set_opt("maxMACCount", self.max_mac_count);
        if let Some(lock) = self.lock {
            settings = settings.set_field("lockInterfaceAdminEnabled", lock);
        }
        if let Some(mode) = self.learning_mode {
            settings = settings.set_field("learningMode", mode);
        }
        settings
    }
}

// ── 802.1X ─────────────────────────────────────────────────────────

/// Per-port 802.1X authenticator settings. Timers are in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dot1xSettings {
    pub authentication_method: Option<MacAuthenticationMethod>,
    pub host_mode: Option<HostMode>,
    pub port_control: Option<AdminPortControlType>,
    pub max_eap_requests: Option<u32>,
    pub quiet_period: Option<u32>,
    pub reauthentication_period: Option<u32>,
    pub server_timeout: Option<u32>,
    pub supplicant_timeout: Option<u32>,
    pub resending_eap: Option<u32>,
    pub action_on_violation: Option<ActionOnViolationType>,
}

impl Dot1xSettings {
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::new();
        if let Some(method) = self.authentication_method {
            settings = settings.set_field("MACAuthenticationMethod", method);
        }
        if let Some(mode) = self.host_mode {
            settings = settings.set_field("hostMode", mode);
        }
        if let Some(control) = self.port_control {
            settings = settings.set_field("adminPortControlType", control);
        }
        settings = settings
            .set_opt("maxEAPRequestNo", self.max_eap_requests)
            .set_opt("quietPeriod", self.quiet_period)
            .set_opt("reauthenticationPeriod", self.reauthentication_period)
            .set_opt("serverTimeout", self.server_timeout)
            .set_opt("supplicantTimeout", self.supplicant_timeout)
            .set_opt("resendingEAP", self.resending_eap);
        if let Some(action) = self.action_on_violation {
            settings = settings.set_field("actionOnViolationType", action);
        }
        settings
    }
}

// ── Spanning tree ──────────────────────────────────────────────────

/// Bridge-wide STP parameters (`STP` section). Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StpSettings {
    pub bpdu_handling_mode: u8,
    pub path_cost_default_value_type: u8,
    pub forward_delay: u8,
    pub hello_time: u8,
    pub max_age: u8,
    pub bridge_priority: u32,
}

impl Default for StpSettings {
    /// IEEE 802.1D defaults.
    fn default() -> Self {
        Self {
            bpdu_handling_mode: 2,
            path_cost_default_value_type: 2,
            forward_delay: 15,
            hello_time: 2,
            max_age: 20,
            bridge_priority: 32768,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switchport_general_mode_row() {
        let settings = SwitchportSettings {
            mode: Some(SwitchPortModeAdmin::General),
            general_pvid: Some(2351),
            general_tagged_vlans: Some("2350-2351".into()),
            general_untagged_vlans: None,
            trunk_member_vlans: None,
        }
        .to_settings();

        let pairs: Vec<_> = settings.iter().collect();
        assert_eq!(
            pairs,
            [
                ("switchportModeAdmin", "3"),
                ("generalPVID", "2351"),
                ("generalTaggedVLANs", "2350-2351"),
            ]
        );
    }

    #[test]
    fn empty_structs_produce_empty_rows() {
        assert!(PoeSettings::default().to_settings().is_empty());
        assert!(PortSecuritySettings::default().to_settings().is_empty());
        assert!(Dot1xSettings::default().to_settings().is_empty());
    }

    #[test]
    fn dot1x_row_order() {
        let settings = Dot1xSettings {
            authentication_method: Some(MacAuthenticationMethod::EapolOnly),
            host_mode: Some(HostMode::Multiple),
            port_control: Some(AdminPortControlType::ForceAuthorized),
            quiet_period: Some(60),
            action_on_violation: Some(ActionOnViolationType::Discard),
            ..Dot1xSettings::default()
        }
        .to_settings();

        let keys: Vec<_> = settings.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [
                "MACAuthenticationMethod",
                "hostMode",
                "adminPortControlType",
                "quietPeriod",
                "actionOnViolationType",
            ]
        );
    }
}
