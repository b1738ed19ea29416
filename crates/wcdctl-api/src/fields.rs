// Device field enumerations
//
// String-valued enumerations for configuration fields. Each parses from a
// kebab-case symbolic name (case-insensitive) and renders its wire value
// through `WireValue`.

use std::fmt;

use indexmap::IndexMap;
use strum::{EnumIter, EnumString, VariantNames};

/// A value with a fixed wire representation.
pub trait WireValue {
    fn wire_value(&self) -> &'static str;
}

/// Port VLAN mode (`switchportModeAdmin`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SwitchPortModeAdmin {
    Access,
    Trunk,
    General,
    Customer,
}

impl WireValue for SwitchPortModeAdmin {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::Access => "1",
            Self::Trunk => "2",
            Self::General => "3",
            Self::Customer => "4",
        }
    }
}

/// LLDP admin state per port (`portState`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum LldpPortState {
    TransmitOnly,
    ReceiveOnly,
    TransmitReceive,
    Disabled,
}

impl WireValue for LldpPortState {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::TransmitOnly => "1",
            Self::ReceiveOnly => "2",
            Self::TransmitReceive => "3",
            Self::Disabled => "4",
        }
    }
}

/// PSE port admin switch (`adminEnable`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PoeAdminEnable {
    Enabled,
    Disabled,
}

impl WireValue for PoeAdminEnable {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::Enabled => "1",
            Self::Disabled => "2",
        }
    }
}

/// PSE port power priority (`powerPriority`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PowerPriority {
    Critical,
    High,
    Low,
}

impl WireValue for PowerPriority {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::Critical => "1",
            Self::High => "2",
            Self::Low => "3",
        }
    }
}

/// Spanning tree flavour (`STPOperationMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum StpOperationMode {
    Stp,
    Rstp,
    Mstp,
}

impl WireValue for StpOperationMode {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::Stp => "1",
            Self::Rstp => "2",
            Self::Mstp => "3",
        }
    }
}

/// Port security lock (`lockInterfaceAdminEnabled`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum LockInterfaceAdminEnabled {
    Locked,
    Unlocked,
}

impl WireValue for LockInterfaceAdminEnabled {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::Locked => "1",
            Self::Unlocked => "2",
        }
    }
}

/// Port security MAC learning mode (`learningMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum LearningMode {
    Classic,
    SecurePermanent,
    SecureDeleteOnReset,
    LimitedDynamic,
}

impl WireValue for LearningMode {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::Classic => "1",
            Self::SecurePermanent => "2",
            Self::SecureDeleteOnReset => "3",
            Self::LimitedDynamic => "4",
        }
    }
}

/// 802.1X authentication method (`MACAuthenticationMethod`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MacAuthenticationMethod {
    EapolOnly,
    MacOnly,
    EapolAndMac,
}

impl WireValue for MacAuthenticationMethod {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::EapolOnly => "1",
            Self::MacOnly => "2",
            Self::EapolAndMac => "3",
        }
    }
}

/// 802.1X host mode (`hostMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum HostMode {
    Single,
    Multiple,
    MultiSessions,
}

impl WireValue for HostMode {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::Single => "1",
            Self::Multiple => "2",
            Self::MultiSessions => "3",
        }
    }
}

/// 802.1X port control (`adminPortControlType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AdminPortControlType {
    ForceUnauthorized,
    Auto,
    ForceAuthorized,
}

impl WireValue for AdminPortControlType {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::ForceUnauthorized => "1",
            Self::Auto => "2",
            Self::ForceAuthorized => "3",
        }
    }
}

/// 802.1X violation handling (`actionOnViolationType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, VariantNames)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ActionOnViolationType {
    Protect,
    Restrict,
    Shutdown,
    Discard,
}

impl WireValue for ActionOnViolationType {
    fn wire_value(&self) -> &'static str {
        match self {
            Self::Protect => "1",
            Self::Restrict => "2",
            Self::Shutdown => "3",
            Self::Discard => "4",
        }
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Ordered field/value pairs for one configuration row.
///
/// Insertion order is the order fields are emitted in the request body.
/// Setting a field twice keeps its first position and the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings(IndexMap<String, String>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a free-form field.
    pub fn set(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Set an enumerated field to its wire value.
    pub fn set_field(self, key: impl Into<String>, value: impl WireValue) -> Self {
        let wire = value.wire_value();
        self.set(key, wire)
    }

    /// Set `key` only when `value` is present.
    pub fn set_opt(self, key: impl Into<String>, value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        self.0.insert(key.into(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut settings = Self::new();
        for (k, v) in iter {
            settings.insert(k, v);
        }
        settings
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_names_parse_case_insensitively() {
        assert_eq!(
            "secure-delete-on-reset".parse::<LearningMode>().unwrap(),
            LearningMode::SecureDeleteOnReset
        );
        assert_eq!("RSTP".parse::<StpOperationMode>().unwrap(), StpOperationMode::Rstp);
        assert!("sometimes".parse::<PoeAdminEnable>().is_err());
    }

    #[test]
    fn variant_names_are_kebab_case() {
        assert_eq!(
            HostMode::VARIANTS,
            &["single", "multiple", "multi-sessions"]
        );
    }

    #[test]
    fn settings_keep_insertion_order() {
        let settings = Settings::new()
            .set_field("switchportModeAdmin", SwitchPortModeAdmin::General)
            .set("generalPVID", 2351)
            .set_opt("generalTaggedVLANs", Some("2350-2351"))
            .set_opt("generalUntaggedVLANs", None::<&str>);

        let keys: Vec<_> = settings.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["switchportModeAdmin", "generalPVID", "generalTaggedVLANs"]);
        assert_eq!(settings.get("switchportModeAdmin"), Some("3"));
    }

    #[test]
    fn settings_from_pairs() {
        let settings: Settings = [("agingInterval", 300)].into_iter().collect();
        assert_eq!(settings.get("agingInterval"), Some("300"));
        assert_eq!(settings.len(), 1);
    }
}
