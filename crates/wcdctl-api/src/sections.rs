// Device configuration sections
//
// Every section is addressable through `wcd?{Section}` and doubles as the
// tag of the section element in a request document.

use std::fmt;
use std::str::FromStr;

use strum::{EnumIter, IntoEnumIterator};

/// A named configuration domain on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Section {
    EwsServiceTable,
    TimeSetting,
    VlanList,
    VlanInterfaceIsList,
    FullInterfaceList,
    LldpInterfaceList,
    CdpInterfaceList,
    Lan1ModuleInterfaceTable,
    Lan1InpCosMappingInterfaceTable,
    Lan1OutQueueMappingInterfaceTable,
    Lan1X86PfcTable,
    Stp,
    SpanningTreeGlobalParam,
    PoePseInterfaceList,
    InterfaceSecurityTable,
    ForwardingGlobalSetting,
    Standard8021xInterfaceList,
    Standard8023List,
}

impl Section {
    /// Element / query name used on the wire.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::EwsServiceTable => "EWSServiceTable",
            Self::TimeSetting => "TimeSetting",
            Self::VlanList => "VLANList",
            Self::VlanInterfaceIsList => "VLANInterfaceISList",
            Self::FullInterfaceList => "FullInterfaceList",
            Self::LldpInterfaceList => "LLDPInterfaceList",
            Self::CdpInterfaceList => "CDPInterfaceList",
            Self::Lan1ModuleInterfaceTable => "LAN1ModuleInterfaceTable",
            Self::Lan1InpCosMappingInterfaceTable => "LAN1InpCOSMappingInterfaceTable",
            Self::Lan1OutQueueMappingInterfaceTable => "LAN1OutQueueMappingInterfaceTable",
            Self::Lan1X86PfcTable => "LAN1x86PFCTable",
            Self::Stp => "STP",
            Self::SpanningTreeGlobalParam => "SpanningTreeGlobalParam",
            Self::PoePseInterfaceList => "PoEPSEInterfaceList",
            Self::InterfaceSecurityTable => "InterfaceSecurityTable",
            Self::ForwardingGlobalSetting => "ForwardingGlobalSetting",
            Self::Standard8021xInterfaceList => "Standard802_1xInterfaceList",
            Self::Standard8023List => "Standard802_3List",
        }
    }

    /// Short name accepted on the command line.
    pub fn symbolic_name(self) -> &'static str {
        match self {
            Self::EwsServiceTable => "ews-service-table",
            Self::TimeSetting => "time-setting",
            Self::VlanList => "vlan-list",
            Self::VlanInterfaceIsList => "vlan-interface",
            Self::FullInterfaceList => "full-interface-list",
            Self::LldpInterfaceList => "lldp-interface",
            Self::CdpInterfaceList => "cdp-interface",
            Self::Lan1ModuleInterfaceTable => "lan1-module-interface",
            Self::Lan1InpCosMappingInterfaceTable => "lan1-inp-cos-mapping",
            Self::Lan1OutQueueMappingInterfaceTable => "lan1-out-queue-mapping",
            Self::Lan1X86PfcTable => "lan1-x86-pfc",
            Self::Stp => "stp",
            Self::SpanningTreeGlobalParam => "stp-global",
            Self::PoePseInterfaceList => "poe-pse-interface",
            Self::InterfaceSecurityTable => "interface-security",
            Self::ForwardingGlobalSetting => "forwarding-global",
            Self::Standard8021xInterfaceList => "dot1x-interface",
            Self::Standard8023List => "dot3-interface",
        }
    }

    /// Rows of these sections are `<InterfaceEntry>`; all others use `<Entry>`.
    pub fn uses_interface_entry(self) -> bool {
        matches!(
            self,
            Self::LldpInterfaceList | Self::Standard8021xInterfaceList
        )
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Unknown section name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section '{0}'")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    /// Accepts the wire name (`VLANList`) or the symbolic name (`vlan-list`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::iter()
            .find(|section| {
                section.wire_name() == s || section.symbolic_name().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| UnknownSection(s.to_owned()))
    }
}

/// Firmware / configuration file operations on `System.xml?action=...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum SystemAction {
    DownloadConfigurationFile,
    UploadConfigurationFile,
    UpdateFirmware,
}

impl SystemAction {
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::DownloadConfigurationFile => "downloadConfigFile",
            Self::UploadConfigurationFile => "uploadConfigFile",
            Self::UpdateFirmware => "updateFirmware",
        }
    }
}
