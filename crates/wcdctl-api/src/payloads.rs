// Request documents for the configuration calls on `WcdClient`.
//
// Kept apart from the HTTP plumbing so the exact XML shape of each call
// can be checked without a device.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::builder::{Action, RequestNode};
use crate::error::Error;
use crate::fields::Settings;
use crate::requests::StpSettings;
use crate::sections::Section;

/// Protocol version sent in the `version` leaf.
pub const DOCUMENT_VERSION: &str = "1.0";

/// `DeviceConfiguration` + `version` + one `set` section holding `body`.
fn versioned_set(section: Section, body: RequestNode) -> Result<RequestNode, Error> {
    RequestNode::device_configuration()
        .append(RequestNode::version(DOCUMENT_VERSION))?
        .append(RequestNode::service(section, Action::Set).append(body)?)
}

fn values(settings: &Settings) -> impl Iterator<Item = RequestNode> + '_ {
    settings.iter().map(|(k, v)| RequestNode::value(k, v))
}

/// Web session idle timeout, in seconds (0 disables it).
pub fn idle_timeout(timeout_secs: u32) -> Result<RequestNode, Error> {
    versioned_set(
        Section::EwsServiceTable,
        RequestNode::entry().append(RequestNode::value(
            "maxIdleTimeout",
            timeout_secs.to_string(),
        ))?,
    )
}

/// Set the device clock. No `version` leaf.
pub fn local_time(at: NaiveDateTime) -> Result<RequestNode, Error> {
    let clock = RequestNode::current_local_time().extend([
        RequestNode::value("year", at.year().to_string()),
        RequestNode::value("month", at.month().to_string()),
        RequestNode::value("day", at.day().to_string()),
        RequestNode::value("hour", at.hour().to_string()),
        RequestNode::value("minute", at.minute().to_string()),
        RequestNode::value("second", at.second().to_string()),
    ])?;

    RequestNode::device_configuration().append(
        RequestNode::service(Section::TimeSetting, Action::Set)
            .append(RequestNode::value("setTimeMode", "1"))?
            .append(clock)?,
    )
}

/// Create a VLAN.
pub fn vlan(vlan_id: u16) -> Result<RequestNode, Error> {
    versioned_set(
        Section::VlanList,
        RequestNode::vlan().append(RequestNode::value("VLANID", vlan_id.to_string()))?,
    )
}

/// One `Entry` row with every field of `settings`.
pub fn section_settings(section: Section, settings: &Settings) -> Result<RequestNode, Error> {
    versioned_set(section, RequestNode::entry().extend(values(settings))?)
}

/// One row keyed by `interfaceName`. LLDP and 802.1X rows are
/// `InterfaceEntry`, the rest `Entry`.
pub fn interface_settings(
    section: Section,
    interface_name: &str,
    settings: &Settings,
) -> Result<RequestNode, Error> {
    let row = if section.uses_interface_entry() {
        RequestNode::interface_entry(interface_name)
    } else {
        RequestNode::entry().append(RequestNode::value("interfaceName", interface_name))?
    };
    versioned_set(section, row.extend(values(settings))?)
}

/// Bridge STP parameters: a `GlobalSetting` and a `BridgeSetting` block.
pub fn stp(settings: &StpSettings) -> Result<RequestNode, Error> {
    let global = RequestNode::global_setting().extend([
        RequestNode::value("BPDUHandlingMode", settings.bpdu_handling_mode.to_string()),
        RequestNode::value(
            "pathCostDefaultValueType",
            settings.path_cost_default_value_type.to_string(),
        ),
    ])?;
    let bridge = RequestNode::bridge_setting().extend([
        RequestNode::value("forwardDelay", settings.forward_delay.to_string()),
        RequestNode::value("helloTime", settings.hello_time.to_string()),
        RequestNode::value("maxAge", settings.max_age.to_string()),
        RequestNode::value("bridgePriority", settings.bridge_priority.to_string()),
    ])?;

    RequestNode::device_configuration()
        .append(RequestNode::version(DOCUMENT_VERSION))?
        .append(
            RequestNode::service(Section::Stp, Action::Set)
                .append(global)?
                .append(bridge)?,
        )
}
