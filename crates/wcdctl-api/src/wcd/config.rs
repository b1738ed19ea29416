// WCD configuration endpoints
//
// Reads are `GET wcd?{Section}...`; writes POST a `DeviceConfiguration`
// document to `wcd?{Section}` (or bare `wcd?` for clock and idle timeout).

use chrono::NaiveDateTime;
use tracing::debug;
use xmltree::EmitterConfig;

use crate::builder::RequestNode;
use crate::endpoints::{self, SectionQuery};
use crate::error::Error;
use crate::fields::{LldpPortState, Settings, StpOperationMode, WireValue};
use crate::payloads;
use crate::requests::{
    Dot1xSettings, PoeSettings, PortSecuritySettings, StpSettings, SwitchportSettings,
};
use crate::response::WcdResponse;
use crate::sections::Section;
use crate::wcd::client::WcdClient;

impl WcdClient {
    // ── Reads ────────────────────────────────────────────────────────

    /// Read one or more sections.
    ///
    /// `GET wcd?{Q1}{Q2}...`
    pub async fn get_sections(&self, queries: &[SectionQuery]) -> Result<WcdResponse, Error> {
        let url = endpoints::wcd_url(self.base_url(), queries)?;
        debug!(sections = queries.len(), "reading sections");
        self.get(url).await
    }

    /// Read sections and pretty-print the returned `DeviceConfiguration`.
    ///
    /// Returns an empty string when the device sent no configuration data.
    pub async fn get_sections_xml(&self, queries: &[SectionQuery]) -> Result<String, Error> {
        let response = self.get_sections(queries).await?;
        let Some(config) = response.device_configuration() else {
            return Ok(String::new());
        };

        let emitter = EmitterConfig::new()
            .perform_indent(true)
            .indent_string("\t")
            .write_document_declaration(false);
        let mut out = Vec::new();
        config
            .write_with_config(&mut out, emitter)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// POST a request document to `wcd?{queries}`.
    pub async fn post_document(
        &self,
        queries: &[SectionQuery],
        document: &RequestNode,
    ) -> Result<WcdResponse, Error> {
        let url = endpoints::wcd_url(self.base_url(), queries)?;
        self.post(url, document).await
    }

    /// Web session idle timeout in seconds; 0 means never.
    pub async fn set_max_idle_timeout(&self, timeout_secs: u32) -> Result<(), Error> {
        debug!(timeout_secs, "setting idle timeout");
        let doc = payloads::idle_timeout(timeout_secs)?;
        self.post_document(&[], &doc).await?;
        Ok(())
    }

    /// Set the device clock (manual time mode).
    pub async fn set_time(&self, at: NaiveDateTime) -> Result<(), Error> {
        debug!(%at, "setting device time");
        let doc = payloads::local_time(at)?;
        self.post_document(&[], &doc).await?;
        Ok(())
    }

    /// Create a VLAN.
    ///
    /// `POST wcd?{VLANList}`
    pub async fn set_vlan_id(&self, vlan_id: u16) -> Result<(), Error> {
        debug!(vlan_id, "creating VLAN");
        let doc = payloads::vlan(vlan_id)?;
        self.post_document(&[Section::VlanList.into()], &doc).await?;
        Ok(())
    }

    /// Write a single-row, non-interface section.
    ///
    /// `POST wcd?{Section}`
    pub async fn set_section_settings(
        &self,
        section: Section,
        settings: &Settings,
    ) -> Result<(), Error> {
        debug!(%section, fields = settings.len(), "writing section");
        let doc = payloads::section_settings(section, settings)?;
        self.post_document(&[section.into()], &doc).await?;
        Ok(())
    }

    /// Write the row of `section` belonging to `interface_name`.
    ///
    /// `POST wcd?{Section&interfaceName=..}`
    pub async fn set_interface_section_settings(
        &self,
        section: Section,
        interface_name: &str,
        settings: &Settings,
    ) -> Result<(), Error> {
        debug!(%section, interface_name, fields = settings.len(), "writing interface row");
        let doc = payloads::interface_settings(section, interface_name, settings)?;
        let query = SectionQuery::for_interface(section, interface_name);
        self.post_document(&[query], &doc).await?;
        Ok(())
    }

    // ── Typed helpers ────────────────────────────────────────────────

    /// Port VLAN membership.
    pub async fn set_switchport(
        &self,
        interface_name: &str,
        settings: &SwitchportSettings,
    ) -> Result<(), Error> {
        self.set_interface_section_settings(
            Section::VlanInterfaceIsList,
            interface_name,
            &settings.to_settings(),
        )
        .await
    }

    pub async fn set_lldp_port_state(
        &self,
        interface_name: &str,
        state: LldpPortState,
    ) -> Result<(), Error> {
        let settings = Settings::new().set_field("portState", state);
        self.set_interface_section_settings(Section::LldpInterfaceList, interface_name, &settings)
            .await
    }

    pub async fn set_cdp_enabled(&self, interface_name: &str, enabled: bool) -> Result<(), Error> {
        let settings = Settings::new().set("enbl", if enabled { 1 } else { 2 });
        self.set_interface_section_settings(Section::CdpInterfaceList, interface_name, &settings)
            .await
    }

    pub async fn set_poe(&self, interface_name: &str, settings: &PoeSettings) -> Result<(), Error> {
        self.set_interface_section_settings(
            Section::PoePseInterfaceList,
            interface_name,
            &settings.to_settings(),
        )
        .await
    }

    pub async fn set_port_security(
        &self,
        interface_name: &str,
        settings: &PortSecuritySettings,
    ) -> Result<(), Error> {
        self.set_interface_section_settings(
            Section::InterfaceSecurityTable,
            interface_name,
            &settings.to_settings(),
        )
        .await
    }

    pub async fn set_dot1x(
        &self,
        interface_name: &str,
        settings: &Dot1xSettings,
    ) -> Result<(), Error> {
        self.set_interface_section_settings(
            Section::Standard8021xInterfaceList,
            interface_name,
            &settings.to_settings(),
        )
        .await
    }

    /// LAN1 module port settings (untyped fields).
    pub async fn set_lan1_interface(
        &self,
        interface_name: &str,
        settings: &Settings,
    ) -> Result<(), Error> {
        self.set_interface_section_settings(
            Section::Lan1ModuleInterfaceTable,
            interface_name,
            settings,
        )
        .await
    }

    /// 802.3 port settings (untyped fields).
    pub async fn set_dot3_interface(
        &self,
        interface_name: &str,
        settings: &Settings,
    ) -> Result<(), Error> {
        self.set_interface_section_settings(Section::Standard8023List, interface_name, settings)
            .await
    }

    pub async fn set_stp_global(&self, settings: &Settings) -> Result<(), Error> {
        self.set_section_settings(Section::SpanningTreeGlobalParam, settings)
            .await
    }

    pub async fn set_forwarding_global(&self, settings: &Settings) -> Result<(), Error> {
        self.set_section_settings(Section::ForwardingGlobalSetting, settings)
            .await
    }

    /// Global spanning tree mode.
    pub async fn set_stp_mode(&self, mode: StpOperationMode, enabled: bool) -> Result<(), Error> {
        let settings = Settings::new()
            .set("STPOperationMode", mode.wire_value())
            .set("enabled", if enabled { 1 } else { 2 });
        self.set_stp_global(&settings).await
    }

    /// MAC address table aging, in seconds.
    pub async fn set_aging_interval(&self, interval_secs: u32) -> Result<(), Error> {
        let settings = Settings::new().set("agingInterval", interval_secs);
        self.set_forwarding_global(&settings).await
    }

    /// Bridge STP parameters.
    ///
    /// `POST wcd?{STP}`
    pub async fn set_stp_settings(&self, settings: &StpSettings) -> Result<(), Error> {
        debug!(?settings, "writing STP bridge settings");
        let doc = payloads::stp(settings)?;
        self.post_document(&[Section::Stp.into()], &doc).await?;
        Ok(())
    }
}
