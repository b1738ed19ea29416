// WCD system endpoints
//
// Firmware and configuration file operations. Their answers are not
// always a status envelope, so bodies come back unparsed.

use tracing::debug;

use crate::endpoints;
use crate::error::Error;
use crate::sections::SystemAction;
use crate::wcd::client::WcdClient;

impl WcdClient {
    /// Trigger a system action.
    ///
    /// `GET System.xml?action={action}`
    pub async fn run_system_action(&self, action: SystemAction) -> Result<String, Error> {
        let url = endpoints::system_action_url(self.base_url(), action)?;
        debug!(action = action.wire_name(), "running system action");
        self.get_text(url).await
    }

    /// Ask the device to pull its configuration file.
    pub async fn download_config(&self) -> Result<String, Error> {
        self.run_system_action(SystemAction::DownloadConfigurationFile)
            .await
    }

    /// Fetch from the HTTP download endpoint.
    ///
    /// `GET http_download?action={action}`
    pub async fn http_download(&self, action: &str) -> Result<String, Error> {
        let url = endpoints::http_download_url(self.base_url(), action)?;
        debug!(action, "http download");
        self.get_text(url).await
    }
}
