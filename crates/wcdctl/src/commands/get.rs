//! `get`: read configuration sections.

use wcdctl_api::WcdClient;

use crate::cli::{GetArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(client: &WcdClient, args: GetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let out = match global.output {
        OutputFormat::Table | OutputFormat::Xml => client.get_sections_xml(&args.sections).await?,
        format => {
            let response = client.get_sections(&args.sections).await?;
            let value = output::configuration_value(response.device_configuration());
            output::render_single(format, &value, |_| String::new())
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
