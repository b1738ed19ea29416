//! `stp`: spanning tree bridge parameters and protocol mode.

use wcdctl_api::WcdClient;
use wcdctl_api::requests::StpSettings;

use crate::cli::{GlobalOpts, StpArgs, StpCommand};
use crate::commands::done;
use crate::error::CliError;

pub async fn handle(client: &WcdClient, args: StpArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        StpCommand::Bridge {
            bpdu_handling,
            path_cost_type,
            forward_delay,
            hello_time,
            max_age,
            priority,
        } => {
            let settings = StpSettings {
                bpdu_handling_mode: bpdu_handling,
                path_cost_default_value_type: path_cost_type,
                forward_delay,
                hello_time,
                max_age,
                bridge_priority: priority,
            };
            client.set_stp_settings(&settings).await?;
            done("STP bridge settings updated", global);
        }
        StpCommand::Mode { mode, disable } => {
            client.set_stp_mode(mode, !disable).await?;
            done("STP mode updated", global);
        }
    }
    Ok(())
}
