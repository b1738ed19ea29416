//! `replay`: resend a recorded HAR session to the switch.

use owo_colors::OwoColorize;
use tabled::Tabled;

use wcdctl_api::{Credentials, WcdClient};
use wcdctl_core::{EntryOutcome, Har, HarEntry, ReplayDriver, ReplayOptions, ReplayReport};

use crate::cli::{GlobalOpts, ReplayArgs};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

fn outcome_row(position: usize, entry: &HarEntry, outcome: &EntryOutcome) -> OutcomeRow {
    let (label, detail) = match outcome {
        EntryOutcome::Filtered { reason } => ("filtered", reason.to_string()),
        EntryOutcome::KeepAlive => ("keep-alive", String::new()),
        EntryOutcome::Completed { status } => ("completed", status.to_string()),
        EntryOutcome::PayloadRejected { status_string, .. } => {
            ("rejected", status_string.clone().unwrap_or_default())
        }
        EntryOutcome::Unknown { http_status } => ("unknown", format!("HTTP {http_status}")),
        EntryOutcome::Invalid { message } => ("invalid", message.clone()),
    };
    OutcomeRow {
        position,
        method: entry.request.method.clone(),
        path: request_path(&entry.request.url),
        outcome: label.into(),
        detail,
    }
}

/// Path and query of a recorded URL; the recorded host is irrelevant.
fn request_path(url: &str) -> String {
    url::Url::parse(url).map_or_else(
        |_| url.to_owned(),
        |u| match u.query() {
            Some(q) => format!("{}?{q}", u.path()),
            None => u.path().to_owned(),
        },
    )
}

fn detail(entries: &[HarEntry], report: &ReplayReport) -> String {
    let rows: Vec<OutcomeRow> = entries
        .iter()
        .zip(&report.outcomes)
        .enumerate()
        .map(|(i, (entry, outcome))| outcome_row(i + 1, entry, outcome))
        .collect();
    output::render_table(&rows)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &WcdClient,
    credentials: &Credentials,
    args: ReplayArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let har = Har::load(&args.har)?;
    let entries = har.entries();

    let options = ReplayOptions {
        set_time: !args.no_set_time,
    };
    let driver = ReplayDriver::new(client, credentials.clone(), options);
    let report = driver.run(entries).await?;

    let out = output::render_single(global.output, &report, |r| detail(entries, r));
    output::print_output(&out, global.quiet);

    if !global.quiet {
        let summary = format!(
            "{} completed, {} filtered, {} rejected, {} unknown, {} invalid, {} re-logins",
            report.completed(),
            report.filtered(),
            report.rejected(),
            report.unknown(),
            report.invalid(),
            report.reauthentications
        );
        if report.rejected() + report.invalid() > 0 {
            eprintln!("{}", summary.yellow());
        } else {
            eprintln!("{}", summary.green());
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn recorded_host_is_dropped_from_paths() {
        assert_eq!(
            request_path("https://169.254.1.0/wcd?{VLANList}"),
            "/wcd?{VLANList}"
        );
        assert_eq!(request_path("https://169.254.1.0/System.xml"), "/System.xml");
        assert_eq!(request_path("not a url"), "not a url");
    }

    #[test]
    fn unbuildable_entry_row_shows_reason() {
        let entry: HarEntry = serde_json::from_str(
            r#"{"request": {"method": "GET", "url": "https://169.254.1.0/wcd?{STP}"}}"#,
        )
        .unwrap();
        let row = outcome_row(
            3,
            &entry,
            &EntryOutcome::Invalid {
                message: "Entry 2: invalid header name 'a b'".into(),
            },
        );
        assert_eq!(row.outcome, "invalid");
        assert_eq!(row.detail, "Entry 2: invalid header name 'a b'");
        assert_eq!(row.path, "/wcd?{STP}");
    }
}
