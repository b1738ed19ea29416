//! Clap derive structures for the `wcdctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand, ValueEnum};

use wcdctl_api::fields::{
    ActionOnViolationType, AdminPortControlType, HostMode, LearningMode, LldpPortState,
    LockInterfaceAdminEnabled, MacAuthenticationMethod, PoeAdminEnable, PowerPriority,
    StpOperationMode, SwitchPortModeAdmin,
};
use wcdctl_api::{Section, SectionQuery};

use crate::commands::util::{KeyValue, parse_datetime};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wcdctl -- configure WCD managed switches over their HTTP+XML API
#[derive(Debug, Parser)]
#[command(
    name = "wcdctl",
    version,
    about = "Configure WCD managed switches from the command line",
    long_about = "Reads and writes switch configuration sections through the device's\n\
        wcd?{Section} endpoint, and replays browser sessions captured as HAR files.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Switch profile to use
    #[arg(long, short = 'p', env = "WCDCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Switch address (overrides profile)
    #[arg(long, short = 'H', env = "WCDCTL_HOST", global = true)]
    pub host: Option<String>,

    /// Login user (overrides profile)
    #[arg(long, short = 'u', env = "WCDCTL_USERNAME", global = true)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "WCDCTL_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WCDCTL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "WCDCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "WCDCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable (default): indented XML for reads, tables for reports
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Raw XML as returned by the device
    Xml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and out to check address and credentials
    Login,

    /// Read configuration sections
    Get(GetArgs),

    /// Set the web session idle timeout
    IdleTimeout {
        /// Timeout in seconds (0 disables it)
        seconds: u32,
    },

    /// Set the device clock
    Time(TimeArgs),

    /// Create VLANs
    Vlan {
        /// VLAN IDs to create (1-4094)
        #[arg(required = true, value_parser = clap::value_parser!(u16).range(1..=4094))]
        ids: Vec<u16>,
    },

    /// Write a single-row section
    Section(SectionArgs),

    /// Write one interface row of a section
    Interface(InterfaceArgs),

    /// Set port VLAN membership
    Switchport(SwitchportArgs),

    /// Set LLDP transmit/receive state on a port
    Lldp {
        interface: String,
        state: LldpPortState,
    },

    /// Enable or disable CDP on a port
    Cdp {
        interface: String,
        /// Disable instead of enable
        #[arg(long)]
        disable: bool,
    },

    /// Set PoE power sourcing on a port
    Poe(PoeArgs),

    /// Spanning tree settings
    Stp(StpArgs),

    /// Set MAC address table aging
    Aging {
        /// Aging interval in seconds
        seconds: u32,
    },

    /// Set port security
    PortSecurity(PortSecurityArgs),

    /// Set 802.1X port authentication
    Dot1x(Dot1xArgs),

    /// Fetch the device configuration file
    DownloadConfig {
        /// Write to a file instead of stdout
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Replay a browser session captured as a HAR file
    Replay(ReplayArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  READS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Sections to read, optionally filtered: `vlan-list`,
    /// `LLDPInterfaceList&interfaceName=te1`
    #[arg(required = true)]
    pub sections: Vec<SectionQuery>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WRITES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TimeArgs {
    /// Local time to set (`YYYY-MM-DD HH:MM:SS`); now when omitted
    #[arg(long, value_parser = parse_datetime)]
    pub at: Option<NaiveDateTime>,
}

#[derive(Debug, Args)]
pub struct SectionArgs {
    /// Section name (wire or symbolic)
    pub section: Section,

    /// Field assignments
    #[arg(required = true)]
    pub values: Vec<KeyValue>,
}

#[derive(Debug, Args)]
pub struct InterfaceArgs {
    /// Section name (wire or symbolic)
    pub section: Section,

    /// Interface name (e.g. te1, gi3)
    pub interface: String,

    /// Field assignments
    #[arg(required = true)]
    pub values: Vec<KeyValue>,
}

#[derive(Debug, Args)]
pub struct SwitchportArgs {
    pub interface: String,

    /// Port mode
    #[arg(long)]
    pub mode: Option<SwitchPortModeAdmin>,

    /// Native VLAN in general mode
    #[arg(long)]
    pub pvid: Option<u16>,

    /// Tagged VLANs in general mode (e.g. 2350-2351)
    #[arg(long)]
    pub tagged: Option<String>,

    /// Untagged VLANs in general mode
    #[arg(long)]
    pub untagged: Option<String>,

    /// Allowed VLANs in trunk mode
    #[arg(long)]
    pub trunk_members: Option<String>,
}

#[derive(Debug, Args)]
pub struct PoeArgs {
    pub interface: String,

    #[arg(long)]
    pub admin: Option<PoeAdminEnable>,

    #[arg(long)]
    pub priority: Option<PowerPriority>,
}

#[derive(Debug, Args)]
pub struct StpArgs {
    #[command(subcommand)]
    pub command: StpCommand,
}

#[derive(Debug, Subcommand)]
pub enum StpCommand {
    /// Set bridge parameters (timers in seconds)
    Bridge {
        #[arg(long, default_value_t = 2)]
        bpdu_handling: u8,

        #[arg(long, default_value_t = 2)]
        path_cost_type: u8,

        #[arg(long, default_value_t = 15)]
        forward_delay: u8,

        #[arg(long, default_value_t = 2)]
        hello_time: u8,

        #[arg(long, default_value_t = 20)]
        max_age: u8,

        #[arg(long, default_value_t = 32768)]
        priority: u32,
    },

    /// Select the spanning tree protocol
    Mode {
        mode: StpOperationMode,

        /// Turn spanning tree off
        #[arg(long)]
        disable: bool,
    },
}

#[derive(Debug, Args)]
pub struct PortSecurityArgs {
    pub interface: String,

    /// Maximum learned MAC addresses
    #[arg(long)]
    pub max_macs: Option<u32>,

    #[arg(long)]
    pub lock: Option<LockInterfaceAdminEnabled>,

    #[arg(long)]
    pub learning_mode: Option<LearningMode>,
}

#[derive(Debug, Args)]
pub struct Dot1xArgs {
    pub interface: String,

    #[arg(long)]
    pub auth_method: Option<MacAuthenticationMethod>,

    #[arg(long)]
    pub host_mode: Option<HostMode>,

    #[arg(long)]
    pub port_control: Option<AdminPortControlType>,

    #[arg(long)]
    pub max_eap_requests: Option<u32>,

    /// Seconds
    #[arg(long)]
    pub quiet_period: Option<u32>,

    /// Seconds
    #[arg(long)]
    pub reauth_period: Option<u32>,

    /// Seconds
    #[arg(long)]
    pub server_timeout: Option<u32>,

    /// Seconds
    #[arg(long)]
    pub supplicant_timeout: Option<u32>,

    /// Seconds
    #[arg(long)]
    pub resend_eap: Option<u32>,

    #[arg(long)]
    pub violation_action: Option<ActionOnViolationType>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPLAY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// HAR file to replay
    #[arg(long)]
    pub har: PathBuf,

    /// Leave the device clock alone
    #[arg(long)]
    pub no_set_time: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration (secrets masked)
    Show,

    /// Print the config file path
    Path,

    /// Interactive configuration wizard
    Init,

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
