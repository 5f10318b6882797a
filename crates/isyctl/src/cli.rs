//! Clap derive structures for the `isy` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// isy -- control ISY home-automation devices and scenes by name
#[derive(Debug, Parser)]
#[command(
    name = "isy",
    version,
    about = "Control ISY home-automation devices and scenes by name",
    long_about = "Resolve a spoken or typed device name to a registered device or scene\n\
        and drive it through the controller's REST API.\n\n\
        Names match case-insensitively on any substring of the registered name.",
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
    /// Controller profile to use
    #[arg(long, short = 'p', env = "ISY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL (overrides profile)
    #[arg(long, short = 'c', env = "ISY_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Controller username (overrides profile)
    #[arg(long, short = 'u', env = "ISY_USERNAME", global = true)]
    pub username: Option<String>,

    /// Controller password
    #[arg(long, env = "ISY_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ISY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ISY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ISY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Discover controller devices before resolving names
    #[arg(long, global = true)]
    pub discover: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Turn a device or scene on
    On(OnArgs),

    /// Turn a device or scene off
    Off(OffArgs),

    /// Report the current state of a device
    #[command(alias = "st")]
    Status(NameArg),

    /// Set a dimmable device to a brightness level
    Level(LevelArgs),

    /// Brighten a dimmable device one step
    Brighten(NameArg),

    /// Dim a dimmable device one step
    Dim(NameArg),

    /// Inspect and discover registered devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONTROL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NameArg {
    /// Device or scene name (any part of it, case-insensitive)
    pub name: String,
}

#[derive(Debug, Args)]
pub struct OnArgs {
    /// Device or scene name (any part of it, case-insensitive)
    pub name: String,

    /// Brightness percentage for dimmable devices (0-100)
    #[arg(long, short = 'l', allow_negative_numbers = true)]
    pub level: Option<i64>,

    /// Skip the ramp and switch instantly
    #[arg(long, short = 'f', conflicts_with = "level")]
    pub fast: bool,
}

#[derive(Debug, Args)]
pub struct OffArgs {
    /// Device or scene name (any part of it, case-insensitive)
    pub name: String,

    /// Skip the ramp and switch instantly
    #[arg(long, short = 'f')]
    pub fast: bool,
}

#[derive(Debug, Args)]
pub struct LevelArgs {
    /// Device name (any part of it, case-insensitive)
    pub name: String,

    /// Brightness percentage (0-100)
    #[arg(allow_negative_numbers = true)]
    pub percent: i64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List registered devices and scenes in match order
    #[command(alias = "ls")]
    List,

    /// Query the controller topology and register new devices
    Discover {
        /// Append discovered devices to the active profile
        #[arg(long)]
        save: bool,
    },

    /// Ask the controller whether a device accepts brightness levels
    Probe(NameArg),
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
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the active profile's password in the system keyring
    SetPassword,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
