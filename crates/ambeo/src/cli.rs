//! Clap derive structures for the `ambeo` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use ambeo_core::ControlValue;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ambeo -- control AMBEO soundbars from the command line
#[derive(Debug, Parser)]
#[command(
    name = "ambeo",
    version,
    about = "Control AMBEO soundbars from the command line",
    long_about = "Reads and sets volume, input, audio preset and sound switches on\n\
        Sennheiser AMBEO soundbars over their local HTTP control API.\n\n\
        Plus and Mini models publish their own input and preset lists;\n\
        the Max uses a fixed set.",
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
    /// Soundbar profile to use
    #[arg(long, short = 'p', env = "AMBEO_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Soundbar hostname or IP (overrides profile)
    #[arg(long, short = 'H', env = "AMBEO_HOST", global = true)]
    pub host: Option<String>,

    /// Soundbar HTTP port (overrides profile)
    #[arg(long, env = "AMBEO_PORT", global = true, hide = true)]
    pub port: Option<u16>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "AMBEO_OUTPUT",
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

    /// Request timeout in seconds
    #[arg(long, env = "AMBEO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Poll interval in seconds for `watch`
    #[arg(long, env = "AMBEO_INTERVAL", global = true)]
    pub interval: Option<u64>,
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
    /// Show the detected model, dialect and connection state
    Info,

    /// Show every control's current value
    #[command(alias = "st")]
    Status,

    /// Set a control (Volume, Mute, Source, Preset, NightMode, AMBEOMode, ...)
    Set(SetArgs),

    /// List selectable inputs with their indices
    #[command(alias = "inputs")]
    Sources,

    /// List audio presets with their indices
    Presets,

    /// Poll periodically and print every change
    Watch(WatchArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SET / WATCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Control name, case-insensitive (e.g. volume, nightmode, source)
    pub control: String,

    /// Integer, or on/off/true/false for switches. Source and Preset take
    /// an index from `ambeo sources` / `ambeo presets`.
    pub value: ControlValue,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Exit after this many changes
    #[arg(long, short = 'n')]
    pub count: Option<usize>,
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
    /// Print the config file location
    Path,

    /// Display current resolved configuration
    Show,

    /// Create initial config file with guided setup
    Init,

    /// Set the soundbar host on the active profile (created if missing)
    SetHost {
        /// Hostname or IP address
        host: String,
    },

    /// Give an input a custom display name on the active profile
    SetName {
        /// Input identifier as reported by the soundbar (e.g. hdmi1)
        input: String,

        /// Display name; empty to remove
        name: String,
    },

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
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
