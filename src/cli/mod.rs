//! CLI argument parsing for dialplan.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::gateway::{DEFAULT_DISPATCH_TIMEOUT_SECS, DEFAULT_GATEWAY_COMMAND};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Dialplan: provisioning script generator for Teams telephony.
///
/// Turns a per-customer-group YAML config into PowerShell provisioning
/// scripts (M365 group, resource accounts, call queue, auto attendant,
/// holiday schedules) and dispatches them through an execution gateway,
/// one guided step at a time or as a combined batch.
#[derive(Parser, Debug)]
#[command(name = "dialplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for dialplan.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scaffold a starter provisioning config.
    ///
    /// Writes a YAML skeleton with defaults filled in; required identity
    /// fields are left empty for the operator to edit.
    Init(InitArgs),

    /// Validate a config without dispatching anything.
    ///
    /// Reports every finding (missing fields, disallowed identifier
    /// characters, implausible schedules) instead of stopping at the first.
    Check(CheckArgs),

    /// Print the identifiers derived from a config.
    ///
    /// Shows the group, call queue, auto attendant, resource account and
    /// holiday schedule names computed from the base fields.
    Names(NamesArgs),

    /// Compose the script for one operation.
    ///
    /// Prints to stdout or writes to a file. Nothing is dispatched.
    Compose(ComposeArgs),

    /// Compose one operation and dispatch it through the gateway.
    ///
    /// Useful for removals, list queries, and session checks outside the
    /// guided wizard flow.
    Run(RunArgs),

    /// Run the guided provisioning wizard for one customer group.
    ///
    /// Walks the fixed step sequence with a preview and confirm gate per
    /// step; failed steps can be retried or skipped.
    Wizard(WizardArgs),

    /// Provision many customer groups from a batch CSV.
    ///
    /// Parses the rows, composes one combined script, and dispatches it
    /// as a single unit.
    Batch(BatchArgs),

    /// Print the holiday calendar for a jurisdiction and year.
    ///
    /// With --config and --fill, writes the computed entries into the
    /// config's holiday list.
    Holidays(HolidaysArgs),
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Path of the config file to create.
    pub path: PathBuf,

    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Provisioning config to validate.
    #[arg(short, long)]
    pub config: PathBuf,
}

/// Arguments for the `names` command.
#[derive(Parser, Debug)]
pub struct NamesArgs {
    /// Provisioning config to derive names from.
    #[arg(short, long)]
    pub config: PathBuf,
}

/// Arguments for the `compose` command.
#[derive(Parser, Debug)]
pub struct ComposeArgs {
    /// Provisioning config the script is derived from.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Operation to compose (e.g. create-group, list-call-queues).
    #[arg(long)]
    pub op: String,

    /// Write the script to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Provisioning config the script is derived from.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Operation to dispatch (e.g. remove-call-queue, list-groups).
    #[arg(long)]
    pub op: String,

    /// Skip the confirmation prompt.
    #[arg(long)]
    pub yes: bool,

    /// Gateway command line the script path is appended to.
    #[arg(long, default_value = DEFAULT_GATEWAY_COMMAND)]
    pub gateway: String,

    /// Wall-clock budget for the dispatch, in seconds.
    #[arg(long, default_value_t = DEFAULT_DISPATCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

/// Arguments for the `wizard` command.
#[derive(Parser, Debug)]
pub struct WizardArgs {
    /// Provisioning config for the customer group.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Dispatch every step without prompting; abort on the first failure.
    #[arg(long)]
    pub yes: bool,

    /// Print every step's script without dispatching anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Gateway command line the script path is appended to.
    #[arg(long, default_value = DEFAULT_GATEWAY_COMMAND)]
    pub gateway: String,

    /// Wall-clock budget per dispatch, in seconds.
    #[arg(long, default_value_t = DEFAULT_DISPATCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

/// Arguments for the `batch` command.
#[derive(Parser, Debug)]
pub struct BatchArgs {
    /// Batch CSV with one customer group per row.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Dispatch without prompting.
    #[arg(long)]
    pub yes: bool,

    /// Print the combined script without dispatching it.
    #[arg(long)]
    pub dry_run: bool,

    /// Gateway command line the script path is appended to.
    #[arg(long, default_value = DEFAULT_GATEWAY_COMMAND)]
    pub gateway: String,

    /// Wall-clock budget for the single combined dispatch, in seconds.
    #[arg(long, default_value_t = DEFAULT_DISPATCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

/// Arguments for the `holidays` command.
#[derive(Parser, Debug)]
pub struct HolidaysArgs {
    /// ISO country code (DE, AT, CH).
    #[arg(long, required_unless_present = "config", conflicts_with = "config")]
    pub country: Option<String>,

    /// State, Bundesland, or canton name.
    #[arg(long, conflicts_with = "config")]
    pub region: Option<String>,

    /// Commune or confession, where the region needs it.
    #[arg(long, conflicts_with = "config")]
    pub subregion: Option<String>,

    /// Year to compute the calendar for.
    #[arg(long)]
    pub year: i32,

    /// Read the jurisdiction from this config file instead.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the computed entries into the config's holiday list.
    #[arg(
        long,
        requires = "config",
        conflicts_with_all = ["country", "region", "subregion"]
    )]
    pub fill: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
