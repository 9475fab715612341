use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nereus wave forecast validation against satellite altimetry.
#[derive(Parser)]
#[command(
    name = "nereus",
    version,
    about = "Collocate and validate wave forecasts against altimeter observations"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Download altimeter swath files for a period.
    Download(DownloadArgs),
    /// Inspect the available observations for a period and region.
    Check(CheckArgs),
    /// Collocate model fields with observations over a period.
    Collocate(CollocateArgs),
    /// Compute validation statistics from collocated records.
    Validate(ValidateArgs),
}

/// Arguments for the `download` subcommand.
#[derive(clap::Args)]
pub struct DownloadArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nereus.toml")]
    pub config: PathBuf,

    /// Period start as YYYYMMDDHH.
    #[arg(long, visible_alias = "sd")]
    pub start_date: String,

    /// Period end as YYYYMMDDHH.
    #[arg(long, visible_alias = "ed")]
    pub end_date: String,

    /// Satellite mission identifier (e.g. s3a).
    #[arg(long)]
    pub sat: String,
}

/// Arguments for the `check` subcommand.
#[derive(clap::Args)]
pub struct CheckArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nereus.toml")]
    pub config: PathBuf,

    /// Period start as YYYYMMDDHH.
    #[arg(long, visible_alias = "sd")]
    pub start_date: String,

    /// Period end as YYYYMMDDHH; defaults to the start.
    #[arg(long, visible_alias = "ed")]
    pub end_date: Option<String>,

    /// Satellite mission identifier.
    #[arg(long)]
    pub sat: String,

    /// Region name from the configuration.
    #[arg(long)]
    pub region: String,

    /// Optional path for an observation dump file.
    #[arg(long)]
    pub dump: Option<PathBuf>,
}

/// Arguments for the `collocate` subcommand.
#[derive(clap::Args)]
pub struct CollocateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nereus.toml")]
    pub config: PathBuf,

    /// Period start as YYYYMMDDHH.
    #[arg(long, visible_alias = "sd")]
    pub start_date: String,

    /// Period end as YYYYMMDDHH.
    #[arg(long, visible_alias = "ed")]
    pub end_date: String,

    /// Satellite mission identifier.
    #[arg(long)]
    pub sat: String,

    /// Model name from the configuration.
    #[arg(long)]
    pub model: String,

    /// Region name from the configuration.
    #[arg(long)]
    pub region: String,
}

/// Arguments for the `validate` subcommand.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nereus.toml")]
    pub config: PathBuf,

    /// Period start as YYYYMMDDHH.
    #[arg(long, visible_alias = "sd")]
    pub start_date: String,

    /// Period end as YYYYMMDDHH.
    #[arg(long, visible_alias = "ed")]
    pub end_date: String,

    /// Satellite mission identifier.
    #[arg(long)]
    pub sat: String,

    /// Model name from the configuration.
    #[arg(long)]
    pub model: String,
}
