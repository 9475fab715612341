mod check_cmd;
mod cli;
mod collocate_cmd;
mod config;
mod convert;
mod download_cmd;
mod logging;
mod validate_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Download(args) => download_cmd::run(args),
        Command::Check(args) => check_cmd::run(args),
        Command::Collocate(args) => collocate_cmd::run(args),
        Command::Validate(args) => validate_cmd::run(args),
    }
}
