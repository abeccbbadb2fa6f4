//! plistsplit CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: normalize and parse args,
//! run one extraction, and exit with appropriate status.
//! For programmatic use, prefer the library API (`plistsplit::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse_from(cli::normalize_args(std::env::args_os()));
    cli::run(args)
}
