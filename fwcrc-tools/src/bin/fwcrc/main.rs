mod cmd;
mod config;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{load_config, Config};
use crate::util::logging::{setup_logging, LogLevel};

#[derive(Debug, clap::Parser)]
#[clap(
    name = "fwcrc",
    about = "Verify staged firmware images against their CRC-32",
    version
)]
struct Cli {
    /// Location for log file
    #[clap(long, global = true, help_heading = "LOG CONFIGURATION")]
    log_file: Option<PathBuf>,
    /// Log level for messages on stderr. Falls back to the configuration, then `RUST_LOG`.
    #[clap(long, global = true, value_enum, help_heading = "LOG CONFIGURATION")]
    log_level: Option<LogLevel>,

    /// Additional configuration file, merged over `.fwcrc.{toml,json,yaml}`
    #[clap(long, global = true, help_heading = "CONFIGURATION")]
    config: Option<PathBuf>,
    /// Size of the read buffer in bytes
    #[clap(long, global = true, help_heading = "CONFIGURATION")]
    buffer_size: Option<usize>,

    #[clap(subcommand)]
    subcommand: Subcommand,
}

impl Cli {
    fn run(self, config: &Config) -> Result<bool> {
        match self.subcommand {
            Subcommand::Checksum(cmd) => cmd.run(config),
            Subcommand::Verify(cmd) => cmd.run(config),
            Subcommand::Package(cmd) => cmd.run(config),
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Subcommand {
    /// Print the CRC-32 of files
    Checksum(cmd::checksum::Cmd),
    /// Compare the CRC-32 of a file with an expected value
    Verify(cmd::verify::Cmd),
    /// Verify the staged image of a firmware package
    Package(cmd::package::Cmd),
}

fn main() -> Result<ExitCode> {
    // Parse the commandline options.
    let matches = Cli::parse();

    let mut config = load_config(matches.config.as_deref())
        .context("Failed to load configuration.")?;
    if let Some(buffer_size) = matches.buffer_size {
        config.checksum.buffer_size = buffer_size;
    }

    let log_path = matches.log_file.clone();
    let _logger_guard = setup_logging(log_path.as_deref(), matches.log_level.or(config.log_level))?;

    if matches.run(&config)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
