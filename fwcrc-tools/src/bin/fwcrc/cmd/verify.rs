use std::path::PathBuf;

use anyhow::Context;
use fwcrc::verify_file;

use crate::config::Config;
use crate::util::parse_u32;

#[derive(Debug, clap::Parser)]
pub struct Cmd {
    /// The path to the file to be checked
    pub path: PathBuf,

    /// The checksum the file is expected to have
    #[clap(long, short, value_parser = parse_u32)]
    pub expected: u32,
}

impl Cmd {
    pub fn run(self, config: &Config) -> anyhow::Result<bool> {
        let verdict = verify_file(&self.path, self.expected, &config.checksum)
            .with_context(|| format!("Failed to verify {}", self.path.display()))?;

        super::print_verdict(&verdict);

        Ok(verdict.is_ok())
    }
}
