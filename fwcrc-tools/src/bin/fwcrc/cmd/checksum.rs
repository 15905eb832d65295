use std::path::PathBuf;

use colored::Colorize;
use fwcrc::crc::CrcTable;
use fwcrc::file_checksum_with;

use crate::config::Config;

#[derive(Debug, clap::Parser)]
pub struct Cmd {
    /// The files to compute the CRC-32 of
    #[clap(required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,
}

impl Cmd {
    /// Prints the checksum of every file. Returns `false` if any file could not be read.
    pub fn run(self, config: &Config) -> anyhow::Result<bool> {
        let table = CrcTable::ieee();
        let mut all_read = true;

        for path in &self.paths {
            match file_checksum_with(path, table, &config.checksum) {
                Ok(crc) => println!("{}: {:#010x}", path.display(), crc),
                Err(err) => {
                    eprintln!("{}", err.to_string().red());
                    all_read = false;
                }
            }
        }

        Ok(all_read)
    }
}
