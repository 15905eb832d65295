use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::Figment;
use fwcrc::{verify_package, FirmwareRecord, PackageKind};

use crate::config::{merge_file, Config};
use crate::util::parse_u32;

#[derive(Debug, clap::Parser)]
pub struct Cmd {
    /// A TOML, JSON or YAML file holding the firmware record of the update
    #[clap(long, conflicts_with_all = ["kind", "expected", "file_name"], help_heading = "RECORD")]
    pub record: Option<PathBuf>,

    /// The kind of package to verify
    #[clap(long, required_unless_present = "record", help_heading = "RECORD")]
    pub kind: Option<PackageKind>,

    /// The checksum announced for the package. Without it, the check is skipped.
    #[clap(long, value_parser = parse_u32, help_heading = "RECORD")]
    pub expected: Option<u32>,

    /// The file name of the staged image, without directory and extension
    #[clap(long, required_unless_present = "record", help_heading = "RECORD")]
    pub file_name: Option<String>,

    /// Directory the images are staged in
    #[clap(long, help_heading = "LAYOUT")]
    pub root: Option<PathBuf>,

    /// Extension of the staged images
    #[clap(long, help_heading = "LAYOUT")]
    pub extension: Option<String>,

    /// Fail if the record carries no reference checksum
    #[clap(long)]
    pub require_reference: bool,
}

impl Cmd {
    pub fn run(self, config: &Config) -> anyhow::Result<bool> {
        let record = self.record()?;

        let mut layout = config.layout.clone();
        if let Some(root) = self.root {
            layout.root = root;
        }
        if let Some(extension) = self.extension {
            layout.extension = extension;
        }

        let mut options = config.verify_options();
        options.require_reference |= self.require_reference;

        let verdict = verify_package(&record, &layout, &options)
            .with_context(|| format!("Failed to verify the {} package", record.kind))?;

        super::print_verdict(&verdict);

        Ok(verdict.is_ok())
    }

    fn record(&self) -> anyhow::Result<FirmwareRecord> {
        if let Some(path) = &self.record {
            return load_record(path);
        }

        // Both are enforced by clap when no record file is given.
        let (Some(kind), Some(file_name)) = (self.kind, self.file_name.as_deref()) else {
            anyhow::bail!("Either --record or --kind and --file-name are required.");
        };

        Ok(FirmwareRecord::new(
            kind,
            self.expected.unwrap_or_default(),
            file_name,
        ))
    }
}

/// Reads a firmware record, choosing the format from the file extension.
pub fn load_record(path: &Path) -> anyhow::Result<FirmwareRecord> {
    anyhow::ensure!(path.is_file(), "The record file {:?} does not exist.", path);

    merge_file(Figment::new(), path)?
        .extract()
        .with_context(|| format!("Failed to parse the firmware record {:?}", path))
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use figment::Jail;
    use fwcrc::{FirmwareRecord, PackageKind};
    use pretty_assertions::assert_eq;

    use super::load_record;

    #[test]
    fn toml_record_with_hex_checksum() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "update.toml",
                r#"
                kind = "inf267rs"
                total_crc = 0xCBF43926
                wire_filename = "INF-267RS_2_0"
                "#,
            )?;

            let record = load_record(Path::new("update.toml")).unwrap();
            assert_eq!(
                record,
                FirmwareRecord::new(PackageKind::Inf267Rs, 0xCBF4_3926, "INF-267RS_2_0")
            );
            Ok(())
        });
    }

    #[test]
    fn yaml_record_without_checksum() {
        Jail::expect_with(|jail| {
            jail.create_file("update.yaml", "kind: cp970\nmain_filename: main\n")?;

            let record = load_record(Path::new("update.yaml")).unwrap();
            assert_eq!(record.reference_crc(), None);
            assert_eq!(record.file_name(), Some("main"));
            Ok(())
        });
    }

    #[test]
    fn record_with_unknown_kind_fails() {
        Jail::expect_with(|jail| {
            jail.create_file("update.json", r#"{ "kind": "cp971" }"#)?;

            load_record(Path::new("update.json")).unwrap_err();
            Ok(())
        });
    }

    #[test]
    fn missing_record_file_fails() {
        Jail::expect_with(|_jail| {
            load_record(Path::new("update.toml")).unwrap_err();
            Ok(())
        });
    }
}
