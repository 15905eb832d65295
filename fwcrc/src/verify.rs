//! Comparing staged images against their announced checksums.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crc::CrcTable;
use crate::error::{ChecksumError, VerifyError};
use crate::file::{file_checksum_with, ChecksumOptions};
use crate::package::{FirmwareRecord, StagingLayout};

/// The outcome of comparing a file against a reference checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The file matches the reference.
    Match { crc: u32 },
    /// The file differs from the reference.
    Mismatch { expected: u32, actual: u32 },
    /// No reference checksum was recorded, the file was not checked.
    NoReference,
}

impl Verdict {
    /// Compares a freshly computed checksum against the reference.
    pub fn compare(expected: u32, actual: u32) -> Self {
        if expected == actual {
            Self::Match { crc: actual }
        } else {
            Self::Mismatch { expected, actual }
        }
    }

    /// Whether the verified action may proceed.
    ///
    /// Only a mismatch fails. An unchecked file passes, use
    /// [`VerifyOptions::require_reference`] to reject those instead.
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Mismatch { .. })
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match { crc } => write!(f, "checksum {crc:#010x} matches"),
            Self::Mismatch { expected, actual } => write!(
                f,
                "checksum {actual:#010x} does not match the expected {expected:#010x}"
            ),
            Self::NoReference => f.write_str("no reference checksum recorded"),
        }
    }
}

/// Options for the package verification workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyOptions {
    /// Reject records that carry no reference checksum instead of skipping the check.
    pub require_reference: bool,
    /// How the staged image is read.
    pub checksum: ChecksumOptions,
}

/// Computes the checksum of `path` and compares it with `expected`.
pub fn verify_file(
    path: impl AsRef<Path>,
    expected: u32,
    options: &ChecksumOptions,
) -> Result<Verdict, ChecksumError> {
    let actual = file_checksum_with(path, CrcTable::ieee(), options)?;
    tracing::info!("read crc: {:x}   receive crc: {:x}", actual, expected);

    let verdict = Verdict::compare(expected, actual);
    match verdict {
        Verdict::Match { .. } => tracing::info!("File CRC OK"),
        _ => tracing::warn!("File CRC Fail"),
    }

    Ok(verdict)
}

/// Verifies the staged image a firmware record refers to.
///
/// The image is looked up in `layout` under the file name selected by the
/// record's package kind. A record without a reference checksum yields
/// [`Verdict::NoReference`] unless `options.require_reference` is set.
/// An image that cannot be read is an error, never a passing verdict.
pub fn verify_package(
    record: &FirmwareRecord,
    layout: &StagingLayout,
    options: &VerifyOptions,
) -> Result<Verdict, VerifyError> {
    let kind = record.kind;

    let Some(expected) = record.reference_crc() else {
        if options.require_reference {
            return Err(VerifyError::MissingReference { kind });
        }
        tracing::info!("No reference checksum for {} package, skipping check", kind);
        return Ok(Verdict::NoReference);
    };

    let file_name = record
        .file_name()
        .ok_or(VerifyError::MissingFileName { kind })?;

    let path = layout.image_path(file_name);
    tracing::debug!("Verifying {} package image {:?}", kind, path);

    Ok(verify_file(&path, expected, &options.checksum)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn equal_values_match() {
        let verdict = Verdict::compare(0xCBF4_3926, 0xCBF4_3926);

        assert_eq!(verdict, Verdict::Match { crc: 0xCBF4_3926 });
        assert!(verdict.is_ok());
    }

    #[test]
    fn different_values_fail() {
        let verdict = Verdict::compare(0xDEAD_BEEF, 0xCBF4_3926);

        assert_eq!(
            verdict,
            Verdict::Mismatch {
                expected: 0xDEAD_BEEF,
                actual: 0xCBF4_3926
            }
        );
        assert!(!verdict.is_ok());
    }

    #[test]
    fn unchecked_passes() {
        assert!(Verdict::NoReference.is_ok());
    }

    #[test]
    fn verdicts_display() {
        assert_eq!(
            Verdict::compare(1, 2).to_string(),
            "checksum 0x00000002 does not match the expected 0x00000001"
        );
        assert_eq!(
            Verdict::compare(2, 2).to_string(),
            "checksum 0x00000002 matches"
        );
    }

    #[test]
    fn record_without_reference_is_skipped() {
        let record = FirmwareRecord::new(crate::PackageKind::Cp970, 0, "missing");
        let layout = StagingLayout::new("/nonexistent/fwcrc", "dat");

        let verdict = verify_package(&record, &layout, &VerifyOptions::default()).unwrap();

        assert_eq!(verdict, Verdict::NoReference);
    }

    #[test]
    fn record_without_reference_can_be_rejected() {
        let record = FirmwareRecord::new(crate::PackageKind::Cp970, 0, "missing");
        let layout = StagingLayout::default();
        let options = VerifyOptions {
            require_reference: true,
            ..Default::default()
        };

        assert!(matches!(
            verify_package(&record, &layout, &options),
            Err(VerifyError::MissingReference { .. })
        ));
    }

    #[test]
    fn missing_file_name_is_an_error() {
        let mut record = FirmwareRecord::new(crate::PackageKind::Cp970, 1, "main");
        record.kind = crate::PackageKind::Inf260Z;

        assert!(matches!(
            verify_package(&record, &StagingLayout::default(), &VerifyOptions::default()),
            Err(VerifyError::MissingFileName {
                kind: crate::PackageKind::Inf260Z
            })
        ));
    }
}
