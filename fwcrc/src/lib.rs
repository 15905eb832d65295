//! # CRC-32 integrity checks for staged firmware images
//!
//! Firmware updates arrive as files together with a record announcing the
//! CRC-32 of the image. Before an image is installed, its checksum is
//! recomputed from the staged file and compared against that record.
//!
//! # Examples
//!
//! ## Checksum of a file
//!
//! ```no_run
//! # use fwcrc::ChecksumError;
//! let crc = fwcrc::file_checksum("/root/CP-970_1_1_7.dat")?;
//! println!("{crc:08x}");
//! # Ok::<(), ChecksumError>(())
//! ```
//!
//! ## Verifying a package
//!
//! ```no_run
//! # use fwcrc::VerifyError;
//! use fwcrc::{verify_package, FirmwareRecord, PackageKind, StagingLayout, VerifyOptions};
//!
//! let record = FirmwareRecord::new(PackageKind::Cp970, 0xCBF4_3926, "CP-970_1_1_7");
//! let verdict = verify_package(&record, &StagingLayout::default(), &VerifyOptions::default())?;
//!
//! if !verdict.is_ok() {
//!     eprintln!("refusing to install: {verdict}");
//! }
//! # Ok::<(), VerifyError>(())
//! ```
//!
//! ## In-memory data
//!
//! ```
//! use fwcrc::crc::{self, CrcTable};
//!
//! let table = CrcTable::new(crc::POLYNOMIAL_IEEE);
//! let crc = crc::update(b"12345", 0, &table);
//! let crc = crc::update(b"6789", crc, &table);
//! assert_eq!(crc, 0xCBF4_3926);
//! ```

pub mod crc;
mod error;
pub mod file;
pub mod package;
pub mod verify;

pub use crate::error::{ChecksumError, UnknownPackageKind, VerifyError};
pub use crate::file::{file_checksum, file_checksum_with, reader_checksum, ChecksumOptions};
pub use crate::package::{FirmwareRecord, PackageKind, StagingLayout};
pub use crate::verify::{verify_file, verify_package, Verdict, VerifyOptions};
