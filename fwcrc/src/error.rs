use std::path::PathBuf;

use crate::package::PackageKind;

/// Errors raised while streaming a file through the CRC engine.
#[derive(Debug, thiserror::Error, docsplay::Display)]
pub enum ChecksumError {
    /// Failed to open {path:?} for reading.
    #[ignore_extra_doc_attributes]
    ///
    /// Returned when the path does not exist or is not accessible. This is never
    /// reported as a checksum value, so a missing image cannot pass as valid.
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read {path:?} after the file was opened.
    #[ignore_extra_doc_attributes]
    ///
    /// A partial read would produce the checksum of a truncated stream, so the
    /// error is reported instead of treating it as end of file.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The read buffer size {size} is not between 1 and 64 MiB.
    InvalidBufferSize { size: usize },

    /// Failed to allocate a read buffer of {size} bytes.
    BufferAllocation {
        size: usize,
        source: std::collections::TryReserveError,
    },
}

/// Errors raised by the package verification workflow.
#[derive(Debug, thiserror::Error, docsplay::Display)]
pub enum VerifyError {
    /// The checksum of the staged file could not be computed.
    Checksum(#[from] ChecksumError),

    /// The firmware record has no file name for package kind {kind}.
    MissingFileName { kind: PackageKind },

    /// The firmware record for package kind {kind} carries no reference checksum.
    MissingReference { kind: PackageKind },
}

/// An unknown package kind was requested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, docsplay::Display)]
/// Unknown package kind '{0}' (expected one of: cp970, inf267rs, inf260z).
pub struct UnknownPackageKind(pub String);
