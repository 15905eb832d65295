//! Streaming checksums over files and readers.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crc::{self, CrcTable};
use crate::error::ChecksumError;

/// Default read chunk size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024;

/// Largest accepted read chunk size in bytes.
pub const MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;

/// Options for the file streaming driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChecksumOptions {
    /// Size of the reusable read buffer in bytes, `1..=MAX_BUFFER_SIZE`.
    pub buffer_size: usize,
}

impl Default for ChecksumOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ChecksumOptions {
    /// Allocates the read buffer described by these options.
    pub(crate) fn allocate(&self) -> Result<Vec<u8>, ChecksumError> {
        let size = self.buffer_size;
        if !(1..=MAX_BUFFER_SIZE).contains(&size) {
            return Err(ChecksumError::InvalidBufferSize { size });
        }

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(size)
            .map_err(|source| ChecksumError::BufferAllocation { size, source })?;
        buffer.resize(size, 0);

        Ok(buffer)
    }
}

/// Computes the CRC-32/IEEE checksum of the file at `path`, using the default options.
pub fn file_checksum(path: impl AsRef<Path>) -> Result<u32, ChecksumError> {
    file_checksum_with(path, CrcTable::ieee(), &ChecksumOptions::default())
}

/// Computes the checksum of the file at `path` with an explicit table and options.
///
/// The file is opened as a raw byte stream and read in chunks of
/// `options.buffer_size` bytes. The result does not depend on the chunk size.
pub fn file_checksum_with(
    path: impl AsRef<Path>,
    table: &CrcTable,
    options: &ChecksumOptions,
) -> Result<u32, ChecksumError> {
    let path = path.as_ref();
    tracing::debug!("Computing checksum of {:?}", path);

    let mut buffer = options.allocate()?;

    let mut file = File::open(path).map_err(|source| {
        tracing::debug!("{:?} could not be opened: {}", path, source);
        ChecksumError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let crc = reader_checksum(&mut file, table, &mut buffer).map_err(|source| {
        tracing::debug!("Reading {:?} failed: {}", path, source);
        ChecksumError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    tracing::info!("{}: {:08x}", path.display(), crc);

    Ok(crc)
}

/// Streams `reader` to its end through the CRC engine, using `buffer` for every read.
///
/// Interrupted reads are retried, any other read error is returned.
///
/// # Panics
///
/// Panics if `buffer` is empty.
pub fn reader_checksum(
    mut reader: impl Read,
    table: &CrcTable,
    buffer: &mut [u8],
) -> std::io::Result<u32> {
    assert!(!buffer.is_empty(), "the read buffer must not be empty");

    let mut crc = 0;
    let mut total = 0u64;

    loop {
        let len = match reader.read(buffer) {
            Ok(0) => break,
            Ok(len) => len,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        crc = crc::update(&buffer[..len], crc, table);
        total += len as u64;
        tracing::trace!("Folded {} bytes ({} total)", len, total);
    }

    Ok(crc)
}
