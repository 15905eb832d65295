//! The CRC-32 engine.
//!
//! Implements the reflected, table driven CRC-32 used by zlib, PNG and
//! Ethernet (`CRC-32/ISO-HDLC`):
//!
//! | parameter | value        |
//! |-----------|--------------|
//! | poly      | `0xEDB88320` (reflected) |
//! | init      | `0`, complemented to `0xFFFFFFFF` internally |
//! | refin     | `true`       |
//! | refout    | `true`       |
//! | xorout    | `0xFFFFFFFF` |
//! | check     | `0xCBF43926` |

mod digest;
mod table;
mod update;

pub use digest::{checksum, Crc32};
pub use table::{build_table, CrcTable, POLYNOMIAL_IEEE, TABLE_SIZE};
pub use update::{update, update_len};
