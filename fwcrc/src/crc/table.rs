/// Bit-reversed CRC-32/IEEE generator polynomial (reflected form of `0x04C11DB7`).
pub const POLYNOMIAL_IEEE: u32 = 0xEDB8_8320;

/// Number of entries in a byte-indexed lookup table.
pub const TABLE_SIZE: usize = 256;

static IEEE_TABLE: CrcTable = build_table(POLYNOMIAL_IEEE);

/// Lookup table of partial remainders for the byte-wise CRC update.
///
/// A table depends only on the polynomial it was built from. It is never
/// mutated after construction, so one instance can be shared between any
/// number of concurrent checksum computations.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CrcTable {
    polynomial: u32,
    entries: [u32; TABLE_SIZE],
}

impl CrcTable {
    /// Builds the table for a reflected `polynomial`.
    pub const fn new(polynomial: u32) -> Self {
        build_table(polynomial)
    }

    /// The process-wide table for [`POLYNOMIAL_IEEE`], computed at compile time.
    pub fn ieee() -> &'static CrcTable {
        &IEEE_TABLE
    }

    /// The polynomial this table was derived from.
    pub const fn polynomial(&self) -> u32 {
        self.polynomial
    }

    /// The partial remainder for `index`.
    #[inline]
    pub const fn get(&self, index: u8) -> u32 {
        self.entries[index as usize]
    }

    /// All entries, indexed by byte value.
    pub const fn entries(&self) -> &[u32; TABLE_SIZE] {
        &self.entries
    }
}

impl Default for CrcTable {
    fn default() -> Self {
        IEEE_TABLE
    }
}

impl std::fmt::Debug for CrcTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "CrcTable({{ polynomial: {:#010x} }})", self.polynomial)
    }
}

/// Builds the 256 entry lookup table for a reflected `polynomial`.
///
/// Each entry is the state of the division circuit after shifting the byte
/// value through it eight times, least significant bit first.
pub const fn build_table(polynomial: u32) -> CrcTable {
    let mut entries = [0u32; TABLE_SIZE];
    let mut i = 0;
    while i < TABLE_SIZE {
        let mut k = i as u32;
        let mut j = 0;
        while j < 8 {
            if k & 1 != 0 {
                k = (k >> 1) ^ polynomial;
            } else {
                k >>= 1;
            }
            j += 1;
        }
        entries[i] = k;
        i += 1;
    }

    CrcTable {
        polynomial,
        entries,
    }
}
