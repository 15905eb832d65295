use super::{update, CrcTable};

/// A running CRC-32 computation.
///
/// Wraps [`update`] so the accumulator can be fed piece by piece. The value
/// is kept in public form between calls, which makes [`Crc32::value`] the
/// checksum of everything written so far.
///
/// ```
/// use fwcrc::crc::Crc32;
///
/// let mut crc = Crc32::new();
/// crc.update(b"1234");
/// crc.update(b"56789");
/// assert_eq!(crc.finalize(), 0xCBF4_3926);
/// ```
#[derive(Debug, Clone)]
pub struct Crc32<'table> {
    table: &'table CrcTable,
    value: u32,
}

impl Crc32<'static> {
    /// Starts a checksum over the built-in CRC-32/IEEE table.
    pub fn new() -> Self {
        Self::with_table(CrcTable::ieee())
    }
}

impl Default for Crc32<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'table> Crc32<'table> {
    /// Starts a checksum over a caller supplied table.
    pub fn with_table(table: &'table CrcTable) -> Self {
        Self { table, value: 0 }
    }

    /// Folds `data` into the checksum.
    pub fn update(&mut self, data: &[u8]) {
        self.value = update(data, self.value, self.table);
    }

    /// The checksum of all bytes seen so far.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Discards all input seen so far.
    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Consumes the computation and returns the checksum.
    pub fn finalize(self) -> u32 {
        self.value
    }
}

impl std::io::Write for Crc32<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Computes the CRC-32/IEEE checksum of `data` in one call.
pub fn checksum(data: &[u8]) -> u32 {
    update(data, 0, CrcTable::ieee())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn known_answer() {
        assert_eq!(checksum(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn empty_input() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(Crc32::new().finalize(), 0);
    }

    #[test]
    fn incremental_updates_match_one_shot() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i * 31 % 251) as u8).collect();

        let mut crc = Crc32::new();
        for chunk in data.chunks(333) {
            crc.update(chunk);
        }

        assert_eq!(crc.value(), checksum(&data));
    }

    #[test]
    fn reset_starts_over() {
        let mut crc = Crc32::new();
        crc.update(b"garbage");
        crc.reset();
        crc.update(b"123456789");

        assert_eq!(crc.finalize(), 0xCBF4_3926);
    }

    #[test]
    fn io_copy_feeds_the_digest() {
        let mut crc = Crc32::new();
        let copied = std::io::copy(&mut &b"123456789"[..], &mut crc).unwrap();

        assert_eq!(copied, 9);
        assert_eq!(crc.value(), 0xCBF4_3926);
    }
}
