use super::CrcTable;

/// Folds `data` into the running checksum `crc_in` and returns the new checksum.
///
/// `crc_in` and the returned value are in their public (finalized) form: the
/// accumulator is inverted on entry and inverted again on return. This makes
/// the output of one call directly usable as the input of the next, so a
/// buffer can be processed in any number of consecutive chunks.
///
/// Start a new checksum with `crc_in = 0`. An empty `data` returns `crc_in`.
#[inline]
pub fn update(data: &[u8], crc_in: u32, table: &CrcTable) -> u32 {
    let mut acc = !crc_in;

    for &byte in data {
        acc = table.get((acc ^ u32::from(byte)) as u8) ^ (acc >> 8);
    }

    !acc
}

/// Like [`update`], for callers that carry the byte count separately from the buffer.
///
/// Only the first `len` bytes of `data` are consumed.
///
/// # Panics
///
/// Panics if `len` exceeds `data.len()`.
pub fn update_len(data: &[u8], len: usize, crc_in: u32, table: &CrcTable) -> u32 {
    assert!(
        len <= data.len(),
        "requested {len} bytes from a buffer of {} bytes",
        data.len()
    );

    update(&data[..len], crc_in, table)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    const CHECK: &[u8] = b"123456789";

    #[test]
    fn known_answer() {
        assert_eq!(update(CHECK, 0, CrcTable::ieee()), 0xCBF4_3926);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let table = CrcTable::ieee();

        assert_eq!(update(&[], 0, table), 0);
        assert_eq!(update(&[], 0xCBF4_3926, table), 0xCBF4_3926);
        assert_eq!(update(&[], u32::MAX, table), u32::MAX);
    }

    #[test_case(b"a", 0xE8B7_BE43; "single byte")]
    #[test_case(b"abc", 0x3524_41C2; "abc")]
    #[test_case(b"The quick brown fox jumps over the lazy dog", 0x414F_A339; "pangram")]
    fn reference_vectors(data: &[u8], expected: u32) {
        assert_eq!(update(data, 0, CrcTable::ieee()), expected);
    }

    #[test_case(&[1, 8]; "head and tail")]
    #[test_case(&[4, 5]; "middle split")]
    #[test_case(&[1, 1, 1, 1, 1, 1, 1, 1, 1]; "byte by byte")]
    #[test_case(&[0, 9, 0]; "empty chunks around the buffer")]
    fn chunked_calls_match_single_call(partition: &[usize]) {
        let table = CrcTable::ieee();

        let mut crc = 0;
        let mut offset = 0;
        for &len in partition {
            crc = update(&CHECK[offset..offset + len], crc, table);
            offset += len;
        }

        assert_eq!(offset, CHECK.len());
        assert_eq!(crc, update(CHECK, 0, table));
    }

    #[test]
    fn every_split_point_matches_single_call() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let table = CrcTable::ieee();
        let whole = update(&data, 0, table);

        for split in 0..=data.len() {
            let (head, tail) = data.split_at(split);
            assert_eq!(update(tail, update(head, 0, table), table), whole);
        }
    }

    #[test]
    fn table_reuse_has_no_hidden_state() {
        let table = CrcTable::new(crate::crc::POLYNOMIAL_IEEE);

        let before = update(CHECK, 0, &table);
        for i in 0..64u8 {
            update(&[i; 100], u32::from(i), &table);
        }

        assert_eq!(update(CHECK, 0, &table), before);
    }

    #[test]
    fn explicit_length_consumes_prefix() {
        let table = CrcTable::ieee();
        let mut buf = [0u8; 32];
        buf[..CHECK.len()].copy_from_slice(CHECK);

        assert_eq!(update_len(&buf, CHECK.len(), 0, table), 0xCBF4_3926);
        assert_eq!(update_len(&buf, 0, 0x1234, table), 0x1234);
    }

    #[test]
    #[should_panic(expected = "requested 10 bytes")]
    fn explicit_length_past_the_buffer_panics() {
        update_len(CHECK, 10, 0, CrcTable::ieee());
    }
}
