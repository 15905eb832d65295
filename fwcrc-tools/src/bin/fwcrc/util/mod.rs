pub mod logging;

use std::num::ParseIntError;

/// Parses a checksum given as decimal, `0x` hex, `0o` octal or `0b` binary.
pub fn parse_u32(input: &str) -> Result<u32, ParseIntError> {
    parse_int::parse(input)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::parse_u32;

    #[test_case("0xCBF43926", 0xCBF4_3926; "hex")]
    #[test_case("0xcbf43926", 0xCBF4_3926; "lowercase hex")]
    #[test_case("3421780262", 0xCBF4_3926; "decimal")]
    #[test_case("0b101", 5; "binary")]
    fn checksums_parse(input: &str, expected: u32) {
        assert_eq!(parse_u32(input).unwrap(), expected);
    }

    #[test]
    fn overflowing_checksum_is_rejected() {
        parse_u32("0x1_0000_0000").unwrap_err();
        parse_u32("checksum").unwrap_err();
    }
}
