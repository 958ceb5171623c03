// Parser combinators using nom for fixed-layout memory records

use nom::{bytes::complete::take, IResult};

/// Parse a single byte
pub fn parse_u8(input: &[u8]) -> IResult<&[u8], u8> {
    let (input, bytes) = take(1usize)(input)?;
    Ok((input, bytes[0]))
}

/// Parse a u16 little-endian
pub fn parse_u16_le(input: &[u8]) -> IResult<&[u8], u16> {
    let (input, bytes) = take(2usize)(input)?;
    Ok((input, u16::from_le_bytes([bytes[0], bytes[1]])))
}

/// Parse a u16 big-endian
pub fn parse_u16_be(input: &[u8]) -> IResult<&[u8], u16> {
    let (input, bytes) = take(2usize)(input)?;
    Ok((input, u16::from_be_bytes([bytes[0], bytes[1]])))
}

/// Parse a fixed-size byte array
pub fn parse_array<const N: usize>(input: &[u8]) -> IResult<&[u8], [u8; N]> {
    let (input, bytes) = take(N)(input)?;
    let mut out = [0u8; N];
    out.copy_from_slice(bytes);
    Ok((input, out))
}

/// Parse a fixed-width text field terminated by 0x00 or 0xFF.
///
/// Every byte maps to the char with the same code point, so any text
/// written back through [`encode_terminated_string`] reproduces the bytes.
pub fn parse_terminated_string(max_len: usize) -> impl Fn(&[u8]) -> IResult<&[u8], String> {
    move |input: &[u8]| {
        let (input, bytes) = take(max_len)(input)?;

        let s = bytes
            .iter()
            .take_while(|&&b| b != 0x00 && b != 0xFF)
            .map(|&b| b as char)
            .collect();

        Ok((input, s))
    }
}

/// Encode text into a fixed-width field padded with `pad`.
///
/// Returns `None` if the text is longer than the field or contains a char
/// that is not a single non-terminator byte (U+0001..=U+00FE).
pub fn encode_terminated_string(text: &str, len: usize, pad: u8) -> Option<Vec<u8>> {
    let mut out = vec![pad; len];

    for (i, c) in text.chars().enumerate() {
        if i >= len {
            return None;
        }
        let code = c as u32;
        if code == 0x00 || code >= 0xFF {
            return None;
        }
        out[i] = code as u8;
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integers() {
        let data = [0x12, 0x34];
        let (_, value) = parse_u16_be(&data).unwrap();
        assert_eq!(value, 0x1234);

        let (_, value) = parse_u16_le(&data).unwrap();
        assert_eq!(value, 0x3412);

        let (rest, value) = parse_u8(&data).unwrap();
        assert_eq!(value, 0x12);
        assert_eq!(rest, &[0x34]);
    }

    #[test]
    fn test_parse_array() {
        let data = [1, 2, 3, 4, 5];
        let (rest, arr) = parse_array::<4>(&data).unwrap();
        assert_eq!(arr, [1, 2, 3, 4]);
        assert_eq!(rest, &[5]);

        assert!(parse_array::<8>(&data).is_err());
    }

    #[test]
    fn test_parse_terminated_string() {
        let (_, s) = parse_terminated_string(8)(b"CH01\xFF\xFF\xFF\xFF").unwrap();
        assert_eq!(s, "CH01");

        let (_, s) = parse_terminated_string(8)(b"REPEATER").unwrap();
        assert_eq!(s, "REPEATER");

        let (_, s) = parse_terminated_string(8)(b"AB\0CDEFG").unwrap();
        assert_eq!(s, "AB");
    }

    #[test]
    fn test_encode_terminated_string() {
        assert_eq!(
            encode_terminated_string("CH01", 8, 0xFF).unwrap(),
            b"CH01\xFF\xFF\xFF\xFF".to_vec()
        );
        assert_eq!(
            encode_terminated_string("HI", 4, 0x00).unwrap(),
            b"HI\0\0".to_vec()
        );
        assert!(encode_terminated_string("TOOLONGNAME", 8, 0xFF).is_none());
        assert!(encode_terminated_string("\u{0100}", 8, 0xFF).is_none());
    }

    #[test]
    fn test_string_roundtrip_high_bytes() {
        let raw = [0x41, 0xB0, 0x7F, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF];
        let (_, s) = parse_terminated_string(8)(&raw).unwrap();
        assert_eq!(encode_terminated_string(&s, 8, 0xFF).unwrap(), raw.to_vec());
    }
}
