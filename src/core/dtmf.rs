// DTMF digits and length-prefixed DTMF codes
//
// A stored code is a 16-byte field: up to 15 digit bytes (0x00-0x0F,
// padded with 0xFF) followed by a byte holding the digit count.

use super::constants::{DTMF_CHARS, DTMF_MAX_DIGITS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DtmfError {
    #[error("Invalid DTMF symbol {0:?} (expected 0-9, A-D, * or #)")]
    InvalidSymbol(char),

    #[error("DTMF code has {0} digits, at most {max} are allowed", max = DTMF_MAX_DIGITS)]
    TooLong(usize),
}

pub type Result<T> = std::result::Result<T, DtmfError>;

/// Size of a stored DTMF field
pub const DTMF_FIELD_LEN: usize = DTMF_MAX_DIGITS + 1;

/// One keypad symbol, stored as its 4-bit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DtmfDigit(u8);

impl DtmfDigit {
    /// Digit from its stored code (0x00-0x0F)
    pub fn from_code(code: u8) -> Option<Self> {
        (code <= 0x0F).then_some(Self(code))
    }

    /// Digit from its keypad symbol; `a`-`d` are accepted as `A`-`D`
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        DTMF_CHARS
            .iter()
            .position(|&d| d == upper)
            .map(|i| Self(i as u8))
    }

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        DTMF_CHARS[self.0 as usize]
    }
}

impl fmt::Display for DtmfDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A DTMF code of at most 15 digits
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DtmfCode {
    digits: Vec<DtmfDigit>,
}

impl DtmfCode {
    pub fn new(digits: Vec<DtmfDigit>) -> Result<Self> {
        if digits.len() > DTMF_MAX_DIGITS {
            return Err(DtmfError::TooLong(digits.len()));
        }
        Ok(Self { digits })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn digits(&self) -> &[DtmfDigit] {
        &self.digits
    }

    /// Decode a stored field. Never fails.
    ///
    /// The trailing byte gives the digit count (capped at 15); within that
    /// prefix, bytes that are not digit codes are skipped.
    pub fn from_field(field: &[u8]) -> Self {
        let Some((&length, body)) = field.split_last() else {
            return Self::empty();
        };
        let count = (length as usize).min(DTMF_MAX_DIGITS).min(body.len());

        let digits = body[..count]
            .iter()
            .filter_map(|&b| DtmfDigit::from_code(b))
            .collect();

        Self { digits }
    }

    /// Encode into a 16-byte field: digits, 0xFF padding, then the count
    pub fn to_field(&self) -> [u8; DTMF_FIELD_LEN] {
        let mut field = [0xFF; DTMF_FIELD_LEN];
        for (slot, digit) in field.iter_mut().zip(&self.digits) {
            *slot = digit.code();
        }
        field[DTMF_MAX_DIGITS] = self.digits.len() as u8;
        field
    }
}

impl fmt::Display for DtmfCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.digits {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

impl FromStr for DtmfCode {
    type Err = DtmfError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .chars()
            .map(|c| DtmfDigit::from_char(c).ok_or(DtmfError::InvalidSymbol(c)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(digits)
    }
}

impl TryFrom<String> for DtmfCode {
    type Error = DtmfError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<DtmfCode> for String {
    fn from(code: DtmfCode) -> Self {
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_mapping() {
        assert_eq!(DtmfDigit::from_char('0').unwrap().code(), 0x00);
        assert_eq!(DtmfDigit::from_char('9').unwrap().code(), 0x09);
        assert_eq!(DtmfDigit::from_char('A').unwrap().code(), 0x0A);
        assert_eq!(DtmfDigit::from_char('d').unwrap().code(), 0x0D);
        assert_eq!(DtmfDigit::from_char('*').unwrap().code(), 0x0E);
        assert_eq!(DtmfDigit::from_char('#').unwrap().code(), 0x0F);
        assert!(DtmfDigit::from_char('E').is_none());
        assert!(DtmfDigit::from_code(0x10).is_none());
        assert_eq!(DtmfDigit::from_code(0x0E).unwrap().as_char(), '*');
    }

    #[test]
    fn test_code_roundtrip() {
        let code: DtmfCode = "1234".parse().unwrap();
        let field = code.to_field();
        assert_eq!(&field[..5], &[0x01, 0x02, 0x03, 0x04, 0xFF]);
        assert_eq!(field[15], 4);

        let decoded = DtmfCode::from_field(&field);
        assert_eq!(decoded, code);
        assert_eq!(decoded.len(), 4);
        assert_eq!(decoded.to_string(), "1234");
    }

    #[test]
    fn test_code_full_length() {
        let code: DtmfCode = "0123456789ABCD*".parse().unwrap();
        assert_eq!(code.len(), 15);
        assert_eq!(DtmfCode::from_field(&code.to_field()), code);
    }

    #[test]
    fn test_too_long_rejected() {
        let err = "0123456789ABCD*#".parse::<DtmfCode>().unwrap_err();
        assert_eq!(err, DtmfError::TooLong(16));
    }

    #[test]
    fn test_invalid_symbol_rejected() {
        let err = "12X4".parse::<DtmfCode>().unwrap_err();
        assert_eq!(err, DtmfError::InvalidSymbol('X'));
    }

    #[test]
    fn test_lowercase_normalized() {
        let code: DtmfCode = "abcd".parse().unwrap();
        assert_eq!(code.to_string(), "ABCD");
    }

    #[test]
    fn test_empty_code() {
        let field = DtmfCode::empty().to_field();
        assert_eq!(&field[..15], &[0xFF; 15]);
        assert_eq!(field[15], 0);
        assert!(DtmfCode::from_field(&field).is_empty());
    }

    #[test]
    fn test_decode_erased_and_garbage() {
        // Erased flash: length byte 0xFF, no digit bytes
        assert!(DtmfCode::from_field(&[0xFF; 16]).is_empty());

        // Length covers a pad byte in the middle, which is skipped
        let mut field = [0xFF; 16];
        field[0] = 0x01;
        field[2] = 0x0F;
        field[15] = 3;
        assert_eq!(DtmfCode::from_field(&field).to_string(), "1#");

        // Digits beyond the stored length are ignored
        let mut field = [0x05; 16];
        field[15] = 2;
        assert_eq!(DtmfCode::from_field(&field).to_string(), "55");
    }

    #[test]
    fn test_serde_as_string() {
        let code: DtmfCode = "*123#".parse().unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"*123#\"");
        assert!(serde_json::from_str::<DtmfCode>("\"12Z\"").is_err());
    }
}
