// CTCSS / DCS squelch tones and their 16-bit on-air word
//
// Word layout (stored little-endian):
//   0x0000 or 0xFFFF            -> OFF
//   high byte bit 7 set          -> DCS, 3 BCD digits, bit 6 = inverted
//   otherwise                    -> CTCSS, 4 BCD digits of tenths of Hz

use super::constants::{CTCSS_MAX, CTCSS_MIN, DCS_MAX};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToneError {
    #[error("CTCSS tone {0} Hz is not a 0.1 Hz value in 60.0-260.0")]
    InvalidCtcss(f64),

    #[error("DCS code {0} is out of range (000-999)")]
    InvalidDcs(u16),

    #[error("Cannot parse tone: {0:?}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, ToneError>;

const DCS_FLAG: u8 = 0x80;
const DCS_INVERTED: u8 = 0x40;

/// A squelch tone, used for both the RX (decode) and TX (encode) slot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tone {
    #[default]
    Off,
    /// CTCSS frequency in Hz, 0.1 Hz resolution
    Ctcss(f64),
    /// DCS code written as its three-digit (octal-looking) number
    Dcs { code: u16, inverted: bool },
}

impl Tone {
    pub fn dcs(code: u16) -> Self {
        Tone::Dcs {
            code,
            inverted: false,
        }
    }

    pub fn is_off(&self) -> bool {
        matches!(self, Tone::Off)
    }

    /// Decode a tone word. Never fails: unusable words become [`Tone::Off`].
    pub fn decode_word(word: u16) -> Tone {
        if word == 0x0000 || word == 0xFFFF {
            return Tone::Off;
        }

        let [low, high] = word.to_le_bytes();
        let d0 = low & 0x0F;
        let d1 = low >> 4;
        let d2 = high & 0x0F;

        if high & DCS_FLAG != 0 {
            if d0 > 9 || d1 > 9 || d2 > 9 {
                tracing::debug!("Ignoring DCS word {:#06x} with non-decimal digits", word);
                return Tone::Off;
            }
            return Tone::Dcs {
                code: d2 as u16 * 100 + d1 as u16 * 10 + d0 as u16,
                inverted: high & DCS_INVERTED != 0,
            };
        }

        let d3 = high >> 4;
        if d0 > 9 || d1 > 9 || d2 > 9 || d3 > 9 {
            tracing::debug!("Ignoring CTCSS word {:#06x} with non-decimal digits", word);
            return Tone::Off;
        }

        let tenths = d3 as u16 * 1000 + d2 as u16 * 100 + d1 as u16 * 10 + d0 as u16;
        let hz = tenths as f64 / 10.0;
        if !(CTCSS_MIN..=CTCSS_MAX).contains(&hz) {
            tracing::debug!("CTCSS word {:#06x} ({} Hz) out of range", word, hz);
            return Tone::Off;
        }

        Tone::Ctcss(hz)
    }

    /// Encode to a tone word, rejecting values the word cannot carry exactly
    pub fn encode_word(&self) -> Result<u16> {
        match *self {
            Tone::Off => Ok(0x0000),
            Tone::Ctcss(hz) => {
                let tenths = ctcss_tenths(hz)?;
                let digits = [
                    (tenths % 10) as u8,
                    (tenths / 10 % 10) as u8,
                    (tenths / 100 % 10) as u8,
                    (tenths / 1000 % 10) as u8,
                ];
                let low = (digits[1] << 4) | digits[0];
                let high = (digits[3] << 4) | digits[2];
                Ok(u16::from_le_bytes([low, high]))
            }
            Tone::Dcs { code, inverted } => {
                if code > DCS_MAX {
                    return Err(ToneError::InvalidDcs(code));
                }
                let low = (((code / 10 % 10) as u8) << 4) | (code % 10) as u8;
                let mut high = DCS_FLAG | (code / 100) as u8;
                if inverted {
                    high |= DCS_INVERTED;
                }
                Ok(u16::from_le_bytes([low, high]))
            }
        }
    }
}

/// Tenths of Hz for a CTCSS tone, if it is representable without rounding
fn ctcss_tenths(hz: f64) -> Result<u16> {
    if !hz.is_finite() || !(CTCSS_MIN..=CTCSS_MAX).contains(&hz) {
        return Err(ToneError::InvalidCtcss(hz));
    }
    let tenths = (hz * 10.0).round();
    if (tenths / 10.0 - hz).abs() > 1e-9 {
        return Err(ToneError::InvalidCtcss(hz));
    }
    Ok(tenths as u16)
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::Off => write!(f, "OFF"),
            Tone::Ctcss(hz) => write!(f, "{:.1}", hz),
            Tone::Dcs { code, inverted } => {
                write!(f, "D{:03}{}", code, if *inverted { 'I' } else { 'N' })
            }
        }
    }
}

impl FromStr for Tone {
    type Err = ToneError;

    /// Accepts `OFF` (or empty), `67.0`, `D023N`, `D023I`, and bare `D023`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("off") {
            return Ok(Tone::Off);
        }

        if let Some(rest) = s.strip_prefix(['D', 'd']) {
            let (digits, inverted) = match rest.chars().last() {
                Some('I') | Some('i') => (&rest[..rest.len() - 1], true),
                Some('N') | Some('n') => (&rest[..rest.len() - 1], false),
                _ => (rest, false),
            };
            if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(ToneError::Parse(s.to_string()));
            }
            let code: u16 = digits
                .parse()
                .map_err(|_| ToneError::Parse(s.to_string()))?;
            return Ok(Tone::Dcs { code, inverted });
        }

        let hz: f64 = s.parse().map_err(|_| ToneError::Parse(s.to_string()))?;
        ctcss_tenths(hz)?;
        Ok(Tone::Ctcss(hz))
    }
}

impl TryFrom<String> for Tone {
    type Error = ToneError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Tone> for String {
    fn from(tone: Tone) -> Self {
        tone.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_roundtrip() {
        let tones = [
            Tone::Off,
            Tone::Ctcss(67.0),
            Tone::dcs(23),
            Tone::Dcs {
                code: 23,
                inverted: true,
            },
        ];
        for tone in tones {
            let word = tone.encode_word().unwrap();
            assert_eq!(Tone::decode_word(word), tone, "word {:#06x}", word);
        }
    }

    #[test]
    fn test_tone_word_layout() {
        assert_eq!(Tone::Ctcss(67.0).encode_word().unwrap(), 0x0670);
        assert_eq!(Tone::Ctcss(254.1).encode_word().unwrap(), 0x2541);
        assert_eq!(Tone::dcs(23).encode_word().unwrap(), 0x8023);
        assert_eq!(
            Tone::Dcs {
                code: 754,
                inverted: true
            }
            .encode_word()
            .unwrap(),
            0xC754
        );
        assert_eq!(Tone::Off.encode_word().unwrap(), 0);
    }

    #[test]
    fn test_decode_off_and_garbage() {
        assert_eq!(Tone::decode_word(0x0000), Tone::Off);
        assert_eq!(Tone::decode_word(0xFFFF), Tone::Off);
        // 50.0 Hz is below the CTCSS range
        assert_eq!(Tone::decode_word(0x0500), Tone::Off);
        // 300.0 Hz is above it
        assert_eq!(Tone::decode_word(0x3000), Tone::Off);
        // Non-decimal nibbles
        assert_eq!(Tone::decode_word(0x06A0), Tone::Off);
        assert_eq!(Tone::decode_word(0x80AA), Tone::Off);
    }

    #[test]
    fn test_all_standard_tones_roundtrip() {
        for &hz in crate::core::constants::TONES.iter() {
            let word = Tone::Ctcss(hz).encode_word().unwrap();
            assert_eq!(Tone::decode_word(word), Tone::Ctcss(hz));
        }
        for &code in crate::core::constants::DTCS_CODES.iter() {
            let word = Tone::dcs(code).encode_word().unwrap();
            assert_eq!(Tone::decode_word(word), Tone::dcs(code));
        }
    }

    #[test]
    fn test_encode_rejects_unrepresentable() {
        assert!(Tone::Ctcss(59.9).encode_word().is_err());
        assert!(Tone::Ctcss(260.1).encode_word().is_err());
        assert!(Tone::Ctcss(67.05).encode_word().is_err());
        assert!(Tone::Ctcss(f64::NAN).encode_word().is_err());
        assert!(Tone::dcs(1000).encode_word().is_err());
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Tone::Off.to_string(), "OFF");
        assert_eq!(Tone::Ctcss(88.5).to_string(), "88.5");
        assert_eq!(Tone::dcs(23).to_string(), "D023N");
        assert_eq!(
            Tone::Dcs {
                code: 754,
                inverted: true
            }
            .to_string(),
            "D754I"
        );

        assert_eq!("OFF".parse::<Tone>().unwrap(), Tone::Off);
        assert_eq!("".parse::<Tone>().unwrap(), Tone::Off);
        assert_eq!("67.0".parse::<Tone>().unwrap(), Tone::Ctcss(67.0));
        assert_eq!("D023".parse::<Tone>().unwrap(), Tone::dcs(23));
        assert_eq!(
            "D023I".parse::<Tone>().unwrap(),
            Tone::Dcs {
                code: 23,
                inverted: true
            }
        );

        assert!("D1234N".parse::<Tone>().is_err());
        assert!("Dxx".parse::<Tone>().is_err());
        assert!("300.0".parse::<Tone>().is_err());
        assert!("tone".parse::<Tone>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Tone::dcs(23)).unwrap();
        assert_eq!(json, "\"D023N\"");
        let tone: Tone = serde_json::from_str("\"71.9\"").unwrap();
        assert_eq!(tone, Tone::Ctcss(71.9));
        assert!(serde_json::from_str::<Tone>("\"D9999\"").is_err());
    }
}
