// 16-byte channel / VFO record
//
// Byte layout:
// - Bytes 0-3:   rx_freq (4-byte little-endian BCD, 10 Hz units)
// - Bytes 4-7:   tx_freq (same encoding; always zero in VFO records)
// - Bytes 8-9:   rx_tone (u16 little-endian tone word)
// - Bytes 10-11: tx_tone (u16 little-endian tone word)
// - Byte 12:     scramble level (0 = off, 1-16)
// - Byte 13:     flags (busy_lock:bit 2, freq_hop:bit 5, pttid:bits 6-7)
// - Byte 14:     flags (offset_dir:bits 0-1 (VFO only), narrow:bit 3, high_power:bit 4)
// - Byte 15:     reserved, written as 0x00

use super::layout::RECORD_SIZE;
use crate::bitwise::bits::BitField;
use crate::bitwise::parser::{parse_array, parse_u16_le, parse_u8};
use nom::IResult;

pub const BUSY_LOCK: BitField = BitField::flag(2);
pub const FREQ_HOP: BitField = BitField::flag(5);
pub const PTT_ID: BitField = BitField::new(6, 2);

pub const OFFSET_DIR: BitField = BitField::new(0, 2);
pub const NARROW: BitField = BitField::flag(3);
pub const HIGH_POWER: BitField = BitField::flag(4);

/// Bits of byte 13 owned by channel records
pub const CHANNEL_FLAGS13_MASK: u8 = BUSY_LOCK.mask() | FREQ_HOP.mask() | PTT_ID.mask();
/// Bits of byte 14 owned by channel records
pub const CHANNEL_FLAGS14_MASK: u8 = NARROW.mask() | HIGH_POWER.mask();
/// Bits of byte 13 owned by VFO records
pub const VFO_FLAGS13_MASK: u8 = BUSY_LOCK.mask();
/// Bits of byte 14 owned by VFO records
pub const VFO_FLAGS14_MASK: u8 = OFFSET_DIR.mask() | NARROW.mask() | HIGH_POWER.mask();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub rx_freq: [u8; 4],
    pub tx_freq: [u8; 4],
    pub rx_tone: u16,
    pub tx_tone: u16,
    pub scramble: u8,
    pub flags13: u8,
    pub flags14: u8,
    pub reserved: u8,
}

fn parse_record(input: &[u8]) -> IResult<&[u8], RawRecord> {
    let (input, rx_freq) = parse_array::<4>(input)?;
    let (input, tx_freq) = parse_array::<4>(input)?;
    let (input, rx_tone) = parse_u16_le(input)?;
    let (input, tx_tone) = parse_u16_le(input)?;
    let (input, scramble) = parse_u8(input)?;
    let (input, flags13) = parse_u8(input)?;
    let (input, flags14) = parse_u8(input)?;
    let (input, reserved) = parse_u8(input)?;

    Ok((
        input,
        RawRecord {
            rx_freq,
            tx_freq,
            rx_tone,
            tx_tone,
            scramble,
            flags13,
            flags14,
            reserved,
        },
    ))
}

impl RawRecord {
    pub const SIZE: usize = RECORD_SIZE;

    /// Split a record into its fields. Short input reads as erased flash.
    pub fn from_bytes(data: &[u8]) -> Self {
        match parse_record(data) {
            Ok((_, record)) => record,
            Err(e) => {
                tracing::debug!("Short record ({} bytes): {:?}", data.len(), e);
                Self::erased()
            }
        }
    }

    /// A record of all 0xFF
    pub fn erased() -> Self {
        Self::from_bytes_unchecked([0xFF; RECORD_SIZE])
    }

    fn from_bytes_unchecked(b: [u8; RECORD_SIZE]) -> Self {
        Self {
            rx_freq: [b[0], b[1], b[2], b[3]],
            tx_freq: [b[4], b[5], b[6], b[7]],
            rx_tone: u16::from_le_bytes([b[8], b[9]]),
            tx_tone: u16::from_le_bytes([b[10], b[11]]),
            scramble: b[12],
            flags13: b[13],
            flags14: b[14],
            reserved: b[15],
        }
    }

    pub fn to_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0..4].copy_from_slice(&self.rx_freq);
        bytes[4..8].copy_from_slice(&self.tx_freq);
        bytes[8..10].copy_from_slice(&self.rx_tone.to_le_bytes());
        bytes[10..12].copy_from_slice(&self.tx_tone.to_le_bytes());
        bytes[12] = self.scramble;
        bytes[13] = self.flags13;
        bytes[14] = self.flags14;
        bytes[15] = self.reserved;
        bytes
    }

    /// Erased-slot sentinel: first two frequency bytes are 0xFF
    pub fn is_erased(&self) -> bool {
        self.rx_freq[0] == 0xFF && self.rx_freq[1] == 0xFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u8; 16] = [
        0x25, 0x06, 0x60, 0x44, // 446.00625
        0x25, 0x06, 0x60, 0x44, // 446.00625
        0x70, 0x06, // 67.0 Hz
        0x23, 0x80, // D023N
        0x03, // scramble 3
        0xA4, // busy lock, pttid EOT
        0x18, // narrow, high power
        0x00,
    ];

    #[test]
    fn test_parse_record() {
        let raw = RawRecord::from_bytes(&SAMPLE);
        assert_eq!(raw.rx_freq, [0x25, 0x06, 0x60, 0x44]);
        assert_eq!(raw.rx_tone, 0x0670);
        assert_eq!(raw.tx_tone, 0x8023);
        assert_eq!(raw.scramble, 3);
        assert!(BUSY_LOCK.is_set(raw.flags13));
        assert!(!FREQ_HOP.is_set(raw.flags13));
        assert_eq!(PTT_ID.get(raw.flags13), 2);
        assert!(NARROW.is_set(raw.flags14));
        assert!(HIGH_POWER.is_set(raw.flags14));
        assert!(!raw.is_erased());
    }

    #[test]
    fn test_record_bytes_roundtrip() {
        let raw = RawRecord::from_bytes(&SAMPLE);
        assert_eq!(raw.to_bytes(), SAMPLE);
    }

    #[test]
    fn test_erased_and_short() {
        let erased = RawRecord::erased();
        assert!(erased.is_erased());
        assert_eq!(erased.to_bytes(), [0xFF; 16]);

        assert_eq!(RawRecord::from_bytes(&SAMPLE[..10]), erased);
    }

    #[test]
    fn test_masks() {
        assert_eq!(CHANNEL_FLAGS13_MASK, 0xE4);
        assert_eq!(CHANNEL_FLAGS14_MASK, 0x18);
        assert_eq!(VFO_FLAGS13_MASK, 0x04);
        assert_eq!(VFO_FLAGS14_MASK, 0x1B);
    }
}
