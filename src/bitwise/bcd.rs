// Binary-Coded Decimal (BCD) encoding/decoding
//
// The H3 Plus stores every frequency as packed BCD, in three flavours:
// - 4-byte little-endian, 10 Hz units (channel/VFO frequencies, VFO offsets)
// - 2-byte little-endian, 0.1 MHz units (broadcast FM channels and FM VFO)
// - 2-byte big-endian, 0.1 MHz units (TX band limits)

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BcdError {
    #[error("Invalid BCD digit: {0:#x}")]
    InvalidDigit(u8),

    #[error("Value too large for BCD array: {0}")]
    ValueTooLarge(u64),

    #[error("Frequency {0} MHz cannot be represented")]
    InvalidFrequency(f64),
}

pub type Result<T> = std::result::Result<T, BcdError>;

/// 10 Hz steps per MHz
const FREQ_UNITS_PER_MHZ: f64 = 100_000.0;

/// 0.1 MHz steps per MHz
const TENTHS_PER_MHZ: f64 = 10.0;

/// Largest distance from the unit grid still accepted as on it
const OFF_GRID_TOLERANCE: f64 = 1e-9;

/// Largest value an 8-digit BCD field can hold
pub const MAX_FREQ_LE4: u64 = 99_999_999;

/// Largest value a 4-digit BCD field can hold
pub const MAX_TENTHS_2: u64 = 9_999;

/// Convert two decimal digits to a BCD byte
/// Example: (1, 2) -> 0x12, (9, 5) -> 0x95
pub fn digits_to_bcd_byte(tens: u8, ones: u8) -> Result<u8> {
    if tens > 9 || ones > 9 {
        return Err(BcdError::InvalidDigit((tens << 4) | ones));
    }

    Ok((tens << 4) | ones)
}

/// Accumulate a little-endian BCD array without rejecting nibbles above 9.
///
/// Each nibble contributes `nibble * 10^position`, so a non-canonical byte
/// like `0x0A` decodes to 10 rather than failing. Erased or garbage slots
/// always produce some number.
pub fn bcd_to_int_lossy_le(bcd_array: &[u8]) -> u64 {
    let mut value: u64 = 0;
    let mut multiplier: u64 = 1;

    for &byte in bcd_array {
        value += (byte & 0x0F) as u64 * multiplier;
        multiplier *= 10;
        value += ((byte >> 4) & 0x0F) as u64 * multiplier;
        multiplier *= 10;
    }

    value
}

/// Big-endian counterpart of [`bcd_to_int_lossy_le`]
pub fn bcd_to_int_lossy_be(bcd_array: &[u8]) -> u64 {
    let mut value: u64 = 0;

    for &byte in bcd_array {
        value = value * 10 + ((byte >> 4) & 0x0F) as u64;
        value = value * 10 + (byte & 0x0F) as u64;
    }

    value
}

/// Convert an integer to BCD array (big-endian)
/// Example: 123456 -> [0x12, 0x34, 0x56]
pub fn int_to_bcd_be(value: u64, num_bytes: usize) -> Result<Vec<u8>> {
    let mut result = vec![0u8; num_bytes];
    let mut remaining = value;

    for i in (0..num_bytes).rev() {
        let two_digits = (remaining % 100) as u8;
        remaining /= 100;
        result[i] = digits_to_bcd_byte(two_digits / 10, two_digits % 10)?;
    }

    if remaining > 0 {
        return Err(BcdError::ValueTooLarge(value));
    }

    Ok(result)
}

/// Convert an integer to BCD array (little-endian)
/// Example: 123456 -> [0x56, 0x34, 0x12]
pub fn int_to_bcd_le(value: u64, num_bytes: usize) -> Result<Vec<u8>> {
    let mut result = vec![0u8; num_bytes];
    let mut remaining = value;

    for byte in result.iter_mut() {
        let two_digits = (remaining % 100) as u8;
        remaining /= 100;
        *byte = digits_to_bcd_byte(two_digits / 10, two_digits % 10)?;
    }

    if remaining > 0 {
        return Err(BcdError::ValueTooLarge(value));
    }

    Ok(result)
}

/// Scale a frequency in MHz to integer units, rejecting anything that
/// does not fit in `max` units or is not a whole number of units.
fn scale_freq(mhz: f64, units_per_mhz: f64, max: u64) -> Result<u64> {
    if !mhz.is_finite() || mhz < 0.0 {
        return Err(BcdError::InvalidFrequency(mhz));
    }

    let scaled = (mhz * units_per_mhz).round();
    if scaled > max as f64 || (scaled / units_per_mhz - mhz).abs() > OFF_GRID_TOLERANCE {
        return Err(BcdError::InvalidFrequency(mhz));
    }

    Ok(scaled as u64)
}

/// Lossy values that the field could never have held read as zero
fn clamp_lossy(value: u64, max: u64) -> u64 {
    if value > max {
        tracing::debug!("BCD value {} exceeds {}, reading as 0", value, max);
        0
    } else {
        value
    }
}

/// Decode a 4-byte little-endian BCD frequency (10 Hz units) to MHz
///
/// # Example
/// ```text
/// 25 06 60 44 -> 44600625 -> 446.00625 MHz
/// ```
pub fn decode_freq_le4(bytes: &[u8; 4]) -> f64 {
    clamp_lossy(bcd_to_int_lossy_le(bytes), MAX_FREQ_LE4) as f64 / FREQ_UNITS_PER_MHZ
}

/// Encode MHz as a 4-byte little-endian BCD frequency (10 Hz units)
pub fn encode_freq_le4(mhz: f64) -> Result<[u8; 4]> {
    let units = scale_freq(mhz, FREQ_UNITS_PER_MHZ, MAX_FREQ_LE4)?;
    let bytes = int_to_bcd_le(units, 4)?;
    Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Decode a 2-byte little-endian BCD value in 0.1 MHz units
pub fn decode_tenths_le2(bytes: &[u8; 2]) -> f64 {
    clamp_lossy(bcd_to_int_lossy_le(bytes), MAX_TENTHS_2) as f64 / TENTHS_PER_MHZ
}

/// Encode MHz as a 2-byte little-endian BCD value in 0.1 MHz units
pub fn encode_tenths_le2(mhz: f64) -> Result<[u8; 2]> {
    let tenths = scale_freq(mhz, TENTHS_PER_MHZ, MAX_TENTHS_2)?;
    let bytes = int_to_bcd_le(tenths, 2)?;
    Ok([bytes[0], bytes[1]])
}

/// Decode a 2-byte big-endian BCD value in 0.1 MHz units
///
/// # Example
/// ```text
/// 14 40 -> 1440 -> 144.0 MHz
/// ```
pub fn decode_tenths_be2(bytes: &[u8; 2]) -> f64 {
    clamp_lossy(bcd_to_int_lossy_be(bytes), MAX_TENTHS_2) as f64 / TENTHS_PER_MHZ
}

/// Encode MHz as a 2-byte big-endian BCD value in 0.1 MHz units
pub fn encode_tenths_be2(mhz: f64) -> Result<[u8; 2]> {
    let tenths = scale_freq(mhz, TENTHS_PER_MHZ, MAX_TENTHS_2)?;
    let bytes = int_to_bcd_be(tenths, 2)?;
    Ok([bytes[0], bytes[1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_to_bcd_byte() {
        assert_eq!(digits_to_bcd_byte(1, 2).unwrap(), 0x12);
        assert_eq!(digits_to_bcd_byte(9, 5).unwrap(), 0x95);
        assert!(digits_to_bcd_byte(10, 0).is_err());
    }

    #[test]
    fn test_int_to_bcd() {
        assert_eq!(int_to_bcd_be(123456, 3).unwrap(), vec![0x12, 0x34, 0x56]);
        assert_eq!(int_to_bcd_le(123456, 3).unwrap(), vec![0x56, 0x34, 0x12]);

        // Value too large
        assert!(int_to_bcd_be(1234567, 3).is_err());
        assert!(int_to_bcd_le(1234567, 3).is_err());
    }

    #[test]
    fn test_lossy_valid_bcd() {
        assert_eq!(bcd_to_int_lossy_le(&[0x25, 0x06, 0x60, 0x44]), 44600625);
        assert_eq!(bcd_to_int_lossy_le(&[0x56, 0x34, 0x12]), 123456);
        assert_eq!(bcd_to_int_lossy_be(&[0x14, 0x40]), 1440);
    }

    #[test]
    fn test_lossy_accepts_garbage() {
        // 0x0A: low nibble 10 -> contributes 10
        assert_eq!(bcd_to_int_lossy_le(&[0x0A, 0x00]), 10);
        assert_eq!(bcd_to_int_lossy_le(&[0xFF, 0xFF, 0xFF, 0xFF]), 166_666_665);
    }

    #[test]
    fn test_freq_le4_roundtrip() {
        for f in [0.0, 0.00001, 146.52, 999.99999] {
            let bytes = encode_freq_le4(f).unwrap();
            assert_eq!(decode_freq_le4(&bytes), f, "frequency {}", f);
        }
    }

    #[test]
    fn test_freq_le4_layout() {
        assert_eq!(encode_freq_le4(446.00625).unwrap(), [0x25, 0x06, 0x60, 0x44]);
        assert_eq!(decode_freq_le4(&[0x25, 0x06, 0x60, 0x44]), 446.00625);
    }

    #[test]
    fn test_freq_le4_out_of_range() {
        assert!(encode_freq_le4(1000.0).is_err());
        assert!(encode_freq_le4(-1.0).is_err());
        assert!(encode_freq_le4(f64::NAN).is_err());
    }

    #[test]
    fn test_off_grid_rejected() {
        // Finer than 10 Hz
        assert!(encode_freq_le4(0.000001).is_err());
        assert!(encode_freq_le4(146.520004).is_err());
        // Finer than 0.1 MHz
        assert!(encode_tenths_le2(90.55).is_err());
        assert!(encode_tenths_be2(144.05).is_err());

        assert!(encode_freq_le4(446.00625).is_ok());
        assert!(encode_tenths_le2(90.5).is_ok());
    }

    #[test]
    fn test_tenths_be2() {
        assert_eq!(encode_tenths_be2(144.0).unwrap(), [0x14, 0x40]);
        assert_eq!(decode_tenths_be2(&[0x14, 0x40]), 144.0);

        for f in [0.0, 0.1, 136.0, 999.9] {
            assert_eq!(decode_tenths_be2(&encode_tenths_be2(f).unwrap()), f);
        }

        assert!(encode_tenths_be2(1000.0).is_err());
    }

    #[test]
    fn test_tenths_le2() {
        // 90.5 MHz -> 905 tenths -> 05 09
        assert_eq!(encode_tenths_le2(90.5).unwrap(), [0x05, 0x09]);
        assert_eq!(decode_tenths_le2(&[0x05, 0x09]), 90.5);
        assert_eq!(decode_tenths_le2(&[0xFF, 0xFF]), 0.0);
        assert_eq!(decode_freq_le4(&[0xFF; 4]), 0.0);
        assert_eq!(decode_tenths_le2(&encode_tenths_le2(108.0).unwrap()), 108.0);
    }
}
