// Constants shared by the model, the codec and validation

/// 50 standard CTCSS tones (in Hz)
pub const TONES: [f64; 50] = [
    67.0, 69.3, 71.9, 74.4, 77.0, 79.7, 82.5, 85.4, 88.5, 91.5, 94.8, 97.4, 100.0, 103.5, 107.2,
    110.9, 114.8, 118.8, 123.0, 127.3, 131.8, 136.5, 141.3, 146.2, 151.4, 156.7, 159.8, 162.2,
    165.5, 167.9, 171.3, 173.8, 177.3, 179.9, 183.5, 186.2, 189.9, 192.8, 196.6, 199.5, 203.5,
    206.5, 210.7, 218.1, 225.7, 229.1, 233.6, 241.8, 250.3, 254.1,
];

/// 104 standard DCS codes
pub const DTCS_CODES: [u16; 104] = [
    23, 25, 26, 31, 32, 36, 43, 47, 51, 53, 54, 65, 71, 72, 73, 74, 114, 115, 116, 122, 125, 131,
    132, 134, 143, 145, 152, 155, 156, 162, 165, 172, 174, 205, 212, 223, 225, 226, 243, 244, 245,
    246, 251, 252, 255, 261, 263, 265, 266, 271, 274, 306, 311, 315, 325, 331, 332, 343, 346, 351,
    356, 364, 365, 371, 411, 412, 413, 423, 431, 432, 445, 446, 452, 454, 455, 462, 464, 465, 466,
    503, 506, 516, 523, 526, 532, 546, 565, 606, 612, 624, 627, 631, 632, 654, 662, 664, 703, 712,
    723, 731, 732, 734, 743, 754,
];

/// CTCSS range the tone word can carry (Hz)
pub const CTCSS_MIN: f64 = 60.0;
pub const CTCSS_MAX: f64 = 260.0;

/// Largest DCS code representable by three decimal digits
pub const DCS_MAX: u16 = 999;

/// DTMF keypad alphabet, indexed by on-air code
pub const DTMF_CHARS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', '*', '#',
];

/// Longest DTMF code a 16-byte field holds (15 digits + length byte)
pub const DTMF_MAX_DIGITS: usize = 15;

/// Memory channels, numbered 1..=199
pub const CHANNEL_COUNT: usize = 199;

/// Broadcast FM presets
pub const FM_CHANNEL_COUNT: usize = 25;

/// Broadcast FM band (MHz)
pub const FM_MIN_MHZ: f64 = 87.0;
pub const FM_MAX_MHZ: f64 = 109.0;

pub const MAX_SCRAMBLE: u8 = 16;

pub const NAME_LENGTH: usize = 8;
pub const MESSAGE_LENGTH: usize = 16;
pub const MESSAGE_COUNT: usize = 3;

pub const DTMF_GROUP_COUNT: usize = 8;
pub const ANI_LENGTH: usize = 3;

/// Check whether a tone is one of the 50 standard CTCSS tones
pub fn is_standard_tone(hz: f64) -> bool {
    TONES.iter().any(|&t| (t - hz).abs() < 0.05)
}

/// Check whether a DCS code is one of the 104 standard codes
pub fn is_standard_dcs(code: u16) -> bool {
    DTCS_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_tables() {
        assert_eq!(TONES[0], 67.0);
        assert_eq!(TONES[49], 254.1);
        assert!(TONES.iter().all(|&t| (CTCSS_MIN..=CTCSS_MAX).contains(&t)));
        assert!(DTCS_CODES.iter().all(|&c| c <= DCS_MAX));
    }

    #[test]
    fn test_standard_lookups() {
        assert!(is_standard_tone(67.0));
        assert!(is_standard_tone(88.5));
        assert!(!is_standard_tone(68.0));

        assert!(is_standard_dcs(23));
        assert!(is_standard_dcs(754));
        assert!(!is_standard_dcs(24));
    }

    #[test]
    fn test_dtmf_alphabet() {
        assert_eq!(DTMF_CHARS[10], 'A');
        assert_eq!(DTMF_CHARS[14], '*');
        assert_eq!(DTMF_CHARS[15], '#');
    }
}
