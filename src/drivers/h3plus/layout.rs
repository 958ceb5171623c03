// TD-H3 Plus memory layout
//
// The single field map shared by decode and encode. Multi-byte integers
// are little-endian unless noted.

use crate::bitwise::bits::bitmap_len;
use crate::core::constants::{CHANNEL_COUNT, FM_CHANNEL_COUNT, NAME_LENGTH};
use crate::core::settings::Settings;

/// Channel records, 16 bytes each
pub const CHANNEL_BASE: usize = 0x0010;
pub const RECORD_SIZE: usize = 16;

/// Channel names, 8 bytes each, padded with 0xFF
pub const NAME_BASE: usize = 0x0D40;

pub const VFO_A_OFFSET: usize = 0x0CB0;
pub const VFO_B_OFFSET: usize = 0x0CB4;

/// TX band limits, 2-byte big-endian BCD in 0.1 MHz
pub const TX_VHF_LOW: usize = 0x0CC0;
pub const TX_VHF_HIGH: usize = 0x0CC2;
pub const TX_UHF_LOW: usize = 0x0CC4;
pub const TX_UHF_HIGH: usize = 0x0CC6;

/// FM presets, 4 bytes each: 2-byte BCD tenths + 2 padding
pub const FM_BASE: usize = 0x0CD0;
pub const FM_RECORD_SIZE: usize = 4;

pub const BRIGHTNESS: usize = 0x0C9D;
pub const BRIGHTNESS_MAX: u8 = 5;

// DTMF / ANI block
pub const DTMF_STUN_CODE: usize = 0x1800;
pub const DTMF_KILL_CODE: usize = 0x1810;
pub const ANI: usize = 0x1820;
pub const DTMF_GROUP_CODE: usize = 0x1829;
pub const DTMF_GROUP_BASE: usize = 0x1830;
pub const DTMF_BOT_CODE: usize = 0x18C0;
pub const DTMF_EOT_CODE: usize = 0x18D0;

// Bitmaps, bit i-1 for entity i
pub const CHANNEL_VALID_BITMAP: usize = 0x1900;
pub const CHANNEL_SCAN_BITMAP: usize = 0x1920;
pub const CHANNEL_BITMAP_LEN: usize = bitmap_len(CHANNEL_COUNT);
pub const FM_SCAN_BITMAP: usize = 0x1940;
pub const FM_BITMAP_LEN: usize = bitmap_len(FM_CHANNEL_COUNT);

pub const VFO_A: usize = 0x1950;
pub const VFO_B: usize = 0x1960;

/// FM receiver VFO, 2-byte BCD tenths
pub const FM_VFO: usize = 0x1970;

/// Power-on messages, 16 bytes each, padded with 0x00
pub const MESSAGE_BASE: usize = 0x1C00;

// Scan range
pub const SCAN_UPPER: usize = 0x1F2B;
pub const SCAN_LOWER: usize = 0x1F2D;

/// Factory TX power calibration. Never written.
pub const CALIBRATION: [(usize, usize); 2] = [(0x1F50, 0x1F5E), (0x1F70, 0x1F7E)];

/// Start of channel `index` (1-based)
pub const fn channel_addr(index: usize) -> usize {
    CHANNEL_BASE + (index - 1) * RECORD_SIZE
}

/// Start of channel `index`'s name (1-based)
pub const fn name_addr(index: usize) -> usize {
    NAME_BASE + (index - 1) * NAME_LENGTH
}

/// Start of FM preset `index` (0-based)
pub const fn fm_addr(index: usize) -> usize {
    FM_BASE + index * FM_RECORD_SIZE
}

/// Start of DTMF group call `group` (0-based)
pub const fn dtmf_group_addr(group: usize) -> usize {
    DTMF_GROUP_BASE + group * 16
}

/// Start of power-on message `index` (0-based)
pub const fn message_addr(index: usize) -> usize {
    MESSAGE_BASE + index * 16
}

/// A setting that owns one whole byte
pub struct ByteSetting {
    pub name: &'static str,
    pub addr: usize,
    /// Largest valid value for plain numbers; `None` for enum codes and flags
    pub max: Option<u8>,
    pub get: fn(&Settings) -> u8,
    pub set: fn(&mut Settings, u8),
}

macro_rules! number {
    ($name:ident, $addr:expr, $max:expr) => {
        ByteSetting {
            name: stringify!($name),
            addr: $addr,
            max: Some($max),
            get: |s| s.$name,
            set: |s, v| s.$name = v,
        }
    };
}

macro_rules! coded {
    ($name:ident, $ty:ident, $addr:expr) => {
        ByteSetting {
            name: stringify!($name),
            addr: $addr,
            max: None,
            get: |s| s.$name.code(),
            set: |s, v| s.$name = crate::core::settings::$ty::from_code_lossy(v),
        }
    };
}

macro_rules! flag {
    ($name:ident, $addr:expr) => {
        ByteSetting {
            name: stringify!($name),
            addr: $addr,
            max: None,
            get: |s| s.$name as u8,
            set: |s, v| s.$name = v != 0,
        }
    };
}

/// Whole-byte settings, in address order
pub const BYTE_SETTINGS: &[ByteSetting] = &[
    coded!(modulation, Modulation, 0x001F),
    coded!(pf1_short, ShortKeyAction, 0x0C91),
    coded!(pf2_short, ShortKeyAction, 0x0C92),
    coded!(pf1_long, LongKeyAction, 0x0C94),
    coded!(pf2_long, LongKeyAction, 0x0C95),
    flag!(dcd, 0x0C98),
    coded!(dtmf_hold, DtmfHold, 0x0C99),
    coded!(dtmf_response, DtmfResponse, 0x0C9A),
    number!(dtmf_speed, 0x0C9B, 7),
    number!(squelch, 0x0CA9, 9),
    number!(tot, 0x0CAA, 7),
    number!(power_save, 0x0CAC, 4),
    coded!(backlight, Backlight, 0x0CAD),
    coded!(vox_delay, VoxDelay, 0x0CAE),
    coded!(group_code, GroupCode, DTMF_GROUP_CODE),
    number!(rp_ste, 0x1F02, 10),
    number!(rp_tone_delay, 0x1F03, 10),
    number!(mic_gain, 0x1F20, 9),
    coded!(language, Language, 0x1F28),
    coded!(display_mode, DisplayMode, 0x1F29),
    number!(menu_color, 0x1F2A, 17),
    number!(scan_lower, SCAN_LOWER, u8::MAX),
    number!(scan_hang_time, 0x1F2F, 19),
    coded!(active_vfo, ActiveVfo, 0x3004),
    flag!(talk_around, 0x300C),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memmap::MEMORY_SIZE;

    #[test]
    fn test_region_bounds() {
        assert_eq!(channel_addr(1), 0x0010);
        assert_eq!(channel_addr(199) + RECORD_SIZE, 0x0C80);
        assert_eq!(name_addr(199) + NAME_LENGTH, 0x1398);
        assert_eq!(fm_addr(24) + FM_RECORD_SIZE, 0x0D34);
        assert_eq!(dtmf_group_addr(7), 0x18A0);
        assert_eq!(message_addr(2), 0x1C20);
        assert_eq!(CHANNEL_BITMAP_LEN, 25);
        assert_eq!(FM_BITMAP_LEN, 4);
    }

    #[test]
    fn test_byte_settings_are_distinct_and_in_range() {
        let mut addrs: Vec<usize> = BYTE_SETTINGS.iter().map(|f| f.addr).collect();
        assert!(addrs.iter().all(|&a| a < MEMORY_SIZE));
        let count = addrs.len();
        addrs.sort_unstable();
        addrs.dedup();
        assert_eq!(addrs.len(), count);
    }

    #[test]
    fn test_byte_settings_stay_out_of_records() {
        for field in BYTE_SETTINGS {
            // 0x001F is the one setting inside channel 1's record area
            if field.addr == 0x001F {
                continue;
            }
            assert!(
                !(CHANNEL_BASE..channel_addr(199) + RECORD_SIZE).contains(&field.addr),
                "{} overlaps channel records",
                field.name
            );
            for (start, end) in CALIBRATION {
                assert!(!(start..end).contains(&field.addr));
            }
        }
    }

    #[test]
    fn test_accessors() {
        let mut settings = Settings::default();
        for field in BYTE_SETTINGS {
            if field.name == "squelch" {
                (field.set)(&mut settings, 4);
                assert_eq!((field.get)(&settings), 4);
            }
            if field.name == "language" {
                (field.set)(&mut settings, 3);
                assert_eq!(settings.language.label(), "RU");
            }
        }
        assert_eq!(settings.squelch, 4);
    }
}
