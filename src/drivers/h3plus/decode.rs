// Memory image -> Codeplug
//
// Decoding never fails. Garbage in codec-owned fields is read as the
// nearest value the encoder can write back, so every decoded codeplug
// is encodable.

use super::flags::read_packed;
use super::layout::*;
use super::record::{RawRecord, BUSY_LOCK, FREQ_HOP, HIGH_POWER, NARROW, OFFSET_DIR, PTT_ID};
use crate::bitwise::bcd::{decode_freq_le4, decode_tenths_be2, decode_tenths_le2};
use crate::bitwise::bits::bitmap_get;
use crate::bitwise::parser::parse_terminated_string;
use crate::core::constants::{
    ANI_LENGTH, CHANNEL_COUNT, FM_CHANNEL_COUNT, MAX_SCRAMBLE, MESSAGE_LENGTH, NAME_LENGTH,
};
use crate::core::dtmf::{DtmfCode, DTMF_FIELD_LEN};
use crate::core::fm::in_fm_band;
use crate::core::settings::{Settings, TxBandLimits};
use crate::core::{
    Bandwidth, Channel, Codeplug, FmChannels, OffsetDirection, PttId, Tone, TxPower, Vfo,
};
use crate::memmap::MemoryImage;

/// VOX levels above this read as off
pub(crate) const VOX_LEVEL_MAX: u8 = 5;

/// Decode a whole image
pub fn decode(image: &MemoryImage) -> Codeplug {
    let channels: Vec<Channel> = (1..=CHANNEL_COUNT)
        .map(|index| decode_channel(image, index))
        .collect();

    let codeplug = Codeplug {
        vfo_a: decode_vfo(image, VFO_A, VFO_A_OFFSET),
        vfo_b: decode_vfo(image, VFO_B, VFO_B_OFFSET),
        fm_channels: decode_fm(image),
        settings: decode_settings(image),
        channels,
    };

    tracing::debug!(
        "Decoded {} programmed channels, {} FM presets",
        codeplug.programmed_channels().count(),
        codeplug.fm_channels.iter().filter(|&f| f != 0.0).count()
    );

    codeplug
}

fn channel_bitmap(image: &MemoryImage, addr: usize, index: usize) -> bool {
    bitmap_get(image.slice(addr, CHANNEL_BITMAP_LEN), index - 1)
}

/// Whether channel `index` holds a programmed record in `image`
pub(crate) fn channel_in_use(image: &MemoryImage, index: usize) -> bool {
    channel_bitmap(image, CHANNEL_VALID_BITMAP, index)
        && !RawRecord::from_bytes(image.slice(channel_addr(index), RECORD_SIZE)).is_erased()
}

/// Read a fixed-width text field terminated by 0x00 or 0xFF
pub(crate) fn decode_text(bytes: &[u8]) -> String {
    parse_terminated_string(bytes.len())(bytes)
        .map(|(_, text)| text)
        .unwrap_or_default()
}

fn decode_scramble(raw: u8, label: &str) -> u8 {
    if raw > MAX_SCRAMBLE {
        tracing::debug!("{} scramble {} out of range, reading as off", label, raw);
        0
    } else {
        raw
    }
}

/// An unprogrammed slot still carries its scan bit
fn empty_channel(image: &MemoryImage, index: usize) -> Channel {
    Channel {
        scan_add: channel_bitmap(image, CHANNEL_SCAN_BITMAP, index),
        ..Channel::empty(index)
    }
}

/// Decode channel `index` (1-based)
pub fn decode_channel(image: &MemoryImage, index: usize) -> Channel {
    if !channel_bitmap(image, CHANNEL_VALID_BITMAP, index) {
        return empty_channel(image, index);
    }

    let raw = RawRecord::from_bytes(image.slice(channel_addr(index), RECORD_SIZE));
    if raw.is_erased() {
        return empty_channel(image, index);
    }

    let rx_freq = decode_freq_le4(&raw.rx_freq);
    if rx_freq == 0.0 {
        tracing::debug!("Channel {} marked valid with no RX frequency", index);
        return empty_channel(image, index);
    }

    Channel {
        index,
        rx_freq,
        tx_freq: decode_freq_le4(&raw.tx_freq),
        decode: Tone::decode_word(raw.rx_tone),
        encode: Tone::decode_word(raw.tx_tone),
        tx_power: TxPower::from_code_lossy(HIGH_POWER.get(raw.flags14)),
        bandwidth: Bandwidth::from_code_lossy(NARROW.get(raw.flags14)),
        busy_lock: BUSY_LOCK.is_set(raw.flags13),
        frequency_hop: FREQ_HOP.is_set(raw.flags13),
        ptt_id: PttId::from_code_lossy(PTT_ID.get(raw.flags13)),
        scan_add: channel_bitmap(image, CHANNEL_SCAN_BITMAP, index),
        name: decode_text(image.slice(name_addr(index), NAME_LENGTH)),
        scramble: decode_scramble(raw.scramble, &format!("Channel {}", index)),
    }
}

/// Decode a VFO record and its separately stored offset
pub fn decode_vfo(image: &MemoryImage, record_addr: usize, offset_addr: usize) -> Vfo {
    let raw = RawRecord::from_bytes(image.slice(record_addr, RECORD_SIZE));

    Vfo {
        rx_freq: decode_freq_le4(&raw.rx_freq),
        rx_tone: Tone::decode_word(raw.rx_tone),
        tx_tone: Tone::decode_word(raw.tx_tone),
        scramble: decode_scramble(raw.scramble, &format!("VFO at {:#06x}", record_addr)),
        busy_lock: BUSY_LOCK.is_set(raw.flags13),
        bandwidth: Bandwidth::from_code_lossy(NARROW.get(raw.flags14)),
        tx_power: TxPower::from_code_lossy(HIGH_POWER.get(raw.flags14)),
        offset_dir: OffsetDirection::from_code_lossy(OFFSET_DIR.get(raw.flags14)),
        offset: decode_freq_le4(&image.array(offset_addr)),
    }
}

/// Decode one 4-byte FM preset record. Anything outside the broadcast
/// band reads as an unused slot.
pub(crate) fn decode_fm_record(bytes: &[u8; FM_RECORD_SIZE]) -> f64 {
    if bytes[0] == 0xFF {
        return 0.0;
    }
    let mhz = decode_tenths_le2(&[bytes[0], bytes[1]]);
    if !in_fm_band(mhz) {
        if mhz != 0.0 {
            tracing::debug!("FM preset {} MHz outside the broadcast band", mhz);
        }
        return 0.0;
    }
    mhz
}

/// Decode the 25 FM presets, checking them against the FM scan bitmap
pub fn decode_fm(image: &MemoryImage) -> FmChannels {
    let bitmap = image.slice(FM_SCAN_BITMAP, FM_BITMAP_LEN);

    let freqs: Vec<f64> = (0..FM_CHANNEL_COUNT)
        .map(|i| {
            let mhz = decode_fm_record(&image.array(fm_addr(i)));
            if bitmap_get(bitmap, i) != (mhz != 0.0) {
                tracing::warn!(
                    "FM preset {} ({} MHz) disagrees with the FM scan bitmap",
                    i + 1,
                    mhz
                );
            }
            mhz
        })
        .collect();

    FmChannels::from_vec(freqs)
}

/// ANI digits; anything but 0-9 reads as '0'
pub(crate) fn decode_ani(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b <= 9 { char::from(b'0' + b) } else { '0' })
        .collect()
}

fn decode_dtmf(image: &MemoryImage, addr: usize) -> DtmfCode {
    DtmfCode::from_field(image.slice(addr, DTMF_FIELD_LEN))
}

/// Decode every radio-wide setting
pub fn decode_settings(image: &MemoryImage) -> Settings {
    let mut settings = Settings::default();

    for field in BYTE_SETTINGS {
        let raw = image.byte(field.addr);
        let value = match field.max {
            Some(max) if raw > max => {
                tracing::debug!("{} = {} out of range, reading as 0", field.name, raw);
                0
            }
            _ => raw,
        };
        (field.set)(&mut settings, value);
    }

    read_packed(image, &mut settings);
    if settings.vox_level > VOX_LEVEL_MAX {
        tracing::debug!("VOX level {} out of range, reading as off", settings.vox_level);
        settings.vox_level = 0;
    }

    settings.brightness = BRIGHTNESS_MAX.saturating_sub(image.byte(BRIGHTNESS));

    settings.tx_limits = TxBandLimits {
        vhf_low: decode_tenths_be2(&image.array(TX_VHF_LOW)),
        vhf_high: decode_tenths_be2(&image.array(TX_VHF_HIGH)),
        uhf_low: decode_tenths_be2(&image.array(TX_UHF_LOW)),
        uhf_high: decode_tenths_be2(&image.array(TX_UHF_HIGH)),
    };

    settings.fm_vfo_freq = decode_tenths_le2(&image.array(FM_VFO));

    settings.ani = decode_ani(image.slice(ANI, ANI_LENGTH));
    settings.stun_code = decode_dtmf(image, DTMF_STUN_CODE);
    settings.kill_code = decode_dtmf(image, DTMF_KILL_CODE);
    settings.group_calls = std::array::from_fn(|g| decode_dtmf(image, dtmf_group_addr(g)));
    settings.bot_code = decode_dtmf(image, DTMF_BOT_CODE);
    settings.eot_code = decode_dtmf(image, DTMF_EOT_CODE);

    settings.messages =
        std::array::from_fn(|i| decode_text(image.slice(message_addr(i), MESSAGE_LENGTH)));

    let upper = image.slice(SCAN_UPPER, 2);
    settings.scan_upper = u16::from_le_bytes([upper[0], upper[1]]);

    settings
}
