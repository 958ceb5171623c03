// Codeplug -> memory image
//
// Encoding works on a copy of the base image and returns it only when
// every field was written, so a failed encode leaves nothing behind.
// Where the base already holds a different byte pattern for the same
// value (0xFFFF vs 0x0000 for no tone, 0x00 vs 0xFF name padding) the
// base bytes are kept.

use super::decode::{channel_in_use, decode_ani, decode_fm_record, decode_text, VOX_LEVEL_MAX};
use super::flags::{write_packed, PttDelayByte};
use super::layout::*;
use super::record::{
    RawRecord, BUSY_LOCK, CHANNEL_FLAGS13_MASK, CHANNEL_FLAGS14_MASK, FREQ_HOP, HIGH_POWER,
    NARROW, OFFSET_DIR, PTT_ID, VFO_FLAGS13_MASK, VFO_FLAGS14_MASK,
};
use crate::bitwise::bcd::{encode_freq_le4, encode_tenths_be2, encode_tenths_le2};
use crate::bitwise::bits::bitmap_set;
use crate::bitwise::parser::encode_terminated_string;
use crate::core::constants::{
    ANI_LENGTH, CHANNEL_COUNT, FM_CHANNEL_COUNT, MAX_SCRAMBLE, MESSAGE_LENGTH, NAME_LENGTH,
};
use crate::core::dtmf::{DtmfCode, DtmfDigit, DtmfError};
use crate::core::fm::in_fm_band;
use crate::core::settings::Settings;
use crate::core::{Channel, Codeplug, FmChannels, Tone, Vfo};
use crate::drivers::traits::{CodecError, CodecResult};
use crate::memmap::MemoryImage;

/// Encode `codeplug` over a copy of `base`
pub fn encode(codeplug: &Codeplug, base: &MemoryImage) -> CodecResult<MemoryImage> {
    if codeplug.channels.len() != CHANNEL_COUNT {
        return Err(CodecError::ChannelCount {
            expected: CHANNEL_COUNT,
            actual: codeplug.channels.len(),
        });
    }
    if codeplug.fm_channels.len() != FM_CHANNEL_COUNT {
        return Err(CodecError::FmChannelCount {
            expected: FM_CHANNEL_COUNT,
            actual: codeplug.fm_channels.len(),
        });
    }

    let mut image = base.clone();

    for (i, channel) in codeplug.channels.iter().enumerate() {
        if channel.index != i + 1 {
            return Err(CodecError::out_of_range(
                format!("channels[{}].index", i),
                channel.index,
                (i + 1).to_string(),
            ));
        }
        encode_channel(&mut image, base, channel)?;
    }

    encode_vfo(&mut image, VFO_A, VFO_A_OFFSET, &codeplug.vfo_a, "vfo_a")?;
    encode_vfo(&mut image, VFO_B, VFO_B_OFFSET, &codeplug.vfo_b, "vfo_b")?;
    encode_fm(&mut image, &codeplug.fm_channels)?;

    // Settings go last: modulation shares 0x001F with channel 1's record
    encode_settings(&mut image, &codeplug.settings)?;

    tracing::debug!(
        "Encoded {} programmed channels",
        codeplug.programmed_channels().count()
    );

    Ok(image)
}

/// Return `current` if it decodes to the same value as `encoded`
fn keep_equivalent<T, V, F>(current: T, encoded: T, decode: F) -> T
where
    V: PartialEq,
    F: Fn(&T) -> V,
{
    if decode(&current) == decode(&encoded) {
        current
    } else {
        encoded
    }
}

/// Write a fixed-width field unless the image already holds an equivalent one
fn write_equivalent<V, F>(image: &mut MemoryImage, addr: usize, encoded: &[u8], decode: F)
where
    V: PartialEq,
    F: Fn(&[u8]) -> V,
{
    if decode(image.slice(addr, encoded.len())) != decode(encoded) {
        image.write_slice(addr, encoded);
    }
}

fn encode_freq(field: &str, mhz: f64) -> CodecResult<[u8; 4]> {
    encode_freq_le4(mhz).map_err(|source| CodecError::Frequency {
        field: field.to_string(),
        source,
    })
}

fn encode_tone(field: &str, tone: &Tone) -> CodecResult<u16> {
    tone.encode_word().map_err(|source| CodecError::Tone {
        field: field.to_string(),
        source,
    })
}

fn check_scramble(field: &str, scramble: u8) -> CodecResult<()> {
    if scramble > MAX_SCRAMBLE {
        return Err(CodecError::out_of_range(
            field,
            scramble,
            format!("0-{}", MAX_SCRAMBLE),
        ));
    }
    Ok(())
}

/// Encode a name or message, explaining which rule it broke
fn encode_text(field: &str, text: &str, len: usize, pad: u8) -> CodecResult<Vec<u8>> {
    encode_terminated_string(text, len, pad).ok_or_else(|| {
        let count = text.chars().count();
        if count > len {
            return CodecError::NameTooLong {
                field: field.to_string(),
                name: text.to_string(),
                max: len,
            };
        }
        let ch = text
            .chars()
            .find(|&c| c == '\0' || c as u32 >= 0xFF)
            .unwrap_or('\0');
        CodecError::InvalidCharacter {
            field: field.to_string(),
            ch,
        }
    })
}

fn channel_bitmaps(image: &mut MemoryImage, index: usize, valid: bool, scan: bool) {
    bitmap_set(
        image.slice_mut(CHANNEL_VALID_BITMAP, CHANNEL_BITMAP_LEN),
        index - 1,
        valid,
    );
    bitmap_set(
        image.slice_mut(CHANNEL_SCAN_BITMAP, CHANNEL_BITMAP_LEN),
        index - 1,
        scan,
    );
}

/// Encode one channel. `base` decides which flag bits survive.
pub fn encode_channel(
    image: &mut MemoryImage,
    base: &MemoryImage,
    channel: &Channel,
) -> CodecResult<()> {
    let index = channel.index;
    let addr = channel_addr(index);

    if channel.is_empty() {
        image.write_slice(addr, &RawRecord::erased().to_bytes());
        image.write_slice(name_addr(index), &[0xFF; NAME_LENGTH]);
        channel_bitmaps(image, index, false, channel.scan_add);
        return Ok(());
    }

    let label = format!("channel {}", index);
    let rx_freq = encode_freq(&format!("{} rx_freq", label), channel.rx_freq)?;
    if rx_freq == [0x00; 4] {
        // Would read back as an empty slot
        return Err(CodecError::out_of_range(
            format!("{} rx_freq", label),
            channel.rx_freq,
            "at least 0.00001 MHz",
        ));
    }
    let tx_freq = encode_freq(&format!("{} tx_freq", label), channel.tx_freq)?;
    let rx_tone = encode_tone(&format!("{} decode", label), &channel.decode)?;
    let tx_tone = encode_tone(&format!("{} encode", label), &channel.encode)?;
    check_scramble(&format!("{} scramble", label), channel.scramble)?;
    let name = encode_text(&format!("{} name", label), &channel.name, NAME_LENGTH, 0xFF)?;

    // A freshly programmed slot starts from zeroed flags and canonical tones
    let current = if channel_in_use(base, index) {
        RawRecord::from_bytes(image.slice(addr, RECORD_SIZE))
    } else {
        RawRecord {
            flags13: 0x00,
            flags14: 0x00,
            rx_tone,
            tx_tone,
            ..RawRecord::erased()
        }
    };

    let mut owned13 = BUSY_LOCK.put_bool(0, channel.busy_lock);
    owned13 = FREQ_HOP.put_bool(owned13, channel.frequency_hop);
    owned13 = PTT_ID.put(owned13, channel.ptt_id.code());

    let owned14 = NARROW.put(0, channel.bandwidth.code());
    let owned14 = HIGH_POWER.put(owned14, channel.tx_power.code());

    let record = RawRecord {
        rx_freq,
        tx_freq,
        rx_tone: keep_equivalent(current.rx_tone, rx_tone, |w| Tone::decode_word(*w)),
        tx_tone: keep_equivalent(current.tx_tone, tx_tone, |w| Tone::decode_word(*w)),
        scramble: channel.scramble,
        flags13: (current.flags13 & !CHANNEL_FLAGS13_MASK) | owned13,
        flags14: (current.flags14 & !CHANNEL_FLAGS14_MASK) | owned14,
        reserved: 0x00,
    };
    image.write_slice(addr, &record.to_bytes());
    write_equivalent(image, name_addr(index), &name, decode_text);

    channel_bitmaps(image, index, true, channel.scan_add);
    Ok(())
}

/// Encode a VFO record and its offset
pub fn encode_vfo(
    image: &mut MemoryImage,
    record_addr: usize,
    offset_addr: usize,
    vfo: &Vfo,
    label: &str,
) -> CodecResult<()> {
    let rx_freq = encode_freq(&format!("{}.rx_freq", label), vfo.rx_freq)?;
    let offset = encode_freq(&format!("{}.offset", label), vfo.offset)?;
    let rx_tone = encode_tone(&format!("{}.rx_tone", label), &vfo.rx_tone)?;
    let tx_tone = encode_tone(&format!("{}.tx_tone", label), &vfo.tx_tone)?;
    check_scramble(&format!("{}.scramble", label), vfo.scramble)?;

    let current = RawRecord::from_bytes(image.slice(record_addr, RECORD_SIZE));

    let owned13 = BUSY_LOCK.put_bool(0, vfo.busy_lock);
    let mut owned14 = OFFSET_DIR.put(0, vfo.offset_dir.code());
    owned14 = NARROW.put(owned14, vfo.bandwidth.code());
    owned14 = HIGH_POWER.put(owned14, vfo.tx_power.code());

    let record = RawRecord {
        rx_freq,
        tx_freq: [0x00; 4],
        rx_tone: keep_equivalent(current.rx_tone, rx_tone, |w| Tone::decode_word(*w)),
        tx_tone: keep_equivalent(current.tx_tone, tx_tone, |w| Tone::decode_word(*w)),
        scramble: vfo.scramble,
        flags13: (current.flags13 & !VFO_FLAGS13_MASK) | owned13,
        flags14: (current.flags14 & !VFO_FLAGS14_MASK) | owned14,
        reserved: 0x00,
    };
    image.write_slice(record_addr, &record.to_bytes());
    image.write_slice(offset_addr, &offset);
    Ok(())
}

/// Encode the FM presets and rebuild their scan bitmap
pub fn encode_fm(image: &mut MemoryImage, fm: &FmChannels) -> CodecResult<()> {
    let mut records = Vec::with_capacity(fm.len());
    for (i, mhz) in fm.iter().enumerate() {
        let field = format!("fm_channels[{}]", i);
        let record = if mhz == 0.0 {
            [0xFF, 0xFF, 0x00, 0x00]
        } else if !in_fm_band(mhz) {
            return Err(CodecError::out_of_range(field, mhz, "87.0-109.0 MHz or 0"));
        } else {
            let [lo, hi] = encode_tenths_le2(mhz)
                .map_err(|source| CodecError::Frequency { field, source })?;
            [lo, hi, 0x00, 0x00]
        };
        records.push(record);
    }

    for (i, record) in records.iter().enumerate() {
        if decode_fm_record(&image.array(fm_addr(i))) != decode_fm_record(record) {
            image.write_slice(fm_addr(i), record);
        }
        bitmap_set(
            image.slice_mut(FM_SCAN_BITMAP, FM_BITMAP_LEN),
            i,
            fm.is_populated(i),
        );
    }
    Ok(())
}

/// ANI digits as stored bytes; exactly three are required
fn encode_ani(ani: &str) -> CodecResult<[u8; ANI_LENGTH]> {
    let count = ani.chars().count();
    if count != ANI_LENGTH {
        return Err(CodecError::out_of_range(
            "settings.ani",
            ani,
            format!("{} digits", ANI_LENGTH),
        ));
    }

    let mut out = [0u8; ANI_LENGTH];
    for (slot, c) in out.iter_mut().zip(ani.chars()) {
        *slot = DtmfDigit::from_char(c)
            .map(DtmfDigit::code)
            .filter(|&code| code <= 9)
            .ok_or_else(|| CodecError::Dtmf {
                field: "settings.ani".to_string(),
                source: DtmfError::InvalidSymbol(c),
            })?;
    }
    Ok(out)
}

fn write_dtmf(image: &mut MemoryImage, addr: usize, code: &DtmfCode) {
    write_equivalent(image, addr, &code.to_field(), DtmfCode::from_field);
}

fn check_range(field: &str, value: u8, max: u8) -> CodecResult<()> {
    if value > max {
        return Err(CodecError::out_of_range(
            format!("settings.{}", field),
            value,
            format!("0-{}", max),
        ));
    }
    Ok(())
}

fn encode_band_limit(field: &str, mhz: f64) -> CodecResult<[u8; 2]> {
    encode_tenths_be2(mhz).map_err(|source| CodecError::Frequency {
        field: format!("settings.tx_limits.{}", field),
        source,
    })
}

/// Encode every radio-wide setting
pub fn encode_settings(image: &mut MemoryImage, settings: &Settings) -> CodecResult<()> {
    // Validate everything before the first write
    for field in BYTE_SETTINGS {
        if let Some(max) = field.max {
            check_range(field.name, (field.get)(settings), max)?;
        }
    }
    check_range("brightness", settings.brightness, BRIGHTNESS_MAX)?;
    check_range("vox_level", settings.vox_level, VOX_LEVEL_MAX)?;
    check_range("ptt_delay", settings.ptt_delay, PttDelayByte::DELAY.max_value())?;

    let limits = &settings.tx_limits;
    let vhf_low = encode_band_limit("vhf_low", limits.vhf_low)?;
    let vhf_high = encode_band_limit("vhf_high", limits.vhf_high)?;
    let uhf_low = encode_band_limit("uhf_low", limits.uhf_low)?;
    let uhf_high = encode_band_limit("uhf_high", limits.uhf_high)?;

    let fm_vfo = encode_tenths_le2(settings.fm_vfo_freq).map_err(|source| {
        CodecError::Frequency {
            field: "settings.fm_vfo_freq".to_string(),
            source,
        }
    })?;

    let ani = encode_ani(&settings.ani)?;

    let mut messages = Vec::with_capacity(settings.messages.len());
    for (i, message) in settings.messages.iter().enumerate() {
        messages.push(encode_text(
            &format!("settings.messages[{}]", i),
            message,
            MESSAGE_LENGTH,
            0x00,
        )?);
    }

    for field in BYTE_SETTINGS {
        image.write_byte(field.addr, (field.get)(settings));
    }
    write_packed(image, settings);
    image.write_byte(BRIGHTNESS, BRIGHTNESS_MAX - settings.brightness);

    image.write_slice(TX_VHF_LOW, &vhf_low);
    image.write_slice(TX_VHF_HIGH, &vhf_high);
    image.write_slice(TX_UHF_LOW, &uhf_low);
    image.write_slice(TX_UHF_HIGH, &uhf_high);
    image.write_slice(FM_VFO, &fm_vfo);

    write_equivalent(image, ANI, &ani, decode_ani);
    write_dtmf(image, DTMF_STUN_CODE, &settings.stun_code);
    write_dtmf(image, DTMF_KILL_CODE, &settings.kill_code);
    for (g, code) in settings.group_calls.iter().enumerate() {
        write_dtmf(image, dtmf_group_addr(g), code);
    }
    write_dtmf(image, DTMF_BOT_CODE, &settings.bot_code);
    write_dtmf(image, DTMF_EOT_CODE, &settings.eot_code);

    for (i, message) in messages.iter().enumerate() {
        write_equivalent(image, message_addr(i), message, decode_text);
    }

    image.write_slice(SCAN_UPPER, &settings.scan_upper.to_le_bytes());
    Ok(())
}
