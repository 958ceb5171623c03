// TIDRADIO TD-H3 Plus memory image driver
//
// The radio is programmed by exchanging its whole 16 KiB memory. Decoding
// turns an image into a Codeplug; encoding writes a Codeplug over a copy
// of the image it came from, so calibration and undocumented bytes ride
// along untouched.

pub mod decode;
pub mod encode;
pub mod flags;
pub mod layout;
pub mod record;

use super::traits::{CodecResult, ImageCodec};
use crate::core::Codeplug;
use crate::memmap::{MemoryImage, MEMORY_SIZE};

pub use decode::decode;
pub use encode::encode;

/// File extension used for saved images
pub const H3P_EXTENSION: &str = "h3p";

/// Encode over a raw base buffer, which must be exactly [`MEMORY_SIZE`] bytes
pub fn encode_bytes(codeplug: &Codeplug, base: &[u8]) -> CodecResult<Vec<u8>> {
    let base = MemoryImage::try_from(base)?;
    Ok(encode(codeplug, &base)?.into_vec())
}

/// TD-H3 Plus driver
pub struct H3PlusRadio {
    vendor: String,
    model: String,
}

impl H3PlusRadio {
    pub fn new() -> Self {
        Self {
            vendor: "TIDRADIO".to_string(),
            model: "TD-H3 Plus".to_string(),
        }
    }
}

impl Default for H3PlusRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCodec for H3PlusRadio {
    fn vendor(&self) -> &str {
        &self.vendor
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn memsize(&self) -> usize {
        MEMORY_SIZE
    }

    fn decode(&self, image: &MemoryImage) -> Codeplug {
        decode(image)
    }

    fn encode(&self, codeplug: &Codeplug, base: &MemoryImage) -> CodecResult<MemoryImage> {
        encode(codeplug, base)
    }

    fn match_model(data: &[u8], filename: &str) -> bool {
        let has_extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(H3P_EXTENSION));

        has_extension && data.len() == MEMORY_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::layout::{channel_addr, CHANNEL_BITMAP_LEN, CHANNEL_VALID_BITMAP, RECORD_SIZE};
    use super::*;
    use crate::bitwise::bits::bitmap_set;
    use crate::core::Tone;
    use crate::drivers::traits::CodecError;

    #[test]
    fn test_driver_info() {
        let radio = H3PlusRadio::new();
        assert_eq!(radio.vendor(), "TIDRADIO");
        assert_eq!(radio.model(), "TD-H3 Plus");
        assert_eq!(radio.get_name(), "TIDRADIO TD-H3 Plus");
        assert_eq!(radio.memsize(), 16384);
    }

    #[test]
    fn test_match_model() {
        let data = vec![0xFF; MEMORY_SIZE];
        assert!(H3PlusRadio::match_model(&data, "backup.h3p"));
        assert!(H3PlusRadio::match_model(&data, "BACKUP.H3P"));
        assert!(!H3PlusRadio::match_model(&data, "backup.img"));
        assert!(!H3PlusRadio::match_model(&data[..100], "backup.h3p"));
    }

    #[test]
    fn test_encode_bytes_checks_size() {
        let codeplug = Codeplug::new();
        assert_eq!(
            encode_bytes(&codeplug, &[0xFF; 100]).unwrap_err(),
            CodecError::ImageSize {
                expected: MEMORY_SIZE,
                actual: 100
            }
        );
        assert_eq!(
            encode_bytes(&codeplug, &[0xFF; MEMORY_SIZE]).unwrap().len(),
            MEMORY_SIZE
        );
    }

    #[test]
    fn test_edit_one_channel_scramble() {
        // Channel 5: 446.00625 MHz simplex, RX tone 67.0 Hz
        let mut image = MemoryImage::erased();
        let addr = channel_addr(5);
        image.write_slice(
            addr,
            &[
                0x25, 0x06, 0x60, 0x44, 0x25, 0x06, 0x60, 0x44, 0x70, 0x06, 0x00, 0x00, 0x00,
                0x10, 0x10, 0x00,
            ],
        );
        bitmap_set(
            image.slice_mut(CHANNEL_VALID_BITMAP, CHANNEL_BITMAP_LEN),
            4,
            true,
        );

        let radio = H3PlusRadio::new();
        let mut codeplug = radio.decode(&image);
        let ch = codeplug.channel(5).unwrap();
        assert_eq!(ch.rx_freq, 446.00625);
        assert_eq!(ch.decode, Tone::Ctcss(67.0));

        codeplug.channel_mut(5).unwrap().scramble = 3;
        let out = radio.encode(&codeplug, &image).unwrap();

        assert_eq!(out.byte(0x0010 + 16 * 4 + 12), 3);
        let before = image.slice(addr, RECORD_SIZE);
        let after = out.slice(addr, RECORD_SIZE);
        for i in (0..RECORD_SIZE).filter(|&i| i != 12) {
            assert_eq!(after[i], before[i], "record byte {}", i);
        }
    }
}
