// Sub-byte fields and packed bitmaps

/// A run of `width` bits starting at bit `shift` (bit 0 = LSB) of one byte.
///
/// Reads mask the field out of the byte; writes replace only the field's
/// bits and leave every sibling bit of the byte untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    shift: u8,
    width: u8,
}

impl BitField {
    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    /// Single-bit field
    pub const fn flag(bit: u8) -> Self {
        Self::new(bit, 1)
    }

    /// Mask of the field in byte position
    pub const fn mask(&self) -> u8 {
        (((1u16 << self.width) - 1) << self.shift) as u8
    }

    /// Largest value the field can hold
    pub const fn max_value(&self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }

    /// Extract the field from `byte`
    pub const fn get(&self, byte: u8) -> u8 {
        (byte & self.mask()) >> self.shift
    }

    /// Extract a single-bit field as a bool
    pub const fn is_set(&self, byte: u8) -> bool {
        self.get(byte) != 0
    }

    /// Replace the field inside `byte` with `value` (excess high bits are dropped)
    pub const fn put(&self, byte: u8, value: u8) -> u8 {
        (byte & !self.mask()) | ((value << self.shift) & self.mask())
    }

    /// Replace a single-bit field
    pub const fn put_bool(&self, byte: u8, value: bool) -> u8 {
        self.put(byte, value as u8)
    }
}

/// Byte offset and bit mask of entity `index` in a packed bitmap
pub const fn bitmap_position(index: usize) -> (usize, u8) {
    (index / 8, 1 << (index % 8))
}

/// Read bit `index` from a packed bitmap (1 = true)
pub fn bitmap_get(bitmap: &[u8], index: usize) -> bool {
    let (byte, mask) = bitmap_position(index);
    bitmap.get(byte).is_some_and(|b| b & mask != 0)
}

/// Set or clear bit `index` in a packed bitmap, leaving all other bits alone
pub fn bitmap_set(bitmap: &mut [u8], index: usize, value: bool) {
    let (byte, mask) = bitmap_position(index);
    if let Some(b) = bitmap.get_mut(byte) {
        if value {
            *b |= mask;
        } else {
            *b &= !mask;
        }
    }
}

/// Number of bytes needed for a bitmap of `bits` entries
pub const fn bitmap_len(bits: usize) -> usize {
    bits.div_ceil(8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitfield_masks() {
        assert_eq!(BitField::flag(2).mask(), 0x04);
        assert_eq!(BitField::new(6, 2).mask(), 0xC0);
        assert_eq!(BitField::new(4, 3).mask(), 0x70);
        assert_eq!(BitField::new(0, 8).mask(), 0xFF);
        assert_eq!(BitField::new(4, 3).max_value(), 7);
    }

    #[test]
    fn test_bitfield_get_put() {
        let pttid = BitField::new(6, 2);
        assert_eq!(pttid.get(0b1100_0000), 3);
        assert_eq!(pttid.get(0b0100_0100), 1);

        // Sibling bits survive
        assert_eq!(pttid.put(0b0010_0100, 2), 0b1010_0100);
        assert_eq!(pttid.put(0xFF, 0), 0x3F);

        let busy = BitField::flag(2);
        assert!(busy.is_set(0x04));
        assert_eq!(busy.put_bool(0xFF, false), 0xFB);
        assert_eq!(busy.put_bool(0x00, true), 0x04);
    }

    #[test]
    fn test_bitfield_drops_excess_bits() {
        let vox = BitField::new(0, 3);
        assert_eq!(vox.put(0xF8, 0x0F), 0xFF);
        assert_eq!(vox.put(0x00, 0x08), 0x00);
    }

    #[test]
    fn test_bitmap() {
        let mut bitmap = [0u8; 4];
        bitmap_set(&mut bitmap, 0, true);
        bitmap_set(&mut bitmap, 9, true);
        bitmap_set(&mut bitmap, 24, true);
        assert_eq!(bitmap, [0x01, 0x02, 0x00, 0x01]);

        assert!(bitmap_get(&bitmap, 9));
        assert!(!bitmap_get(&bitmap, 10));

        bitmap_set(&mut bitmap, 9, false);
        assert_eq!(bitmap[1], 0x00);

        // Out of range is ignored / false
        bitmap_set(&mut bitmap, 64, true);
        assert!(!bitmap_get(&bitmap, 64));
    }

    #[test]
    fn test_bitmap_len() {
        assert_eq!(bitmap_len(199), 25);
        assert_eq!(bitmap_len(25), 4);
        assert_eq!(bitmap_len(8), 1);
    }
}
