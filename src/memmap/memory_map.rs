// Fixed-size memory image of the radio's EEPROM

use std::fmt;
use thiserror::Error;

/// Size of the radio's address space (0x0000..=0x3FFF)
pub const MEMORY_SIZE: usize = 0x4000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryMapError {
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    #[error("Memory image must be {expected} bytes, got {actual}")]
    WrongSize { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, MemoryMapError>;

/// The radio's full 16 KiB memory image.
///
/// Always exactly [`MEMORY_SIZE`] bytes. Cloning makes a deep copy, so an
/// encode running against a clone never touches the caller's buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    data: Vec<u8>,
}

impl MemoryImage {
    /// Wrap a buffer, rejecting anything that is not exactly [`MEMORY_SIZE`] bytes
    pub fn new(data: Vec<u8>) -> Result<Self> {
        if data.len() != MEMORY_SIZE {
            return Err(MemoryMapError::WrongSize {
                expected: MEMORY_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Factory-erased image (every byte 0xFF)
    pub fn erased() -> Self {
        Self {
            data: vec![0xFF; MEMORY_SIZE],
        }
    }

    /// Image filled with zeros
    pub fn zeroed() -> Self {
        Self {
            data: vec![0x00; MEMORY_SIZE],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a chunk of memory from @start for @length bytes
    /// If length is None, returns all data from @start to end
    pub fn get(&self, start: usize, length: Option<usize>) -> Result<&[u8]> {
        if start > self.data.len() {
            return Err(MemoryMapError::IndexOutOfBounds(start));
        }

        match length {
            Some(len) => {
                let end = start + len;
                if end > self.data.len() {
                    return Err(MemoryMapError::IndexOutOfBounds(end));
                }
                Ok(&self.data[start..end])
            }
            None => Ok(&self.data[start..]),
        }
    }

    /// Set a byte at position @pos to @value
    pub fn set_byte(&mut self, pos: usize, value: u8) -> Result<()> {
        if pos >= self.data.len() {
            return Err(MemoryMapError::IndexOutOfBounds(pos));
        }
        self.data[pos] = value;
        Ok(())
    }

    /// Set a chunk of bytes starting at @pos
    pub fn set_bytes(&mut self, pos: usize, bytes: &[u8]) -> Result<()> {
        let end = pos + bytes.len();
        if end > self.data.len() {
            return Err(MemoryMapError::IndexOutOfBounds(end));
        }
        self.data[pos..end].copy_from_slice(bytes);
        Ok(())
    }

    // Fixed-address accessors. Callers pass addresses from the driver's
    // field map, which all lie inside the image.

    pub(crate) fn byte(&self, addr: usize) -> u8 {
        self.data[addr]
    }

    pub(crate) fn slice(&self, addr: usize, len: usize) -> &[u8] {
        &self.data[addr..addr + len]
    }

    pub(crate) fn array<const N: usize>(&self, addr: usize) -> [u8; N] {
        std::array::from_fn(|i| self.data[addr + i])
    }

    pub(crate) fn write_byte(&mut self, addr: usize, value: u8) {
        self.data[addr] = value;
    }

    pub(crate) fn write_slice(&mut self, addr: usize, bytes: &[u8]) {
        self.data[addr..addr + bytes.len()].copy_from_slice(bytes);
    }

    pub(crate) fn slice_mut(&mut self, addr: usize, len: usize) -> &mut [u8] {
        &mut self.data[addr..addr + len]
    }

    /// Get the entire image as raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Get a printable hex representation of part of the image
    pub fn printable(&self, start: Option<usize>, end: Option<usize>) -> String {
        let end = end.unwrap_or(self.data.len()).min(self.data.len());
        let start = start.unwrap_or(0).min(end);

        hexdump(&self.data[start..end], start)
    }
}

impl Default for MemoryImage {
    fn default() -> Self {
        Self::erased()
    }
}

impl TryFrom<Vec<u8>> for MemoryImage {
    type Error = MemoryMapError;

    fn try_from(data: Vec<u8>) -> Result<Self> {
        Self::new(data)
    }
}

impl TryFrom<&[u8]> for MemoryImage {
    type Error = MemoryMapError;

    fn try_from(data: &[u8]) -> Result<Self> {
        Self::new(data.to_vec())
    }
}

impl AsRef<[u8]> for MemoryImage {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl fmt::Display for MemoryImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemoryImage({} bytes)", self.data.len())
    }
}

/// Create a hex dump of bytes (similar to hexdump -C), offsets relative to `origin`
fn hexdump(data: &[u8], origin: usize) -> String {
    let mut output = String::new();

    for (i, chunk) in data.chunks(16).enumerate() {
        output.push_str(&format!("{:08x}  ", origin + i * 16));

        for (j, byte) in chunk.iter().enumerate() {
            if j == 8 {
                output.push(' ');
            }
            output.push_str(&format!("{:02x} ", byte));
        }

        // Padding for incomplete lines
        for j in chunk.len()..16 {
            if j == 8 {
                output.push(' ');
            }
            output.push_str("   ");
        }

        output.push_str(" |");
        for &byte in chunk {
            if (0x20..=0x7e).contains(&byte) {
                output.push(byte as char);
            } else {
                output.push('.');
            }
        }
        output.push_str("|\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_creation() {
        let image = MemoryImage::new(vec![0u8; MEMORY_SIZE]).unwrap();
        assert_eq!(image.len(), MEMORY_SIZE);
        assert!(!image.is_empty());

        let erased = MemoryImage::erased();
        assert!(erased.as_bytes().iter().all(|&b| b == 0xFF));
        assert_eq!(MemoryImage::default(), erased);
    }

    #[test]
    fn test_wrong_size_rejected() {
        let err = MemoryImage::new(vec![0u8; 100]).unwrap_err();
        assert_eq!(
            err,
            MemoryMapError::WrongSize {
                expected: MEMORY_SIZE,
                actual: 100
            }
        );
        assert!(MemoryImage::try_from(&[0u8; MEMORY_SIZE + 1][..]).is_err());
    }

    #[test]
    fn test_get_set() {
        let mut image = MemoryImage::zeroed();

        image.set_byte(5, 0x42).unwrap();
        assert_eq!(image.get(5, Some(1)).unwrap()[0], 0x42);

        image.set_bytes(0, &[1, 2, 3]).unwrap();
        assert_eq!(image.get(0, Some(3)).unwrap(), &[1, 2, 3]);

        assert_eq!(image.get(MEMORY_SIZE - 2, None).unwrap(), &[0, 0]);
    }

    #[test]
    fn test_bounds_checking() {
        let mut image = MemoryImage::zeroed();

        assert!(image.get(MEMORY_SIZE + 1, Some(1)).is_err());
        assert!(image.get(MEMORY_SIZE - 2, Some(5)).is_err());
        assert!(image.set_byte(MEMORY_SIZE, 0).is_err());
        assert!(image.set_bytes(MEMORY_SIZE - 1, &[1, 2]).is_err());
    }

    #[test]
    fn test_fixed_accessors() {
        let mut image = MemoryImage::erased();
        image.write_slice(0x10, &[0x25, 0x06, 0x60, 0x44]);
        image.write_byte(0x1C, 3);

        assert_eq!(image.slice(0x10, 4), &[0x25, 0x06, 0x60, 0x44]);
        assert_eq!(image.byte(0x1C), 3);
        assert_eq!(image.array::<4>(0x10), [0x25, 0x06, 0x60, 0x44]);

        image.slice_mut(0x1900, 2).fill(0);
        assert_eq!(image.slice(0x1900, 3), &[0, 0, 0xFF]);
    }

    #[test]
    fn test_clone_is_deep() {
        let base = MemoryImage::erased();
        let mut copy = base.clone();
        copy.write_byte(0, 0);
        assert_eq!(base.byte(0), 0xFF);
    }

    #[test]
    fn test_hexdump() {
        let mut image = MemoryImage::zeroed();
        image.set_bytes(0x10, b"ABC").unwrap();

        let dump = image.printable(Some(0x10), Some(0x20));
        assert!(dump.starts_with("00000010  41 42 43"));
        assert!(dump.contains("|ABC.............|"));
        assert_eq!(dump.lines().count(), 1);
    }
}
