// Raw .h3p memory image files
//
// A saved image is the radio's memory and nothing else: exactly 16,384
// bytes, no header and no trailing metadata.

use crate::memmap::{MemoryImage, MEMORY_SIZE};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;

pub use crate::drivers::h3plus::H3P_EXTENSION;

#[derive(Error, Debug)]
pub enum ImageFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image file must be {expected} bytes, got {actual}")]
    Size { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ImageFileError>;

/// Load a raw image file
pub fn load_image(filename: impl AsRef<Path>) -> Result<MemoryImage> {
    let path = filename.as_ref();
    let mut file = File::open(path)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;

    let actual = data.len();
    let image = MemoryImage::new(data).map_err(|_| ImageFileError::Size {
        expected: MEMORY_SIZE,
        actual,
    })?;

    tracing::info!("Loaded {} bytes from {}", actual, path.display());
    Ok(image)
}

/// Save an image as a raw file
pub fn save_image(filename: impl AsRef<Path>, image: &MemoryImage) -> Result<()> {
    let path = filename.as_ref();
    let mut file = File::create(path)?;
    file.write_all(image.as_bytes())?;

    tracing::info!("Saved {} bytes to {}", image.len(), path.display());
    Ok(())
}
