// H3PLUS-RS: memory image codec for the TIDRADIO TD-H3 Plus
// Copyright 2024 - Licensed under GPLv3

pub mod bitwise;
pub mod core;
pub mod drivers;
pub mod formats;
pub mod memmap;

// Re-export commonly used types
pub use bitwise::BcdError;
pub use crate::core::{constants::*, validation, Channel, Codeplug, Settings, Tone, Vfo};
pub use drivers::h3plus::{decode, encode, encode_bytes};
pub use drivers::{CodecError, CodecResult, H3PlusRadio, ImageCodec};
pub use formats::{export_json, import_json, load_image, save_image};
pub use memmap::{MemoryImage, MEMORY_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
