// Memory image codec traits and errors

use crate::bitwise::bcd::BcdError;
use crate::core::{Codeplug, DtmfError, ToneError};
use crate::memmap::{MemoryImage, MemoryMapError};
use thiserror::Error;

/// Reasons an encode is refused. Every variant names the offending field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Base image must be {expected} bytes, got {actual}")]
    ImageSize { expected: usize, actual: usize },

    #[error("{field}: {name:?} is longer than {max} characters")]
    NameTooLong {
        field: String,
        name: String,
        max: usize,
    },

    #[error("{field}: character {ch:?} cannot be stored")]
    InvalidCharacter { field: String, ch: char },

    #[error("{field}: {value} is out of range (expected {expected})")]
    OutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    #[error("{field}: {source}")]
    Frequency { field: String, source: BcdError },

    #[error("{field}: {source}")]
    Tone { field: String, source: ToneError },

    #[error("{field}: {source}")]
    Dtmf { field: String, source: DtmfError },

    #[error("Codeplug has {actual} channels, expected {expected}")]
    ChannelCount { expected: usize, actual: usize },

    #[error("Codeplug has {actual} FM channels, expected {expected}")]
    FmChannelCount { expected: usize, actual: usize },

    #[error("Memory access error: {0}")]
    Memory(MemoryMapError),
}

impl From<MemoryMapError> for CodecError {
    fn from(err: MemoryMapError) -> Self {
        match err {
            MemoryMapError::WrongSize { expected, actual } => {
                CodecError::ImageSize { expected, actual }
            }
            other => CodecError::Memory(other),
        }
    }
}

impl CodecError {
    pub(crate) fn out_of_range(
        field: impl Into<String>,
        value: impl ToString,
        expected: impl Into<String>,
    ) -> Self {
        CodecError::OutOfRange {
            field: field.into(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Path of the field that caused the error, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CodecError::NameTooLong { field, .. }
            | CodecError::InvalidCharacter { field, .. }
            | CodecError::OutOfRange { field, .. }
            | CodecError::Frequency { field, .. }
            | CodecError::Tone { field, .. }
            | CodecError::Dtmf { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// A radio whose whole memory is exchanged as one image
///
/// Decoding is total; encoding writes over a copy of a base image so that
/// bytes outside the model survive.
pub trait ImageCodec: Send + Sync {
    /// Get the radio vendor name
    fn vendor(&self) -> &str;

    /// Get the radio model name
    fn model(&self) -> &str;

    /// Get a printable name for this radio
    fn get_name(&self) -> String {
        format!("{} {}", self.vendor(), self.model())
    }

    /// Size of the radio's memory image in bytes
    fn memsize(&self) -> usize;

    /// Decode an image into a codeplug. Never fails.
    fn decode(&self, image: &MemoryImage) -> Codeplug;

    /// Encode a codeplug over `base`, returning a new image
    fn encode(&self, codeplug: &Codeplug, base: &MemoryImage) -> CodecResult<MemoryImage>;

    /// Check if this driver matches a given file
    fn match_model(data: &[u8], filename: &str) -> bool
    where
        Self: Sized;
}
