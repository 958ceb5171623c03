// Binary building blocks for the radio memory image

pub mod bcd;
pub mod bits;
pub mod parser;

pub use bcd::{
    decode_freq_le4, decode_tenths_be2, decode_tenths_le2, encode_freq_le4, encode_tenths_be2,
    encode_tenths_le2, BcdError,
};
pub use bits::{bitmap_get, bitmap_set, BitField};
pub use parser::{encode_terminated_string, parse_terminated_string};
