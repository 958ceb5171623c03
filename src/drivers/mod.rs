// Radio driver framework
pub mod traits;

// Drivers
pub mod h3plus;

pub use h3plus::H3PlusRadio;
pub use traits::{CodecError, CodecResult, ImageCodec};
