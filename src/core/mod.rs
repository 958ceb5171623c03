// Core model of the radio's programmable state

/// Declare a closed enum backed by a one-byte code.
///
/// Generates `code()`, `from_code()`, `from_code_lossy()` (unknown codes
/// fall back to the default variant), `ALL`, `Default` and a `Display`
/// that prints the radio's menu label.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal ),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn code(self) -> u8 {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }

            pub fn from_code_lossy(code: u8) -> Self {
                Self::from_code(code).unwrap_or_else(|| {
                    tracing::debug!(
                        "Unknown {} code {:#04x}, using default",
                        stringify!($name),
                        code
                    );
                    Self::default()
                })
            }

            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

pub mod channel;
pub mod codeplug;
pub mod constants;
pub mod dtmf;
pub mod fm;
pub mod settings;
pub mod tone;
pub mod validation;
pub mod vfo;

pub use channel::{Bandwidth, Channel, PttId, TxPower};
pub use codeplug::Codeplug;
pub use constants::*;
pub use dtmf::{DtmfCode, DtmfDigit, DtmfError};
pub use fm::FmChannels;
pub use settings::Settings;
pub use tone::{Tone, ToneError};
pub use validation::ValidationMessage;
pub use vfo::{OffsetDirection, Vfo};
