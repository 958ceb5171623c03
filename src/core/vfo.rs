// VFO (free-tuning) state for the A and B sides

use super::channel::{Bandwidth, TxPower};
use super::tone::Tone;
use serde::{Deserialize, Serialize};

coded_enum! {
    /// Repeater shift direction, byte 14 bits 0-1 of a VFO record
    pub enum OffsetDirection {
        Off = 0 => "OFF",
        Minus = 1 => "-",
        Plus = 2 => "+",
    }
    default = Off;
}

/// One VFO. TX frequency is not stored; see [`Vfo::tx_freq`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vfo {
    /// Receive frequency in MHz
    pub rx_freq: f64,
    pub rx_tone: Tone,
    pub tx_tone: Tone,
    pub scramble: u8,
    pub busy_lock: bool,
    pub bandwidth: Bandwidth,
    pub tx_power: TxPower,
    pub offset_dir: OffsetDirection,
    /// Repeater offset in MHz
    pub offset: f64,
}

impl Vfo {
    /// Transmit frequency derived from RX, offset and direction
    pub fn tx_freq(&self) -> f64 {
        match self.offset_dir {
            OffsetDirection::Off => self.rx_freq,
            OffsetDirection::Minus => self.rx_freq - self.offset,
            OffsetDirection::Plus => self.rx_freq + self.offset,
        }
    }
}

impl Default for Vfo {
    fn default() -> Self {
        Self {
            rx_freq: 0.0,
            rx_tone: Tone::Off,
            tx_tone: Tone::Off,
            scramble: 0,
            busy_lock: false,
            bandwidth: Bandwidth::Wide,
            tx_power: TxPower::High,
            offset_dir: OffsetDirection::Off,
            offset: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_freq() {
        let mut vfo = Vfo {
            rx_freq: 145.5,
            offset: 0.6,
            ..Vfo::default()
        };
        assert_eq!(vfo.tx_freq(), 145.5);

        vfo.offset_dir = OffsetDirection::Minus;
        assert!((vfo.tx_freq() - 144.9).abs() < 1e-9);

        vfo.offset_dir = OffsetDirection::Plus;
        assert!((vfo.tx_freq() - 146.1).abs() < 1e-9);
    }

    #[test]
    fn test_offset_direction_codes() {
        assert_eq!(OffsetDirection::from_code(2), Some(OffsetDirection::Plus));
        assert_eq!(OffsetDirection::from_code(3), None);
        assert_eq!(OffsetDirection::from_code_lossy(3), OffsetDirection::Off);
        assert_eq!(OffsetDirection::Minus.to_string(), "-");
    }
}
