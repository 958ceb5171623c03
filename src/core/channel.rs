// Memory channel as presented to the user

use super::tone::Tone;
use serde::{Deserialize, Serialize};
use std::fmt;

coded_enum! {
    /// Transmit power, byte 14 bit 4 of a channel/VFO record
    pub enum TxPower {
        Low = 0 => "LOW",
        High = 1 => "HIGH",
    }
    default = High;
}

coded_enum! {
    /// Channel bandwidth, byte 14 bit 3 (1 = narrow)
    pub enum Bandwidth {
        Wide = 0 => "W",
        Narrow = 1 => "N",
    }
    default = Wide;
}

coded_enum! {
    /// When the PTT-ID DTMF burst is sent
    pub enum PttId {
        Off = 0 => "OFF",
        Bot = 1 => "BOT",
        Eot = 2 => "EOT",
        Both = 3 => "BOTH",
    }
    default = Off;
}

/// A memory channel, numbered 1..=199.
///
/// A channel is empty iff `rx_freq == 0.0`. Empty channels carry the
/// defaults of [`Channel::empty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel number, 1-based
    pub index: usize,

    /// Receive frequency in MHz (10 Hz resolution)
    pub rx_freq: f64,

    /// Transmit frequency in MHz
    pub tx_freq: f64,

    /// RX squelch tone
    pub decode: Tone,

    /// TX squelch tone
    pub encode: Tone,

    pub tx_power: TxPower,
    pub bandwidth: Bandwidth,
    pub busy_lock: bool,
    pub frequency_hop: bool,
    pub ptt_id: PttId,

    /// Included in memory scan
    pub scan_add: bool,

    /// Up to 8 single-byte characters
    pub name: String,

    /// Voice scrambler level, 0 = off, 1..=16
    pub scramble: u8,
}

impl Channel {
    /// Unprogrammed channel with the radio's defaults
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            rx_freq: 0.0,
            tx_freq: 0.0,
            decode: Tone::Off,
            encode: Tone::Off,
            tx_power: TxPower::High,
            bandwidth: Bandwidth::Wide,
            busy_lock: false,
            frequency_hop: false,
            ptt_id: PttId::Off,
            scan_add: true,
            name: String::new(),
            scramble: 0,
        }
    }

    /// Simplex channel on `freq` MHz with default settings
    pub fn simplex(index: usize, freq: f64) -> Self {
        Self {
            rx_freq: freq,
            tx_freq: freq,
            ..Self::empty(index)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rx_freq == 0.0
    }

    /// Signed TX offset from RX, in MHz
    pub fn offset(&self) -> f64 {
        self.tx_freq - self.rx_freq
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{:3}: (empty)", self.index);
        }
        write!(
            f,
            "{:3}: {:<8} RX {:>10.5} TX {:>10.5} {:>6}/{:<6} {} {}",
            self.index,
            self.name,
            self.rx_freq,
            self.tx_freq,
            self.decode,
            self.encode,
            self.tx_power,
            self.bandwidth
        )
    }
}
