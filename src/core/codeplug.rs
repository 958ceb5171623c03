// Complete decoded contents of a memory image

use super::channel::Channel;
use super::constants::CHANNEL_COUNT;
use super::fm::FmChannels;
use super::settings::Settings;
use super::vfo::Vfo;
use serde::{Deserialize, Serialize};

/// Everything the codec reads from and writes to a memory image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Codeplug {
    /// Channels 1..=199, in order (`channels[0]` is channel 1)
    pub channels: Vec<Channel>,
    pub vfo_a: Vfo,
    pub vfo_b: Vfo,
    pub fm_channels: FmChannels,
    pub settings: Settings,
}

impl Codeplug {
    /// Codeplug with every channel empty and default settings
    pub fn new() -> Self {
        Self {
            channels: (1..=CHANNEL_COUNT).map(Channel::empty).collect(),
            vfo_a: Vfo::default(),
            vfo_b: Vfo::default(),
            fm_channels: FmChannels::new(),
            settings: Settings::default(),
        }
    }

    /// Channel by 1-based number
    pub fn channel(&self, index: usize) -> Option<&Channel> {
        index.checked_sub(1).and_then(|i| self.channels.get(i))
    }

    /// Mutable channel by 1-based number
    pub fn channel_mut(&mut self, index: usize) -> Option<&mut Channel> {
        index.checked_sub(1).and_then(|i| self.channels.get_mut(i))
    }

    /// Channels that hold a frequency
    pub fn programmed_channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter().filter(|ch| !ch.is_empty())
    }

    /// Reset a channel to its empty defaults
    pub fn erase_channel(&mut self, index: usize) {
        if let Some(ch) = self.channel_mut(index) {
            *ch = Channel::empty(index);
        }
    }
}

impl Default for Codeplug {
    fn default() -> Self {
        Self::new()
    }
}
