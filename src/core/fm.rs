// Broadcast FM receiver presets

use super::constants::{FM_CHANNEL_COUNT, FM_MAX_MHZ, FM_MIN_MHZ};
use serde::{Deserialize, Serialize};

/// Check whether `mhz` lies in the broadcast FM band
pub fn in_fm_band(mhz: f64) -> bool {
    (FM_MIN_MHZ..=FM_MAX_MHZ).contains(&mhz)
}

/// The 25 FM presets, in MHz with 0.1 MHz resolution. `0.0` marks an unused slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FmChannels(Vec<f64>);

impl FmChannels {
    /// All presets unused
    pub fn new() -> Self {
        Self(vec![0.0; FM_CHANNEL_COUNT])
    }

    pub fn from_vec(freqs: Vec<f64>) -> Self {
        Self(freqs)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Frequency of preset `index` (0-based)
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Set preset `index` (0-based); out-of-range indexes are ignored
    pub fn set(&mut self, index: usize, mhz: f64) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = mhz;
        }
    }

    pub fn clear(&mut self, index: usize) {
        self.set(index, 0.0);
    }

    /// A preset is populated when it holds a non-zero frequency
    pub fn is_populated(&self, index: usize) -> bool {
        self.get(index).is_some_and(|f| f != 0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Default for FmChannels {
    fn default() -> Self {
        Self::new()
    }
}
