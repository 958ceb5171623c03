// Advisory checks on a codeplug before it is written to a radio
//
// Nothing here blocks encoding; the codec enforces only what the memory
// layout cannot represent.

use super::channel::Channel;
use super::codeplug::Codeplug;
use super::constants::{is_standard_dcs, is_standard_tone};
use super::settings::TxBandLimits;
use super::tone::Tone;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationMessage {
    Warning(String),
    Error(String),
}

impl ValidationMessage {
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationMessage::Error(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationMessage::Warning(_))
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationMessage::Warning(msg) | ValidationMessage::Error(msg) => msg,
        }
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationMessage::Warning(msg) => write!(f, "warning: {}", msg),
            ValidationMessage::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}

fn check_tone(label: &str, tone: &Tone, msgs: &mut Vec<ValidationMessage>) {
    match *tone {
        Tone::Ctcss(hz) if !is_standard_tone(hz) => msgs.push(ValidationMessage::Warning(
            format!("{} CTCSS {:.1} Hz is not a standard tone", label, hz),
        )),
        Tone::Dcs { code, .. } if !is_standard_dcs(code) => msgs.push(
            ValidationMessage::Warning(format!("{} DCS {:03} is not a standard code", label, code)),
        ),
        _ => {}
    }
}

/// Validate one channel against the radio's transmit limits
pub fn validate_channel(channel: &Channel, limits: &TxBandLimits) -> Vec<ValidationMessage> {
    let mut msgs = Vec::new();
    if channel.is_empty() {
        return msgs;
    }

    let label = format!("channel {}", channel.index);

    check_tone(&format!("{} decode", label), &channel.decode, &mut msgs);
    check_tone(&format!("{} encode", label), &channel.encode, &mut msgs);

    if channel.tx_freq != 0.0 && !limits.allows(channel.tx_freq) {
        msgs.push(ValidationMessage::Warning(format!(
            "{} TX {:.5} MHz is outside the transmit bands",
            label, channel.tx_freq
        )));
    }

    if channel.name.chars().any(|c| !c.is_ascii() || c.is_ascii_control()) {
        msgs.push(ValidationMessage::Warning(format!(
            "{} name {:?} contains characters the display may not show",
            label, channel.name
        )));
    }

    msgs
}

/// Validate every channel and VFO of a codeplug
pub fn validate_codeplug(codeplug: &Codeplug) -> Vec<ValidationMessage> {
    let limits = &codeplug.settings.tx_limits;
    let mut msgs: Vec<ValidationMessage> = codeplug
        .channels
        .iter()
        .flat_map(|ch| validate_channel(ch, limits))
        .collect();

    for (label, vfo) in [("VFO A", &codeplug.vfo_a), ("VFO B", &codeplug.vfo_b)] {
        check_tone(&format!("{} RX", label), &vfo.rx_tone, &mut msgs);
        check_tone(&format!("{} TX", label), &vfo.tx_tone, &mut msgs);
    }

    for (i, ch) in codeplug.channels.iter().enumerate() {
        if ch.index != i + 1 {
            msgs.push(ValidationMessage::Error(format!(
                "channel at position {} is numbered {}",
                i + 1,
                ch.index
            )));
        }
    }

    msgs
}

/// Check if validation messages contain any errors
pub fn has_errors(messages: &[ValidationMessage]) -> bool {
    messages.iter().any(|m| m.is_error())
}

/// Check if validation messages contain any warnings
pub fn has_warnings(messages: &[ValidationMessage]) -> bool {
    messages.iter().any(|m| m.is_warning())
}

/// Filter out only error messages
pub fn errors_only(messages: &[ValidationMessage]) -> Vec<String> {
    messages
        .iter()
        .filter(|m| m.is_error())
        .map(|m| m.message().to_string())
        .collect()
}

/// Filter out only warning messages
pub fn warnings_only(messages: &[ValidationMessage]) -> Vec<String> {
    messages
        .iter()
        .filter(|m| m.is_warning())
        .map(|m| m.message().to_string())
        .collect()
}
