// Radio-wide settings
//
// One field per menu item. The byte address and bit range of each field
// live in the driver's field map; this module only defines the values.

use super::constants::{ANI_LENGTH, DTMF_GROUP_COUNT, MESSAGE_COUNT};
use super::dtmf::DtmfCode;
use serde::{Deserialize, Serialize};

coded_enum! {
    pub enum Modulation {
        Fm = 0 => "FM",
        Am = 1 => "AM",
    }
    default = Fm;
}

coded_enum! {
    /// PF1/PF2 short-press action
    pub enum ShortKeyAction {
        Unassigned = 0 => "NONE",
        FmRadio = 1 => "FM RADIO",
        Lamp = 2 => "LAMP",
        Tone = 3 => "TONE",
        Alarm = 4 => "ALARM",
        Weather = 5 => "WEATHER",
        Ptt2 = 7 => "PTT2",
        OdPtt = 8 => "OD PTT",
    }
    default = Unassigned;
}

coded_enum! {
    /// PF1/PF2 long-press action
    pub enum LongKeyAction {
        Unassigned = 0 => "NONE",
        FmRadio = 1 => "FM RADIO",
        Lamp = 2 => "LAMP",
        CancelSquelch = 3 => "CANCEL SQ",
        Tone = 4 => "TONE",
        Alarm = 5 => "ALARM",
        Weather = 6 => "WEATHER",
    }
    default = Unassigned;
}

coded_enum! {
    /// D-HOLD: how long DTMF decode stays open
    pub enum DtmfHold {
        Off = 0 => "OFF",
        Sec5 = 1 => "5S",
        Sec10 = 2 => "10S",
        Sec15 = 3 => "15S",
    }
    default = Off;
}

coded_enum! {
    /// D-RSP: response to a matched DTMF call
    pub enum DtmfResponse {
        Null = 0 => "NULL",
        Ring = 1 => "RING",
        Reply = 2 => "REPLY",
        Both = 3 => "BOTH",
    }
    default = Null;
}

coded_enum! {
    /// Scan resume mode
    pub enum ScanMode {
        Time = 0 => "TO",
        Carrier = 1 => "CO",
        Search = 2 => "SE",
    }
    default = Time;
}

coded_enum! {
    /// What a channel-mode display line shows
    pub enum ChannelDisplay {
        Frequency = 0 => "FREQ",
        Name = 1 => "NAME",
    }
    default = Frequency;
}

coded_enum! {
    pub enum ToneBurst {
        Hz1000 = 0 => "1000HZ",
        Hz1450 = 1 => "1450HZ",
        Hz1750 = 2 => "1750HZ",
        Hz2100 = 3 => "2100HZ",
    }
    default = Hz1000;
}

coded_enum! {
    /// Broadcast FM receiver mode
    pub enum FmMode {
        Vfo = 0 => "VFO",
        Channel = 1 => "CHANNEL",
    }
    default = Vfo;
}

coded_enum! {
    pub enum PowerOnDisplay {
        Voltage = 0 => "VOLTAGE",
        Message = 1 => "MESSAGE",
        Picture = 2 => "PICTURE",
    }
    default = Voltage;
}

coded_enum! {
    /// Tuning step, upper nibble of 0x0CA8
    pub enum StepFrequency {
        Khz2_5 = 0 => "2.5K",
        Khz5 = 1 => "5K",
        Khz6_25 = 2 => "6.25K",
        Khz10 = 3 => "10K",
        Khz12_5 = 4 => "12.5K",
        Khz25 = 5 => "25K",
        Khz50 = 6 => "50K",
        Khz0_5 = 7 => "0.5K",
        Khz8_33 = 8 => "8.33K",
    }
    default = Khz2_5;
}

coded_enum! {
    pub enum RogerBeep {
        Off = 0 => "OFF",
        Tone1 = 1 => "TONE1",
        Tone2 = 2 => "TONE2",
    }
    default = Off;
}

coded_enum! {
    pub enum Backlight {
        Always = 0 => "ALWAYS",
        Sec5 = 1 => "5S",
        Sec10 = 2 => "10S",
        Sec15 = 3 => "15S",
        Sec30 = 4 => "30S",
    }
    default = Always;
}

coded_enum! {
    pub enum VoxDelay {
        Sec1 = 0 => "1.0S",
        Sec2 = 1 => "2.0S",
        Sec3 = 2 => "3.0S",
    }
    default = Sec1;
}

coded_enum! {
    pub enum BreathLed {
        Off = 0 => "OFF",
        Sec5 = 1 => "5S",
        Sec10 = 2 => "10S",
        Sec15 = 3 => "15S",
        Sec30 = 4 => "30S",
    }
    default = Off;
}

coded_enum! {
    /// DTMF group code selector at 0x1829
    pub enum GroupCode {
        Blank = 0x00 => "",
        A = 0x0A => "A",
        B = 0x0B => "B",
        C = 0x0C => "C",
        D = 0x0D => "D",
        Star = 0x0E => "*",
        Hash = 0x0F => "#",
        Off = 0xFF => "OFF",
    }
    default = Off;
}

coded_enum! {
    /// Menu language
    pub enum Language {
        English = 0 => "EN",
        Chinese = 1 => "CN",
        Turkish = 2 => "TR",
        Russian = 3 => "RU",
        German = 4 => "DE",
        Spanish = 5 => "ES",
        Italian = 6 => "IT",
        French = 7 => "FR",
    }
    default = English;
}

coded_enum! {
    /// Main screen layout
    pub enum DisplayMode {
        Single = 0 => "SINGLE",
        Dual = 1 => "DUAL",
        Classic = 2 => "CLASSIC",
    }
    default = Single;
}

coded_enum! {
    pub enum ActiveVfo {
        A = 0 => "A",
        B = 1 => "B",
    }
    default = A;
}

coded_enum! {
    pub enum AlarmMode {
        OnSite = 0 => "ON SITE",
        TxAlarm = 2 => "TX ALARM",
    }
    default = OnSite;
}

/// Transmit band edges in MHz (0.1 MHz resolution)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TxBandLimits {
    pub vhf_low: f64,
    pub vhf_high: f64,
    pub uhf_low: f64,
    pub uhf_high: f64,
}

impl TxBandLimits {
    /// Check whether `mhz` falls inside either transmit band
    pub fn allows(&self, mhz: f64) -> bool {
        (self.vhf_low..=self.vhf_high).contains(&mhz)
            || (self.uhf_low..=self.uhf_high).contains(&mhz)
    }
}

/// Every radio-wide setting the codec owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub modulation: Modulation,

    // Programmable keys
    pub pf1_short: ShortKeyAction,
    pub pf2_short: ShortKeyAction,
    pub pf1_long: LongKeyAction,
    pub pf2_long: LongKeyAction,

    // DTMF decode behaviour
    pub dcd: bool,
    pub dtmf_hold: DtmfHold,
    pub dtmf_response: DtmfResponse,
    /// 0..=7, 80 ms + 10 ms per step
    pub dtmf_speed: u8,
    pub dtmf_side_tone: bool,

    /// Display brightness 0..=5 (stored inverted)
    pub brightness: u8,

    pub voice_prompt: bool,
    pub beep: bool,
    pub auto_lock: bool,
    pub scan_mode: ScanMode,

    pub display_type_a: ChannelDisplay,
    pub display_type_b: ChannelDisplay,
    pub fm_interrupt: bool,
    pub tone_burst: ToneBurst,
    pub fm_mode: FmMode,
    pub dual_watch: bool,
    pub power_on_display: PowerOnDisplay,

    /// 0 = off, 1..=5
    pub vox_level: u8,
    pub vox_delay: VoxDelay,
    pub stun: bool,
    pub kill: bool,

    pub step: StepFrequency,
    /// 0..=9
    pub squelch: u8,
    /// Transmit timeout, 0 = off, 1..=7 in 30 s steps
    pub tot: u8,
    pub roger: RogerBeep,
    pub tx_200: bool,
    pub tx_350: bool,
    pub tx_500: bool,
    /// 0 = off, 1..=4
    pub power_save: u8,
    pub backlight: Backlight,
    pub am_band: bool,
    pub breath_led: BreathLed,
    pub only_ch_mode: bool,

    pub tx_limits: TxBandLimits,

    /// FM receiver VFO frequency in MHz
    pub fm_vfo_freq: f64,

    /// ANI-Edit, three decimal digits
    pub ani: String,
    pub stun_code: DtmfCode,
    pub kill_code: DtmfCode,
    pub group_code: GroupCode,
    pub group_calls: [DtmfCode; DTMF_GROUP_COUNT],
    pub bot_code: DtmfCode,
    pub eot_code: DtmfCode,

    /// Power-on messages, up to 16 characters each
    pub messages: [String; MESSAGE_COUNT],

    /// Repeater squelch tail elimination, 0 = off, 1..=10 s
    pub rp_ste: u8,
    /// Repeater tone delay, 0 = off, 1..=10 s
    pub rp_tone_delay: u8,

    /// 0..=9
    pub mic_gain: u8,
    pub language: Language,
    pub display_mode: DisplayMode,
    /// Menu colour scheme 0..=17
    pub menu_color: u8,

    /// Scan range upper edge, MHz
    pub scan_upper: u16,
    /// Scan range lower edge, MHz
    pub scan_lower: u8,
    /// 0..=19, half-second steps starting at 0.5 s
    pub scan_hang_time: u8,

    pub active_vfo: ActiveVfo,
    pub ste: bool,
    pub alarm_mode: AlarmMode,
    /// 0..=63, (value + 1) * 100 ms
    pub ptt_delay: u8,
    pub talk_around: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            modulation: Default::default(),
            pf1_short: Default::default(),
            pf2_short: Default::default(),
            pf1_long: Default::default(),
            pf2_long: Default::default(),
            dcd: false,
            dtmf_hold: Default::default(),
            dtmf_response: Default::default(),
            dtmf_speed: 0,
            dtmf_side_tone: false,
            brightness: 0,
            voice_prompt: false,
            beep: false,
            auto_lock: false,
            scan_mode: Default::default(),
            display_type_a: Default::default(),
            display_type_b: Default::default(),
            fm_interrupt: false,
            tone_burst: Default::default(),
            fm_mode: Default::default(),
            dual_watch: false,
            power_on_display: Default::default(),
            vox_level: 0,
            vox_delay: Default::default(),
            stun: false,
            kill: false,
            step: Default::default(),
            squelch: 0,
            tot: 0,
            roger: Default::default(),
            tx_200: false,
            tx_350: false,
            tx_500: false,
            power_save: 0,
            backlight: Default::default(),
            am_band: false,
            breath_led: Default::default(),
            only_ch_mode: false,
            tx_limits: Default::default(),
            fm_vfo_freq: 0.0,
            ani: "0".repeat(ANI_LENGTH),
            stun_code: Default::default(),
            kill_code: Default::default(),
            group_code: Default::default(),
            group_calls: Default::default(),
            bot_code: Default::default(),
            eot_code: Default::default(),
            messages: Default::default(),
            rp_ste: 0,
            rp_tone_delay: 0,
            mic_gain: 0,
            language: Default::default(),
            display_mode: Default::default(),
            menu_color: 0,
            scan_upper: 0,
            scan_lower: 0,
            scan_hang_time: 0,
            active_vfo: Default::default(),
            ste: false,
            alarm_mode: Default::default(),
            ptt_delay: 0,
            talk_around: false,
        }
    }
}

impl Settings {
    pub fn tot_seconds(&self) -> u32 {
        self.tot as u32 * 30
    }

    pub fn dtmf_speed_ms(&self) -> u32 {
        80 + self.dtmf_speed as u32 * 10
    }

    pub fn ptt_delay_ms(&self) -> u32 {
        (self.ptt_delay as u32 + 1) * 100
    }

    pub fn scan_hang_seconds(&self) -> f64 {
        (self.scan_hang_time as f64 + 1.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_action_gap() {
        // Short-press code 6 is unassigned
        assert_eq!(ShortKeyAction::from_code(6), None);
        assert_eq!(ShortKeyAction::from_code(7), Some(ShortKeyAction::Ptt2));
        assert_eq!(LongKeyAction::from_code(3), Some(LongKeyAction::CancelSquelch));
        assert_eq!(ShortKeyAction::from_code_lossy(6), ShortKeyAction::Unassigned);
    }

    #[test]
    fn test_group_code() {
        assert_eq!(GroupCode::from_code(0xFF), Some(GroupCode::Off));
        assert_eq!(GroupCode::from_code(0x00), Some(GroupCode::Blank));
        assert_eq!(GroupCode::Star.code(), 0x0E);
        assert_eq!(GroupCode::from_code(0x05), None);
        assert_eq!(GroupCode::default(), GroupCode::Off);
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(StepFrequency::from_code(8), Some(StepFrequency::Khz8_33));
        assert_eq!(StepFrequency::Khz6_25.to_string(), "6.25K");
        assert_eq!(StepFrequency::ALL.len(), 9);
    }

    #[test]
    fn test_default_ani_is_three_digits() {
        assert_eq!(Settings::default().ani, "000");
    }

    #[test]
    fn test_derived_units() {
        let settings = Settings {
            tot: 4,
            dtmf_speed: 7,
            ptt_delay: 0,
            scan_hang_time: 19,
            ..Settings::default()
        };
        assert_eq!(settings.tot_seconds(), 120);
        assert_eq!(settings.dtmf_speed_ms(), 150);
        assert_eq!(settings.ptt_delay_ms(), 100);
        assert_eq!(settings.scan_hang_seconds(), 10.0);
    }

    #[test]
    fn test_band_limits() {
        let limits = TxBandLimits {
            vhf_low: 144.0,
            vhf_high: 148.0,
            uhf_low: 420.0,
            uhf_high: 450.0,
        };
        assert!(limits.allows(146.52));
        assert!(limits.allows(446.00625));
        assert!(!limits.allows(162.55));
    }

    #[test]
    fn test_settings_serde() {
        let mut settings = Settings::default();
        settings.language = Language::German;
        settings.stun_code = "12345".parse().unwrap();
        settings.messages[0] = "HELLO".to_string();

        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"language\":\"German\""));
        assert!(json.contains("\"stun_code\":\"12345\""));

        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
