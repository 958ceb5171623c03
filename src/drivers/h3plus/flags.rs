// Packed settings bytes
//
// Each byte that carries several settings is a small struct. Decoding
// reads the byte once; encoding replaces only the bits in MASK and keeps
// the rest of the base byte.

use crate::bitwise::bits::BitField;
use crate::core::settings::{
    AlarmMode, BreathLed, ChannelDisplay, FmMode, PowerOnDisplay, RogerBeep, ScanMode, Settings,
    StepFrequency, ToneBurst,
};
use crate::memmap::MemoryImage;

pub trait PackedByte: Sized {
    /// Address of the byte
    const ADDR: usize;
    /// Bits owned by this struct
    const MASK: u8;

    fn unpack(byte: u8) -> Self;
    fn pack(&self) -> u8;

    fn read(image: &MemoryImage) -> Self {
        Self::unpack(image.byte(Self::ADDR))
    }

    fn write(&self, image: &mut MemoryImage) {
        let base = image.byte(Self::ADDR);
        image.write_byte(Self::ADDR, (base & !Self::MASK) | (self.pack() & Self::MASK));
    }
}

/// 0x0CA0: only the DTMF side tone bit is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DtmfFlags {
    pub side_tone: bool,
}

impl DtmfFlags {
    const SIDE_TONE: BitField = BitField::flag(1);
}

impl PackedByte for DtmfFlags {
    const ADDR: usize = 0x0CA0;
    const MASK: u8 = Self::SIDE_TONE.mask();

    fn unpack(byte: u8) -> Self {
        Self {
            side_tone: Self::SIDE_TONE.is_set(byte),
        }
    }

    fn pack(&self) -> u8 {
        Self::SIDE_TONE.put_bool(0, self.side_tone)
    }
}

/// 0x0CA1: voice prompt, key beep, auto lock, scan mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PromptFlags {
    pub voice: bool,
    pub beep: bool,
    pub auto_lock: bool,
    pub scan_mode: ScanMode,
}

impl PromptFlags {
    const VOICE: BitField = BitField::flag(0);
    const BEEP: BitField = BitField::flag(2);
    const AUTO_LOCK: BitField = BitField::flag(4);
    const SCAN_MODE: BitField = BitField::new(6, 2);
}

impl PackedByte for PromptFlags {
    const ADDR: usize = 0x0CA1;
    const MASK: u8 =
        Self::VOICE.mask() | Self::BEEP.mask() | Self::AUTO_LOCK.mask() | Self::SCAN_MODE.mask();

    fn unpack(byte: u8) -> Self {
        Self {
            voice: Self::VOICE.is_set(byte),
            beep: Self::BEEP.is_set(byte),
            auto_lock: Self::AUTO_LOCK.is_set(byte),
            scan_mode: ScanMode::from_code_lossy(Self::SCAN_MODE.get(byte)),
        }
    }

    fn pack(&self) -> u8 {
        let mut byte = Self::VOICE.put_bool(0, self.voice);
        byte = Self::BEEP.put_bool(byte, self.beep);
        byte = Self::AUTO_LOCK.put_bool(byte, self.auto_lock);
        Self::SCAN_MODE.put(byte, self.scan_mode.code())
    }
}

/// 0x0CA2: display type A, FM interrupt, tone burst, FM mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayAFlags {
    pub display_type_a: ChannelDisplay,
    pub fm_interrupt: bool,
    pub tone_burst: ToneBurst,
    pub fm_mode: FmMode,
}

impl DisplayAFlags {
    const DISPLAY_TYPE: BitField = BitField::flag(2);
    const FM_INTERRUPT: BitField = BitField::flag(3);
    const TONE_BURST: BitField = BitField::new(4, 2);
    const FM_MODE: BitField = BitField::flag(7);
}

impl PackedByte for DisplayAFlags {
    const ADDR: usize = 0x0CA2;
    const MASK: u8 = Self::DISPLAY_TYPE.mask()
        | Self::FM_INTERRUPT.mask()
        | Self::TONE_BURST.mask()
        | Self::FM_MODE.mask();

    fn unpack(byte: u8) -> Self {
        Self {
            display_type_a: ChannelDisplay::from_code_lossy(Self::DISPLAY_TYPE.get(byte)),
            fm_interrupt: Self::FM_INTERRUPT.is_set(byte),
            tone_burst: ToneBurst::from_code_lossy(Self::TONE_BURST.get(byte)),
            fm_mode: FmMode::from_code_lossy(Self::FM_MODE.get(byte)),
        }
    }

    fn pack(&self) -> u8 {
        let mut byte = Self::DISPLAY_TYPE.put(0, self.display_type_a.code());
        byte = Self::FM_INTERRUPT.put_bool(byte, self.fm_interrupt);
        byte = Self::TONE_BURST.put(byte, self.tone_burst.code());
        Self::FM_MODE.put(byte, self.fm_mode.code())
    }
}

/// 0x0CA3: dual watch, display type B, power-on display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayBFlags {
    pub dual_watch: bool,
    pub display_type_b: ChannelDisplay,
    pub power_on_display: PowerOnDisplay,
}

impl DisplayBFlags {
    const DUAL_WATCH: BitField = BitField::flag(2);
    const DISPLAY_TYPE: BitField = BitField::flag(4);
    const POWER_ON: BitField = BitField::new(6, 2);
}

impl PackedByte for DisplayBFlags {
    const ADDR: usize = 0x0CA3;
    const MASK: u8 = Self::DUAL_WATCH.mask() | Self::DISPLAY_TYPE.mask() | Self::POWER_ON.mask();

    fn unpack(byte: u8) -> Self {
        Self {
            dual_watch: Self::DUAL_WATCH.is_set(byte),
            display_type_b: ChannelDisplay::from_code_lossy(Self::DISPLAY_TYPE.get(byte)),
            power_on_display: PowerOnDisplay::from_code_lossy(Self::POWER_ON.get(byte)),
        }
    }

    fn pack(&self) -> u8 {
        let mut byte = Self::DUAL_WATCH.put_bool(0, self.dual_watch);
        byte = Self::DISPLAY_TYPE.put(byte, self.display_type_b.code());
        Self::POWER_ON.put(byte, self.power_on_display.code())
    }
}

/// 0x0CA7: VOX level, stun, kill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoxFlags {
    pub vox_level: u8,
    pub stun: bool,
    pub kill: bool,
}

impl VoxFlags {
    pub const VOX_LEVEL: BitField = BitField::new(0, 3);
    const STUN: BitField = BitField::flag(3);
    const KILL: BitField = BitField::flag(4);
}

impl PackedByte for VoxFlags {
    const ADDR: usize = 0x0CA7;
    const MASK: u8 = Self::VOX_LEVEL.mask() | Self::STUN.mask() | Self::KILL.mask();

    fn unpack(byte: u8) -> Self {
        Self {
            vox_level: Self::VOX_LEVEL.get(byte),
            stun: Self::STUN.is_set(byte),
            kill: Self::KILL.is_set(byte),
        }
    }

    fn pack(&self) -> u8 {
        let mut byte = Self::VOX_LEVEL.put(0, self.vox_level);
        byte = Self::STUN.put_bool(byte, self.stun);
        Self::KILL.put_bool(byte, self.kill)
    }
}

/// 0x0CA8: tuning step in the upper nibble
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepByte {
    pub step: StepFrequency,
}

impl StepByte {
    const STEP: BitField = BitField::new(4, 4);
}

impl PackedByte for StepByte {
    const ADDR: usize = 0x0CA8;
    const MASK: u8 = Self::STEP.mask();

    fn unpack(byte: u8) -> Self {
        Self {
            step: StepFrequency::from_code_lossy(Self::STEP.get(byte)),
        }
    }

    fn pack(&self) -> u8 {
        Self::STEP.put(0, self.step.code())
    }
}

/// 0x0CAB: roger beep and the 200/350/500 MHz TX enables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxFlags {
    pub roger: RogerBeep,
    pub tx_200: bool,
    pub tx_350: bool,
    pub tx_500: bool,
}

impl TxFlags {
    const TX_500: BitField = BitField::flag(2);
    const TX_350: BitField = BitField::flag(3);
    const TX_200: BitField = BitField::flag(4);
    const ROGER: BitField = BitField::new(6, 2);
}

impl PackedByte for TxFlags {
    const ADDR: usize = 0x0CAB;
    const MASK: u8 =
        Self::TX_500.mask() | Self::TX_350.mask() | Self::TX_200.mask() | Self::ROGER.mask();

    fn unpack(byte: u8) -> Self {
        Self {
            roger: RogerBeep::from_code_lossy(Self::ROGER.get(byte)),
            tx_200: Self::TX_200.is_set(byte),
            tx_350: Self::TX_350.is_set(byte),
            tx_500: Self::TX_500.is_set(byte),
        }
    }

    fn pack(&self) -> u8 {
        let mut byte = Self::TX_500.put_bool(0, self.tx_500);
        byte = Self::TX_350.put_bool(byte, self.tx_350);
        byte = Self::TX_200.put_bool(byte, self.tx_200);
        Self::ROGER.put(byte, self.roger.code())
    }
}

/// 0x0CAF: AM band, breath LED, only-channel mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedFlags {
    pub am_band: bool,
    pub breath_led: BreathLed,
    pub only_ch_mode: bool,
}

impl LedFlags {
    const AM_BAND: BitField = BitField::flag(1);
    const BREATH_LED: BitField = BitField::new(4, 3);
    const ONLY_CH_MODE: BitField = BitField::flag(7);
}

impl PackedByte for LedFlags {
    const ADDR: usize = 0x0CAF;
    const MASK: u8 = Self::AM_BAND.mask() | Self::BREATH_LED.mask() | Self::ONLY_CH_MODE.mask();

    fn unpack(byte: u8) -> Self {
        Self {
            am_band: Self::AM_BAND.is_set(byte),
            breath_led: BreathLed::from_code_lossy(Self::BREATH_LED.get(byte)),
            only_ch_mode: Self::ONLY_CH_MODE.is_set(byte),
        }
    }

    fn pack(&self) -> u8 {
        let mut byte = Self::AM_BAND.put_bool(0, self.am_band);
        byte = Self::BREATH_LED.put(byte, self.breath_led.code());
        Self::ONLY_CH_MODE.put_bool(byte, self.only_ch_mode)
    }
}

/// 0x300A: squelch tail elimination and alarm mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmFlags {
    pub ste: bool,
    pub alarm_mode: AlarmMode,
}

impl AlarmFlags {
    const ALARM_MODE: BitField = BitField::new(4, 2);
    const STE: BitField = BitField::flag(7);
}

impl PackedByte for AlarmFlags {
    const ADDR: usize = 0x300A;
    const MASK: u8 = Self::ALARM_MODE.mask() | Self::STE.mask();

    fn unpack(byte: u8) -> Self {
        Self {
            ste: Self::STE.is_set(byte),
            alarm_mode: AlarmMode::from_code_lossy(Self::ALARM_MODE.get(byte)),
        }
    }

    fn pack(&self) -> u8 {
        let byte = Self::ALARM_MODE.put(0, self.alarm_mode.code());
        Self::STE.put_bool(byte, self.ste)
    }
}

/// 0x300B: PTT delay in the low six bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PttDelayByte {
    pub ptt_delay: u8,
}

impl PttDelayByte {
    pub const DELAY: BitField = BitField::new(0, 6);
}

impl PackedByte for PttDelayByte {
    const ADDR: usize = 0x300B;
    const MASK: u8 = Self::DELAY.mask();

    fn unpack(byte: u8) -> Self {
        Self {
            ptt_delay: Self::DELAY.get(byte),
        }
    }

    fn pack(&self) -> u8 {
        Self::DELAY.put(0, self.ptt_delay)
    }
}

/// Fill the packed-byte fields of `settings` from `image`
pub fn read_packed(image: &MemoryImage, settings: &mut Settings) {
    let dtmf = DtmfFlags::read(image);
    settings.dtmf_side_tone = dtmf.side_tone;

    let prompt = PromptFlags::read(image);
    settings.voice_prompt = prompt.voice;
    settings.beep = prompt.beep;
    settings.auto_lock = prompt.auto_lock;
    settings.scan_mode = prompt.scan_mode;

    let display_a = DisplayAFlags::read(image);
    settings.display_type_a = display_a.display_type_a;
    settings.fm_interrupt = display_a.fm_interrupt;
    settings.tone_burst = display_a.tone_burst;
    settings.fm_mode = display_a.fm_mode;

    let display_b = DisplayBFlags::read(image);
    settings.dual_watch = display_b.dual_watch;
    settings.display_type_b = display_b.display_type_b;
    settings.power_on_display = display_b.power_on_display;

    let vox = VoxFlags::read(image);
    settings.vox_level = vox.vox_level;
    settings.stun = vox.stun;
    settings.kill = vox.kill;

    settings.step = StepByte::read(image).step;

    let tx = TxFlags::read(image);
    settings.roger = tx.roger;
    settings.tx_200 = tx.tx_200;
    settings.tx_350 = tx.tx_350;
    settings.tx_500 = tx.tx_500;

    let led = LedFlags::read(image);
    settings.am_band = led.am_band;
    settings.breath_led = led.breath_led;
    settings.only_ch_mode = led.only_ch_mode;

    let alarm = AlarmFlags::read(image);
    settings.ste = alarm.ste;
    settings.alarm_mode = alarm.alarm_mode;

    settings.ptt_delay = PttDelayByte::read(image).ptt_delay;
}

/// Write the packed-byte fields of `settings` into `image`.
/// Ranged values must already be validated.
pub fn write_packed(image: &mut MemoryImage, settings: &Settings) {
    DtmfFlags {
        side_tone: settings.dtmf_side_tone,
    }
    .write(image);

    PromptFlags {
        voice: settings.voice_prompt,
        beep: settings.beep,
        auto_lock: settings.auto_lock,
        scan_mode: settings.scan_mode,
    }
    .write(image);

    DisplayAFlags {
        display_type_a: settings.display_type_a,
        fm_interrupt: settings.fm_interrupt,
        tone_burst: settings.tone_burst,
        fm_mode: settings.fm_mode,
    }
    .write(image);

    DisplayBFlags {
        dual_watch: settings.dual_watch,
        display_type_b: settings.display_type_b,
        power_on_display: settings.power_on_display,
    }
    .write(image);

    VoxFlags {
        vox_level: settings.vox_level,
        stun: settings.stun,
        kill: settings.kill,
    }
    .write(image);

    StepByte {
        step: settings.step,
    }
    .write(image);

    TxFlags {
        roger: settings.roger,
        tx_200: settings.tx_200,
        tx_350: settings.tx_350,
        tx_500: settings.tx_500,
    }
    .write(image);

    LedFlags {
        am_band: settings.am_band,
        breath_led: settings.breath_led,
        only_ch_mode: settings.only_ch_mode,
    }
    .write(image);

    AlarmFlags {
        ste: settings.ste,
        alarm_mode: settings.alarm_mode,
    }
    .write(image);

    PttDelayByte {
        ptt_delay: settings.ptt_delay,
    }
    .write(image);
}
