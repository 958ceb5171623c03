//! Parse .h3p image utility
//! Loads a TD-H3 Plus memory image and displays the decoded channels and settings

use h3plus_rs::core::{Channel, Codeplug, Vfo};
use h3plus_rs::drivers::{H3PlusRadio, ImageCodec};
use h3plus_rs::formats::{load_image, to_json};
use std::env;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file.h3p> [--json | channel | from-to]", args[0]);
        eprintln!("\nExamples:");
        eprintln!(
            "  {} radio.h3p          # Summary of channels, VFOs, FM and settings",
            args[0]
        );
        eprintln!("  {} radio.h3p --json   # Full codeplug as JSON", args[0]);
        eprintln!("  {} radio.h3p 40       # Show only channel 40", args[0]);
        eprintln!("  {} radio.h3p 32-50    # Show channels 32-50", args[0]);
        std::process::exit(1);
    }

    let image_file = &args[1];
    let filter = args.get(2).map(|s| s.as_str());

    let image = load_image(image_file)?;
    let radio = H3PlusRadio::new();
    let codeplug = radio.decode(&image);

    match filter {
        None => print_summary(&radio, &codeplug),
        Some("--json") => println!("{}", to_json(&codeplug)?),
        Some(range) if range.contains('-') => {
            let Some((start, end)) = range.split_once('-') else {
                anyhow::bail!("Invalid channel range: {}", range);
            };
            let start: usize = start.parse()?;
            let end: usize = end.parse()?;
            if start == 0 || end < start {
                anyhow::bail!("Invalid channel range: {}", range);
            }
            println!("=== Channels {} to {} ===\n", start, end);
            for index in start..=end {
                match codeplug.channel(index) {
                    Some(ch) => print_channel(ch),
                    None => anyhow::bail!("No channel {}", index),
                }
            }
        }
        Some(number) => {
            let index: usize = number.parse()?;
            let ch = codeplug
                .channel(index)
                .ok_or_else(|| anyhow::anyhow!("No channel {}", index))?;
            print_channel_details(ch);
        }
    }

    Ok(())
}

fn print_summary(radio: &H3PlusRadio, codeplug: &Codeplug) {
    println!("Radio: {}", radio.get_name());

    let programmed: Vec<&Channel> = codeplug.programmed_channels().collect();
    println!("\n=== Channels ({} programmed) ===\n", programmed.len());
    for ch in programmed {
        print_channel(ch);
    }

    println!("\n=== VFOs ===\n");
    print_vfo("A", &codeplug.vfo_a);
    print_vfo("B", &codeplug.vfo_b);

    println!("\n=== FM Radio ===\n");
    for (i, mhz) in codeplug.fm_channels.iter().enumerate() {
        if mhz != 0.0 {
            println!("  FM {:2}: {:.1} MHz", i + 1, mhz);
        }
    }

    let s = &codeplug.settings;
    println!("\n=== Settings ===\n");
    println!("  Squelch:        {}", s.squelch);
    println!("  Step:           {}", s.step);
    println!("  TOT:            {} s", s.tot_seconds());
    println!("  Brightness:     {}", s.brightness);
    println!("  Language:       {}", s.language);
    println!("  Display mode:   {}", s.display_mode);
    println!("  Scan mode:      {}", s.scan_mode);
    println!("  Scan range:     {}-{} MHz", s.scan_lower, s.scan_upper);
    println!(
        "  TX limits:      VHF {:.1}-{:.1} MHz, UHF {:.1}-{:.1} MHz",
        s.tx_limits.vhf_low, s.tx_limits.vhf_high, s.tx_limits.uhf_low, s.tx_limits.uhf_high
    );
    println!("  ANI:            {}", s.ani);
    for (i, message) in s.messages.iter().enumerate() {
        if !message.is_empty() {
            println!("  Message {}:      \"{}\"", i + 1, message);
        }
    }
}

fn print_channel(ch: &Channel) {
    println!("{}", ch);
}

fn print_channel_details(ch: &Channel) {
    if ch.is_empty() {
        println!("Channel #{}: <empty>", ch.index);
        return;
    }

    println!("Channel #{}: \"{}\"", ch.index, ch.name);
    println!("  RX:           {:.5} MHz", ch.rx_freq);
    println!("  TX:           {:.5} MHz", ch.tx_freq);
    println!("  Decode tone:  {}", ch.decode);
    println!("  Encode tone:  {}", ch.encode);
    println!("  Power:        {}", ch.tx_power);
    println!("  Bandwidth:    {}", ch.bandwidth);
    println!("  Busy lock:    {}", ch.busy_lock);
    println!("  Freq hop:     {}", ch.frequency_hop);
    println!("  PTT-ID:       {}", ch.ptt_id);
    println!("  Scan:         {}", ch.scan_add);
    println!("  Scramble:     {}", ch.scramble);
}

fn print_vfo(label: &str, vfo: &Vfo) {
    println!(
        "  VFO {}: RX {:.5} MHz, TX {:.5} MHz ({} {:.5}), tones {}/{}, {} {}",
        label,
        vfo.rx_freq,
        vfo.tx_freq(),
        vfo.offset_dir,
        vfo.offset,
        vfo.rx_tone,
        vfo.tx_tone,
        vfo.tx_power,
        vfo.bandwidth
    );
}
