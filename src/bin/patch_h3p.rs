//! Patch .h3p image utility
//! Writes a JSON codeplug over a base TD-H3 Plus image, keeping every byte the codeplug does not cover

use h3plus_rs::core::validation::{errors_only, validate_codeplug, warnings_only};
use h3plus_rs::drivers::{H3PlusRadio, ImageCodec};
use h3plus_rs::formats::{import_json, load_image, save_image};
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
    if args.len() != 4 {
        eprintln!("Usage: {} <base.h3p> <codeplug.json> <out.h3p>", args[0]);
        eprintln!(
            "Example: {} radio.h3p edited.json radio-new.h3p",
            args[0]
        );
        std::process::exit(1);
    }

    let base = load_image(&args[1])?;
    let codeplug = import_json(&args[2])?;

    let messages = validate_codeplug(&codeplug);
    for warning in warnings_only(&messages) {
        tracing::warn!("{}", warning);
    }
    let errors = errors_only(&messages);
    if !errors.is_empty() {
        anyhow::bail!("Codeplug is invalid: {}", errors.join("; "));
    }

    let radio = H3PlusRadio::new();
    let image = radio.encode(&codeplug, &base)?;

    let changed = image
        .as_bytes()
        .iter()
        .zip(base.as_bytes())
        .filter(|(a, b)| a != b)
        .count();
    tracing::info!("{} bytes differ from the base image", changed);

    save_image(&args[3], &image)?;
    Ok(())
}
