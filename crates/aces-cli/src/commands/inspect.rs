//! EXR header inspection.

use anyhow::{Context, Result};
use tracing::trace;

use aces_io::read_header;
use crate::InspectArgs;

pub fn run(args: InspectArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), "inspect::run");
    let header = read_header(&args.input)
        .with_context(|| format!("Failed to read: {}", args.input.display()))?;

    println!("{}", args.input.display());
    println!("  size:        {}x{}", header.size.0, header.size.1);
    let channels: Vec<String> = header
        .channels
        .iter()
        .map(|(name, ty)| format!("{name}:{ty}"))
        .collect();
    println!("  channels:    {}", channels.join(" "));
    match header.compression {
        Some(c) => println!("  compression: {c}"),
        None => println!("  compression: (other)"),
    }
    match header.colorspace() {
        Some(cs) => println!("  colorspace:  {cs}"),
        None => println!("  colorspace:  (not ACES)"),
    }
    if let Some(c) = &header.chromaticities {
        println!(
            "  chromaticities: R{:?} G{:?} B{:?} W{:?}",
            c.red, c.green, c.blue, c.white
        );
    }

    for (name, value) in &header.text {
        if verbose > 0 || !name.starts_with("oiio:") {
            println!("  {name}: {value}");
        }
    }
    for (name, value) in &header.ints {
        println!("  {name}: {value}");
    }
    Ok(())
}
