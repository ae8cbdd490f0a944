//! OCIO config resolution.

use anyhow::{Context, Result, bail};
use tracing::{info, trace};

use aces_ocio::ConfigSummary;
use crate::OcioArgs;

pub fn run(args: OcioArgs, verbose: u8) -> Result<()> {
    trace!(source = %args.ocio.source, "ocio::run");
    let config = super::plugin_config(None, &args.ocio);
    let request = super::config_request(&args.ocio)?;
    let resolver = super::resolver(&config)?;

    if verbose > 0 {
        println!("Cache: {}", resolver.cache().dir().display());
    }

    let Some(path) = resolver.resolve(&request) else {
        bail!("No OCIO config found for source '{}'", request.source);
    };
    info!(path = %path.display(), "resolved OCIO config");

    let summary = ConfigSummary::from_file(&path)
        .with_context(|| format!("Failed to read OCIO config: {}", path.display()))?;
    println!("Config:      {}", path.display());
    println!("Version:     {}", summary.profile_version);
    if let Some(name) = &summary.name {
        println!("Name:        {name}");
    }
    println!("Colorspaces: {}", summary.colorspaces.len());
    for name in ["ACES2065-1", "ACEScg"] {
        let mark = if summary.has_colorspace(name) { "yes" } else { "no" };
        println!("  {name:<11} {mark}");
    }
    if verbose > 0 {
        for name in &summary.colorspaces {
            println!("  - {name}");
        }
    }
    Ok(())
}
