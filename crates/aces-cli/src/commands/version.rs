//! Installation check.

use anyhow::{Result, bail};
use tracing::trace;

use aces_node::{NodeRegistry, PLUGIN_VERSION};

/// Version line followed by one line per registered node.
pub fn report(registry: &NodeRegistry, verbose: u8) -> String {
    let mut out = format!("aces-exr {PLUGIN_VERSION}\nnodes: {}\n", registry.len());
    for reg in registry.iter() {
        if verbose > 0 {
            out.push_str(&format!(
                "  {} ({}) in {}\n",
                reg.class_name(),
                reg.display_name(),
                reg.schema.category
            ));
        } else {
            out.push_str(&format!("  {} ({})\n", reg.class_name(), reg.display_name()));
        }
    }
    out
}

pub fn run(verbose: u8) -> Result<()> {
    trace!("version::run");
    let registry = super::registry();
    if registry.is_empty() {
        bail!("aces-exr {PLUGIN_VERSION}: no nodes registered");
    }
    print!("{}", report(&registry, verbose));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lists_plugin_nodes() {
        let registry = super::super::registry();
        let text = report(&registry, 0);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("aces-exr {PLUGIN_VERSION}"));
        assert!(lines[0].starts_with("aces-exr 3."));
        assert_eq!(lines[1], "nodes: 1");
        assert_eq!(lines[2], "  ACESEXRSaveOCIO (Save ACES EXR (OCIO))");
    }

    #[test]
    fn test_report_verbose_shows_category() {
        let text = report(&super::super::registry(), 1);
        assert!(text.contains("ACESEXRSaveOCIO (Save ACES EXR (OCIO)) in image/ACES"));
    }

    #[test]
    fn test_run_succeeds() {
        assert!(run(0).is_ok());
    }
}
