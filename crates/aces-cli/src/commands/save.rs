//! Save command: runs the export node on image files.

use anyhow::{Context, Result};
use tracing::{info, trace};

use aces_node::NodeInputs;
use crate::SaveArgs;

/// Registry key of the export node.
const NODE_CLASS: &str = "ACESEXRSaveOCIO";

pub fn run(args: SaveArgs, verbose: u8) -> Result<()> {
    trace!(inputs = args.inputs.len(), colorspace = %args.colorspace, "save::run");

    let config = super::plugin_config(args.output_dir.as_deref(), &args.ocio);
    let images = super::load_batch(&args.inputs)?;
    if verbose > 0 {
        let [n, h, w, c] = images.shape();
        println!("Loaded {n} image(s), {w}x{h}, {c} channels");
    }

    let node = super::registry()
        .create(NODE_CLASS, &config)
        .context("Failed to create export node")?;

    let inputs = NodeInputs::new()
        .with("images", images)
        .with("filename_prefix", args.prefix)
        .with("colorspace", args.colorspace)
        .with("compression", args.compression)
        .with("pixel_type", args.pixel_type)
        .with("input_colorspace", args.input_colorspace)
        .with("ocio_config_source", args.ocio.source)
        .with("ocio_config_path", args.ocio.path)
        .with("ocio_config_url", args.ocio.url)
        .with("ocio_preset", args.ocio.preset);

    let outputs = node.execute(&inputs).context("Export failed")?;
    let exr_path = outputs.get_str("exr_path").unwrap_or_default();
    let conversion_info = outputs.get_str("conversion_info").unwrap_or_default();

    info!(exr_path, "export done");
    println!("{conversion_info}");
    if exr_path.is_empty() {
        anyhow::bail!("No EXR files were written");
    }
    println!("Saved: {exr_path}");
    Ok(())
}
