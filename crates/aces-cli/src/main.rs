//! aces-exr - ACES OpenEXR export from the command line
//!
//! Runs the `ACESEXRSaveOCIO` node outside a host and inspects its output.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "aces-exr")]
#[command(author, version, about = "Save images as ACES OpenEXR files")]
#[command(long_about = "
Saves images as ACES2065-1 or ACEScg OpenEXR files with ACES header
metadata, using the same node a host application loads.

Examples:
  aces-exr version                          # Verify the installation
  aces-exr save frame.png                   # sRGB PNG -> output/aces_render.exr
  aces-exr save a.png b.png -c ACEScg --compression piz -o renders
  aces-exr nodes --json                     # Node definitions for a host
  aces-exr ocio --source Preset --preset \"ACES 2.0 CG Config\"
  aces-exr inspect output/aces_render.exr   # Show header and ACES attributes
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and registered nodes
    Version,

    /// Save images as ACES EXR files
    #[command(visible_alias = "s")]
    Save(SaveArgs),

    /// List registered nodes
    Nodes(NodesArgs),

    /// Resolve an OCIO config and summarize it
    Ocio(OcioArgs),

    /// Show the header of an EXR file
    #[command(visible_alias = "i")]
    Inspect(InspectArgs),
}

/// OCIO config selection shared by `save` and `ocio`.
#[derive(Args, Clone)]
pub struct OcioSelection {
    /// Config source: Auto, Local Path, URL, Preset
    #[arg(long = "ocio-source", default_value = "Auto")]
    pub source: String,

    /// Config file for the Local Path source
    #[arg(long = "ocio-path", default_value = "")]
    pub path: String,

    /// Config URL for the URL source
    #[arg(long = "ocio-url", default_value = "")]
    pub url: String,

    /// Official config for the Preset source
    #[arg(long = "ocio-preset", default_value = "ACES 1.3 CG Config")]
    pub preset: String,

    /// Download cache directory
    #[arg(long = "cache-dir")]
    pub cache_dir: Option<PathBuf>,

    /// Root searched for ocio_configs/ in Auto mode
    #[arg(long = "search-root")]
    pub search_root: Option<PathBuf>,
}

#[derive(Args)]
pub struct SaveArgs {
    /// Input images (PNG, JPEG, TIFF), saved as one batch
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// File name prefix
    #[arg(short, long, default_value = "aces_render")]
    pub prefix: String,

    /// Output color space: ACES2065-1, ACEScg
    #[arg(short, long, default_value = "ACES2065-1")]
    pub colorspace: String,

    /// Compression: none, zip, zips, rle, piz, pxr24, b44, b44a
    #[arg(long, default_value = "zip")]
    pub compression: String,

    /// Pixel type: half, float
    #[arg(short = 'd', long, default_value = "half")]
    pub pixel_type: String,

    /// Encoding of the input pixels: sRGB, Rec.709, Linear sRGB, ACES2065-1, ACEScg
    #[arg(short, long, default_value = "sRGB")]
    pub input_colorspace: String,

    #[command(flatten)]
    pub ocio: OcioSelection,
}

#[derive(Args)]
pub struct NodesArgs {
    /// Print node schemas as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct OcioArgs {
    #[command(flatten)]
    pub ocio: OcioSelection,
}

#[derive(Args)]
pub struct InspectArgs {
    /// EXR file
    pub input: PathBuf,
}

fn init_logging(verbose: u8) -> Result<()> {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default))
    } else {
        EnvFilter::try_new(default)
    }
    .context("Invalid log filter")?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Version => commands::version::run(cli.verbose),
        Commands::Save(args) => commands::save::run(args, cli.verbose),
        Commands::Nodes(args) => commands::nodes::run(args, cli.verbose),
        Commands::Ocio(args) => commands::ocio::run(args, cli.verbose),
        Commands::Inspect(args) => commands::inspect::run(args, cli.verbose),
    }
}
