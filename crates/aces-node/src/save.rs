//! The `ACESEXRSaveOCIO` node.
//!
//! Saves an image batch as ACES EXR files. Every frame is clipped to
//! non-negative values (HDR highlights are kept), converted from the input
//! encoding with fixed matrices and written with ACES header metadata. The
//! OCIO config is resolved for reference only and its file name is stored
//! in each file.
//!
//! A batch of one writes `{prefix}.exr`; larger batches write
//! `{prefix}_{index:05}.exr`. A frame that fails is reported and skipped.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use aces_color::ConversionPlan;
use aces_core::{Compression, ImageBatch, InputColorSpace, OutputColorSpace, PixelType};
use aces_io::{is_header_text, write_exr, ExrOptions, WriteSummary};
use aces_ocio::{
    ConfigCache, ConfigFetcher, ConfigRequest, ConfigResolver, ConfigSource, HttpFetcher, Preset,
};
use tracing::{debug, info, warn};

use crate::config::PluginConfig;
use crate::registry::{Node, NodeRegistration};
use crate::schema::{InputKind, InputSpec, NodeSchema};
use crate::value::{NodeInputs, NodeOutputs};
use crate::{NodeError, NodeResult};

/// Registry key of the node.
pub const CLASS_NAME: &str = "ACESEXRSaveOCIO";
/// Menu name of the node.
pub const DISPLAY_NAME: &str = "Save ACES EXR (OCIO)";
/// Menu category of the node.
pub const CATEGORY: &str = "image/ACES";
/// Entry point name.
pub const FUNCTION: &str = "save_aces_exr";

/// Default file name prefix.
pub const DEFAULT_PREFIX: &str = "aces_render";

/// Parameters of one save, parsed from node inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveParams {
    /// File name prefix, relative to the output directory.
    pub filename_prefix: String,
    /// ACES encoding to write.
    pub colorspace: OutputColorSpace,
    /// EXR compression.
    pub compression: Compression,
    /// EXR sample type.
    pub pixel_type: PixelType,
    /// Encoding of the incoming pixels.
    pub input_colorspace: InputColorSpace,
    /// OCIO config selection.
    pub ocio: ConfigRequest,
}

impl Default for SaveParams {
    fn default() -> Self {
        Self {
            filename_prefix: DEFAULT_PREFIX.to_string(),
            colorspace: OutputColorSpace::default(),
            compression: Compression::default(),
            pixel_type: PixelType::default(),
            input_colorspace: InputColorSpace::default(),
            ocio: ConfigRequest::default(),
        }
    }
}

impl SaveParams {
    /// Reads the parameters from `inputs`.
    pub fn from_inputs(schema: &NodeSchema, inputs: &NodeInputs) -> NodeResult<Self> {
        let get = |name: &str| inputs.string(schema, name);
        Ok(Self {
            filename_prefix: get("filename_prefix")?,
            colorspace: get("colorspace")?.parse()?,
            compression: get("compression")?.parse()?,
            pixel_type: get("pixel_type")?.parse()?,
            input_colorspace: get("input_colorspace")?.parse()?,
            ocio: ConfigRequest {
                source: get("ocio_config_source")?.parse()?,
                path: get("ocio_config_path")?,
                url: get("ocio_config_url")?,
                preset: get("ocio_preset")?.parse()?,
            },
        })
    }

    fn exr_options(&self, conversion: &str, ocio_config: Option<&str>) -> ExrOptions {
        let mut options = ExrOptions::new(self.colorspace)
            .with_compression(self.compression)
            .with_pixel_type(self.pixel_type)
            .with_attribute("aces:Node", CLASS_NAME)
            .with_attribute("aces:Conversion", conversion);
        if let Some(name) = ocio_config {
            options = options.with_attribute("aces:OCIOConfig", name);
        }
        options
    }
}

/// Outcome of one save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveReport {
    /// Files written, in frame order.
    pub saved: Vec<PathBuf>,
    /// One line per frame.
    pub lines: Vec<String>,
    /// Resolved OCIO config, if any.
    pub ocio_config: Option<PathBuf>,
}

impl SaveReport {
    /// First written file, or an empty string.
    pub fn exr_path(&self) -> String {
        self.saved
            .first()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Per-frame lines joined by newlines.
    pub fn conversion_info(&self) -> String {
        self.lines.join("\n")
    }
}

/// File name of frame `index` in a batch of `len`.
pub fn frame_file_name(prefix: &str, index: usize, len: usize) -> String {
    if len > 1 {
        format!("{prefix}_{index:05}.exr")
    } else {
        format!("{prefix}.exr")
    }
}

/// Saves image batches as ACES EXR files.
pub struct AcesExrSaveNode {
    schema: NodeSchema,
    output_dir: PathBuf,
    resolver: ConfigResolver,
}

impl AcesExrSaveNode {
    /// Interface of the node.
    pub fn node_schema() -> NodeSchema {
        let colorspaces = OutputColorSpace::names();
        let inputs = InputColorSpace::names();
        NodeSchema {
            class_name: CLASS_NAME.to_string(),
            display_name: DISPLAY_NAME.to_string(),
            category: CATEGORY.to_string(),
            description: "Save images as ACES2065-1 or ACEScg OpenEXR files with OCIO config \
                          reference and ACES header metadata"
                .to_string(),
            required: vec![
                InputSpec::new("images", InputKind::Image),
                InputSpec::new("filename_prefix", InputKind::string(DEFAULT_PREFIX)),
                InputSpec::new(
                    "colorspace",
                    InputKind::choice(&colorspaces, OutputColorSpace::default().name()),
                ),
                InputSpec::new(
                    "compression",
                    InputKind::choice(&Compression::names(), Compression::default().name()),
                ),
                InputSpec::new(
                    "pixel_type",
                    InputKind::choice(&PixelType::names(), PixelType::default().name()),
                ),
            ],
            optional: vec![
                InputSpec::new(
                    "input_colorspace",
                    InputKind::choice(&inputs, InputColorSpace::default().name()),
                ),
                InputSpec::new(
                    "ocio_config_source",
                    InputKind::choice(&ConfigSource::names(), ConfigSource::default().name()),
                ),
                InputSpec::new("ocio_config_path", InputKind::string("")),
                InputSpec::new("ocio_config_url", InputKind::string("")),
                InputSpec::new(
                    "ocio_preset",
                    InputKind::choice(&Preset::names(), Preset::default().name()),
                ),
            ],
            return_types: vec!["STRING".to_string(), "STRING".to_string()],
            return_names: vec!["exr_path".to_string(), "conversion_info".to_string()],
            function: FUNCTION.to_string(),
            output_node: true,
        }
    }

    /// Registry entry for this node.
    pub fn registration() -> NodeRegistration {
        NodeRegistration {
            schema: Self::node_schema(),
            factory: |config| Ok(Box::new(Self::new(config)?)),
        }
    }

    /// Node downloading configs over HTTP.
    pub fn new(config: &PluginConfig) -> NodeResult<Self> {
        let fetcher = HttpFetcher::new(config.download_timeout, &config.user_agent)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Node downloading configs through `fetcher`.
    pub fn with_fetcher(config: &PluginConfig, fetcher: Arc<dyn ConfigFetcher>) -> Self {
        let cache = ConfigCache::new(&config.ocio_cache_dir, fetcher);
        let resolver = ConfigResolver::new(cache, &config.search_root);
        Self::with_resolver(&config.output_dir, resolver)
    }

    /// Node using a prepared resolver.
    pub fn with_resolver(output_dir: impl Into<PathBuf>, resolver: ConfigResolver) -> Self {
        Self {
            schema: Self::node_schema(),
            output_dir: output_dir.into(),
            resolver,
        }
    }

    /// Directory files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Saves every frame of `images`.
    pub fn save(&self, images: &ImageBatch, params: &SaveParams) -> NodeResult<SaveReport> {
        let ocio_config = self.resolver.resolve(&params.ocio);
        let ocio_name = ocio_config
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned());
        match &ocio_name {
            Some(name) => info!(config = %name, "OCIO config found"),
            None => info!("no OCIO config, using built-in ACES matrices"),
        }
        let header_name = ocio_name.as_deref().filter(|name| {
            let ok = is_header_text(name);
            if !ok {
                warn!(config = %name, "OCIO config name is not latin-1, aces:OCIOConfig omitted");
            }
            ok
        });

        if images.is_empty() {
            return Err(NodeError::EmptyBatch);
        }
        fs::create_dir_all(&self.output_dir).map_err(NodeError::OutputDir)?;

        let plan = ConversionPlan::new(params.input_colorspace, params.colorspace);
        let conversion = plan.description();
        let options = params.exr_options(&conversion, header_name);

        let total = images.len();
        let mut report = SaveReport {
            ocio_config,
            ..SaveReport::default()
        };
        if total > 1 {
            info!(frames = total, "processing batch");
        }

        for index in 0..total {
            let path = self
                .output_dir
                .join(frame_file_name(&params.filename_prefix, index, total));
            let label = (total > 1).then(|| format!("Frame {}/{total}: ", index + 1));

            match self.save_frame(images, index, &plan, &path, &options) {
                Ok(summary) => {
                    debug!(path = %path.display(), frame = index + 1, total, "saved EXR");
                    report.lines.push(format!(
                        "{}{conversion} -> {}",
                        label.as_deref().unwrap_or(""),
                        summary.describe()
                    ));
                    report.saved.push(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), frame = index + 1, error = %e, "EXR write failed");
                    report
                        .lines
                        .push(format!("{}ERROR - {e}", label.as_deref().unwrap_or("")));
                }
            }
        }

        if report.saved.is_empty() {
            warn!("no EXR files saved");
        } else {
            info!(
                saved = report.saved.len(),
                total,
                colorspace = %params.colorspace,
                "EXR export finished"
            );
        }
        Ok(report)
    }

    fn save_frame(
        &self,
        images: &ImageBatch,
        index: usize,
        plan: &ConversionPlan,
        path: &Path,
        options: &ExrOptions,
    ) -> NodeResult<WriteSummary> {
        let mut frame = images.frame(index)?;
        frame.clip_negative();
        plan.apply(&mut frame);
        // Prefixes may name subfolders.
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(NodeError::OutputDir)?;
        }
        Ok(write_exr(path, &frame, options)?)
    }
}

impl Node for AcesExrSaveNode {
    fn schema(&self) -> &NodeSchema {
        &self.schema
    }

    fn execute(&self, inputs: &NodeInputs) -> NodeResult<NodeOutputs> {
        let images = inputs.image("images")?;
        let params = SaveParams::from_inputs(&self.schema, inputs)?;
        let report = self.save(images, &params)?;

        let mut outputs = NodeOutputs::default();
        outputs.push("exr_path", report.exr_path());
        outputs.push("conversion_info", report.conversion_info());
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(frame_file_name("shot", 0, 1), "shot.exr");
        assert_eq!(frame_file_name("shot", 0, 3), "shot_00000.exr");
        assert_eq!(frame_file_name("shot", 12, 20), "shot_00012.exr");
    }

    #[test]
    fn test_schema_defaults() {
        let schema = AcesExrSaveNode::node_schema();
        assert_eq!(schema.class_name, "ACESEXRSaveOCIO");
        assert_eq!(schema.function, "save_aces_exr");
        assert!(schema.output_node);
        let default = |name: &str| schema.input(name).unwrap().0.kind.default_value().map(String::from);
        assert_eq!(default("filename_prefix").as_deref(), Some("aces_render"));
        assert_eq!(default("colorspace").as_deref(), Some("ACES2065-1"));
        assert_eq!(default("compression").as_deref(), Some("zip"));
        assert_eq!(default("pixel_type").as_deref(), Some("half"));
        assert_eq!(default("input_colorspace").as_deref(), Some("sRGB"));
        assert_eq!(default("ocio_config_source").as_deref(), Some("Auto"));
        assert_eq!(default("ocio_preset").as_deref(), Some("ACES 1.3 CG Config"));
        assert_eq!(schema.return_names, ["exr_path", "conversion_info"]);
    }

    #[test]
    fn test_params_from_inputs() {
        let schema = AcesExrSaveNode::node_schema();
        let inputs = NodeInputs::new()
            .with("filename_prefix", "plate")
            .with("colorspace", "ACEScg")
            .with("compression", "piz")
            .with("pixel_type", "float")
            .with("ocio_config_source", "Preset")
            .with("ocio_preset", "ACES 2.0 Studio Config");
        let params = SaveParams::from_inputs(&schema, &inputs).unwrap();
        assert_eq!(params.filename_prefix, "plate");
        assert_eq!(params.colorspace, OutputColorSpace::AcesCg);
        assert_eq!(params.compression, Compression::Piz);
        assert_eq!(params.pixel_type, PixelType::Float);
        assert_eq!(params.input_colorspace, InputColorSpace::Srgb);
        assert_eq!(params.ocio.source, ConfigSource::Preset);
        assert_eq!(params.ocio.preset, Preset::Aces20Studio);
    }

    #[test]
    fn test_params_reject_unknown_choice() {
        let schema = AcesExrSaveNode::node_schema();
        let inputs = NodeInputs::new()
            .with("filename_prefix", "plate")
            .with("colorspace", "Rec.2020")
            .with("compression", "zip")
            .with("pixel_type", "half");
        assert!(matches!(
            SaveParams::from_inputs(&schema, &inputs),
            Err(NodeError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn test_report_outputs() {
        let report = SaveReport {
            saved: vec![PathBuf::from("/out/a_00000.exr"), PathBuf::from("/out/a_00001.exr")],
            lines: vec!["one".into(), "two".into()],
            ocio_config: None,
        };
        assert_eq!(report.exr_path(), "/out/a_00000.exr");
        assert_eq!(report.conversion_info(), "one\ntwo");
        assert_eq!(SaveReport::default().exr_path(), "");
    }
}
