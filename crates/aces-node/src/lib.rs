//! # aces-node
//!
//! ACES EXR export as a node for node-graph image tools.
//!
//! The crate provides the `ACESEXRSaveOCIO` node ([`AcesExrSaveNode`]), a
//! small host-side contract for describing and running nodes
//! ([`NodeSchema`], [`Node`], [`NodeRegistry`]) and [`register_plugin`],
//! the single entry point a host calls to pick the node up.
//!
//! ```rust,ignore
//! use aces_core::ImageBatch;
//! use aces_node::{register_plugin, NodeInputs, NodeRegistry, PluginConfig};
//!
//! let mut registry = NodeRegistry::new();
//! register_plugin(&mut registry);
//!
//! let node = registry.create("ACESEXRSaveOCIO", &PluginConfig::from_env())?;
//! let images = ImageBatch::from_tensor(&[1, 4, 4, 3], vec![0.5; 48])?;
//! let outputs = node.execute(
//!     &NodeInputs::new()
//!         .with("images", images)
//!         .with("filename_prefix", "shot010")
//!         .with("colorspace", "ACEScg")
//!         .with("compression", "zip")
//!         .with("pixel_type", "half"),
//! )?;
//! println!("{}", outputs.get_str("conversion_info").unwrap_or_default());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod registry;
pub mod save;
pub mod schema;
pub mod value;

pub use config::PluginConfig;
pub use error::{NodeError, NodeResult};
pub use registry::{Node, NodeFactory, NodeRegistration, NodeRegistry};
pub use save::{AcesExrSaveNode, SaveParams, SaveReport};
pub use schema::{InputKind, InputSpec, NodeSchema};
pub use value::{NodeInputs, NodeOutputs, Value};

/// Plugin version.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Registers every node of this plugin.
pub fn register_plugin(registry: &mut NodeRegistry) {
    let mut plugin = NodeRegistry::new();
    plugin.register(AcesExrSaveNode::registration());
    tracing::debug!(nodes = plugin.len(), version = PLUGIN_VERSION, "registering ACES EXR plugin");
    registry.merge(plugin);
}
