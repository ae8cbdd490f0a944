//! Node error types.

use thiserror::Error;

/// Result type for node operations.
pub type NodeResult<T> = Result<T, NodeError>;

/// Errors raised while building or executing a node.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The image batch holds no frames.
    #[error("image batch is empty")]
    EmptyBatch,

    /// A required input was not supplied.
    #[error("missing input '{name}'")]
    MissingInput {
        /// Input name.
        name: String,
    },

    /// An input has the wrong kind of value.
    #[error("input '{name}' expects {expected}")]
    WrongType {
        /// Input name.
        name: String,
        /// Expected kind.
        expected: &'static str,
    },

    /// A choice input got a value outside its options.
    #[error("input '{name}' got '{value}', expected one of: {}", options.join(", "))]
    InvalidChoice {
        /// Input name.
        name: String,
        /// Supplied value.
        value: String,
        /// Declared options.
        options: Vec<String>,
    },

    /// No node is registered under this class name.
    #[error("unknown node class '{0}'")]
    UnknownNode(String),

    /// Invalid image data or option name.
    #[error(transparent)]
    Core(#[from] aces_core::Error),

    /// EXR writing failed.
    #[error(transparent)]
    Io(#[from] aces_io::IoError),

    /// OCIO setup failed.
    #[error(transparent)]
    Ocio(#[from] aces_ocio::OcioError),

    /// Output directory could not be prepared.
    #[error("output directory: {0}")]
    OutputDir(#[source] std::io::Error),
}
