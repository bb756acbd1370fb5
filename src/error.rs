use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors produced while loading configuration, reading input or rendering
/// a diagram.
///
/// Rendering itself never fails for well-formed values; unsupported shapes
/// degrade to a visible fallback node instead. The one fail-fast validation
/// is tensor shape metadata: a dimension product that does not match the
/// element count is rejected up front rather than silently mis-rendered.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The TOML configuration file does not exist.
    #[error("Configuration file not found: {0}")]
    ConfigMissing(PathBuf),

    /// The TOML configuration file exists but failed to parse.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// The JSON input document failed to parse.
    #[error("Input error: {0}")]
    Input(#[from] serde_json::Error),

    /// Tensor shape metadata is inconsistent with the element count.
    #[error("Shape error: {0}")]
    Shape(String),

    /// The requested mode cannot handle the given value kind.
    #[error("Unsupported value: {0}")]
    Unsupported(String),
}
