use thiserror::Error;

/// Errors raised around the parser: loading sources, options and emitting output.
///
/// Parsing itself never fails, malformed markup degrades to text.
#[derive(Error, Debug)]
pub enum CooklangError {
    /// Failed to read a recipe or configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Failed to serialize a parsed recipe to JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parser options are present but unusable
    #[error("Invalid parser options: {0}")]
    InvalidOptions(String),
}
