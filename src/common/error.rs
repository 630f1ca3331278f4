//! Error types for footbot_diffusion

use thiserror::Error;

/// Main error type for controller setup and the test bench
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A sensor or actuator requested by a controller is not provided by the host
    #[error("Missing device: {0}")]
    MissingDevice(String),
    /// No controller registered under that name
    #[error("Unknown controller: {0}")]
    UnknownController(String),
    /// A controller factory is already registered under that name
    #[error("Duplicate controller: {0}")]
    DuplicateController(String),
    /// Control step requested before a successful init
    #[error("Controller not initialized")]
    NotInitialized,
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Malformed configuration
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Visualization error
    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;
