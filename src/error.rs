//! Error types for Disha

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Disha error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Command string contains a character outside `f`, `l`, `r`
    #[error("Invalid command {character:?} at index {index}")]
    InvalidCommand {
        /// Zero-based character position in the command string
        index: usize,
        /// The offending character
        character: char,
    },

    /// Operation invoked before `initialize`
    #[error("Robot not initialized")]
    UninitializedRobot,

    /// Hardware returned a value outside its declared domain
    #[error("Hardware fault: {0}")]
    HardwareFault(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unknown device type in configuration
    #[error("Unknown device type: {0}")]
    UnknownDevice(String),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Wire payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
