//! Error types for the switch-loader plugin

use thiserror::Error;

/// Result type alias using the plugin Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the switch-loader plugin
#[derive(Error, Debug)]
pub enum Error {
    // Checkpoint errors
    #[error("Checkpoint not found: {name}")]
    CheckpointNotFound { name: String },

    #[error("Checkpoint load failed: {message}")]
    CheckpointLoad { message: String },

    // Config store errors
    #[error("Config store error: {message}")]
    Store { message: String },

    // Registry errors
    #[error("Node class not registered: {class_name}")]
    NodeNotFound { class_name: String },

    #[error("Node class already registered: {class_name}")]
    NodeAlreadyRegistered { class_name: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns true if the node degrades to defaults instead of failing the graph
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::CheckpointLoad { .. }
                | Error::Store { .. }
                | Error::Io(_)
                | Error::Serialization(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
