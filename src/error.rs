//! Error handling for Noisemix
//!
//! Every failure in the pipeline maps to one `MixError` variant. Folder runs
//! wrap per-file failures in `FileProcessing` so the offending path survives.

use thiserror::Error;

/// Result type alias for Noisemix operations
pub type Result<T> = std::result::Result<T, MixError>;

/// Main error type for Noisemix operations
#[derive(Error, Debug)]
pub enum MixError {
    // File Errors
    #[error("Cannot access file: {path}")]
    FileAccess {
        path: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Signal Errors
    #[error("Invalid signal: {reason}")]
    InvalidSignal { reason: String },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    // Batch Errors
    #[error("Failed to process {path}")]
    FileProcessing {
        path: String,
        #[source]
        source: Box<MixError>,
    },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MixError {
    /// Build a `FileAccess` error from any underlying error
    pub fn file_access<E>(path: &std::path::Path, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        MixError::FileAccess {
            path: path.display().to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MixError::FileAccess { .. } => "FILE_ACCESS",
            MixError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            MixError::InvalidSignal { .. } => "INVALID_SIGNAL",
            MixError::InvalidParameter { .. } => "INVALID_PARAMETER",
            MixError::FileProcessing { .. } => "FILE_PROCESSING",
            MixError::Io(_) => "IO_ERROR",
            MixError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if a folder run can skip past this error and keep going.
    ///
    /// Parameter errors apply to every file alike, so they never are.
    pub fn is_recoverable(&self) -> bool {
        match self {
            MixError::FileAccess { .. } => true,
            MixError::UnsupportedFormat { .. } => true,
            MixError::InvalidSignal { .. } => true,
            MixError::FileProcessing { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            MixError::FileAccess { .. } => vec![
                "Check the file path is correct",
                "Verify the file is readable and the output directory is writable",
            ],
            MixError::UnsupportedFormat { .. } => vec![
                "Convert the file to uncompressed PCM WAV first",
                "Supported sample widths: 8, 16, 24, 32-bit integer and 32-bit float",
            ],
            MixError::InvalidSignal { .. } => vec![
                "The clip may be silent - remove it from the dataset",
                "Check that the noise file actually contains audio",
            ],
            MixError::InvalidParameter { .. } => vec![
                "Noise factor must be a finite number >= 0",
            ],
            MixError::FileProcessing { source, .. } => source.recovery_suggestions(),
            _ => vec![],
        }
    }
}
