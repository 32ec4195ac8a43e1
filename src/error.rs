//! Crate-level error types.

use std::fmt;

use crate::model::SUPPORTED_EXTENSIONS;

/// Errors produced by the vantage crate.
#[derive(Debug)]
pub enum VantageError {
    /// The file extension is not on the supported allow-list.
    UnsupportedFormat {
        /// The rejected extension, lowercased, without the leading dot.
        extension: String,
    },
    /// A file with a supported extension could not be parsed.
    ModelLoad {
        /// Display name of the file that failed.
        file: String,
        /// Parser-provided reason.
        message: String,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl VantageError {
    /// Build a [`VantageError::ModelLoad`] from any displayable cause.
    pub fn model_load(file: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self::ModelLoad {
            file: file.into(),
            message: cause.to_string(),
        }
    }
}

impl fmt::Display for VantageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { extension } => {
                let shown = if extension.is_empty() {
                    "(none)"
                } else {
                    extension.as_str()
                };
                write!(
                    f,
                    "unsupported file type '{shown}'. Please upload one of: \
                     {}. SLDPRT files are not supported due to their \
                     proprietary format.",
                    SUPPORTED_EXTENSIONS.join(", ")
                )
            }
            Self::ModelLoad { file, message } => {
                write!(f, "failed to load model {file}: {message}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for VantageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VantageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
