// Error handling for CAN capture decoding

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CanLogError>;

#[derive(Error, Debug)]
pub enum CanLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decompression failed: {0}")]
    Decompression(String),

    #[error("unparseable file: {}", .attempts.join("; "))]
    UnparseableFile { attempts: Vec<String> },

    #[error("no matching identifier (CAN ID {target})")]
    NoMatchingMessages { target: String },

    #[error("time conversion failed")]
    TimeConversionFailure,

    #[error("no valid samples after conversion")]
    EmptyAfterConversion,
}

impl CanLogError {
    /// Short stable tag for API consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            CanLogError::Io(_) => "io",
            CanLogError::Decompression(_) => "decompression",
            CanLogError::UnparseableFile { .. } => "unparseable_file",
            CanLogError::NoMatchingMessages { .. } => "no_matching_messages",
            CanLogError::TimeConversionFailure => "time_conversion_failure",
            CanLogError::EmptyAfterConversion => "empty_after_conversion",
        }
    }
}
