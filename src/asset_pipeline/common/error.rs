use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Source file not found (searched: {})", display_paths(.0))]
    MissingSource(Vec<PathBuf>),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to parse JSON document: {0}")]
    JsonError(String),

    #[error("Failed to encode header: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u32, u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Reason code attached to a failed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// A required input is absent.
    MissingSourceFile,
    /// An image or JSON document could not be read or parsed.
    DecodeFailure,
    /// Writing or transforming an output failed.
    EncodeFailure,
}

impl ConversionError {
    pub fn reason(&self) -> FailureReason {
        match self {
            ConversionError::MissingSource(_) => FailureReason::MissingSourceFile,
            ConversionError::InputReadError(_)
            | ConversionError::DecodeError(_)
            | ConversionError::JsonError(_) => FailureReason::DecodeFailure,
            ConversionError::OutputWriteError(_)
            | ConversionError::EncodeError(_)
            | ConversionError::InvalidDimensions(_, _)
            | ConversionError::IoError(_) => FailureReason::EncodeFailure,
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            FailureReason::MissingSourceFile => "missing-source-file",
            FailureReason::DecodeFailure => "decode-failure",
            FailureReason::EncodeFailure => "encode-failure",
        };
        f.write_str(code)
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ConversionError>;
