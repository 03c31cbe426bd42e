use std::io;
use thiserror::Error;

/// Errors raised while building or writing a package file.
#[derive(Error, Debug)]
pub enum PackageError {
    /// Opening or writing the package file failed. Nothing is rolled back, so
    /// a failure partway through leaves a truncated file behind.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A record is switched on by an option but the data it needs was never set.
    #[error("{package}: `{field}` is required when {reason}")]
    MissingField {
        package: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid option flags: {0}")]
    InvalidOptions(String),

    #[error("Unsupported starting locations input style {0} (only style 1 is supported)")]
    UnsupportedInputStyle(i32),

    #[error("{field} '{value}' is longer than {max} bytes")]
    TextTooLong {
        field: &'static str,
        value: String,
        max: usize,
    },

    #[error("Array '{name}' has {actual} values, expected {expected}")]
    ArrayShapeError {
        name: String,
        expected: usize,
        actual: usize,
    },
}

impl PackageError {
    pub fn missing(package: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        PackageError::MissingField {
            package,
            field,
            reason: reason.into(),
        }
    }
}
