use std::process::ExitCode;

use fusenest_svg::{DecodeError, EncodeError};

/// Process exit status for each failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Flags clap rejected.
    Usage = 1,
    /// A parts file, codec config or placed document that cannot be read or fails checks.
    Input = 2,
    /// Serializing the result or writing it out failed.
    Processing = 3,
}

impl From<ErrorCode> for ExitCode {
    fn from(code: ErrorCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
}

impl CliError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Usage, message)
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Input, message)
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Processing, message)
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        CliError::input(format!("could not decode placements: {err}"))
    }
}

impl From<EncodeError> for CliError {
    fn from(err: EncodeError) -> Self {
        CliError::input(format!("could not encode parts: {err}"))
    }
}
