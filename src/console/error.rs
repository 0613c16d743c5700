//! Console error types

use crate::transmitter::SubmitError;

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Missing required argument
    MissingArg,
    /// E03: Dangerous command requires 'confirm'
    RequiresConfirm,
    /// E04: Torch permission denied
    PermissionDenied,
    /// E05: Torch permission still pending
    PermissionPending,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::MissingArg => "E02",
            Self::RequiresConfirm => "E03",
            Self::PermissionDenied => "E04",
            Self::PermissionPending => "E05",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::MissingArg => "missing argument",
            Self::RequiresConfirm => "requires 'confirm'",
            Self::PermissionDenied => "torch permission denied",
            Self::PermissionPending => "torch permission pending",
        }
    }
}

impl From<SubmitError> for ConsoleError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::PermissionDenied => Self::PermissionDenied,
            SubmitError::PermissionPending => Self::PermissionPending,
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
