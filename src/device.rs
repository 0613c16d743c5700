//! Torch device capability interface.
//!
//! The scheduler only ever sees this trait: two operations, activate and
//! deactivate, injected explicitly. Hardware lives behind `hal`, mocks
//! live in the tests. No ambient device handles.

/// Torch error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorchError {
    /// D01: No torch device could be acquired
    Unavailable,
    /// D02: Device present but has no torch capability
    FeatureMissing,
    /// D03: Taking exclusive control of the device failed
    ConfigurationFailed,
}

impl TorchError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable => "D01",
            Self::FeatureMissing => "D02",
            Self::ConfigurationFailed => "D03",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unavailable => "torch unavailable",
            Self::FeatureMissing => "torch feature missing",
            Self::ConfigurationFailed => "torch configuration failed",
        }
    }
}

impl core::fmt::Display for TorchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

/// Control over a binary light output.
///
/// Both operations are idempotent-safe: activating an already-lit torch
/// or deactivating a dark one must succeed without side effects.
/// Implementations report failures through [`TorchError`]; callers in the
/// core treat them as best-effort and never abort a sequence on one.
pub trait TorchControl {
    /// Turn the torch on.
    fn activate(&mut self) -> Result<(), TorchError>;

    /// Turn the torch off.
    fn deactivate(&mut self) -> Result<(), TorchError>;
}
