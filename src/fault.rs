//! Device fault latch for MorseTorch.
//!
//! Signaling is best-effort: a pulse that cannot reach the torch is
//! skipped, never fatal. The scheduler records what went wrong here and
//! keeps walking the message; the main loop drains the latch into the
//! log. Lock-free, atomics only.

use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

use crate::device::TorchError;

/// Fault codes for device-layer failures (`None` means no fault latched).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault latched.
    None = 0,

    /// No torch device could be acquired.
    DeviceUnavailable = 1,

    /// Device present but lacks the torch capability.
    FeatureMissing = 2,

    /// Acquiring exclusive control of the device failed.
    ConfigurationFailed = 3,
}

impl FaultCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::DeviceUnavailable,
            2 => FaultCode::FeatureMissing,
            3 => FaultCode::ConfigurationFailed,
            _ => FaultCode::None,
        }
    }

    /// Short name for log output.
    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::None => "none",
            FaultCode::DeviceUnavailable => "device unavailable",
            FaultCode::FeatureMissing => "feature missing",
            FaultCode::ConfigurationFailed => "configuration failed",
        }
    }
}

impl From<TorchError> for FaultCode {
    fn from(err: TorchError) -> Self {
        match err {
            TorchError::Unavailable => FaultCode::DeviceUnavailable,
            TorchError::FeatureMissing => FaultCode::FeatureMissing,
            TorchError::ConfigurationFailed => FaultCode::ConfigurationFailed,
        }
    }
}

/// Thread-safe fault latch.
///
/// A non-`None` code means a fault is waiting to be reported. `set`
/// overwrites an unreported fault (last one wins - the count still
/// reflects every occurrence). The total count is never cleared.
///
/// # Usage
///
/// ```ignore
/// static FAULT: FaultState = FaultState::new();
///
/// // In the scheduler, on a failed device call:
/// FAULT.set(err.into(), symbol_index as u32);
///
/// // In the main loop:
/// if let Some(snapshot) = FAULT.take() {
///     log_warn!(LOG, now, "torch fault: {}", snapshot.code.as_str());
/// }
/// ```
pub struct FaultState {
    /// Latched fault code (0 = none).
    code: AtomicU8,

    /// Payload: symbol index at which the fault occurred.
    data: AtomicU32,

    /// Total fault count since boot (never cleared).
    count: AtomicU32,
}

impl FaultState {
    /// Create a new latch with no fault.
    pub const fn new() -> Self {
        Self {
            code: AtomicU8::new(0),
            data: AtomicU32::new(0),
            count: AtomicU32::new(0),
        }
    }

    /// Latch a fault with its payload and bump the counter.
    #[inline]
    pub fn set(&self, code: FaultCode, data: u32) {
        self.data.store(data, Ordering::Release);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.code.store(code as u8, Ordering::Release);
    }

    /// Check whether a fault is waiting to be reported.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.code.load(Ordering::Acquire) != 0
    }

    /// Take the latched fault, clearing it. `None` when nothing waits.
    ///
    /// The cumulative count is preserved for diagnostics.
    #[inline]
    pub fn take(&self) -> Option<FaultSnapshot> {
        let raw = self.code.swap(0, Ordering::AcqRel);
        if raw == 0 {
            return None;
        }
        Some(FaultSnapshot {
            code: FaultCode::from_u8(raw),
            data: self.data.load(Ordering::Acquire),
            count: self.count(),
        })
    }

    /// Total fault count since boot.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of a latched fault.
#[derive(Clone, Copy, Debug)]
pub struct FaultSnapshot {
    pub code: FaultCode,
    pub data: u32,
    pub count: u32,
}
