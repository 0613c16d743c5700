//! Transmission control: one invocation at a time.
//!
//! Two schedulers running against one torch would fight over it - last
//! activation wins and a stray deactivation can leave the torch lit. So
//! at most one scheduler invocation exists; submitting new text cancels
//! the one in flight before arming the next, and nothing is armed unless
//! the permission gate answers `Granted`.

use crate::device::TorchControl;
use crate::fault::FaultState;
use crate::morse::encode;
use crate::permission::{PermissionGate, PermissionStatus};
use crate::scheduler::{FlashScheduler, FlashTiming};

/// Why a submission was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Permission to use the torch was refused.
    PermissionDenied,
    /// Permission is still being decided; try again later.
    PermissionPending,
}

impl SubmitError {
    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "torch permission denied",
            Self::PermissionPending => "torch permission pending",
        }
    }
}

/// Serializes Morse transmissions against a single torch.
///
/// Owns the fixed timing table and at most one live [`FlashScheduler`].
/// The driver loop calls [`Transmitter::tick`]; the console calls
/// [`Transmitter::submit`] and [`Transmitter::cancel`].
pub struct Transmitter<'a> {
    timing: FlashTiming,
    fault: &'a FaultState,
    scheduler: Option<FlashScheduler<'a>>,
}

impl<'a> Transmitter<'a> {
    /// Create an idle transmitter.
    pub fn new(timing: FlashTiming, fault: &'a FaultState) -> Self {
        Self {
            timing,
            fault,
            scheduler: None,
        }
    }

    /// Encode `text` and start signaling it.
    ///
    /// Checks the permission gate first; anything but `Granted` refuses
    /// the submission without touching the device. An in-flight
    /// transmission is cancelled (torch forced off) before the new one
    /// is armed - the first tick afterwards starts the first pulse.
    pub fn submit(
        &mut self,
        text: &str,
        torch: &mut dyn TorchControl,
        permission: &mut dyn PermissionGate,
    ) -> Result<(), SubmitError> {
        match permission.check() {
            PermissionStatus::Granted => {}
            PermissionStatus::Denied => return Err(SubmitError::PermissionDenied),
            PermissionStatus::Pending => return Err(SubmitError::PermissionPending),
        }

        self.cancel(torch);
        self.scheduler = Some(FlashScheduler::new(encode(text), self.timing, self.fault));
        Ok(())
    }

    /// Drive the in-flight transmission, if any.
    pub fn tick(&mut self, now_us: i64, torch: &mut dyn TorchControl) {
        if let Some(sched) = self.scheduler.as_mut() {
            sched.tick(now_us, torch);
            if sched.is_terminated() {
                self.scheduler = None;
            }
        }
    }

    /// Cancel the in-flight transmission. Idle is a no-op.
    pub fn cancel(&mut self, torch: &mut dyn TorchControl) {
        if let Some(mut sched) = self.scheduler.take() {
            sched.cancel(torch);
        }
    }

    /// True while a transmission is in flight.
    #[inline]
    pub fn is_sending(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Cursor and length of the in-flight message, for diagnostics.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.scheduler.as_ref().map(|s| s.progress())
    }
}
