//! Transmitter tests: permission gating and invocation serialization

use morse_torch::device::{TorchControl, TorchError};
use morse_torch::fault::FaultState;
use morse_torch::permission::{FixedPermission, PermissionStatus};
use morse_torch::scheduler::FlashTiming;
use morse_torch::transmitter::{SubmitError, Transmitter};

const MS: i64 = 1000;

/// Records on/off calls in order.
struct RecordingTorch {
    events: Vec<bool>,
}

impl RecordingTorch {
    fn new() -> Self {
        Self { events: Vec::new() }
    }

    fn lit(&self) -> bool {
        *self.events.last().unwrap_or(&false)
    }
}

impl TorchControl for RecordingTorch {
    fn activate(&mut self) -> Result<(), TorchError> {
        self.events.push(true);
        Ok(())
    }

    fn deactivate(&mut self) -> Result<(), TorchError> {
        self.events.push(false);
        Ok(())
    }
}

fn run_to_completion(tx: &mut Transmitter<'_>, torch: &mut RecordingTorch, start_us: i64) -> i64 {
    let mut now = start_us;
    while tx.is_sending() {
        tx.tick(now, torch);
        now += 10 * MS;
    }
    now
}

#[test]
fn test_denied_permission_blocks_submission() {
    let fault = FaultState::new();
    let mut torch = RecordingTorch::new();
    let mut gate = FixedPermission(PermissionStatus::Denied);
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);

    let result = tx.submit("sos", &mut torch, &mut gate);

    assert_eq!(result, Err(SubmitError::PermissionDenied));
    assert!(!tx.is_sending());
    assert!(torch.events.is_empty(), "no device calls without permission");
}

#[test]
fn test_pending_permission_blocks_submission() {
    let fault = FaultState::new();
    let mut torch = RecordingTorch::new();
    let mut gate = FixedPermission(PermissionStatus::Pending);
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);

    assert_eq!(
        tx.submit("sos", &mut torch, &mut gate),
        Err(SubmitError::PermissionPending)
    );
    assert!(torch.events.is_empty());
}

#[test]
fn test_granted_submission_plays_to_completion() {
    let fault = FaultState::new();
    let mut torch = RecordingTorch::new();
    let mut gate = FixedPermission(PermissionStatus::Granted);
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);

    tx.submit("E", &mut torch, &mut gate).unwrap();
    assert!(tx.is_sending());

    run_to_completion(&mut tx, &mut torch, 0);

    assert!(!tx.is_sending());
    assert_eq!(torch.events, vec![true, false]);
    assert_eq!(fault.count(), 0);
}

#[test]
fn test_resubmit_cancels_in_flight_without_leaking() {
    let fault = FaultState::new();
    let mut torch = RecordingTorch::new();
    let mut gate = FixedPermission(PermissionStatus::Granted);
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);

    tx.submit("sos", &mut torch, &mut gate).unwrap();
    tx.tick(0, &mut torch);
    assert!(torch.lit(), "first pulse in flight");

    // Second submission lands mid-pulse
    tx.submit("E", &mut torch, &mut gate).unwrap();
    assert!(!torch.lit(), "in-flight pulse forced off before rearming");

    let end = run_to_completion(&mut tx, &mut torch, 10 * MS);
    assert!(end > 0);

    // Whole history still strictly alternates, ends dark
    for pair in torch.events.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
    assert!(!torch.lit());
}

#[test]
fn test_cancel_when_idle_is_noop() {
    let fault = FaultState::new();
    let mut torch = RecordingTorch::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);

    tx.cancel(&mut torch);
    assert!(torch.events.is_empty());
}

#[test]
fn test_cancel_mid_flight_forces_off() {
    let fault = FaultState::new();
    let mut torch = RecordingTorch::new();
    let mut gate = FixedPermission(PermissionStatus::Granted);
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);

    tx.submit("O", &mut torch, &mut gate).unwrap();
    tx.tick(0, &mut torch);
    assert!(torch.lit());

    tx.cancel(&mut torch);
    assert!(!tx.is_sending());
    assert!(!torch.lit());

    // Ticks after cancel touch nothing
    let count = torch.events.len();
    tx.tick(5000 * MS, &mut torch);
    assert_eq!(torch.events.len(), count);
}

#[test]
fn test_progress_reports_in_flight_only() {
    let fault = FaultState::new();
    let mut torch = RecordingTorch::new();
    let mut gate = FixedPermission(PermissionStatus::Granted);
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);

    assert!(tx.progress().is_none());

    tx.submit("SOS", &mut torch, &mut gate).unwrap();
    let (done, total) = tx.progress().unwrap();
    assert_eq!(done, 0);
    assert_eq!(total, "... --- ...~".len());

    run_to_completion(&mut tx, &mut torch, 0);
    assert!(tx.progress().is_none());
}

#[test]
fn test_empty_submission_terminates_immediately() {
    let fault = FaultState::new();
    let mut torch = RecordingTorch::new();
    let mut gate = FixedPermission(PermissionStatus::Granted);
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);

    tx.submit("", &mut torch, &mut gate).unwrap();
    assert!(tx.is_sending());

    tx.tick(0, &mut torch);
    assert!(!tx.is_sending());
    assert!(torch.events.is_empty());
}
