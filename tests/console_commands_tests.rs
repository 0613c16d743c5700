//! Console command tests against mock collaborators

use morse_torch::console::{execute, parse_line, CommandContext, ConsoleError};
use morse_torch::device::{TorchControl, TorchError};
use morse_torch::fault::FaultState;
use morse_torch::logging::LogStream;
use morse_torch::permission::{FixedPermission, PermissionStatus};
use morse_torch::scheduler::FlashTiming;
use morse_torch::transmitter::Transmitter;

struct MockTorch {
    calls: usize,
}

impl TorchControl for MockTorch {
    fn activate(&mut self) -> Result<(), TorchError> {
        self.calls += 1;
        Ok(())
    }

    fn deactivate(&mut self) -> Result<(), TorchError> {
        self.calls += 1;
        Ok(())
    }
}

/// Run one command line against a fresh world, returning its result and
/// whatever it wrote.
fn run_line(
    line: &str,
    tx: &mut Transmitter<'_>,
    torch: &mut MockTorch,
    gate: &mut FixedPermission,
    fault: &FaultState,
    log: &LogStream,
) -> (Result<(), ConsoleError>, String) {
    let mut out = String::new();
    let mut ctx = CommandContext {
        transmitter: tx,
        torch,
        permission: gate,
        fault,
        log,
        now_us: 0,
    };
    let cmd = parse_line(line);
    let result = execute(&cmd, &mut ctx, &mut out);
    (result, out)
}

#[test]
fn test_empty_line_is_noop() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Granted);

    let (result, out) = run_line("", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert!(result.is_ok());
    assert!(out.is_empty());
}

#[test]
fn test_unknown_command() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Granted);

    let (result, _) = run_line("morsify", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert_eq!(result, Err(ConsoleError::UnknownCommand));
}

#[test]
fn test_help_lists_all_commands() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Granted);

    let (result, out) = run_line("help", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert!(result.is_ok());
    for name in ["help", "send", "stop", "status", "reboot"] {
        assert!(out.contains(name), "help output missing {}", name);
    }
}

#[test]
fn test_send_echoes_encoding_and_arms_transmitter() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Granted);

    let (result, out) = run_line("send sos", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert!(result.is_ok());
    assert!(out.contains("... --- ...~"));
    assert!(tx.is_sending());
}

#[test]
fn test_send_takes_whole_phrase() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Granted);

    let (result, out) = run_line("send hello world", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert!(result.is_ok());
    assert!(out.contains(".... . .-.. .-.. --- _ .-- --- .-. .-.. -..~"));
}

#[test]
fn test_send_without_text() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Granted);

    let (result, _) = run_line("send", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert_eq!(result, Err(ConsoleError::MissingArg));
    assert!(!tx.is_sending());
}

#[test]
fn test_send_with_permission_denied() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Denied);

    let (result, _) = run_line("send sos", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert_eq!(result, Err(ConsoleError::PermissionDenied));
    assert!(!tx.is_sending());
    assert_eq!(torch.calls, 0, "denied send must not touch the device");
}

#[test]
fn test_send_with_permission_pending() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Pending);

    let (result, _) = run_line("send sos", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert_eq!(result, Err(ConsoleError::PermissionPending));
}

#[test]
fn test_stop_idle_and_in_flight() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Granted);

    let (result, out) = run_line("stop", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert!(result.is_ok());
    assert!(out.contains("nothing in flight"));

    run_line("send sos", &mut tx, &mut torch, &mut gate, &fault, &log).0.unwrap();
    let (result, out) = run_line("stop", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert!(result.is_ok());
    assert!(out.contains("stopped"));
    assert!(!tx.is_sending());
}

#[test]
fn test_status_reports_state_permission_and_counters() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Granted);

    let (_, out) = run_line("status", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert!(out.contains("state: idle"));
    assert!(out.contains("permission: granted"));
    assert!(out.contains("faults: 0"));
    assert!(out.contains("log drops: 0"));

    run_line("send sos", &mut tx, &mut torch, &mut gate, &fault, &log).0.unwrap();
    let (_, out) = run_line("status", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert!(out.contains("state: sending (0/12 symbols)"));
}

#[test]
fn test_reboot_requires_confirm() {
    let fault = FaultState::new();
    let log = LogStream::new();
    let mut tx = Transmitter::new(FlashTiming::default(), &fault);
    let mut torch = MockTorch { calls: 0 };
    let mut gate = FixedPermission(PermissionStatus::Granted);

    let (result, _) = run_line("reboot", &mut tx, &mut torch, &mut gate, &fault, &log);
    assert_eq!(result, Err(ConsoleError::RequiresConfirm));
}
