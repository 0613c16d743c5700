//! Torch permission collaborator.
//!
//! Checked exactly once per submission, before any scheduling happens.
//! The core never asks the device layer about permission directly; the
//! gate is injected, so tests and boards answer however they need to.

/// Outcome of a permission check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Use of the torch is allowed.
    Granted,
    /// Use of the torch was refused.
    Denied,
    /// A decision is still outstanding (e.g. a request dialog is open).
    Pending,
}

/// Permission check capability.
pub trait PermissionGate {
    /// Check, or request and check, permission to drive the torch.
    fn check(&mut self) -> PermissionStatus;
}

/// Gate with a fixed answer.
///
/// On-device the answer comes from whether the torch pin was brought up;
/// tests use it to script every branch.
#[derive(Clone, Copy, Debug)]
pub struct FixedPermission(pub PermissionStatus);

impl PermissionGate for FixedPermission {
    fn check(&mut self) -> PermissionStatus {
        self.0
    }
}
