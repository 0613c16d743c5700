//! # MorseTorch
//!
//! Text-to-Morse torch signaler.
//!
//! ## Architecture
//!
//! Text flows one way: console input is encoded into a symbol string,
//! a tick-driven scheduler walks it and toggles the injected torch
//! capability. Components are isolated:
//! - Encoding is pure and table-driven, no I/O
//! - The scheduler sees only the [`device::TorchControl`] trait
//! - Hardware and permission answers are injected, never ambient
//!
//! Everything except `hal` and the entry point runs host-side in tests.

#![cfg_attr(not(test), no_std)]

pub mod console;
pub mod device;
pub mod fault;
pub mod hal;
pub mod logging;
pub mod morse;
pub mod permission;
pub mod scheduler;
pub mod transmitter;

pub use device::{TorchControl, TorchError};
pub use fault::{FaultCode, FaultState};
pub use logging::LogStream;
pub use morse::{encode, EncodedMessage};
pub use permission::{PermissionGate, PermissionStatus};
pub use scheduler::{FlashScheduler, FlashTiming, SchedulerState};
pub use transmitter::Transmitter;
