//! Flash scheduler finite state machine.
//!
//! Pure logic, no hardware dependencies. Consumes an encoded Morse
//! message, drives a [`TorchControl`] capability. Fully testable on host.
//!
//! No timers of its own: the sequence is an explicit FSM advanced by an
//! external driver calling [`FlashScheduler::tick`] with the current
//! time. Tests single-step it with a simulated clock, the firmware loop
//! steps it with the system timer.
//!
//! ```text
//! Idle ──▶ Emitting(index, active) ──▶ ... ──▶ Terminated
//!              │        ▲
//!              └────────┘  advance after max(gap, pulse)
//! ```

use crate::device::TorchControl;
use crate::fault::FaultState;
use crate::morse::{EncodedMessage, DASH, DOT, TERMINATOR, WORD_SPACE};

/// Pulse timing table.
///
/// Fixed, informal durations, tuned for eyeball decoding rather than
/// any CW standard: short flash for a dot, longer for a dash, longest
/// for a word space, and a uniform inter-symbol gap. Symbols without an
/// entry (the code separator) have zero duration.
#[derive(Clone, Copy, Debug)]
pub struct FlashTiming {
    /// Dot pulse length in milliseconds.
    pub dot_ms: u32,

    /// Dash pulse length in milliseconds.
    pub dash_ms: u32,

    /// Word-space pulse length in milliseconds.
    pub word_space_ms: u32,

    /// Inter-symbol gap in milliseconds.
    pub symbol_gap_ms: u32,
}

impl Default for FlashTiming {
    fn default() -> Self {
        Self {
            dot_ms: 400,
            dash_ms: 700,
            word_space_ms: 1000,
            symbol_gap_ms: 800,
        }
    }
}

impl FlashTiming {
    /// Pulse duration for a symbol in microseconds (zero if unlisted).
    #[inline]
    pub fn pulse_duration_us(&self, symbol: u8) -> i64 {
        let ms = match symbol {
            DOT => self.dot_ms,
            DASH => self.dash_ms,
            WORD_SPACE => self.word_space_ms,
            _ => 0,
        };
        ms as i64 * 1000
    }

    /// Inter-symbol gap in microseconds.
    #[inline]
    pub fn gap_duration_us(&self) -> i64 {
        self.symbol_gap_ms as i64 * 1000
    }

    /// Time from symbol start to the next symbol, in microseconds.
    ///
    /// The gap paces dot and dash uniformly; a pulse that outlives the
    /// gap (the word space) delays the advance until its off-phase, so
    /// the torch is never carried lit into the next symbol.
    #[inline]
    pub fn advance_duration_us(&self, symbol: u8) -> i64 {
        let pulse = self.pulse_duration_us(symbol);
        let gap = self.gap_duration_us();
        if pulse > gap {
            pulse
        } else {
            gap
        }
    }
}

/// Scheduler state tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Created, no symbol started yet.
    Idle,
    /// Walking the message, pulse deadlines armed.
    Emitting,
    /// Terminal marker reached (or cancelled). Torch is off.
    Terminated,
}

/// Flash scheduler.
///
/// Owns one encoded message and walks it symbol by symbol, toggling the
/// injected torch capability. Reaching the terminal marker - or running
/// off the end of a malformed message - ends the invocation for good.
///
/// Activate and deactivate calls strictly alternate. Device errors are
/// latched in the shared [`FaultState`] and the affected pulse is
/// skipped; the sequence itself continues (best-effort signaling).
///
/// # Example
///
/// ```
/// use morse_torch::morse::encode;
/// use morse_torch::scheduler::{FlashScheduler, FlashTiming, SchedulerState};
/// use morse_torch::fault::FaultState;
/// # use morse_torch::device::{TorchControl, TorchError};
/// # struct NullTorch;
/// # impl TorchControl for NullTorch {
/// #     fn activate(&mut self) -> Result<(), TorchError> { Ok(()) }
/// #     fn deactivate(&mut self) -> Result<(), TorchError> { Ok(()) }
/// # }
///
/// let fault = FaultState::new();
/// let mut torch = NullTorch;
/// let mut sched = FlashScheduler::new(encode("E"), FlashTiming::default(), &fault);
///
/// // First tick starts the dot pulse
/// assert_eq!(sched.tick(0, &mut torch), SchedulerState::Emitting);
/// assert!(sched.signal_active());
/// ```
pub struct FlashScheduler<'a> {
    message: EncodedMessage,
    timing: FlashTiming,
    fault: &'a FaultState,

    // Cursor state, touched only by tick/cancel
    state: SchedulerState,
    index: usize,
    signal_active: bool,
    off_at_us: i64,
    advance_at_us: i64,
}

impl<'a> FlashScheduler<'a> {
    /// Create a scheduler for one message. Starts in `Idle`.
    pub fn new(message: EncodedMessage, timing: FlashTiming, fault: &'a FaultState) -> Self {
        Self {
            message,
            timing,
            fault,
            state: SchedulerState::Idle,
            index: 0,
            signal_active: false,
            off_at_us: 0,
            advance_at_us: 0,
        }
    }

    /// Advance the FSM against the current clock.
    ///
    /// # Arguments
    ///
    /// * `now_us` - Current timestamp in microseconds
    /// * `torch` - Device capability to drive
    ///
    /// Call at any cadence; deadlines that have passed are acted on at
    /// the next call. Once `Terminated` is returned no further device
    /// calls occur.
    pub fn tick(&mut self, now_us: i64, torch: &mut dyn TorchControl) -> SchedulerState {
        match self.state {
            SchedulerState::Idle => {
                self.begin_symbol(now_us, torch);
            }
            SchedulerState::Emitting => {
                if self.signal_active && now_us >= self.off_at_us {
                    self.drive(torch, false);
                }
                if now_us >= self.advance_at_us {
                    self.index += 1;
                    self.begin_symbol(now_us, torch);
                }
            }
            SchedulerState::Terminated => {}
        }
        self.state
    }

    /// Abort the invocation, forcing the torch off if lit.
    pub fn cancel(&mut self, torch: &mut dyn TorchControl) {
        if self.signal_active {
            self.drive(torch, false);
        }
        self.state = SchedulerState::Terminated;
    }

    /// Current state tag.
    #[inline]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// True once the terminal marker has been consumed.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.state == SchedulerState::Terminated
    }

    /// True while a pulse is commanded on.
    #[inline]
    pub fn signal_active(&self) -> bool {
        self.signal_active
    }

    /// Cursor position and message length, for diagnostics.
    pub fn progress(&self) -> (usize, usize) {
        (self.index.min(self.message.len()), self.message.len())
    }

    // --- Private methods ---

    /// Start the symbol under the cursor, or terminate on the marker.
    ///
    /// Running off the end of the buffer counts as the marker: a message
    /// that lost its terminator must still halt.
    fn begin_symbol(&mut self, now_us: i64, torch: &mut dyn TorchControl) {
        let symbol = self.message.symbol(self.index).unwrap_or(TERMINATOR);

        if symbol == TERMINATOR {
            if self.signal_active {
                self.drive(torch, false);
            }
            self.index = self.message.len();
            self.state = SchedulerState::Terminated;
            return;
        }

        if !self.signal_active {
            self.drive(torch, true);
        }
        self.off_at_us = now_us + self.timing.pulse_duration_us(symbol);
        self.advance_at_us = now_us + self.timing.advance_duration_us(symbol);
        self.state = SchedulerState::Emitting;
    }

    /// Issue a device call and track the commanded state.
    ///
    /// On error the fault is latched with the symbol index and the flag
    /// is updated anyway: the pulse is skipped, not retried, and the
    /// rest of the message still plays.
    fn drive(&mut self, torch: &mut dyn TorchControl, on: bool) {
        let result = if on {
            torch.activate()
        } else {
            torch.deactivate()
        };
        if let Err(err) = result {
            self.fault.set(err.into(), self.index as u32);
        }
        self.signal_active = on;
    }
}
