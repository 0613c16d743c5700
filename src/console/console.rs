//! Console input state machine

use core::fmt::Write;

use super::commands::{execute, CommandContext};
use super::parser::parse_line;
use super::ConsoleError;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Line buffer capacity. Bounds the longest `send` phrase.
pub const LINE_SIZE: usize = 128;

/// Console state machine
///
/// Fed one byte at a time from the serial port. Completed lines are
/// parsed and executed against the injected [`CommandContext`].
pub struct Console {
    buf: [u8; LINE_SIZE],
    len: usize,
    /// Escape sequence state
    escape_state: EscapeState,
}

#[derive(Clone, Copy, PartialEq)]
enum EscapeState {
    Normal,
    Escape,  // Got ESC
    Bracket, // Got ESC [
}

impl Console {
    /// Create new console
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
            escape_state: EscapeState::Normal,
        }
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a command completed, None if more input
    /// is needed.
    pub fn process_byte(
        &mut self,
        byte: u8,
        ctx: &mut CommandContext<'_, '_>,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        match self.escape_state {
            EscapeState::Normal => self.process_normal(byte, ctx, out),
            EscapeState::Escape => {
                self.escape_state = if byte == b'[' {
                    EscapeState::Bracket
                } else {
                    EscapeState::Normal
                };
                None
            }
            EscapeState::Bracket => {
                // Swallow the final byte of CSI sequences (arrow keys etc.)
                self.escape_state = EscapeState::Normal;
                None
            }
        }
    }

    fn process_normal(
        &mut self,
        byte: u8,
        ctx: &mut CommandContext<'_, '_>,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        match byte {
            // Enter
            b'\r' | b'\n' => {
                let _ = writeln!(out);
                let line = self.as_str();

                if !line.is_empty() {
                    let cmd = parse_line(line);
                    let result = execute(&cmd, ctx, out);
                    if let Err(err) = result {
                        let _ = writeln!(out, "{}", err);
                    }
                    self.len = 0;
                    self.print_prompt(out);
                    return Some(result);
                }

                self.print_prompt(out);
                None
            }

            // Backspace
            0x7F | 0x08 => {
                if self.len > 0 {
                    self.len -= 1;
                    // Echo: backspace, space, backspace
                    let _ = write!(out, "\x08 \x08");
                }
                None
            }

            // Escape
            0x1B => {
                self.escape_state = EscapeState::Escape;
                None
            }

            // Ctrl+C
            0x03 => {
                let _ = writeln!(out, "^C");
                self.len = 0;
                self.print_prompt(out);
                None
            }

            // Ctrl+U (clear line)
            0x15 => {
                for _ in 0..self.len {
                    let _ = write!(out, "\x08 \x08");
                }
                self.len = 0;
                None
            }

            // Printable character
            0x20..=0x7E => {
                if self.len < LINE_SIZE {
                    self.buf[self.len] = byte;
                    self.len += 1;
                    let _ = write!(out, "{}", byte as char);
                }
                None
            }

            _ => None,
        }
    }

    /// Current line as a string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn Write) {
        let _ = write!(out, "{}> ", VERSION);
    }

    /// Print welcome banner
    pub fn print_banner(&self, out: &mut dyn Write) {
        let _ = writeln!(out, "\r\n{}", VERSION);
        let _ = writeln!(out, "Type 'help' for commands.\r");
        self.print_prompt(out);
    }
}
