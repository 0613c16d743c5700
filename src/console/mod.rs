//! Serial console: the user-facing surface.
//!
//! Line-oriented commands, polled lazily from the main loop one byte
//! at a time. Zero heap allocation - all static buffers.

pub mod commands;
pub mod console;
pub mod error;
pub mod parser;

pub use commands::{execute, CommandContext, COMMANDS};
pub use console::Console;
pub use error::ConsoleError;
pub use parser::{parse_line, ParsedCommand};
