//! Command line parser
//!
//! First word selects the command; everything after it is handed to the
//! handler verbatim, so `send` can take a whole phrase.

/// Parsed command line
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// The command name (first token)
    pub command: &'a str,
    /// Rest of the line, leading whitespace stripped
    pub rest: &'a str,
}

impl<'a> ParsedCommand<'a> {
    /// True when nothing follows the command name
    pub fn rest_is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

/// Parse a command line into command and remainder
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let line = line.trim();

    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => ParsedCommand {
            command,
            rest: rest.trim_start(),
        },
        None => ParsedCommand {
            command: line,
            rest: "",
        },
    }
}
