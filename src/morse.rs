//! Morse symbol table and text encoder.
//!
//! Pure logic, no hardware dependencies. Converts arbitrary input text
//! into the symbol string consumed by [`crate::scheduler::FlashScheduler`].
//!
//! The symbol alphabet is three characters: `.` (dot), `-` (dash) and
//! `_` (word space). Letter codes are joined with a single `' '`
//! separator and the whole message ends with the `~` terminator. The
//! terminator is the scheduler's only stop condition, so [`encode`]
//! guarantees it is always present.

/// Dot symbol (short pulse).
pub const DOT: u8 = b'.';

/// Dash symbol (long pulse).
pub const DASH: u8 = b'-';

/// Word-space symbol (longest pulse), produced by a space in the input.
pub const WORD_SPACE: u8 = b'_';

/// Separator between letter codes. Not part of the symbol alphabet;
/// the scheduler treats it as a zero-length pulse.
pub const SEPARATOR: u8 = b' ';

/// Terminal marker. Reserved, never produced by any table entry.
pub const TERMINATOR: u8 = b'~';

/// Encoded message capacity in bytes.
///
/// Sized for a full console line of input (128 characters): the longest
/// letter code is 4 symbols plus a separator, so 128 * 5 + 1, rounded up.
pub const MESSAGE_CAPACITY: usize = 768;

/// Look up the code for a single character.
///
/// Input must already be uppercased; lowercase letters return `None`.
/// Characters outside A-Z and space have no entry.
pub fn code_for(ch: char) -> Option<&'static str> {
    let code = match ch {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        ' ' => "_",
        _ => return None,
    };
    Some(code)
}

/// An encoded Morse message.
///
/// Fixed-capacity byte buffer, immutable once produced by [`encode`].
/// Owned by the scheduler invocation that consumes it.
#[derive(Clone)]
pub struct EncodedMessage {
    buf: [u8; MESSAGE_CAPACITY],
    len: usize,
}

impl EncodedMessage {
    const fn empty() -> Self {
        Self {
            buf: [0u8; MESSAGE_CAPACITY],
            len: 0,
        }
    }

    /// Build a message from raw symbol text, verbatim.
    ///
    /// No separator or terminator handling; truncates at capacity.
    /// Used for diagnostics and tests - [`encode`] is the normal
    /// constructor and the only one that guarantees a terminator.
    pub fn from_symbols(s: &str) -> Self {
        let mut msg = Self::empty();
        let bytes = s.as_bytes();
        let copy_len = bytes.len().min(MESSAGE_CAPACITY);
        msg.buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
        msg.len = copy_len;
        msg
    }

    /// Symbol at `index`, or `None` past the end.
    #[inline]
    pub fn symbol(&self, index: usize) -> Option<u8> {
        if index < self.len {
            Some(self.buf[index])
        } else {
            None
        }
    }

    /// Message length in symbols, separators and terminator included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the message holds no symbols at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Message as a string slice.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Append a letter code, with a separator if symbols precede it.
    ///
    /// Returns `false` (message unchanged) when the code would not fit
    /// with the terminator still reserved.
    fn push_code(&mut self, code: &str) -> bool {
        let sep = usize::from(self.len > 0);
        if self.len + sep + code.len() + 1 > MESSAGE_CAPACITY {
            return false;
        }
        if sep == 1 {
            self.buf[self.len] = SEPARATOR;
            self.len += 1;
        }
        self.buf[self.len..self.len + code.len()].copy_from_slice(code.as_bytes());
        self.len += code.len();
        true
    }

    fn push_terminator(&mut self) {
        // push_code always reserves this byte
        self.buf[self.len] = TERMINATOR;
        self.len += 1;
    }
}

/// Encode input text into a Morse message.
///
/// Input is uppercased before lookup. Characters without a table entry
/// are dropped, not an error. Letter codes are joined with a single
/// separator, word spaces included, and the terminator is appended last.
///
/// `encode("")` yields exactly `"~"`. `encode("SOS")` yields
/// `"... --- ...~"`. Deterministic: same input, same output.
///
/// Input that would overflow the buffer loses whole trailing codes;
/// the terminator is appended regardless.
pub fn encode(input: &str) -> EncodedMessage {
    let mut msg = EncodedMessage::empty();

    for ch in input.chars() {
        if let Some(code) = code_for(ch.to_ascii_uppercase()) {
            if !msg.push_code(code) {
                break;
            }
        }
    }

    msg.push_terminator();
    msg
}
