//! Non-blocking logging for MorseTorch.
//!
//! The control path must never stall on serial output, so log calls
//! format into a fixed ring and return; the main loop drains the ring
//! to the serial port between ticks.
//!
//! ```text
//! control path            LogStream            main loop
//! ────────────            ─────────            ─────────
//! log_info!() ─────────▶ [E0][E1][E2] ──────▶ serial TX
//! non-blocking             fixed ring           blocking ok
//! ```
//!
//! Entries are dropped, and counted, when the ring is full. Single
//! producer, single consumer; both sides are the same thread in the
//! current firmware, the atomics keep it correct if they ever are not.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length in bytes.
pub const MAX_MSG_LEN: usize = 96;

/// Log ring size (number of entries). Must be a power of 2.
pub const LOG_RING_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Timestamp in microseconds.
    pub timestamp_us: i64,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const fn empty() -> Self {
        Self {
            timestamp_us: 0,
            level: LogLevel::Info,
            len: 0,
            msg: [0; MAX_MSG_LEN],
        }
    }

    /// Message as a string slice.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

/// Fixed-size SPSC log ring.
///
/// Push never blocks; a full ring drops the entry and counts it.
pub struct LogStream<const N: usize = LOG_RING_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: one producer, one consumer. The producer only writes the slot
// at write_idx before publishing it with a Release store; the consumer
// only reads slots at or before the published index.
unsafe impl<const N: usize> Sync for LogStream<N> {}
unsafe impl<const N: usize> Send for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: usize = N - 1;

    /// Create a new empty log stream.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "log ring size must be power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::empty(); N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a log entry. Returns `false` when the ring is full.
    #[inline]
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: single producer; this slot is not yet published.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Drain the next entry, or `None` when the ring is empty.
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;

        // SAFETY: single consumer, slot published by the producer.
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Count of messages dropped on overflow.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer over a fixed byte buffer, truncating on overflow.
struct BufWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> core::fmt::Write for BufWriter<'a> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = self.buf.len() - self.pos;
        let to_write = bytes.len().min(remaining);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Format a message into a buffer. Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Format a drained entry for serial output: `[timestamp] LEVEL: message`.
///
/// Returns the number of bytes written to `buf`.
pub fn format_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    use core::fmt::Write;

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = write!(
        writer,
        "[{:10}] {}: {}\r\n",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    );
    writer.pos
}

/// Non-blocking log macro.
///
/// # Example
///
/// ```ignore
/// torch_log!(LogLevel::Info, LOG_STREAM, now_us, "sending {} symbols", n);
/// ```
#[macro_export]
macro_rules! torch_log {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $stream.push($timestamp, $level, &buf[..len]);
    }};
}

/// Non-blocking info log.
#[macro_export]
macro_rules! log_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::torch_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

/// Non-blocking warning log.
#[macro_export]
macro_rules! log_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::torch_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

/// Non-blocking error log.
#[macro_export]
macro_rules! log_error {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::torch_log!($crate::logging::LogLevel::Error, $stream, $timestamp, $($arg)*)
    };
}

/// Non-blocking debug log.
#[macro_export]
macro_rules! log_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::torch_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}
