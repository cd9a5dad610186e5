//! Log buffer with levels and timestamps for on-device log viewing.
//!
//! Provides a circular buffer of log entries shown on the firmware home
//! screen. Each entry has a log level, message, and timestamp.
//!
//! # Log Levels
//!
//! - `Trace`: Dark gray - verbose debugging
//! - `Debug`: Gray - debugging information
//! - `Info`: Green - normal operation
//! - `Warn`: Yellow - warnings
//! - `Error`: Red - errors
//!
//! # Usage
//!
//! ```ignore
//! use dialogs_pico2::{log_debug, log_info, log_warn};
//!
//! log_info!("Dialog opened");
//! log_debug!("Cursor at {}", index);
//! log_warn!("Overlay stack full");
//! ```
//!
//! With the `defmt` feature the macros also forward to `defmt`. Timestamps
//! come from the clock installed with [`set_clock`]; until the host installs
//! one every entry is stamped 0.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::ui::colors::{DARK_GRAY, GRAY, GREEN, RED, YELLOW};

/// Maximum number of log entries to keep.
pub const LOG_ENTRIES: usize = 12;

/// Maximum characters per log message.
pub const LOG_MSG_LEN: usize = 40;

/// Formatting buffer used by the `log_*!` macros.
pub type LogLine = String<LOG_MSG_LEN>;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(dead_code)] // Trace has no macro, reserved for future use
pub enum LogLevel {
    /// Verbose debugging (dark gray)
    Trace = 0,
    /// Debug information (gray)
    Debug = 1,
    /// Normal operation (green)
    #[default]
    Info = 2,
    /// Warnings (yellow)
    Warn = 3,
    /// Errors (red)
    Error = 4,
}

impl LogLevel {
    /// Get the display color for this log level.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Trace => DARK_GRAY,
            Self::Debug => GRAY,
            Self::Info => GREEN,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }

    /// Get the single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// A single log entry with level, message, and timestamp.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Log message (truncated to `LOG_MSG_LEN - 1` characters).
    pub message: String<LOG_MSG_LEN>,
    /// Milliseconds since boot.
    pub timestamp_ms: u32,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp_ms: u32,
    ) -> Self {
        let mut msg: String<LOG_MSG_LEN> = String::new();
        for c in message.chars().take(LOG_MSG_LEN - 1) {
            if msg.push(c).is_err() {
                break;
            }
        }
        Self {
            level,
            message: msg,
            timestamp_ms,
        }
    }
}

/// Circular buffer of log entries.
pub struct LogBuffer {
    entries: [Option<LogEntry>; LOG_ENTRIES],
    head: usize, // Next write position
    count: usize,
    revision: u32,
}

impl LogBuffer {
    /// Create a new empty log buffer.
    pub const fn new() -> Self {
        Self {
            entries: [const { None }; LOG_ENTRIES],
            head: 0,
            count: 0,
            revision: 0,
        }
    }

    /// Push a new log entry. Oldest entry is dropped if buffer is full.
    pub fn push(
        &mut self,
        entry: LogEntry,
    ) {
        self.entries[self.head] = Some(entry);
        self.head = (self.head + 1) % LOG_ENTRIES;
        if self.count < LOG_ENTRIES {
            self.count += 1;
        }
        self.revision = self.revision.wrapping_add(1);
    }

    #[inline]
    pub const fn len(&self) -> usize { self.count }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.count == 0 }

    /// Changes on every push, so viewers can tell when to redraw.
    #[inline]
    pub const fn revision(&self) -> u32 { self.revision }

    /// Iterate over entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        let start = if self.count < LOG_ENTRIES { 0 } else { self.head };
        (0..self.count).filter_map(move |i| self.entries[(start + i) % LOG_ENTRIES].as_ref())
    }

    /// Iterate over the `n` newest entries, oldest first.
    pub fn latest(
        &self,
        n: usize,
    ) -> impl Iterator<Item = &LogEntry> {
        self.iter().skip(self.count.saturating_sub(n))
    }
}

impl Default for LogBuffer {
    fn default() -> Self { Self::new() }
}

/// Global log buffer protected by a mutex.
pub static LOG_BUFFER: Mutex<CriticalSectionRawMutex, LogBuffer> = Mutex::new(LogBuffer::new());

static CLOCK: BlockingMutex<CriticalSectionRawMutex, Cell<Option<fn() -> u32>>> = BlockingMutex::new(Cell::new(None));

/// Install the millisecond clock used to timestamp entries.
pub fn set_clock(clock: fn() -> u32) { CLOCK.lock(|c| c.set(Some(clock))); }

/// Current timestamp in milliseconds for logging (0 without a clock).
#[inline]
pub fn current_timestamp_ms() -> u32 { CLOCK.lock(Cell::get).map_or(0, |clock| clock()) }

/// Push a log entry to the global buffer.
///
/// This is non-blocking - if the mutex is held, the log is dropped.
pub fn push_log(
    level: LogLevel,
    message: &str,
) {
    let entry = LogEntry::new(level, message, current_timestamp_ms());

    if let Ok(mut buffer) = LOG_BUFFER.try_lock() {
        buffer.push(entry);
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:ident, $defmt:ident, $($arg:tt)*) => {{
        use core::fmt::Write as _;
        let mut buf = $crate::log_buffer::LogLine::new();
        let _ = write!(buf, $($arg)*);
        $crate::log_buffer::push_log($crate::log_buffer::LogLevel::$level, buf.as_str());
        #[cfg(feature = "defmt")]
        defmt::$defmt!($($arg)*);
    }};
}

/// Log a message at Debug level.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__log!(Debug, debug, $($arg)*) };
}

/// Log a message at Info level.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__log!(Info, info, $($arg)*) };
}

/// Log a message at Warn level.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::__log!(Warn, warn, $($arg)*) };
}

/// Log a message at Error level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::__log!(Error, error, $($arg)*) };
}
