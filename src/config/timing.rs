//! Timing configuration.
//!
//! All durations are plain milliseconds so the library does not depend on a
//! time driver; the host supplies an `embedded_hal_async` delay at runtime.

/// Hold time before auto-repeat starts. Separates a tap from a hold.
pub const REPEAT_INITIAL_DELAY_MS: u32 = 1000;

/// Interval between auto-repeat steps while a direction is held.
pub const REPEAT_INTERVAL_MS: u32 = 250;

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// How often the firmware samples the button GPIOs.
pub const BUTTON_POLL_MS: u64 = 10;

/// Target frame time (~50 FPS) of the firmware render trigger.
pub const FRAME_MS: u64 = 20;

/// Auto-repeat timing for the text-entry cursor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepeatTiming {
    /// Pause between the press and the first repeated step.
    pub initial_delay_ms: u32,
    /// Pause between consecutive repeated steps.
    pub interval_ms: u32,
}

impl RepeatTiming {
    /// One second to start repeating, then four steps per second.
    pub const DEFAULT: Self = Self {
        initial_delay_ms: REPEAT_INITIAL_DELAY_MS,
        interval_ms: REPEAT_INTERVAL_MS,
    };

    pub const fn new(
        initial_delay_ms: u32,
        interval_ms: u32,
    ) -> Self {
        Self {
            initial_delay_ms,
            interval_ms,
        }
    }
}

impl Default for RepeatTiming {
    fn default() -> Self { Self::DEFAULT }
}
