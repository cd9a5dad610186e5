//! Application configuration.
//!
//! - `layout`: Display dimensions and dialog layout constants
//! - `timing`: Auto-repeat, debounce and frame timing

pub mod layout;
pub mod timing;

// Re-export at config level for convenience
pub use layout::{
    BACKDROP_RADIUS,
    CENTER_X,
    CENTER_Y,
    ENTRY_MAX_WIDTH,
    ENTRY_OFFSET_Y,
    HOME_MARGIN_X,
    LINE_HEIGHT,
    PROMPT_OFFSET_Y,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
pub use timing::{
    BUTTON_POLL_MS,
    DEBOUNCE_MS,
    FRAME_MS,
    REPEAT_INITIAL_DELAY_MS,
    REPEAT_INTERVAL_MS,
    RepeatTiming,
};
