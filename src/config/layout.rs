//! Display and dialog layout constants.
//!
//! Dialogs draw in a coordinate system centered on the screen (the origin is
//! the middle of the display), so most offsets below are relative to
//! [`CENTER_X`]/[`CENTER_Y`]. Positions are `const` so nothing is recomputed
//! per frame.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7789 on Pimoroni PIM715: 320x240)
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Screen center X coordinate, the dialog origin.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate, the dialog origin.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

// =============================================================================
// Dialog Layout
// =============================================================================

/// Circumradius of the hexagonal backdrop behind every dialog.
///
/// A flat-topped hexagon of radius 120 is 240 px wide and ~208 px tall, so it
/// fits the 240 px tall panel with a small margin.
pub const BACKDROP_RADIUS: u32 = 120;

/// Vertical distance between stacked message lines.
pub const LINE_HEIGHT: i32 = 18;

/// Offset of the text-entry prompt line from the center.
pub const PROMPT_OFFSET_Y: i32 = -15;

/// Offset of the text-entry input line ("buffer[c]") from the center.
pub const ENTRY_OFFSET_Y: i32 = 15;

/// Widest input line that stays inside the backdrop at [`ENTRY_OFFSET_Y`].
///
/// The hexagon is ~210 px wide at the bottom edge of the entry font, so
/// longer buffers are shown by their tail.
pub const ENTRY_MAX_WIDTH: u32 = 200;

/// Left margin of the host home screen.
pub const HOME_MARGIN_X: i32 = 4;
