//! Color constants and named color tokens.
//!
//! Dialogs never pick raw colors; they select a [`ColorToken`] and the
//! drawing context resolves it through [`ColorToken::color`]. Raw constants
//! use the built-in `RgbColor` values where one exists.
//!
//! ## Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! This format is native to the ST7789 and needs no conversion when writing
//! to the display.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Screen background and the backdrop stipple.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Dialog labels.
pub const WHITE: Rgb565 = Rgb565::WHITE;

pub const RED: Rgb565 = Rgb565::RED;

pub const GREEN: Rgb565 = Rgb565::GREEN;

pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Mid gray for secondary text (debug log lines).
/// RGB565: (16, 32, 16) - roughly 50% brightness.
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Dark gray for the faintest text (trace log lines).
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const DARK_GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Dark teal home screen background, so the stippled backdrop reads as a
/// darkened layer rather than plain black.
/// RGB565: (0, 20, 10).
pub const DARK_TEAL: Rgb565 = Rgb565::new(0, 20, 10);

// =============================================================================
// Color Tokens
// =============================================================================

/// Named colors used by dialogs.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorToken {
    /// Dialog message and input text.
    #[default]
    Label,
    /// Less prominent text.
    Muted,
    /// Translucent layer behind a dialog.
    Backdrop,
    /// Host screen background.
    Background,
}

impl ColorToken {
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Label => WHITE,
            Self::Muted => GRAY,
            Self::Backdrop => BLACK,
            Self::Background => DARK_TEAL,
        }
    }
}
