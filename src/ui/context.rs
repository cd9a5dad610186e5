//! Drawing context handed to overlays.
//!
//! [`DrawContext`] is the narrow capability a dialog needs to draw itself: a
//! backdrop shape, a handful of text settings and text placement. Coordinates
//! are relative to the screen center, so dialog layout does not depend on
//! the panel size.
//!
//! [`GraphicsContext`] implements it over any embedded-graphics target.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

use super::colors::ColorToken;
use super::primitives::Hexagon;
use super::styles::{FontSize, TextAlign, TextBaseline, text_style};
use crate::config::{BACKDROP_RADIUS, CENTER_X, CENTER_Y};

/// Translucent layer drawn behind a dialog.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Backdrop {
    /// Hexagon radius around the screen center.
    pub radius: u32,
    pub color: ColorToken,
}

impl Backdrop {
    /// Backdrop shared by every dialog.
    pub const DIALOG: Self = Self {
        radius: BACKDROP_RADIUS,
        color: ColorToken::Backdrop,
    };
}

impl Default for Backdrop {
    fn default() -> Self { Self::DIALOG }
}

/// Drawing operations available to overlays.
pub trait DrawContext {
    /// Draw a translucent backdrop centered on the screen.
    fn backdrop(
        &mut self,
        backdrop: Backdrop,
    );

    fn set_font_size(
        &mut self,
        size: FontSize,
    );

    fn set_align(
        &mut self,
        align: TextAlign,
    );

    fn set_baseline(
        &mut self,
        baseline: TextBaseline,
    );

    fn set_color(
        &mut self,
        color: ColorToken,
    );

    /// Place `text` at (`x`, `y`) from the screen center with the current
    /// settings.
    fn text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
    );
}

/// [`DrawContext`] over an embedded-graphics draw target.
pub struct GraphicsContext<'d, D> {
    display: &'d mut D,
    font_size: FontSize,
    align: TextAlign,
    baseline: TextBaseline,
    color: ColorToken,
}

impl<'d, D> GraphicsContext<'d, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap `display` with default settings (label font, centered, label color).
    pub fn new(display: &'d mut D) -> Self {
        Self {
            display,
            font_size: FontSize::default(),
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
            color: ColorToken::default(),
        }
    }

    /// Screen position of a center-relative offset.
    #[inline]
    pub const fn to_screen(
        x: i32,
        y: i32,
    ) -> Point {
        Point::new(CENTER_X + x, CENTER_Y + y)
    }
}

impl<D> DrawContext for GraphicsContext<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn backdrop(
        &mut self,
        backdrop: Backdrop,
    ) {
        Hexagon::new(Self::to_screen(0, 0), backdrop.radius).draw_stippled(&mut *self.display, backdrop.color.color());
    }

    fn set_font_size(
        &mut self,
        size: FontSize,
    ) {
        self.font_size = size;
    }

    fn set_align(
        &mut self,
        align: TextAlign,
    ) {
        self.align = align;
    }

    fn set_baseline(
        &mut self,
        baseline: TextBaseline,
    ) {
        self.baseline = baseline;
    }

    fn set_color(
        &mut self,
        color: ColorToken,
    ) {
        self.color = color;
    }

    fn text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
    ) {
        let character_style = MonoTextStyle::new(self.font_size.font(), self.color.color());
        Text::with_text_style(
            text,
            Self::to_screen(x, y),
            character_style,
            text_style(self.align, self.baseline),
        )
        .draw(&mut *self.display)
        .ok();
    }
}
