//! Backdrop primitive drawn behind dialogs.
//!
//! The ST7789 has no alpha blending, so translucency is faked with a 50%
//! stipple: only pixels where `x + y` is even are written, leaving the
//! host screen visible through the others.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};

/// sqrt(3) / 2 in thousandths, for the hexagon half height.
const SIN_60_MILLI: u32 = 866;

/// Flat-topped regular hexagon.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Hexagon {
    pub center: Point,
    /// Center to corner distance; corners sit left and right of the center.
    pub radius: u32,
}

impl Hexagon {
    pub const fn new(
        center: Point,
        radius: u32,
    ) -> Self {
        Self { center, radius }
    }

    /// Distance from the center to the top and bottom edges.
    #[inline]
    pub const fn half_height(&self) -> u32 { self.radius * SIN_60_MILLI / 1000 }

    pub fn bounding_box(&self) -> Rectangle {
        let r = self.radius as i32;
        let h = self.half_height() as i32;
        Rectangle::with_corners(self.center - Point::new(r, h), self.center + Point::new(r, h))
    }

    /// Whether `point` lies inside the hexagon or on its outline.
    pub fn contains(
        &self,
        point: Point,
    ) -> bool {
        let dx = i64::from((point.x - self.center.x).unsigned_abs());
        let dy = i64::from((point.y - self.center.y).unsigned_abs());
        let r = i64::from(self.radius);
        let h = i64::from(self.half_height());

        // Slanted edges run from (r, 0) to (r / 2, h)
        dy <= h && 2 * h * dx + r * dy <= 2 * h * r
    }

    /// Pixels of the 50% stipple covering the hexagon.
    pub fn stipple(
        &self,
        color: Rgb565,
    ) -> impl Iterator<Item = Pixel<Rgb565>> + '_ {
        self.bounding_box()
            .points()
            .filter(|p| (p.x + p.y).rem_euclid(2) == 0)
            .filter(move |p| self.contains(*p))
            .map(move |p| Pixel(p, color))
    }

    /// Draw the stipple onto `display`. Pixels outside the target are clipped.
    pub fn draw_stippled<D>(
        &self,
        display: &mut D,
        color: Rgb565,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        display.draw_iter(self.stipple(color)).ok();
    }
}
