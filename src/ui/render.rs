//! Redraw tracking for the firmware screen.
//!
//! The panel is drawn without a framebuffer, so a full redraw is both slow
//! and visible. Instead of redrawing every frame, the screen first "draws"
//! the overlays into a [`Fingerprint`], which hashes every drawing call, and
//! only repaints when [`RenderState`] sees a new hash.

use super::colors::ColorToken;
use super::context::{Backdrop, DrawContext};
use super::styles::{FontSize, TextAlign, TextBaseline};

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// [`DrawContext`] that hashes drawing calls (FNV-1a) instead of drawing.
pub struct Fingerprint {
    hash: u32,
}

impl Fingerprint {
    pub const fn new() -> Self { Self { hash: FNV_OFFSET } }

    pub fn write(
        &mut self,
        bytes: &[u8],
    ) {
        for &byte in bytes {
            self.hash ^= u32::from(byte);
            self.hash = self.hash.wrapping_mul(FNV_PRIME);
        }
    }

    pub fn write_u32(
        &mut self,
        value: u32,
    ) {
        self.write(&value.to_le_bytes());
    }

    #[inline]
    pub const fn finish(&self) -> u32 { self.hash }
}

impl Default for Fingerprint {
    fn default() -> Self { Self::new() }
}

impl DrawContext for Fingerprint {
    fn backdrop(
        &mut self,
        backdrop: Backdrop,
    ) {
        self.write(b"B");
        self.write_u32(backdrop.radius);
        self.write(&[backdrop.color as u8]);
    }

    fn set_font_size(
        &mut self,
        size: FontSize,
    ) {
        self.write(&[b'F', size as u8]);
    }

    fn set_align(
        &mut self,
        align: TextAlign,
    ) {
        self.write(&[b'A', align as u8]);
    }

    fn set_baseline(
        &mut self,
        baseline: TextBaseline,
    ) {
        self.write(&[b'L', baseline as u8]);
    }

    fn set_color(
        &mut self,
        color: ColorToken,
    ) {
        self.write(&[b'C', color as u8]);
    }

    fn text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
    ) {
        self.write(b"T");
        self.write_u32(x as u32);
        self.write_u32(y as u32);
        self.write(text.as_bytes());
        // Terminator so "ab" + "c" differs from "a" + "bc"
        self.write(&[0]);
    }
}

/// Remembers what is on screen.
#[derive(Default)]
pub struct RenderState {
    shown: Option<u32>,
}

impl RenderState {
    pub const fn new() -> Self { Self { shown: None } }

    /// Record `fingerprint` as shown. Returns true if it differs from the
    /// previous frame, i.e. the screen must be repainted.
    pub fn update(
        &mut self,
        fingerprint: u32,
    ) -> bool {
        let changed = self.shown != Some(fingerprint);
        self.shown = Some(fingerprint);
        changed
    }

    /// Force a repaint on the next update.
    pub fn invalidate(&mut self) { self.shown = None; }
}
