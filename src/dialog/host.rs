//! What a dialog needs from the application hosting it.
//!
//! A host owns the event bus scope, the overlay stack and a time source.
//! Dialogs borrow the host for their whole life and only touch it to
//! register listeners, push and pop themselves, and create delays for
//! auto-repeat.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::input::{EventBus, Scope};
use crate::log_warn;
use crate::ui::DrawContext;

/// Maximum number of overlays drawn at once.
pub const MAX_OVERLAYS: usize = 4;

/// Something drawn on top of the host screen.
pub trait Overlay {
    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
    );
}

/// Visible modal layers, bottom first.
///
/// Pushes past [`MAX_OVERLAYS`] are not shown but are still counted, so the
/// matching pops stay balanced: a pop first unwinds the hidden layers.
pub struct OverlayStack<'a> {
    layers: [Cell<Option<&'a dyn Overlay>>; MAX_OVERLAYS],
    depth: Cell<usize>,
    overflow: Cell<usize>,
}

impl<'a> OverlayStack<'a> {
    pub const fn new() -> Self {
        Self {
            layers: [const { Cell::new(None) }; MAX_OVERLAYS],
            depth: Cell::new(0),
            overflow: Cell::new(0),
        }
    }

    pub fn push(
        &self,
        overlay: &'a dyn Overlay,
    ) {
        let depth = self.depth.get();
        if depth == MAX_OVERLAYS {
            self.overflow.set(self.overflow.get() + 1);
            log_warn!("Overlay stack full, layer hidden");
            return;
        }
        self.layers[depth].set(Some(overlay));
        self.depth.set(depth + 1);
    }

    /// Remove the topmost layer. Returns `None` when the stack is empty or
    /// the popped layer was a hidden one.
    pub fn pop(&self) -> Option<&'a dyn Overlay> {
        let overflow = self.overflow.get();
        if overflow > 0 {
            self.overflow.set(overflow - 1);
            return None;
        }
        let depth = self.depth.get().checked_sub(1)?;
        self.depth.set(depth);
        self.layers[depth].take()
    }

    pub fn top(&self) -> Option<&'a dyn Overlay> {
        let depth = self.depth.get().checked_sub(1)?;
        self.layers[depth].get()
    }

    /// Number of visible layers.
    #[inline]
    pub fn depth(&self) -> usize { self.depth.get() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.depth.get() == 0 && self.overflow.get() == 0 }

    /// Draw every visible layer, topmost last.
    pub fn draw(
        &self,
        ctx: &mut dyn DrawContext,
    ) {
        for layer in &self.layers[..self.depth.get()] {
            if let Some(overlay) = layer.get() {
                overlay.draw(ctx);
            }
        }
    }
}

impl Default for OverlayStack<'_> {
    fn default() -> Self { Self::new() }
}

/// The application a dialog runs in.
pub trait Host<'a> {
    /// Mutex guarding the host's event bus.
    type Mutex: RawMutex;
    /// Time source for auto-repeat.
    type Delay: DelayNs;

    /// Scope of the host's button events.
    fn scope(&self) -> Scope;

    fn bus(&self) -> &EventBus<Self::Mutex>;

    /// A fresh delay for one dialog run.
    fn delay(&self) -> Self::Delay;

    fn push_overlay(
        &self,
        overlay: &'a dyn Overlay,
    );

    fn pop_overlay(&self);
}

/// Asynchronous "redraw now".
///
/// Every call must suspend at least once, since dialogs redraw in a loop
/// next to their input handling.
#[allow(async_fn_in_trait)]
pub trait RenderTrigger {
    async fn render(&mut self);
}
