//! Host-side test doubles: a virtual clock, a recording host and drawing
//! context, and a render trigger that captures every frame.

use core::cell::Cell;
use core::convert::Infallible;

use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_hal_async::delay::DelayNs;

use crate::dialog::{Host, Overlay, OverlayStack, RenderTrigger};
use crate::input::{ButtonEvent, EventBus, Scope};
use crate::ui::{Backdrop, ColorToken, DrawContext, FontSize, TextAlign, TextBaseline};

// =============================================================================
// Virtual Time
// =============================================================================

/// Millisecond clock advanced by [`VirtualClock::ticker`].
pub struct VirtualClock {
    now: Cell<u64>,
}

impl VirtualClock {
    pub fn new() -> Self { Self { now: Cell::new(0) } }

    pub fn now_ms(&self) -> u64 { self.now.get() }

    pub fn delay(&self) -> ClockDelay<'_> { ClockDelay { clock: self } }

    /// Advance one millisecond per scheduler pass, forever.
    ///
    /// Run it as the last branch of a `select` so everything else sees each
    /// millisecond before the next one starts.
    pub async fn ticker(&self) -> Infallible {
        loop {
            yield_now().await;
            self.now.set(self.now.get() + 1);
        }
    }

    async fn sleep_until(
        &self,
        deadline: u64,
    ) {
        while self.now.get() < deadline {
            yield_now().await;
        }
    }
}

/// [`DelayNs`] over a [`VirtualClock`], rounded up to whole milliseconds.
pub struct ClockDelay<'c> {
    clock: &'c VirtualClock,
}

impl DelayNs for ClockDelay<'_> {
    async fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        let deadline = self.clock.now_ms() + u64::from(ns.div_ceil(1_000_000));
        self.clock.sleep_until(deadline).await;
    }

    async fn delay_us(
        &mut self,
        us: u32,
    ) {
        let deadline = self.clock.now_ms() + u64::from(us.div_ceil(1_000));
        self.clock.sleep_until(deadline).await;
    }

    async fn delay_ms(
        &mut self,
        ms: u32,
    ) {
        let deadline = self.clock.now_ms() + u64::from(ms);
        self.clock.sleep_until(deadline).await;
    }
}

// =============================================================================
// Host
// =============================================================================

pub const TEST_SCOPE: Scope = Scope(7);

/// Host with its own bus and overlay stack, timed by a virtual clock.
pub struct TestHost<'a> {
    pub bus: EventBus<NoopRawMutex>,
    pub overlays: OverlayStack<'a>,
    pub pushes: Cell<usize>,
    pub pops: Cell<usize>,
    clock: &'a VirtualClock,
}

impl<'a> TestHost<'a> {
    pub fn new(clock: &'a VirtualClock) -> Self {
        Self {
            bus: EventBus::new(),
            overlays: OverlayStack::new(),
            pushes: Cell::new(0),
            pops: Cell::new(0),
            clock,
        }
    }

    pub fn emit(
        &self,
        event: ButtonEvent,
    ) -> usize {
        self.bus.emit(TEST_SCOPE, event)
    }

    pub fn listeners(&self) -> usize { self.bus.listener_count(TEST_SCOPE) }

    /// Wait `ms` of virtual time, then emit `event`.
    pub async fn emit_after(
        &self,
        ms: u32,
        event: ButtonEvent,
    ) {
        self.clock.delay().delay_ms(ms).await;
        self.emit(event);
    }
}

impl<'a> Host<'a> for TestHost<'a> {
    type Delay = ClockDelay<'a>;
    type Mutex = NoopRawMutex;

    fn scope(&self) -> Scope { TEST_SCOPE }

    fn bus(&self) -> &EventBus<NoopRawMutex> { &self.bus }

    fn delay(&self) -> ClockDelay<'a> { self.clock.delay() }

    fn push_overlay(
        &self,
        overlay: &'a dyn Overlay,
    ) {
        self.pushes.set(self.pushes.get() + 1);
        self.overlays.push(overlay);
    }

    fn pop_overlay(&self) {
        self.pops.set(self.pops.get() + 1);
        self.overlays.pop();
    }
}

// =============================================================================
// Drawing
// =============================================================================

/// One `text` call with the settings active at the time.
#[derive(Clone, Debug, PartialEq)]
pub struct TextCall {
    pub x: i32,
    pub y: i32,
    pub text: String,
    pub font_size: FontSize,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub color: ColorToken,
}

/// [`DrawContext`] that records calls instead of drawing.
#[derive(Default)]
pub struct RecordingContext {
    pub backdrops: usize,
    pub calls: Vec<TextCall>,
    font_size: FontSize,
    align: TextAlign,
    baseline: TextBaseline,
    color: ColorToken,
}

impl RecordingContext {
    pub fn new() -> Self { Self::default() }

    pub fn texts(&self) -> Vec<&str> { self.calls.iter().map(|c| c.text.as_str()).collect() }
}

impl DrawContext for RecordingContext {
    fn backdrop(
        &mut self,
        _backdrop: Backdrop,
    ) {
        self.backdrops += 1;
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
        self.calls.push(TextCall {
            x,
            y,
            text: text.into(),
            font_size: self.font_size,
            align: self.align,
            baseline: self.baseline,
            color: self.color,
        });
    }
}

/// Render trigger that draws the host's overlays into a fresh
/// [`RecordingContext`] per frame and keeps the text of each frame.
pub struct FrameRecorder<'h, 'a> {
    host: &'h TestHost<'a>,
    pub frames: Vec<Vec<String>>,
}

impl<'h, 'a> FrameRecorder<'h, 'a> {
    pub fn new(host: &'h TestHost<'a>) -> Self {
        Self {
            host,
            frames: Vec::new(),
        }
    }

    pub fn count(&self) -> usize { self.frames.len() }

    /// Whether any frame contained `text`.
    pub fn saw(
        &self,
        text: &str,
    ) -> bool {
        self.frames.iter().flatten().any(|t| t == text)
    }

    pub fn last(&self) -> &[String] { self.frames.last().map(Vec::as_slice).unwrap_or_default() }
}

impl RenderTrigger for FrameRecorder<'_, '_> {
    async fn render(&mut self) {
        let mut ctx = RecordingContext::new();
        self.host.overlays.draw(&mut ctx);
        self.frames.push(ctx.calls.into_iter().map(|c| c.text).collect());
        yield_now().await;
    }
}
