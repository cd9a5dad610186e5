//! Free-text entry dialog.
//!
//! The user scrolls an alphabet with UP/DOWN, appends the selected character
//! with RIGHT, deletes the last one with LEFT, and finishes with CONFIRM or
//! CANCEL. Holding UP or DOWN auto-repeats through a [`RepeatTimer`].
//!
//! Checks within one button-down event run in a fixed order: CANCEL,
//! CONFIRM, RIGHT, LEFT, UP, DOWN. CANCEL and CONFIRM end the event, so
//! CANCEL wins when both are set and nothing after them sees a resolved
//! dialog.

use core::cell::{Cell, RefCell};
use core::fmt::Write as _;

use embassy_futures::join::join;
use embassy_futures::select::{Either, select};
use heapless::String;

use super::Message;
use super::alphabet::{Alphabet, Step};
use super::host::{Host, Overlay, RenderTrigger};
use super::repeat::RepeatTimer;
use crate::config::{ENTRY_MAX_WIDTH, ENTRY_OFFSET_Y, LINE_HEIGHT, PROMPT_OFFSET_Y, RepeatTiming};
use crate::error::Error;
use crate::input::{Button, ButtonSet, EventKind, ListenerId};
use crate::ui::{Backdrop, ColorToken, DrawContext, FontSize, TextAlign, TextBaseline};
use crate::{log_debug, log_info, log_warn};

/// Maximum number of characters a text dialog collects.
pub const MAX_TEXT_LEN: usize = 32;

/// Characters entered so far.
pub type TextBuffer = String<MAX_TEXT_LEN>;

/// Rendered entry line: the buffer plus the bracketed preview.
pub type EntryLine = String<{ MAX_TEXT_LEN + 3 }>;

/// Characters of the entry line that fit in [`ENTRY_MAX_WIDTH`].
pub const ENTRY_VISIBLE_CHARS: usize = {
    let font = FontSize::Entry.font();
    (ENTRY_MAX_WIDTH / (font.character_size.width + font.character_spacing)) as usize
};

/// Glyph drawn in place of each character of a masked entry.
const MASK: char = '*';

/// Outcome of a text dialog.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TextResult {
    /// CONFIRM pressed; carries the buffer at that moment.
    Submitted(TextBuffer),
    /// CANCEL pressed.
    Cancelled,
}

impl TextResult {
    /// Submitted text, or `None` when cancelled.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Submitted(text) => Some(text.as_str()),
            Self::Cancelled => None,
        }
    }
}

enum State {
    Pending { down: ListenerId, up: ListenerId },
    Resolved(TextResult),
}

/// Text entry prompt shown as an overlay.
pub struct TextDialog<'a, H: Host<'a>> {
    host: &'a H,
    message: Message<'a>,
    masked: bool,
    alphabet: Alphabet,
    buffer: RefCell<TextBuffer>,
    cursor: Cell<usize>,
    state: RefCell<State>,
    open: Cell<bool>,
    repeat: RepeatTimer,
    on_complete: Option<&'a dyn Fn(&str)>,
    on_cancel: Option<&'a dyn Fn()>,
}

impl<'a, H: Host<'a>> TextDialog<'a, H> {
    /// Create a pending dialog and register its button-down and button-up
    /// listeners. `masked` hides the entered characters on screen only.
    pub fn new(
        message: impl Into<Message<'a>>,
        host: &'a H,
        masked: bool,
    ) -> Result<Self, Error> {
        let bus = host.bus();
        let down = bus.register(EventKind::ButtonDown, host.scope())?;
        let up = match bus.register(EventKind::ButtonUp, host.scope()) {
            Ok(up) => up,
            Err(err) => {
                bus.deregister(down);
                return Err(err);
            }
        };
        log_debug!("Text: listeners registered");

        Ok(Self {
            host,
            message: message.into(),
            masked,
            alphabet: Alphabet::DEFAULT,
            buffer: RefCell::new(String::new()),
            cursor: Cell::new(0),
            state: RefCell::new(State::Pending { down, up }),
            open: Cell::new(true),
            repeat: RepeatTimer::new(RepeatTiming::DEFAULT),
            on_complete: None,
            on_cancel: None,
        })
    }

    /// Scroll through `alphabet` instead of the default one.
    pub fn with_alphabet(
        mut self,
        alphabet: Alphabet,
    ) -> Self {
        self.alphabet = alphabet;
        self.cursor.set(0);
        self
    }

    pub fn with_repeat_timing(
        mut self,
        timing: RepeatTiming,
    ) -> Self {
        self.repeat = RepeatTimer::new(timing);
        self
    }

    /// Call `callback` with the text when CONFIRM resolves the dialog.
    pub fn on_complete(
        mut self,
        callback: &'a dyn Fn(&str),
    ) -> Self {
        self.on_complete = Some(callback);
        self
    }

    /// Call `callback` when CANCEL resolves the dialog.
    pub fn on_cancel(
        mut self,
        callback: &'a dyn Fn(),
    ) -> Self {
        self.on_cancel = Some(callback);
        self
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// True from construction until `run` has popped the overlay.
    #[inline]
    pub fn is_open(&self) -> bool { self.open.get() }

    #[inline]
    pub fn is_pending(&self) -> bool { matches!(*self.state.borrow(), State::Pending { .. }) }

    pub fn result(&self) -> Option<TextResult> {
        match &*self.state.borrow() {
            State::Pending { .. } => None,
            State::Resolved(result) => Some(result.clone()),
        }
    }

    pub fn text(&self) -> TextBuffer { self.buffer.borrow().clone() }

    /// Alphabet index of the scroll preview.
    #[inline]
    pub fn cursor(&self) -> usize { self.cursor.get() }

    /// Character under the cursor.
    #[inline]
    pub fn selected(&self) -> char { self.alphabet.char_at(self.cursor.get()) }

    #[inline]
    pub const fn is_masked(&self) -> bool { self.masked }

    #[inline]
    pub const fn alphabet(&self) -> Alphabet { self.alphabet }

    /// Current repeat generation.
    #[inline]
    pub fn repeat_generation(&self) -> u32 { self.repeat.generation() }

    /// The buffer (masked if requested) followed by `[c]`, where `c` is the
    /// selected character. Only the tail of a long buffer is kept, so the
    /// line fits in [`ENTRY_VISIBLE_CHARS`] and `[c]` stays on screen.
    pub fn entry_line(&self) -> EntryLine {
        let buffer = self.buffer.borrow();
        let hidden = buffer.chars().count().saturating_sub(ENTRY_VISIBLE_CHARS - 3);

        let mut line = EntryLine::new();
        for c in buffer.chars().skip(hidden) {
            line.push(if self.masked { MASK } else { c }).ok();
        }
        write!(line, "[{}]", self.selected()).ok();
        line
    }

    // =========================================================================
    // Input Handling
    // =========================================================================

    /// Apply one button-down event. Ignored once resolved.
    pub fn handle_button_down(
        &self,
        buttons: ButtonSet,
    ) {
        if !self.is_pending() {
            return;
        }

        if buttons.contains(Button::Cancel) {
            self.resolve(TextResult::Cancelled);
            return;
        }
        if buttons.contains(Button::Confirm) {
            let text = self.text();
            self.resolve(TextResult::Submitted(text));
            return;
        }

        if buttons.contains(Button::Right) {
            let c = self.selected();
            if self.buffer.borrow_mut().push(c).is_err() {
                log_warn!("Text: buffer full, '{}' dropped", c);
            }
        }
        if buttons.contains(Button::Left) {
            self.buffer.borrow_mut().pop();
        }
        if buttons.contains(Button::Up) {
            self.press_direction(Step::Previous, !buttons.contains(Button::Down));
        }
        if buttons.contains(Button::Down) {
            self.press_direction(Step::Next, !buttons.contains(Button::Up));
        }
    }

    /// Apply one button-up event. Releasing UP or DOWN stops auto-repeat.
    pub fn handle_button_up(
        &self,
        buttons: ButtonSet,
    ) {
        if !self.is_pending() {
            return;
        }
        if buttons.contains(Button::Up) || buttons.contains(Button::Down) {
            let seq = self.repeat.bump();
            log_debug!("Text: release, generation {}", seq);
        }
    }

    fn press_direction(
        &self,
        step: Step,
        auto_repeat: bool,
    ) {
        self.step_cursor(step);
        let seq = self.repeat.bump();
        if auto_repeat {
            self.repeat.start(seq, step);
        }
    }

    fn step_cursor(
        &self,
        step: Step,
    ) {
        if !self.is_pending() {
            return;
        }
        self.cursor.set(self.alphabet.advance(self.cursor.get(), step));
        log_debug!("Text: cursor {}", self.cursor.get());
    }

    /// Release the listeners of a dialog whose `run` ended unresolved.
    fn detach(&self) {
        let State::Pending { down, up } = *self.state.borrow() else {
            return;
        };

        let bus = self.host.bus();
        bus.deregister(down);
        bus.deregister(up);
        self.repeat.cancel();
        log_warn!("Text: closed without a result");
    }

    fn resolve(
        &self,
        result: TextResult,
    ) {
        let (down, up) = match *self.state.borrow() {
            State::Pending { down, up } => (down, up),
            State::Resolved(_) => return,
        };

        let bus = self.host.bus();
        bus.deregister(down);
        bus.deregister(up);
        self.repeat.cancel();

        let callback_text = result.clone();
        *self.state.borrow_mut() = State::Resolved(result);
        log_info!("Text: {}", if callback_text.text().is_some() { "submitted" } else { "cancelled" });

        match callback_text {
            TextResult::Submitted(text) => {
                if let Some(callback) = self.on_complete {
                    callback(&text);
                }
            }
            TextResult::Cancelled => {
                if let Some(callback) = self.on_cancel {
                    callback();
                }
            }
        }
    }

    // =========================================================================
    // Run Loop
    // =========================================================================

    /// Show the dialog until it resolves and return the outcome.
    ///
    /// Redraws on every pass of the wait loop, while input handling and
    /// auto-repeat run alongside. Dropping the future before it completes
    /// pops the overlay and releases the listeners, leaving the dialog
    /// unresolved; a later `run` then returns [`TextResult::Cancelled`].
    pub async fn run<R: RenderTrigger>(
        &'a self,
        render: &mut R,
    ) -> TextResult {
        {
            let _shown = Shown::push(self);
            render.render().await;

            let mut delay = self.host.delay();
            let session = join(self.redraw_until_resolved(render), self.process_input());
            let repeat = self.repeat.drive(&mut delay, |step| self.step_cursor(step));
            match select(session, repeat).await {
                Either::First(_) => {}
                Either::Second(never) => match never {},
            }
        }
        render.render().await;

        self.result().unwrap_or(TextResult::Cancelled)
    }

    async fn redraw_until_resolved<R: RenderTrigger>(
        &self,
        render: &mut R,
    ) {
        while self.is_pending() {
            render.render().await;
        }
    }

    async fn process_input(&self) {
        loop {
            let (down, up) = match *self.state.borrow() {
                State::Pending { down, up } => (down, up),
                State::Resolved(_) => return,
            };

            match self.host.bus().receive_any(&[down, up]).await {
                Some((id, buttons)) if id == down => self.handle_button_down(buttons),
                Some((_, buttons)) => self.handle_button_up(buttons),
                // Listeners removed behind our back
                None => self.resolve(TextResult::Cancelled),
            }
        }
    }
}

/// Overlay slot held by a running [`TextDialog::run`].
struct Shown<'a, H: Host<'a>> {
    dialog: &'a TextDialog<'a, H>,
}

impl<'a, H: Host<'a>> Shown<'a, H> {
    fn push(dialog: &'a TextDialog<'a, H>) -> Self {
        dialog.host.push_overlay(dialog);
        dialog.open.set(true);
        Self { dialog }
    }
}

impl<'a, H: Host<'a>> Drop for Shown<'a, H> {
    fn drop(&mut self) {
        self.dialog.detach();
        self.dialog.host.pop_overlay();
        self.dialog.open.set(false);
    }
}

impl<'a, H: Host<'a>> Overlay for TextDialog<'a, H> {
    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
    ) {
        ctx.backdrop(Backdrop::DIALOG);
        ctx.set_font_size(FontSize::Label);
        ctx.set_align(TextAlign::Center);
        ctx.set_baseline(TextBaseline::Middle);
        ctx.set_color(ColorToken::Label);

        // Last message line sits on the prompt line, earlier ones above it
        let count = self.message.line_count() as i32;
        for (i, line) in self.message.lines().enumerate() {
            ctx.text(0, PROMPT_OFFSET_Y - (count - 1 - i as i32) * LINE_HEIGHT, line);
        }

        ctx.set_font_size(FontSize::Entry);
        ctx.text(0, ENTRY_OFFSET_Y, &self.entry_line());
    }
}

#[cfg(test)]
mod tests {
    use core::future::pending;

    use embassy_futures::select::{Either3, select3};
    use embassy_futures::{block_on, yield_now};
    use embedded_graphics::geometry::{Dimensions, Point};
    use embedded_graphics::mono_font::MonoTextStyle;
    use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
    use embedded_graphics::text::Text;

    use super::*;
    use crate::config::{BACKDROP_RADIUS, CENTER_X, CENTER_Y};
    use crate::input::ButtonEvent;
    use crate::testing::{FrameRecorder, RecordingContext, TestHost, VirtualClock};
    use crate::ui::Hexagon;
    use crate::ui::styles::text_style;

    fn press(button: Button) -> ButtonEvent { ButtonEvent::Down(button.into()) }

    fn release(button: Button) -> ButtonEvent { ButtonEvent::Up(button.into()) }

    fn run_with<'a>(
        clock: &VirtualClock,
        host: &'a TestHost<'a>,
        dialog: &'a TextDialog<'a, TestHost<'a>>,
        script: impl Future<Output = ()>,
    ) -> (TextResult, FrameRecorder<'a, 'a>) {
        let mut frames = FrameRecorder::new(host);
        let result = block_on(async {
            let script = async {
                script.await;
                pending::<()>().await;
            };
            match select3(dialog.run(&mut frames), script, clock.ticker()).await {
                Either3::First(result) => result,
                _ => unreachable!(),
            }
        });
        (result, frames)
    }

    /// Index of `c` in the default alphabet.
    fn index_of(c: char) -> usize { Alphabet::DEFAULT.as_str().find(c).unwrap() }

    #[test]
    fn test_masked_pin_entry() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Enter PIN", &host, true).unwrap();
        assert_eq!(host.listeners(), 2);

        let script = async {
            for _ in 0..3 {
                host.emit_after(20, press(Button::Right)).await;
            }
            host.emit_after(20, press(Button::Confirm)).await;
        };
        let (result, frames) = run_with(&clock, &host, &dialog, script);

        assert_eq!(result.text(), Some("aaa"));
        assert!(frames.saw("***[a]"));
        assert!(!frames.saw("aaa[a]"));
        assert!(frames.frames[0].iter().any(|t| t == "Enter PIN"));
        assert!(frames.last().is_empty());
        assert_eq!(host.listeners(), 0);
        assert!(host.overlays.is_empty());
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_cancel_returns_sentinel() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let cancelled = Cell::new(false);
        let on_cancel = || cancelled.set(true);
        let dialog = TextDialog::new("Name", &host, false).unwrap().on_cancel(&on_cancel);

        let script = async {
            host.emit_after(20, press(Button::Right)).await;
            host.emit_after(20, press(Button::Cancel)).await;
        };
        let (result, _) = run_with(&clock, &host, &dialog, script);

        assert_eq!(result, TextResult::Cancelled);
        assert!(cancelled.get());
        assert_eq!(host.listeners(), 0);
    }

    #[test]
    fn test_buffer_is_concatenation_of_selections() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let completed = core::cell::RefCell::new(std::string::String::new());
        let on_complete = |text: &str| completed.borrow_mut().push_str(text);
        let dialog = TextDialog::new("Name", &host, false).unwrap().on_complete(&on_complete);

        // a, b, then back to a, then wrap to the last character
        let moves: [&[Button]; 4] = [&[], &[Button::Down], &[Button::Up], &[Button::Up]];
        let script = async {
            for steps in moves {
                for &button in steps {
                    host.emit_after(20, press(button)).await;
                    host.emit_after(20, release(button)).await;
                }
                host.emit_after(20, press(Button::Right)).await;
            }
            host.emit_after(20, press(Button::Confirm)).await;
        };
        let (result, _) = run_with(&clock, &host, &dialog, script);

        assert_eq!(result.text(), Some("aba?"));
        assert_eq!(completed.borrow().as_str(), "aba?");
    }

    #[test]
    fn test_left_on_empty_buffer_is_noop() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Name", &host, false).unwrap();

        dialog.handle_button_down(Button::Left.into());
        dialog.handle_button_down(Button::Left.into());
        assert!(dialog.text().is_empty());

        dialog.handle_button_down(Button::Right.into());
        dialog.handle_button_down(Button::Right.into());
        dialog.handle_button_down(Button::Left.into());
        assert_eq!(dialog.text().as_str(), "a");
        assert!(dialog.is_pending());
    }

    #[test]
    fn test_resolved_dialog_is_frozen() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Name", &host, false).unwrap();

        dialog.handle_button_down(Button::Right.into());
        dialog.handle_button_down(Button::Confirm.into());
        let generation = dialog.repeat_generation();

        for button in Button::ALL {
            dialog.handle_button_down(button.into());
            dialog.handle_button_up(button.into());
        }

        assert_eq!(dialog.text().as_str(), "a");
        assert_eq!(dialog.cursor(), 0);
        assert_eq!(dialog.result().and_then(|r| r.text().map(str::to_owned)), Some("a".to_owned()));
        assert_eq!(dialog.repeat_generation(), generation);
    }

    #[test]
    fn test_cancel_wins_over_confirm() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Name", &host, false).unwrap();

        dialog.handle_button_down(ButtonSet::of(Button::Confirm).with(Button::Cancel).with(Button::Right));
        assert_eq!(dialog.result(), Some(TextResult::Cancelled));
        assert!(dialog.text().is_empty());
        assert_eq!(host.listeners(), 0);
    }

    #[test]
    fn test_up_and_down_together_cancel_out() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Name", &host, false).unwrap();

        dialog.handle_button_down(ButtonSet::of(Button::Up).with(Button::Down));
        assert_eq!(dialog.cursor(), 0);
        assert_eq!(dialog.repeat_generation(), 2);
    }

    /// Hold UP for `hold_ms` and return how far the cursor moved back.
    fn hold_up(hold_ms: u32) -> usize {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Name", &host, false).unwrap();
        let start = index_of('m');
        for _ in 0..start {
            dialog.handle_button_down(Button::Down.into());
            dialog.handle_button_up(Button::Down.into());
        }

        let script = async {
            host.emit_after(10, press(Button::Up)).await;
            host.emit_after(hold_ms, release(Button::Up)).await;
            host.emit_after(1000, press(Button::Confirm)).await;
        };
        run_with(&clock, &host, &dialog, script);
        start - dialog.cursor()
    }

    #[test]
    fn test_tap_moves_exactly_one_step() {
        assert_eq!(hold_up(100), 1);
        assert_eq!(hold_up(900), 1);
    }

    #[test]
    fn test_hold_auto_repeats() {
        // Immediate step, then repeats at ~1.0 s and ~1.25 s
        assert_eq!(hold_up(1400), 3);
        // A third repeat at ~1.5 s
        assert_eq!(hold_up(1600), 4);
    }

    #[test]
    fn test_hold_down_wraps_forward() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Code", &host, false)
            .unwrap()
            .with_alphabet(Alphabet::DIGITS)
            .with_repeat_timing(RepeatTiming::new(200, 100));

        let script = async {
            host.emit_after(10, press(Button::Down)).await;
            // Steps at press, ~200, 300, ..., 1100
            host.emit_after(1150, release(Button::Down)).await;
            host.emit_after(50, press(Button::Right)).await;
            host.emit_after(50, press(Button::Confirm)).await;
        };
        let (result, _) = run_with(&clock, &host, &dialog, script);

        // 1 + 10 steps through ten digits lands on '1'
        assert_eq!(result.text(), Some("1"));
    }

    #[test]
    fn test_buffer_capacity() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Name", &host, false).unwrap();

        for _ in 0..MAX_TEXT_LEN + 5 {
            dialog.handle_button_down(Button::Right.into());
        }
        assert_eq!(dialog.text().len(), MAX_TEXT_LEN);
        assert!(dialog.entry_line().ends_with("[a]"));
    }

    #[test]
    fn test_full_buffer_keeps_preview_inside_backdrop() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Name", &host, false).unwrap();
        for _ in 0..MAX_TEXT_LEN {
            dialog.handle_button_down(Button::Right.into());
        }
        dialog.handle_button_down(Button::Down.into());
        assert_eq!(dialog.text().len(), MAX_TEXT_LEN);

        let mut ctx = RecordingContext::new();
        dialog.draw(&mut ctx);
        let entry = &ctx.calls[1];
        assert_eq!(entry.font_size, FontSize::Entry);
        assert_eq!(entry.text.len(), ENTRY_VISIBLE_CHARS);
        assert!(entry.text.ends_with("aa[b]"));

        let center = Point::new(CENTER_X, CENTER_Y);
        let style = MonoTextStyle::new(entry.font_size.font(), Rgb565::WHITE);
        let bounds = Text::with_text_style(
            &entry.text,
            center + Point::new(entry.x, entry.y),
            style,
            text_style(entry.align, entry.baseline),
        )
        .bounding_box();

        let backdrop = Hexagon::new(center, BACKDROP_RADIUS);
        let top_left = bounds.top_left;
        let bottom_right = bounds.bottom_right().unwrap();
        for corner in [
            top_left,
            bottom_right,
            Point::new(top_left.x, bottom_right.y),
            Point::new(bottom_right.x, top_left.y),
        ] {
            assert!(backdrop.contains(corner), "{corner:?} outside the backdrop");
        }
    }

    #[test]
    fn test_masked_tail_keeps_mask() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("PIN", &host, true).unwrap();
        for _ in 0..MAX_TEXT_LEN {
            dialog.handle_button_down(Button::Right.into());
        }

        let line = dialog.entry_line();
        assert_eq!(line.len(), ENTRY_VISIBLE_CHARS);
        assert!(line.starts_with('*'));
        assert!(line.ends_with("*[a]"));
        assert_eq!(dialog.text().as_str(), "a".repeat(MAX_TEXT_LEN));
    }

    #[test]
    fn test_dropped_run_releases_listeners() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Name", &host, false).unwrap();
        let mut frames = FrameRecorder::new(&host);

        block_on(async {
            let give_up = async {
                for _ in 0..3 {
                    yield_now().await;
                }
            };
            let outcome = select(dialog.run(&mut frames), give_up).await;
            assert!(matches!(outcome, Either::Second(())));
        });

        assert!(dialog.is_pending());
        assert!(!dialog.is_open());
        assert_eq!(host.listeners(), 0);
        assert!(host.overlays.is_empty());
        assert_eq!((host.pushes.get(), host.pops.get()), (1, 1));

        // Running again finds no listeners and gives up at once
        assert_eq!(block_on(dialog.run(&mut frames)), TextResult::Cancelled);
        assert!(!dialog.is_open());
        assert!(host.overlays.is_empty());
        assert_eq!((host.pushes.get(), host.pops.get()), (2, 2));
    }

    #[test]
    fn test_draw_layout() {
        let clock = VirtualClock::new();
        let host = TestHost::new(&clock);
        let dialog = TextDialog::new("Enter PIN", &host, false).unwrap();
        dialog.handle_button_down(Button::Right.into());
        dialog.handle_button_down(Button::Down.into());

        let mut ctx = RecordingContext::new();
        dialog.draw(&mut ctx);

        assert_eq!(ctx.backdrops, 1);
        assert_eq!(ctx.texts(), vec!["Enter PIN", "a[b]"]);
        assert_eq!(ctx.calls[0].y, PROMPT_OFFSET_Y);
        assert_eq!(ctx.calls[1].y, ENTRY_OFFSET_Y);
        assert!(ctx.calls[0].y < 0 && ctx.calls[1].y > 0);
    }
}
