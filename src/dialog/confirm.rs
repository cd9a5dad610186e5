//! Yes/No confirmation dialog.
//!
//! CONFIRM resolves to `true`, CANCEL to `false`. When both arrive in the
//! same event CANCEL wins. Resolution deregisters the listener, stores the
//! result and then calls the matching callback, in that order.

use core::cell::Cell;

use super::Message;
use super::host::{Host, Overlay, RenderTrigger};
use crate::config::LINE_HEIGHT;
use crate::error::Error;
use crate::input::{Button, ButtonSet, EventKind, ListenerId};
use crate::ui::{Backdrop, ColorToken, DrawContext, FontSize, TextAlign, TextBaseline};
use crate::{log_debug, log_info, log_warn};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum State {
    Pending { listener: ListenerId },
    Resolved(bool),
}

/// Blocking Yes/No question shown as an overlay.
pub struct ConfirmDialog<'a, H: Host<'a>> {
    host: &'a H,
    message: Message<'a>,
    state: Cell<State>,
    open: Cell<bool>,
    on_yes: Option<&'a dyn Fn()>,
    on_no: Option<&'a dyn Fn()>,
}

impl<'a, H: Host<'a>> ConfirmDialog<'a, H> {
    /// Create a pending dialog and register its button listener.
    pub fn new(
        message: impl Into<Message<'a>>,
        host: &'a H,
    ) -> Result<Self, Error> {
        let listener = host.bus().register(EventKind::ButtonDown, host.scope())?;
        log_debug!("Confirm: listener registered");

        Ok(Self {
            host,
            message: message.into(),
            state: Cell::new(State::Pending { listener }),
            open: Cell::new(true),
            on_yes: None,
            on_no: None,
        })
    }

    /// Call `callback` when the dialog resolves to `true`.
    pub fn on_yes(
        mut self,
        callback: &'a dyn Fn(),
    ) -> Self {
        self.on_yes = Some(callback);
        self
    }

    /// Call `callback` when the dialog resolves to `false`.
    pub fn on_no(
        mut self,
        callback: &'a dyn Fn(),
    ) -> Self {
        self.on_no = Some(callback);
        self
    }

    /// True from construction until `run` has popped the overlay.
    #[inline]
    pub fn is_open(&self) -> bool { self.open.get() }

    #[inline]
    pub fn is_pending(&self) -> bool { matches!(self.state.get(), State::Pending { .. }) }

    pub fn result(&self) -> Option<bool> {
        match self.state.get() {
            State::Pending { .. } => None,
            State::Resolved(value) => Some(value),
        }
    }

    pub fn message(&self) -> Message<'a> { self.message }

    /// Apply one button-down event. Ignored once resolved.
    pub fn handle_button_down(
        &self,
        buttons: ButtonSet,
    ) {
        if buttons.contains(Button::Cancel) {
            self.resolve(false);
        } else if buttons.contains(Button::Confirm) {
            self.resolve(true);
        }
    }

    /// Release the listener of a dialog whose `run` ended unanswered.
    fn detach(&self) {
        if let State::Pending { listener } = self.state.get() {
            self.host.bus().deregister(listener);
            log_warn!("Confirm: closed without an answer");
        }
    }

    fn resolve(
        &self,
        value: bool,
    ) {
        let State::Pending { listener } = self.state.get() else {
            return;
        };

        self.host.bus().deregister(listener);
        self.state.set(State::Resolved(value));
        log_info!("Confirm: {}", if value { "yes" } else { "no" });

        let callback = if value { self.on_yes } else { self.on_no };
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Show the dialog until it resolves and return the answer.
    ///
    /// Dropping the future early pops the overlay and releases the
    /// listener without resolving; a later `run` then answers `false`.
    pub async fn run<R: RenderTrigger>(
        &'a self,
        render: &mut R,
    ) -> bool {
        let result = {
            let _shown = Shown::push(self);
            render.render().await;
            self.wait_for_result().await
        };

        render.render().await;
        result
    }

    async fn wait_for_result(&self) -> bool {
        loop {
            let listener = match self.state.get() {
                State::Resolved(value) => return value,
                State::Pending { listener } => listener,
            };

            match self.host.bus().receive(listener).await {
                Some(buttons) => self.handle_button_down(buttons),
                // Listener removed behind our back; treat as a cancel
                None => self.resolve(false),
            }
        }
    }
}

/// Overlay slot held by a running [`ConfirmDialog::run`].
struct Shown<'a, H: Host<'a>> {
    dialog: &'a ConfirmDialog<'a, H>,
}

impl<'a, H: Host<'a>> Shown<'a, H> {
    fn push(dialog: &'a ConfirmDialog<'a, H>) -> Self {
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

impl<'a, H: Host<'a>> Overlay for ConfirmDialog<'a, H> {
    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
    ) {
        ctx.backdrop(Backdrop::DIALOG);
        ctx.set_font_size(FontSize::Label);
        ctx.set_align(TextAlign::Center);
        ctx.set_baseline(TextBaseline::Middle);
        ctx.set_color(ColorToken::Label);

        // Block of lines centered vertically
        let count = self.message.line_count() as i32;
        let top = -(count - 1) * LINE_HEIGHT / 2;
        for (i, line) in self.message.lines().enumerate() {
            ctx.text(0, top + i as i32 * LINE_HEIGHT, line);
        }
    }
}
