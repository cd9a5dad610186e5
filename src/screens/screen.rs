//! Render trigger for the physical display.

use dialogs_pico2::config::FRAME_MS;
use dialogs_pico2::dialog::{OverlayStack, RenderTrigger};
use dialogs_pico2::ui::{Fingerprint, GraphicsContext, RenderState};
use embassy_time::Timer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::home::{draw_home_screen, log_revision};

/// Title drawn on the home screen.
const TITLE: &str = "DIALOGS";

/// Draws the home screen and the overlays on top, once per frame.
///
/// The panel is only repainted when the drawing would differ from what is
/// already shown (new log entries or a changed overlay).
pub struct Screen<'d, 'a, D> {
    display: &'d mut D,
    overlays: &'d OverlayStack<'a>,
    state: RenderState,
}

impl<'d, 'a, D> Screen<'d, 'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub const fn new(
        display: &'d mut D,
        overlays: &'d OverlayStack<'a>,
    ) -> Self {
        Self {
            display,
            overlays,
            state: RenderState::new(),
        }
    }

    /// Repaint now if anything changed.
    pub fn refresh(&mut self) {
        let mut fingerprint = Fingerprint::new();
        fingerprint.write_u32(log_revision());
        self.overlays.draw(&mut fingerprint);

        if self.state.update(fingerprint.finish()) {
            draw_home_screen(&mut *self.display, TITLE);
            self.overlays.draw(&mut GraphicsContext::new(&mut *self.display));
        }
    }
}

impl<D> RenderTrigger for Screen<'_, '_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    async fn render(&mut self) {
        self.refresh();
        Timer::after_millis(FRAME_MS).await;
    }
}
