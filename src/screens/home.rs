//! Home screen shown behind the dialogs.
//!
//! Displays the title and the most recent log entries with color-coded
//! levels and timestamps.
//!
//! # Layout
//!
//! ```text
//! DIALOGS                           (title)
//! [I] 12345 Display initialized     (entries)
//! [D] 12350 Confirm: listener registered
//! ...
//! ```

use core::fmt::Write;

use dialogs_pico2::config::HOME_MARGIN_X;
use dialogs_pico2::log_buffer::{LOG_BUFFER, LogEntry};
use dialogs_pico2::ui::FontSize;
use dialogs_pico2::ui::colors::{DARK_TEAL, WHITE};
use dialogs_pico2::ui::styles::LEFT_TOP;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use heapless::String;

/// Title position (top-left).
const TITLE_POS: Point = Point::new(HOME_MARGIN_X, 4);

/// Y of the first log line.
const LOG_TOP: i32 = 40;

/// Vertical distance between log lines.
const LOG_LINE_HEIGHT: i32 = 16;

/// Log lines that fit under the title.
const HOME_LOG_LINES: usize = 12;

/// Width of the "[L] TTTTT " prefix before the message.
const MESSAGE_OFFSET_X: i32 = 72;

/// Draw the home screen with the most recent log entries.
pub fn draw_home_screen<D>(
    display: &mut D,
    title: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(DARK_TEAL).ok();

    let title_style = MonoTextStyle::new(FontSize::Title.font(), WHITE);
    Text::with_text_style(title, TITLE_POS, title_style, LEFT_TOP)
        .draw(display)
        .ok();

    // Skip the log list if the logger holds the buffer; the next change redraws
    if let Ok(buffer) = LOG_BUFFER.try_lock() {
        let mut y = LOG_TOP;
        for entry in buffer.latest(HOME_LOG_LINES) {
            draw_log_entry(display, entry, y);
            y += LOG_LINE_HEIGHT;
        }
    }
}

/// Log revision the home screen currently reflects (0 when busy).
pub fn log_revision() -> u32 { LOG_BUFFER.try_lock().map_or(0, |buffer| buffer.revision()) }

/// Draw a single log entry.
fn draw_log_entry<D>(
    display: &mut D,
    entry: &LogEntry,
    y: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let font = FontSize::Small.font();
    let level_style = MonoTextStyle::new(font, entry.level.color());
    let msg_style = MonoTextStyle::new(font, WHITE);

    // Format: [L] TTTTT message
    let mut prefix: String<16> = String::new();
    let _ = write!(prefix, "[{}] {:05}", entry.level.prefix(), entry.timestamp_ms % 100_000);

    Text::with_text_style(&prefix, Point::new(HOME_MARGIN_X, y), level_style, LEFT_TOP)
        .draw(display)
        .ok();

    Text::with_text_style(
        entry.message.as_str(),
        Point::new(HOME_MARGIN_X + MESSAGE_OFFSET_X, y),
        msg_style,
        LEFT_TOP,
    )
    .draw(display)
    .ok();
}
