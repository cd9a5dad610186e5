//! Modal dialogs.
//!
//! A dialog borrows its [`Host`], registers button listeners on
//! construction and, once `run` is awaited, pushes itself onto the host's
//! overlay stack until the user resolves it.
//!
//! - `alphabet`: Wraparound cursor over the text-entry character set
//! - `repeat`: Press-and-hold auto-repeat with generation-based cancellation
//! - `host`: Host, overlay and render trigger interfaces
//! - `confirm`: Yes/No confirmation
//! - `text`: Free-text entry

pub mod alphabet;
pub mod confirm;
pub mod host;
pub mod repeat;
pub mod text;

pub use alphabet::{Alphabet, Step, advance};
pub use confirm::ConfirmDialog;
pub use host::{Host, MAX_OVERLAYS, Overlay, OverlayStack, RenderTrigger};
pub use repeat::{Generation, RepeatRequest, RepeatTimer};
pub use text::{MAX_TEXT_LEN, TextBuffer, TextDialog, TextResult};

/// Lines of a message that are drawn; further lines are dropped.
pub const MAX_MESSAGE_LINES: usize = 6;

/// Text shown by a dialog.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Message<'a> {
    Line(&'a str),
    Lines(&'a [&'a str]),
}

impl<'a> Message<'a> {
    /// Drawn lines, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let (single, rest): (Option<&'a str>, &'a [&'a str]) = match *self {
            Self::Line(line) => (Some(line), &[]),
            Self::Lines(lines) => (None, lines),
        };
        single.into_iter().chain(rest.iter().copied()).take(MAX_MESSAGE_LINES)
    }

    /// Number of drawn lines.
    pub fn line_count(&self) -> usize { self.lines().count() }
}

impl<'a> From<&'a str> for Message<'a> {
    fn from(line: &'a str) -> Self { Self::Line(line) }
}

impl<'a> From<&'a [&'a str]> for Message<'a> {
    fn from(lines: &'a [&'a str]) -> Self { Self::Lines(lines) }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for Message<'a> {
    fn from(lines: &'a [&'a str; N]) -> Self { Self::Lines(lines) }
}
