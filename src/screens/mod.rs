//! Screens for the dialog demo.
//!
//! Provides the home screen and the render trigger that draws it with the
//! dialog overlays on top.

mod home;
mod screen;

pub use home::{draw_home_screen, log_revision};
pub use screen::Screen;
