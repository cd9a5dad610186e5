//! Button input.
//!
//! - `buttons`: Logical buttons, button sets and events
//! - `debounce`: Debounced edge detection for physical buttons
//! - `bus`: Scoped registration table delivering events to listeners

mod bus;
mod buttons;
mod debounce;

pub use bus::{EventBus, ListenerId, MAILBOX_DEPTH, MAX_LISTENERS, Scope};
pub use buttons::{Button, ButtonEvent, ButtonSet, EventKind};
pub use debounce::{ButtonPad, ButtonState, Edge};
