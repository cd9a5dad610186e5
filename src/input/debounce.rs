//! Button debounce handling.
//!
//! Provides time-based edge detection with debouncing to prevent multiple
//! triggers from contact bounce on physical buttons. Time is passed in as
//! milliseconds so the logic runs (and is tested) without a time driver.

use super::buttons::{Button, ButtonEvent, ButtonSet};
use crate::config::DEBOUNCE_MS;

/// Debounced transition of a single physical button.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
    Released,
}

/// Button debounce state with time-based edge detection.
pub struct ButtonState {
    was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    pub const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change_ms: None,
        }
    }

    /// Whether the button is currently considered held.
    #[inline]
    pub const fn is_pressed(&self) -> bool { self.was_pressed }

    /// Feed one sample and return the edge it produces, if any.
    ///
    /// Buttons are active-low, so `is_low` means pressed. A change within
    /// [`DEBOUNCE_MS`] of the previous accepted change is treated as bounce.
    pub fn update(
        &mut self,
        is_low: bool,
        now_ms: u64,
    ) -> Option<Edge> {
        if is_low == self.was_pressed {
            return None;
        }

        if let Some(last) = self.last_change_ms
            && now_ms.saturating_sub(last) < DEBOUNCE_MS
        {
            return None;
        }

        self.was_pressed = is_low;
        self.last_change_ms = Some(now_ms);

        Some(if is_low { Edge::Pressed } else { Edge::Released })
    }
}

impl Default for ButtonState {
    fn default() -> Self { Self::new() }
}

/// A fixed set of physical buttons mapped onto logical buttons.
///
/// Folds one poll of all inputs into at most one `Down` and one `Up` event,
/// so buttons pressed in the same poll arrive together in a single set.
pub struct ButtonPad<const N: usize> {
    mapping: [Button; N],
    states: [ButtonState; N],
}

impl<const N: usize> ButtonPad<N> {
    pub const fn new(mapping: [Button; N]) -> Self {
        Self {
            mapping,
            states: [const { ButtonState::new() }; N],
        }
    }

    /// Sample every input (`levels[i]` is `is_low()` of input `i`).
    ///
    /// Returns `(down, up)`; either is `None` when no button changed that way.
    pub fn poll(
        &mut self,
        levels: [bool; N],
        now_ms: u64,
    ) -> (Option<ButtonEvent>, Option<ButtonEvent>) {
        let mut pressed = ButtonSet::EMPTY;
        let mut released = ButtonSet::EMPTY;

        for ((state, button), is_low) in self.states.iter_mut().zip(self.mapping).zip(levels) {
            match state.update(is_low, now_ms) {
                Some(Edge::Pressed) => pressed.insert(button),
                Some(Edge::Released) => released.insert(button),
                None => {}
            }
        }

        let down = (!pressed.is_empty()).then_some(ButtonEvent::Down(pressed));
        let up = (!released.is_empty()).then_some(ButtonEvent::Up(released));
        (down, up)
    }
}
