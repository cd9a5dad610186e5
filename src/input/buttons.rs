//! Logical buttons and button events.
//!
//! The device exposes six logical buttons. A physical event can carry several
//! of them at once (e.g. UP and DOWN pressed in the same poll), so events
//! carry a [`ButtonSet`] rather than a single [`Button`].

/// Logical button as seen by dialogs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Button {
    Confirm = 0,
    Cancel = 1,
    Left = 2,
    Right = 3,
    Up = 4,
    Down = 5,
}

impl Button {
    /// All logical buttons, in bit order.
    pub const ALL: [Self; 6] = [Self::Confirm, Self::Cancel, Self::Left, Self::Right, Self::Up, Self::Down];

    #[inline]
    const fn bit(self) -> u8 { 1 << self as u8 }

    /// Short uppercase name, as printed in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Confirm => "CONFIRM",
            Self::Cancel => "CANCEL",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

/// Set of logical buttons packed into a bit mask.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: Self = Self(0);

    /// Set containing a single button.
    #[inline]
    pub const fn of(button: Button) -> Self { Self(button.bit()) }

    /// Copy of this set with `button` added.
    #[inline]
    pub const fn with(
        self,
        button: Button,
    ) -> Self {
        Self(self.0 | button.bit())
    }

    #[inline]
    pub fn insert(
        &mut self,
        button: Button,
    ) {
        self.0 |= button.bit();
    }

    #[inline]
    pub const fn contains(
        self,
        button: Button,
    ) -> bool {
        self.0 & button.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    #[inline]
    pub const fn len(self) -> usize { self.0.count_ones() as usize }

    /// Iterate over the buttons in the set, in [`Button::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Button> { Button::ALL.into_iter().filter(move |b| self.contains(*b)) }
}

impl From<Button> for ButtonSet {
    fn from(button: Button) -> Self { Self::of(button) }
}

impl FromIterator<Button> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = Button>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for button in iter {
            set.insert(button);
        }
        set
    }
}

/// Kind of button event a listener subscribes to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    ButtonDown,
    ButtonUp,
}

/// A button transition reported by the host.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Buttons that went down in this event.
    Down(ButtonSet),
    /// Buttons that were released in this event.
    Up(ButtonSet),
}

impl ButtonEvent {
    #[inline]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Down(_) => EventKind::ButtonDown,
            Self::Up(_) => EventKind::ButtonUp,
        }
    }

    #[inline]
    pub const fn buttons(&self) -> ButtonSet {
        match self {
            Self::Down(set) | Self::Up(set) => *set,
        }
    }
}
