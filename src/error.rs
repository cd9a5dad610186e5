//! Crate error type.
//!
//! Dialog state machines have no runtime failures of their own; errors only
//! surface at the boundary with the host (bus capacity) or from invalid
//! configuration (custom alphabets).

use thiserror::Error;

/// Errors raised while setting up a dialog.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Every listener slot of the event bus is taken.
    #[error("event bus listener table is full")]
    ListenerTableFull,

    /// A custom alphabet had no characters.
    #[error("alphabet must contain at least one character")]
    EmptyAlphabet,

    /// A custom alphabet contained characters outside printable ASCII.
    #[error("alphabet must be printable ASCII")]
    NonAsciiAlphabet,
}
