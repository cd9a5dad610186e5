//! Wraparound cursor over a fixed character set.
//!
//! The text dialog never stores characters while scrolling, only an index
//! into an [`Alphabet`]. [`advance`] moves that index one step with modulo
//! wraparound in both directions.

use crate::error::Error;

/// Characters offered by the default alphabet, in scroll order.
const DEFAULT_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-=!\"$%^&*()_+[];'#,./{}:@~<>?";

/// Direction of one cursor step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Towards the start of the alphabet (UP).
    Previous,
    /// Towards the end of the alphabet (DOWN).
    Next,
}

/// Index reached from `index` after one `step` through `size` characters.
///
/// `size` must be non-zero; [`Alphabet`] guarantees it.
pub const fn advance(
    index: usize,
    step: Step,
    size: usize,
) -> usize {
    match step {
        Step::Previous if index == 0 => size - 1,
        Step::Previous => (index - 1) % size,
        Step::Next => (index + 1) % size,
    }
}

/// Non-empty ordered set of printable ASCII characters.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Alphabet {
    chars: &'static [u8],
}

impl Alphabet {
    /// Lowercase, uppercase, digits, then punctuation.
    pub const DEFAULT: Self = Self {
        chars: DEFAULT_CHARS.as_bytes(),
    };

    /// Decimal digits only, for PIN entry.
    pub const DIGITS: Self = Self {
        chars: b"0123456789",
    };

    /// Validate a custom alphabet.
    pub const fn new(chars: &'static str) -> Result<Self, Error> {
        let bytes = chars.as_bytes();
        if bytes.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        let mut i = 0;
        while i < bytes.len() {
            if !bytes[i].is_ascii_graphic() && bytes[i] != b' ' {
                return Err(Error::NonAsciiAlphabet);
            }
            i += 1;
        }
        Ok(Self { chars: bytes })
    }

    /// Number of characters; never zero.
    #[inline]
    pub const fn size(&self) -> usize { self.chars.len() }

    /// Character at `index`, wrapping past the end.
    #[inline]
    pub const fn char_at(
        &self,
        index: usize,
    ) -> char {
        self.chars[index % self.chars.len()] as char
    }

    /// Index one `step` away from `index` within this alphabet.
    #[inline]
    pub const fn advance(
        &self,
        index: usize,
        step: Step,
    ) -> usize {
        advance(index, step, self.size())
    }

    pub fn as_str(&self) -> &'static str {
        // Validated as ASCII on construction
        core::str::from_utf8(self.chars).unwrap_or_default()
    }
}

impl Default for Alphabet {
    fn default() -> Self { Self::DEFAULT }
}
