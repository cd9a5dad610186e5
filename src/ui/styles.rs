//! Fonts and text style settings.
//!
//! Dialogs describe text with three small enums ([`FontSize`], [`TextAlign`],
//! [`TextBaseline`]) and the graphics context turns them into
//! embedded-graphics styles. The common combinations are `const`, so the
//! adapter never builds a `TextStyleBuilder` per frame.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::{PROFONT_9_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

// =============================================================================
// Style Settings
// =============================================================================

/// Font size selected by a dialog before placing text.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontSize {
    /// Log lines on the home screen.
    Small,
    /// Dialog labels.
    #[default]
    Label,
    /// The entry line of a text dialog.
    Entry,
    /// Screen titles.
    Title,
}

impl FontSize {
    pub const fn font(self) -> &'static MonoFont<'static> {
        match self {
            Self::Small => &PROFONT_9_POINT,
            Self::Label => &PROFONT_14_POINT,
            Self::Entry => &PROFONT_18_POINT,
            Self::Title => &PROFONT_24_POINT,
        }
    }
}

/// Horizontal anchor of a text run.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical anchor of a text run.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
    Alphabetic,
}

impl TextAlign {
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::Left => Alignment::Left,
            Self::Center => Alignment::Center,
            Self::Right => Alignment::Right,
        }
    }
}

impl TextBaseline {
    pub const fn baseline(self) -> Baseline {
        match self {
            Self::Top => Baseline::Top,
            Self::Middle => Baseline::Middle,
            Self::Bottom => Baseline::Bottom,
            Self::Alphabetic => Baseline::Alphabetic,
        }
    }
}

// =============================================================================
// Text Styles (const - zero runtime cost)
// =============================================================================

/// Centered on both axes. Dialog labels and entry lines.
pub const CENTERED: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Left aligned, top anchored. Home screen log lines.
pub const LEFT_TOP: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Text style for an alignment/baseline pair.
pub const fn text_style(
    align: TextAlign,
    baseline: TextBaseline,
) -> TextStyle {
    match (align, baseline) {
        (TextAlign::Center, TextBaseline::Middle) => CENTERED,
        (TextAlign::Left, TextBaseline::Top) => LEFT_TOP,
        _ => TextStyleBuilder::new()
            .alignment(align.alignment())
            .baseline(baseline.baseline())
            .build(),
    }
}
