//! Drawing support for overlays and screens.
//!
//! - `colors`: Raw colors and named color tokens
//! - `styles`: Font sizes and text anchoring
//! - `context`: The drawing capability handed to overlays
//! - `primitives`: Stippled hexagon backdrop
//! - `render`: Redraw tracking through drawing fingerprints

pub mod colors;
pub mod context;
pub mod primitives;
pub mod render;
pub mod styles;

pub use colors::ColorToken;
pub use context::{Backdrop, DrawContext, GraphicsContext};
pub use primitives::Hexagon;
pub use render::{Fingerprint, RenderState};
pub use styles::{FontSize, TextAlign, TextBaseline};
