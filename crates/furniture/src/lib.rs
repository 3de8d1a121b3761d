//! Furniture: variable-font text layout
//!
//! Takes a string, a font and a [`Style`] and produces cubic outlines in
//! output space. Along the way it can:
//!
//! - resolve axis requests (`"min"`, relative positions, insets) against
//!   the font's variation axes
//! - shape with harfrust at the chosen instance
//! - track uniformly, or stretch Arabic at its joining points when the
//!   font carries a tatweel
//! - shrink tracking and axes until the string fits a width
//! - set the string along a curve
//! - anchor it in a rectangle by a two-letter code such as `"CC"`
//!
//! # Example
//!
//! ```no_run
//! use furniture::prelude::*;
//!
//! # fn main() -> furniture::Result<()> {
//! let style = Style::new(72.0)
//!     .with_tracking(4.0)
//!     .with_variation("wght", AxisValue::Max)
//!     .with_fit(FitOptions::default().with_axis_floor("wght", 300.0));
//!
//! let mut text = StyledString::from_file("Furniture", "Font[wght].ttf", style)?;
//! text.place(Rect::new(0.0, 0.0, 400.0, 100.0), "CC".parse()?)?;
//! let outline = text.as_outline()?;
//! # Ok(())
//! # }
//! ```

pub mod align;
pub mod spacing;
pub mod style;
pub mod styled_string;

pub use align::Alignment;
pub use furniture_core::{error, FurnitureError, Result};
pub use spacing::SpacingPolicy;
pub use style::{FitOptions, SpacingMode, Style};
pub use styled_string::{FitOutcome, PlacedGlyph, StyledString};

pub use furniture_core as core;
pub use furniture_fontdb as fontdb;
pub use furniture_render as render;
pub use furniture_shape_hr as shape_hr;
pub use furniture_unicode as unicode;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{
        Alignment, FitOptions, FitOutcome, SpacingMode, Style, StyledString,
    };
    pub use furniture_core::{
        error::{FurnitureError, Result},
        traits::{FontRef, OutlineSource, Shaper},
        types::{Direction, OutlineMode},
        AxisValue, FeatureFlags, NormalizeOptions,
    };
    pub use furniture_fontdb::{Font, FontDatabase};
    pub use furniture_render::{CurveCutter, LineLength, OutputSink};
    pub use kurbo::{BezPath, Rect};
}
