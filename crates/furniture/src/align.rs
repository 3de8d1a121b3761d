//! Anchoring a finished string inside a rectangle
//!
//! Horizontal placement uses the tight ink box. Vertical placement uses
//! the cap height instead of the ink, so strings with and without
//! descenders or accents share a baseline.

use std::fmt;
use std::str::FromStr;

use kurbo::{Rect, Vec2};

use furniture_core::error::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    North,
    Center,
    South,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    West,
    Center,
    East,
}

/// Two-letter anchor such as `"NW"` or `"CC"`: vertical first, then horizontal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl Alignment {
    pub const CENTER: Alignment = Alignment {
        vertical: Vertical::Center,
        horizontal: Horizontal::Center,
    };

    pub fn new(vertical: Vertical, horizontal: Horizontal) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }

    /// Translation that moves a string into `rect`
    ///
    /// `ink` is the string's tight bounding box before the move, `None` when
    /// nothing was drawn. `advance` is the box spanned by the glyph frames
    /// and stands in for the ink when there is none. `cap_height` is in
    /// output units.
    pub fn offset(&self, rect: Rect, ink: Option<Rect>, advance: Rect, cap_height: f64) -> Vec2 {
        let rect = rect.abs();
        let bounds = ink.unwrap_or(advance);

        let dx = match self.horizontal {
            Horizontal::West => rect.x0 - bounds.x0,
            Horizontal::Center => rect.center().x - bounds.center().x,
            Horizontal::East => rect.x1 - bounds.x1,
        };

        let dy = match self.vertical {
            Vertical::North => rect.y1 - cap_height,
            Vertical::Center => rect.center().y - cap_height / 2.0,
            Vertical::South => rect.y0,
        };

        Vec2::new(dx, dy)
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::CENTER
    }
}

impl FromStr for Alignment {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let mut chars = upper.chars();
        let (Some(v), Some(h), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(LayoutError::InvalidAlignment(s.to_string()));
        };

        let vertical = match v {
            'N' => Vertical::North,
            'C' => Vertical::Center,
            'S' => Vertical::South,
            _ => return Err(LayoutError::InvalidAlignment(s.to_string())),
        };
        let horizontal = match h {
            'W' => Horizontal::West,
            'C' => Horizontal::Center,
            'E' => Horizontal::East,
            _ => return Err(LayoutError::InvalidAlignment(s.to_string())),
        };

        Ok(Self::new(vertical, horizontal))
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = match self.vertical {
            Vertical::North => 'N',
            Vertical::Center => 'C',
            Vertical::South => 'S',
        };
        let h = match self.horizontal {
            Horizontal::West => 'W',
            Horizontal::Center => 'C',
            Horizontal::East => 'E',
        };
        write!(f, "{v}{h}")
    }
}
