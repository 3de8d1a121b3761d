//! Variation axes: metadata, requested values and clamping
//!
//! A variable font exposes a handful of continuous axes (`wght`, `wdth`,
//! `opsz`, ...). Callers ask for values in several forms: absolute design
//! coordinates, a relative position between the axis extremes, or one of the
//! named bounds. [`AxisModel::normalize`] resolves every request into an
//! absolute value that always lies inside the axis range.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VariationError};

/// One continuous axis of a variable font
#[derive(Debug, Clone, PartialEq)]
pub struct VariationAxis {
    pub tag: String,
    pub min_value: f32,
    pub default_value: f32,
    pub max_value: f32,
}

impl VariationAxis {
    /// Build an axis, reordering the bounds so `min <= default <= max` holds
    pub fn new(tag: impl Into<String>, min_value: f32, default_value: f32, max_value: f32) -> Self {
        let (min_value, max_value) = if min_value <= max_value {
            (min_value, max_value)
        } else {
            (max_value, min_value)
        };
        Self {
            tag: tag.into(),
            min_value,
            default_value: default_value.clamp(min_value, max_value),
            max_value,
        }
    }

    /// Clamp `value` into `[min_value, max_value]`
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min_value, self.max_value)
    }

    /// The usable range once the insets are taken off both ends.
    ///
    /// An inset wider than the axis collapses the range onto the default.
    pub fn inset_range(&self, inset_min: f32, inset_max: f32) -> (f32, f32) {
        let lo = self.min_value + inset_min.max(0.0);
        let hi = self.max_value - inset_max.max(0.0);
        if lo > hi {
            (self.default_value, self.default_value)
        } else {
            (lo, hi)
        }
    }
}

/// A value requested for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisValue {
    /// Design-space coordinate, clamped into range
    Absolute(f32),
    /// Position in `[0, 1]` between the (inset) axis extremes
    Relative(f32),
    Min,
    Max,
    Default,
}

impl From<f32> for AxisValue {
    fn from(value: f32) -> Self {
        AxisValue::Absolute(value)
    }
}

impl FromStr for AxisValue {
    type Err = VariationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" => Ok(AxisValue::Min),
            "max" => Ok(AxisValue::Max),
            "default" => Ok(AxisValue::Default),
            other => other
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(AxisValue::Absolute)
                .ok_or_else(|| VariationError::InvalidValue(s.to_string())),
        }
    }
}

/// Ordered axis-tag → value mapping
///
/// Insertion order is preserved; the fitting search walks axes in this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariationSettings(Vec<(String, f32)>);

impl VariationSettings {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn get(&self, tag: &str) -> Option<f32> {
        self.0.iter().find(|(t, _)| t == tag).map(|(_, v)| *v)
    }

    /// Set a value, keeping the original position of an existing tag
    pub fn set(&mut self, tag: impl Into<String>, value: f32) {
        let tag = tag.into();
        match self.0.iter_mut().find(|(t, _)| *t == tag) {
            Some(entry) => entry.1 = value,
            None => self.0.push((tag, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(t, v)| (t.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow as `(tag, value)` pairs, the shape backends expect
    pub fn as_slice(&self) -> &[(String, f32)] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<(S, f32)> for VariationSettings {
    fn from_iter<I: IntoIterator<Item = (S, f32)>>(iter: I) -> Self {
        let mut settings = VariationSettings::new();
        for (tag, value) in iter {
            settings.set(tag, value);
        }
        settings
    }
}

/// How requested axis values are resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Unknown axis tags fail instead of being ignored with a warning
    pub strict: bool,
    /// Treat bare absolute values as relative positions in `[0, 1]`
    pub relative: bool,
    /// Keep values this far above the axis minimum
    pub inset_min: f32,
    /// Keep values this far below the axis maximum
    pub inset_max: f32,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strict: false,
            relative: false,
            inset_min: 0.0,
            inset_max: 0.0,
        }
    }
}

/// Something worth telling the caller about, but not worth failing for
#[derive(Debug, Clone, PartialEq)]
pub enum AxisDiagnostic {
    /// The font has no axis with this tag; the request was dropped
    UnknownAxis(String),
    /// The value fell outside the axis and was pulled back in
    Clamped {
        tag: String,
        requested: f32,
        clamped: f32,
    },
}

impl fmt::Display for AxisDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisDiagnostic::UnknownAxis(tag) => write!(f, "unknown axis {tag:?} ignored"),
            AxisDiagnostic::Clamped {
                tag,
                requested,
                clamped,
            } => write!(f, "axis {tag:?} value {requested} clamped to {clamped}"),
        }
    }
}

/// Result of [`AxisModel::normalize`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub settings: VariationSettings,
    pub diagnostics: Vec<AxisDiagnostic>,
}

/// Per-font axis metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisModel {
    axes: Vec<VariationAxis>,
}

impl AxisModel {
    pub fn new(axes: Vec<VariationAxis>) -> Self {
        Self { axes }
    }

    pub fn axes(&self) -> &[VariationAxis] {
        &self.axes
    }

    pub fn axis(&self, tag: &str) -> Option<&VariationAxis> {
        self.axes.iter().find(|axis| axis.tag == tag)
    }

    /// Every axis at its default value, in font order
    pub fn defaults(&self) -> VariationSettings {
        self.axes
            .iter()
            .map(|axis| (axis.tag.clone(), axis.default_value))
            .collect()
    }

    /// Resolve requested values into clamped absolute axis coordinates.
    ///
    /// Only tags present in `requested` appear in the output. Unknown tags
    /// are dropped with a warning, or rejected when `options.strict` is set.
    pub fn normalize(
        &self,
        requested: &[(String, AxisValue)],
        options: &NormalizeOptions,
    ) -> Result<Normalized> {
        let mut out = Normalized::default();

        for (tag, value) in requested {
            if tag.chars().count() != 4 {
                return Err(VariationError::InvalidTag(tag.clone()).into());
            }

            let Some(axis) = self.axis(tag) else {
                if options.strict {
                    return Err(VariationError::UnknownAxis(tag.clone()).into());
                }
                log::warn!("Font has no variation axis {tag:?}; ignoring it");
                out.diagnostics.push(AxisDiagnostic::UnknownAxis(tag.clone()));
                continue;
            };

            let (lo, hi) = axis.inset_range(options.inset_min, options.inset_max);
            let value = match *value {
                AxisValue::Absolute(v) if options.relative => AxisValue::Relative(v),
                other => other,
            };

            let resolved = match value {
                AxisValue::Min => axis.min_value,
                AxisValue::Max => axis.max_value,
                AxisValue::Default => axis.default_value,
                AxisValue::Relative(t) if !t.is_finite() => axis.default_value,
                AxisValue::Absolute(v) if !v.is_finite() => axis.default_value,
                AxisValue::Relative(t) => {
                    let t = t.clamp(0.0, 1.0);
                    lo + (hi - lo) * t
                },
                AxisValue::Absolute(v) => {
                    let clamped = v.clamp(lo, hi);
                    if clamped != v {
                        log::warn!(
                            "Axis {tag:?} value {v} outside [{lo}, {hi}]; clamped to {clamped}"
                        );
                        out.diagnostics.push(AxisDiagnostic::Clamped {
                            tag: tag.clone(),
                            requested: v,
                            clamped,
                        });
                    }
                    clamped
                },
            };

            out.settings.set(tag.clone(), axis.clamp(resolved));
        }

        Ok(out)
    }
}

/// The only handle through which variation coordinates reach a face.
///
/// Applying a context mutates the face, so a face shared between several
/// strings must be locked around `apply_to` + outline extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariationContext {
    settings: VariationSettings,
}

impl VariationContext {
    pub fn new(settings: VariationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &VariationSettings {
        &self.settings
    }

    /// Push these coordinates into a face
    pub fn apply_to(&self, face: &mut dyn VariableFace) {
        face.set_variations(&self.settings);
    }
}

/// A face whose variation coordinates can be changed in place
pub trait VariableFace {
    fn set_variations(&mut self, settings: &VariationSettings);

    fn variations(&self) -> &VariationSettings;
}
