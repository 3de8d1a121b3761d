//! Everything a caller can say about how a string should look
//!
//! `Style` is a plain parameter struct with public fields, a `Default`, and
//! chained `with_*` setters for the common cases.

use furniture_core::{
    types::{Direction, OutlineMode},
    AxisValue, FeatureFlags, NormalizeOptions,
};

/// Which spacing rule moves glyphs apart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpacingMode {
    /// Kashida-aware when the font carries a tatweel, uniform otherwise
    #[default]
    Auto,
    Uniform,
    Kashida,
}

/// Bounds and steps for the width-fitting search
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    /// Tracking is never reduced below this
    pub tracking_floor: f64,
    /// Amount tracking drops per iteration
    pub tracking_step: f64,
    /// Axes the search may reduce, tried in this order, with their floors
    pub axis_floors: Vec<(String, f32)>,
    /// Per-axis decrement; axes not listed use [`FitOptions::DEFAULT_AXIS_STEP`]
    pub axis_steps: Vec<(String, f32)>,
    pub max_iterations: usize,
}

impl FitOptions {
    pub const DEFAULT_TRACKING_STEP: f64 = 0.25;
    pub const DEFAULT_AXIS_STEP: f32 = 1.0;
    pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

    /// Allow the search to reduce `tag` down to `floor`
    pub fn with_axis_floor(mut self, tag: impl Into<String>, floor: f32) -> Self {
        let tag = tag.into();
        match self.axis_floors.iter_mut().find(|(t, _)| *t == tag) {
            Some(entry) => entry.1 = floor,
            None => self.axis_floors.push((tag, floor)),
        }
        self
    }

    pub fn with_axis_step(mut self, tag: impl Into<String>, step: f32) -> Self {
        let tag = tag.into();
        match self.axis_steps.iter_mut().find(|(t, _)| *t == tag) {
            Some(entry) => entry.1 = step,
            None => self.axis_steps.push((tag, step)),
        }
        self
    }

    pub fn with_tracking_floor(mut self, floor: f64) -> Self {
        self.tracking_floor = floor;
        self
    }

    pub fn with_tracking_step(mut self, step: f64) -> Self {
        self.tracking_step = step;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn axis_step(&self, tag: &str) -> f32 {
        self.axis_steps
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, step)| *step)
            .filter(|step| step.is_finite() && *step > 0.0)
            .unwrap_or(Self::DEFAULT_AXIS_STEP)
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            tracking_floor: 0.0,
            tracking_step: Self::DEFAULT_TRACKING_STEP,
            axis_floors: Vec::new(),
            axis_steps: Vec::new(),
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// How a string is set
///
/// Lengths (`tracking`, `space`) are in output units, the same units as
/// `font_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub font_size: f64,
    /// Extra room after every glyph
    pub tracking: f64,
    /// Extra room after every space, on top of tracking
    pub space: f64,
    /// Requested axis values, resolved against the font's axes
    pub variations: Vec<(String, AxisValue)>,
    pub features: FeatureFlags,
    pub normalize: NormalizeOptions,
    pub fit: FitOptions,
    pub outline_mode: OutlineMode,
    pub spacing: SpacingMode,
    /// Guessed from the text when `None`
    pub direction: Option<Direction>,
    pub script: Option<String>,
    pub language: Option<String>,
}

impl Style {
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    pub fn with_tracking(mut self, tracking: f64) -> Self {
        self.tracking = tracking;
        self
    }

    pub fn with_space(mut self, space: f64) -> Self {
        self.space = space;
        self
    }

    /// Request an axis value; a later request for the same tag wins
    pub fn with_variation(mut self, tag: impl Into<String>, value: impl Into<AxisValue>) -> Self {
        let tag = tag.into();
        let value = value.into();
        match self.variations.iter_mut().find(|(t, _)| *t == tag) {
            Some(entry) => entry.1 = value,
            None => self.variations.push((tag, value)),
        }
        self
    }

    pub fn with_feature(mut self, tag: impl Into<String>, enabled: bool) -> Self {
        self.features.set(tag, enabled);
        self
    }

    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_fit(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }

    pub fn with_outline_mode(mut self, mode: OutlineMode) -> Self {
        self.outline_mode = mode;
        self
    }

    pub fn with_spacing(mut self, spacing: SpacingMode) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            tracking: 0.0,
            space: 0.0,
            variations: Vec::new(),
            features: FeatureFlags::default(),
            normalize: NormalizeOptions::default(),
            fit: FitOptions::default(),
            outline_mode: OutlineMode::default(),
            spacing: SpacingMode::default(),
            direction: None,
            script: None,
            language: None,
        }
    }
}
