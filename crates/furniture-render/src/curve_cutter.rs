//! Arc-length queries on a fixed path, for setting text along a curve
//!
//! A [`CurveCutter`] wraps a path once and measures every segment up
//! front. Queries then walk whole segments until the requested length falls
//! inside one, and scan that segment in small parameter steps until the
//! prefix is long enough. The scan overshoots by at most one step.
//!
//! Straight segments are not measured unless [`LineLength::Measure`] is
//! chosen; with the default they contribute nothing to the running length.

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, PathSeg, Point};

/// Parameter-space step used when scanning the final segment
pub const DEFAULT_STEP: f64 = 0.0015;

/// Arc-length accuracy handed to kurbo
pub const DEFAULT_ACCURACY: f64 = 1e-3;

/// How straight segments count towards the running length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineLength {
    /// Lines contribute zero length
    #[default]
    Ignore,
    /// Lines contribute their chord length
    Measure,
}

/// A path measured once, queried by length many times
#[derive(Debug, Clone)]
pub struct CurveCutter {
    segments: Vec<PathSeg>,
    lengths: Vec<f64>,
    total: f64,
    step: f64,
    accuracy: f64,
    lines: LineLength,
}

impl CurveCutter {
    pub fn new(path: &BezPath) -> Self {
        Self::with_options(path, LineLength::default(), DEFAULT_STEP, DEFAULT_ACCURACY)
    }

    /// Quadratic segments are raised to cubics before measuring
    pub fn with_options(path: &BezPath, lines: LineLength, step: f64, accuracy: f64) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step.min(1.0)
        } else {
            DEFAULT_STEP
        };
        let accuracy = if accuracy.is_finite() && accuracy > 0.0 {
            accuracy
        } else {
            DEFAULT_ACCURACY
        };

        let segments: Vec<PathSeg> = path
            .segments()
            .map(|seg| match seg {
                PathSeg::Quad(quad) => PathSeg::Cubic(quad.raise()),
                other => other,
            })
            .collect();
        let lengths: Vec<f64> = segments
            .iter()
            .map(|seg| measure(seg, lines, accuracy))
            .collect();
        let total = lengths.iter().sum();

        Self {
            segments,
            lengths,
            total,
            step,
            accuracy,
            lines,
        }
    }

    /// Total measured length of the path
    pub fn length(&self) -> f64 {
        self.total
    }

    pub fn segment_lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// The path from its start up to `length`
    ///
    /// `None` when `length` is negative, not finite, or beyond the end of
    /// the path.
    pub fn subsegment(&self, length: f64) -> Option<Vec<PathSeg>> {
        if !length.is_finite() || length < 0.0 || length > self.total {
            return None;
        }

        let mut out = Vec::new();
        let mut run = 0.0;

        for (seg, &seg_len) in self.segments.iter().zip(&self.lengths) {
            if run + seg_len <= length {
                out.push(*seg);
                run += seg_len;
                continue;
            }

            let remaining = length - run;
            let mut t = 0.0;
            loop {
                t += self.step;
                if t >= 1.0 {
                    out.push(*seg);
                    break;
                }
                let part = seg.subsegment(0.0..t);
                if measure(&part, self.lines, self.accuracy) > remaining {
                    out.push(part);
                    break;
                }
            }
            return Some(out);
        }

        Some(out)
    }

    /// Point at `length` along the path and the path's heading there
    ///
    /// The heading is the angle in degrees of the last control handle
    /// (handle to end point) plus 90, so a glyph is rotated by
    /// `tangent - 90` to follow the path.
    pub fn point_and_tangent_at_length(&self, length: f64) -> Option<(Point, f64)> {
        let prefix = self.subsegment(length)?;
        let last = prefix.last()?;
        let (handle, end) = last_handle(last);
        let angle = (end.y - handle.y).atan2(end.x - handle.x).to_degrees();
        Some((end, angle + 90.0))
    }
}

fn measure(seg: &PathSeg, lines: LineLength, accuracy: f64) -> f64 {
    match (seg, lines) {
        (PathSeg::Line(_), LineLength::Ignore) => 0.0,
        (seg, _) => seg.arclen(accuracy),
    }
}

/// Last control point distinct from the end, falling back along the segment
fn last_handle(seg: &PathSeg) -> (Point, Point) {
    let (candidates, end): (Vec<Point>, Point) = match *seg {
        PathSeg::Line(line) => (vec![line.p0], line.p1),
        PathSeg::Quad(quad) => (vec![quad.p1, quad.p0], quad.p2),
        PathSeg::Cubic(cubic) => (vec![cubic.p2, cubic.p1, cubic.p0], cubic.p3),
    };
    let handle = candidates
        .into_iter()
        .find(|p| *p != end)
        .unwrap_or(end);
    (handle, end)
}

/// Sum of the measured lengths of `segments`
pub fn path_length(segments: &[PathSeg], lines: LineLength) -> f64 {
    segments
        .iter()
        .map(|seg| measure(seg, lines, DEFAULT_ACCURACY))
        .sum()
}
