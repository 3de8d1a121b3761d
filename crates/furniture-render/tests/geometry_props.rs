// this_file: crates/furniture-render/tests/geometry_props.rs

use furniture_render::{
    curve_cutter::{path_length, DEFAULT_STEP},
    raise_quadratic, CurveCutter, LineLength,
};
use kurbo::{BezPath, CubicBez, ParamCurve, ParamCurveArclen, ParamCurveDeriv, Point, QuadBez};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

fn cubic_path() -> impl Strategy<Value = BezPath> {
    (point(), prop::collection::vec((point(), point(), point()), 1..4)).prop_map(
        |(start, curves)| {
            let mut path = BezPath::new();
            path.move_to(start);
            for (c1, c2, end) in curves {
                path.curve_to(c1, c2, end);
            }
            path
        },
    )
}

/// Largest speed along the segment bounds how far one scan step can overshoot
fn max_speed(path: &BezPath) -> f64 {
    path.segments()
        .map(|seg| match seg {
            kurbo::PathSeg::Cubic(c) => {
                let d = c.deriv();
                (0..=100)
                    .map(|i| d.eval(i as f64 / 100.0).to_vec2().hypot())
                    .fold(0.0, f64::max)
            },
            _ => 0.0,
        })
        .fold(0.0, f64::max)
}

proptest! {
    #[test]
    fn raised_quadratic_is_exact(p0 in point(), p1 in point(), p2 in point()) {
        let (c1, c2, end) = raise_quadratic(p0, p1, p2);
        let quad = QuadBez::new(p0, p1, p2);
        let cubic = CubicBez::new(p0, c1, c2, end);

        for t in [0.0, 0.5, 1.0] {
            prop_assert!((quad.eval(t) - cubic.eval(t)).hypot() < 1e-6);
        }
    }

    #[test]
    fn total_length_is_sum_of_segments(path in cubic_path()) {
        let cutter = CurveCutter::new(&path);
        let sum: f64 = path.segments().map(|seg| seg.arclen(1e-3)).sum();
        prop_assert!((cutter.length() - sum).abs() <= 1e-2 * (1.0 + sum));
        let parts: f64 = cutter.segment_lengths().iter().sum();
        prop_assert!((cutter.length() - parts).abs() < 1e-9);
    }

    #[test]
    fn subsegment_length_tracks_request(path in cubic_path(), frac in 0.01..0.99f64) {
        let cutter = CurveCutter::new(&path);
        prop_assume!(cutter.length() > 1.0);

        let target = cutter.length() * frac;
        let prefix = cutter.subsegment(target).unwrap();
        let got = path_length(&prefix, LineLength::Ignore);
        let tolerance = max_speed(&path) * DEFAULT_STEP + 1e-2 * (1.0 + target);

        prop_assert!(got + 1e-2 * (1.0 + target) >= target);
        prop_assert!(got <= target + tolerance);
    }

    #[test]
    fn past_the_end_is_exhausted(path in cubic_path(), extra in 0.5..100.0f64) {
        let cutter = CurveCutter::new(&path);
        prop_assert!(cutter.point_and_tangent_at_length(cutter.length() + extra).is_none());
    }
}
