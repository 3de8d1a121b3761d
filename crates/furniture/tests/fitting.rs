// this_file: crates/furniture/tests/fitting.rs

mod common;

use std::sync::Arc;

use common::{init_logging, NoOutlines, VariableFont, WeightShaper};
use furniture::prelude::*;
use proptest::prelude::*;

fn abc(style: Style) -> StyledString {
    StyledString::with_backends(
        "ABC",
        VariableFont::new(),
        style,
        Arc::new(WeightShaper),
        Arc::new(NoOutlines),
    )
    .unwrap()
}

fn weight_floor() -> FitOptions {
    FitOptions::default().with_axis_floor("wght", 100.0)
}

#[test]
fn test_abc_narrows_weight_to_fit() {
    init_logging();
    let mut text = abc(Style::new(100.0).with_fit(weight_floor()));
    assert!((text.width().unwrap() - 150.0).abs() < 1e-9);

    let outcome = text.fit(50.0).unwrap();

    assert!(outcome.fits());
    assert!(outcome.width() <= 50.0);
    let wght = text.variations().get("wght").unwrap();
    // 3 glyphs * 500 * wght / 400 * 0.1 <= 50 first holds at 133
    assert_eq!(wght, 133.0);
    assert_eq!(outcome.iterations(), 267);
}

#[test]
fn test_abc_reports_when_it_cannot_fit() {
    init_logging();
    let mut text = abc(Style::new(100.0).with_fit(weight_floor()));

    let outcome = text.fit(10.0).unwrap();

    assert!(!outcome.fits());
    assert_eq!(text.variations().get("wght"), Some(100.0));
    assert!((outcome.width() - 37.5).abs() < 1e-9);
    assert_eq!(outcome.iterations(), 300);
}

#[test]
fn test_iteration_budget_stops_the_search() {
    let fit = weight_floor().with_max_iterations(5);
    let mut text = abc(Style::new(100.0).with_fit(fit));

    let outcome = text.fit(10.0).unwrap();

    assert_eq!(outcome.iterations(), 5);
    assert!(!outcome.fits());
    assert_eq!(text.variations().get("wght"), Some(395.0));
}

#[test]
fn test_tracking_goes_first_then_axes() {
    let mut text = abc(Style::new(100.0).with_tracking(1.0).with_fit(weight_floor()));

    text.fit(140.0).unwrap();

    assert_eq!(text.tracking(), 0.0);
    assert!(text.variations().get("wght").unwrap() < 400.0);
}

#[test]
fn test_floor_above_axis_minimum_is_respected() {
    let fit = FitOptions::default()
        .with_axis_floor("wght", 300.0)
        .with_axis_step("wght", 25.0);
    let mut text = abc(Style::new(100.0).with_fit(fit));

    let outcome = text.fit(10.0).unwrap();

    assert!(!outcome.fits());
    assert_eq!(text.variations().get("wght"), Some(300.0));
    assert_eq!(outcome.iterations(), 4);
}

#[test]
fn test_floor_below_axis_minimum_uses_the_minimum() {
    let fit = FitOptions::default()
        .with_axis_floor("wght", 0.0)
        .with_axis_step("wght", 50.0);
    let mut text = abc(Style::new(100.0).with_fit(fit));

    text.fit(1.0).unwrap();
    assert_eq!(text.variations().get("wght"), Some(100.0));
}

#[test]
fn test_floors_for_missing_axes_are_skipped() {
    let fit = FitOptions::default()
        .with_axis_floor("wdth", 50.0)
        .with_axis_floor("wght", 100.0);
    let mut text = abc(Style::new(100.0).with_fit(fit));

    assert!(text.fit(50.0).unwrap().fits());
    assert!(text.variations().get("wdth").is_none());
}

#[test]
fn test_wide_enough_never_grows() {
    let mut text = abc(Style::new(100.0).with_tracking(2.0).with_fit(weight_floor()));

    let outcome = text.fit(1000.0).unwrap();

    assert_eq!(outcome.iterations(), 0);
    assert_eq!(text.tracking(), 2.0);
    assert_eq!(text.variations().get("wght"), Some(400.0));
}

#[test]
fn test_fit_is_idempotent() {
    let mut text = abc(Style::new(100.0).with_tracking(3.0).with_fit(weight_floor()));

    text.fit(80.0).unwrap();
    let tracking = text.tracking();
    let variations = text.variations().clone();

    let again = text.fit(80.0).unwrap();

    assert_eq!(again.iterations(), 0);
    assert_eq!(text.tracking(), tracking);
    assert_eq!(text.variations(), &variations);
}

#[test]
fn test_place_fits_to_rect_width() {
    let mut text = abc(Style::new(100.0).with_fit(weight_floor()));

    let outcome = text
        .place(Rect::new(0.0, 0.0, 50.0, 100.0), "CC".parse().unwrap())
        .unwrap();

    assert!(outcome.fits());
    assert!(text.width().unwrap() <= 50.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn narrower_targets_never_measure_wider(a in 40.0..200.0f64, b in 40.0..200.0f64) {
        let (narrow, wide) = if a <= b { (a, b) } else { (b, a) };
        let style = || Style::new(100.0).with_tracking(4.0).with_fit(weight_floor());

        let mut first = abc(style());
        let mut second = abc(style());
        let narrow_outcome = first.fit(narrow).unwrap();
        let wide_outcome = second.fit(wide).unwrap();

        prop_assert!(narrow_outcome.fits() && wide_outcome.fits());
        prop_assert!(narrow_outcome.width() <= wide_outcome.width());
    }

    #[test]
    fn fitted_strings_stay_within_their_axes(target in 0.0..300.0f64) {
        let mut text = abc(Style::new(100.0).with_tracking(1.5).with_fit(weight_floor()));
        text.fit(target).unwrap();

        let wght = text.variations().get("wght").unwrap();
        prop_assert!((100.0..=900.0).contains(&wght));
        prop_assert!(text.tracking() >= 0.0);
    }
}
