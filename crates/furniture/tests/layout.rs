// this_file: crates/furniture/tests/layout.rs

mod common;

use std::sync::Arc;

use common::{init_logging, BoxOutlines, FlatOutlines, NoOutlines, VariableFont, WeightShaper};
use furniture::core::OutlineSource;
use furniture::prelude::*;
use kurbo::{Point, Shape, Vec2};

fn styled(text: &str, outlines: Arc<dyn OutlineSource>) -> StyledString {
    StyledString::with_backends(
        text,
        VariableFont::new(),
        Style::new(100.0),
        Arc::new(WeightShaper),
        outlines,
    )
    .unwrap()
}

fn straight_path(length: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.curve_to((length / 3.0, 0.0), (2.0 * length / 3.0, 0.0), (length, 0.0));
    path
}

#[test]
fn test_outline_is_scaled_and_cubic_only() {
    let mut text = styled("AB", Arc::new(BoxOutlines));
    let path = text.as_outline().unwrap();

    let bbox = path.bounding_box();
    // Boxes run 50..450 and 700 tall in a 500-unit cell, at 0.1 scale
    let expected = kurbo::Rect::new(5.0, 0.0, 95.0, 70.0);
    assert!((bbox.x0 - expected.x0).abs() < 1e-9);
    assert!((bbox.y0 - expected.y0).abs() < 1e-9);
    assert!((bbox.x1 - expected.x1).abs() < 1e-9);
    assert!((bbox.y1 - expected.y1).abs() < 1e-9);
    assert!(path
        .elements()
        .iter()
        .all(|el| !matches!(el, kurbo::PathEl::QuadTo(..))));
}

#[test]
fn test_alignment_north_west() {
    let mut text = styled("AB", Arc::new(BoxOutlines));
    let rect = Rect::new(0.0, 0.0, 300.0, 200.0);

    text.place(rect, "NW".parse().unwrap()).unwrap();
    let bbox = text.as_outline().unwrap().bounding_box();

    // Ink starts at the left edge; the cap line meets the top edge
    assert!((bbox.x0 - 0.0).abs() < 1e-9);
    assert!((bbox.y1 - 200.0).abs() < 1e-9);
}

#[test]
fn test_alignment_south_east() {
    let mut text = styled("AB", Arc::new(BoxOutlines));
    let rect = Rect::new(0.0, 0.0, 300.0, 200.0);

    text.place(rect, "SE".parse().unwrap()).unwrap();
    let bbox = text.as_outline().unwrap().bounding_box();

    assert!((bbox.x1 - 300.0).abs() < 1e-9);
    assert!((bbox.y0 - 0.0).abs() < 1e-9);
}

#[test]
fn test_alignment_center_uses_cap_height() {
    let mut text = styled("AB", Arc::new(BoxOutlines));
    let rect = Rect::new(0.0, 0.0, 300.0, 200.0);

    text.place(rect, Alignment::CENTER).unwrap();

    // cap height 700 units at 0.1 scale; ink 5..95 centred on 150
    assert!((text.offset() - Vec2::new(100.0, 65.0)).hypot() < 1e-9);
}

#[test]
fn test_center_alignment_with_zero_height_ink() {
    init_logging();
    let mut text = styled("AB", Arc::new(FlatOutlines));
    let rect = Rect::new(0.0, 0.0, 300.0, 200.0);

    text.place(rect, Alignment::CENTER).unwrap();
    let offset = text.offset();

    assert!(offset.x.is_finite() && offset.y.is_finite());
    assert!((offset - Vec2::new(100.0, 65.0)).hypot() < 1e-9);
}

#[test]
fn test_center_alignment_without_any_geometry() {
    let font: Arc<dyn FontRef> = Arc::new(common::VariableFont { cap_height: None });
    let mut text = StyledString::with_backends(
        "",
        font,
        Style::new(100.0),
        Arc::new(WeightShaper),
        Arc::new(NoOutlines),
    )
    .unwrap();
    let rect = Rect::new(0.0, 0.0, 300.0, 200.0);

    text.place(rect, Alignment::CENTER).unwrap();

    assert_eq!(text.offset(), rect.center().to_vec2());
    assert!(text.as_outline().unwrap().elements().is_empty());
}

#[test]
fn test_text_without_ink_aligns_by_advance() {
    let mut text = styled("AB", Arc::new(NoOutlines));
    let rect = Rect::new(0.0, 0.0, 300.0, 200.0);

    text.place(rect, "CE".parse().unwrap()).unwrap();

    // Two 50-unit advances end flush with the right edge
    assert!((text.offset().x - 200.0).abs() < 1e-9);
}

#[test]
fn test_path_drops_glyphs_past_its_end() {
    init_logging();
    let mut text = styled("abcdefgh", Arc::new(BoxOutlines)).with_path(&straight_path(300.0));

    let placed = text.layout().unwrap();

    // Midpoints at 25, 75, ... 375; only those up to 300 survive
    assert_eq!(placed.len(), 6);
    assert!(text.as_outline().unwrap().bounding_box().x1 < 300.0);
}

#[test]
fn test_path_places_glyph_midpoints_on_the_curve() {
    let mut text = styled("ab", Arc::new(BoxOutlines)).with_path(&straight_path(300.0));
    let placed = text.layout().unwrap();

    // The pen start of the second glyph lands about 50 along the path
    let origin = placed[1].transform * Point::ZERO;
    assert!((origin.x - 50.0).abs() < 1.0);
    assert!(origin.y.abs() < 1e-9);
}

#[test]
fn test_path_rotates_glyphs_to_follow_it() {
    let mut up = BezPath::new();
    up.move_to((0.0, 0.0));
    up.curve_to((0.0, 100.0), (0.0, 200.0), (0.0, 300.0));
    let mut text = styled("a", Arc::new(BoxOutlines)).with_path(&up);

    let placed = text.layout().unwrap();
    let t = placed[0].transform;
    let baseline = (t * Point::new(1000.0, 0.0)) - (t * Point::ZERO);

    // The baseline runs up the path
    assert!(baseline.x.abs() < 1e-6);
    assert!(baseline.y > 0.0);
}

#[test]
fn test_path_shorter_than_first_glyph_draws_nothing() {
    let mut text = styled("abc", Arc::new(BoxOutlines)).with_path(&straight_path(10.0));
    assert!(text.layout().unwrap().is_empty());
    assert!(text.as_outline().unwrap().elements().is_empty());
}

#[test]
fn test_glyph_sink_collects_records() {
    let mut text = styled("AB", Arc::new(BoxOutlines));
    let mut sink = OutputSink::glyphs();

    text.draw_to(&mut sink).unwrap();
    let records = sink.into_glyphs().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].glyph_id, 'A' as u32);
    assert!((records[1].transform * Point::ZERO - Point::new(50.0, 0.0)).hypot() < 1e-9);
    assert!((records[1].advance - 50.0).abs() < 1e-9);
}

#[test]
fn test_unknown_axis_strict_mode_fails() {
    let style = Style::new(100.0)
        .with_variation("wdth", 75.0_f32)
        .with_normalize(NormalizeOptions {
            strict: true,
            ..Default::default()
        });
    let result = StyledString::with_backends(
        "A",
        VariableFont::new(),
        style,
        Arc::new(WeightShaper),
        Arc::new(NoOutlines),
    );
    assert!(result.is_err());
}

#[test]
fn test_bad_alignment_code() {
    assert!("XY".parse::<Alignment>().is_err());
}
