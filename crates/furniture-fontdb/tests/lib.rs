// this_file: crates/furniture-fontdb/tests/lib.rs

use std::path::PathBuf;
use std::sync::Arc;

use furniture_core::traits::FontRef;
use furniture_fontdb::{Font, FontDatabase};

/// First font found among common system locations; tests skip when none exist
fn system_font_path() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
}

#[test]
fn test_loading_real_font_exposes_metrics() {
    let Some(path) = system_font_path() else {
        return;
    };
    let font = Font::from_file(&path).expect("load system font");

    assert!(font.units_per_em() >= 16);
    let a = font.glyph_id('A').expect("font maps 'A'");
    assert!(font.advance_width(a) > 0.0);
    assert!(font.glyph_count().unwrap_or(0) > a);
}

#[test]
fn test_database_shares_one_copy_per_path() {
    let Some(path) = system_font_path() else {
        return;
    };
    let db = FontDatabase::new();

    let first = db.load_font(&path).expect("first load");
    let second = db.load_font(&path).expect("second load");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(db.font_count(), 1);

    db.clear();
    assert_eq!(db.font_count(), 0);
    assert!(first.units_per_em() > 0);
}
