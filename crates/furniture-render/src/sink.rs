//! Where finished glyphs go
//!
//! The caller picks the destination up front: one combined path for
//! drawing, or per-glyph records for a font-export collaborator that wants
//! to insert glyphs rather than paint them.

use kurbo::{Affine, BezPath};

use furniture_core::types::{GlyphId, GlyphOutline};

/// One placed glyph, as handed to a glyph-collecting sink
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub glyph_id: GlyphId,
    /// PostScript name, when the font has one
    pub name: Option<String>,
    /// Design-space outline, untransformed
    pub outline: GlyphOutline,
    /// Advance in output units
    pub advance: f64,
    /// Design space to output space
    pub transform: Affine,
}

impl GlyphRecord {
    /// The outline with its placement applied
    pub fn placed_path(&self) -> BezPath {
        self.outline.to_bez_path(self.transform)
    }
}

/// Destination for emitted glyphs
#[derive(Debug, Clone)]
pub enum OutputSink {
    /// Everything flattened into one path in output space
    Path(BezPath),
    /// One record per glyph
    Glyphs(Vec<GlyphRecord>),
}

impl OutputSink {
    pub fn path() -> Self {
        OutputSink::Path(BezPath::new())
    }

    pub fn glyphs() -> Self {
        OutputSink::Glyphs(Vec::new())
    }

    pub fn emit(&mut self, record: GlyphRecord) {
        match self {
            OutputSink::Path(path) => {
                for el in record.placed_path().elements() {
                    path.push(*el);
                }
            },
            OutputSink::Glyphs(records) => records.push(record),
        }
    }

    /// Combined path, whichever variant collected it
    pub fn into_path(self) -> BezPath {
        match self {
            OutputSink::Path(path) => path,
            OutputSink::Glyphs(records) => {
                let mut path = BezPath::new();
                for record in &records {
                    for el in record.placed_path().elements() {
                        path.push(*el);
                    }
                }
                path
            },
        }
    }

    pub fn into_glyphs(self) -> Option<Vec<GlyphRecord>> {
        match self {
            OutputSink::Glyphs(records) => Some(records),
            OutputSink::Path(_) => None,
        }
    }
}
