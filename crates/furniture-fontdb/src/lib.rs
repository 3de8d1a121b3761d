//! Where fonts come from: loading and sharing for furniture
//!
//! Fonts store their raw bytes and create parsers on demand. Everything a
//! layout needs repeatedly (units per em, axes, cap height) is read once at
//! load time, so a `Font` is immutable and cheap to share behind an `Arc`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use read_fonts::{
    types::{GlyphId, GlyphId16},
    FontRef as ReadFontRef, TableProvider,
};
use skrifa::MetadataProvider;

use furniture_core::{
    error::{FontLoadError, Result},
    traits::FontRef as FurnitureFontRef,
    VariationAxis,
};

/// A font that's been brought into memory, ready to shape text
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    axes: Vec<VariationAxis>,
    cap_height: Option<f32>,
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self> {
        let data = fs::read(path.as_ref())
            .map_err(|_| FontLoadError::FileNotFound(path.as_ref().display().to_string()))?;

        Self::from_data_index(data, face_index)
    }

    /// Turns raw font bytes into something we can work with
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        let axes = font_ref
            .axes()
            .iter()
            .map(|axis| {
                VariationAxis::new(
                    axis.tag().to_string(),
                    axis.min_value(),
                    axis.default_value(),
                    axis.max_value(),
                )
            })
            .collect::<Vec<_>>();

        let cap_height = font_ref
            .os2()
            .ok()
            .and_then(|os2| os2.s_cap_height())
            .filter(|h| *h > 0)
            .map(f32::from);

        log::debug!(
            "Loaded font: upem={units_per_em}, {} axes, cap height {:?}",
            axes.len(),
            cap_height
        );

        Ok(Font {
            data,
            face_index,
            units_per_em,
            axes,
            cap_height,
        })
    }

    /// Returns the face index for TTC collections (0 for single fonts)
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Finds which glyph draws this character
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    /// Default-instance advance in font units
    pub fn advance_width(&self, glyph_id: u32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                let hmtx = font.hmtx().ok()?;
                hmtx.advance(GlyphId::new(glyph_id)).map(f32::from)
            })
            .unwrap_or(0.0)
    }

    pub fn glyph_count(&self) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.maxp().ok().map(|maxp| maxp.num_glyphs() as u32))
    }

    /// PostScript name from the `post` table
    pub fn glyph_name(&self, glyph_id: u32) -> Option<String> {
        let font = self.font_ref()?;
        let post = font.post().ok()?;
        let glyph_id = GlyphId16::new(u16::try_from(glyph_id).ok()?);
        post.glyph_name(glyph_id).map(str::to_string)
    }

    pub fn axes(&self) -> &[VariationAxis] {
        &self.axes
    }

    pub fn cap_height(&self) -> Option<f32> {
        self.cap_height
    }
}

impl FurnitureFontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        self.glyph_id(ch)
    }

    fn advance_width(&self, glyph_id: u32) -> f32 {
        self.advance_width(glyph_id)
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn glyph_count(&self) -> Option<u32> {
        self.glyph_count()
    }

    fn axes(&self) -> Vec<VariationAxis> {
        self.axes.clone()
    }

    fn cap_height(&self) -> Option<f32> {
        self.cap_height
    }

    fn glyph_name(&self, glyph_id: u32) -> Option<String> {
        self.glyph_name(glyph_id)
    }
}

/// Path-keyed font library, safe to share between threads
///
/// Each file is parsed once; every caller gets the same `Arc<Font>`.
pub struct FontDatabase {
    path_cache: RwLock<HashMap<PathBuf, Arc<Font>>>,
}

impl FontDatabase {
    pub fn new() -> Self {
        Self {
            path_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Loads a font file, or returns the copy loaded earlier from the same path
    pub fn load_font(&self, path: impl AsRef<Path>) -> Result<Arc<Font>> {
        let path = path.as_ref();
        let cache_key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(font) = self.path_cache.read().get(&cache_key) {
            return Ok(font.clone());
        }

        let font = Arc::new(Font::from_file(path)?);
        let mut cache = self.path_cache.write();
        // Another thread may have won the race; keep the first copy.
        let font = cache.entry(cache_key).or_insert(font).clone();
        Ok(font)
    }

    /// Drops every cached font; fonts still held elsewhere stay alive
    pub fn clear(&self) {
        self.path_cache.write().clear();
    }

    pub fn font_count(&self) -> usize {
        self.path_cache.read().len()
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}
