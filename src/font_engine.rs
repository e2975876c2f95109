//! TrueType outlines via `ttf-parser`.
//!
//! Glyph outlines are scaled to a pixel height, flipped to y-down, and
//! appended to a `PathStorage` at a pen position, with quadratic and cubic
//! segments flattened on the way in.

use std::path::Path;

use crate::error::{Error, Result};
use crate::path::PathStorage;

/// A parsed font face at a given pixel size.
pub struct FontEngine {
    face_data: Vec<u8>,
    face_index: u32,
    /// Em height in pixels.
    height: f64,
}

impl FontEngine {
    /// Validate and take ownership of TTF/OTF bytes.
    pub fn from_data(data: Vec<u8>, face_index: u32) -> std::result::Result<Self, String> {
        ttf_parser::Face::parse(&data, face_index).map_err(|e| e.to_string())?;
        Ok(Self {
            face_data: data,
            face_index,
            height: 12.0,
        })
    }

    /// Read and validate a font file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let font_error = |reason: String| Error::Font {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
        Self::from_data(data, 0).map_err(font_error)
    }

    pub fn set_height(&mut self, h: f64) {
        self.height = h;
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Distance from the top of the line box to the baseline, in pixels.
    pub fn ascender(&self) -> f64 {
        self.with_face(|face, scale| face.ascender() as f64 * scale)
            .unwrap_or(self.height)
    }

    /// Distance from the baseline to the bottom of the line box (negative).
    pub fn descender(&self) -> f64 {
        self.with_face(|face, scale| face.descender() as f64 * scale)
            .unwrap_or(0.0)
    }

    /// Glyph id and horizontal advance for `ch`, or `None` if the face has
    /// no mapping for it.
    pub fn glyph(&self, ch: char) -> Option<(u16, f64)> {
        self.with_face(|face, scale| {
            let id = face.glyph_index(ch)?;
            let advance = face
                .glyph_hor_advance(id)
                .map(|a| a as f64 * scale)
                .unwrap_or(0.0);
            Some((id.0, advance))
        })
        .flatten()
    }

    /// Horizontal kerning between two glyphs from the `kern` table.
    pub fn kerning(&self, first: u16, second: u16) -> f64 {
        self.with_face(|face, scale| {
            let kern = face.tables().kern?;
            let (first, second) = (ttf_parser::GlyphId(first), ttf_parser::GlyphId(second));
            kern.subtables
                .into_iter()
                .filter(|s| s.horizontal && !s.has_cross_stream)
                .find_map(|s| s.glyphs_kerning(first, second))
                .map(|v| v as f64 * scale)
        })
        .flatten()
        .unwrap_or(0.0)
    }

    /// Append the outline of glyph `id` with its origin at `(x, baseline)`.
    /// Returns `false` for glyphs without an outline (spaces).
    pub fn append_glyph(&self, path: &mut PathStorage, id: u16, x: f64, baseline: f64) -> bool {
        self.with_face(|face, scale| {
            let mut collector = OutlineCollector {
                path,
                scale,
                x,
                baseline,
            };
            face.outline_glyph(ttf_parser::GlyphId(id), &mut collector)
                .is_some()
        })
        .unwrap_or(false)
    }

    /// Parse the stored bytes (validated in `from_data`) and run `f` with
    /// the face and its pixels-per-unit scale.
    fn with_face<T>(&self, f: impl FnOnce(&ttf_parser::Face<'_>, f64) -> T) -> Option<T> {
        let face = ttf_parser::Face::parse(&self.face_data, self.face_index).ok()?;
        let scale = self.height / face.units_per_em() as f64;
        Some(f(&face, scale))
    }
}

// ============================================================================
// OutlineCollector
// ============================================================================

/// Streams glyph outline commands into a path in screen space.
struct OutlineCollector<'a> {
    path: &'a mut PathStorage,
    scale: f64,
    x: f64,
    baseline: f64,
}

impl OutlineCollector<'_> {
    #[inline]
    fn sx(&self, v: f32) -> f64 {
        self.x + v as f64 * self.scale
    }

    #[inline]
    fn sy(&self, v: f32) -> f64 {
        self.baseline - v as f64 * self.scale
    }
}

impl ttf_parser::OutlineBuilder for OutlineCollector<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.sx(x), self.sy(y));
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = (self.sx(x), self.sy(y));
        self.path.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (cx, cy) = (self.sx(x1), self.sy(y1));
        let (x, y) = (self.sx(x), self.sy(y));
        self.path.curve3(cx, cy, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1x, c1y) = (self.sx(x1), self.sy(y1));
        let (c2x, c2y) = (self.sx(x2), self.sy(y2));
        let (x, y) = (self.sx(x), self.sy(y));
        self.path.curve4(c1x, c1y, c2x, c2y, x, y);
    }

    fn close(&mut self) {
        self.path.close_polygon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttf_parser::OutlineBuilder;

    #[test]
    fn test_invalid_data_rejected() {
        assert!(FontEngine::from_data(vec![0, 1, 2, 3], 0).is_err());
        assert!(FontEngine::from_data(Vec::new(), 0).is_err());
    }

    #[test]
    fn test_missing_file_is_font_error() {
        let err = FontEngine::from_file(Path::new("/nonexistent/Font.ttf"));
        assert!(matches!(err, Err(Error::Font { .. })));
    }

    #[test]
    fn test_collector_flips_and_offsets() {
        let mut path = PathStorage::new();
        let mut c = OutlineCollector {
            path: &mut path,
            scale: 0.5,
            x: 100.0,
            baseline: 50.0,
        };
        c.move_to(0.0, 0.0);
        c.line_to(20.0, 40.0);
        c.close();
        assert_eq!(path.bounding_rect(), Some((100.0, 30.0, 110.0, 50.0)));
        assert_eq!(path.total_vertices(), 3);
    }

    #[test]
    fn test_collector_flattens_curves() {
        let mut path = PathStorage::new();
        let mut c = OutlineCollector {
            path: &mut path,
            scale: 1.0,
            x: 0.0,
            baseline: 0.0,
        };
        c.move_to(0.0, 0.0);
        c.quad_to(10.0, 10.0, 20.0, 0.0);
        c.curve_to(25.0, -5.0, 30.0, -5.0, 35.0, 0.0);
        c.close();
        assert!(path.total_vertices() > 8);
        assert_eq!(path.last_vertex(), Some((35.0, 0.0)));
    }
}
