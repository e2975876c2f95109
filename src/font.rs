//! Fonts as the drawing surface sees them.
//!
//! A `Font` is either a TrueType face at a pixel size or the built-in
//! bitmap face. Loading never fails: a missing or unreadable file logs a
//! warning and yields the built-in face at the same size.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::builtin_font::BuiltinFont;
use crate::error::Result;
use crate::font_engine::FontEngine;
use crate::path::PathStorage;

enum Face {
    TrueType(FontEngine),
    Builtin(BuiltinFont),
}

/// A font face bound to a pixel size.
pub struct Font {
    face: Face,
    size: f64,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("size", &self.size)
            .field("builtin", &self.is_builtin())
            .finish()
    }
}

impl Font {
    /// Load `file` from `dir`, falling back to the built-in face.
    pub fn load(dir: &Path, file: &str, size: f64) -> Font {
        FontLoader::new(dir).load(file, size)
    }

    /// Strict variant of `load`.
    pub fn from_file(path: &Path, size: f64) -> Result<Font> {
        let mut engine = FontEngine::from_file(path)?;
        engine.set_height(size);
        Ok(Font {
            face: Face::TrueType(engine),
            size,
        })
    }

    pub fn builtin(size: f64) -> Font {
        Font {
            face: Face::Builtin(BuiltinFont::new(size)),
            size,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin(_))
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Distance from the text origin (top of the line box) to the baseline.
    pub fn ascender(&self) -> f64 {
        match &self.face {
            Face::TrueType(e) => e.ascender(),
            Face::Builtin(b) => b.ascender(),
        }
    }

    pub fn descender(&self) -> f64 {
        match &self.face {
            Face::TrueType(e) => e.descender(),
            Face::Builtin(b) => b.descender(),
        }
    }

    /// Width of `text` in whole pixels: the summed advances, not the ink
    /// extent, so side bearings and trailing spaces count.
    pub fn measure(&self, text: &str) -> i32 {
        self.layout(text, 0.0, |_, _| {}).round() as i32
    }

    /// Outline of `text` with the top of the line box at `(x, y)`.
    pub fn text_path(&self, text: &str, x: f64, y: f64) -> PathStorage {
        let mut path = PathStorage::new();
        let baseline = y + self.ascender();
        match &self.face {
            Face::TrueType(e) => {
                self.layout(text, x, |glyph, pen| {
                    if let Glyph::Outline(id) = glyph {
                        e.append_glyph(&mut path, id, pen, baseline);
                    }
                });
            }
            Face::Builtin(b) => {
                self.layout(text, x, |glyph, pen| {
                    if let Glyph::Bitmap(ch) = glyph {
                        b.append_glyph(&mut path, ch, pen, y);
                    }
                });
            }
        }
        path
    }

    /// Walk `text` calling `place` at each glyph's pen position. Returns the
    /// final pen x. Characters the face lacks advance by a space.
    fn layout(&self, text: &str, x: f64, mut place: impl FnMut(Glyph, f64)) -> f64 {
        let mut pen = x;
        match &self.face {
            Face::TrueType(e) => {
                let space = e
                    .glyph(' ')
                    .map(|(_, adv)| adv)
                    .unwrap_or(self.size * 0.25);
                let mut prev: Option<u16> = None;
                for ch in text.chars() {
                    match e.glyph(ch) {
                        Some((id, advance)) => {
                            if let Some(p) = prev {
                                pen += e.kerning(p, id);
                            }
                            place(Glyph::Outline(id), pen);
                            pen += advance;
                            prev = Some(id);
                        }
                        None => {
                            pen += space;
                            prev = None;
                        }
                    }
                }
            }
            Face::Builtin(b) => {
                for ch in text.chars() {
                    place(Glyph::Bitmap(ch), pen);
                    pen += b.advance();
                }
            }
        }
        pen - x
    }
}

#[derive(Clone, Copy)]
enum Glyph {
    Outline(u16),
    Bitmap(char),
}

// ============================================================================
// FontLoader
// ============================================================================

/// Loads fonts from one directory, reading each file at most once.
pub struct FontLoader {
    dir: PathBuf,
    cache: HashMap<String, Option<Vec<u8>>>,
}

impl FontLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: HashMap::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `file` at `size`, or the built-in face if it cannot be used. The
    /// warning is logged once per file.
    pub fn load(&mut self, file: &str, size: f64) -> Font {
        let dir = &self.dir;
        let bytes = self.cache.entry(file.to_string()).or_insert_with(|| {
            let path = dir.join(file);
            match std::fs::read(&path) {
                Ok(data) => match FontEngine::from_data(data.clone(), 0) {
                    Ok(_) => {
                        debug!("Loaded font {}", path.display());
                        Some(data)
                    }
                    Err(reason) => {
                        warn!("Failed to parse font {}: {}; using built-in face", path.display(), reason);
                        None
                    }
                },
                Err(e) => {
                    warn!("Failed to read font {}: {}; using built-in face", path.display(), e);
                    None
                }
            }
        });

        match bytes.as_ref().map(|data| FontEngine::from_data(data.clone(), 0)) {
            Some(Ok(mut engine)) => {
                engine.set_height(size);
                Font {
                    face: Face::TrueType(engine),
                    size,
                }
            }
            _ => Font::builtin(size),
        }
    }
}
