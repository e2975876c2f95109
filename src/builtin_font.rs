//! Built-in 5×7 bitmap face.
//!
//! Used whenever a font file cannot be loaded, so a render never fails on
//! missing fonts. Each glyph is five column bytes, bit 0 at the top row,
//! covering printable ASCII. Glyphs are drawn as filled squares scaled to
//! the requested pixel size; anything outside ASCII advances without ink.

use crate::path::PathStorage;

const FIRST_CHAR: u32 = 0x20;
const LAST_CHAR: u32 = 0x7E;
const GLYPH_COLUMNS: usize = 5;
const GLYPH_ROWS: u32 = 7;
/// Columns per advance, including the one-column gap.
const ADVANCE_COLUMNS: f64 = 6.0;
/// Rows per em: seven glyph rows plus one for descent.
const EM_ROWS: f64 = 8.0;

#[rustfmt::skip]
const GLYPHS: [[u8; GLYPH_COLUMNS]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x14, 0x08, 0x3E, 0x08, 0x14], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x10, 0x08, 0x08, 0x10, 0x08], // ~
];

/// The bitmap face at a pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinFont {
    /// Side of one glyph dot in pixels.
    dot: f64,
}

impl BuiltinFont {
    pub fn new(size: f64) -> Self {
        Self {
            dot: (size / EM_ROWS).max(1.0),
        }
    }

    pub fn ascender(&self) -> f64 {
        GLYPH_ROWS as f64 * self.dot
    }

    pub fn descender(&self) -> f64 {
        -self.dot
    }

    pub fn advance(&self) -> f64 {
        ADVANCE_COLUMNS * self.dot
    }

    pub fn has_glyph(ch: char) -> bool {
        (FIRST_CHAR..=LAST_CHAR).contains(&(ch as u32))
    }

    fn columns(ch: char) -> Option<&'static [u8; GLYPH_COLUMNS]> {
        let code = ch as u32;
        if Self::has_glyph(ch) {
            GLYPHS.get((code - FIRST_CHAR) as usize)
        } else {
            None
        }
    }

    /// Append the dots of `ch` with the glyph cell's top-left at `(x, top)`.
    /// Vertical runs of dots become one rectangle each.
    pub fn append_glyph(&self, path: &mut PathStorage, ch: char, x: f64, top: f64) {
        let Some(columns) = Self::columns(ch) else {
            return;
        };
        let d = self.dot;
        for (col, &bits) in columns.iter().enumerate() {
            let x1 = x + col as f64 * d;
            let mut row = 0;
            while row < GLYPH_ROWS {
                if bits & (1 << row) == 0 {
                    row += 1;
                    continue;
                }
                let start = row;
                while row < GLYPH_ROWS && bits & (1 << row) != 0 {
                    row += 1;
                }
                let y1 = top + start as f64 * d;
                let y2 = top + row as f64 * d;
                path.add_polygon(&[(x1, y1), (x1 + d, y1), (x1 + d, y2), (x1, y2)]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_printable_ascii() {
        assert_eq!(GLYPHS.len(), (LAST_CHAR - FIRST_CHAR + 1) as usize);
        assert!(BuiltinFont::has_glyph('A'));
        assert!(BuiltinFont::has_glyph('~'));
        assert!(!BuiltinFont::has_glyph('\u{2713}'));
    }

    #[test]
    fn test_metrics_scale_with_size() {
        let f = BuiltinFont::new(16.0);
        assert_eq!(f.ascender(), 14.0);
        assert_eq!(f.advance(), 12.0);
        assert_eq!(f.descender(), -2.0);
        // Tiny sizes never collapse below one pixel per dot.
        assert_eq!(BuiltinFont::new(2.0).advance(), 6.0);
    }

    #[test]
    fn test_space_and_unknown_have_no_ink() {
        let f = BuiltinFont::new(8.0);
        let mut p = PathStorage::new();
        f.append_glyph(&mut p, ' ', 0.0, 0.0);
        f.append_glyph(&mut p, '\u{25B2}', 0.0, 0.0);
        assert!(p.is_empty());
    }

    #[test]
    fn test_glyph_within_cell() {
        let f = BuiltinFont::new(8.0);
        let mut p = PathStorage::new();
        f.append_glyph(&mut p, 'H', 10.0, 20.0);
        assert_eq!(p.bounding_rect(), Some((10.0, 20.0, 15.0, 27.0)));
    }

    #[test]
    fn test_vertical_runs_merge() {
        // '|' is a single full-height column: one rectangle.
        let f = BuiltinFont::new(8.0);
        let mut p = PathStorage::new();
        f.append_glyph(&mut p, '|', 0.0, 0.0);
        assert_eq!(p.total_vertices(), 5);
    }
}
