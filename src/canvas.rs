//! The image under construction.
//!
//! `Canvas` owns a premultiplied RGBA8 buffer. Every blend in the crate is
//! source-over in premultiplied space: `dst = src + dst * (1 - src_a)`, which
//! makes compositing an overlay onto the base the same per-channel
//! operation as filling a shape.

use crate::basics::{CoverType, RectI};
use crate::color::{Rgb8, Rgba8};

const BPP: usize = 4;

// ============================================================================
// PixelFormat trait
// ============================================================================

/// Pixel-level access used by the scanline renderer. Coordinates are
/// assumed to be inside the buffer; clipping happens one layer up in
/// `RendererBase`.
pub trait PixelFormat {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Blend straight-alpha color `c` at (x, y) with coverage `cover`.
    fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8, cover: CoverType);

    /// Blend `len` pixels with uniform coverage.
    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, cover: CoverType);

    /// Blend `len` pixels with per-pixel coverage.
    fn blend_solid_hspan(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, covers: &[CoverType]);

    /// Stored (premultiplied) value at (x, y).
    fn pixel(&self, x: i32, y: i32) -> Rgba8;
}

// ============================================================================
// Canvas
// ============================================================================

/// Fixed-size premultiplied RGBA8 buffer, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Opaque canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb8) -> Self {
        let px = [background.r, background.g, background.b, 255];
        let data = px
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * BPP)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Fully transparent canvas, used as an effect overlay.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BPP],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Inclusive pixel bounds.
    pub fn bounds(&self) -> RectI {
        RectI::new(0, 0, self.width as i32 - 1, self.height as i32 - 1)
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        (y as usize * self.width as usize + x as usize) * BPP
    }

    /// Mutable bytes of `len` pixels starting at (x, y).
    #[inline]
    fn span_mut(&mut self, x: i32, y: i32, len: usize) -> &mut [u8] {
        let off = self.offset(x, y);
        &mut self.data[off..off + len * BPP]
    }

    /// Source-over of a premultiplied source pixel.
    #[inline]
    fn blend_pix(p: &mut [u8], src: Rgba8) {
        if src.a == 255 {
            p[0] = src.r;
            p[1] = src.g;
            p[2] = src.b;
            p[3] = 255;
        } else if src.a > 0 {
            p[0] = Rgba8::prelerp(p[0], src.r, src.a);
            p[1] = Rgba8::prelerp(p[1], src.g, src.a);
            p[2] = Rgba8::prelerp(p[2], src.b, src.a);
            p[3] = Rgba8::prelerp(p[3], src.a, src.a);
        }
    }

    /// Composite `overlay` over this canvas inside `region`.
    ///
    /// Both buffers are premultiplied, so this is the plain "over" operator;
    /// pixels the overlay never touched are left alone.
    pub fn composite_over(&mut self, overlay: &Canvas, region: RectI) {
        let mut r = region;
        if !r.clip(&self.bounds()) || !r.clip(&overlay.bounds()) {
            return;
        }
        let len = r.width() as usize;
        for y in r.y1..=r.y2 {
            let src_off = overlay.offset(r.x1, y);
            let src = &overlay.data[src_off..src_off + len * BPP];
            let dst = self.span_mut(r.x1, y, len);
            for (d, s) in dst.chunks_exact_mut(BPP).zip(src.chunks_exact(BPP)) {
                Self::blend_pix(d, Rgba8::new(s[0], s[1], s[2], s[3]));
            }
        }
    }
}

impl PixelFormat for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8, cover: CoverType) {
        let src = c.premultiplied(cover);
        Self::blend_pix(self.span_mut(x, y, 1), src);
    }

    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, cover: CoverType) {
        let src = c.premultiplied(cover);
        if src.a == 0 {
            return;
        }
        for p in self.span_mut(x, y, len as usize).chunks_exact_mut(BPP) {
            Self::blend_pix(p, src);
        }
    }

    fn blend_solid_hspan(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, covers: &[CoverType]) {
        let row = self.span_mut(x, y, len as usize);
        for (p, &cover) in row.chunks_exact_mut(BPP).zip(covers) {
            Self::blend_pix(p, c.premultiplied(cover));
        }
    }

    fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        let off = self.offset(x, y);
        let p = &self.data[off..off + BPP];
        Rgba8::new(p[0], p[1], p[2], p[3])
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_opaque_background() {
        let c = Canvas::new(3, 2, Rgb8::new(13, 17, 23));
        assert_eq!(c.data().len(), 3 * 2 * 4);
        assert_eq!(c.pixel(2, 1), Rgba8::new(13, 17, 23, 255));
        assert!(c.data().chunks(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_transparent_is_zero() {
        let c = Canvas::transparent(4, 4);
        assert!(c.data().iter().all(|&b| b == 0));
        assert_eq!(c.bounds(), RectI::new(0, 0, 3, 3));
    }

    #[test]
    fn test_blend_opaque_replaces() {
        let mut c = Canvas::new(2, 2, Rgb8::new(0, 0, 0));
        c.blend_pixel(1, 0, &Rgba8::new(200, 100, 50, 255), 255);
        assert_eq!(c.pixel(1, 0), Rgba8::new(200, 100, 50, 255));
        assert_eq!(c.pixel(0, 0), Rgba8::new(0, 0, 0, 255));
    }

    #[test]
    fn test_blend_half_alpha_over_black() {
        let mut c = Canvas::new(1, 1, Rgb8::new(0, 0, 0));
        c.blend_pixel(0, 0, &Rgba8::new(255, 255, 255, 128), 255);
        let p = c.pixel(0, 0);
        assert_eq!(p.a, 255);
        assert_eq!(p.r, 128);
    }

    #[test]
    fn test_blend_on_transparent_stays_premultiplied() {
        let mut c = Canvas::transparent(1, 1);
        c.blend_hline(0, 0, 1, &Rgba8::new(255, 0, 0, 100), 255);
        assert_eq!(c.pixel(0, 0), Rgba8::new(100, 0, 0, 100));
    }

    #[test]
    fn test_solid_hspan_uses_per_pixel_cover() {
        let mut c = Canvas::transparent(3, 1);
        c.blend_solid_hspan(0, 0, 3, &Rgba8::new(255, 255, 255, 255), &[255, 0, 128]);
        assert_eq!(c.pixel(0, 0).a, 255);
        assert_eq!(c.pixel(1, 0).a, 0);
        assert_eq!(c.pixel(2, 0).a, 128);
    }

    #[test]
    fn test_composite_over_region_only() {
        let mut base = Canvas::new(4, 1, Rgb8::new(10, 10, 10));
        let mut overlay = Canvas::transparent(4, 1);
        overlay.blend_hline(0, 0, 4, &Rgba8::new(0, 0, 0, 255), 255);
        base.composite_over(&overlay, RectI::new(1, 0, 2, 0));
        assert_eq!(base.pixel(0, 0).r, 10);
        assert_eq!(base.pixel(1, 0).r, 0);
        assert_eq!(base.pixel(2, 0).r, 0);
        assert_eq!(base.pixel(3, 0).r, 10);
    }

    #[test]
    fn test_composite_over_transparent_is_identity() {
        let mut base = Canvas::new(5, 5, Rgb8::new(40, 46, 56));
        let before = base.clone();
        let overlay = Canvas::transparent(5, 5);
        base.composite_over(&overlay, RectI::new(-10, -10, 100, 100));
        assert_eq!(base, before);
    }
}
