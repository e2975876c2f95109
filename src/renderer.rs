//! Clipping renderer and the scanline driver.
//!
//! `RendererBase` clips spans to a rectangle before handing them to a
//! `PixelFormat`; `render_scanlines_aa_solid` pulls rows out of the
//! rasterizer and blends them in one color.

use crate::basics::{CoverType, RectI};
use crate::canvas::PixelFormat;
use crate::color::Rgba8;
use crate::rasterizer::Rasterizer;
use crate::scanline::ScanlineU8;

// ============================================================================
// RendererBase
// ============================================================================

/// Clip-and-delegate wrapper around a pixel format.
pub struct RendererBase<'a, PF: PixelFormat> {
    ren: &'a mut PF,
    clip_box: RectI,
}

impl<'a, PF: PixelFormat> RendererBase<'a, PF> {
    /// Clip box starts as the full buffer.
    pub fn new(ren: &'a mut PF) -> Self {
        let clip_box = RectI::new(0, 0, ren.width() as i32 - 1, ren.height() as i32 - 1);
        Self { ren, clip_box }
    }

    #[inline]
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        x >= self.clip_box.x1
            && y >= self.clip_box.y1
            && x <= self.clip_box.x2
            && y <= self.clip_box.y2
    }

    pub fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8, cover: CoverType) {
        if self.inbox(x, y) {
            self.ren.blend_pixel(x, y, c, cover);
        }
    }

    pub fn blend_hline(&mut self, x1: i32, y: i32, x2: i32, c: &Rgba8, cover: CoverType) {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        if y < self.clip_box.y1 || y > self.clip_box.y2 {
            return;
        }
        let x1 = x1.max(self.clip_box.x1);
        let x2 = x2.min(self.clip_box.x2);
        if x1 > x2 {
            return;
        }
        self.ren.blend_hline(x1, y, (x2 - x1 + 1) as u32, c, cover);
    }

    /// Blend a span with per-pixel coverage, trimming `covers` to the clip.
    pub fn blend_solid_hspan(&mut self, x: i32, y: i32, len: i32, c: &Rgba8, covers: &[CoverType]) {
        if y < self.clip_box.y1 || y > self.clip_box.y2 {
            return;
        }
        let mut x = x;
        let mut len = len;
        let mut skip = 0usize;
        if x < self.clip_box.x1 {
            let d = self.clip_box.x1 - x;
            len -= d;
            if len <= 0 {
                return;
            }
            skip = d as usize;
            x = self.clip_box.x1;
        }
        if x + len > self.clip_box.x2 + 1 {
            len = self.clip_box.x2 - x + 1;
            if len <= 0 {
                return;
            }
        }
        self.ren
            .blend_solid_hspan(x, y, len as u32, c, &covers[skip..skip + len as usize]);
    }
}

// ============================================================================
// Scanline driver
// ============================================================================

/// Render everything accumulated in `ras` in a single color. Returns the
/// bounding box of the rows and spans that were emitted (before clipping),
/// or `None` if the shape was empty.
pub fn render_scanlines_aa_solid<PF: PixelFormat>(
    ras: &mut Rasterizer,
    sl: &mut ScanlineU8,
    ren: &mut RendererBase<'_, PF>,
    color: &Rgba8,
) -> Option<RectI> {
    if !ras.rewind_scanlines() {
        return None;
    }
    let touched = RectI::new(ras.min_x(), ras.min_y(), ras.max_x(), ras.max_y());

    sl.reset(ras.min_x(), ras.max_x());
    while ras.sweep_scanline(sl) {
        let y = sl.y();
        for span in sl.spans() {
            ren.blend_solid_hspan(span.x, y, span.len, color, sl.span_covers(span));
        }
    }
    Some(touched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::color::Rgb8;

    #[test]
    fn test_hspan_clipped_left_and_right() {
        let mut canvas = Canvas::transparent(4, 1);
        let mut ren = RendererBase::new(&mut canvas);
        let white = Rgba8::new(255, 255, 255, 255);
        ren.blend_solid_hspan(-2, 0, 8, &white, &[10, 20, 30, 40, 50, 60, 70, 80]);
        assert_eq!(canvas.pixel(0, 0).a, 30);
        assert_eq!(canvas.pixel(3, 0).a, 60);
    }

    #[test]
    fn test_out_of_bounds_rows_ignored() {
        let mut canvas = Canvas::new(2, 2, Rgb8::new(1, 2, 3));
        let before = canvas.clone();
        let mut ren = RendererBase::new(&mut canvas);
        let red = Rgba8::new(255, 0, 0, 255);
        ren.blend_hline(-5, -1, 5, &red, 255);
        ren.blend_hline(-5, 2, 5, &red, 255);
        ren.blend_pixel(2, 0, &red, 255);
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_render_square_reports_bounds() {
        let mut canvas = Canvas::transparent(10, 10);
        let mut ras = Rasterizer::new();
        let mut sl = ScanlineU8::new();
        ras.move_to_d(2.0, 2.0);
        ras.line_to_d(5.0, 2.0);
        ras.line_to_d(5.0, 6.0);
        ras.line_to_d(2.0, 6.0);
        let mut ren = RendererBase::new(&mut canvas);
        let touched = render_scanlines_aa_solid(&mut ras, &mut sl, &mut ren, &Rgba8::new(9, 9, 9, 255));
        assert_eq!(touched, Some(RectI::new(2, 2, 5, 6)));
        assert_eq!(canvas.pixel(2, 2).a, 255);
        assert_eq!(canvas.pixel(4, 5).a, 255);
        assert_eq!(canvas.pixel(5, 5).a, 0);
    }
}
