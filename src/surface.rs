//! Drawing surface bound to a canvas.
//!
//! Every primitive builds a vertex source, rasterizes it with 8-bit
//! anti-aliasing and blends it "over" the canvas. Rectangles and ellipses
//! fill the continuous area of their `LayoutRect`. Polygon and line points
//! name pixels, so they are shifted by half a pixel onto pixel centres.
//!
//! The surface remembers the bounding box of everything it has drawn
//! (`dirty`), which lets effect overlays blur and composite only the area
//! that holds ink.

use crate::basics::{FillingRule, RectI, VertexSource, COVER_FULL};
use crate::canvas::{Canvas, PixelFormat};
use crate::color::Rgba8;
use crate::font::Font;
use crate::layout::LayoutRect;
use crate::path::PathStorage;
use crate::rasterizer::Rasterizer;
use crate::renderer::{render_scanlines_aa_solid, RendererBase};
use crate::scanline::ScanlineU8;
use crate::shapes::{append_source, rounded_rect, stroke_polyline, Ellipse, Polygon};

const PIXEL_CENTER: f64 = 0.5;

pub struct Surface<'a> {
    canvas: &'a mut Canvas,
    ras: Rasterizer,
    sl: ScanlineU8,
    dirty: Option<RectI>,
}

impl<'a> Surface<'a> {
    pub fn new(canvas: &'a mut Canvas) -> Self {
        Self {
            canvas,
            ras: Rasterizer::new(),
            sl: ScanlineU8::new(),
            dirty: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Bounds of everything drawn so far, clipped to the canvas.
    pub fn dirty(&self) -> Option<RectI> {
        self.dirty
    }

    /// Merge `touched`, clipped to the canvas, into the dirty rectangle.
    /// Returns the clipped rectangle, or `None` if nothing landed on the
    /// canvas.
    fn mark(&mut self, touched: Option<RectI>) -> Option<RectI> {
        let mut t = touched?;
        if !t.clip(&self.canvas.bounds()) {
            return None;
        }
        self.dirty = Some(match self.dirty {
            Some(d) => d.unite(&t),
            None => t,
        });
        Some(t)
    }

    /// Rasterize `vs` and blend it in `color`.
    fn fill_source(&mut self, vs: &mut dyn VertexSource, rule: FillingRule, color: Rgba8) -> Option<RectI> {
        if color.is_transparent() {
            return None;
        }
        self.ras.reset();
        self.ras.filling_rule(rule);
        self.ras.add_path(vs, 0);
        let mut ren = RendererBase::new(&mut *self.canvas);
        let touched = render_scanlines_aa_solid(&mut self.ras, &mut self.sl, &mut ren, &color);
        self.mark(touched)
    }

    // ------------------------------------------------------------------------
    // Rectangles
    // ------------------------------------------------------------------------

    pub fn fill_rect(&mut self, rect: LayoutRect, color: impl Into<Rgba8>) -> Option<RectI> {
        if rect.is_empty() {
            return None;
        }
        let (x1, y1) = (rect.x as f64, rect.y as f64);
        let (x2, y2) = (rect.right() as f64, rect.bottom() as f64);
        let mut poly = Polygon::new(vec![(x1, y1), (x2, y1), (x2, y2), (x1, y2)]);
        self.fill_source(&mut poly, FillingRule::NonZero, color.into())
    }

    pub fn fill_rounded_rect(&mut self, rect: LayoutRect, radius: f64, color: impl Into<Rgba8>) -> Option<RectI> {
        if rect.is_empty() {
            return None;
        }
        let mut poly = rounded_rect_poly(rect, radius);
        self.fill_source(&mut poly, FillingRule::NonZero, color.into())
    }

    /// Outline of width `width` drawn inside the rectangle's bounds.
    pub fn stroke_rounded_rect(
        &mut self,
        rect: LayoutRect,
        radius: f64,
        color: impl Into<Rgba8>,
        width: f64,
    ) -> Option<RectI> {
        if rect.is_empty() || width <= 0.0 {
            return None;
        }
        let mut path = PathStorage::new();
        append_source(&mut path, &mut rounded_rect_poly(rect, radius));

        let (x1, y1) = (rect.x as f64 + width, rect.y as f64 + width);
        let (x2, y2) = (rect.right() as f64 - width, rect.bottom() as f64 - width);
        if x2 > x1 && y2 > y1 {
            let mut inner = rounded_rect(x1, y1, x2, y2, (radius - width).max(0.0));
            append_source(&mut path, &mut inner);
        }
        self.fill_source(&mut path, FillingRule::EvenOdd, color.into())
    }

    /// Fill then outline, the way a boxed widget is usually drawn.
    pub fn rounded_rect(
        &mut self,
        rect: LayoutRect,
        radius: f64,
        fill: Option<Rgba8>,
        outline: Option<(Rgba8, f64)>,
    ) -> Option<RectI> {
        let mut touched = None;
        if let Some(fill) = fill {
            touched = self.fill_rounded_rect(rect, radius, fill);
        }
        if let Some((color, width)) = outline {
            let t = self.stroke_rounded_rect(rect, radius, color, width);
            touched = match (touched, t) {
                (Some(a), Some(b)) => Some(a.unite(&b)),
                (a, b) => a.or(b),
            };
        }
        touched
    }

    // ------------------------------------------------------------------------
    // Curves and polygons
    // ------------------------------------------------------------------------

    /// Ellipse inscribed in `rect`.
    pub fn fill_ellipse(&mut self, rect: LayoutRect, color: impl Into<Rgba8>) -> Option<RectI> {
        if rect.is_empty() {
            return None;
        }
        let rx = rect.w as f64 / 2.0;
        let ry = rect.h as f64 / 2.0;
        let mut e = Ellipse::new(rect.x as f64 + rx, rect.y as f64 + ry, rx, ry);
        self.fill_source(&mut e, FillingRule::NonZero, color.into())
    }

    /// Closed polygon through the centres of the given pixels.
    pub fn fill_polygon(&mut self, points: &[(i32, i32)], color: impl Into<Rgba8>) -> Option<RectI> {
        if points.len() < 3 {
            return None;
        }
        let mut poly = Polygon::new(points.iter().map(|&p| pixel_center(p)).collect());
        self.fill_source(&mut poly, FillingRule::NonZero, color.into())
    }

    /// Polyline of `width` through the centres of the given pixels. Ends
    /// are butt-capped, joints are round.
    pub fn line(&mut self, points: &[(i32, i32)], width: f64, color: impl Into<Rgba8>) -> Option<RectI> {
        let pts: Vec<(f64, f64)> = points.iter().map(|&p| pixel_center(p)).collect();
        let mut path = stroke_polyline(&pts, width.max(1.0));
        if path.is_empty() {
            return None;
        }
        self.fill_source(&mut path, FillingRule::NonZero, color.into())
    }

    // ------------------------------------------------------------------------
    // Text and pixels
    // ------------------------------------------------------------------------

    /// Draw `text` with the top of its line box at `(x, y)`. Returns the
    /// advance width in pixels.
    pub fn text(&mut self, font: &Font, x: i32, y: i32, text: &str, color: impl Into<Rgba8>) -> i32 {
        let mut path = font.text_path(text, x as f64, y as f64);
        if !path.is_empty() {
            self.fill_source(&mut path, FillingRule::NonZero, color.into());
        }
        font.measure(text)
    }

    /// Blend one pixel; out-of-bounds points are ignored.
    pub fn point(&mut self, x: i32, y: i32, color: impl Into<Rgba8>) {
        let color = color.into();
        if color.is_transparent() {
            return;
        }
        let mut ren = RendererBase::new(&mut *self.canvas);
        if ren.inbox(x, y) {
            ren.blend_pixel(x, y, &color, COVER_FULL);
            self.mark(Some(RectI::new(x, y, x, y)));
        }
    }

    /// Current value of a pixel (premultiplied).
    pub fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        self.canvas.pixel(x, y)
    }
}

fn pixel_center((x, y): (i32, i32)) -> (f64, f64) {
    (x as f64 + PIXEL_CENTER, y as f64 + PIXEL_CENTER)
}

fn rounded_rect_poly(rect: LayoutRect, radius: f64) -> Polygon {
    rounded_rect(
        rect.x as f64,
        rect.y as f64,
        rect.right() as f64,
        rect.bottom() as f64,
        radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb8;

    const BG: Rgb8 = Rgb8::new(13, 17, 23);
    const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    #[test]
    fn test_fill_rect_exact_pixels() {
        let mut canvas = Canvas::new(10, 10, BG);
        let mut s = Surface::new(&mut canvas);
        let touched = s.fill_rect(LayoutRect::new(2, 3, 4, 2), WHITE);
        assert!(touched.is_some());
        assert_eq!(s.dirty(), Some(RectI::new(2, 3, 6, 5)));
        assert_eq!(canvas.pixel(2, 3), Rgba8::new(255, 255, 255, 255));
        assert_eq!(canvas.pixel(5, 4), Rgba8::new(255, 255, 255, 255));
        assert_eq!(canvas.pixel(6, 4), BG.opaque());
        assert_eq!(canvas.pixel(2, 5), BG.opaque());
    }

    #[test]
    fn test_transparent_color_draws_nothing() {
        let mut canvas = Canvas::new(8, 8, BG);
        let before = canvas.clone();
        let mut s = Surface::new(&mut canvas);
        assert!(s.fill_rect(LayoutRect::new(0, 0, 8, 8), Rgba8::TRANSPARENT).is_none());
        assert!(s.dirty().is_none());
        assert_eq!(canvas, before);
    }

    #[test]
    fn test_rounded_rect_corners_are_soft() {
        let mut canvas = Canvas::transparent(40, 40);
        let mut s = Surface::new(&mut canvas);
        s.fill_rounded_rect(LayoutRect::new(0, 0, 40, 40), 12.0, WHITE);
        assert_eq!(canvas.pixel(0, 0).a, 0);
        assert_eq!(canvas.pixel(20, 20).a, 255);
        assert_eq!(canvas.pixel(20, 0).a, 255);
        let edge = canvas.pixel(3, 3).a;
        assert!(edge < 255);
    }

    #[test]
    fn test_stroke_stays_inside_bounds() {
        let mut canvas = Canvas::transparent(30, 30);
        let mut s = Surface::new(&mut canvas);
        s.stroke_rounded_rect(LayoutRect::new(5, 5, 20, 20), 0.0, WHITE, 2.0);
        assert_eq!(canvas.pixel(4, 10).a, 0);
        assert_eq!(canvas.pixel(5, 10).a, 255);
        assert_eq!(canvas.pixel(6, 10).a, 255);
        assert_eq!(canvas.pixel(7, 10).a, 0);
        assert_eq!(canvas.pixel(15, 15).a, 0);
        assert_eq!(canvas.pixel(24, 10).a, 255);
        assert_eq!(canvas.pixel(25, 10).a, 0);
    }

    #[test]
    fn test_fill_and_outline() {
        let mut canvas = Canvas::new(30, 30, BG);
        let mut s = Surface::new(&mut canvas);
        let red = Rgb8::new(255, 0, 0).opaque();
        let blue = Rgb8::new(0, 0, 255).opaque();
        s.rounded_rect(LayoutRect::new(5, 5, 20, 20), 0.0, Some(red), Some((blue, 1.0)));
        assert_eq!(canvas.pixel(5, 12), blue);
        assert_eq!(canvas.pixel(12, 12), red);
    }

    #[test]
    fn test_ellipse_inscribed() {
        let mut canvas = Canvas::transparent(20, 20);
        let mut s = Surface::new(&mut canvas);
        let t = s.fill_ellipse(LayoutRect::new(2, 2, 16, 16), WHITE).unwrap();
        assert!(t.x1 >= 2 && t.y1 >= 2 && t.x2 <= 18 && t.y2 <= 18);
        assert_eq!(canvas.pixel(10, 10).a, 255);
        assert_eq!(canvas.pixel(2, 2).a, 0);
    }

    #[test]
    fn test_polygon_uses_pixel_centres() {
        let mut canvas = Canvas::transparent(10, 10);
        let mut s = Surface::new(&mut canvas);
        s.fill_polygon(&[(1, 1), (5, 1), (5, 5), (1, 5)], WHITE);
        // Edge pixels are half covered, interior pixels fully.
        assert_eq!(canvas.pixel(3, 3).a, 255);
        let edge = canvas.pixel(1, 3).a;
        assert!(edge > 100 && edge < 155, "edge coverage {edge}");
    }

    #[test]
    fn test_degenerate_polygon_is_skipped() {
        let mut canvas = Canvas::transparent(4, 4);
        let mut s = Surface::new(&mut canvas);
        assert!(s.fill_polygon(&[(0, 0), (1, 0)], WHITE).is_none());
        assert!(s.line(&[(1, 1)], 2.0, WHITE).is_none());
    }

    #[test]
    fn test_horizontal_line_covers_row() {
        let mut canvas = Canvas::transparent(10, 5);
        let mut s = Surface::new(&mut canvas);
        s.line(&[(2, 2), (7, 2)], 1.0, WHITE);
        assert_eq!(canvas.pixel(4, 2).a, 255);
        assert_eq!(canvas.pixel(4, 1).a, 0);
        assert_eq!(canvas.pixel(4, 3).a, 0);
    }

    #[test]
    fn test_text_with_builtin_face() {
        let mut canvas = Canvas::transparent(60, 20);
        let mut s = Surface::new(&mut canvas);
        let font = Font::builtin(8.0);
        let advance = s.text(&font, 2, 3, "HI", WHITE);
        assert_eq!(advance, 12);
        let dirty = s.dirty().unwrap_or(RectI::new(0, 0, -1, -1));
        assert_eq!((dirty.x1, dirty.y1), (2, 3));
        // 'H' left stem.
        assert_eq!(canvas.pixel(2, 5).a, 255);
    }

    #[test]
    fn test_point_blends_and_clips() {
        let mut canvas = Canvas::new(4, 4, Rgb8::new(0, 0, 0));
        let mut s = Surface::new(&mut canvas);
        s.point(1, 1, Rgb8::new(200, 0, 0).with_alpha(128));
        s.point(-1, 9, WHITE);
        assert_eq!(s.dirty(), Some(RectI::new(1, 1, 1, 1)));
        let p = canvas.pixel(1, 1);
        assert_eq!((p.r, p.a), (100, 255));
    }

    #[test]
    fn test_dirty_ignores_shapes_on_opposite_sides() {
        let mut canvas = Canvas::new(10, 10, BG);
        let mut s = Surface::new(&mut canvas);
        assert!(s.fill_rect(LayoutRect::new(-40, -40, 20, 20), WHITE).is_none());
        assert!(s.fill_rect(LayoutRect::new(30, 30, 20, 20), WHITE).is_none());
        assert!(s.dirty().is_none());
        // Partly visible shapes only count their on-canvas part.
        let t = s.fill_rect(LayoutRect::new(-5, 8, 8, 10), WHITE);
        assert_eq!(t, Some(RectI::new(0, 8, 3, 9)));
        assert_eq!(s.dirty(), Some(RectI::new(0, 8, 3, 9)));
    }

    #[test]
    fn test_off_canvas_shapes_are_clipped() {
        let mut canvas = Canvas::new(10, 10, BG);
        let before = canvas.clone();
        let mut s = Surface::new(&mut canvas);
        s.fill_rounded_rect(LayoutRect::new(-500, -500, 400, 400), 20.0, WHITE);
        s.fill_ellipse(LayoutRect::new(50, 50, 10, 10), WHITE);
        assert!(s.dirty().is_none());
        assert_eq!(canvas, before);
    }
}
