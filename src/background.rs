//! Background effects: the top glow gradient and the edge vignette.

use log::debug;

use crate::basics::{RectI, COVER_FULL};
use crate::canvas::{Canvas, PixelFormat};
use crate::color::Rgb8;
use crate::renderer::RendererBase;

/// How glow alpha varies across a row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Falloff {
    /// Whole row at the row's alpha.
    Linear,
    /// Strongest at the centre column, fading towards the edges.
    /// `dampening` of 1 fades to nothing at the edges, 0 disables it.
    Radial { dampening: f64 },
}

/// Alpha of row `y` for a glow of `peak` that fades out at `limit`.
pub fn row_alpha(peak: u8, y: u32, limit: u32) -> u8 {
    if limit == 0 || y >= limit {
        return 0;
    }
    let a = (peak as f64 * (1.0 - y as f64 / limit as f64)) as i32;
    a.clamp(0, peak as i32) as u8
}

/// Per-column multipliers for a radial glow.
fn column_factors(width: u32, dampening: f64) -> Vec<f64> {
    let half = (width / 2).max(1) as f64;
    (0..width)
        .map(|x| {
            let dist = (x as f64 - half).abs() / half;
            1.0 - dist * dampening
        })
        .collect()
}

/// Paint a vertical glow of `color` down from the top of the canvas.
///
/// Row `y` gets `trunc(peak_alpha * (1 - y / height_limit))`; rows at or
/// below `height_limit` are left alone.
pub fn paint_glow(canvas: &mut Canvas, color: Rgb8, peak_alpha: u8, height_limit: u32, falloff: Falloff) {
    let width = canvas.width();
    let rows = canvas.height().min(height_limit);
    debug!(
        "Glow gradient: {} rows, peak alpha {}, {:?}",
        rows, peak_alpha, falloff
    );

    match falloff {
        Falloff::Linear => {
            for y in 0..rows {
                let a = row_alpha(peak_alpha, y, height_limit);
                if a > 0 {
                    canvas.blend_hline(0, y as i32, width, &color.with_alpha(a), COVER_FULL);
                }
            }
        }
        Falloff::Radial { dampening } => {
            let factors = column_factors(width, dampening);
            // Rows share the same alpha for long stretches; rebuild the
            // column alphas only when it changes.
            let mut cached: Option<(u8, Vec<u8>)> = None;
            for y in 0..rows {
                let a = row_alpha(peak_alpha, y, height_limit);
                if a == 0 {
                    continue;
                }
                if cached.as_ref().map(|(ca, _)| *ca) != Some(a) {
                    let alphas = factors
                        .iter()
                        .map(|f| (a as f64 * f).max(0.0) as u8)
                        .collect();
                    cached = Some((a, alphas));
                }
                let Some((_, alphas)) = &cached else {
                    continue;
                };
                for (x, &pa) in alphas.iter().enumerate() {
                    if pa > 0 {
                        canvas.blend_pixel(x as i32, y as i32, &color.with_alpha(pa), COVER_FULL);
                    }
                }
            }
        }
    }
}

/// Darken the outer `bands` pixel rings. Ring `r` (distance from the
/// nearest edge, `1..=bands`) gets black at `alpha_step * (bands - r)`.
pub fn paint_edge_vignette(canvas: &mut Canvas, bands: u32, alpha_step: u8) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let mut ren = RendererBase::new(canvas);
    let black = Rgb8::new(0, 0, 0);
    for r in 1..=bands as i32 {
        let alpha = (alpha_step as i32 * (bands as i32 - r)).min(255);
        if alpha <= 0 {
            continue;
        }
        let ring = RectI::new(r, r, w - r, h - r);
        if !ring.is_valid() {
            break;
        }
        let c = black.with_alpha(alpha as u8);
        ren.blend_hline(ring.x1, ring.y1, ring.x2, &c, COVER_FULL);
        if ring.y2 != ring.y1 {
            ren.blend_hline(ring.x1, ring.y2, ring.x2, &c, COVER_FULL);
        }
        for y in ring.y1 + 1..ring.y2 {
            ren.blend_pixel(ring.x1, y, &c, COVER_FULL);
            if ring.x2 != ring.x1 {
                ren.blend_pixel(ring.x2, y, &c, COVER_FULL);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb8 = Rgb8::new(13, 17, 23);
    const BLUE: Rgb8 = Rgb8::new(88, 166, 255);

    #[test]
    fn test_row_alpha() {
        assert_eq!(row_alpha(20, 0, 400), 20);
        assert_eq!(row_alpha(20, 200, 400), 10);
        assert_eq!(row_alpha(20, 399, 400), 0);
        assert_eq!(row_alpha(20, 400, 400), 0);
        assert_eq!(row_alpha(25, 1, 2000), 24);
        assert_eq!(row_alpha(25, 0, 0), 0);
    }

    #[test]
    fn test_linear_glow_uniform_rows() {
        let mut c = Canvas::new(16, 8, BG);
        paint_glow(&mut c, BLUE, 200, 8, Falloff::Linear);
        for y in 0..8 {
            let first = c.pixel(0, y);
            assert!((1..16).all(|x| c.pixel(x, y) == first));
        }
        assert!(c.pixel(0, 0).b > c.pixel(0, 6).b);
    }

    #[test]
    fn test_radial_glow_peaks_at_centre() {
        let mut c = Canvas::new(100, 50, BG);
        paint_glow(&mut c, BLUE, 200, 40, Falloff::Radial { dampening: 0.7 });
        let centre = c.pixel(50, 0).b;
        let edge = c.pixel(0, 0).b;
        assert!(centre > edge && edge > BG.b);
        // Below the limit nothing changes.
        assert_eq!(c.pixel(50, 45), BG.opaque());
    }

    #[test]
    fn test_radial_matches_direct_formula() {
        let (w, limit, peak, damp) = (64u32, 30u32, 20u8, 0.7);
        let mut table = Canvas::new(w, limit, BG);
        paint_glow(&mut table, BLUE, peak, limit, Falloff::Radial { dampening: damp });

        let mut direct = Canvas::new(w, limit, BG);
        let half = (w / 2) as f64;
        for y in 0..limit {
            let a = (peak as f64 * (1.0 - y as f64 / limit as f64)) as i32;
            for x in 0..w {
                let pa = (a as f64 * (1.0 - (x as f64 - half).abs() / half * damp)) as i32;
                if pa > 0 {
                    direct.blend_pixel(x as i32, y as i32, &BLUE.with_alpha(pa as u8), COVER_FULL);
                }
            }
        }
        assert_eq!(table, direct);
    }

    #[test]
    fn test_tiny_canvas_is_safe() {
        let mut c = Canvas::new(1, 3, BG);
        paint_glow(&mut c, BLUE, 50, 10, Falloff::Radial { dampening: 1.0 });
        paint_edge_vignette(&mut c, 5, 2);
    }

    #[test]
    fn test_vignette_rings() {
        let mut c = Canvas::new(40, 40, Rgb8::new(100, 100, 100));
        paint_edge_vignette(&mut c, 10, 10);
        // Outermost ring (r = 0) is not painted.
        assert_eq!(c.pixel(0, 20).r, 100);
        // r = 1 is darkest, r = 10 untouched.
        let r1 = c.pixel(1, 20).r;
        let r5 = c.pixel(5, 20).r;
        assert!(r1 < r5 && r5 < 100);
        assert_eq!(c.pixel(10, 20).r, 100);
        // Symmetric on the right: distance W - x.
        assert_eq!(c.pixel(39, 20).r, r1);
        // Corners of a ring are painted once.
        assert_eq!(c.pixel(1, 1).r, r1);
    }
}
