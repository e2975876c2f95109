//! Stack blur.
//!
//! Port of the `stack_blur_rgba32` half of `agg_blur.h`: a triangular
//! kernel maintained with running sums, so each pass costs O(1) per pixel
//! regardless of radius. Runs on premultiplied RGBA and only inside a
//! region, since effect overlays are mostly empty.

use crate::basics::{uround, RectI};
use crate::canvas::Canvas;

// ============================================================================
// Division tables
// ============================================================================

/// `sum * MUL[r] >> SHR[r]` approximates `sum / (r + 1)^2`.
#[rustfmt::skip]
const STACK_BLUR8_MUL: [u32; 255] = [
    512,512,456,512,328,456,335,512,405,328,271,456,388,335,292,512,
    454,405,364,328,298,271,496,456,420,388,360,335,312,292,273,512,
    482,454,428,405,383,364,345,328,312,298,284,271,259,496,475,456,
    437,420,404,388,374,360,347,335,323,312,302,292,282,273,265,512,
    497,482,468,454,441,428,417,405,394,383,373,364,354,345,337,328,
    320,312,305,298,291,284,278,271,265,259,507,496,485,475,465,456,
    446,437,428,420,412,404,396,388,381,374,367,360,354,347,341,335,
    329,323,318,312,307,302,297,292,287,282,278,273,269,265,261,512,
    505,497,489,482,475,468,461,454,447,441,435,428,422,417,411,405,
    399,394,389,383,378,373,368,364,359,354,350,345,341,337,332,328,
    324,320,316,312,309,305,301,298,294,291,287,284,281,278,274,271,
    268,265,262,259,257,507,501,496,491,485,480,475,470,465,460,456,
    451,446,442,437,433,428,424,420,416,412,408,404,400,396,392,388,
    385,381,377,374,370,367,363,360,357,354,350,347,344,341,338,335,
    332,329,326,323,320,318,315,312,310,307,304,302,299,297,294,292,
    289,287,285,282,280,278,275,273,271,269,267,265,263,261,259,
];

#[rustfmt::skip]
const STACK_BLUR8_SHR: [u32; 255] = [
     9, 11, 12, 13, 13, 14, 14, 15, 15, 15, 15, 16, 16, 16, 16, 17,
    17, 17, 17, 17, 17, 17, 18, 18, 18, 18, 18, 18, 18, 18, 18, 19,
    19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 19, 20, 20, 20,
    20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 20, 21,
    21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 21,
    21, 21, 21, 21, 21, 21, 21, 21, 21, 21, 22, 22, 22, 22, 22, 22,
    22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22,
    22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 23,
    23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23,
    23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23,
    23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23,
    23, 23, 23, 23, 23, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24,
    24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24,
    24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24,
    24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24,
    24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24, 24,
];

pub const MAX_STACK_RADIUS: u32 = 254;

type Pixel = [u8; 4];

/// Stack radius whose triangular kernel has standard deviation `sigma`.
///
/// A triangle of half-width `r + 1` has variance `(r + 1)^2 / 6`.
pub fn stack_radius_for_sigma(sigma: f64) -> u32 {
    if sigma <= 0.0 {
        return 0;
    }
    let r = sigma * 6f64.sqrt() - 1.0;
    uround(r.max(1.0)).min(MAX_STACK_RADIUS)
}

/// Approximate a Gaussian blur of standard deviation `sigma` over
/// `region` (clipped to the canvas).
pub fn gaussian_blur(canvas: &mut Canvas, sigma: f64, region: RectI) {
    let radius = stack_radius_for_sigma(sigma);
    stack_blur_region(canvas, region, radius, radius);
}

/// Blur `region` in place with independent horizontal and vertical radii.
/// Pixels outside the region are read as edge-extended region pixels and
/// never written.
pub fn stack_blur_region(canvas: &mut Canvas, region: RectI, rx: u32, ry: u32) {
    let mut r = region;
    if !r.clip(&canvas.bounds()) {
        return;
    }
    let width = canvas.width() as usize;
    let (x1, y1) = (r.x1 as usize, r.y1 as usize);
    let (w, h) = (r.width() as usize, r.height() as usize);
    let data = canvas.data_mut();

    let mut blur = StackBlur::default();

    let rx = rx.min(MAX_STACK_RADIUS) as usize;
    if rx > 0 {
        for y in y1..y1 + h {
            let start = (y * width + x1) * 4;
            blur.run(data, start, 4, w, rx);
        }
    }

    let ry = ry.min(MAX_STACK_RADIUS) as usize;
    if ry > 0 {
        for x in x1..x1 + w {
            let start = (y1 * width + x) * 4;
            blur.run(data, start, width * 4, h, ry);
        }
    }
}

// ============================================================================
// StackBlur
// ============================================================================

/// Scratch buffers reused across lines.
#[derive(Default)]
struct StackBlur {
    src: Vec<Pixel>,
    stack: Vec<Pixel>,
}

#[inline]
fn add(acc: &mut [u64; 4], p: Pixel, weight: u64) {
    for c in 0..4 {
        acc[c] += p[c] as u64 * weight;
    }
}

#[inline]
fn sub(acc: &mut [u64; 4], p: Pixel) {
    for c in 0..4 {
        acc[c] -= p[c] as u64;
    }
}

impl StackBlur {
    /// Blur `len` pixels starting at byte `start`, `step` bytes apart.
    fn run(&mut self, data: &mut [u8], start: usize, step: usize, len: usize, radius: usize) {
        if len == 0 {
            return;
        }
        self.src.clear();
        self.src.extend((0..len).map(|i| {
            let o = start + i * step;
            [data[o], data[o + 1], data[o + 2], data[o + 3]]
        }));

        let last = len - 1;
        let div = radius * 2 + 1;
        let mul = STACK_BLUR8_MUL[radius] as u64;
        let shr = STACK_BLUR8_SHR[radius];

        self.stack.clear();
        self.stack.resize(div, [0; 4]);

        let mut sum = [0u64; 4];
        let mut sum_in = [0u64; 4];
        let mut sum_out = [0u64; 4];

        // Left half of the kernel sees the first pixel repeated.
        let first = self.src[0];
        for i in 0..=radius {
            self.stack[i] = first;
            add(&mut sum, first, (i + 1) as u64);
            add(&mut sum_out, first, 1);
        }
        for i in 1..=radius {
            let p = self.src[i.min(last)];
            self.stack[i + radius] = p;
            add(&mut sum, p, (radius + 1 - i) as u64);
            add(&mut sum_in, p, 1);
        }

        let mut sp = radius;
        let mut xp = radius.min(last);

        for i in 0..len {
            let o = start + i * step;
            for c in 0..4 {
                data[o + c] = ((sum[c] * mul) >> shr) as u8;
            }

            for c in 0..4 {
                sum[c] -= sum_out[c];
            }

            let mut stack_start = sp + div - radius;
            if stack_start >= div {
                stack_start -= div;
            }
            sub(&mut sum_out, self.stack[stack_start]);

            if xp < last {
                xp += 1;
            }
            let p = self.src[xp];
            self.stack[stack_start] = p;
            add(&mut sum_in, p, 1);
            for c in 0..4 {
                sum[c] += sum_in[c];
            }

            sp += 1;
            if sp >= div {
                sp = 0;
            }
            let p = self.stack[sp];
            add(&mut sum_out, p, 1);
            sub(&mut sum_in, p);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelFormat;
    use crate::color::{Rgb8, Rgba8};

    fn alpha_sum(c: &Canvas) -> u64 {
        c.data().chunks(4).map(|p| p[3] as u64).sum()
    }

    #[test]
    fn test_radius_mapping() {
        assert_eq!(stack_radius_for_sigma(0.0), 0);
        assert_eq!(stack_radius_for_sigma(0.1), 1);
        assert_eq!(stack_radius_for_sigma(15.0), 36);
        assert_eq!(stack_radius_for_sigma(40.0), 97);
        assert_eq!(stack_radius_for_sigma(1000.0), MAX_STACK_RADIUS);
    }

    #[test]
    fn test_uniform_image_unchanged() {
        let mut c = Canvas::new(20, 20, Rgb8::new(90, 60, 30));
        let before = c.clone();
        let bounds = c.bounds();
        stack_blur_region(&mut c, bounds, 5, 5);
        assert_eq!(c, before);
    }

    #[test]
    fn test_zero_radius_is_noop() {
        let mut c = Canvas::transparent(10, 10);
        c.blend_pixel(5, 5, &Rgba8::new(255, 255, 255, 255), 255);
        let before = c.clone();
        let bounds = c.bounds();
        stack_blur_region(&mut c, bounds, 0, 0);
        assert_eq!(c, before);
    }

    #[test]
    fn test_blur_spreads_and_roughly_conserves_alpha() {
        let mut c = Canvas::transparent(41, 41);
        for y in 18..23 {
            c.blend_hline(18, y, 5, &Rgba8::new(255, 255, 255, 255), 255);
        }
        let before = alpha_sum(&c);
        let bounds = c.bounds();
        stack_blur_region(&mut c, bounds, 4, 4);
        let after = alpha_sum(&c);
        assert!(c.pixel(20, 14).a > 0, "blur should reach the kernel edge");
        assert_eq!(c.pixel(20, 13).a, 0);
        assert!(c.pixel(20, 20).a < 255);
        // Table division is within a fraction of a percent; truncation
        // loses a little per pass.
        assert!(after * 100 <= before * 101 && after * 10 >= before * 8);
    }

    #[test]
    fn test_blur_stays_inside_region() {
        let mut c = Canvas::transparent(30, 30);
        c.blend_hline(10, 10, 5, &Rgba8::new(255, 0, 0, 255), 255);
        stack_blur_region(&mut c, RectI::new(5, 5, 20, 20), 6, 6);
        assert_eq!(c.pixel(4, 10).a, 0);
        assert_eq!(c.pixel(21, 10).a, 0);
        assert!(c.pixel(10, 11).a > 0);
    }

    #[test]
    fn test_premultiplied_invariant_preserved() {
        let mut c = Canvas::transparent(32, 32);
        for y in 8..24 {
            c.blend_hline(8, y, 16, &Rgba8::new(88, 166, 255, 120), 255);
        }
        let bounds = c.bounds();
        gaussian_blur(&mut c, 3.0, bounds);
        for p in c.data().chunks(4) {
            assert!(p[0] <= p[3] && p[1] <= p[3] && p[2] <= p[3]);
        }
    }
}
