//! Flattening the premultiplied canvas into an opaque RGB image.

use crate::canvas::Canvas;
use crate::color::{Rgb8, Rgba8};

/// Opaque 8-bit RGB image, rows top to bottom, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbImage {
    pub fn pixel(&self, x: u32, y: u32) -> Rgb8 {
        let off = (y as usize * self.width as usize + x as usize) * 3;
        Rgb8::new(self.data[off], self.data[off + 1], self.data[off + 2])
    }
}

/// Composite `canvas` over an opaque `background` and drop alpha.
///
/// Per channel: `premul + background * (255 - a) / 255`.
pub fn flatten(canvas: &Canvas, background: Rgb8) -> RgbImage {
    let bg = [background.r, background.g, background.b];
    let mut data = Vec::with_capacity(canvas.width() as usize * canvas.height() as usize * 3);
    for px in canvas.data().chunks_exact(4) {
        let rest = 255 - px[3];
        for (c, b) in px[..3].iter().zip(bg) {
            data.push(c.saturating_add(Rgba8::multiply(b, rest)));
        }
    }
    RgbImage {
        width: canvas.width(),
        height: canvas.height(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelFormat;
    use crate::basics::COVER_FULL;

    const BG: Rgb8 = Rgb8::new(13, 17, 23);

    #[test]
    fn test_opaque_canvas_flattens_unchanged() {
        let mut c = Canvas::new(4, 3, Rgb8::new(200, 10, 50));
        c.blend_pixel(1, 1, &Rgb8::new(1, 2, 3).opaque(), COVER_FULL);
        let img = flatten(&c, BG);
        assert_eq!((img.width, img.height), (4, 3));
        assert_eq!(img.data.len(), 4 * 3 * 3);
        assert_eq!(img.pixel(0, 0), Rgb8::new(200, 10, 50));
        assert_eq!(img.pixel(1, 1), Rgb8::new(1, 2, 3));
    }

    #[test]
    fn test_transparent_canvas_becomes_background() {
        let c = Canvas::transparent(5, 5);
        let img = flatten(&c, BG);
        assert!(img.data.chunks(3).all(|p| p == [13, 17, 23]));
    }

    #[test]
    fn test_half_alpha_mixes_with_background() {
        let mut c = Canvas::transparent(1, 1);
        c.blend_pixel(0, 0, &Rgb8::new(255, 255, 255).with_alpha(128), COVER_FULL);
        let p = flatten(&c, Rgb8::new(0, 0, 0)).pixel(0, 0);
        assert!((127..=129).contains(&p.r));
        let p = flatten(&c, Rgb8::new(255, 255, 255)).pixel(0, 0);
        assert_eq!(p, Rgb8::new(255, 255, 255));
    }
}
