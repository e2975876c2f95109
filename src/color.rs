//! Colors.
//!
//! `Rgb8` is the palette type (every named color in a style table is an
//! opaque triple). `Rgba8` is a straight-alpha color handed to the drawing
//! surface; the canvas stores premultiplied pixels, so the fixed-point
//! helpers here work in the 0..=255 domain with exact rounding.

use serde::{Deserialize, Serialize};

use crate::basics::CoverType;

/// Opaque 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same color with the given straight alpha.
    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8 {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub const fn opaque(self) -> Rgba8 {
        self.with_alpha(255)
    }
}

impl From<Rgb8> for Rgba8 {
    fn from(c: Rgb8) -> Self {
        c.opaque()
    }
}

/// 8-bit RGBA color, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_SCALE: u32 = 1 << Self::BASE_SHIFT;
    pub const BASE_MASK: u32 = Self::BASE_SCALE - 1;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(&self) -> Rgb8 {
        Rgb8::new(self.r, self.g, self.b)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn is_opaque(&self) -> bool {
        self.a == Self::BASE_MASK as u8
    }

    /// Fixed-point multiply, exact over u8: `round(a * b / 255)`.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Scale an alpha by an anti-aliasing cover.
    #[inline]
    pub fn mult_cover(a: u8, cover: CoverType) -> u8 {
        Self::multiply(a, cover)
    }

    /// Interpolate `p` toward premultiplied `q` by alpha `a`:
    /// `p + q - p * a`, the per-channel source-over operator.
    #[inline]
    pub fn prelerp(p: u8, q: u8, a: u8) -> u8 {
        p.wrapping_add(q).wrapping_sub(Self::multiply(p, a))
    }

    /// Premultiplied copy with the alpha additionally scaled by `cover`.
    #[inline]
    pub fn premultiplied(&self, cover: CoverType) -> Rgba8 {
        let a = Self::mult_cover(self.a, cover);
        if a == 255 {
            return Rgba8::new(self.r, self.g, self.b, 255);
        }
        Rgba8::new(
            Self::multiply(self.r, a),
            Self::multiply(self.g, a),
            Self::multiply(self.b, a),
            a,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_exact_endpoints() {
        assert_eq!(Rgba8::multiply(255, 255), 255);
        assert_eq!(Rgba8::multiply(0, 255), 0);
        assert_eq!(Rgba8::multiply(255, 128), 128);
        assert_eq!(Rgba8::multiply(128, 128), 64);
    }

    #[test]
    fn test_prelerp_is_source_over() {
        // 50% white over opaque black
        let src = Rgba8::new(255, 255, 255, 128).premultiplied(255);
        assert_eq!(src.r, 128);
        assert_eq!(Rgba8::prelerp(0, src.r, src.a), 128);
        // Opaque source replaces the destination
        assert_eq!(Rgba8::prelerp(77, 200, 255), 200);
    }

    #[test]
    fn test_premultiplied_with_cover() {
        let c = Rgba8::new(200, 100, 50, 255).premultiplied(128);
        assert_eq!(c.a, 128);
        assert_eq!(c.r, Rgba8::multiply(200, 128));
        assert_eq!(c.g, Rgba8::multiply(100, 128));
    }

    #[test]
    fn test_rgb8_conversions() {
        let blue = Rgb8::new(88, 166, 255);
        let c: Rgba8 = blue.into();
        assert!(c.is_opaque());
        assert_eq!(blue.with_alpha(40).a, 40);
        assert_eq!(blue.with_alpha(40).rgb(), blue);
    }
}
