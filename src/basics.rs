//! Shared numeric helpers and the path command protocol.
//!
//! Rounding helpers, the 24.8 subpixel and coverage constants shared by the
//! rasterizer, the integer clip rectangle, and the `VertexSource` protocol
//! that every shape generator speaks.

// ============================================================================
// Rounding
// ============================================================================

/// Round to the nearest integer, half away from zero.
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Round to the nearest unsigned integer, half up.
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

// ============================================================================
// Coverage and subpixel constants
// ============================================================================

/// Anti-aliasing coverage of one pixel, 0..=255.
pub type CoverType = u8;

pub const COVER_FULL: CoverType = 255;

/// Fractional bits of rasterizer coordinates (24.8 fixed point).
pub const POLY_SUBPIXEL_SHIFT: u32 = 8;
pub const POLY_SUBPIXEL_SCALE: u32 = 1 << POLY_SUBPIXEL_SHIFT;
pub const POLY_SUBPIXEL_MASK: u32 = POLY_SUBPIXEL_SCALE - 1;

/// Convert a floating-point coordinate to 24.8 fixed point.
#[inline]
pub fn poly_coord(v: f64) -> i32 {
    iround(v * POLY_SUBPIXEL_SCALE as f64)
}

/// Filling rule for polygon rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillingRule {
    NonZero,
    EvenOdd,
}

pub const PI: f64 = std::f64::consts::PI;

// ============================================================================
// RectI
// ============================================================================

/// Integer rectangle with inclusive corners, used for clipping and for
/// tracking the region an overlay has touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectI {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectI {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Clip to the intersection with `r`. Returns `true` if non-empty.
    pub fn clip(&mut self, r: &RectI) -> bool {
        self.x1 = self.x1.max(r.x1);
        self.y1 = self.y1.max(r.y1);
        self.x2 = self.x2.min(r.x2);
        self.y2 = self.y2.min(r.y2);
        self.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Grow by `d` pixels on every side.
    pub fn expand(&self, d: i32) -> RectI {
        RectI::new(self.x1 - d, self.y1 - d, self.x2 + d, self.y2 + d)
    }

    /// Smallest rectangle containing both.
    pub fn unite(&self, r: &RectI) -> RectI {
        RectI::new(
            self.x1.min(r.x1),
            self.y1.min(r.y1),
            self.x2.max(r.x2),
            self.y2.max(r.y2),
        )
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1 + 1
    }
}

// ============================================================================
// Path commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;
pub const PATH_CMD_END_POLY: u32 = 0x0F;
pub const PATH_FLAGS_CLOSE: u32 = 0x40;

#[inline]
pub fn is_stop(c: u32) -> bool {
    c == PATH_CMD_STOP
}

#[inline]
pub fn is_move_to(c: u32) -> bool {
    c == PATH_CMD_MOVE_TO
}

/// Move-to or line-to: a command that carries a coordinate.
#[inline]
pub fn is_vertex(c: u32) -> bool {
    c >= PATH_CMD_MOVE_TO && c < PATH_CMD_END_POLY
}

#[inline]
pub fn is_close(c: u32) -> bool {
    (c & !PATH_FLAGS_CLOSE) == PATH_CMD_END_POLY && (c & PATH_FLAGS_CLOSE) != 0
}

/// A source of path vertices. `vertex` writes the coordinate and returns
/// the command; `PATH_CMD_STOP` ends the stream.
pub trait VertexSource {
    fn rewind(&mut self, path_id: u32);
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

// ============================================================================
// Tests
// ============================================================================
