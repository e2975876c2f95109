//! Layout rectangles and row arithmetic.
//!
//! A `LayoutRect` covers the half-open pixel range `[x, x + w) × [y, y + h)`.
//! The scenes were authored against inclusive corner boxes, so `from_box`
//! and `to_box` convert between the two.

use crate::basics::RectI;

/// Integer rectangle passed between layout stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayoutRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl LayoutRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// From inclusive corners `(x1, y1, x2, y2)`.
    pub fn from_box(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
        Self::new(x1, y1, x2 - x1 + 1, y2 - y1 + 1)
    }

    /// Inclusive corners, the inverse of `from_box`.
    pub fn to_box(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.right() - 1, self.bottom() - 1)
    }

    pub fn to_rect_i(&self) -> RectI {
        let (x1, y1, x2, y2) = self.to_box();
        RectI::new(x1, y1, x2, y2)
    }

    /// One past the last column.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// One past the last row.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Shrink by `d` on every side. Width and height never go negative;
    /// an over-inset rectangle collapses onto its centre.
    pub fn inset(&self, d: i32) -> LayoutRect {
        self.inset_xy(d, d)
    }

    pub fn inset_xy(&self, dx: i32, dy: i32) -> LayoutRect {
        let (x, w) = shrink(self.x, self.w, dx);
        let (y, h) = shrink(self.y, self.h, dy);
        LayoutRect::new(x, y, w, h)
    }

    /// Grow by `d` on every side.
    pub fn expand(&self, d: i32) -> LayoutRect {
        LayoutRect::new(self.x - d, self.y - d, self.w + 2 * d, self.h + 2 * d)
    }

    pub fn translate(&self, dx: i32, dy: i32) -> LayoutRect {
        LayoutRect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    pub fn with_height(&self, h: i32) -> LayoutRect {
        LayoutRect::new(self.x, self.y, self.w, h)
    }

    pub fn contains_rect(&self, other: &LayoutRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

fn shrink(origin: i32, extent: i32, d: i32) -> (i32, i32) {
    let extent = extent.max(0);
    let d = d.max(0);
    if 2 * d <= extent {
        (origin + d, extent - 2 * d)
    } else {
        (origin + extent / 2, 0)
    }
}

// ============================================================================
// Rows
// ============================================================================

/// Width of each of `columns` equal cards separated by `gap` inside
/// `available` pixels. Floors, never negative.
pub fn card_width(available: i32, columns: i32, gap: i32) -> i32 {
    if columns <= 0 {
        return 0;
    }
    let free = available - gap * (columns - 1);
    if free <= 0 {
        return 0;
    }
    free / columns
}

/// Rectangles for a row of equal cards starting at `(x, y)`.
pub fn card_row(x: i32, y: i32, available: i32, columns: i32, gap: i32, height: i32) -> Vec<LayoutRect> {
    let w = card_width(available, columns, gap);
    (0..columns.max(0))
        .map(|i| LayoutRect::new(x + i * (w + gap), y, w, height))
        .collect()
}

/// Left edge that centres `content` pixels within `[x, x + available)`.
pub fn centered(x: i32, available: i32, content: i32) -> i32 {
    x + (available - content).div_euclid(2)
}

/// Left edge of a row of `count` items of width `item` separated by `gap`,
/// centred within `available`.
pub fn centered_row(available: i32, count: i32, item: i32, gap: i32) -> i32 {
    let total = count * item + (count - 1).max(0) * gap;
    centered(0, available, total)
}
