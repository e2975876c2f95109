//! Decorations around the device mockup: corner dot grids, the download
//! badge, feature cards, centred taglines and the footer line.

use log::debug;

use crate::color::Rgb8;
use crate::content::{Feature, ListingCopy};
use crate::font::Font;
use crate::layout::{centered, centered_row, LayoutRect};
use crate::style::{StyleTable, TextRole};
use crate::surface::Surface;

// ============================================================================
// Dot grids
// ============================================================================

/// 3×3 grid of small dots repeated in the four corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotGrid {
    /// Distance of the top-left grid origins from the left and top edges.
    pub near: (i32, i32),
    /// Distance of the far grid origins from the right and bottom edges.
    pub far: (i32, i32),
    pub step: i32,
    pub size: i32,
    pub base_alpha: i32,
    /// Alpha lost per step away from the grid origin.
    pub fade: i32,
    pub min_alpha: i32,
}

impl DotGrid {
    pub const MONITOR: DotGrid = DotGrid {
        near: (40, 40),
        far: (70, 100),
        step: 12,
        size: 4,
        base_alpha: 40,
        fade: 8,
        min_alpha: 10,
    };

    pub const LAPTOP: DotGrid = DotGrid {
        near: (50, 50),
        far: (150, 150),
        step: 30,
        size: 6,
        base_alpha: 30,
        fade: 5,
        min_alpha: 10,
    };

    /// Origins of the four grids on a `width × height` canvas.
    pub fn origins(&self, width: i32, height: i32) -> [(i32, i32); 4] {
        let (nx, ny) = self.near;
        let (fx, fy) = self.far;
        [
            (nx, ny),
            (width - fx, ny),
            (nx, height - fy),
            (width - fx, height - fy),
        ]
    }

    /// Alpha of the dot `i` columns and `j` rows from the origin.
    pub fn alpha(&self, i: i32, j: i32) -> u8 {
        (self.base_alpha - (i + j) * self.fade).max(self.min_alpha).clamp(0, 255) as u8
    }
}

pub fn dot_grids(s: &mut Surface<'_>, grid: &DotGrid, color: Rgb8) {
    let (w, h) = (s.width() as i32, s.height() as i32);
    for (ox, oy) in grid.origins(w, h) {
        for i in 0..3 {
            for j in 0..3 {
                let x = ox + i * grid.step;
                let y = oy + j * grid.step;
                s.fill_ellipse(
                    LayoutRect::from_box(x, y, x + grid.size, y + grid.size),
                    color.with_alpha(grid.alpha(i, j)),
                );
            }
        }
    }
}

// ============================================================================
// Badge
// ============================================================================

/// Pill-shaped label anchored to the top-right corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeSpec {
    /// Horizontal padding on each side of the text.
    pub padding: i32,
    pub right_margin: i32,
    pub y: i32,
    pub height: i32,
    pub radius: f64,
    /// Text offset from the top of the pill.
    pub text_dy: i32,
}

impl BadgeSpec {
    pub const MONITOR: BadgeSpec = BadgeSpec {
        padding: 12,
        right_margin: 60,
        y: 60,
        height: 32,
        radius: 16.0,
        text_dy: 6,
    };

    pub const LAPTOP: BadgeSpec = BadgeSpec {
        padding: 15,
        right_margin: 80,
        y: 80,
        height: 30,
        radius: 15.0,
        text_dy: 8,
    };

    /// Pill rectangle for text `text_w` pixels wide on a canvas `canvas_w`
    /// pixels wide.
    pub fn rect(&self, canvas_w: i32, text_w: i32) -> LayoutRect {
        let w = text_w + 2 * self.padding;
        let x = canvas_w - w - self.right_margin;
        LayoutRect::from_box(x, self.y, x + w, self.y + self.height)
    }
}

/// Green badge with dark text in the top-right corner. Returns its rect.
pub fn download_badge(s: &mut Surface<'_>, styles: &StyleTable, spec: &BadgeSpec, text: &str) -> LayoutRect {
    let p = styles.palette();
    let font = styles.font(TextRole::DownloadBadge);
    let rect = spec.rect(s.width() as i32, font.measure(text));
    s.fill_rounded_rect(rect, spec.radius, p.accent_green);
    s.text(font, rect.x + spec.padding, rect.y + spec.text_dy, text, p.bg_primary);
    rect
}

// ============================================================================
// Text helpers
// ============================================================================

/// Draw `text` horizontally centred on the canvas at row `y`. Returns the
/// left edge used.
pub fn centered_text(s: &mut Surface<'_>, font: &Font, y: i32, text: &str, color: Rgb8) -> i32 {
    let x = centered(0, s.width() as i32, font.measure(text));
    s.text(font, x, y, text, color);
    x
}

// ============================================================================
// Feature cards
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureStyle {
    /// Title, description and a drawn check mark inside a ringed icon.
    Detailed,
    /// Title only, with a check glyph on a filled circle.
    Compact,
}

/// Geometry of the feature card row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub y: i32,
    pub card_w: i32,
    pub card_h: i32,
    pub gap: i32,
    pub style: FeatureStyle,
}

impl FeatureRow {
    pub const MONITOR: FeatureRow = FeatureRow {
        y: 1350,
        card_w: 380,
        card_h: 80,
        gap: 30,
        style: FeatureStyle::Detailed,
    };

    pub const LAPTOP: FeatureRow = FeatureRow {
        y: 1320,
        card_w: 300,
        card_h: 70,
        gap: 50,
        style: FeatureStyle::Compact,
    };

    /// Card rectangles for `count` cards centred on a canvas `canvas_w` wide.
    pub fn cards(&self, canvas_w: i32, count: usize) -> Vec<LayoutRect> {
        let count = count as i32;
        let start = centered_row(canvas_w, count, self.card_w, self.gap);
        (0..count)
            .map(|i| LayoutRect::new(start + i * (self.card_w + self.gap), self.y, self.card_w, self.card_h))
            .collect()
    }
}

pub fn feature_cards(s: &mut Surface<'_>, styles: &StyleTable, row: &FeatureRow, features: &[Feature]) {
    let cards = row.cards(s.width() as i32, features.len());
    debug!("Feature cards: {} at y = {}", cards.len(), row.y);
    for (rect, feature) in cards.iter().zip(features) {
        feature_card(s, styles, row.style, *rect, feature);
    }
}

fn feature_card(s: &mut Surface<'_>, styles: &StyleTable, style: FeatureStyle, rect: LayoutRect, feature: &Feature) {
    let p = styles.palette();
    let color = p.accent(feature.accent);
    let (fx, fy) = (rect.x, rect.y);

    s.rounded_rect(
        LayoutRect::from_box(fx, fy, rect.right(), rect.bottom()),
        12.0,
        Some(p.bg_secondary.opaque()),
        Some((color.opaque(), 2.0)),
    );

    match style {
        FeatureStyle::Detailed => {
            s.fill_ellipse(LayoutRect::from_box(fx + 18, fy + 22, fx + 54, fy + 58), color.with_alpha(40));
            s.fill_ellipse(LayoutRect::from_box(fx + 24, fy + 28, fx + 48, fy + 52), color);
            let tick = [(fx + 31, fy + 40), (fx + 36, fy + 46), (fx + 44, fy + 36)];
            s.line(&tick[..2], 3.0, p.bg_primary);
            s.line(&tick[1..], 3.0, p.bg_primary);

            s.text(styles.font(TextRole::Feature), fx + 70, fy + 18, feature.title, p.text_primary);
            if let Some(desc) = feature.description {
                s.text(styles.font(TextRole::FeatureDesc), fx + 70, fy + 48, desc, p.text_secondary);
            }
        }
        FeatureStyle::Compact => {
            s.fill_ellipse(LayoutRect::from_box(fx + 15, fy + 20, fx + 45, fy + 50), color);
            s.text(styles.font(TextRole::TableCell), fx + 22, fy + 22, "\u{2713}", p.bg_primary);
            s.text(styles.font(TextRole::Feature), fx + 60, fy + 22, feature.title, p.text_primary);
        }
    }
}

// ============================================================================
// Footer
// ============================================================================

/// Positions and colours of the footer line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FooterSpec {
    pub left: i32,
    /// Distance of the version string's left edge from the right edge.
    pub version_from_right: i32,
    /// Distance of the text top from the bottom edge.
    pub from_bottom: i32,
    /// Platform and version are muted; otherwise secondary.
    pub muted_sides: bool,
}

impl FooterSpec {
    pub const MONITOR: FooterSpec = FooterSpec {
        left: 60,
        version_from_right: 100,
        from_bottom: 60,
        muted_sides: true,
    };

    pub const LAPTOP: FooterSpec = FooterSpec {
        left: 80,
        version_from_right: 120,
        from_bottom: 60,
        muted_sides: false,
    };
}

/// Platform on the left, brand centred, version on the right.
pub fn footer(s: &mut Surface<'_>, styles: &StyleTable, spec: &FooterSpec, copy: &ListingCopy) {
    let p = styles.palette();
    let y = s.height() as i32 - spec.from_bottom;
    let side = if spec.muted_sides { p.text_muted } else { p.text_secondary };
    let font = styles.font(TextRole::Footer);

    s.text(font, spec.left, y, copy.platform, side);
    centered_text(s, font, y, copy.brand, p.text_secondary);
    let vx = s.width() as i32 - spec.version_from_right;
    s.text(styles.font(TextRole::FooterMono), vx, y, copy.version, side);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, PixelFormat};
    use crate::content::MONITOR;
    use crate::style::{FontSpec, Palette};

    fn styles() -> StyleTable {
        StyleTable::builtin(
            Palette::default(),
            &[
                FontSpec::new(TextRole::DownloadBadge, "x.ttf", 14.0),
                FontSpec::new(TextRole::Feature, "x.ttf", 22.0),
                FontSpec::new(TextRole::Footer, "x.ttf", 14.0),
            ],
        )
    }

    #[test]
    fn test_dot_grid_alpha() {
        let m = DotGrid::MONITOR;
        assert_eq!(m.alpha(0, 0), 40);
        assert_eq!(m.alpha(1, 1), 24);
        assert_eq!(m.alpha(2, 2), 10);
        let l = DotGrid::LAPTOP;
        assert_eq!(l.alpha(0, 0), 30);
        assert_eq!(l.alpha(2, 2), 10);
        assert_eq!(l.alpha(1, 2), 15);
    }

    #[test]
    fn test_dot_grid_origins() {
        assert_eq!(
            DotGrid::MONITOR.origins(2000, 2000),
            [(40, 40), (1930, 40), (40, 1900), (1930, 1900)]
        );
        assert_eq!(
            DotGrid::LAPTOP.origins(2000, 2000),
            [(50, 50), (1850, 50), (50, 1850), (1850, 1850)]
        );
    }

    #[test]
    fn test_dot_grids_paint_corners() {
        let bg = Palette::default().bg_primary;
        let mut canvas = Canvas::new(200, 200, bg);
        {
            let mut s = Surface::new(&mut canvas);
            dot_grids(&mut s, &DotGrid::MONITOR, Palette::default().accent_blue);
        }
        assert!(canvas.pixel(42, 42).b > bg.b);
        assert!(canvas.pixel(200 - 70 + 2, 200 - 100 + 2).b > bg.b);
        assert_eq!(canvas.pixel(100, 100), bg.opaque());
    }

    #[test]
    fn test_badge_rect() {
        let r = BadgeSpec::MONITOR.rect(2000, 100);
        assert_eq!(r.to_box(), (2000 - 124 - 60, 60, 2000 - 60, 92));
        let r = BadgeSpec::LAPTOP.rect(2000, 100);
        assert_eq!(r.to_box(), (2000 - 130 - 80, 80, 2000 - 80, 110));
    }

    #[test]
    fn test_download_badge_is_green() {
        let styles = styles();
        let p = *styles.palette();
        let mut canvas = Canvas::new(600, 200, p.bg_primary);
        let rect = {
            let mut s = Surface::new(&mut canvas);
            download_badge(&mut s, &styles, &BadgeSpec::MONITOR, "DIGITAL DOWNLOAD")
        };
        assert_eq!(rect.right(), 600 - 60 + 1);
        assert_eq!(canvas.pixel(rect.x + 4, rect.center_y()), p.accent_green.opaque());
    }

    #[test]
    fn test_feature_row_is_centred() {
        let cards = FeatureRow::MONITOR.cards(2000, 3);
        assert_eq!(cards[0].x, (2000 - (3 * 380 + 2 * 30)) / 2);
        assert_eq!(cards[2].right() + cards[0].x, 2000);
        let cards = FeatureRow::LAPTOP.cards(2000, 3);
        // 3 × 300 + 2 × 50 = 1000 wide.
        assert_eq!(cards[0].x, 500);
        assert_eq!(cards[1].x, 850);
        assert!(FeatureRow::LAPTOP.cards(2000, 0).is_empty());
    }

    #[test]
    fn test_feature_cards_outline_in_accent() {
        let styles = styles();
        let p = *styles.palette();
        let mut canvas = Canvas::new(2000, 1500, p.bg_primary);
        {
            let mut s = Surface::new(&mut canvas);
            feature_cards(&mut s, &styles, &FeatureRow::MONITOR, MONITOR.copy.features);
        }
        let first = FeatureRow::MONITOR.cards(2000, 3)[0];
        assert_eq!(canvas.pixel(first.x, first.center_y()), p.accent_blue.opaque());
        // Inner icon disc.
        assert_eq!(canvas.pixel(first.x + 26, first.y + 40), p.accent_blue.opaque());
    }

    #[test]
    fn test_centered_text_left_edge() {
        let styles = styles();
        let mut canvas = Canvas::new(400, 100, Palette::default().bg_primary);
        let mut s = Surface::new(&mut canvas);
        let font = styles.font(TextRole::Footer);
        let x = centered_text(&mut s, font, 10, "Blue", Palette::default().text_secondary);
        assert_eq!(x, (400 - font.measure("Blue")) / 2);
    }

    #[test]
    fn test_footer_draws_near_bottom() {
        let styles = styles();
        let bg = Palette::default().bg_primary;
        let mut canvas = Canvas::new(800, 300, bg);
        let dirty = {
            let mut s = Surface::new(&mut canvas);
            footer(&mut s, &styles, &FooterSpec::LAPTOP, &MONITOR.copy);
            s.dirty()
        };
        let dirty = dirty.expect("footer draws text");
        assert!(dirty.y1 >= 300 - 60);
        assert!(dirty.x1 >= 80);
    }
}
