//! Interface mockup drawn inside a device screen.
//!
//! Two layouts share one entry point. `Compact` is a title bar with
//! window controls over a card row and a full-width invoice table.
//! `Full` adds a navigation bar, card captions, a narrower table and two
//! side panels (quick actions and a low-stock alert).

use log::debug;

use crate::color::Rgb8;
use crate::content::{DashboardContent, InvoiceRow, InvoiceStatus, StatCard};
use crate::layout::{card_row, LayoutRect};
use crate::style::{StyleTable, TextRole};
use crate::surface::Surface;

pub use crate::content::status_color;

const WINDOW_CONTROLS: [Rgb8; 3] = [
    Rgb8::new(255, 95, 86),
    Rgb8::new(255, 189, 46),
    Rgb8::new(39, 201, 63),
];

/// Column offsets of the full table, relative to its text inset.
const FULL_COLUMNS: [i32; 5] = [0, 110, 250, 340, 420];
/// Column offsets of the compact table, relative to the content edge.
const COMPACT_COLUMNS: [i32; 4] = [10, 120, 280, 380];
/// Longest client name the full table shows.
const CLIENT_MAX_CHARS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardVariant {
    Compact,
    Full,
}

impl DashboardVariant {
    /// Vertical distance between invoice rows.
    pub fn row_height(&self) -> i32 {
        match self {
            DashboardVariant::Compact => 38,
            DashboardVariant::Full => 40,
        }
    }
}

/// Draw the dashboard into `screen`.
pub fn draw_dashboard(
    s: &mut Surface<'_>,
    screen: LayoutRect,
    styles: &StyleTable,
    content: &DashboardContent,
    variant: DashboardVariant,
) {
    debug!(
        "Dashboard {:?} in {}x{} at ({}, {}): {} cards, {} invoices",
        variant,
        screen.w,
        screen.h,
        screen.x,
        screen.y,
        content.cards.len(),
        content.invoices.len()
    );
    match variant {
        DashboardVariant::Compact => draw_compact(s, screen, styles, content),
        DashboardVariant::Full => draw_full(s, screen, styles, content),
    }
}

/// First `max` characters of `text`.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}

fn status_tint(styles: &StyleTable, status: InvoiceStatus) -> Rgb8 {
    styles.palette().accent(status.accent())
}

// ============================================================================
// Compact
// ============================================================================

fn draw_compact(s: &mut Surface<'_>, r: LayoutRect, styles: &StyleTable, content: &DashboardContent) {
    let p = styles.palette();
    let (x, y, w) = (r.x, r.y, r.w);

    let header_h = 45;
    s.fill_rounded_rect(LayoutRect::from_box(x, y, x + w, y + header_h), 6.0, p.bg_secondary);
    s.text(styles.font(TextRole::NavTitle), x + 15, y + 10, content.app_name, p.text_primary);
    for (i, color) in WINDOW_CONTROLS.iter().enumerate() {
        let dx = x + w - 80 + i as i32 * 22;
        s.fill_ellipse(LayoutRect::from_box(dx, y + 15, dx + 15, y + 30), *color);
    }

    let cx = x + 15;
    let cw = w - 30;
    let mut cy = y + header_h + 15;

    s.text(styles.font(TextRole::PageTitle), cx, cy, content.page_title, p.text_primary);
    cy += 40;

    let card_h = 70;
    let cards = card_row(cx, cy, cw, content.cards.len() as i32, 10, card_h);
    for (rect, card) in cards.iter().zip(content.cards) {
        draw_compact_card(s, styles, *rect, card);
    }
    cy += card_h + 20;

    s.text(styles.font(TextRole::SectionTitle), cx, cy, content.table_title, p.text_primary);
    cy += 30;

    s.fill_rounded_rect(LayoutRect::from_box(cx, cy, cx + cw, cy + 28), 4.0, p.bg_tertiary);
    let header_font = styles.font(TextRole::TableHeader);
    for (label, off) in content.columns.iter().zip(COMPACT_COLUMNS) {
        s.text(header_font, cx + off, cy + 6, label, p.text_secondary);
    }
    cy += 35;

    for row in content.invoices {
        draw_compact_row(s, styles, cx, cy, cw, row);
        cy += DashboardVariant::Compact.row_height();
    }
}

fn draw_compact_card(s: &mut Surface<'_>, styles: &StyleTable, rect: LayoutRect, card: &StatCard) {
    let p = styles.palette();
    let (cx, cy) = (rect.x, rect.y);
    s.rounded_rect(
        LayoutRect::from_box(cx, cy, rect.right(), rect.bottom()),
        8.0,
        Some(p.bg_secondary.opaque()),
        Some((p.border.opaque(), 1.0)),
    );
    s.text(styles.font(TextRole::CardLabel), cx + 10, cy + 8, card.label, p.text_secondary);
    s.text(styles.font(TextRole::CardValue), cx + 10, cy + 30, card.value, p.accent(card.accent));
}

fn draw_compact_row(s: &mut Surface<'_>, styles: &StyleTable, x: i32, y: i32, w: i32, row: &InvoiceRow) {
    let p = styles.palette();
    let cols = COMPACT_COLUMNS.map(|off| x + off);
    let mono = styles.font(TextRole::MonoTable);

    s.fill_rounded_rect(LayoutRect::from_box(x, y, x + w, y + 32), 4.0, p.bg_secondary);
    s.text(mono, cols[0], y + 8, row.number, p.accent_blue);
    s.text(styles.font(TextRole::TableCell), cols[1], y + 8, row.client, p.text_primary);
    s.text(mono, cols[2], y + 8, row.amount, p.text_primary);

    let tint = status_tint(styles, row.status);
    s.fill_rounded_rect(LayoutRect::from_box(cols[3], y + 5, cols[3] + 65, y + 26), 10.0, tint.with_alpha(40));
    s.text(styles.font(TextRole::Badge), cols[3] + 10, y + 7, row.status.label(), tint);
}

// ============================================================================
// Full
// ============================================================================

fn draw_full(s: &mut Surface<'_>, r: LayoutRect, styles: &StyleTable, content: &DashboardContent) {
    let p = styles.palette();
    let (x, y, w) = (r.x, r.y, r.w);

    let nav_h = 50;
    draw_nav(s, r, styles, content, nav_h);

    let mut cy = y + nav_h + 20;
    s.text(styles.font(TextRole::PageTitle), x + 20, cy, content.page_title, p.text_primary);
    cy += 50;

    let card_h = 90;
    let cards = card_row(x + 20, cy, w - 40, content.cards.len() as i32, 15, card_h);
    for (rect, card) in cards.iter().zip(content.cards) {
        draw_full_card(s, styles, *rect, card);
    }
    cy += card_h + 25;

    let panels = FullPanels::new(x, cy, w);
    draw_invoice_panel(s, styles, content, panels.invoices);
    draw_actions_panel(s, styles, content, panels.actions);
    draw_stock_panel(s, styles, content, panels.stock);
}

/// The three panels below the card row of the full variant. Panels are
/// painted over inclusive corners, one pixel past `right()`/`bottom()`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FullPanels {
    invoices: LayoutRect,
    actions: LayoutRect,
    stock: LayoutRect,
}

impl FullPanels {
    /// Panels for a screen at `x`, `w` wide, starting at row `y`.
    fn new(x: i32, y: i32, w: i32) -> Self {
        let section_w = (w as f64 * 0.62) as i32 - 30;
        let side = LayoutRect::new(x + 20 + section_w + 15, y, w - section_w - 55, 0);
        Self {
            invoices: LayoutRect::new(x + 20, y, section_w, 280),
            actions: side.with_height(130),
            stock: side.translate(0, 145).with_height(135),
        }
    }
}

fn draw_nav(s: &mut Surface<'_>, r: LayoutRect, styles: &StyleTable, content: &DashboardContent, nav_h: i32) {
    let p = styles.palette();
    let (x, y, w) = (r.x, r.y, r.w);

    s.fill_rect(LayoutRect::from_box(x, y, x + w, y + nav_h), p.bg_secondary);
    s.fill_ellipse(LayoutRect::from_box(x + 12, y + 16, x + 24, y + 34), p.accent_blue);
    s.text(styles.font(TextRole::NavTitle), x + 32, y + 13, content.app_name, p.text_primary);

    let item_font = styles.font(TextRole::NavItem);
    let mut nav_x = x + 200;
    for item in content.nav_items {
        let active = *item == content.active_nav;
        if active {
            let item_w = item_font.measure(item);
            s.fill_rounded_rect(
                LayoutRect::from_box(nav_x - 8, y + 10, nav_x + item_w + 8, y + 40),
                6.0,
                p.bg_elevated,
            );
        }
        let color = if active { p.text_primary } else { p.text_secondary };
        s.text(item_font, nav_x, y + 15, item, color);
        nav_x += 90;
    }

    let chip_x = x + w - 180;
    s.fill_rounded_rect(LayoutRect::from_box(chip_x, y + 10, chip_x + 165, y + 40), 6.0, p.bg_tertiary);
    s.text(styles.font(TextRole::MonoSmall), chip_x + 10, y + 14, content.collected, p.accent_green);
    s.text(styles.font(TextRole::Tiny), chip_x + 85, y + 18, content.collected_label, p.text_muted);
}

fn draw_full_card(s: &mut Surface<'_>, styles: &StyleTable, rect: LayoutRect, card: &StatCard) {
    let p = styles.palette();
    let (cx, cy) = (rect.x, rect.y);
    let accent = p.accent(card.accent);

    s.rounded_rect(
        LayoutRect::from_box(cx, cy, rect.right(), rect.bottom()),
        10.0,
        Some(p.bg_secondary.opaque()),
        Some((p.border.opaque(), 1.0)),
    );
    s.fill_rect(LayoutRect::from_box(cx + 15, cy + 8, cx + 45, cy + 11), accent);
    s.text(styles.font(TextRole::CardLabel), cx + 15, cy + 20, card.label, p.text_secondary);

    let value_font = styles.font(TextRole::CardValue);
    match card.icon {
        Some(icon) => {
            s.text(styles.font(TextRole::Small), cx + 15, cy + 42, icon, accent);
            s.text(value_font, cx + 32, cy + 40, card.value, accent);
        }
        None => {
            s.text(value_font, cx + 15, cy + 40, card.value, accent);
        }
    }
    if let Some(caption) = card.caption {
        s.text(styles.font(TextRole::Tiny), cx + 15, cy + 68, caption, p.text_muted);
    }
}

fn draw_invoice_panel(s: &mut Surface<'_>, styles: &StyleTable, content: &DashboardContent, panel: LayoutRect) {
    let p = styles.palette();
    let (x, y) = (panel.x, panel.y);
    let (right, bottom) = (panel.right(), panel.bottom());
    let text_x = x + 15;

    s.rounded_rect(
        LayoutRect::from_box(x, y, right, bottom),
        10.0,
        Some(p.bg_secondary.opaque()),
        Some((p.border.opaque(), 1.0)),
    );
    s.text(styles.font(TextRole::SectionTitle), text_x, y + 15, content.table_title, p.text_primary);

    let mut ty = y + 50;
    let header_font = styles.font(TextRole::TableHeader);
    for (label, off) in content.columns.iter().zip(FULL_COLUMNS) {
        s.text(header_font, text_x + off, ty, label, p.text_muted);
    }
    ty += 28;
    s.line(&[(text_x, ty), (right - 15, ty)], 1.0, p.border);
    ty += 10;

    let mono = styles.font(TextRole::MonoTable);
    let cell = styles.font(TextRole::TableCell);
    let cols = FULL_COLUMNS.map(|off| text_x + off);
    for row in content.invoices {
        let tint = status_tint(styles, row.status);
        if row.status == InvoiceStatus::Overdue {
            s.fill_rect(LayoutRect::from_box(x + 5, ty - 2, right - 10, ty + 32), tint.with_alpha(8));
        }
        s.text(mono, cols[0], ty + 6, row.number, p.accent_blue);
        s.text(cell, cols[1], ty + 6, truncate_chars(row.client, CLIENT_MAX_CHARS), p.text_primary);
        if let Some(date) = row.date {
            s.text(cell, cols[2], ty + 6, date, p.text_secondary);
        }
        s.text(mono, cols[3], ty + 6, row.amount, p.text_primary);

        let badge_x = cols[4];
        s.fill_rounded_rect(LayoutRect::from_box(badge_x, ty + 4, badge_x + 60, ty + 26), 12.0, tint.with_alpha(30));
        s.text(styles.font(TextRole::Badge), badge_x + 8, ty + 6, row.status.label(), tint);

        ty += DashboardVariant::Full.row_height();
    }
}

fn draw_actions_panel(s: &mut Surface<'_>, styles: &StyleTable, content: &DashboardContent, panel: LayoutRect) {
    let p = styles.palette();
    let (x, y) = (panel.x, panel.y);
    s.rounded_rect(
        LayoutRect::from_box(x, y, panel.right(), panel.bottom()),
        10.0,
        Some(p.bg_secondary.opaque()),
        Some((p.border.opaque(), 1.0)),
    );
    s.text(styles.font(TextRole::SectionTitle), x + 15, y + 15, content.actions_title, p.text_primary);

    let font = styles.font(TextRole::Button);
    let mut btn_y = y + 50;
    for action in content.actions {
        let color = p.accent(action.accent);
        s.rounded_rect(
            LayoutRect::from_box(x + 15, btn_y, panel.right() - 15, btn_y + 30),
            6.0,
            Some(p.bg_tertiary.opaque()),
            Some((color.opaque(), 1.0)),
        );
        s.text(font, x + 25, btn_y + 6, action.label, color);
        btn_y += 38;
    }
}

fn draw_stock_panel(s: &mut Surface<'_>, styles: &StyleTable, content: &DashboardContent, panel: LayoutRect) {
    let p = styles.palette();
    let (x, y) = (panel.x, panel.y);
    s.rounded_rect(
        LayoutRect::from_box(x, y, panel.right(), panel.bottom()),
        10.0,
        Some(p.bg_secondary.opaque()),
        Some((p.accent_yellow.opaque(), 1.0)),
    );
    s.text(styles.font(TextRole::SectionTitle), x + 15, y + 12, content.stock_title, p.accent_yellow);

    let small = styles.font(TextRole::Small);
    let tiny = styles.font(TextRole::Tiny);
    let mut item_y = y + 45;
    for item in content.low_stock {
        s.text(small, x + 15, item_y, item.name, p.text_primary);
        s.text(tiny, x + 15, item_y + 18, item.quantity, p.accent_yellow);
        s.text(tiny, x + 70, item_y + 18, item.reorder, p.text_muted);
        item_y += 45;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{Canvas, PixelFormat};
    use crate::content::{LAPTOP, MONITOR};
    use crate::style::{FontSpec, Palette};

    fn styles() -> StyleTable {
        let specs = [
            FontSpec::new(TextRole::PageTitle, "x.ttf", 24.0),
            FontSpec::new(TextRole::CardValue, "x.ttf", 16.0),
        ];
        StyleTable::builtin(Palette::default(), &specs)
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Tech Solutions LLC", 16), "Tech Solutions L");
        assert_eq!(truncate_chars("Smith & Co.", 16), "Smith & Co.");
        assert_eq!(truncate_chars("\u{e9}\u{e9}\u{e9}", 2), "\u{e9}\u{e9}");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_row_height() {
        assert_eq!(DashboardVariant::Compact.row_height(), 38);
        assert_eq!(DashboardVariant::Full.row_height(), 40);
    }

    #[test]
    fn test_reexported_status_color() {
        assert_eq!(status_color("Overdue"), Some(Palette::default().accent_red));
        assert_eq!(status_color("Void"), None);
    }

    #[test]
    fn test_full_dashboard_draws_nav_and_cards() {
        let styles = styles();
        let p = *styles.palette();
        let mut canvas = Canvas::new(1500, 900, p.bg_primary);
        let screen = LayoutRect::new(20, 20, 1442, 832);
        {
            let mut s = Surface::new(&mut canvas);
            draw_dashboard(&mut s, screen, &styles, &MONITOR.dashboard, DashboardVariant::Full);
        }
        // Nav band background away from any text.
        assert_eq!(canvas.pixel(screen.x + 150, screen.y + 4), p.bg_secondary.opaque());
        // First card accent bar.
        let card_y = screen.y + 50 + 20 + 50;
        assert_eq!(canvas.pixel(screen.x + 20 + 30, card_y + 9), p.accent_blue.opaque());
        // Stock alert outline is yellow.
        let stock = FullPanels::new(screen.x, card_y + 90 + 25, screen.w).stock;
        assert_eq!(canvas.pixel(stock.x, stock.y + 60), p.accent_yellow.opaque());
    }

    #[test]
    fn test_compact_dashboard_draws_header_and_rows() {
        let styles = styles();
        let p = *styles.palette();
        let mut canvas = Canvas::new(1400, 900, p.bg_primary);
        let screen = LayoutRect::new(10, 10, 1356, 826);
        {
            let mut s = Surface::new(&mut canvas);
            draw_dashboard(&mut s, screen, &styles, &LAPTOP.dashboard, DashboardVariant::Compact);
        }
        // Red window control centre.
        let dot_x = screen.x + screen.w - 80 + 7;
        assert_eq!(canvas.pixel(dot_x, screen.y + 22), WINDOW_CONTROLS[0].opaque());
        // Table header band.
        let header_y = screen.y + 45 + 15 + 40 + 70 + 20 + 30;
        assert_eq!(canvas.pixel(screen.x + 15 + 300, header_y + 2), p.bg_tertiary.opaque());
        // Right end of the first invoice row.
        let row_y = header_y + 35;
        assert_eq!(canvas.pixel(screen.right() - 30, row_y + 16), p.bg_secondary.opaque());
    }

    #[test]
    fn test_full_panels_do_not_overlap() {
        let screen = LayoutRect::new(279, 329, 1442, 832);
        let panels = FullPanels::new(screen.x, screen.y + 235, screen.w);
        // Painted extents end one pixel past right()/bottom().
        assert!(panels.invoices.right() < panels.actions.x);
        assert!(panels.invoices.right() < panels.stock.x);
        assert!(panels.actions.bottom() < panels.stock.y);
        assert_eq!(panels.actions.x, panels.stock.x);
        for panel in [panels.invoices, panels.actions, panels.stock] {
            assert!(panel.w > 0 && panel.h > 0);
            assert!(panel.right() < screen.right());
            assert!(panel.bottom() < screen.bottom());
        }
    }

    #[test]
    fn test_dashboard_clips_at_canvas_edge() {
        let styles = styles();
        let mut canvas = Canvas::new(64, 64, Palette::default().bg_primary);
        let mut s = Surface::new(&mut canvas);
        draw_dashboard(&mut s, LayoutRect::new(-300, -100, 1442, 832), &styles, &MONITOR.dashboard, DashboardVariant::Full);
        draw_dashboard(&mut s, LayoutRect::new(40, 40, 1356, 826), &styles, &LAPTOP.dashboard, DashboardVariant::Compact);
    }
}
