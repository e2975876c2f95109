//! Device mockup frames.
//!
//! A frame is drawn back to front (shadow, body, screen, details) and
//! hands back the rectangle the interface mockup may draw into.

use log::debug;

use crate::canvas::Canvas;
use crate::color::Rgb8;
use crate::effects::drop_shadow;
use crate::layout::LayoutRect;
use crate::style::Palette;
use crate::surface::Surface;

const MONITOR_BODY: Rgb8 = Rgb8::new(45, 50, 60);
const MONITOR_OUTLINE: Rgb8 = Rgb8::new(70, 75, 85);
const MONITOR_CAMERA: Rgb8 = Rgb8::new(30, 35, 42);
const STAND_NECK: Rgb8 = Rgb8::new(40, 45, 55);
const STAND_OUTLINE: Rgb8 = Rgb8::new(60, 65, 75);

const LAPTOP_LID: Rgb8 = Rgb8::new(40, 44, 52);
const LAPTOP_OUTLINE: Rgb8 = Rgb8::new(60, 65, 75);
const LAPTOP_BASE: Rgb8 = Rgb8::new(35, 39, 47);
const LAPTOP_TRACKPAD: Rgb8 = Rgb8::new(45, 50, 58);

/// Monitor stand below the chin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandSpec {
    pub neck_width: i32,
    pub neck_height: i32,
    /// Horizontal inset of the neck's top edge on each side.
    pub neck_taper: i32,
    pub base_width: i32,
    pub base_height: i32,
    /// Distance from the frame bottom up to the top of the base.
    pub base_rise: i32,
    pub shadow_radius: f64,
    pub shadow_blur: f64,
    pub shadow_offset: (i32, i32),
    pub shadow_opacity: u8,
}

impl Default for StandSpec {
    fn default() -> Self {
        Self {
            neck_width: 80,
            neck_height: 35,
            neck_taper: 10,
            base_width: 200,
            base_height: 18,
            base_rise: 25,
            shadow_radius: 20.0,
            shadow_blur: 40.0,
            shadow_offset: (0, 20),
            shadow_opacity: 100,
        }
    }
}

/// Laptop keyboard deck below the lid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseSpec {
    /// Horizontal overhang of the deck's front edge past the lid.
    pub flare: i32,
    /// Inset of the deck's back edge from the lid sides.
    pub inset: i32,
    pub trackpad_width: i32,
    pub trackpad_top: i32,
    pub trackpad_bottom: i32,
}

impl Default for BaseSpec {
    fn default() -> Self {
        Self {
            flare: 40,
            inset: 20,
            trackpad_width: 120,
            trackpad_top: 8,
            trackpad_bottom: 22,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Device {
    Monitor { stand: StandSpec },
    Laptop { base: BaseSpec },
}

/// Placement and proportions of a device frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    pub origin: (i32, i32),
    pub width: i32,
    pub height: i32,
    /// Thickness of the border around the screen.
    pub bezel: i32,
    /// Padding between the screen edge and the returned content rect.
    pub content_margin: i32,
    /// Height below the body reserved for the stand or deck.
    pub chin: i32,
    pub body_radius: f64,
    pub screen_radius: f64,
    pub device: Device,
}

impl FrameSpec {
    /// 1500×950 monitor centred horizontally at y = 300.
    pub fn monitor(canvas_width: u32) -> Self {
        let width = 1500;
        Self {
            origin: ((canvas_width as i32 - width).div_euclid(2), 300),
            width,
            height: 950,
            bezel: 14,
            content_margin: 15,
            chin: 60,
            body_radius: 16.0,
            screen_radius: 8.0,
            device: Device::Monitor {
                stand: StandSpec::default(),
            },
        }
    }

    /// 1400×900 laptop centred horizontally at y = 320.
    pub fn laptop(canvas_width: u32) -> Self {
        let width = 1400;
        Self {
            origin: ((canvas_width as i32 - width).div_euclid(2), 320),
            width,
            height: 900,
            bezel: 12,
            content_margin: 10,
            chin: 30,
            body_radius: 15.0,
            screen_radius: 8.0,
            device: Device::Laptop {
                base: BaseSpec::default(),
            },
        }
    }

    /// Whole frame footprint, stand or deck included.
    pub fn outer(&self) -> LayoutRect {
        LayoutRect::new(self.origin.0, self.origin.1, self.width, self.height)
    }

    /// The device body: outer footprint minus the chin.
    pub fn body(&self) -> LayoutRect {
        self.outer().with_height((self.height - self.chin.max(0)).max(0))
    }

    pub fn screen(&self) -> LayoutRect {
        self.body().inset(self.bezel)
    }

    /// Rectangle for the interface mockup.
    pub fn content_rect(&self) -> LayoutRect {
        self.screen().inset(self.content_margin)
    }

    /// Non-negative insets and a body large enough to hold both bezels.
    pub fn is_valid(&self) -> bool {
        let body = self.body();
        self.bezel >= 0
            && self.content_margin >= 0
            && self.chin >= 0
            && self.chin <= self.height
            && body.w >= 2 * self.bezel
            && body.h >= 2 * self.bezel
    }
}

/// Draw the device described by `spec` and return its content rectangle.
pub fn draw_frame(canvas: &mut Canvas, spec: &FrameSpec, palette: &Palette) -> LayoutRect {
    let (x, y) = spec.origin;
    let (w, h) = (spec.width, spec.height);
    let body_box = LayoutRect::from_box(x, y, x + w, y + h - spec.chin);
    let b = spec.bezel;
    let screen_box = LayoutRect::from_box(x + b, y + b, x + w - b, y + h - spec.chin - b);

    match spec.device {
        Device::Monitor { stand } => {
            drop_shadow(
                canvas,
                body_box,
                stand.shadow_radius,
                stand.shadow_blur,
                stand.shadow_offset,
                stand.shadow_opacity,
            );

            let mut s = Surface::new(canvas);
            s.rounded_rect(
                body_box,
                spec.body_radius,
                Some(MONITOR_BODY.opaque()),
                Some((MONITOR_OUTLINE.opaque(), 2.0)),
            );
            s.fill_rounded_rect(screen_box, spec.screen_radius, palette.bg_primary);

            let cx = x + w / 2;
            s.fill_ellipse(LayoutRect::from_box(cx - 4, y + 5, cx + 4, y + 13), MONITOR_CAMERA);

            let neck_x = cx - stand.neck_width / 2;
            let neck_y = y + h - spec.chin;
            s.fill_polygon(
                &[
                    (neck_x + stand.neck_taper, neck_y),
                    (neck_x + stand.neck_width - stand.neck_taper, neck_y),
                    (neck_x + stand.neck_width, neck_y + stand.neck_height),
                    (neck_x, neck_y + stand.neck_height),
                ],
                STAND_NECK,
            );

            let base_x = cx - stand.base_width / 2;
            let base_y = y + h - stand.base_rise;
            s.rounded_rect(
                LayoutRect::from_box(base_x, base_y, base_x + stand.base_width, base_y + stand.base_height),
                8.0,
                Some(MONITOR_BODY.opaque()),
                Some((STAND_OUTLINE.opaque(), 1.0)),
            );
        }
        Device::Laptop { base } => {
            let mut s = Surface::new(canvas);
            s.rounded_rect(
                body_box,
                spec.body_radius,
                Some(LAPTOP_LID.opaque()),
                Some((LAPTOP_OUTLINE.opaque(), 2.0)),
            );
            s.fill_rounded_rect(screen_box, spec.screen_radius, palette.bg_primary);

            let deck_y = y + h - spec.chin;
            s.fill_polygon(
                &[
                    (x - base.flare, deck_y + spec.chin),
                    (x + base.inset, deck_y),
                    (x + w - base.inset, deck_y),
                    (x + w + base.flare, deck_y + spec.chin),
                ],
                LAPTOP_BASE,
            );

            let cx = x + w / 2;
            let half = base.trackpad_width / 2;
            s.fill_rounded_rect(
                LayoutRect::from_box(cx - half, deck_y + base.trackpad_top, cx + half, deck_y + base.trackpad_bottom),
                3.0,
                LAPTOP_TRACKPAD,
            );
        }
    }

    let content = spec.content_rect();
    debug!(
        "Frame {:?} at ({}, {}): content {}x{} at ({}, {})",
        match spec.device {
            Device::Monitor { .. } => "monitor",
            Device::Laptop { .. } => "laptop",
        },
        x,
        y,
        content.w,
        content.h,
        content.x,
        content.y
    );
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelFormat;

    fn inside_by_bezel(spec: &FrameSpec) -> bool {
        let outer = spec.outer();
        let c = spec.content_rect();
        c.x >= outer.x + spec.bezel
            && c.y >= outer.y + spec.bezel
            && c.right() <= outer.right() - spec.bezel
            && c.bottom() <= outer.bottom() - spec.bezel
            && c.w >= 0
            && c.h >= 0
    }

    #[test]
    fn test_preset_content_rects() {
        let m = FrameSpec::monitor(2000);
        assert_eq!(m.origin, (250, 300));
        assert_eq!(m.content_rect(), LayoutRect::new(279, 329, 1442, 832));
        let l = FrameSpec::laptop(2000);
        assert_eq!(l.origin, (300, 320));
        assert_eq!(l.content_rect(), LayoutRect::new(322, 342, 1356, 826));
    }

    #[test]
    fn test_content_inside_for_valid_configs() {
        for bezel in [0, 1, 5, 14, 40] {
            for margin in [0, 3, 15, 100, 700] {
                for chin in [0, 30, 60] {
                    let mut spec = FrameSpec::monitor(2000);
                    spec.bezel = bezel;
                    spec.content_margin = margin;
                    spec.chin = chin;
                    assert!(spec.is_valid());
                    assert!(inside_by_bezel(&spec), "bezel {bezel} margin {margin} chin {chin}");
                }
            }
        }
    }

    #[test]
    fn test_invalid_configs_detected() {
        let mut spec = FrameSpec::laptop(2000);
        spec.bezel = 500;
        assert!(!spec.is_valid());
        // Still never produces a negative size.
        assert!(spec.content_rect().w >= 0 && spec.content_rect().h >= 0);
        spec.bezel = -1;
        assert!(!spec.is_valid());
    }

    #[test]
    fn test_draw_monitor_returns_content_and_paints_screen() {
        let palette = Palette::default();
        let mut canvas = Canvas::new(2000, 1300, Rgb8::new(90, 90, 90));
        let spec = FrameSpec::monitor(2000);
        let content = draw_frame(&mut canvas, &spec, &palette);
        assert_eq!(content, spec.content_rect());
        assert_eq!(canvas.pixel(content.center_x(), content.center_y()), palette.bg_primary.opaque());
        // Bezel colour between the outer edge and the screen.
        assert_eq!(canvas.pixel(spec.origin.0 + 7, 600), MONITOR_BODY.opaque());
        // Stand neck below the body.
        assert_eq!(canvas.pixel(1000, 300 + 950 - 40), STAND_NECK.opaque());
    }

    #[test]
    fn test_draw_laptop_deck() {
        let palette = Palette::default();
        let mut canvas = Canvas::new(2000, 1300, palette.bg_primary);
        let spec = FrameSpec::laptop(2000);
        let content = draw_frame(&mut canvas, &spec, &palette);
        assert_eq!(content, spec.content_rect());
        // Deck flares past the lid.
        assert_eq!(canvas.pixel(300 - 20, 320 + 900 - 3), LAPTOP_BASE.opaque());
        assert_eq!(canvas.pixel(1000, 320 + 870 + 15), LAPTOP_TRACKPAD.opaque());
    }
}
