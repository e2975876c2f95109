//! Blurred overlays: drop shadows and glows.
//!
//! Each effect draws onto a transparent canvas the size of the base, blurs
//! only the region that holds ink (grown by the blur reach), and composites
//! that region over the base. The base itself is never blurred.

use log::debug;

use crate::basics::RectI;
use crate::blur::{gaussian_blur, stack_radius_for_sigma};
use crate::canvas::Canvas;
use crate::color::Rgb8;
use crate::font::Font;
use crate::layout::LayoutRect;
use crate::surface::Surface;

/// Alphas of the three concentric layers of `glow_rounded_rect`.
const GLOW_LAYER_ALPHAS: [u8; 3] = [30, 20, 10];
const GLOW_LAYER_STEP: i32 = 5;

/// Blur `overlay` around `dirty` and composite it over `base`.
pub fn composite_blurred(base: &mut Canvas, overlay: &mut Canvas, dirty: RectI, blur_radius: f64) {
    let reach = stack_radius_for_sigma(blur_radius) as i32 + 1;
    let mut region = dirty.expand(reach);
    if !region.clip(&overlay.bounds()) {
        return;
    }
    gaussian_blur(overlay, blur_radius, region);
    base.composite_over(overlay, region);
}

/// Draw with `draw` on a fresh overlay, blur it by `blur_radius` and
/// composite it over `base`. Returns the composited region.
pub fn glow<F>(base: &mut Canvas, blur_radius: f64, draw: F) -> Option<RectI>
where
    F: FnOnce(&mut Surface<'_>),
{
    let mut overlay = Canvas::transparent(base.width(), base.height());
    let dirty = {
        let mut surface = Surface::new(&mut overlay);
        draw(&mut surface);
        surface.dirty()
    }?;
    debug!(
        "Glow: blur {:.1} over {}x{} at ({}, {})",
        blur_radius,
        dirty.width(),
        dirty.height(),
        dirty.x1,
        dirty.y1
    );
    composite_blurred(base, &mut overlay, dirty, blur_radius);
    Some(dirty)
}

/// Soft black shadow of a rounded rectangle, moved by `offset` and blurred.
/// `opacity` is the shadow's alpha before blurring.
pub fn drop_shadow(
    base: &mut Canvas,
    shape: LayoutRect,
    corner_radius: f64,
    blur_radius: f64,
    offset: (i32, i32),
    opacity: u8,
) -> Option<RectI> {
    let shadow = shape.translate(offset.0, offset.1);
    glow(base, blur_radius, |s| {
        s.fill_rounded_rect(shadow, corner_radius, Rgb8::new(0, 0, 0).with_alpha(opacity));
    })
}

/// Halo of `color` behind a rounded rectangle: three concentric layers,
/// each five pixels larger and fainter than the last, then blurred.
pub fn glow_rounded_rect(
    base: &mut Canvas,
    rect: LayoutRect,
    corner_radius: f64,
    color: Rgb8,
    blur_radius: f64,
) -> Option<RectI> {
    glow(base, blur_radius, |s| {
        for (i, &alpha) in GLOW_LAYER_ALPHAS.iter().enumerate() {
            let grow = i as i32 * GLOW_LAYER_STEP;
            s.fill_rounded_rect(
                rect.expand(grow),
                corner_radius + grow as f64,
                color.with_alpha(alpha),
            );
        }
    })
}

/// Blurred copy of a line of text, drawn behind where the text will go.
pub fn text_glow(
    base: &mut Canvas,
    font: &Font,
    origin: (i32, i32),
    text: &str,
    color: Rgb8,
    alpha: u8,
    blur_radius: f64,
) -> Option<RectI> {
    glow(base, blur_radius, |s| {
        s.text(font, origin.0, origin.1, text, color.with_alpha(alpha));
    })
}
