//! Scene composition: the two listing presets as one forward pipeline.
//!
//! Each preset runs the same stages in order (background, hero text,
//! device frame, dashboard, decorations) and differs only in the data fed
//! to them. The canvas is flattened to RGB at the end.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::background::{paint_edge_vignette, paint_glow, Falloff};
use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::content::{Content, LAPTOP, MONITOR};
use crate::dashboard::{draw_dashboard, DashboardVariant};
use crate::decoration::{
    centered_text, dot_grids, download_badge, feature_cards, footer, BadgeSpec, DotGrid, FeatureRow,
    FooterSpec,
};
use crate::effects::text_glow;
use crate::error::{Error, Result};
use crate::finalize::{flatten, RgbImage};
use crate::frame::{draw_frame, FrameSpec};
use crate::layout::centered;
use crate::style::{FontSpec, Palette, StyleTable, TextRole};
use crate::surface::Surface;

const BIG_SHOULDERS_BOLD: &str = "BigShoulders-Bold.ttf";
const SANS_REGULAR: &str = "InstrumentSans-Regular.ttf";
const SANS_BOLD: &str = "InstrumentSans-Bold.ttf";
const SANS_ITALIC: &str = "InstrumentSans-Italic.ttf";
const MONO_REGULAR: &str = "JetBrainsMono-Regular.ttf";
const MONO_BOLD: &str = "JetBrainsMono-Bold.ttf";

const LAPTOP_FONTS: &[FontSpec] = &[
    FontSpec::new(TextRole::Hero, BIG_SHOULDERS_BOLD, 120.0),
    FontSpec::new(TextRole::Tagline, SANS_REGULAR, 42.0),
    FontSpec::new(TextRole::Slogan, SANS_ITALIC, 32.0),
    FontSpec::new(TextRole::NavTitle, SANS_BOLD, 22.0),
    FontSpec::new(TextRole::PageTitle, SANS_BOLD, 26.0),
    FontSpec::new(TextRole::SectionTitle, SANS_BOLD, 18.0),
    FontSpec::new(TextRole::CardLabel, SANS_REGULAR, 11.0),
    FontSpec::new(TextRole::CardValue, MONO_BOLD, 20.0),
    FontSpec::new(TextRole::TableHeader, SANS_BOLD, 10.0),
    FontSpec::new(TextRole::TableCell, SANS_REGULAR, 14.0),
    FontSpec::new(TextRole::MonoTable, MONO_REGULAR, 13.0),
    FontSpec::new(TextRole::Badge, SANS_REGULAR, 11.0),
    FontSpec::new(TextRole::Feature, SANS_REGULAR, 28.0),
    FontSpec::new(TextRole::DownloadBadge, SANS_BOLD, 10.0),
    FontSpec::new(TextRole::Footer, SANS_REGULAR, 11.0),
    FontSpec::new(TextRole::FooterMono, MONO_REGULAR, 13.0),
];

const MONITOR_FONTS: &[FontSpec] = &[
    FontSpec::new(TextRole::Hero, BIG_SHOULDERS_BOLD, 140.0),
    FontSpec::new(TextRole::Tagline, SANS_REGULAR, 38.0),
    FontSpec::new(TextRole::Slogan, SANS_REGULAR, 38.0),
    FontSpec::new(TextRole::NavTitle, SANS_BOLD, 18.0),
    FontSpec::new(TextRole::NavItem, SANS_REGULAR, 14.0),
    FontSpec::new(TextRole::PageTitle, SANS_BOLD, 28.0),
    FontSpec::new(TextRole::SectionTitle, SANS_BOLD, 16.0),
    FontSpec::new(TextRole::CardLabel, SANS_REGULAR, 12.0),
    FontSpec::new(TextRole::CardValue, MONO_BOLD, 24.0),
    FontSpec::new(TextRole::TableHeader, SANS_BOLD, 11.0),
    FontSpec::new(TextRole::TableCell, SANS_REGULAR, 13.0),
    FontSpec::new(TextRole::MonoTable, MONO_REGULAR, 12.0),
    FontSpec::new(TextRole::MonoSmall, MONO_BOLD, 14.0),
    FontSpec::new(TextRole::Small, SANS_REGULAR, 13.0),
    FontSpec::new(TextRole::Tiny, SANS_REGULAR, 10.0),
    FontSpec::new(TextRole::Badge, SANS_BOLD, 10.0),
    FontSpec::new(TextRole::Button, SANS_REGULAR, 12.0),
    FontSpec::new(TextRole::Feature, SANS_BOLD, 22.0),
    FontSpec::new(TextRole::FeatureDesc, SANS_REGULAR, 14.0),
    FontSpec::new(TextRole::DownloadBadge, SANS_BOLD, 14.0),
    FontSpec::new(TextRole::Footer, SANS_REGULAR, 14.0),
    FontSpec::new(TextRole::FooterMono, MONO_REGULAR, 13.0),
];

/// Which listing scene to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Laptop mockup with the compact dashboard.
    Laptop,
    /// Monitor mockup with the full dashboard and side panels.
    #[default]
    Monitor,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Laptop, Preset::Monitor];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Laptop => "laptop",
            Preset::Monitor => "monitor",
        }
    }

    pub fn font_specs(&self) -> &'static [FontSpec] {
        match self {
            Preset::Laptop => LAPTOP_FONTS,
            Preset::Monitor => MONITOR_FONTS,
        }
    }

    pub fn content(&self) -> &'static Content {
        match self {
            Preset::Laptop => &LAPTOP,
            Preset::Monitor => &MONITOR,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "laptop" => Ok(Preset::Laptop),
            "monitor" => Ok(Preset::Monitor),
            _ => Err(Error::UnknownPreset(s.to_string())),
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Render the scene described by `config`, loading fonts from its font
/// directory.
pub fn render(config: &RenderConfig) -> Result<RgbImage> {
    config.validate()?;
    let styles = StyleTable::load(&config.font_dir, Palette::default(), config.preset.font_specs());
    info!(
        "Rendering {} preset at {}x{}",
        config.preset, config.width, config.height
    );
    Ok(render_with_styles(config.preset, config.width, config.height, &styles))
}

/// Render `preset` with an already built style table. Dimensions are
/// assumed valid.
pub fn render_with_styles(preset: Preset, width: u32, height: u32, styles: &StyleTable) -> RgbImage {
    let bg = styles.palette().bg_primary;
    let mut canvas = Canvas::new(width, height, bg);
    match preset {
        Preset::Laptop => compose_laptop(&mut canvas, styles, preset.content()),
        Preset::Monitor => compose_monitor(&mut canvas, styles, preset.content()),
    }
    debug!("Flattening {}x{} canvas", width, height);
    flatten(&canvas, bg)
}

fn compose_monitor(canvas: &mut Canvas, styles: &StyleTable, content: &Content) {
    let p = *styles.palette();
    let copy = &content.copy;
    let width = canvas.width();

    debug!("Stage: background");
    paint_glow(canvas, p.accent_blue, 20, 400, Falloff::Radial { dampening: 0.7 });

    debug!("Stage: hero");
    let hero = styles.font(TextRole::Hero);
    let title_x = centered(0, width as i32, hero.measure(copy.title));
    let title_y = 70;
    text_glow(canvas, hero, (title_x, title_y), copy.title, p.accent_blue, 60, 15.0);
    {
        let mut s = Surface::new(canvas);
        s.text(hero, title_x, title_y, copy.title, p.text_primary);
        centered_text(&mut s, styles.font(TextRole::Tagline), 220, copy.tagline, p.text_secondary);
    }

    debug!("Stage: frame");
    let screen = draw_frame(canvas, &FrameSpec::monitor(width), &p);

    debug!("Stage: dashboard and decorations");
    let mut s = Surface::new(canvas);
    draw_dashboard(&mut s, screen, styles, &content.dashboard, DashboardVariant::Full);
    feature_cards(&mut s, styles, &FeatureRow::MONITOR, copy.features);
    centered_text(&mut s, styles.font(TextRole::Slogan), 1480, copy.slogan, p.text_muted);
    download_badge(&mut s, styles, &BadgeSpec::MONITOR, copy.badge);
    footer(&mut s, styles, &FooterSpec::MONITOR, copy);
    dot_grids(&mut s, &DotGrid::MONITOR, p.accent_blue);
}

/// Copies of the laptop title drawn under the final one.
const LAPTOP_TITLE_GLOW_PASSES: usize = 4;

fn compose_laptop(canvas: &mut Canvas, styles: &StyleTable, content: &Content) {
    let p = *styles.palette();
    let copy = &content.copy;
    let (width, height) = (canvas.width(), canvas.height());

    debug!("Stage: background");
    paint_glow(canvas, p.accent_blue, 25, height, Falloff::Linear);

    debug!("Stage: hero");
    {
        let mut s = Surface::new(canvas);
        let hero = styles.font(TextRole::Hero);
        let title_x = centered(0, width as i32, hero.measure(copy.title));
        for _ in 0..LAPTOP_TITLE_GLOW_PASSES {
            s.text(hero, title_x, 100, copy.title, p.accent_blue.with_alpha(15));
        }
        s.text(hero, title_x, 100, copy.title, p.text_primary);
        centered_text(&mut s, styles.font(TextRole::Tagline), 230, copy.tagline, p.text_secondary);
    }

    debug!("Stage: frame");
    let screen = draw_frame(canvas, &FrameSpec::laptop(width), &p);

    debug!("Stage: dashboard and decorations");
    {
        let mut s = Surface::new(canvas);
        draw_dashboard(&mut s, screen, styles, &content.dashboard, DashboardVariant::Compact);
        feature_cards(&mut s, styles, &FeatureRow::LAPTOP, copy.features);
        centered_text(&mut s, styles.font(TextRole::Slogan), 1450, copy.slogan, p.text_secondary);
        dot_grids(&mut s, &DotGrid::LAPTOP, p.accent_blue);
    }

    paint_edge_vignette(canvas, 50, 2);

    let mut s = Surface::new(canvas);
    download_badge(&mut s, styles, &BadgeSpec::LAPTOP, copy.badge);
    footer(&mut s, styles, &FooterSpec::LAPTOP, copy);
}
