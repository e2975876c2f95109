//! Style table: the palette and the fonts a scene draws with.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::color::Rgb8;
use crate::font::{Font, FontLoader};

// ============================================================================
// Palette
// ============================================================================

/// Named colours shared by every stage of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub bg_primary: Rgb8,
    pub bg_secondary: Rgb8,
    pub bg_tertiary: Rgb8,
    pub bg_elevated: Rgb8,
    pub accent_blue: Rgb8,
    pub accent_blue_dim: Rgb8,
    pub accent_green: Rgb8,
    pub accent_yellow: Rgb8,
    pub accent_red: Rgb8,
    pub text_primary: Rgb8,
    pub text_secondary: Rgb8,
    pub text_muted: Rgb8,
    pub border: Rgb8,
}

impl Palette {
    /// Dark "digital precision" theme.
    pub const DIGITAL_PRECISION: Palette = Palette {
        bg_primary: Rgb8::new(13, 17, 23),
        bg_secondary: Rgb8::new(22, 27, 34),
        bg_tertiary: Rgb8::new(33, 38, 45),
        bg_elevated: Rgb8::new(40, 46, 56),
        accent_blue: Rgb8::new(88, 166, 255),
        accent_blue_dim: Rgb8::new(56, 139, 253),
        accent_green: Rgb8::new(63, 185, 80),
        accent_yellow: Rgb8::new(210, 153, 34),
        accent_red: Rgb8::new(248, 81, 73),
        text_primary: Rgb8::new(230, 237, 243),
        text_secondary: Rgb8::new(139, 148, 158),
        text_muted: Rgb8::new(110, 118, 129),
        border: Rgb8::new(48, 54, 61),
    };

    pub fn accent(&self, accent: Accent) -> Rgb8 {
        match accent {
            Accent::Blue => self.accent_blue,
            Accent::Green => self.accent_green,
            Accent::Yellow => self.accent_yellow,
            Accent::Red => self.accent_red,
            Accent::Neutral => self.text_secondary,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DIGITAL_PRECISION
    }
}

/// Semantic highlight colour for content items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accent {
    Blue,
    Green,
    Yellow,
    Red,
    Neutral,
}

// ============================================================================
// Fonts
// ============================================================================

/// What a piece of text is for. Each preset maps roles to font files and
/// sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextRole {
    Hero,
    Tagline,
    Slogan,
    NavTitle,
    NavItem,
    PageTitle,
    SectionTitle,
    CardLabel,
    CardValue,
    TableHeader,
    TableCell,
    MonoTable,
    MonoSmall,
    Small,
    Tiny,
    Badge,
    Button,
    Feature,
    FeatureDesc,
    DownloadBadge,
    Footer,
    FooterMono,
}

/// A font file and pixel size for one role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub role: TextRole,
    pub file: &'static str,
    pub size: f64,
}

impl FontSpec {
    pub const fn new(role: TextRole, file: &'static str, size: f64) -> Self {
        Self { role, file, size }
    }
}

/// Read-only mapping from roles to loaded fonts, plus the palette.
#[derive(Debug)]
pub struct StyleTable {
    palette: Palette,
    fonts: BTreeMap<TextRole, Font>,
    fallback: Font,
}

impl StyleTable {
    /// Load every spec from `font_dir`. Files that cannot be used fall back
    /// to the built-in face, so this always succeeds.
    pub fn load(font_dir: &Path, palette: Palette, specs: &[FontSpec]) -> Self {
        let mut loader = FontLoader::new(font_dir);
        let fonts: BTreeMap<TextRole, Font> = specs
            .iter()
            .map(|spec| (spec.role, loader.load(spec.file, spec.size)))
            .collect();
        let builtin = fonts.values().filter(|f| f.is_builtin()).count();
        debug!(
            "Style table: {} fonts from {} ({} built-in)",
            fonts.len(),
            font_dir.display(),
            builtin
        );
        Self {
            palette,
            fonts,
            fallback: Font::builtin(12.0),
        }
    }

    /// Every role on the built-in face, without touching the file system.
    pub fn builtin(palette: Palette, specs: &[FontSpec]) -> Self {
        Self {
            palette,
            fonts: specs
                .iter()
                .map(|spec| (spec.role, Font::builtin(spec.size)))
                .collect(),
            fallback: Font::builtin(12.0),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Font for `role`; roles the preset does not list get a 12 px
    /// built-in face.
    pub fn font(&self, role: TextRole) -> &Font {
        self.fonts.get(&role).unwrap_or(&self.fallback)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
