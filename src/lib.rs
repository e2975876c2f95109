//! # listing-render
//!
//! Deterministic renderer for product listing images: a mock application
//! screen inside a device frame, surrounded by marketing text and soft
//! effects, written out as an opaque RGB PNG.
//!
//! ## Architecture
//!
//! Every image goes through one forward pipeline:
//!
//! 1. **Canvas**: premultiplied RGBA buffer filled with the background
//! 2. **Background**: glow gradient and edge vignette
//! 3. **Frame**: monitor or laptop silhouette; yields the screen rectangle
//! 4. **Dashboard**: interface mockup laid out inside the screen
//! 5. **Decorations**: blurred shadows and glows, badges, feature cards
//! 6. **Finalize**: flatten onto the background and drop alpha
//!
//! Shapes and glyph outlines are rasterized by an anti-aliased scanline
//! rasterizer with 24.8 fixed-point cells and blended source-over.
//!
//! ## Quick start
//!
//! ```no_run
//! use listing_render::config::RenderConfig;
//! use listing_render::output::write_png;
//! use listing_render::scene::render;
//!
//! let config = RenderConfig::default();
//! let image = render(&config).unwrap();
//! write_png(&image, &config.output, config.optimize).unwrap();
//! ```

// Rasterization core
pub mod basics;
pub mod color;
pub mod path;
pub mod rasterizer;
pub mod renderer;
pub mod scanline;
pub mod shapes;

// Pixel buffer and drawing
pub mod blur;
pub mod canvas;
pub mod surface;

// Text
pub mod builtin_font;
pub mod font;
pub mod font_engine;

// Scene description
pub mod content;
pub mod layout;
pub mod style;

// Pipeline stages
pub mod background;
pub mod dashboard;
pub mod decoration;
pub mod effects;
pub mod finalize;
pub mod frame;
pub mod scene;

// Configuration and I/O
pub mod config;
pub mod error;
pub mod output;

pub use error::{Error, Result};
