//! focusflow-icon: Procedural application icon generator
//!
//! This crate draws the FocusFlow app icon from geometric primitives and
//! exports it in the formats a desktop application bundle needs.
//!
//! The icon is composed once at a master size, then every other asset is
//! resampled from that master:
//!
//! ```no_run
//! use focusflow_icon::{Exporter, IconComposer, IconStyle};
//!
//! let composer = IconComposer::new(IconStyle::default());
//! let master = composer.compose(1024)?;
//!
//! let report = Exporter::new("src-tauri/icons").export(&master)?;
//! for path in &report.written {
//!     println!("Saved: {}", path.display());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Styles
//!
//! Every color and proportion lives in [`IconStyle`], which round-trips
//! through JSON:
//!
//! ```
//! use focusflow_icon::{FontSource, IconComposer, IconStyle};
//!
//! let mut style = IconStyle::default();
//! style.glyph.letter = 'T';
//!
//! let composer = IconComposer::with_fonts(style, vec![FontSource::Builtin]);
//! let icon = composer.compose(48).unwrap();
//! assert_eq!(icon.dimensions().width, 48);
//! ```

mod composer;
mod error;
mod export;
mod font;
mod icon;
mod layer;
mod raster;
mod shape;
mod style;

pub use composer::IconComposer;
pub use error::{ComposeError, ExportError, StyleError};
pub use export::{
    Density, ExportPlan, ExportReport, ExportTarget, Exporter, IcnsPackager, IconUtil,
    PackageOutcome, list_generated_assets,
};
pub use font::{FontSource, GlyphRenderer, OutlineFont};
pub use icon::{IconImage, IconSet, RectPx, SizePx};
pub use layer::{GlyphPlacement, LayerEffect, LayerPipeline, RenderContext};
pub use style::{
    ArcStyle, Color, DiscStyle, Geometry, GlowStyle, GlyphStyle, GradientStyle, IconStyle,
    PlateGeometry, PlateStyle, Ring, TickStyle,
};
