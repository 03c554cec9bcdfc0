//! Icon composition: style + fonts in, finished raster out.

use std::cell::OnceCell;

use crate::error::ComposeError;
use crate::font::{self, FontSource, GlyphRenderer};
use crate::icon::{IconImage, IconSet};
use crate::layer::{LayerPipeline, RenderContext};
use crate::raster::pixmap_to_rgba_image;
use crate::style::IconStyle;

/// Canvas size used to check that a font can actually draw the letter.
const FONT_PROBE_SIZE: u32 = 64;

// ============================================================================
// IconComposer
// ============================================================================

/// Draws the icon at any requested size.
///
/// `IconComposer` owns an immutable [`IconStyle`] and an ordered font chain.
/// The font chain is resolved lazily on first use and the result is reused
/// for every later size.
///
/// # Layer Pipeline
///
/// 1. **Background** - vertical gradient, cut to the rounded plate
/// 2. **Emblem** - glow rings, two discs and the progress arc
/// 3. **Glyph** - drop shadow, then the letter, centered on its ink
/// 4. **Ticks** - four marker dots
///
/// # Example
///
/// ```
/// use focusflow_icon::{FontSource, IconComposer, IconStyle};
///
/// let composer = IconComposer::with_fonts(IconStyle::default(), vec![FontSource::Builtin]);
/// let icon = composer.compose(64).unwrap();
/// assert_eq!(icon.dimensions().width, 64);
/// ```
pub struct IconComposer {
    style: IconStyle,
    fonts: Vec<FontSource>,
    renderer: OnceCell<GlyphRenderer>,
}

impl IconComposer {
    /// Creates a composer using the default font chain.
    pub fn new(style: IconStyle) -> Self {
        Self::with_fonts(style, FontSource::default_chain())
    }

    /// Creates a composer with an explicit font chain.
    ///
    /// The built-in renderer is used if no source in `fonts` can draw the
    /// letter, so the chain does not need to end with [`FontSource::Builtin`].
    pub fn with_fonts(style: IconStyle, fonts: Vec<FontSource>) -> Self {
        Self {
            style,
            fonts,
            renderer: OnceCell::new(),
        }
    }

    /// Returns the style this composer draws with.
    pub fn style(&self) -> &IconStyle {
        &self.style
    }

    /// Returns the resolved glyph renderer, resolving the chain on first call.
    pub fn glyph_renderer(&self) -> &GlyphRenderer {
        self.renderer
            .get_or_init(|| font::resolve(&self.fonts, self.style.glyph.letter, FONT_PROBE_SIZE))
    }

    /// Runs the full layer pipeline and returns the raw render context.
    ///
    /// Useful when the caller needs layer outputs such as
    /// [`GlyphPlacement`](crate::GlyphPlacement) in addition to pixels.
    pub fn render_context(&self, size: u32) -> Result<RenderContext, ComposeError> {
        if size == 0 {
            return Err(ComposeError::InvalidSize(size));
        }

        let mut ctx = RenderContext::new(self.style.geometry(size))
            .ok_or(ComposeError::Allocation(size))?;
        let pipeline = LayerPipeline::new(&self.style, self.glyph_renderer().clone());
        pipeline.render(&mut ctx);
        Ok(ctx)
    }

    /// Composes the icon as a `size`x`size` straight-alpha image.
    pub fn compose(&self, size: u32) -> Result<IconImage, ComposeError> {
        let ctx = self.render_context(size)?;
        log::debug!("composed {size}x{size} icon");
        Ok(IconImage::new(pixmap_to_rgba_image(&ctx.pixmap), 1.0))
    }

    /// Composes the icon directly at each size, without resampling.
    pub fn compose_set(&self, sizes: &[u32]) -> Result<IconSet, ComposeError> {
        sizes
            .iter()
            .map(|&size| self.compose(size))
            .collect::<Result<Vec<_>, _>>()
            .map(IconSet::from_images)
    }
}

impl Default for IconComposer {
    fn default() -> Self {
        Self::new(IconStyle::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
