//! Layer infrastructure for icon composition.
//!
//! The icon is drawn as an ordered stack of layers. Each layer implements
//! [`LayerEffect`] and draws itself onto the shared [`RenderContext`].
//!
//! Besides the canvas, the context carries a typed property bag, so a layer
//! can record results (such as where the glyph landed) for downstream layers
//! and callers without the layers knowing about each other.

pub mod background;
pub mod emblem;
pub mod glyph;
pub mod ticks;

pub use background::BackgroundLayer;
pub use emblem::EmblemLayer;
pub use glyph::{GlyphLayer, GlyphPlacement};
pub use ticks::TickLayer;

use std::any::{Any, TypeId};
use std::collections::HashMap;

use resvg::tiny_skia::{Mask, Pixmap};

use crate::font::GlyphRenderer;
use crate::style::{Geometry, IconStyle};

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the rendering pipeline.
///
/// Layers draw onto [`pixmap`](Self::pixmap) and clip to
/// [`mask`](Self::mask) once the background layer has produced it.
///
/// # Example
///
/// ```ignore
/// // The glyph layer records where the letter ended up
/// ctx.set(GlyphPlacement { ink, builtin });
///
/// // Callers read it back after rendering
/// if let Some(placement) = ctx.get::<GlyphPlacement>() {
///     // ...
/// }
/// ```
pub struct RenderContext {
    /// The canvas, in premultiplied RGBA.
    pub pixmap: Pixmap,

    /// Every ratio of the style resolved for this canvas size.
    pub geometry: Geometry,

    /// The rounded-plate coverage mask. `None` until the background runs.
    pub mask: Option<Mask>,

    /// Typed property bag for inter-layer communication.
    properties: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl RenderContext {
    /// Allocates a transparent canvas for `geometry`.
    ///
    /// Returns `None` if the pixmap cannot be allocated.
    pub fn new(geometry: Geometry) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(geometry.size, geometry.size)?,
            geometry,
            mask: None,
            properties: HashMap::new(),
        })
    }

    /// Sets a typed property that downstream layers can read.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        self.properties.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Gets a typed property set by an upstream layer.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.properties
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// Trait for layers that know how to draw themselves.
pub trait LayerEffect {
    /// Short name used in debug logs.
    fn name(&self) -> &'static str;

    /// Draw onto the canvas in the render context.
    ///
    /// Layers drawn after the background should clip to
    /// [`RenderContext::mask`] so nothing lands outside the plate.
    fn transform(&self, ctx: &mut RenderContext);
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// The fixed layer stack, bottom to top.
///
/// ```text
/// ┌────────────┐
/// │ Background │ ◄── gradient fill, then rounded-plate alpha mask
/// └─────┬──────┘
///       ▼
/// ┌────────────┐
/// │   Emblem   │ ◄── glow rings, two discs, progress arc
/// └─────┬──────┘
///       ▼
/// ┌────────────┐
/// │   Glyph    │ ◄── shadow then letter, centered on ink bounds
/// └─────┬──────┘
///       ▼
/// ┌────────────┐
/// │   Ticks    │ ◄── four marker dots
/// └────────────┘
/// ```
pub struct LayerPipeline {
    pub background: BackgroundLayer,
    pub emblem: EmblemLayer,
    pub glyph: GlyphLayer,
    pub ticks: TickLayer,
}

impl LayerPipeline {
    /// Builds the stack for `style`, drawing the letter with `renderer`.
    pub fn new(style: &IconStyle, renderer: GlyphRenderer) -> Self {
        Self {
            background: BackgroundLayer::new(style.gradient.clone()),
            emblem: EmblemLayer::new(style.glow.clone(), style.discs.clone(), style.arc.clone()),
            glyph: GlyphLayer::new(style.glyph.clone(), renderer),
            ticks: TickLayer::new(style.ticks.color),
        }
    }

    fn layers(&self) -> [&dyn LayerEffect; 4] {
        [
            &self.background as &dyn LayerEffect,
            &self.emblem,
            &self.glyph,
            &self.ticks,
        ]
    }

    /// Applies every layer in order.
    pub fn render(&self, ctx: &mut RenderContext) {
        for layer in self.layers() {
            log::debug!("{}: drawing at {}px", layer.name(), ctx.geometry.size);
            layer.transform(ctx);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
