//! The centered letter and its drop shadow.

use resvg::tiny_skia::{Pixmap, PixmapPaint, Transform};

use super::{LayerEffect, RenderContext};
use crate::font::GlyphRenderer;
use crate::icon::RectPx;
use crate::raster::{ink_bounds, tint};
use crate::style::GlyphStyle;

/// Where the letter landed on the canvas.
///
/// Recorded in the [`RenderContext`] by [`GlyphLayer`] after drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    /// Ink bounds of the letter (without shadow) in canvas pixels.
    pub ink: RectPx,
    /// True if the built-in block font drew the letter.
    pub builtin: bool,
}

/// Draws the letter centered on its measured ink, shadow first.
#[derive(Debug, Clone)]
pub struct GlyphLayer {
    pub style: GlyphStyle,
    pub renderer: GlyphRenderer,
}

impl GlyphLayer {
    pub fn new(style: GlyphStyle, renderer: GlyphRenderer) -> Self {
        Self { style, renderer }
    }

    /// Rasterizes the letter, falling back to the block font if the
    /// configured renderer draws nothing at this size.
    fn coverage(&self, ctx: &RenderContext) -> Option<(Pixmap, bool)> {
        let size = ctx.geometry.size;
        let font_size = ctx.geometry.glyph_size;
        self.renderer
            .rasterize(self.style.letter, font_size, size)
            .map(|p| (p, self.renderer.is_builtin()))
            .or_else(|| {
                GlyphRenderer::Builtin
                    .rasterize(self.style.letter, font_size, size)
                    .map(|p| (p, true))
            })
    }

    /// Integer offset that moves the ink center onto the canvas center.
    fn centering_offset(&self, ctx: &RenderContext, ink: RectPx) -> (i32, i32) {
        let (cx, cy) = ctx.geometry.center;
        let (ix, iy) = ink.center();
        ((cx - ix).round() as i32, (cy - iy).round() as i32)
    }
}

impl LayerEffect for GlyphLayer {
    fn name(&self) -> &'static str {
        "glyph"
    }

    fn transform(&self, ctx: &mut RenderContext) {
        let Some((coverage, builtin)) = self.coverage(ctx) else {
            log::warn!("glyph {:?} produced no ink", self.style.letter);
            return;
        };
        let Some(ink) = ink_bounds(&coverage) else {
            return;
        };
        let (dx, dy) = self.centering_offset(ctx, ink);
        let shadow_offset = ctx.geometry.shadow_offset.round() as i32;

        let paint = PixmapPaint::default();
        if let Some(shadow) = tint(&coverage, self.style.shadow_color) {
            ctx.pixmap.draw_pixmap(
                dx + shadow_offset,
                dy + shadow_offset,
                shadow.as_ref(),
                &paint,
                Transform::identity(),
                ctx.mask.as_ref(),
            );
        }
        if let Some(letter) = tint(&coverage, self.style.color) {
            ctx.pixmap.draw_pixmap(
                dx,
                dy,
                letter.as_ref(),
                &paint,
                Transform::identity(),
                ctx.mask.as_ref(),
            );
        }

        ctx.set(GlyphPlacement {
            ink: RectPx::new(
                (ink.x as i32 + dx).max(0) as u32,
                (ink.y as i32 + dy).max(0) as u32,
                ink.width,
                ink.height,
            ),
            builtin,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{self, FontSource};
    use crate::style::{Color, IconStyle};

    /// Draws only the letter, without shadow, onto an empty canvas.
    fn render_letter(renderer: GlyphRenderer, size: u32) -> RenderContext {
        let mut style = IconStyle::default().glyph;
        style.shadow_color = Color::new(0, 0, 0, 0);
        let layer = GlyphLayer::new(style, renderer);

        let mut ctx = RenderContext::new(IconStyle::default().geometry(size)).unwrap();
        layer.transform(&mut ctx);
        ctx
    }

    fn assert_centered(ctx: &RenderContext) {
        let size = ctx.geometry.size as f32;
        let ink = ink_bounds(&ctx.pixmap).expect("letter drew nothing");
        let (x, y) = ink.center();

        assert!((x - size / 2.0).abs() <= 1.0, "x center {x} for {size}px");
        assert!((y - size / 2.0).abs() <= 1.0, "y center {y} for {size}px");
        assert_eq!(ctx.get::<GlyphPlacement>().unwrap().ink, ink);
    }

    #[test]
    fn builtin_letter_is_centered() {
        for size in [64, 128, 301] {
            assert_centered(&render_letter(GlyphRenderer::Builtin, size));
        }
    }

    #[test]
    fn font_letter_is_centered() {
        // Uses whatever outline font this machine has; the block font
        // covers the case where there is none.
        let renderer = font::resolve(&FontSource::default_chain(), 'F', 64);
        for size in [128, 256] {
            assert_centered(&render_letter(renderer.clone(), size));
        }
    }

    #[test]
    fn letter_is_white() {
        let ctx = render_letter(GlyphRenderer::Builtin, 100);
        // The top-left corner of the block F is solid.
        let ink = ctx.get::<GlyphPlacement>().unwrap().ink;
        let p = ctx.pixmap.pixel(ink.x + 2, ink.y + 2).unwrap();
        assert_eq!([p.red(), p.green(), p.blue(), p.alpha()], [255, 255, 255, 255]);
    }

    #[test]
    fn shadow_is_offset_down_right() {
        let style = IconStyle::default();
        let layer = GlyphLayer::new(style.glyph.clone(), GlyphRenderer::Builtin);
        let mut ctx = RenderContext::new(style.geometry(400)).unwrap();
        layer.transform(&mut ctx);

        let ink = ctx.get::<GlyphPlacement>().unwrap().ink;
        let all = ink_bounds(&ctx.pixmap).unwrap();
        // 0.01 * 400 = 4px of shadow past the letter on the right and bottom.
        assert_eq!(all.x, ink.x);
        // Faint anti-aliased edges may vanish once tinted to 80 alpha.
        assert!((ink.right() + 3..=ink.right() + 4).contains(&all.right()));
        assert!((ink.bottom() + 3..=ink.bottom() + 4).contains(&all.bottom()));
    }
}
