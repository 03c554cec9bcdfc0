//! Glow rings, the two discs and the progress arc.

use resvg::tiny_skia::{FillRule, LineCap, Path, Stroke, Transform};

use super::{LayerEffect, RenderContext};
use crate::raster::solid_paint;
use crate::shape;
use crate::style::{ArcStyle, Color, DiscStyle, GlowStyle, Ring};

/// The timer emblem behind the glyph.
#[derive(Debug, Clone)]
pub struct EmblemLayer {
    pub glow: GlowStyle,
    pub discs: DiscStyle,
    pub arc: ArcStyle,
}

impl EmblemLayer {
    pub fn new(glow: GlowStyle, discs: DiscStyle, arc: ArcStyle) -> Self {
        Self { glow, discs, arc }
    }
}

impl LayerEffect for EmblemLayer {
    fn name(&self) -> &'static str {
        "emblem"
    }

    fn transform(&self, ctx: &mut RenderContext) {
        let (cx, cy) = ctx.geometry.center;

        for ring in ctx.geometry.glow_rings.clone() {
            let path = inset_centerline(ring).and_then(|r| shape::circle(cx, cy, r));
            stroke(ctx, path, ring.width, self.glow.color);
        }

        let outer = ctx.geometry.outer_disc;
        let inner = ctx.geometry.inner_disc;
        fill(ctx, shape::circle(cx, cy, outer), self.discs.outer_color);
        fill(ctx, shape::circle(cx, cy, inner), self.discs.inner_color);

        let arc = ctx.geometry.arc;
        let path = inset_centerline(arc)
            .and_then(|r| shape::arc(cx, cy, r, self.arc.start_degrees, self.arc.sweep_degrees));
        stroke(ctx, path, arc.width, self.arc.color);
    }
}

/// Outlines grow inward from their radius, so the stroke centerline sits
/// half a width inside it.
fn inset_centerline(ring: Ring) -> Option<f32> {
    let r = ring.radius - ring.width / 2.0;
    (ring.width > 0.0 && r > 0.0).then_some(r)
}

fn fill(ctx: &mut RenderContext, path: Option<Path>, color: Color) {
    let Some(path) = path else { return };
    let paint = solid_paint(color);
    ctx.pixmap
        .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), ctx.mask.as_ref());
}

fn stroke(ctx: &mut RenderContext, path: Option<Path>, width: f32, color: Color) {
    let Some(path) = path else { return };
    let paint = solid_paint(color);
    let stroke = Stroke {
        width,
        line_cap: LineCap::Butt,
        ..Stroke::default()
    };
    ctx.pixmap
        .stroke_path(&path, &paint, &stroke, Transform::identity(), ctx.mask.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::IconStyle;

    fn render(size: u32) -> RenderContext {
        let style = IconStyle::default();
        let mut ctx = RenderContext::new(style.geometry(size)).unwrap();
        EmblemLayer::new(style.glow, style.discs, style.arc).transform(&mut ctx);
        ctx
    }

    fn rgba(ctx: &RenderContext, x: u32, y: u32) -> [u8; 4] {
        let p = ctx.pixmap.pixel(x, y).unwrap();
        [p.red(), p.green(), p.blue(), p.alpha()]
    }

    #[test]
    fn centerline_is_inset() {
        let r = inset_centerline(Ring { radius: 10.0, width: 4.0 }).unwrap();
        assert_eq!(r, 8.0);
        assert!(inset_centerline(Ring { radius: 10.0, width: 0.0 }).is_none());
    }

    #[test]
    fn inner_disc_at_center() {
        let ctx = render(200);
        assert_eq!(rgba(&ctx, 100, 100), [109, 40, 217, 255]);
    }

    #[test]
    fn outer_disc_band() {
        // Between the inner disc (48px) and the outer disc (56px).
        let ctx = render(200);
        assert_eq!(rgba(&ctx, 100 + 52, 100), [139, 92, 246, 255]);
    }

    #[test]
    fn arc_leaves_upper_left_gap() {
        let ctx = render(200);
        // Arc centerline radius is 42 - 4 = 38 px.
        let offset = (38.0 / std::f32::consts::SQRT_2) as u32;

        // Lower-right quadrant is covered by the arc.
        assert_eq!(rgba(&ctx, 100 + offset, 100 + offset), [196, 181, 253, 255]);
        // Upper-left quadrant shows the inner disc.
        assert_eq!(rgba(&ctx, 100 - offset, 100 - offset), [109, 40, 217, 255]);
    }

    #[test]
    fn glow_is_translucent() {
        // Without a background the glow ring is the only thing at ~0.32N - w/2.
        let ctx = render(1000);
        let p = ctx.pixmap.pixel(500 + 310, 500).unwrap();
        assert!(p.alpha() > 0 && p.alpha() < 255);
    }
}
