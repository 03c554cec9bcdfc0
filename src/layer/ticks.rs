//! Timer tick dots.

use resvg::tiny_skia::{FillRule, Transform};

use super::{LayerEffect, RenderContext};
use crate::raster::solid_paint;
use crate::shape;
use crate::style::Color;

/// Small dots at the compass points of the emblem.
#[derive(Debug, Clone)]
pub struct TickLayer {
    pub color: Color,
}

impl TickLayer {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl LayerEffect for TickLayer {
    fn name(&self) -> &'static str {
        "ticks"
    }

    fn transform(&self, ctx: &mut RenderContext) {
        let paint = solid_paint(self.color);
        let radius = ctx.geometry.tick_radius;

        for &(x, y) in &ctx.geometry.ticks {
            if let Some(dot) = shape::circle(x, y, radius) {
                ctx.pixmap.fill_path(
                    &dot,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    ctx.mask.as_ref(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ink_bounds;
    use crate::style::IconStyle;

    fn render(size: u32) -> RenderContext {
        let style = IconStyle::default();
        let mut ctx = RenderContext::new(style.geometry(size)).unwrap();
        TickLayer::new(style.ticks.color).transform(&mut ctx);
        ctx
    }

    #[test]
    fn dots_have_quarter_turn_symmetry() {
        let ctx = render(1000);
        let (cx, cy) = ctx.geometry.center;
        let ticks = &ctx.geometry.ticks;
        assert_eq!(ticks.len(), 4);

        for (i, &(x, y)) in ticks.iter().enumerate() {
            // Rotating each dot 90° clockwise about the center gives the next.
            let (rx, ry) = (cx - (y - cy), cy + (x - cx));
            let (nx, ny) = ticks[(i + 1) % 4];
            assert!((rx - nx).abs() < 1e-2 && (ry - ny).abs() < 1e-2);

            let distance = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
            assert!((distance - 350.0).abs() < 1e-2);
        }
    }

    #[test]
    fn rendered_dots_are_symmetric() {
        let size = 1000;
        let ctx = render(size);
        let ink = ink_bounds(&ctx.pixmap).unwrap();

        // Outermost dot edges: 0.35N + 0.015N from center on every side.
        let reach = 365.0;
        let c = size as f32 / 2.0;
        assert!((ink.x as f32 - (c - reach)).abs() <= 1.0);
        assert!((ink.y as f32 - (c - reach)).abs() <= 1.0);
        assert!((ink.right() as f32 - (c + reach)).abs() <= 1.0);
        assert!((ink.bottom() as f32 - (c + reach)).abs() <= 1.0);
    }

    #[test]
    fn dot_centers_carry_tick_color() {
        let ctx = render(400);
        for &(x, y) in &ctx.geometry.ticks {
            let p = ctx.pixmap.pixel(x as u32, y as u32).unwrap();
            assert_eq!(p.alpha(), 180);
        }
    }
}
