//! Gradient fill and rounded-plate mask.

use resvg::tiny_skia::{ColorU8, FillRule, Mask, Transform};

use super::{LayerEffect, RenderContext};
use crate::shape;
use crate::style::{Color, GradientStyle};

/// Fills the canvas with a vertical gradient, then cuts it to the plate.
///
/// The plate mask is stored in the context so later layers clip to it.
#[derive(Debug, Clone)]
pub struct BackgroundLayer {
    pub gradient: GradientStyle,
}

impl BackgroundLayer {
    pub fn new(gradient: GradientStyle) -> Self {
        Self { gradient }
    }
}

impl LayerEffect for BackgroundLayer {
    fn name(&self) -> &'static str {
        "background"
    }

    fn transform(&self, ctx: &mut RenderContext) {
        let size = ctx.pixmap.width();

        for (y, row) in ctx.pixmap.pixels_mut().chunks_exact_mut(size as usize).enumerate() {
            let t = y as f32 / size as f32;
            let (r, g, b, a) = gradient_row(self.gradient.top, self.gradient.bottom, t);
            row.fill(ColorU8::from_rgba(r, g, b, a).premultiply());
        }

        let plate = ctx.geometry.plate;
        let Some(path) = shape::rounded_rect(plate.left, plate.top, plate.right, plate.bottom, plate.radius)
        else {
            return;
        };
        let Some(mut mask) = Mask::new(size, size) else {
            return;
        };
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
        ctx.pixmap.apply_mask(&mask);
        ctx.mask = Some(mask);
    }
}

/// Per-channel linear interpolation, truncated toward zero.
pub fn gradient_row(top: Color, bottom: Color, t: f32) -> (u8, u8, u8, u8) {
    let lerp = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
    (
        lerp(top.red, bottom.red),
        lerp(top.green, bottom.green),
        lerp(top.blue, bottom.blue),
        lerp(top.alpha, bottom.alpha),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::IconStyle;

    fn render(size: u32) -> RenderContext {
        let style = IconStyle::default();
        let mut ctx = RenderContext::new(style.geometry(size)).unwrap();
        BackgroundLayer::new(style.gradient).transform(&mut ctx);
        ctx
    }

    #[test]
    fn gradient_endpoints() {
        let style = GradientStyle::default();
        assert_eq!(gradient_row(style.top, style.bottom, 0.0), (88, 28, 135, 255));
        // Row 512 of 1024: 88*0.5 + 59*0.5 = 73.5 truncates to 73.
        assert_eq!(gradient_row(style.top, style.bottom, 0.5), (73, 17, 117, 255));
    }

    #[test]
    fn center_is_opaque_gradient() {
        let ctx = render(100);
        let center = ctx.pixmap.pixel(50, 50).unwrap();
        let expected = gradient_row(GradientStyle::default().top, GradientStyle::default().bottom, 0.5);

        assert_eq!(center.alpha(), 255);
        assert_eq!((center.red(), center.green(), center.blue()), (expected.0, expected.1, expected.2));
    }

    #[test]
    fn outside_plate_is_transparent() {
        let ctx = render(100);

        // Padding strip along every edge.
        for i in 0..100 {
            assert_eq!(ctx.pixmap.pixel(i, 2).unwrap().alpha(), 0);
            assert_eq!(ctx.pixmap.pixel(2, i).unwrap().alpha(), 0);
            assert_eq!(ctx.pixmap.pixel(i, 97).unwrap().alpha(), 0);
            assert_eq!(ctx.pixmap.pixel(97, i).unwrap().alpha(), 0);
        }
        // Cut-away corner just inside the plate bounds.
        assert_eq!(ctx.pixmap.pixel(10, 10).unwrap().alpha(), 0);
    }

    #[test]
    fn mask_is_stored() {
        let ctx = render(32);
        assert!(ctx.mask.is_some());
    }
}
