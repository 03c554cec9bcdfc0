//! Pixel-level helpers around tiny-skia pixmaps.
//!
//! Composition happens on premultiplied [`Pixmap`]s; the finished canvas is
//! converted into a straight-alpha [`RgbaImage`] for encoding.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{ColorU8, Paint, Pixmap};

use crate::icon::RectPx;
use crate::style::Color;

/// Builds an anti-aliased solid paint from a style color.
pub fn solid_paint(color: Color) -> Paint<'static> {
    let (r, g, b, a) = color.into_components();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

/// Converts a tiny-skia Pixmap to an image::RgbaImage.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let mut img = RgbaImage::new(width, pixmap.height());

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        // tiny_skia uses premultiplied alpha, we need to unpremultiply
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        img.put_pixel(x, y, Rgba([r, g, b, a]));
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

/// Multiplies color by alpha in place, for filtering without dark fringes.
pub fn premultiply_image(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let scale = |c: u8| ((c as u32 * a as u32 + 127) / 255) as u8;
        pixel.0 = [scale(r), scale(g), scale(b), a];
    }
}

/// Inverse of [`premultiply_image`].
///
/// Color channels that filtering pushed above their alpha are clamped.
pub fn unpremultiply_image(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let (r, g, b, a) = unpremultiply(r, g, b, a);
        pixel.0 = [r, g, b, a];
    }
}

/// Returns the bounding box of every pixel with non-zero alpha.
pub fn ink_bounds(pixmap: &Pixmap) -> Option<RectPx> {
    let width = pixmap.width();
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        if pixel.alpha() == 0 {
            continue;
        }
        let x = i as u32 % width;
        let y = i as u32 / width;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    (min_x != u32::MAX).then(|| RectPx::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Recolors a coverage pixmap.
///
/// Each output pixel takes `color`, with its alpha scaled by the coverage
/// (source alpha) of the input pixel.
pub fn tint(coverage: &Pixmap, color: Color) -> Option<Pixmap> {
    let (r, g, b, a) = color.into_components();
    let mut out = Pixmap::new(coverage.width(), coverage.height())?;

    for (dst, src) in out.pixels_mut().iter_mut().zip(coverage.pixels()) {
        let cov = src.alpha() as u32;
        if cov == 0 {
            continue;
        }
        let alpha = (a as u32 * cov + 127) / 255;
        *dst = ColorU8::from_rgba(r, g, b, alpha as u8).premultiply();
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia::{PremultipliedColorU8, Rect, Transform};

    #[test]
    fn unpremultiply_roundtrip() {
        assert_eq!(unpremultiply(0, 0, 0, 0), (0, 0, 0, 0));
        assert_eq!(unpremultiply(40, 20, 0, 51), (200, 100, 0, 51));
        assert_eq!(unpremultiply(10, 20, 30, 255), (10, 20, 30, 255));
    }

    #[test]
    fn image_premultiply_and_back() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 0, 51]));
        premultiply_image(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [40, 20, 0, 51]);

        unpremultiply_image(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [200, 100, 0, 51]);
    }

    #[test]
    fn unpremultiply_clamps_overshoot() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([90, 0, 0, 60]));
        unpremultiply_image(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 60]);
    }

    #[test]
    fn converts_premultiplied_pixels() {
        let mut pixmap = Pixmap::new(2, 1).unwrap();
        pixmap.pixels_mut()[1] = PremultipliedColorU8::from_rgba(100, 0, 0, 100).unwrap();

        let img = pixmap_to_rgba_image(&pixmap);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 0, 0, 100]);
    }

    #[test]
    fn ink_bounds_of_filled_rect() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let rect = Rect::from_xywh(3.0, 5.0, 4.0, 6.0).unwrap();
        let mut paint = solid_paint(Color::new(255, 255, 255, 255));
        paint.anti_alias = false;
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);

        assert_eq!(ink_bounds(&pixmap), Some(RectPx::new(3, 5, 4, 6)));
    }

    #[test]
    fn ink_bounds_of_empty_pixmap() {
        let pixmap = Pixmap::new(4, 4).unwrap();
        assert_eq!(ink_bounds(&pixmap), None);
    }

    #[test]
    fn tint_scales_alpha_by_coverage() {
        let mut coverage = Pixmap::new(2, 1).unwrap();
        coverage.pixels_mut()[0] = PremultipliedColorU8::from_rgba(255, 255, 255, 255).unwrap();

        let shadow = tint(&coverage, Color::new(0, 0, 0, 80)).unwrap();
        assert_eq!(shadow.pixels()[0].alpha(), 80);
        assert_eq!(shadow.pixels()[1].alpha(), 0);
    }
}
