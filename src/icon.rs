//! Icon image types shared by the composer and the exporter.
//!
//! An [`IconImage`] is one finished raster plus its display density. An
//! [`IconSet`] groups the rasters that end up inside a single container
//! file (one `.ico`, one `.iconset` directory).

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::raster::{premultiply_image, unpremultiply_image};

/// A rectangle defined in pixel coordinates.
///
/// Used for the rounded plate bounds and for glyph ink bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: u32,
    /// Y offset from the top edge of the image
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Returns the center of the rectangle in continuous pixel space.
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A single icon raster with its display density.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in straight (non-premultiplied) RGBA.
    pub data: RgbaImage,

    /// The display scale factor.
    ///
    /// - 1.0 for standard resolution (@1x)
    /// - 2.0 for double density (@2x)
    ///
    /// The "logical" size of the icon is `dimensions / scale`.
    pub scale: f32,
}

impl IconImage {
    /// Creates a new icon image with the given data and scale.
    pub fn new(data: RgbaImage, scale: f32) -> Self {
        Self { data, scale }
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Downsamples (or copies) this image to a square of `pixels` per side.
    ///
    /// Uses Lanczos3 so that thin strokes do not alias. Filtering runs on
    /// premultiplied pixels, otherwise the transparent surroundings would
    /// bleed black into the plate edge. When the requested size matches the
    /// source the pixels are copied untouched.
    pub fn resampled(&self, pixels: u32, scale: f32) -> IconImage {
        if self.data.width() == pixels && self.data.height() == pixels {
            return IconImage::new(self.data.clone(), scale);
        }

        let mut source = self.data.clone();
        premultiply_image(&mut source);
        let mut data = imageops::resize(&source, pixels, pixels, FilterType::Lanczos3);
        unpremultiply_image(&mut data);
        IconImage::new(data, scale)
    }
}

/// A collection of rasters representing one icon at several sizes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconSet {
    /// The individual icon images, in insertion order.
    pub images: Vec<IconImage>,
}

impl IconSet {
    /// Creates an icon set from a vector of images.
    pub fn from_images(images: Vec<IconImage>) -> Self {
        Self { images }
    }

    /// Resamples `master` once per entry of `sizes`, all at scale 1.0.
    pub fn resampled_from(master: &IconImage, sizes: &[u32]) -> Self {
        Self::from_images(sizes.iter().map(|&s| master.resampled(s, 1.0)).collect())
    }

    /// Returns the number of images in the set.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns true if the icon set contains no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Returns an iterator over the icon images.
    pub fn iter(&self) -> impl Iterator<Item = &IconImage> {
        self.images.iter()
    }
}

impl<'a> IntoIterator for &'a IconSet {
    type Item = &'a IconImage;
    type IntoIter = std::slice::Iter<'a, IconImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
