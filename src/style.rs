//! Immutable style configuration for the composed icon.
//!
//! [`IconStyle`] holds every color and every proportional ratio the composer
//! uses. Ratios are fractions of the canvas side length N, so a style
//! resolves to a [`Geometry`] for any size and the drawing stays
//! scale-similar across sizes.
//!
//! Styles serialize to JSON so a different palette can be supplied without
//! recompiling:
//!
//! ```
//! use focusflow_icon::IconStyle;
//!
//! let style = IconStyle::default();
//! let json = style.to_json().unwrap();
//! let restored = IconStyle::from_json(&json).unwrap();
//! assert_eq!(restored, style);
//! ```

use std::path::Path;

use palette::Srgba;
use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// Straight-alpha 8-bit sRGB color used throughout the style.
pub type Color = Srgba<u8>;

/// Serializes a [`Color`] as a compact `[r, g, b, a]` array.
mod color_array {
    use super::Color;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        let (r, g, b, a) = color.into_components();
        [r, g, b, a].serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let [r, g, b, a] = <[u8; 4]>::deserialize(deserializer)?;
        Ok(Color::new(r, g, b, a))
    }
}

// ============================================================================
// Style sections
// ============================================================================

/// Vertical background gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradientStyle {
    #[serde(with = "color_array")]
    pub top: Color,
    #[serde(with = "color_array")]
    pub bottom: Color,
}

impl Default for GradientStyle {
    fn default() -> Self {
        Self {
            top: Color::new(88, 28, 135, 255),
            bottom: Color::new(59, 7, 100, 255),
        }
    }
}

/// The rounded square that becomes the icon's alpha mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlateStyle {
    /// Inset from every canvas edge.
    pub padding: f32,
    pub corner_radius: f32,
}

impl Default for PlateStyle {
    fn default() -> Self {
        Self {
            padding: 0.08,
            corner_radius: 0.22,
        }
    }
}

/// Concentric translucent outlines approximating a glow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlowStyle {
    pub radius: f32,
    pub width: f32,
    /// Radius added per successive ring.
    pub step: f32,
    pub count: u32,
    #[serde(with = "color_array")]
    pub color: Color,
}

impl Default for GlowStyle {
    fn default() -> Self {
        Self {
            radius: 0.32,
            width: 0.02,
            step: 2.0 / 1024.0,
            count: 3,
            color: Color::new(167, 139, 250, 60),
        }
    }
}

/// The two filled discs behind the glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscStyle {
    pub outer_radius: f32,
    #[serde(with = "color_array")]
    pub outer_color: Color,
    pub inner_radius: f32,
    #[serde(with = "color_array")]
    pub inner_color: Color,
}

impl Default for DiscStyle {
    fn default() -> Self {
        Self {
            outer_radius: 0.28,
            outer_color: Color::new(139, 92, 246, 255),
            inner_radius: 0.24,
            inner_color: Color::new(109, 40, 217, 255),
        }
    }
}

/// The timer-progress arc.
///
/// Angles are in degrees, measured clockwise from 3 o'clock (y grows down).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArcStyle {
    pub radius: f32,
    pub width: f32,
    pub start_degrees: f32,
    pub sweep_degrees: f32,
    #[serde(with = "color_array")]
    pub color: Color,
}

impl Default for ArcStyle {
    fn default() -> Self {
        Self {
            radius: 0.21,
            width: 0.04,
            start_degrees: -90.0,
            sweep_degrees: 270.0,
            color: Color::new(196, 181, 253, 255),
        }
    }
}

/// The centered letter and its drop shadow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlyphStyle {
    pub letter: char,
    pub size: f32,
    #[serde(with = "color_array")]
    pub color: Color,
    pub shadow_offset: f32,
    #[serde(with = "color_array")]
    pub shadow_color: Color,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            letter: 'F',
            size: 0.28,
            color: Color::new(255, 255, 255, 255),
            shadow_offset: 0.01,
            shadow_color: Color::new(0, 0, 0, 80),
        }
    }
}

/// Timer tick dots around the emblem.
///
/// Angles are compass degrees: 0 is straight up, increasing clockwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TickStyle {
    pub radius: f32,
    pub distance: f32,
    pub angles: Vec<f32>,
    #[serde(with = "color_array")]
    pub color: Color,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            radius: 0.015,
            distance: 0.35,
            angles: vec![0.0, 90.0, 180.0, 270.0],
            color: Color::new(196, 181, 253, 180),
        }
    }
}

// ============================================================================
// IconStyle
// ============================================================================

/// Every color and ratio needed to draw the icon.
///
/// The default is the FocusFlow purple timer icon.
///
/// # JSON Format
///
/// ```json
/// {
///   "gradient": { "top": [88, 28, 135, 255], "bottom": [59, 7, 100, 255] },
///   "glyph": { "letter": "F", "size": 0.28 }
/// }
/// ```
///
/// Any omitted section or field keeps its default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IconStyle {
    pub gradient: GradientStyle,
    pub plate: PlateStyle,
    pub glow: GlowStyle,
    pub discs: DiscStyle,
    pub arc: ArcStyle,
    pub glyph: GlyphStyle,
    pub ticks: TickStyle,
}

impl IconStyle {
    /// Serializes the style to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the style to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a style from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a style from a JSON file.
    pub fn load(path: &Path) -> Result<Self, StyleError> {
        let json = std::fs::read_to_string(path).map_err(|source| StyleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| StyleError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves every ratio to absolute pixels for a canvas of `size` pixels.
    pub fn geometry(&self, size: u32) -> Geometry {
        let n = size as f32;
        let center = n / 2.0;

        let padding = n * self.plate.padding;
        let plate = PlateGeometry {
            left: padding,
            top: padding,
            right: n - padding,
            bottom: n - padding,
            radius: n * self.plate.corner_radius,
        };

        let glow_rings = (0..self.glow.count)
            .map(|i| Ring {
                radius: n * (self.glow.radius + i as f32 * self.glow.step),
                width: n * self.glow.width,
            })
            .collect();

        let ticks = self
            .ticks
            .angles
            .iter()
            .map(|degrees| {
                let rad = (degrees - 90.0).to_radians();
                let distance = n * self.ticks.distance;
                (center + distance * rad.cos(), center + distance * rad.sin())
            })
            .collect();

        Geometry {
            size,
            center: (center, center),
            plate,
            glow_rings,
            outer_disc: n * self.discs.outer_radius,
            inner_disc: n * self.discs.inner_radius,
            arc: Ring {
                radius: n * self.arc.radius,
                width: n * self.arc.width,
            },
            glyph_size: n * self.glyph.size,
            shadow_offset: n * self.glyph.shadow_offset,
            ticks,
            tick_radius: n * self.ticks.radius,
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Absolute plate bounds in continuous pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateGeometry {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub radius: f32,
}

impl PlateGeometry {
    /// Signed distance from `(x, y)` to the plate outline; negative inside.
    pub fn signed_distance(&self, x: f32, y: f32) -> f32 {
        let cx = (self.left + self.right) / 2.0;
        let cy = (self.top + self.bottom) / 2.0;
        let half_w = (self.right - self.left) / 2.0 - self.radius;
        let half_h = (self.bottom - self.top) / 2.0 - self.radius;
        let qx = (x - cx).abs() - half_w;
        let qy = (y - cy).abs() - half_h;
        let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
        outside + qx.max(qy).min(0.0) - self.radius
    }
}

/// An outline described by its outer radius and its inward stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub radius: f32,
    pub width: f32,
}

/// A style resolved for one canvas size.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub size: u32,
    pub center: (f32, f32),
    pub plate: PlateGeometry,
    pub glow_rings: Vec<Ring>,
    pub outer_disc: f32,
    pub inner_disc: f32,
    pub arc: Ring,
    pub glyph_size: f32,
    pub shadow_offset: f32,
    /// Tick dot centers, in the order of [`TickStyle::angles`].
    pub ticks: Vec<(f32, f32)>,
    pub tick_radius: f32,
}

// ============================================================================
// Tests
// ============================================================================
