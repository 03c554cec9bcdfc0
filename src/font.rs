//! Glyph rasterization with an ordered font fallback chain.
//!
//! A [`FontSource`] is a lazy strategy: nothing is read from disk until
//! [`FontSource::load`] runs. [`resolve`] walks a list of sources in order
//! and keeps the first one that both loads and produces ink for the
//! requested letter. [`FontSource::Builtin`] never fails, so a chain that
//! ends with it always resolves.
//!
//! Outline fonts are rendered through usvg's text layout so that kerning,
//! hinting and weight matching come from the same stack that renders SVG.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use resvg::tiny_skia::{FillRule, PathBuilder, Pixmap, Rect, Transform};
use resvg::usvg::fontdb::{Database, Family, Query, Weight};
use resvg::usvg::{Options, Tree};

use crate::raster::{ink_bounds, solid_paint};
use crate::style::Color;

/// Bundled bold sans-serif used by most Linux distributions.
pub const DEJAVU_SANS_BOLD: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

/// macOS system sans-serif collection.
pub const HELVETICA: &str = "/System/Library/Fonts/Helvetica.ttc";

/// Families tried, in order, when querying installed system fonts.
const SYSTEM_FAMILIES: &[&str] = &["DejaVu Sans", "Helvetica", "Arial", "Liberation Sans"];

// ============================================================================
// FontSource
// ============================================================================

/// One strategy in the font fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// A specific font file (TTF, OTF or a TTC collection).
    File(PathBuf),

    /// Any installed bold sans-serif face.
    System,

    /// The built-in block-letter renderer. Always available.
    Builtin,
}

impl FontSource {
    /// The chain used when no font is configured explicitly.
    pub fn default_chain() -> Vec<FontSource> {
        vec![
            FontSource::File(DEJAVU_SANS_BOLD.into()),
            FontSource::File(HELVETICA.into()),
            FontSource::System,
            FontSource::Builtin,
        ]
    }

    /// Loads this source into a renderer, or `None` if it is unavailable.
    pub fn load(&self) -> Option<GlyphRenderer> {
        match self {
            FontSource::File(path) => {
                let mut db = Database::new();
                db.load_font_file(path).ok()?;
                let family = db.faces().next()?.families.first()?.0.clone();
                Some(GlyphRenderer::Outline(OutlineFont::new(db, family)))
            }
            FontSource::System => {
                let mut db = Database::new();
                db.load_system_fonts();
                let families: Vec<Family> =
                    SYSTEM_FAMILIES.iter().map(|&name| Family::Name(name)).collect();
                let id = db.query(&Query {
                    families: &families,
                    weight: Weight::BOLD,
                    ..Query::default()
                })?;
                let family = db.face(id)?.families.first()?.0.clone();
                Some(GlyphRenderer::Outline(OutlineFont::new(db, family)))
            }
            FontSource::Builtin => Some(GlyphRenderer::Builtin),
        }
    }
}

impl fmt::Display for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSource::File(path) => write!(f, "font file {}", path.display()),
            FontSource::System => f.write_str("system sans-serif"),
            FontSource::Builtin => f.write_str("built-in block font"),
        }
    }
}

/// Resolves the first source in `chain` that can draw `letter`.
///
/// Each source is probed by rasterizing the letter at `probe_size`; a face
/// that loads but has no outline for the letter is skipped. If the chain is
/// exhausted, the built-in renderer is returned.
pub fn resolve(chain: &[FontSource], letter: char, probe_size: u32) -> GlyphRenderer {
    chain
        .iter()
        .find_map(|source| {
            log::debug!("trying {source}");
            let renderer = source.load()?;
            renderer.rasterize(letter, probe_size as f32 * 0.5, probe_size)?;
            log::info!("glyph font: {source}");
            Some(renderer)
        })
        .unwrap_or_else(|| {
            log::info!("glyph font: {}", FontSource::Builtin);
            GlyphRenderer::Builtin
        })
}

// ============================================================================
// GlyphRenderer
// ============================================================================

/// A loaded outline font: its own face database plus the family to request.
#[derive(Clone)]
pub struct OutlineFont {
    db: Arc<Database>,
    family: String,
}

impl OutlineFont {
    fn new(db: Database, family: String) -> Self {
        Self {
            db: Arc::new(db),
            family,
        }
    }
}

impl fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineFont")
            .field("family", &self.family)
            .field("faces", &self.db.len())
            .finish()
    }
}

/// Draws a single letter as a white coverage pixmap.
#[derive(Debug, Clone)]
pub enum GlyphRenderer {
    Outline(OutlineFont),
    Builtin,
}

impl GlyphRenderer {
    /// Rasterizes `letter` at `font_size` onto a transparent square canvas.
    ///
    /// The letter is placed roughly in the middle; callers center it exactly
    /// from its ink bounds. Returns `None` if nothing was drawn.
    pub fn rasterize(&self, letter: char, font_size: f32, canvas: u32) -> Option<Pixmap> {
        let pixmap = match self {
            GlyphRenderer::Outline(font) => rasterize_outline(font, letter, font_size, canvas)?,
            GlyphRenderer::Builtin => rasterize_builtin(letter, font_size, canvas)?,
        };
        ink_bounds(&pixmap).map(|_| pixmap)
    }

    /// Returns true for the built-in block font.
    pub fn is_builtin(&self) -> bool {
        matches!(self, GlyphRenderer::Builtin)
    }
}

fn rasterize_outline(font: &OutlineFont, letter: char, font_size: f32, canvas: u32) -> Option<Pixmap> {
    let half = canvas as f32 / 2.0;
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{canvas}" height="{canvas}"><text x="{half}" y="{baseline}" text-anchor="middle" font-family="{family}" font-weight="bold" font-size="{font_size}" fill="#ffffff">{letter}</text></svg>"##,
        baseline = half + font_size * 0.35,
        family = escape_xml(&font.family),
        letter = escape_xml(&letter.to_string()),
    );

    let mut opts = Options::default();
    opts.fontdb = Arc::clone(&font.db);
    opts.font_family = font.family.clone();
    let tree = Tree::from_str(&svg, &opts).ok()?;

    let mut pixmap = Pixmap::new(canvas, canvas)?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
    Some(pixmap)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ============================================================================
// Built-in block font
// ============================================================================

const CELL_COLUMNS: u32 = 5;
const CELL_ROWS: u32 = 7;

/// Cap height as a fraction of the font size.
const CAP_HEIGHT: f32 = 0.72;

/// 5x7 uppercase bitmaps, one row per byte, most significant of 5 bits left.
const BLOCK_LETTERS: [[u8; 7]; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

/// Outline box drawn for letters without a bitmap.
const MISSING_GLYPH: [u8; 7] = [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111];

fn block_bitmap(letter: char) -> &'static [u8; 7] {
    let upper = letter.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        &BLOCK_LETTERS[(upper as u8 - b'A') as usize]
    } else {
        &MISSING_GLYPH
    }
}

fn rasterize_builtin(letter: char, font_size: f32, canvas: u32) -> Option<Pixmap> {
    let cell = font_size * CAP_HEIGHT / CELL_ROWS as f32;
    if cell <= 0.0 {
        return None;
    }

    let half = canvas as f32 / 2.0;
    let left = half - cell * CELL_COLUMNS as f32 / 2.0;
    let top = half - cell * CELL_ROWS as f32 / 2.0;
    // One path for all cells so shared edges do not leave anti-aliased seams.
    let mut pb = PathBuilder::new();
    for (row, bits) in block_bitmap(letter).iter().enumerate() {
        for col in 0..CELL_COLUMNS {
            if bits & (1 << (CELL_COLUMNS - 1 - col)) == 0 {
                continue;
            }
            let x = left + col as f32 * cell;
            let y = top + row as f32 * cell;
            if let Some(rect) = Rect::from_xywh(x, y, cell, cell) {
                pb.push_rect(rect);
            }
        }
    }
    let path = pb.finish()?;

    let mut pixmap = Pixmap::new(canvas, canvas)?;
    let paint = solid_paint(Color::new(255, 255, 255, 255));
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    Some(pixmap)
}

// ============================================================================
// Tests
// ============================================================================
