use std::sync::Arc;

use ahash::AHashMap;
use ember_render::{RectI, Texture2D};
use glam::Vec2;

use crate::error::{SpriteBatchError, SpriteResult};

/// Metrics and atlas placement for one character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub character: char,
    /// Region of the atlas texture holding the rendered glyph.
    pub bounds: RectI,
    /// Layout cell around the rendered glyph: `x`/`y` offset the quad
    /// within the cell, `width`/`height` give the cell extent.
    pub cropping: RectI,
    /// Horizontal space before the glyph. May be negative for characters
    /// that overhang their cell (e.g. italic `j`).
    pub left_side_bearing: f32,
    /// Horizontal space after the glyph. May be negative.
    pub right_side_bearing: f32,
    /// Advance width of the glyph itself.
    pub width: f32,
}

/// A bitmap font: an owned contiguous glyph table over a shared atlas page.
///
/// Glyph access is bounds-checked indexing into the table; the char lookup
/// map resolves to indices once per character. Rasterization is out of
/// scope — callers build the table from whatever produced the atlas.
#[derive(Debug, Clone)]
pub struct SpriteFont {
    texture: Arc<Texture2D>,
    glyphs: Vec<Glyph>,
    index: AHashMap<char, usize>,
    default_glyph: Option<usize>,
    line_spacing: f32,
    spacing: f32,
}

impl SpriteFont {
    /// Build a font from a glyph table.
    ///
    /// `line_spacing` is the vertical advance per line, `spacing` the extra
    /// horizontal space between glyphs on a line. If `default_character` is
    /// given it must be present in `glyphs`; it substitutes for characters
    /// the font does not cover.
    pub fn new(
        texture: Arc<Texture2D>,
        glyphs: Vec<Glyph>,
        line_spacing: f32,
        spacing: f32,
        default_character: Option<char>,
    ) -> SpriteResult<Self> {
        let index: AHashMap<char, usize> = glyphs
            .iter()
            .enumerate()
            .map(|(i, g)| (g.character, i))
            .collect();
        let default_glyph = match default_character {
            Some(c) => Some(
                index
                    .get(&c)
                    .copied()
                    .ok_or(SpriteBatchError::MissingGlyph(c))?,
            ),
            None => None,
        };
        Ok(Self {
            texture,
            glyphs,
            index,
            default_glyph,
            line_spacing,
            spacing,
        })
    }

    /// The atlas page all glyphs live on.
    pub fn texture(&self) -> &Arc<Texture2D> {
        &self.texture
    }

    /// Vertical advance per line.
    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    /// Extra horizontal space between glyphs on a line.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// All glyphs, in table order.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Resolve a character to its glyph, falling back to the default glyph.
    pub fn glyph(&self, c: char) -> SpriteResult<&Glyph> {
        self.index
            .get(&c)
            .copied()
            .or(self.default_glyph)
            .map(|i| &self.glyphs[i])
            .ok_or(SpriteBatchError::MissingGlyph(c))
    }

    /// Measure the extent of `text` laid out with this font.
    ///
    /// Mirrors the submission layout exactly: per-line pen advance with the
    /// first glyph of each line clamping its left bearing to be
    /// non-negative, `'\n'` starting a new line, `'\r'` ignored. The width
    /// is the widest pen excursion including a non-negative right bearing;
    /// the height is the full lines times the line spacing plus the final
    /// line's height, which grows to the tallest layout cell on that line.
    pub fn measure(&self, text: &str) -> SpriteResult<Vec2> {
        if text.is_empty() {
            return Ok(Vec2::ZERO);
        }

        let mut width = 0.0f32;
        let mut final_line_height = self.line_spacing;
        let mut pen = Vec2::ZERO;
        let mut first_glyph_of_line = true;

        for c in text.chars() {
            if c == '\r' {
                continue;
            }
            if c == '\n' {
                pen.x = 0.0;
                pen.y += self.line_spacing;
                final_line_height = self.line_spacing;
                first_glyph_of_line = true;
                continue;
            }

            let glyph = self.glyph(c)?;

            if first_glyph_of_line {
                pen.x = glyph.left_side_bearing.max(0.0);
                first_glyph_of_line = false;
            } else {
                pen.x += self.spacing + glyph.left_side_bearing;
            }

            pen.x += glyph.width;
            let proposed_width = pen.x + glyph.right_side_bearing.max(0.0);
            if proposed_width > width {
                width = proposed_width;
            }
            pen.x += glyph.right_side_bearing;

            let cell_height = glyph.cropping.height as f32;
            if cell_height > final_line_height {
                final_line_height = cell_height;
            }
        }

        Ok(Vec2::new(width, pen.y + final_line_height))
    }
}
