use std::sync::Arc;

use ember_render::{
    Color, FlushStats, ItemGeometry, RectF, RectI, SpriteBatcher, SpriteDrawTarget, SpriteSortMode,
    Texture2D,
};
use glam::{Affine2, Vec2};
use tracing::debug;

use crate::error::{SpriteBatchError, SpriteResult};
use crate::font::SpriteFont;
use crate::params::{DrawParams, SpriteEffects};

/// The sprite and text submission surface.
///
/// A session is opened with [`begin`](Self::begin), filled with
/// [`draw`](Self::draw)/[`draw_string`](Self::draw_string) calls, and closed
/// with [`end`](Self::end), which flushes everything through the owned
/// [`SpriteDrawTarget`]. In [`SpriteSortMode::Immediate`] every submission
/// flushes on the spot instead.
///
/// Sessions are not reentrant and not thread-safe by design: the `&mut self`
/// receiver gives the session exclusive single-threaded ownership.
pub struct SpriteBatch<T: SpriteDrawTarget> {
    batcher: SpriteBatcher,
    target: T,
    sort_mode: SpriteSortMode,
    active: bool,
    session_stats: FlushStats,
}

impl<T: SpriteDrawTarget> SpriteBatch<T> {
    pub fn new(target: T) -> Self {
        Self {
            batcher: SpriteBatcher::new(),
            target,
            sort_mode: SpriteSortMode::Deferred,
            active: false,
            session_stats: FlushStats::default(),
        }
    }

    /// Create a batch with a custom items-per-submission limit. Useful for
    /// targets bridging to small fixed-size hardware buffers.
    pub fn with_max_items_per_draw(target: T, max_items: usize) -> Self {
        Self {
            batcher: SpriteBatcher::with_max_items_per_draw(max_items),
            target,
            sort_mode: SpriteSortMode::Deferred,
            active: false,
            session_stats: FlushStats::default(),
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// The sort mode of the current (or most recent) session.
    pub fn sort_mode(&self) -> SpriteSortMode {
        self.sort_mode
    }

    /// Whether a batch session is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Open a batch session with the given sort mode.
    pub fn begin(&mut self, sort_mode: SpriteSortMode) -> SpriteResult<()> {
        if self.active {
            return Err(SpriteBatchError::BeginAlreadyCalled);
        }
        self.sort_mode = sort_mode;
        self.active = true;
        self.session_stats = FlushStats::default();
        Ok(())
    }

    /// Close the session, flushing all queued items.
    ///
    /// Returns the aggregated statistics of the session, including any
    /// immediate-mode flushes that already happened.
    pub fn end(&mut self) -> SpriteResult<FlushStats> {
        if !self.active {
            return Err(SpriteBatchError::EndWithoutBegin);
        }
        let stats = self.batcher.flush(self.sort_mode, &mut self.target);
        self.session_stats.merge(stats);
        self.active = false;
        debug!(
            items = self.session_stats.items,
            draw_calls = self.session_stats.draw_calls,
            sort_mode = ?self.sort_mode,
            "ended sprite batch session"
        );
        Ok(self.session_stats)
    }

    /// Submit a sprite at `position`, scaled by `scale`.
    ///
    /// The source region (full texture by default) is converted to
    /// normalized UVs via the texture's texel scale; the origin is
    /// pre-scaled by `scale`; flips swap the UV min/max on their axis.
    pub fn draw(
        &mut self,
        texture: &Arc<Texture2D>,
        position: Vec2,
        scale: Vec2,
        params: &DrawParams,
    ) -> SpriteResult<()> {
        self.ensure_active()?;
        let sort_key = self.sort_key(texture, params.depth);

        let (source_size, uv_tl, uv_br) = source_region(texture, params.source);
        let (uv_tl, uv_br) = apply_effects(uv_tl, uv_br, params.effects);

        let w = source_size.x * scale.x;
        let h = source_size.y * scale.y;
        let origin = params.origin * scale;

        let geometry = if params.rotation == 0.0 {
            ItemGeometry::Axis {
                x: position.x - origin.x,
                y: position.y - origin.y,
                w,
                h,
            }
        } else {
            let (sin, cos) = params.rotation.sin_cos();
            ItemGeometry::Rotated {
                x: position.x,
                y: position.y,
                ox: -origin.x,
                oy: -origin.y,
                w,
                h,
                sin,
                cos,
            }
        };

        self.push_item(texture, sort_key, uv_tl, uv_br, params, geometry);
        self.flush_if_immediate();
        Ok(())
    }

    /// Submit a sprite stretched onto an explicit destination rectangle.
    ///
    /// The origin, given in source pixels, is rescaled by the
    /// destination/source ratio so it stays anchored to the same texel.
    pub fn draw_rect(
        &mut self,
        texture: &Arc<Texture2D>,
        destination: RectF,
        params: &DrawParams,
    ) -> SpriteResult<()> {
        self.ensure_active()?;
        let sort_key = self.sort_key(texture, params.depth);

        let mut origin = params.origin;
        let (uv_tl, uv_br) = match params.source {
            Some(src) => {
                // A zero-sized source cannot express a ratio; fall back to
                // the texel scale like the full-texture path.
                origin.x *= if src.width != 0 {
                    destination.width / src.width as f32
                } else {
                    destination.width * texture.texel_width()
                };
                origin.y *= if src.height != 0 {
                    destination.height / src.height as f32
                } else {
                    destination.height * texture.texel_height()
                };
                source_uv(texture, src)
            }
            None => {
                origin.x *= destination.width * texture.texel_width();
                origin.y *= destination.height * texture.texel_height();
                (Vec2::ZERO, Vec2::ONE)
            }
        };
        let (uv_tl, uv_br) = apply_effects(uv_tl, uv_br, params.effects);

        let geometry = if params.rotation == 0.0 {
            ItemGeometry::Axis {
                x: destination.x - origin.x,
                y: destination.y - origin.y,
                w: destination.width,
                h: destination.height,
            }
        } else {
            let (sin, cos) = params.rotation.sin_cos();
            ItemGeometry::Rotated {
                x: destination.x,
                y: destination.y,
                ox: -origin.x,
                oy: -origin.y,
                w: destination.width,
                h: destination.height,
                sin,
                cos,
            }
        };

        self.push_item(texture, sort_key, uv_tl, uv_br, params, geometry);
        self.flush_if_immediate();
        Ok(())
    }

    /// Submit the full texture at `position`, untransformed except for a
    /// tint. Deferred-only: this shortcut assumes batching and refuses to
    /// run under the immediate sort mode.
    pub fn draw_quick(
        &mut self,
        texture: &Arc<Texture2D>,
        position: Vec2,
        color: Color,
    ) -> SpriteResult<()> {
        self.ensure_active()?;
        if self.sort_mode == SpriteSortMode::Immediate {
            return Err(SpriteBatchError::ImmediateNotSupported);
        }
        let params = DrawParams::tinted(color);
        self.draw(texture, position, Vec2::ONE, &params)
    }

    /// Submit a string as one batch item per visible glyph.
    ///
    /// The pen advances by each glyph's side bearings plus the font's
    /// inter-glyph spacing; `'\n'` resets the pen to the next line and
    /// `'\r'` is ignored. The first glyph on a line clamps a negative left
    /// bearing so text never hangs off the left of its rectangle. Flips
    /// mirror the whole measured block; glyph offsets then go through the
    /// full affine transform (flip-signed scale × rotation, then translate).
    pub fn draw_string(
        &mut self,
        font: &SpriteFont,
        text: &str,
        position: Vec2,
        scale: Vec2,
        params: &DrawParams,
    ) -> SpriteResult<()> {
        self.ensure_active()?;
        let texture = font.texture().clone();
        let sort_key = self.sort_key(&texture, params.depth);

        let flip_h = params.effects.contains(SpriteEffects::FLIP_HORIZONTALLY);
        let flip_v = params.effects.contains(SpriteEffects::FLIP_VERTICALLY);

        let mut origin = params.origin;
        let mut flip_adjustment = Vec2::ZERO;
        if flip_h || flip_v {
            let size = font.measure(text)?;
            if flip_h {
                origin.x = -origin.x;
                flip_adjustment.x = -size.x;
            }
            if flip_v {
                origin.y = -origin.y;
                flip_adjustment.y = font.line_spacing() - size.y;
            }
        }

        let (sin, cos) = if params.rotation == 0.0 {
            (0.0, 1.0)
        } else {
            params.rotation.sin_cos()
        };
        let sx = if flip_h { -scale.x } else { scale.x };
        let sy = if flip_v { -scale.y } else { scale.y };
        let x_axis = Vec2::new(sx * cos, sx * sin);
        let y_axis = Vec2::new(-sy * sin, sy * cos);
        let shift = flip_adjustment - origin;
        let transform =
            Affine2::from_cols(x_axis, y_axis, position + shift.x * x_axis + shift.y * y_axis);

        // Post-transform extents of a glyph quad: `right` spans the scaled
        // glyph width along the rotated x axis, `down` the height.
        let right_unit = Vec2::new(cos, sin);
        let down_unit = Vec2::new(-sin, cos);

        let mut pen = Vec2::ZERO;
        let mut first_glyph_of_line = true;

        for c in text.chars() {
            if c == '\r' {
                continue;
            }
            if c == '\n' {
                pen.x = 0.0;
                pen.y += font.line_spacing();
                first_glyph_of_line = true;
                continue;
            }

            let glyph = *font.glyph(c)?;

            if first_glyph_of_line {
                pen.x = glyph.left_side_bearing.max(0.0);
                first_glyph_of_line = false;
            } else {
                pen.x += font.spacing() + glyph.left_side_bearing;
            }

            // Mirrored blocks anchor each glyph at its far edge so the UV
            // swap (not the geometry) does the per-glyph mirroring.
            let mut p = pen;
            if flip_h {
                p.x += glyph.bounds.width as f32;
            }
            p.x += glyph.cropping.x as f32;
            if flip_v {
                p.y += glyph.bounds.height as f32 - font.line_spacing();
            }
            p.y += glyph.cropping.y as f32;

            let tl = transform.transform_point2(p);
            let right = right_unit * (glyph.bounds.width as f32 * scale.x);
            let down = down_unit * (glyph.bounds.height as f32 * scale.y);
            let geometry = ItemGeometry::Corners {
                tl,
                tr: tl + right,
                bl: tl + down,
                br: tl + right + down,
            };

            let (uv_tl, uv_br) = source_uv(&texture, glyph.bounds);
            let (uv_tl, uv_br) = apply_effects(uv_tl, uv_br, params.effects);

            let item = self.batcher.create_batch_item();
            item.texture = Some(texture.clone());
            item.sort_key = sort_key;
            item.color = params.color;
            item.depth = params.depth;
            item.uv_tl = uv_tl;
            item.uv_br = uv_br;
            item.geometry = geometry;

            pen.x += glyph.width + glyph.right_side_bearing;
        }

        self.flush_if_immediate();
        Ok(())
    }

    fn ensure_active(&self) -> SpriteResult<()> {
        if self.active {
            Ok(())
        } else {
            Err(SpriteBatchError::DrawWithoutBegin)
        }
    }

    /// Sort key per the active mode. Immediate mode bypasses key
    /// computation entirely (the key is never consulted).
    fn sort_key(&self, texture: &Arc<Texture2D>, depth: f32) -> f32 {
        match self.sort_mode {
            SpriteSortMode::Texture => texture.sorting_key() as f32,
            SpriteSortMode::FrontToBack => depth,
            SpriteSortMode::BackToFront => -depth,
            SpriteSortMode::Deferred | SpriteSortMode::Immediate => 0.0,
        }
    }

    fn push_item(
        &mut self,
        texture: &Arc<Texture2D>,
        sort_key: f32,
        uv_tl: Vec2,
        uv_br: Vec2,
        params: &DrawParams,
        geometry: ItemGeometry,
    ) {
        let item = self.batcher.create_batch_item();
        item.texture = Some(texture.clone());
        item.sort_key = sort_key;
        item.color = params.color;
        item.depth = params.depth;
        item.uv_tl = uv_tl;
        item.uv_br = uv_br;
        item.geometry = geometry;
    }

    fn flush_if_immediate(&mut self) {
        if self.sort_mode == SpriteSortMode::Immediate {
            let stats = self.batcher.flush(self.sort_mode, &mut self.target);
            self.session_stats.merge(stats);
        }
    }
}

/// Size in source pixels plus normalized UV corners for an optional source
/// rectangle (full texture when absent).
fn source_region(texture: &Texture2D, source: Option<RectI>) -> (Vec2, Vec2, Vec2) {
    match source {
        Some(src) => {
            let (uv_tl, uv_br) = source_uv(texture, src);
            (Vec2::new(src.width as f32, src.height as f32), uv_tl, uv_br)
        }
        None => (
            Vec2::new(texture.width() as f32, texture.height() as f32),
            Vec2::ZERO,
            Vec2::ONE,
        ),
    }
}

/// Pixel-space rectangle to normalized UV corners via the texel scale.
fn source_uv(texture: &Texture2D, src: RectI) -> (Vec2, Vec2) {
    let tl = Vec2::new(
        src.x as f32 * texture.texel_width(),
        src.y as f32 * texture.texel_height(),
    );
    let br = Vec2::new(
        src.right() as f32 * texture.texel_width(),
        src.bottom() as f32 * texture.texel_height(),
    );
    (tl, br)
}

/// Swap the min/max normalized UVs on the flipped axes.
fn apply_effects(mut uv_tl: Vec2, mut uv_br: Vec2, effects: SpriteEffects) -> (Vec2, Vec2) {
    if effects.contains(SpriteEffects::FLIP_VERTICALLY) {
        std::mem::swap(&mut uv_tl.y, &mut uv_br.y);
    }
    if effects.contains(SpriteEffects::FLIP_HORIZONTALLY) {
        std::mem::swap(&mut uv_tl.x, &mut uv_br.x);
    }
    (uv_tl, uv_br)
}
