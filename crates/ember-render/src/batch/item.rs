use std::sync::Arc;

use glam::Vec2;

use crate::color::Color;
use crate::texture::Texture2D;

/// Resolved screen-space geometry for one queued quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemGeometry {
    /// Axis-aligned rectangle: the unrotated fast path.
    Axis { x: f32, y: f32, w: f32, h: f32 },
    /// Rectangle at origin-relative offset `(ox, oy)` rotated about the
    /// anchor `(x, y)` by a precomputed sine/cosine pair.
    Rotated {
        x: f32,
        y: f32,
        ox: f32,
        oy: f32,
        w: f32,
        h: f32,
        sin: f32,
        cos: f32,
    },
    /// Four independently positioned corners (text glyphs, which go through
    /// a full affine transform at submission time).
    Corners {
        tl: Vec2,
        tr: Vec2,
        bl: Vec2,
        br: Vec2,
    },
}

/// One queued draw: resolved quad geometry plus texture, tint, and sort key.
///
/// Items live in the [`SpriteBatcher`](super::SpriteBatcher) pool. A slot is
/// valid from the `create_batch_item` call that handed it out until the next
/// flush consumes it; the texture reference is cleared when the item returns
/// to the pool so pooled slots never pin textures alive. Callers must not
/// hold the `&mut` across another `create_batch_item` call (the pool may
/// reallocate when it grows).
#[derive(Debug, Clone)]
pub struct SpriteBatchItem {
    /// Shared, never owned: the referenced texture outlives the item.
    pub texture: Option<Arc<Texture2D>>,
    /// Ordering value; meaning depends on the active sort mode.
    pub sort_key: f32,
    pub color: Color,
    /// Layer depth, written into the vertex `z` component.
    pub depth: f32,
    /// Normalized UV of the top-left corner (flips already applied).
    pub uv_tl: Vec2,
    /// Normalized UV of the bottom-right corner (flips already applied).
    pub uv_br: Vec2,
    pub geometry: ItemGeometry,
}

impl SpriteBatchItem {
    /// A pooled slot with no texture and sort key 0.
    pub(crate) fn empty() -> Self {
        Self {
            texture: None,
            sort_key: 0.0,
            color: Color::WHITE,
            depth: 0.0,
            uv_tl: Vec2::ZERO,
            uv_br: Vec2::ONE,
            geometry: ItemGeometry::Axis {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: 0.0,
            },
        }
    }

    /// Reset a recycled slot before handing it back out.
    pub(crate) fn reset(&mut self) {
        self.texture = None;
        self.sort_key = 0.0;
    }
}
