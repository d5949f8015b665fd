use std::sync::Arc;

use glam::Vec2;

use super::item::{ItemGeometry, SpriteBatchItem};
use super::target::SpriteDrawTarget;
use crate::texture::Texture2D;
use crate::vertex::SpriteVertex;

/// Largest permitted items-per-submission limit.
///
/// 4 vertices per sprite must stay addressable by `u16` quad indices, so a
/// single submission can reference at most `u16::MAX / 4` sprites.
pub const MAX_ITEMS_PER_DRAW: usize = u16::MAX as usize / 4;

/// Walks a sorted same-texture run of batch items and emits draw submissions.
///
/// Stateless per invocation apart from a reusable vertex staging buffer and
/// a precomputed quad index table, both sized to the configured
/// items-per-submission limit. A run of `n` items produces exactly
/// `ceil(n / max_items)` submissions.
pub struct DrawCallBuilder {
    staging: Vec<SpriteVertex>,
    indices: Vec<u16>,
    max_items: usize,
}

impl DrawCallBuilder {
    pub fn new() -> Self {
        Self::with_max_items(MAX_ITEMS_PER_DRAW)
    }

    /// Create a builder with a custom items-per-submission limit.
    ///
    /// # Panics
    ///
    /// Panics if `max_items` is zero or exceeds [`MAX_ITEMS_PER_DRAW`].
    pub fn with_max_items(max_items: usize) -> Self {
        assert!(
            max_items >= 1 && max_items <= MAX_ITEMS_PER_DRAW,
            "max_items must be in 1..={MAX_ITEMS_PER_DRAW} (got {max_items})"
        );

        // The index pattern never changes: precompute it once for the
        // largest chunk and slice per submission.
        let mut indices = Vec::with_capacity(max_items * 6);
        for item in 0..max_items {
            let base = (item * 4) as u16;
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 1, base + 3, base + 2]);
        }

        Self {
            staging: Vec::with_capacity(max_items.min(256) * 4),
            indices,
            max_items,
        }
    }

    /// The configured items-per-submission limit.
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Stage and submit one maximal same-texture run.
    ///
    /// Returns the number of draw submissions issued.
    pub fn submit_run(
        &mut self,
        texture: &Arc<Texture2D>,
        items: &[SpriteBatchItem],
        target: &mut dyn SpriteDrawTarget,
    ) -> u32 {
        let mut draw_calls = 0;
        for chunk in items.chunks(self.max_items) {
            self.staging.clear();
            for item in chunk {
                stage_item(&mut self.staging, item);
            }
            target.draw(texture, &self.staging, &self.indices[..chunk.len() * 6]);
            draw_calls += 1;
        }
        draw_calls
    }
}

impl Default for DrawCallBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Append the four corner vertices of one item to the staging buffer.
///
/// Corner order is TL, TR, BL, BR; the index pattern `0,1,2, 1,3,2` turns
/// that into two counter-clockwise triangles.
fn stage_item(staging: &mut Vec<SpriteVertex>, item: &SpriteBatchItem) {
    let (tl, tr, bl, br) = match item.geometry {
        ItemGeometry::Axis { x, y, w, h } => (
            Vec2::new(x, y),
            Vec2::new(x + w, y),
            Vec2::new(x, y + h),
            Vec2::new(x + w, y + h),
        ),
        ItemGeometry::Rotated {
            x,
            y,
            ox,
            oy,
            w,
            h,
            sin,
            cos,
        } => (
            Vec2::new(x + ox * cos - oy * sin, y + ox * sin + oy * cos),
            Vec2::new(x + (ox + w) * cos - oy * sin, y + (ox + w) * sin + oy * cos),
            Vec2::new(x + ox * cos - (oy + h) * sin, y + ox * sin + (oy + h) * cos),
            Vec2::new(
                x + (ox + w) * cos - (oy + h) * sin,
                y + (ox + w) * sin + (oy + h) * cos,
            ),
        ),
        ItemGeometry::Corners { tl, tr, bl, br } => (tl, tr, bl, br),
    };

    let color = item.color.to_array();
    let z = item.depth;
    let (uv_tl, uv_br) = (item.uv_tl, item.uv_br);

    staging.push(SpriteVertex::new([tl.x, tl.y, z], color, [uv_tl.x, uv_tl.y]));
    staging.push(SpriteVertex::new([tr.x, tr.y, z], color, [uv_br.x, uv_tl.y]));
    staging.push(SpriteVertex::new([bl.x, bl.y, z], color, [uv_tl.x, uv_br.y]));
    staging.push(SpriteVertex::new([br.x, br.y, z], color, [uv_br.x, uv_br.y]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::target::CapturingTarget;
    use crate::color::Color;

    fn axis_item(texture: &Arc<Texture2D>, x: f32, y: f32, w: f32, h: f32) -> SpriteBatchItem {
        SpriteBatchItem {
            texture: Some(texture.clone()),
            sort_key: 0.0,
            color: Color::WHITE,
            depth: 0.0,
            uv_tl: Vec2::ZERO,
            uv_br: Vec2::ONE,
            geometry: ItemGeometry::Axis { x, y, w, h },
        }
    }

    #[test]
    fn test_axis_geometry_corners() {
        let tex = Texture2D::new(64, 32);
        let mut builder = DrawCallBuilder::new();
        let mut target = CapturingTarget::new();

        builder.submit_run(&tex, &[axis_item(&tex, 10.0, 10.0, 64.0, 32.0)], &mut target);

        let draw = &target.draws[0];
        assert_eq!(draw.vertices.len(), 4);
        assert_eq!(draw.vertices[0].position, [10.0, 10.0, 0.0]);
        assert_eq!(draw.vertices[1].position, [74.0, 10.0, 0.0]);
        assert_eq!(draw.vertices[2].position, [10.0, 42.0, 0.0]);
        assert_eq!(draw.vertices[3].position, [74.0, 42.0, 0.0]);
        assert_eq!(draw.indices, vec![0, 1, 2, 1, 3, 2]);
    }

    #[test]
    fn test_rotated_quarter_turn() {
        let tex = Texture2D::new(8, 8);
        let mut builder = DrawCallBuilder::new();
        let mut target = CapturingTarget::new();

        // 90 degrees: (sin, cos) = (1, 0). A 2x1 rect anchored at (5, 5)
        // with zero offset rotates onto the +y axis.
        let item = SpriteBatchItem {
            geometry: ItemGeometry::Rotated {
                x: 5.0,
                y: 5.0,
                ox: 0.0,
                oy: 0.0,
                w: 2.0,
                h: 1.0,
                sin: 1.0,
                cos: 0.0,
            },
            ..axis_item(&tex, 0.0, 0.0, 0.0, 0.0)
        };
        builder.submit_run(&tex, &[item], &mut target);

        let v = &target.draws[0].vertices;
        assert_eq!(v[0].position, [5.0, 5.0, 0.0]);
        assert_eq!(v[1].position, [5.0, 7.0, 0.0]);
        assert_eq!(v[2].position, [4.0, 5.0, 0.0]);
        assert_eq!(v[3].position, [4.0, 7.0, 0.0]);
    }

    #[test]
    fn test_corners_pass_through() {
        let tex = Texture2D::new(8, 8);
        let mut builder = DrawCallBuilder::new();
        let mut target = CapturingTarget::new();

        let item = SpriteBatchItem {
            geometry: ItemGeometry::Corners {
                tl: Vec2::new(1.0, 2.0),
                tr: Vec2::new(3.0, 2.5),
                bl: Vec2::new(1.5, 4.0),
                br: Vec2::new(3.5, 4.5),
            },
            ..axis_item(&tex, 0.0, 0.0, 0.0, 0.0)
        };
        builder.submit_run(&tex, &[item], &mut target);

        let v = &target.draws[0].vertices;
        assert_eq!(v[0].position, [1.0, 2.0, 0.0]);
        assert_eq!(v[1].position, [3.0, 2.5, 0.0]);
        assert_eq!(v[2].position, [1.5, 4.0, 0.0]);
        assert_eq!(v[3].position, [3.5, 4.5, 0.0]);
    }

    #[test]
    fn test_run_splits_at_max_items() {
        let tex = Texture2D::new(8, 8);
        let mut builder = DrawCallBuilder::with_max_items(4);
        let mut target = CapturingTarget::new();

        let items: Vec<_> = (0..10)
            .map(|i| axis_item(&tex, i as f32, 0.0, 1.0, 1.0))
            .collect();
        let calls = builder.submit_run(&tex, &items, &mut target);

        // ceil(10 / 4) submissions, sized 4, 4, 2.
        assert_eq!(calls, 3);
        assert_eq!(target.draws[0].sprite_count(), 4);
        assert_eq!(target.draws[1].sprite_count(), 4);
        assert_eq!(target.draws[2].sprite_count(), 2);
        assert_eq!(target.draws[2].indices.len(), 12);
    }

    #[test]
    #[should_panic]
    fn test_zero_max_items_panics() {
        let _ = DrawCallBuilder::with_max_items(0);
    }
}
