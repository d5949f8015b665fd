use std::sync::Arc;

use tracing::trace;

use super::builder::DrawCallBuilder;
use super::item::SpriteBatchItem;
use super::target::SpriteDrawTarget;
use super::{FlushStats, SpriteSortMode};
use crate::texture::Texture2D;

/// Pool capacity handed out before the first growth.
const INITIAL_POOL_SIZE: usize = 256;

/// Owns the growable pool of batch items and turns the current frame's
/// queue into draw submissions on flush.
///
/// The pool grows geometrically and never shrinks within a session; storage
/// persists across frames so the per-frame hot path never reallocates once
/// warmed up. Single-writer: callers guarantee exclusive access for the
/// duration of a session (`&mut self` enforces this within one thread).
pub struct SpriteBatcher {
    items: Vec<SpriteBatchItem>,
    in_use: usize,
    builder: DrawCallBuilder,
}

impl SpriteBatcher {
    pub fn new() -> Self {
        Self::with_builder(DrawCallBuilder::new())
    }

    /// Create a batcher with a custom items-per-submission limit.
    pub fn with_max_items_per_draw(max_items: usize) -> Self {
        Self::with_builder(DrawCallBuilder::with_max_items(max_items))
    }

    fn with_builder(builder: DrawCallBuilder) -> Self {
        let mut items = Vec::new();
        items.resize_with(INITIAL_POOL_SIZE, SpriteBatchItem::empty);
        Self {
            items,
            in_use: 0,
            builder,
        }
    }

    /// Items queued since the last flush.
    pub fn item_count(&self) -> usize {
        self.in_use
    }

    /// Current pool capacity.
    pub fn pool_size(&self) -> usize {
        self.items.len()
    }

    /// Hand out the next batch item slot, growing the pool if exhausted.
    ///
    /// The slot comes back with no texture and sort key 0. Growth is
    /// unconditional; allocation failure aborts the process. The returned
    /// reference must not be retained across another `create_batch_item`
    /// call, since growth may move the pool.
    pub fn create_batch_item(&mut self) -> &mut SpriteBatchItem {
        if self.in_use >= self.items.len() {
            self.grow();
        }
        let item = &mut self.items[self.in_use];
        self.in_use += 1;
        item.reset();
        item
    }

    fn grow(&mut self) {
        // Grow by half, rounded up to a multiple of 64.
        let len = self.items.len();
        let new_len = ((len + len / 2 + 63) & !63).max(INITIAL_POOL_SIZE);
        self.items.resize_with(new_len, SpriteBatchItem::empty);
    }

    /// Sort, group, and submit everything queued since the last flush.
    ///
    /// `Deferred` and `Immediate` keep submission order; the other modes
    /// stably sort by sort key, so ties preserve submission order. The
    /// sorted sequence is partitioned into maximal runs sharing a texture
    /// (pointer identity) and each run goes to the draw-call builder as one
    /// submission stream. Afterwards the in-use count resets to zero and
    /// every consumed slot drops its texture reference; pool storage is
    /// kept for the next frame.
    pub fn flush(
        &mut self,
        sort_mode: SpriteSortMode,
        target: &mut dyn SpriteDrawTarget,
    ) -> FlushStats {
        let Self {
            items,
            in_use,
            builder,
        } = self;
        let count = *in_use;
        if count == 0 {
            return FlushStats::default();
        }
        let queued = &mut items[..count];

        if sort_mode.requires_sort() {
            queued.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));
        }

        let mut stats = FlushStats {
            items: count as u32,
            ..FlushStats::default()
        };

        let mut start = 0;
        while start < count {
            let texture = queued[start]
                .texture
                .clone()
                .expect("batch item was queued without a texture");
            let mut end = start + 1;
            while end < count && is_same_texture(&texture, &queued[end]) {
                end += 1;
            }
            stats.draw_calls += builder.submit_run(&texture, &queued[start..end], target);
            stats.texture_runs += 1;
            start = end;
        }

        for item in queued {
            item.texture = None;
        }
        *in_use = 0;

        trace!(
            items = stats.items,
            draw_calls = stats.draw_calls,
            texture_runs = stats.texture_runs,
            "flushed sprite batch"
        );
        stats
    }
}

impl Default for SpriteBatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn is_same_texture(texture: &Arc<Texture2D>, item: &SpriteBatchItem) -> bool {
    item.texture
        .as_ref()
        .is_some_and(|other| Arc::ptr_eq(texture, other))
}
