//! Batching engine: item pool, sort/flush logic, and draw-call emission.
//!
//! A frame accumulates [`SpriteBatchItem`]s in the [`SpriteBatcher`] pool.
//! On flush the in-use prefix is (stably) sorted according to the active
//! [`SpriteSortMode`], partitioned into maximal same-texture runs, and each
//! run is staged into vertex/index data by the [`DrawCallBuilder`] and
//! handed to a [`SpriteDrawTarget`] in bounded chunks.

mod batcher;
mod builder;
mod item;
mod target;

pub use batcher::SpriteBatcher;
pub use builder::{DrawCallBuilder, MAX_ITEMS_PER_DRAW};
pub use item::{ItemGeometry, SpriteBatchItem};
pub use target::{CapturedDraw, CapturingTarget, SpriteDrawTarget};

/// Sort policy applied when a batch session flushes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpriteSortMode {
    /// Items are drawn in submission order; flush happens at session end.
    #[default]
    Deferred,
    /// Every submission flushes instantly; items never coalesce across
    /// submissions. Sort keys are never computed.
    Immediate,
    /// Items are grouped by texture identity before flush.
    Texture,
    /// Items are sorted by depth ascending.
    FrontToBack,
    /// Items are sorted by negated depth (deepest first).
    BackToFront,
}

impl SpriteSortMode {
    /// Whether flushing in this mode sorts items by sort key.
    pub fn requires_sort(self) -> bool {
        !matches!(self, SpriteSortMode::Deferred | SpriteSortMode::Immediate)
    }
}

/// Statistics for one flush (or one batch session when aggregated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushStats {
    /// Number of batch items consumed.
    pub items: u32,
    /// Number of draw submissions issued to the target.
    pub draw_calls: u32,
    /// Number of maximal same-texture runs.
    pub texture_runs: u32,
}

impl FlushStats {
    /// Fold another flush into this one (used to aggregate immediate-mode
    /// flushes over a session).
    pub fn merge(&mut self, other: FlushStats) {
        self.items += other.items;
        self.draw_calls += other.draw_calls;
        self.texture_runs += other.texture_runs;
    }
}
