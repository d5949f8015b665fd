//! Ember Render
//!
//! The sprite batching core of the Ember 2D renderer: queued quads are
//! pooled, sorted by a configurable policy, partitioned into maximal
//! same-texture runs, and staged as vertex/index data for a
//! [`SpriteDrawTarget`].
//!
//! The GPU boundary is the [`SpriteDrawTarget`] trait; this crate never
//! allocates GPU resources itself.

pub mod batch;
pub mod color;
pub mod geometry;
pub mod logging;
pub mod texture;
pub mod vertex;

pub use batch::{
    CapturedDraw, CapturingTarget, DrawCallBuilder, FlushStats, ItemGeometry, SpriteBatchItem,
    SpriteBatcher, SpriteDrawTarget, SpriteSortMode,
};
pub use color::Color;
pub use geometry::{Rect, RectF, RectI};
pub use texture::Texture2D;
pub use vertex::SpriteVertex;
