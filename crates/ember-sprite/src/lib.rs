//! Ember Sprite
//!
//! The public submission surface over the batching core: a caller begins a
//! batch session with a sort mode, submits sprites and text, and ends the
//! session to flush everything as coalesced draw submissions.
//!
//! ```
//! use ember_sprite::{DrawParams, SpriteBatch, SpriteSortMode};
//! use ember_render::{CapturingTarget, Texture2D};
//! use glam::Vec2;
//!
//! let texture = Texture2D::new(64, 32);
//! let mut batch = SpriteBatch::new(CapturingTarget::new());
//!
//! batch.begin(SpriteSortMode::Deferred).unwrap();
//! batch
//!     .draw(&texture, Vec2::new(10.0, 10.0), Vec2::ONE, &DrawParams::default())
//!     .unwrap();
//! let stats = batch.end().unwrap();
//! assert_eq!(stats.draw_calls, 1);
//! ```

mod error;
mod font;
mod params;
mod sprite_batch;

pub use error::{SpriteBatchError, SpriteResult};
pub use font::{Glyph, SpriteFont};
pub use params::{DrawParams, SpriteEffects};
pub use sprite_batch::SpriteBatch;

// Core types callers need alongside the submission API.
pub use ember_render::{Color, FlushStats, RectF, RectI, SpriteDrawTarget, SpriteSortMode};
