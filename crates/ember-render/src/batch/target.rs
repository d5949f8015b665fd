use std::sync::Arc;

use crate::texture::Texture2D;
use crate::vertex::SpriteVertex;

/// Receiver for staged draw submissions.
///
/// One `draw` call corresponds to one GPU draw submission: a bound texture,
/// a vertex slice (4 vertices per sprite), and the matching quad indices
/// (6 per sprite, `u16`). The slices are only valid for the duration of the
/// call; targets that defer the upload must copy.
pub trait SpriteDrawTarget {
    fn draw(&mut self, texture: &Arc<Texture2D>, vertices: &[SpriteVertex], indices: &[u16]);
}

/// One recorded draw submission.
#[derive(Debug, Clone)]
pub struct CapturedDraw {
    pub texture: Arc<Texture2D>,
    pub vertices: Vec<SpriteVertex>,
    pub indices: Vec<u16>,
}

impl CapturedDraw {
    /// Number of sprites in this submission.
    pub fn sprite_count(&self) -> usize {
        self.vertices.len() / 4
    }
}

/// A [`SpriteDrawTarget`] that records every submission instead of driving
/// a GPU. Used by the test suites and for headless verification.
#[derive(Debug, Default)]
pub struct CapturingTarget {
    pub draws: Vec<CapturedDraw>,
}

impl CapturingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded submissions.
    pub fn clear(&mut self) {
        self.draws.clear();
    }

    /// Total sprites across all recorded submissions.
    pub fn sprite_count(&self) -> usize {
        self.draws.iter().map(CapturedDraw::sprite_count).sum()
    }
}

impl SpriteDrawTarget for CapturingTarget {
    fn draw(&mut self, texture: &Arc<Texture2D>, vertices: &[SpriteVertex], indices: &[u16]) {
        self.draws.push(CapturedDraw {
            texture: texture.clone(),
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        });
    }
}
