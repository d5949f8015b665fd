use bitflags::bitflags;
use ember_render::{Color, RectI};
use glam::Vec2;

bitflags! {
    /// Mirror flags applied to a sprite's texture coordinates.
    ///
    /// Flips are implemented by swapping the min/max normalized UVs on the
    /// relevant axis; screen-space geometry is unchanged. Applying the same
    /// flip twice is a no-op.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpriteEffects: u8 {
        const FLIP_HORIZONTALLY = 1 << 0;
        const FLIP_VERTICALLY = 1 << 1;
    }
}

/// Optional parameters shared by every submission call.
///
/// The defaults draw the full texture, untinted, unrotated, at depth 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    /// Pixel-space region of the texture to draw; `None` draws all of it.
    pub source: Option<RectI>,
    /// Tint color.
    pub color: Color,
    /// Rotation in radians around the origin.
    pub rotation: f32,
    /// Rotation/scaling origin, in unscaled source pixels relative to the
    /// sprite's top-left corner.
    pub origin: Vec2,
    /// Mirror flags.
    pub effects: SpriteEffects,
    /// Layer depth, consumed by the depth-based sort modes and written into
    /// the vertex `z` component.
    pub depth: f32,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            source: None,
            color: Color::WHITE,
            rotation: 0.0,
            origin: Vec2::ZERO,
            effects: SpriteEffects::empty(),
            depth: 0.0,
        }
    }
}

impl DrawParams {
    /// Convenience for a tint-only submission.
    pub fn tinted(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_flags_are_involutions() {
        let both = SpriteEffects::FLIP_HORIZONTALLY | SpriteEffects::FLIP_VERTICALLY;
        assert_eq!(both ^ both, SpriteEffects::empty());
    }
}
