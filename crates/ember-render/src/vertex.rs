use bytemuck::{Pod, Zeroable};

/// One sprite vertex as staged for the GPU: position (with the layer depth
/// in `z`), tint color, and normalized texture coordinates.
///
/// 36 bytes, `#[repr(C)]`, `Pod` — a staged `&[SpriteVertex]` can be cast
/// to bytes and uploaded verbatim by a draw target.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub uv: [f32; 2],
}

impl SpriteVertex {
    /// Size of one vertex in bytes.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn new(position: [f32; 3], color: [f32; 4], uv: [f32; 2]) -> Self {
        Self {
            position,
            color,
            uv,
        }
    }
}
