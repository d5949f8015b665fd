use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

static NEXT_SORTING_KEY: AtomicU64 = AtomicU64::new(0);

/// CPU-side handle for an externally owned GPU texture.
///
/// The batching core never touches pixel data; it only needs the pixel
/// dimensions, the reciprocal (texel) scale for converting pixel-space
/// source rectangles to normalized UVs, and a stable identity for the
/// texture-grouping sort mode. Handles are shared as `Arc<Texture2D>` and
/// same-texture draw runs are detected by pointer identity.
#[derive(Debug)]
pub struct Texture2D {
    width: u32,
    height: u32,
    texel_width: f32,
    texel_height: f32,
    sorting_key: u64,
    label: Option<String>,
}

impl Texture2D {
    /// Create a handle for a texture of the given pixel dimensions.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Arc<Self> {
        Arc::new(Self::build(width, height, None))
    }

    /// Create a labeled handle. The label only shows up in debug output.
    pub fn with_label(width: u32, height: u32, label: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::build(width, height, Some(label.into())))
    }

    fn build(width: u32, height: u32, label: Option<String>) -> Self {
        assert!(
            width > 0 && height > 0,
            "texture dimensions must be non-zero (got {width}x{height})"
        );
        Self {
            width,
            height,
            texel_width: 1.0 / width as f32,
            texel_height: 1.0 / height as f32,
            sorting_key: NEXT_SORTING_KEY.fetch_add(1, Ordering::Relaxed),
            label,
        }
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reciprocal of the pixel width (one texel in normalized U).
    pub fn texel_width(&self) -> f32 {
        self.texel_width
    }

    /// Reciprocal of the pixel height (one texel in normalized V).
    pub fn texel_height(&self) -> f32 {
        self.texel_height
    }

    /// Monotonically assigned identity used by the texture-grouping sort mode.
    pub fn sorting_key(&self) -> u64 {
        self.sorting_key
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
