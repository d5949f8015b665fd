//! Small geometry helpers shared by the batching core and the submission API.

/// A rectangle with position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: std::ops::Add<Output = T> + Copy> Rect<T> {
    /// X coordinate of the right edge.
    pub fn right(&self) -> T {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    pub fn bottom(&self) -> T {
        self.y + self.height
    }
}

/// Integer pixel rectangle, used for texture source regions and glyph bounds.
pub type RectI = Rect<i32>;

/// Float rectangle, used for screen-space destination regions.
pub type RectF = Rect<f32>;

impl RectI {
    /// Widen to a float rectangle.
    pub fn to_f32(self) -> RectF {
        RectF::new(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}
