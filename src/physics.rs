//! Axis-aligned geometry and the friction rule shared by every moving entity.

/// An axis-aligned rectangle in window pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Separating-axis test.  Touching edges count as overlap, so two boxes
    /// stacked flush on each other report a collision.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }

    /// Point test with open intervals on all four edges.
    pub fn contains_strict(&self, x: i32, y: i32) -> bool {
        x > self.x && x < self.right() && y > self.y && y < self.bottom()
    }
}

/// Moves `velocity` toward zero by `friction`, stopping at zero.
pub fn apply_friction(velocity: f32, friction: f32) -> f32 {
    if velocity > 0.0 {
        (velocity - friction).max(0.0)
    } else if velocity < 0.0 {
        (velocity + friction).min(0.0)
    } else {
        0.0
    }
}
