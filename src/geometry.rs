use serde::{Deserialize, Serialize};

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// What the negative control needs to know about the page at event time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub viewport: Size,
    pub button: Size,
}

impl Layout {
    pub const fn new(viewport: Size, button: Size) -> Self {
        Self { viewport, button }
    }

    /// Center of the button when its top-left corner sits at `origin`.
    pub fn button_center(&self, origin: Point) -> Point {
        Point::new(
            origin.x + self.button.width / 2.0,
            origin.y + self.button.height / 2.0,
        )
    }
}
