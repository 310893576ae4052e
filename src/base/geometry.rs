//! Notation geometry primitives.
//!
//! Positions inside a diagram are stored relative to the containing shape.
//! Inbound operations carry absolute coordinates; [`Point::relative_to`]
//! performs the translation once the container has been resolved.

use serde::{Deserialize, Serialize};

/// A 2D position in diagram coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate an absolute position into one relative to `origin`.
    pub fn relative_to(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

/// Width and height of a shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub width: f64,
    pub height: f64,
}

impl Dimension {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Position and size of a shape within its container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub position: Point,
    pub size: Dimension,
}

impl Bounds {
    pub fn new(position: Point, size: Dimension) -> Self {
        Self { position, size }
    }

    /// The absolute position of `child` given this container's position.
    pub fn absolute_of(&self, child: Point) -> Point {
        Point::new(self.position.x + child.x, self.position.y + child.y)
    }
}
