use super::Point;
use serde::{Deserialize, Serialize};

/// A straight segment between two committed endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// True when both endpoints coincide exactly.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    pub fn bounds(&self) -> Bounds2 {
        Bounds2::from_corners(&self.start, &self.end)
    }

    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }
}

/// Axis-aligned box in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    pub min: Point,
    pub max: Point,
}

impl Bounds2 {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Box spanned by two corners given in any order.
    pub fn from_corners(a: &Point, b: &Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn contains_x(&self, x: f64, margin: f64) -> bool {
        x >= self.min.x - margin && x <= self.max.x + margin
    }

    pub fn contains_y(&self, y: f64, margin: f64) -> bool {
        y >= self.min.y - margin && y <= self.max.y + margin
    }

    /// Inclusive containment with the box grown by `margin` on every side.
    pub fn contains_within(&self, p: &Point, margin: f64) -> bool {
        self.contains_x(p.x, margin) && self.contains_y(p.y, margin)
    }

    pub fn contains(&self, p: &Point) -> bool {
        self.contains_within(p, 0.0)
    }
}
