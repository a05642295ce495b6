use nalgebra as na;

/// A canvas coordinate. Equality is exact, component-wise.
pub type Point = na::Point2<f64>;

pub const EPSILON: f64 = 1e-6;

pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl ApproxEq for Point {
    fn approx_eq(&self, other: &Self) -> bool {
        na::distance_squared(self, other) < EPSILON * EPSILON
    }
}

pub mod primitives;
pub use primitives::*;

pub mod intersection;
pub use intersection::*;

/// 2x2 determinant of the rows `p` and `q`.
#[inline]
pub fn det(p: &Point, q: &Point) -> f64 {
    p.x * q.y - p.y * q.x
}
