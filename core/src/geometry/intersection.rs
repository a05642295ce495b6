//! Segment-segment intersection for drawn canvas geometry.
//!
//! The candidate point is the crossing of the two infinite lines, solved with
//! a 2x2 determinant system. It is then accepted only if it falls inside both
//! segments' bounding boxes grown by a fixed slack, so strokes that stop a
//! couple of pixels short of each other still register as crossing.

use super::{det, Point, Segment};
use serde::{Deserialize, Serialize};

/// Slack, in canvas units, applied on every side of a segment's bounding box.
pub const DEFAULT_TOLERANCE: f64 = 3.0;

/// How the determinant of the direction system is judged "parallel".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum ParallelTest {
    /// Lines are parallel only when the determinant is exactly zero.
    /// Near-parallel lines may produce a far-away candidate that the
    /// containment test then rejects, or may not.
    #[default]
    Exact,
    /// Lines are parallel when `|div| <= eps`.
    Epsilon(f64),
}

impl ParallelTest {
    pub fn is_parallel(&self, div: f64) -> bool {
        match *self {
            ParallelTest::Exact => div == 0.0,
            ParallelTest::Epsilon(eps) => div.abs() <= eps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectOptions {
    pub tolerance: f64,
    #[serde(default)]
    pub parallel: ParallelTest,
}

impl Default for IntersectOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            parallel: ParallelTest::Exact,
        }
    }
}

/// Intersection of segments `a1-a2` and `b1-b2` with the default options.
///
/// Returns `None` for parallel or coincident lines (collinear overlap is not
/// reported) and for crossings that fall outside either segment.
/// Callers must not pass zero-length segments.
pub fn intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    intersect_with(&IntersectOptions::default(), a1, a2, b1, b2)
}

pub fn intersect_with(
    opts: &IntersectOptions,
    a1: Point, a2: Point,
    b1: Point, b2: Point,
) -> Option<Point> {
    let xdiff = Point::new(a1.x - a2.x, b1.x - b2.x);
    let ydiff = Point::new(a1.y - a2.y, b1.y - b2.y);

    let div = det(&xdiff, &ydiff);
    if opts.parallel.is_parallel(div) {
        return None;
    }

    let d = Point::new(det(&a1, &a2), det(&b1, &b2));
    let candidate = Point::new(det(&d, &xdiff) / div, det(&d, &ydiff) / div);

    // Each axis of each segment is checked on its own; any miss rejects.
    let a = Segment::new(a1, a2).bounds();
    let b = Segment::new(b1, b2).bounds();
    let tol = opts.tolerance;
    if !a.contains_x(candidate.x, tol)
        || !b.contains_x(candidate.x, tol)
        || !a.contains_y(candidate.y, tol)
        || !b.contains_y(candidate.y, tol)
    {
        return None;
    }

    Some(candidate)
}

pub fn intersect_segments(a: &Segment, b: &Segment, opts: &IntersectOptions) -> Option<Point> {
    intersect_with(opts, a.start, a.end, b.start, b.end)
}
