//! Accumulated intersection points, maintained incrementally as segments
//! are committed.

use super::{SessionError, SessionResult};
use crate::geometry::{intersect_segments, IntersectOptions, Point, Segment};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntersectionIndex {
    options: IntersectOptions,
    points: Vec<Point>,
    /// Number of leading segments whose pairs have been tested.
    indexed: usize,
}

impl IntersectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: IntersectOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn options(&self) -> &IntersectOptions {
        &self.options
    }

    /// Test segment `index` against every earlier segment and record the hits.
    ///
    /// Must be called once per committed segment, in commit order. Returns only
    /// the points found for this segment.
    pub fn insert_new_intersections(
        &mut self,
        segments: &[Segment],
        index: usize,
    ) -> SessionResult<Vec<Point>> {
        if index != self.indexed {
            return Err(SessionError::InvalidState("segment indexed out of commit order"));
        }
        let new_segment = segments
            .get(index)
            .ok_or(SessionError::InvalidState("no committed segment at index"))?;

        let found: Vec<Point> = segments[..index]
            .iter()
            .enumerate()
            .filter_map(|(other, existing)| {
                let hit = intersect_segments(new_segment, existing, &self.options)?;
                debug!("segment {} crosses {} at ({}, {})", index, other, hit.x, hit.y);
                Some(hit)
            })
            .collect();

        self.points.extend_from_slice(&found);
        self.indexed += 1;
        Ok(found)
    }

    /// Discard everything and test every unordered pair `i < j` from scratch.
    pub fn recompute_all(&mut self, segments: &[Segment]) -> &[Point] {
        self.points.clear();
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if let Some(hit) = intersect_segments(a, b, &self.options) {
                    self.points.push(hit);
                }
            }
        }
        self.indexed = segments.len();
        &self.points
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn indexed(&self) -> usize {
        self.indexed
    }
}
