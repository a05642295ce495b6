//! Drawing session: the single owner of committed segments, the pending
//! stroke, and the intersections found between segments.

pub mod store;
pub mod index;

#[cfg(test)]
mod tests_index;

pub use index::IntersectionIndex;
pub use store::SegmentStore;

use crate::geometry::{IntersectOptions, Point, Segment};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned by session operations. A failed call changes nothing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// The stroke currently being drawn, for preview rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub start: Point,
    pub cursor: Point,
}

/// Read-only snapshot of everything a renderer paints in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub segments: Vec<Segment>,
    pub intersections: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
}

/// Outcome of comparing the incremental result against a full recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyReport {
    pub segments: usize,
    pub incremental: usize,
    pub recomputed: usize,
    pub consistent: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingSession {
    store: SegmentStore,
    index: IntersectionIndex,
    cursor: Option<Point>,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: IntersectOptions) -> Self {
        Self {
            index: IntersectionIndex::with_options(options),
            ..Self::default()
        }
    }

    pub fn begin_segment(&mut self, p: Point) -> SessionResult<()> {
        self.store.begin_segment(p)?;
        self.cursor = Some(p);
        Ok(())
    }

    /// Commit the pending segment without indexing it.
    /// The caller forwards the returned index to `insert_new_intersections`.
    pub fn commit_segment(&mut self, p: Point) -> SessionResult<Option<usize>> {
        let committed = self.store.commit_segment(p)?;
        self.cursor = None;
        match committed {
            Some(index) => info!("Committed segment {}", index),
            None => debug!("Discarded zero-length segment at ({}, {})", p.x, p.y),
        }
        Ok(committed)
    }

    pub fn cancel_pending(&mut self) -> SessionResult<()> {
        self.store.cancel_pending()?;
        self.cursor = None;
        debug!("Cancelled pending segment");
        Ok(())
    }

    pub fn insert_new_intersections(&mut self, index: usize) -> SessionResult<Vec<Point>> {
        self.index.insert_new_intersections(self.store.segments(), index)
    }

    /// Commit the pending segment and record its intersections in one step.
    ///
    /// Returns `None` when the segment was zero-length and discarded.
    pub fn finish_segment(&mut self, p: Point) -> SessionResult<Option<(usize, Vec<Point>)>> {
        // The new segment must be the next one the index expects, or the
        // commit below could not be followed by a successful insert.
        if self.store.is_drawing() && self.index.indexed() != self.store.len() {
            return Err(SessionError::InvalidState("earlier segments are not indexed"));
        }
        let Some(index) = self.commit_segment(p)? else {
            return Ok(None);
        };
        let found = self.insert_new_intersections(index)?;
        if !found.is_empty() {
            info!("Segment {} added {} intersection(s)", index, found.len());
        }
        Ok(Some((index, found)))
    }

    pub fn recompute_all(&mut self) -> &[Point] {
        self.index.recompute_all(self.store.segments())
    }

    /// Compare the accumulated points with a from-scratch pass, as multisets.
    /// The accumulated sequence is left untouched.
    pub fn verify(&self) -> VerifyReport {
        let mut full = IntersectionIndex::with_options(*self.index.options());
        let recomputed = sorted_points(full.recompute_all(self.store.segments()));
        let incremental = sorted_points(self.index.points());
        VerifyReport {
            segments: self.store.len(),
            incremental: incremental.len(),
            recomputed: recomputed.len(),
            consistent: incremental == recomputed,
        }
    }

    /// Track the live pointer while a segment is being drawn.
    /// Ignored when nothing is pending.
    pub fn set_cursor(&mut self, p: Point) {
        if self.store.is_drawing() {
            self.cursor = Some(p);
        }
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn pending_start(&self) -> Option<Point> {
        self.store.pending_start()
    }

    pub fn is_drawing(&self) -> bool {
        self.store.is_drawing()
    }

    pub fn segments(&self) -> &[Segment] {
        self.store.segments()
    }

    pub fn intersections(&self) -> &[Point] {
        self.index.points()
    }

    pub fn store(&self) -> &SegmentStore {
        &self.store
    }

    pub fn index(&self) -> &IntersectionIndex {
        &self.index
    }

    pub fn frame(&self) -> Frame {
        let preview = match (self.store.pending_start(), self.cursor) {
            (Some(start), Some(cursor)) => Some(Preview { start, cursor }),
            _ => None,
        };
        Frame {
            segments: self.store.segments().to_vec(),
            intersections: self.index.points().to_vec(),
            preview,
        }
    }
}

/// Points ordered by `(x, y)`, for set-style comparison.
pub fn sorted_points(points: &[Point]) -> Vec<Point> {
    // Adding 0.0 folds -0.0 into 0.0 so total_cmp agrees with `==`.
    let key = |v: f64| v + 0.0;
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        key(a.x)
            .total_cmp(&key(b.x))
            .then(key(a.y).total_cmp(&key(b.y)))
    });
    sorted
}
