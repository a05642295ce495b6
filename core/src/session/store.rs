//! Ordered store of committed segments plus the single pending start point.

use super::{SessionError, SessionResult};
use crate::geometry::{Point, Segment};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentStore {
    // Index order is drawing order.
    segments: Vec<Segment>,
    pending: Option<Point>,
}

impl SegmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start drawing a segment at `p`.
    pub fn begin_segment(&mut self, p: Point) -> SessionResult<()> {
        if self.pending.is_some() {
            return Err(SessionError::InvalidState("a segment is already being drawn"));
        }
        self.pending = Some(p);
        Ok(())
    }

    /// Finish the pending segment at `p`.
    ///
    /// Returns the index of the new segment, or `None` when `p` equals the
    /// pending start and the zero-length segment was discarded.
    pub fn commit_segment(&mut self, p: Point) -> SessionResult<Option<usize>> {
        let start = self
            .pending
            .take()
            .ok_or(SessionError::InvalidState("no segment is being drawn"))?;

        if start == p {
            return Ok(None);
        }

        self.segments.push(Segment::new(start, p));
        Ok(Some(self.segments.len() - 1))
    }

    pub fn cancel_pending(&mut self) -> SessionResult<()> {
        self.pending
            .take()
            .map(|_| ())
            .ok_or(SessionError::InvalidState("no segment to cancel"))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn pending_start(&self) -> Option<Point> {
        self.pending
    }

    pub fn is_drawing(&self) -> bool {
        self.pending.is_some()
    }
}
