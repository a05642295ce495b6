pub mod geometry;
pub mod session;

pub use geometry::{intersect, Point, Segment};
pub use session::{DrawingSession, Frame, SessionError};

pub fn version() -> &'static str {
    "0.1.0"
}
