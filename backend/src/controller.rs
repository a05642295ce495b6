//! Pointer-driven session controller.
//!
//! Translates device events (top-left origin) into canvas points (bottom-left
//! origin) and drives the drawing session: left press starts a stroke, drag
//! moves the preview, left release commits it, right press cancels it.

use linecross_core::geometry::{IntersectOptions, Point};
use linecross_core::session::{DrawingSession, SessionError};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self { width: 500, height: 500 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Press,
    Release,
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// A pointer event in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    #[serde(default)]
    pub button: PointerButton,
    pub x: f64,
    pub y: f64,
}

pub struct SessionController {
    session: DrawingSession,
    canvas: CanvasSize,
}

impl SessionController {
    pub fn new(canvas: CanvasSize, options: IntersectOptions) -> Self {
        Self {
            session: DrawingSession::with_options(options),
            canvas: clamp_size(canvas),
        }
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn resize(&mut self, size: CanvasSize) {
        self.canvas = clamp_size(size);
    }

    /// Flip device y (top-left origin) into canvas y (bottom-left origin).
    pub fn to_canvas(&self, x: f64, y: f64) -> Point {
        Point::new(x, f64::from(self.canvas.height) - y)
    }

    /// Apply one pointer event. Returns true if the visible frame changed.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        let p = self.to_canvas(event.x, event.y);
        let result = match (event.kind, event.button) {
            (PointerKind::Press, PointerButton::Left) => self.session.begin_segment(p),
            (PointerKind::Release, PointerButton::Left) if self.session.is_drawing() => {
                self.session.finish_segment(p).map(|_| ())
            }
            (PointerKind::Press, PointerButton::Right) if self.session.is_drawing() => {
                self.session.cancel_pending()
            }
            (PointerKind::Move, _) if self.session.is_drawing() => {
                self.session.set_cursor(p);
                Ok(())
            }
            _ => return false,
        };

        match result {
            Ok(()) => true,
            Err(SessionError::InvalidState(reason)) => {
                debug!("Ignored {:?} {:?}: {}", event.kind, event.button, reason);
                false
            }
        }
    }
}

fn clamp_size(size: CanvasSize) -> CanvasSize {
    CanvasSize {
        width: size.width.max(1),
        height: size.height.max(1),
    }
}
