//! Two-state pointer tracking: idle, or drawing from a last known point.

use kurbo::{Line, Point};

/// Pen state between input events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DrawingSession {
    #[default]
    Idle,
    Drawing {
        last: Point,
    },
}

impl DrawingSession {
    /// Start (or restart) a stroke at `at`.
    pub fn begin(&mut self, at: Point) {
        *self = Self::Drawing { last: at };
    }

    /// Move the pen to `to`, returning the segment to draw.
    /// `None` while idle.
    pub fn advance(&mut self, to: Point) -> Option<Line> {
        match self {
            Self::Idle => None,
            Self::Drawing { last } => {
                let segment = Line::new(*last, to);
                *last = to;
                Some(segment)
            }
        }
    }

    pub fn end(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn last_point(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Drawing { last } => Some(*last),
        }
    }
}
