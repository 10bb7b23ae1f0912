//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` enum and
//! maps each one to a stroke action. Coordinates are surface-relative CSS
//! pixels; use [`surface_point`] to convert from client coordinates.

use kurbo::Point;

/// Mouse button that produced a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button (or pen contact).
    Primary,
    /// Wheel / middle button.
    Auxiliary,
    /// Right button.
    Secondary,
    Other(i16),
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse pressed.
    PointerDown { x: f64, y: f64, button: PointerButton },

    /// Mouse moved, pressed or not.
    PointerMove { x: f64, y: f64 },

    /// Mouse released.
    PointerUp,

    /// Mouse left the surface.
    PointerLeave,

    /// Finger down. `touch` is the first active touch point, if any.
    TouchStart { touch: Option<(f64, f64)> },

    /// Finger moved.
    TouchMove { touch: Option<(f64, f64)> },

    /// Finger lifted.
    TouchEnd,
}

/// What an input event does to the current stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeAction {
    Begin(Point),
    Extend(Point),
    End,
    Ignore,
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64, button: PointerButton) -> Self {
        Self::PointerDown { x, y, button }
    }

    pub fn from_pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    /// Extract position if this event carries one.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::PointerDown { x, y, .. } | Self::PointerMove { x, y } => Some(Point::new(x, y)),
            Self::TouchStart { touch } | Self::TouchMove { touch } => {
                touch.map(|(x, y)| Point::new(x, y))
            }
            Self::PointerUp | Self::PointerLeave | Self::TouchEnd => None,
        }
    }

    /// Touch gestures on the surface must not scroll or zoom the page.
    pub fn suppresses_default(&self) -> bool {
        matches!(
            self,
            Self::TouchStart { .. } | Self::TouchMove { .. } | Self::TouchEnd
        )
    }

    /// Map the event to its stroke action.
    ///
    /// Only the primary button starts a stroke. A touch event without a
    /// touch point is ignored.
    pub fn action(&self) -> StrokeAction {
        match *self {
            Self::PointerDown {
                x,
                y,
                button: PointerButton::Primary,
            } => StrokeAction::Begin(Point::new(x, y)),
            Self::PointerDown { .. } => StrokeAction::Ignore,
            Self::TouchStart { .. } => self
                .position()
                .map_or(StrokeAction::Ignore, StrokeAction::Begin),
            Self::PointerMove { .. } | Self::TouchMove { .. } => self
                .position()
                .map_or(StrokeAction::Ignore, StrokeAction::Extend),
            Self::PointerUp | Self::PointerLeave | Self::TouchEnd => StrokeAction::End,
        }
    }
}

/// Convert client (viewport) coordinates into surface coordinates, given the
/// surface's bounding box origin.
pub fn surface_point(client_x: f64, client_y: f64, left: f64, top: f64) -> Point {
    Point::new(client_x - left, client_y - top)
}
