//! Temporal gesture events delivered to subscribers

/// A debounced temporal gesture
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    SwipeLeft,
    SwipeRight,
    Click,
    /// Continuous pointer position (normalized), one per pointing frame
    Point { x: f32, y: f32 },
}

impl GestureEvent {
    /// Event name as delivered across the JS boundary
    pub fn name(&self) -> &'static str {
        match self {
            GestureEvent::SwipeLeft => "swipe_left",
            GestureEvent::SwipeRight => "swipe_right",
            GestureEvent::Click => "click",
            GestureEvent::Point { .. } => "point",
        }
    }

    /// Discrete events clear the buffer after firing; point events never do
    pub fn is_discrete(&self) -> bool {
        !matches!(self, GestureEvent::Point { .. })
    }
}
