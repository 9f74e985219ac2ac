//! Static gesture labels from the recognizer
//!
//! The recognizer emits one top label+confidence per hand per frame.
//! Three labels drive the temporal gestures; everything downstream treats
//! the "None" sentinel and a missing classification as the same value.

/// Recognizer labels this pipeline reacts to (MediaPipe canned set)
pub const OPEN_PALM: &str = "Open_Palm";
pub const CLOSED_FIST: &str = "Closed_Fist";
pub const POINTING_UP: &str = "Pointing_Up";

/// Sentinel the recognizer emits when no gesture is recognized
pub const NO_GESTURE: &str = "None";

/// Single-frame classification for one hand
#[derive(Clone, Debug, PartialEq)]
pub struct StaticGesture {
    pub label: String,
    pub confidence: f32,
}

impl StaticGesture {
    pub fn new(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Collapse the "None" sentinel to absence. All label comparison and
/// merging in the pipeline goes through this.
pub fn normalize(label: Option<&str>) -> Option<&str> {
    label.filter(|l| *l != NO_GESTURE)
}
