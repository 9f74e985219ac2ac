//! Pipeline module - temporal gesture processing
//!
//! Re-exports only. All logic in submodules. Nothing in here touches the
//! JS boundary, so every stage is natively unit-testable.

mod buffer;
mod ema;
mod events;
mod labels;
mod landmark;
mod majority;
mod matcher;
mod segment;
mod service;

pub use buffer::{BufferEntry, GestureBuffer, DEFAULT_BUFFER_SIZE};
pub use ema::{apply_ema, EmaSmoother, DEFAULT_ALPHA};
pub use events::GestureEvent;
pub use labels::{normalize, StaticGesture, CLOSED_FIST, NO_GESTURE, OPEN_PALM, POINTING_UP};
pub use landmark::{
    extract_reference_points, Landmark, ReferencePoints, HAND_LANDMARK_COUNT, INDEX_MCP,
    INDEX_TIP, MIDDLE_MCP, PALM_BASE_INDICES, PINKY_MCP, RING_MCP, THUMB_TIP, WRIST,
};
pub use majority::{majority_filter, SmoothedLabel, DEFAULT_WINDOW_SIZE};
pub use matcher::{
    match_signatures, matches, Signature, CLICK_PATTERN, DEFAULT_SWIPE_THRESHOLD, SWIPE_PATTERN,
};
pub use segment::{
    compress, merge_consecutive_same, merge_tiny_gaps, segment, Block, DEFAULT_MAX_GAP_SIZE,
};
pub use service::{
    FrameData, FrameOutput, GestureConfig, GestureService, POINT_Y_OFFSET,
};
