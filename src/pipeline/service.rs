//! Gesture service - per-frame pipeline driver and event emission
//!
//! One instance owns the smoother + buffer and is driven once per
//! processed frame. Point events bypass the buffer entirely; swipe and
//! click come out of the segmented buffer tail and clear all accumulated
//! state afterwards, which is the sole debounce mechanism.

use super::buffer::{BufferEntry, GestureBuffer, DEFAULT_BUFFER_SIZE};
use super::ema::{EmaSmoother, DEFAULT_ALPHA};
use super::events::GestureEvent;
use super::labels::{StaticGesture, POINTING_UP};
use super::landmark::{extract_reference_points, Landmark, ReferencePoints};
use super::majority::{majority_filter, DEFAULT_WINDOW_SIZE};
use super::matcher::{match_signatures, Signature, DEFAULT_SWIPE_THRESHOLD};
use super::segment::{segment, Block, DEFAULT_MAX_GAP_SIZE};

/// Vertical offset applied to point events so the cursor rides above the
/// palm instead of on top of it
pub const POINT_Y_OFFSET: f32 = 0.3;

/// Pipeline tuning. All values are empirically chosen in normalized image
/// units / frames and runtime-changeable; changes apply from the next
/// processed frame.
#[derive(Clone, Debug)]
pub struct GestureConfig {
    pub buffer_size: usize,
    pub ema_alpha: f32,
    /// Majority vote window, 3 or 5
    pub majority_window: usize,
    pub max_gap: usize,
    pub swipe_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            ema_alpha: DEFAULT_ALPHA,
            majority_window: DEFAULT_WINDOW_SIZE,
            max_gap: DEFAULT_MAX_GAP_SIZE,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

/// Snapshot of one processed frame, for rendering subscribers
#[derive(Clone, Debug)]
pub struct FrameData {
    pub points: ReferencePoints,
    pub gesture: Option<StaticGesture>,
    pub timestamp_ms: f64,
}

impl FrameData {
    /// Flatten the four reference points to
    /// `[wrist x,y, palm x,y, thumb x,y, index x,y]`; NaN marks absence
    pub fn to_flat(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(8);
        for point in [
            self.points.wrist,
            self.points.palm_center,
            self.points.thumb_tip,
            self.points.index_tip,
        ] {
            match point {
                Some(p) => {
                    flat.push(p.x);
                    flat.push(p.y);
                }
                None => {
                    flat.push(f32::NAN);
                    flat.push(f32::NAN);
                }
            }
        }
        flat
    }
}

/// Everything one frame produced
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub frame: FrameData,
    pub events: Vec<GestureEvent>,
}

/// Single-instance temporal gesture service
pub struct GestureService {
    config: GestureConfig,
    smoother: EmaSmoother,
    buffer: GestureBuffer,
    last_frame: Option<FrameData>,
    last_timestamp_ms: Option<f64>,
}

impl GestureService {
    pub fn new(config: GestureConfig) -> Self {
        let smoother = EmaSmoother::new(config.ema_alpha);
        let buffer = GestureBuffer::new(config.buffer_size);
        Self {
            config,
            smoother,
            buffer,
            last_frame: None,
            last_timestamp_ms: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Reconfigure; takes effect from the next processed frame
    pub fn set_config(&mut self, config: GestureConfig) {
        self.smoother.set_alpha(config.ema_alpha);
        self.buffer.set_capacity(config.buffer_size);
        self.config = config;
    }

    /// Drive the pipeline with one inference result.
    ///
    /// `hand` is the first hand's 21 landmarks when one was detected.
    /// Returns `None` when the timestamp repeats the previous frame's
    /// (the host delivered an unchanged video frame); otherwise the
    /// snapshot plus every event the frame produced, in emission order.
    pub fn process_frame(
        &mut self,
        hand: Option<&[Landmark]>,
        gesture: Option<StaticGesture>,
        timestamp_ms: f64,
    ) -> Option<FrameOutput> {
        if self.last_timestamp_ms == Some(timestamp_ms) {
            return None;
        }
        self.last_timestamp_ms = Some(timestamp_ms);

        let raw = extract_reference_points(hand);
        let points = self.smoother.smooth(&raw);
        let mut events = Vec::new();

        // Continuous point path: buffer-independent, no debounce
        if let Some(event) = point_event(gesture.as_ref(), &points) {
            events.push(event);
        }

        // Buffered path: append, segment, match
        self.buffer.push(BufferEntry {
            points,
            gesture: gesture.clone(),
            timestamp_ms,
        });
        if let Some(event) = self.detect_discrete() {
            events.push(event);
            // Sole debounce: the stale overlapping window must not re-fire
            self.buffer.clear();
            self.smoother.reset();
        }

        let frame = FrameData {
            points,
            gesture,
            timestamp_ms,
        };
        self.last_frame = Some(frame.clone());
        Some(FrameOutput { frame, events })
    }

    /// Segment the buffered labels and test the gesture signatures
    fn detect_discrete(&self) -> Option<GestureEvent> {
        let labels = self.buffer.labels();
        let smoothed = majority_filter(&labels, self.config.majority_window);
        let blocks = segment(&smoothed, self.config.max_gap);
        match match_signatures(&blocks)? {
            Signature::Swipe => self.swipe_event(&blocks),
            Signature::Click => Some(GestureEvent::Click),
        }
    }

    /// Palm travel across the closing fist decides the swipe direction.
    /// The camera image is mirrored for the user, so positive travel is a
    /// left swipe. A structural match that fails the threshold (or lacks
    /// palm data) produces no event and no buffer clear.
    fn swipe_event(&self, blocks: &[Block]) -> Option<GestureEvent> {
        let last = blocks.last()?;
        let tail_x = self.buffer.palm_x(self.buffer.len().checked_sub(1)?)?;
        let start_x = self.buffer.palm_x(last.start)?;
        let dx = tail_x - start_x;

        if dx > self.config.swipe_threshold {
            Some(GestureEvent::SwipeLeft)
        } else if dx < -self.config.swipe_threshold {
            Some(GestureEvent::SwipeRight)
        } else {
            None
        }
    }

    /// Latest processed snapshot
    pub fn current_frame(&self) -> Option<&FrameData> {
        self.last_frame.as_ref()
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Teardown: forget all accumulated state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.smoother.reset();
        self.last_frame = None;
        self.last_timestamp_ms = None;
    }
}

impl Default for GestureService {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

/// Pointing frames emit a cursor position synchronously, keyed off the
/// raw per-frame label (not the majority output) for low latency
fn point_event(
    gesture: Option<&StaticGesture>,
    points: &ReferencePoints,
) -> Option<GestureEvent> {
    let g = gesture?;
    if g.label != POINTING_UP {
        return None;
    }
    let palm = points.palm_center?;
    Some(GestureEvent::Point {
        x: palm.x,
        y: palm.y - POINT_Y_OFFSET,
    })
}
