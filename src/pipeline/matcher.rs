//! Suffix pattern matching over segmented blocks
//!
//! Tests the tail of the block sequence against the fixed gesture
//! signatures. Swipe is checked before click; only the first structurally
//! matching signature is evaluated each frame.

use super::labels::{normalize, CLOSED_FIST, OPEN_PALM, POINTING_UP};
use super::segment::Block;

/// Swipe: open palm that closes into a fist
pub const SWIPE_PATTERN: [&str; 2] = [OPEN_PALM, CLOSED_FIST];

/// Click: pointing finger that dips into a fist and back up
pub const CLICK_PATTERN: [&str; 3] = [POINTING_UP, CLOSED_FIST, POINTING_UP];

/// Minimum normalized palm travel for a swipe to fire
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 0.1;

/// Gesture signature the block tail matched structurally
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signature {
    Swipe,
    Click,
}

/// True when the tail blocks equal the pattern, anchored at the last
/// block. The comparison indexes backward from `blocks.len()`, so
/// trailing blocks after the pattern are never tolerated.
pub fn matches(blocks: &[Block], pattern: &[&str]) -> bool {
    if blocks.len() < pattern.len() {
        return false;
    }

    for k in (0..pattern.len()).rev() {
        let block = &blocks[blocks.len() - (pattern.len() - k)];
        if normalize(block.label.as_deref()) != normalize(Some(pattern[k])) {
            return false;
        }
    }

    true
}

/// Evaluate the signatures in priority order (swipe before click);
/// only the first structural match is reported
pub fn match_signatures(blocks: &[Block]) -> Option<Signature> {
    if matches(blocks, &SWIPE_PATTERN) {
        Some(Signature::Swipe)
    } else if matches(blocks, &CLICK_PATTERN) {
        Some(Signature::Click)
    } else {
        None
    }
}
