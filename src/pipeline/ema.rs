//! Exponential moving average smoothing for reference points
//!
//! Suppresses per-frame landmark jitter before buffering.
//! Lower alpha = more smoothing, more lag.

use super::landmark::{Landmark, ReferencePoints};

/// Default smoothing factor, range (0, 1]
pub const DEFAULT_ALPHA: f32 = 0.3;

/// Blend one point with the previous smoothed estimate.
///
/// - No previous estimate: the current point passes through unchanged.
/// - Current is `None` (point not detected this frame): output is `None`.
/// - Depth is only blended when both sides define it; otherwise the
///   current z passes through untouched.
pub fn apply_ema(
    current: Option<Landmark>,
    previous: Option<Landmark>,
    alpha: f32,
) -> Option<Landmark> {
    let cur = current?;
    let prev = match previous {
        Some(p) => p,
        None => return Some(cur),
    };

    let blend = |c: f32, p: f32| alpha * c + (1.0 - alpha) * p;

    let z = match (cur.z, prev.z) {
        (Some(cz), Some(pz)) => Some(blend(cz, pz)),
        _ => cur.z,
    };

    Some(Landmark {
        x: blend(cur.x, prev.x),
        y: blend(cur.y, prev.y),
        z,
    })
}

/// Stateful smoother for the four reference points.
///
/// Each point keeps its own running estimate. A `None` input produces a
/// `None` output for that frame but leaves the estimate intact, so a
/// momentary detection dropout does not corrupt the filter.
pub struct EmaSmoother {
    alpha: f32,
    wrist: Option<Landmark>,
    palm_center: Option<Landmark>,
    thumb_tip: Option<Landmark>,
    index_tip: Option<Landmark>,
}

impl EmaSmoother {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: clamp_alpha(alpha),
            wrist: None,
            palm_center: None,
            thumb_tip: None,
            index_tip: None,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = clamp_alpha(alpha);
    }

    /// Smooth one frame of reference points
    pub fn smooth(&mut self, raw: &ReferencePoints) -> ReferencePoints {
        let alpha = self.alpha;
        ReferencePoints {
            wrist: Self::channel(&mut self.wrist, raw.wrist, alpha),
            palm_center: Self::channel(&mut self.palm_center, raw.palm_center, alpha),
            thumb_tip: Self::channel(&mut self.thumb_tip, raw.thumb_tip, alpha),
            index_tip: Self::channel(&mut self.index_tip, raw.index_tip, alpha),
        }
    }

    fn channel(
        state: &mut Option<Landmark>,
        current: Option<Landmark>,
        alpha: f32,
    ) -> Option<Landmark> {
        let out = apply_ema(current, *state, alpha);
        if out.is_some() {
            *state = out;
        }
        out
    }

    /// Forget all running estimates
    pub fn reset(&mut self) {
        self.wrist = None;
        self.palm_center = None;
        self.thumb_tip = None;
        self.index_tip = None;
    }
}

impl Default for EmaSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

fn clamp_alpha(alpha: f32) -> f32 {
    if alpha > 0.0 && alpha <= 1.0 {
        alpha
    } else {
        DEFAULT_ALPHA
    }
}
