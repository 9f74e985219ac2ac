//! Windowed majority vote over buffered static labels
//!
//! Smooths single-frame classification flicker: each position takes the
//! label that wins its surrounding window, with confidence-weighted
//! tie-breaking between real gestures.

use super::labels::normalize;

/// Default vote window (frames); valid sizes are 3 and 5
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// One smoothed label with its vote share
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothedLabel {
    pub label: Option<String>,
    pub confidence: f32,
}

/// Majority-filter the ordered (label, confidence) sequence.
///
/// Output has the same length and order as the input. The emitted
/// confidence is winning count over the configured window size, so edge
/// positions with clipped windows top out below 1.0.
pub fn majority_filter(input: &[(Option<&str>, f32)], window_size: usize) -> Vec<SmoothedLabel> {
    let n = input.len();
    let h = window_size / 2;
    let mut out = Vec::with_capacity(n);

    for i in 0..n {
        let lo = i.saturating_sub(h);
        let hi = (i + h).min(n - 1);
        out.push(vote(&input[lo..=hi], window_size));
    }

    out
}

/// Tally one window. The tally keeps first-seen order, which makes every
/// tie-break deterministic.
fn vote(window: &[(Option<&str>, f32)], window_size: usize) -> SmoothedLabel {
    // (normalized label, count, confidence sum over its occurrences)
    let mut tally: Vec<(Option<&str>, usize, f32)> = Vec::with_capacity(window.len());
    for (raw, conf) in window {
        let label = normalize(*raw);
        match tally.iter_mut().find(|t| t.0 == label) {
            Some(slot) => {
                slot.1 += 1;
                slot.2 += conf;
            }
            None => tally.push((label, 1, *conf)),
        }
    }

    let best_count = match tally.iter().map(|t| t.1).max() {
        Some(c) => c,
        None => {
            return SmoothedLabel {
                label: None,
                confidence: 0.0,
            }
        }
    };

    // Tie-break: a real gesture beats absence; among real gestures the
    // higher average confidence wins; an all-absent tie stays absent.
    let mut winner: Option<&(Option<&str>, usize, f32)> = None;
    for cand in tally.iter().filter(|t| t.1 == best_count) {
        let better = match winner {
            None => true,
            Some(cur) => match (cand.0.is_some(), cur.0.is_some()) {
                (true, false) => true,
                (false, _) => false,
                (true, true) => cand.2 / cand.1 as f32 > cur.2 / cur.1 as f32,
            },
        };
        if better {
            winner = Some(cand);
        }
    }

    match winner {
        Some(&(label, count, _)) => SmoothedLabel {
            label: label.map(str::to_owned),
            confidence: count as f32 / window_size as f32,
        },
        None => SmoothedLabel {
            label: None,
            confidence: 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::labels::{CLOSED_FIST, NO_GESTURE, OPEN_PALM};

    fn uniform(label: &'static str, n: usize) -> Vec<(Option<&'static str>, f32)> {
        vec![(Some(label), 0.9); n]
    }

    #[test]
    fn test_output_length_equals_input_length() {
        for n in 0..10 {
            let input = uniform(OPEN_PALM, n);
            assert_eq!(majority_filter(&input, 5).len(), n);
        }
    }

    #[test]
    fn test_unanimous_window_wins_with_full_confidence() {
        let input = uniform(OPEN_PALM, 7);
        let out = majority_filter(&input, 5);
        // Center index sees a full 5-frame window
        assert_eq!(out[3].label.as_deref(), Some(OPEN_PALM));
        assert!((out[3].confidence - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_edge_windows_are_clipped_not_padded() {
        let input = uniform(OPEN_PALM, 7);
        let out = majority_filter(&input, 5);
        // Index 0 only sees 3 of the 5 window slots
        assert!((out[0].confidence - 3.0 / 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_majority_overrides_flicker() {
        let input = vec![
            (Some(OPEN_PALM), 0.9),
            (Some(OPEN_PALM), 0.9),
            (Some(CLOSED_FIST), 0.9),
            (Some(OPEN_PALM), 0.9),
            (Some(OPEN_PALM), 0.9),
        ];
        let out = majority_filter(&input, 5);
        assert_eq!(out[2].label.as_deref(), Some(OPEN_PALM));
    }

    #[test]
    fn test_sentinel_counts_as_absence() {
        let input = vec![
            (Some(NO_GESTURE), 0.9),
            (None, 0.0),
            (Some(NO_GESTURE), 0.9),
        ];
        let out = majority_filter(&input, 3);
        for sl in &out {
            assert_eq!(sl.label, None);
        }
    }

    #[test]
    fn test_tie_prefers_real_gesture_over_absence() {
        // Window of 4 at index 1: two absent, two Open_Palm
        let input = vec![
            (None, 0.0),
            (Some(OPEN_PALM), 0.6),
            (None, 0.0),
            (Some(OPEN_PALM), 0.6),
        ];
        let out = majority_filter(&input, 5);
        assert_eq!(out[1].label.as_deref(), Some(OPEN_PALM));
    }

    #[test]
    fn test_tie_between_gestures_goes_to_higher_avg_confidence() {
        let input = vec![
            (Some(OPEN_PALM), 0.5),
            (Some(CLOSED_FIST), 0.9),
            (Some(OPEN_PALM), 0.5),
            (Some(CLOSED_FIST), 0.9),
        ];
        // Index 1 with window 5 sees all four entries: 2 vs 2 tie
        let out = majority_filter(&input, 5);
        assert_eq!(out[1].label.as_deref(), Some(CLOSED_FIST));
    }

    #[test]
    fn test_all_absent_tie_stays_absent() {
        let input: Vec<(Option<&str>, f32)> = vec![(None, 0.0); 4];
        let out = majority_filter(&input, 3);
        assert!(out.iter().all(|sl| sl.label.is_none()));
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let input: Vec<(Option<&str>, f32)> = Vec::new();
        assert!(majority_filter(&input, 5).is_empty());
    }
}
