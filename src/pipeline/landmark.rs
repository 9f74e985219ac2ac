//! Hand landmarks and reference-point extraction
//!
//! MediaPipe delivers 21 normalized landmarks per hand. The temporal
//! pipeline only tracks four reference points derived from them: wrist,
//! palm center (average of wrist + the four finger bases), thumb tip and
//! index tip.

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const RING_MCP: usize = 13;
pub const PINKY_MCP: usize = 17;

/// Number of landmarks per detected hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Finger bases that contribute to the palm center (together with the wrist)
pub const PALM_BASE_INDICES: [usize; 4] = [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single landmark point (normalized 0-1 coordinates, optional depth)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: Option<f32>,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_z(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z: Some(z) }
    }
}

/// The four tracked reference points for one frame.
///
/// Each point is optional: a missing hand or malformed landmark list
/// degrades to `None`, never to an error.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReferencePoints {
    pub wrist: Option<Landmark>,
    pub palm_center: Option<Landmark>,
    pub thumb_tip: Option<Landmark>,
    pub index_tip: Option<Landmark>,
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Extract the reference points from the first hand's landmarks.
///
/// Anything short of a full 21-point hand yields all-`None` points.
pub fn extract_reference_points(hand: Option<&[Landmark]>) -> ReferencePoints {
    let points = match hand {
        Some(p) if p.len() >= HAND_LANDMARK_COUNT => p,
        _ => return ReferencePoints::default(),
    };

    ReferencePoints {
        wrist: Some(points[WRIST]),
        palm_center: Some(palm_center(points)),
        thumb_tip: Some(points[THUMB_TIP]),
        index_tip: Some(points[INDEX_TIP]),
    }
}

/// Palm center = average of the wrist and the four finger bases.
/// Depth is averaged only when all five contributors define it.
fn palm_center(points: &[Landmark]) -> Landmark {
    let mut sum_x = points[WRIST].x;
    let mut sum_y = points[WRIST].y;
    let mut sum_z = points[WRIST].z;

    for &i in PALM_BASE_INDICES.iter() {
        sum_x += points[i].x;
        sum_y += points[i].y;
        sum_z = match (sum_z, points[i].z) {
            (Some(acc), Some(z)) => Some(acc + z),
            _ => None,
        };
    }

    let n = (PALM_BASE_INDICES.len() + 1) as f32;
    Landmark {
        x: sum_x / n,
        y: sum_y / n,
        z: sum_z.map(|z| z / n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_hand() -> Vec<Landmark> {
        (0..HAND_LANDMARK_COUNT)
            .map(|i| Landmark::new(i as f32 * 0.01, 0.5))
            .collect()
    }

    #[test]
    fn test_extracts_all_four_points() {
        let hand = full_hand();
        let refs = extract_reference_points(Some(&hand));
        assert_eq!(refs.wrist, Some(hand[WRIST]));
        assert_eq!(refs.thumb_tip, Some(hand[THUMB_TIP]));
        assert_eq!(refs.index_tip, Some(hand[INDEX_TIP]));
        assert!(refs.palm_center.is_some());
    }

    #[test]
    fn test_palm_center_is_average_of_wrist_and_bases() {
        let hand = full_hand();
        let refs = extract_reference_points(Some(&hand));
        let expected_x = (hand[WRIST].x
            + hand[INDEX_MCP].x
            + hand[MIDDLE_MCP].x
            + hand[RING_MCP].x
            + hand[PINKY_MCP].x)
            / 5.0;
        let palm = refs.palm_center.unwrap();
        assert!((palm.x - expected_x).abs() < 1e-6);
        assert!((palm.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_missing_hand_yields_none_points() {
        let refs = extract_reference_points(None);
        assert_eq!(refs, ReferencePoints::default());
    }

    #[test]
    fn test_truncated_landmark_list_yields_none_points() {
        let short: Vec<Landmark> = (0..5).map(|_| Landmark::new(0.1, 0.1)).collect();
        let refs = extract_reference_points(Some(&short));
        assert_eq!(refs, ReferencePoints::default());
    }

    #[test]
    fn test_palm_depth_only_when_all_contributors_have_it() {
        let mut hand: Vec<Landmark> = (0..HAND_LANDMARK_COUNT)
            .map(|i| Landmark::with_z(i as f32 * 0.01, 0.5, 0.1))
            .collect();
        let refs = extract_reference_points(Some(&hand));
        assert!(refs.palm_center.unwrap().z.is_some());

        hand[MIDDLE_MCP].z = None;
        let refs = extract_reference_points(Some(&hand));
        assert!(refs.palm_center.unwrap().z.is_none());
    }
}
