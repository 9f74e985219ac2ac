//! Block segmentation over the smoothed label sequence
//!
//! Three passes, strictly in this order: compress runs into blocks,
//! absorb tiny no-gesture gaps, coalesce adjacent same-label blocks.
//! Each pass consumes the full output of the previous one; reordering
//! them changes detection behavior.

use super::labels::normalize;
use super::majority::SmoothedLabel;

/// Frames of "no gesture" tolerated inside a gesture run
pub const DEFAULT_MAX_GAP_SIZE: usize = 2;

/// A maximal run of equal labels over one buffer snapshot.
/// Indices are inclusive and refer to positions in the snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub label: Option<String>,
    pub start: usize,
    pub end: usize,
}

impl Block {
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    fn is_gap(&self) -> bool {
        self.label.is_none()
    }
}

/// Compress the label sequence into maximal equal-label runs.
/// The output partitions `[0, n-1]`: no gaps, no overlaps.
pub fn compress(labels: &[SmoothedLabel]) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for (i, sl) in labels.iter().enumerate() {
        let label = normalize(sl.label.as_deref());
        match blocks.last_mut() {
            Some(last) if last.label.as_deref() == label => last.end = i,
            _ => blocks.push(Block {
                label: label.map(str::to_owned),
                start: i,
                end: i,
            }),
        }
    }

    blocks
}

/// Absorb no-gesture blocks of length <= max_gap into a neighbor.
///
/// The preceding non-gap block wins; a leading tiny gap is absorbed by
/// the following block; a tiny gap with no non-gap neighbor is dropped.
/// Never increases the block count.
pub fn merge_tiny_gaps(blocks: &[Block], max_gap: usize) -> Vec<Block> {
    let mut out: Vec<Block> = Vec::with_capacity(blocks.len());
    // Start index carried forward from a gap awaiting its following block
    let mut pending_start: Option<usize> = None;

    for block in blocks {
        if block.is_gap() && block.len() <= max_gap {
            match out.last_mut() {
                Some(prev) if !prev.is_gap() => prev.end = block.end,
                _ => {
                    pending_start.get_or_insert(block.start);
                }
            }
            continue;
        }

        let mut next = block.clone();
        if let Some(start) = pending_start.take() {
            if !next.is_gap() {
                next.start = start;
            }
        }
        out.push(next);
    }

    out
}

/// Coalesce adjacent blocks that now share a label (gap removal can leave
/// two runs of the same gesture touching)
pub fn merge_consecutive_same(blocks: &[Block]) -> Vec<Block> {
    let mut out: Vec<Block> = Vec::with_capacity(blocks.len());

    for block in blocks {
        match out.last_mut() {
            Some(prev) if prev.label == block.label => prev.end = block.end,
            _ => out.push(block.clone()),
        }
    }

    out
}

/// Full segmentation pass over one snapshot's smoothed labels
pub fn segment(labels: &[SmoothedLabel], max_gap: usize) -> Vec<Block> {
    merge_consecutive_same(&merge_tiny_gaps(&compress(labels), max_gap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::labels::{CLOSED_FIST, NO_GESTURE, OPEN_PALM};

    fn labels(seq: &[Option<&str>]) -> Vec<SmoothedLabel> {
        seq.iter()
            .map(|l| SmoothedLabel {
                label: l.map(str::to_owned),
                confidence: 0.8,
            })
            .collect()
    }

    fn block(label: Option<&str>, start: usize, end: usize) -> Block {
        Block {
            label: label.map(str::to_owned),
            start,
            end,
        }
    }

    #[test]
    fn test_compress_partitions_the_snapshot() {
        let input = labels(&[
            Some(OPEN_PALM),
            Some(OPEN_PALM),
            None,
            Some(CLOSED_FIST),
            Some(CLOSED_FIST),
            Some(CLOSED_FIST),
        ]);
        let blocks = compress(&input);
        assert_eq!(
            blocks,
            vec![
                block(Some(OPEN_PALM), 0, 1),
                block(None, 2, 2),
                block(Some(CLOSED_FIST), 3, 5),
            ]
        );
        // Partition invariant: contiguous, ascending, covers [0, n-1]
        assert_eq!(blocks[0].start, 0);
        for pair in blocks.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + 1);
        }
        assert_eq!(blocks.last().unwrap().end, input.len() - 1);
    }

    #[test]
    fn test_compress_treats_sentinel_as_absence() {
        let input = labels(&[Some(NO_GESTURE), None, Some(NO_GESTURE)]);
        assert_eq!(compress(&input), vec![block(None, 0, 2)]);
    }

    #[test]
    fn test_tiny_gap_absorbed_by_preceding_block() {
        let blocks = vec![
            block(Some(OPEN_PALM), 0, 4),
            block(None, 5, 6),
            block(Some(CLOSED_FIST), 7, 9),
        ];
        let merged = merge_tiny_gaps(&blocks, 2);
        assert_eq!(
            merged,
            vec![block(Some(OPEN_PALM), 0, 6), block(Some(CLOSED_FIST), 7, 9)]
        );
    }

    #[test]
    fn test_leading_gap_absorbed_by_following_block() {
        let blocks = vec![block(None, 0, 1), block(Some(OPEN_PALM), 2, 5)];
        let merged = merge_tiny_gaps(&blocks, 2);
        assert_eq!(merged, vec![block(Some(OPEN_PALM), 0, 5)]);
    }

    #[test]
    fn test_isolated_tiny_gap_is_dropped() {
        let blocks = vec![block(None, 0, 1)];
        assert!(merge_tiny_gaps(&blocks, 2).is_empty());
    }

    #[test]
    fn test_long_gap_left_unchanged() {
        let blocks = vec![
            block(Some(OPEN_PALM), 0, 2),
            block(None, 3, 6),
            block(Some(CLOSED_FIST), 7, 8),
        ];
        assert_eq!(merge_tiny_gaps(&blocks, 2), blocks);
    }

    #[test]
    fn test_gap_merge_never_increases_block_count() {
        let blocks = vec![
            block(None, 0, 1),
            block(Some(OPEN_PALM), 2, 3),
            block(None, 4, 4),
            block(Some(CLOSED_FIST), 5, 9),
            block(None, 10, 11),
        ];
        assert!(merge_tiny_gaps(&blocks, 2).len() <= blocks.len());
    }

    #[test]
    fn test_same_label_blocks_coalesce_across_absorbed_gap() {
        let input = labels(&[
            Some(OPEN_PALM),
            Some(OPEN_PALM),
            None,
            Some(OPEN_PALM),
            Some(OPEN_PALM),
        ]);
        let blocks = segment(&input, 2);
        assert_eq!(blocks, vec![block(Some(OPEN_PALM), 0, 4)]);
    }

    #[test]
    fn test_segment_keeps_distinct_runs_separate() {
        let input = labels(&[
            Some(OPEN_PALM),
            Some(OPEN_PALM),
            None,
            Some(CLOSED_FIST),
            Some(CLOSED_FIST),
        ]);
        let blocks = segment(&input, 2);
        assert_eq!(
            blocks,
            vec![block(Some(OPEN_PALM), 0, 2), block(Some(CLOSED_FIST), 3, 4)]
        );
    }
}
