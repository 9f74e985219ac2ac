//! Sliding frame buffer for temporal gesture analysis
//!
//! Fixed-capacity FIFO of smoothed reference points + static label +
//! timestamp. The oldest entry is evicted on insert when full; the whole
//! buffer is cleared after a discrete gesture fires (debounce).

use std::collections::VecDeque;

use super::landmark::ReferencePoints;
use super::labels::StaticGesture;

/// Default number of frames held for analysis (~1s at 30Hz)
pub const DEFAULT_BUFFER_SIZE: usize = 30;

/// One processed frame. Immutable once pushed.
#[derive(Clone, Debug)]
pub struct BufferEntry {
    pub points: ReferencePoints,
    pub gesture: Option<StaticGesture>,
    pub timestamp_ms: f64,
}

/// Fixed-capacity FIFO of processed frames
pub struct GestureBuffer {
    entries: VecDeque<BufferEntry>,
    capacity: usize,
}

impl GestureBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append at the tail, evicting the oldest entry when full
    pub fn push(&mut self, entry: BufferEntry) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change capacity at runtime; evicts oldest entries when shrinking
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn get(&self, index: usize) -> Option<&BufferEntry> {
        self.entries.get(index)
    }

    /// Ordered (label, confidence) pairs for the majority filter.
    /// Entries without a classification carry zero confidence.
    pub fn labels(&self) -> Vec<(Option<&str>, f32)> {
        self.entries
            .iter()
            .map(|e| match &e.gesture {
                Some(g) => (Some(g.label.as_str()), g.confidence),
                None => (None, 0.0),
            })
            .collect()
    }

    /// Smoothed palm-center x at a buffer index, when that frame had one
    pub fn palm_x(&self, index: usize) -> Option<f32> {
        self.entries.get(index)?.points.palm_center.map(|p| p.x)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for GestureBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::labels::OPEN_PALM;

    fn entry(ts: f64) -> BufferEntry {
        BufferEntry {
            points: ReferencePoints::default(),
            gesture: Some(StaticGesture::new(OPEN_PALM, 0.9)),
            timestamp_ms: ts,
        }
    }

    #[test]
    fn test_fifo_eviction_at_capacity() {
        let mut buf = GestureBuffer::new(3);
        for ts in 0..5 {
            buf.push(entry(ts as f64));
        }
        assert_eq!(buf.len(), 3);
        // Oldest two evicted
        assert_eq!(buf.get(0).unwrap().timestamp_ms, 2.0);
        assert_eq!(buf.get(2).unwrap().timestamp_ms, 4.0);
    }

    #[test]
    fn test_len_never_exceeds_capacity() {
        let mut buf = GestureBuffer::new(4);
        for ts in 0..100 {
            buf.push(entry(ts as f64));
            assert!(buf.len() <= buf.capacity());
        }
    }

    #[test]
    fn test_shrinking_capacity_evicts_oldest() {
        let mut buf = GestureBuffer::new(5);
        for ts in 0..5 {
            buf.push(entry(ts as f64));
        }
        buf.set_capacity(2);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(0).unwrap().timestamp_ms, 3.0);
    }

    #[test]
    fn test_labels_preserve_order_and_absence() {
        let mut buf = GestureBuffer::new(3);
        buf.push(entry(0.0));
        buf.push(BufferEntry {
            points: ReferencePoints::default(),
            gesture: None,
            timestamp_ms: 1.0,
        });
        let labels = buf.labels();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].0, Some(OPEN_PALM));
        assert_eq!(labels[1], (None, 0.0));
    }
}
