//! Layout index.
//!
//! Parallel lookup structures built once per `FrameLayout` and reused by
//! every frame query against it:
//! - `start_frames`: mirrors layout order, enables binary search for the
//!   rightmost item starting at or before a frame
//! - `max_end_prefix`: running maximum of `end_frame`, monotonic, so an
//!   entire expired prefix can be pruned in O(log n)
//! - exact-frame maps for items starting/ending at a given frame
//!
//! The index lives inside `FrameLayout` and is built at construction, so
//! it can never disagree with the items it describes.

use std::collections::HashMap;

use crate::builder::FrameLayoutItem;

#[derive(Debug, Clone, Default)]
pub(crate) struct LayoutIndex {
    start_frames: Vec<i64>,
    max_end_prefix: Vec<i64>,
    indices_by_start_frame: HashMap<i64, Vec<usize>>,
    indices_by_end_frame: HashMap<i64, Vec<usize>>,
}

impl LayoutIndex {
    /// Build the index in O(n).
    pub(crate) fn build(items: &[FrameLayoutItem]) -> Self {
        let mut start_frames = Vec::with_capacity(items.len());
        let mut max_end_prefix = Vec::with_capacity(items.len());
        let mut indices_by_start_frame: HashMap<i64, Vec<usize>> = HashMap::new();
        let mut indices_by_end_frame: HashMap<i64, Vec<usize>> = HashMap::new();

        let mut running_max = i64::MIN;
        for (i, item) in items.iter().enumerate() {
            start_frames.push(item.start_frame);
            running_max = running_max.max(item.end_frame);
            max_end_prefix.push(running_max);
            indices_by_start_frame
                .entry(item.start_frame)
                .or_default()
                .push(i);
            indices_by_end_frame
                .entry(item.end_frame)
                .or_default()
                .push(i);
        }

        Self {
            start_frames,
            max_end_prefix,
            indices_by_start_frame,
            indices_by_end_frame,
        }
    }

    /// Rightmost index whose `start_frame <= frame`, if any.
    pub(crate) fn upper_bound_start_le(&self, frame: i64) -> Option<usize> {
        match self.start_frames.partition_point(|&start| start <= frame) {
            0 => None,
            n => Some(n - 1),
        }
    }

    /// First index whose running-max end frame still exceeds `frame`.
    /// Everything before it has already ended.
    pub(crate) fn lower_bound_max_end_gt(&self, frame: i64) -> usize {
        self.max_end_prefix.partition_point(|&end| end <= frame)
    }

    /// Indices of items starting exactly at `frame`.
    pub(crate) fn indices_starting_at(&self, frame: i64) -> &[usize] {
        self.indices_by_start_frame
            .get(&frame)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Indices of items ending exactly at `frame` (exclusive end).
    pub(crate) fn indices_ending_at(&self, frame: i64) -> &[usize] {
        self.indices_by_end_frame
            .get(&frame)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
