//! Visible-layout resolution.
//!
//! Composes the final renderable item set for one frame: the active items,
//! boundary holds, one-frame safety nets at exact cut points, and a small
//! window of just-started/just-ended items. Export mode skips all padding
//! and returns strictly the active items.
//!
//! Two resource policies live here:
//! - **Reference stability:** if a recompute produces the same `group_id`
//!   sequence as the previous result, the previous `Arc` is returned
//!   unchanged so a renderer keying on array identity does not remount
//!   decoders on a no-op.
//! - **Mount cap:** at most `max_mounted_items` video-backed items are
//!   returned, evicting the ones farthest from the playhead first.

use std::collections::BTreeSet;
use std::sync::Arc;

use frameline_common::PlaybackDefaults;

use crate::boundary::{boundary_overlap_state, BoundaryOverlapInput};
use crate::builder::{FrameLayout, FrameLayoutItem};
use crate::resolver::{find_active_indices, GapPolicy};

/// Options for one visible-layout resolution.
#[derive(Debug, Clone, Copy)]
pub struct VisibleLayoutOptions {
    pub current_frame: i64,
    pub fps: f64,

    /// Export rendering: no padding, no holds.
    pub is_exporting: bool,

    /// Source resolution, used to size the boundary overlap window.
    pub source_width: u32,
    pub source_height: u32,

    /// Cap on concurrently mounted video-backed items; 0 disables the cap.
    pub max_mounted_items: usize,

    /// Safety window (seconds) of just-started/just-ended items kept in
    /// the visible set around the playhead.
    pub hold_window_secs: f64,
}

impl VisibleLayoutOptions {
    /// Interactive options with engine defaults.
    pub fn new(current_frame: i64, fps: f64) -> Self {
        Self::from_playback(&PlaybackDefaults::default(), current_frame, fps)
    }

    /// Interactive options from configured playback tuning.
    pub fn from_playback(playback: &PlaybackDefaults, current_frame: i64, fps: f64) -> Self {
        Self {
            current_frame,
            fps,
            is_exporting: false,
            source_width: 1920,
            source_height: 1080,
            max_mounted_items: playback.max_mounted_items,
            hold_window_secs: playback.hold_window_secs,
        }
    }
}

/// Stateful resolver producing the renderable item set per frame.
///
/// Holds the previous result for the reference-stability optimization;
/// otherwise stateless between calls.
#[derive(Debug, Default)]
pub struct VisibleLayoutResolver {
    last_group_ids: Vec<String>,
    last_result: Option<Arc<[FrameLayoutItem]>>,
}

impl VisibleLayoutResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the visible item set for one frame.
    ///
    /// Returns a pointer-identical `Arc` to the previous result when the
    /// `group_id` sequence is unchanged.
    pub fn resolve(
        &mut self,
        layout: &FrameLayout,
        opts: &VisibleLayoutOptions,
    ) -> Arc<[FrameLayoutItem]> {
        let indices = visible_indices(layout, opts);

        let group_ids: Vec<String> = indices
            .iter()
            .map(|&i| layout.items()[i].group_id.clone())
            .collect();

        if let Some(last) = &self.last_result {
            if group_ids == self.last_group_ids {
                return Arc::clone(last);
            }
        }

        let result: Arc<[FrameLayoutItem]> = indices
            .iter()
            .map(|&i| layout.items()[i].clone())
            .collect();

        self.last_group_ids = group_ids;
        self.last_result = Some(Arc::clone(&result));
        result
    }
}

/// The visible indices for one frame, ascending, after holds and the cap.
fn visible_indices(layout: &FrameLayout, opts: &VisibleLayoutOptions) -> Vec<usize> {
    if layout.is_empty() {
        return Vec::new();
    }

    let active = find_active_indices(layout, opts.current_frame, GapPolicy::HoldNearest);
    if opts.is_exporting {
        return active;
    }

    let items = layout.items();
    let index = layout.index();
    let frame = opts.current_frame;

    let mut visible: BTreeSet<usize> = active.iter().copied().collect();

    // Boundary holds around the primary (topmost) resolved item.
    if let Some(&primary) = active.last() {
        let primary_item = &items[primary];
        let containing = primary_item.contains_frame(frame);

        let (active_ref, prev, next) = if containing {
            (
                Some(primary_item),
                primary.checked_sub(1).map(|i| &items[i]),
                items.get(primary + 1),
            )
        } else {
            // The resolver held a non-containing item: treat the playhead
            // as sitting in a gap between `primary` and its successor.
            (None, Some(primary_item), items.get(primary + 1))
        };

        let state = boundary_overlap_state(&BoundaryOverlapInput {
            current_frame: frame,
            fps: opts.fps,
            is_exporting: false,
            active: active_ref,
            prev,
            next,
            source_width: opts.source_width,
            source_height: opts.source_height,
        });

        if state.should_hold_prev_frame {
            if containing {
                if let Some(i) = primary.checked_sub(1) {
                    visible.insert(i);
                }
            } else {
                visible.insert(primary);
            }
        }
        if state.should_hold_next_frame && primary + 1 < items.len() {
            visible.insert(primary + 1);
        }
    }

    // One-frame nets at exact boundaries: the item ending at this frame
    // stays, and the neighbor before a just-started item stays.
    for &i in index.indices_ending_at(frame) {
        visible.insert(i);
    }
    for &i in index.indices_starting_at(frame) {
        visible.insert(i);
        if let Some(p) = i.checked_sub(1) {
            visible.insert(p);
        }
    }

    // Safety window of just-started/just-ended items, scanned only within
    // the index-pruned candidate range.
    let window = (opts.fps * opts.hold_window_secs).round() as i64;
    if window > 0 {
        // -1 keeps items whose end_frame lands exactly on the window edge.
        let lo = index.lower_bound_max_end_gt(frame - window - 1);
        if let Some(hi) = index.upper_bound_start_le(frame + window) {
            if lo <= hi {
                for (offset, item) in items[lo..=hi].iter().enumerate() {
                    let i = lo + offset;
                    if (item.start_frame - frame).abs() <= window
                        || (item.end_frame - frame).abs() <= window
                    {
                        visible.insert(i);
                    }
                }
            }
        }
    }

    apply_mount_cap(items, visible.into_iter().collect(), frame, opts.max_mounted_items)
}

/// Evict video-backed items farthest from the playhead until at most
/// `max_mounted` remain. Non-video items are never evicted; a
/// `max_mounted` of 0 disables eviction entirely.
fn apply_mount_cap(
    items: &[FrameLayoutItem],
    candidates: Vec<usize>,
    frame: i64,
    max_mounted: usize,
) -> Vec<usize> {
    let video: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&i| items[i].is_video_backed())
        .collect();

    if max_mounted == 0 || video.len() <= max_mounted {
        return candidates;
    }

    let mut ranked = video;
    ranked.sort_by_key(|&i| ((items[i].start_frame - frame).abs(), i));
    let evicted: BTreeSet<usize> = ranked[max_mounted..].iter().copied().collect();

    tracing::trace!(
        evicted = evicted.len(),
        kept = max_mounted,
        "mount cap evicting video items"
    );

    candidates
        .into_iter()
        .filter(|i| !evicted.contains(i))
        .collect()
}
