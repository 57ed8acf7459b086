//! Active-item resolution.
//!
//! Answers "which items are active at frame N" against a built layout.
//! Tracks may overlap (background + foreground), so the multi-item query
//! returns everything whose range contains the frame.
//!
//! Gap handling is an explicit, named policy rather than a side effect of
//! the search: [`GapPolicy::HoldNearest`] never returns an empty result
//! for a non-empty layout (a briefly held stale frame beats a blank screen
//! while scrubbing), while [`GapPolicy::Strict`] reports gaps truthfully
//! so data bugs stay visible.

use crate::builder::{FrameLayout, FrameLayoutItem};

/// What to return when a frame falls in a gap or outside the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GapPolicy {
    /// Hold the nearest item: before the first item return the first,
    /// past the last return the last, and in an interior gap hold the
    /// most recently ended item. Result is never empty for a non-empty
    /// layout.
    #[default]
    HoldNearest,

    /// Return exactly the items containing the frame; gaps yield empty.
    Strict,
}

/// Indices of all items whose range contains `frame`, in layout order.
pub fn find_active_indices(layout: &FrameLayout, frame: i64, policy: GapPolicy) -> Vec<usize> {
    let items = layout.items();
    if items.is_empty() {
        return Vec::new();
    }

    if frame < items[0].start_frame {
        return match policy {
            GapPolicy::HoldNearest => vec![0],
            GapPolicy::Strict => Vec::new(),
        };
    }
    // Product policy, not a shortcut: past the end of the final item the
    // timeline shows that item, even if an earlier track still spans the
    // frame. Strict mode instead falls through to the scan.
    let last = items.len() - 1;
    if policy == GapPolicy::HoldNearest && frame >= items[last].end_frame {
        return vec![last];
    }

    let index = layout.index();
    // frame >= first start here, so a limit index always exists.
    let Some(limit_index) = index.upper_bound_start_le(frame) else {
        return Vec::new();
    };
    let start_index = index.lower_bound_max_end_gt(frame);

    let mut active = Vec::new();
    for i in start_index..=limit_index {
        if frame < items[i].end_frame {
            active.push(i);
        }
    }

    // Interior gap: the frame lies strictly between two items.
    if active.is_empty() && policy == GapPolicy::HoldNearest {
        active.push(limit_index);
    }

    active
}

/// All items active at `frame`, in layout order.
pub fn find_active_items<'a>(
    layout: &'a FrameLayout,
    frame: i64,
    policy: GapPolicy,
) -> Vec<&'a FrameLayoutItem> {
    find_active_indices(layout, frame, policy)
        .into_iter()
        .map(|i| &layout.items()[i])
        .collect()
}

/// The single best item index for `frame`.
///
/// Tie-break at cut points: an item starting exactly at `frame` wins over
/// a neighbor that merely contains it.
pub fn find_active_index(layout: &FrameLayout, frame: i64, policy: GapPolicy) -> Option<usize> {
    let active = find_active_indices(layout, frame, policy);
    active
        .iter()
        .rev()
        .find(|&&i| layout.items()[i].start_frame == frame)
        .copied()
        .or_else(|| active.last().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use frameline_clip_model::clip::{Clip, Recording, SourceType};
    use std::collections::HashMap;

    fn clip(id: &str, recording_id: &str, start: f64, duration: f64) -> Clip {
        Clip {
            id: id.to_string(),
            recording_id: recording_id.to_string(),
            start_time_ms: start,
            duration_ms: duration,
            source_in_ms: 0.0,
            source_out_ms: duration,
            playback_rate: 1.0,
            transition_in: None,
            transition_out: None,
            intro_fade_ms: None,
            outro_fade_ms: None,
        }
    }

    fn video_recordings(ids: &[&str]) -> HashMap<String, Recording> {
        ids.iter()
            .map(|id| {
                (
                    id.to_string(),
                    Recording {
                        id: id.to_string(),
                        source_type: SourceType::Video,
                        width: 1920,
                        height: 1080,
                    },
                )
            })
            .collect()
    }

    /// Three back-to-back clips: frames [0,30), [30,60), [60,90).
    fn sequential_layout() -> FrameLayout {
        let recs = video_recordings(&["r1", "r2", "r3"]);
        let clips = vec![
            clip("a", "r1", 0.0, 1000.0),
            clip("b", "r2", 1000.0, 1000.0),
            clip("c", "r3", 2000.0, 1000.0),
        ];
        FrameLayout::build(&clips, 30.0, &recs)
    }

    /// Two items with a gap: frames [0,30) and [60,90).
    fn gapped_layout() -> FrameLayout {
        let recs = video_recordings(&["r1", "r2"]);
        let clips = vec![clip("a", "r1", 0.0, 1000.0), clip("b", "r2", 2000.0, 1000.0)];
        FrameLayout::build(&clips, 30.0, &recs)
    }

    /// Background [0,90) overlapped by foreground [30,60).
    fn overlapping_layout() -> FrameLayout {
        let recs = video_recordings(&["bg", "fg"]);
        let clips = vec![
            clip("a", "bg", 0.0, 3000.0),
            clip("b", "fg", 1000.0, 1000.0),
        ];
        FrameLayout::build(&clips, 30.0, &recs)
    }

    #[test]
    fn test_before_first_holds_first() {
        let layout = sequential_layout();
        let active = find_active_indices(&layout, -10, GapPolicy::HoldNearest);
        assert_eq!(active, vec![0]);
    }

    #[test]
    fn test_past_last_holds_last() {
        let layout = sequential_layout();
        let active = find_active_indices(&layout, 90, GapPolicy::HoldNearest);
        assert_eq!(active, vec![2]);
        let active = find_active_indices(&layout, 10_000, GapPolicy::HoldNearest);
        assert_eq!(active, vec![2]);
    }

    #[test]
    fn test_strict_policy_reports_out_of_range_as_empty() {
        let layout = sequential_layout();
        assert!(find_active_indices(&layout, -10, GapPolicy::Strict).is_empty());
        assert!(find_active_indices(&layout, 90, GapPolicy::Strict).is_empty());
    }

    #[test]
    fn test_contained_frame_finds_its_item() {
        let layout = sequential_layout();
        for (frame, expected) in [(0, 0), (29, 0), (30, 1), (59, 1), (60, 2), (89, 2)] {
            let active = find_active_indices(&layout, frame, GapPolicy::HoldNearest);
            assert_eq!(active, vec![expected], "frame {frame}");
        }
    }

    #[test]
    fn test_overlap_returns_all_containing_items() {
        let layout = overlapping_layout();
        let active = find_active_indices(&layout, 45, GapPolicy::HoldNearest);
        assert_eq!(active, vec![0, 1]);
    }

    #[test]
    fn test_strict_finds_background_past_last_items_end() {
        // bg [0,90) still spans frame 70 even though fg (the last item)
        // ended at 60; strict mode must not stop at the last item's end.
        let layout = overlapping_layout();
        let active = find_active_indices(&layout, 70, GapPolicy::Strict);
        assert_eq!(active, vec![0]);
    }

    #[test]
    fn test_interior_gap_holds_most_recently_ended() {
        let layout = gapped_layout();
        let active = find_active_indices(&layout, 45, GapPolicy::HoldNearest);
        assert_eq!(active, vec![0]);
    }

    #[test]
    fn test_interior_gap_strict_is_empty() {
        let layout = gapped_layout();
        assert!(find_active_indices(&layout, 45, GapPolicy::Strict).is_empty());
    }

    #[test]
    fn test_never_empty_under_hold_nearest() {
        let layout = gapped_layout();
        for frame in -50..150 {
            assert!(
                !find_active_indices(&layout, frame, GapPolicy::HoldNearest).is_empty(),
                "frame {frame}"
            );
        }
    }

    #[test]
    fn test_empty_layout_is_empty_under_any_policy() {
        let layout = FrameLayout::empty();
        assert!(find_active_indices(&layout, 0, GapPolicy::HoldNearest).is_empty());
        assert!(find_active_indices(&layout, 0, GapPolicy::Strict).is_empty());
    }

    #[test]
    fn test_cut_point_tie_break_prefers_starting_item() {
        // Background spans the cut; a new clip starts exactly at frame 30.
        let layout = overlapping_layout();
        let best = find_active_index(&layout, 30, GapPolicy::HoldNearest).unwrap();
        assert_eq!(layout.items()[best].clip.id, "b");
    }

    #[test]
    fn test_single_best_defaults_to_topmost_active() {
        let layout = overlapping_layout();
        let best = find_active_index(&layout, 45, GapPolicy::HoldNearest).unwrap();
        assert_eq!(layout.items()[best].clip.id, "b");
    }

    #[test]
    fn test_find_active_items_matches_indices() {
        let layout = overlapping_layout();
        let items = find_active_items(&layout, 45, GapPolicy::HoldNearest);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].clip.id, "a");
        assert_eq!(items[1].clip.id, "b");
    }
}
