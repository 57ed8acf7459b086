//! Boundary overlap calculation.
//!
//! Near a cut, interactive playback keeps the neighboring clip logically
//! "held" so its decoder is already mounted when the playhead crosses the
//! boundary. This module decides, per frame, which neighbors must be held.
//!
//! Export rendering bypasses the calculation entirely: frames are rendered
//! exactly once in order, so there is nothing to premount against.

use serde::{Deserialize, Serialize};

use crate::builder::FrameLayoutItem;

/// Overlap window for standard-resolution sources.
const OVERLAP_SECS: f64 = 0.5;

/// Tighter window for sources above 1920x1080; premounting high-resolution
/// decoders earlier than needed costs real memory.
const HIGH_RES_OVERLAP_SECS: f64 = 0.35;

/// Floor on the window so very low frame rates still get a usable hold.
const MIN_OVERLAP_FRAMES: i64 = 8;

/// Per-frame hold decisions around the current playhead position.
///
/// Ephemeral: computed fresh from the current item neighborhood and never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoundaryOverlapState {
    /// Playhead is within the overlap window of the active item's start
    /// and a previous item exists.
    pub is_near_boundary_start: bool,

    /// Playhead is within the overlap window of the active item's end and
    /// a next item exists.
    pub is_near_boundary_end: bool,

    /// The previous item should stay mounted.
    pub should_hold_prev_frame: bool,

    /// The next item should be mounted ahead of time.
    pub should_hold_next_frame: bool,

    /// Size of the overlap window in frames.
    pub overlap_frames: i64,
}

/// Inputs for [`boundary_overlap_state`].
#[derive(Debug, Clone, Copy)]
pub struct BoundaryOverlapInput<'a> {
    pub current_frame: i64,
    pub fps: f64,
    pub is_exporting: bool,

    /// The item containing the current frame, if any. `None` means the
    /// playhead sits in a genuine gap (or one discovered mid-scrub).
    pub active: Option<&'a FrameLayoutItem>,

    /// Layout neighbor before the active item (or before the gap).
    pub prev: Option<&'a FrameLayoutItem>,

    /// Layout neighbor after the active item (or after the gap).
    pub next: Option<&'a FrameLayoutItem>,

    /// Source resolution, used to size the overlap window.
    pub source_width: u32,
    pub source_height: u32,
}

/// Compute the hold decisions for one frame. Pure.
pub fn boundary_overlap_state(input: &BoundaryOverlapInput<'_>) -> BoundaryOverlapState {
    let overlap_secs = if input.source_width > 1920 || input.source_height > 1080 {
        HIGH_RES_OVERLAP_SECS
    } else {
        OVERLAP_SECS
    };
    let overlap_frames = ((input.fps * overlap_secs).round() as i64).max(MIN_OVERLAP_FRAMES);

    if input.is_exporting {
        return BoundaryOverlapState {
            overlap_frames,
            ..Default::default()
        };
    }

    match input.active {
        Some(active) => {
            let from_start = input.current_frame - active.start_frame;
            let to_end = active.end_frame - input.current_frame;

            let is_near_boundary_start =
                input.prev.is_some() && from_start >= 0 && from_start < overlap_frames;
            let is_near_boundary_end =
                input.next.is_some() && to_end > 0 && to_end <= overlap_frames;

            BoundaryOverlapState {
                is_near_boundary_start,
                is_near_boundary_end,
                should_hold_prev_frame: is_near_boundary_start,
                should_hold_next_frame: is_near_boundary_end,
                overlap_frames,
            }
        }
        None => {
            // Gap: hold whichever neighbor the playhead is closer to.
            let (should_hold_prev_frame, should_hold_next_frame) = match (input.prev, input.next) {
                (Some(prev), Some(next)) => {
                    let to_prev = (input.current_frame - prev.end_frame).max(0);
                    let to_next = (next.start_frame - input.current_frame).max(0);
                    (to_prev <= to_next, to_next < to_prev)
                }
                (Some(_), None) => (true, false),
                (None, Some(_)) => (false, true),
                (None, None) => (false, false),
            };

            BoundaryOverlapState {
                is_near_boundary_start: false,
                is_near_boundary_end: false,
                should_hold_prev_frame,
                should_hold_next_frame,
                overlap_frames,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frameline_clip_model::clip::{Clip, SourceType};

    fn item(id: &str, start_frame: i64, end_frame: i64) -> FrameLayoutItem {
        FrameLayoutItem {
            clip: Clip {
                id: id.to_string(),
                recording_id: "r1".to_string(),
                start_time_ms: 0.0,
                duration_ms: 0.0,
                source_in_ms: 0.0,
                source_out_ms: 0.0,
                playback_rate: 1.0,
                transition_in: None,
                transition_out: None,
                intro_fade_ms: None,
                outro_fade_ms: None,
            },
            start_frame,
            end_frame,
            duration_frames: end_frame - start_frame,
            group_id: format!("r1@{start_frame}"),
            group_start_frame: start_frame,
            group_start_source_in_ms: 0.0,
            group_duration_frames: end_frame - start_frame,
            source_type: Some(SourceType::Video),
            persisted_video_state: None,
        }
    }

    fn input<'a>(
        frame: i64,
        active: Option<&'a FrameLayoutItem>,
        prev: Option<&'a FrameLayoutItem>,
        next: Option<&'a FrameLayoutItem>,
    ) -> BoundaryOverlapInput<'a> {
        BoundaryOverlapInput {
            current_frame: frame,
            fps: 30.0,
            is_exporting: false,
            active,
            prev,
            next,
            source_width: 1920,
            source_height: 1080,
        }
    }

    #[test]
    fn test_overlap_window_sizing() {
        let state = boundary_overlap_state(&input(0, None, None, None));
        // 30 fps * 0.5s
        assert_eq!(state.overlap_frames, 15);

        let mut high_res = input(0, None, None, None);
        high_res.source_width = 3840;
        high_res.source_height = 2160;
        let state = boundary_overlap_state(&high_res);
        // 30 fps * 0.35s, rounded
        assert_eq!(state.overlap_frames, 11);
    }

    #[test]
    fn test_overlap_window_floor_at_low_fps() {
        let mut low_fps = input(0, None, None, None);
        low_fps.fps = 10.0;
        let state = boundary_overlap_state(&low_fps);
        assert_eq!(state.overlap_frames, 8);
    }

    #[test]
    fn test_near_start_holds_prev() {
        let prev = item("p", 0, 30);
        let active = item("a", 30, 90);
        let state = boundary_overlap_state(&input(35, Some(&active), Some(&prev), None));
        assert!(state.is_near_boundary_start);
        assert!(state.should_hold_prev_frame);
        assert!(!state.should_hold_next_frame);
    }

    #[test]
    fn test_near_start_without_prev_is_not_a_boundary() {
        let active = item("a", 30, 90);
        let state = boundary_overlap_state(&input(35, Some(&active), None, None));
        assert!(!state.is_near_boundary_start);
        assert!(!state.should_hold_prev_frame);
    }

    #[test]
    fn test_near_end_holds_next() {
        let active = item("a", 0, 60);
        let next = item("n", 60, 90);
        let state = boundary_overlap_state(&input(50, Some(&active), None, Some(&next)));
        assert!(state.is_near_boundary_end);
        assert!(state.should_hold_next_frame);
    }

    #[test]
    fn test_mid_item_holds_nothing() {
        let prev = item("p", 0, 30);
        let active = item("a", 30, 120);
        let next = item("n", 120, 150);
        let state = boundary_overlap_state(&input(75, Some(&active), Some(&prev), Some(&next)));
        assert!(!state.is_near_boundary_start);
        assert!(!state.is_near_boundary_end);
        assert!(!state.should_hold_prev_frame);
        assert!(!state.should_hold_next_frame);
    }

    #[test]
    fn test_gap_holds_closer_neighbor() {
        let prev = item("p", 0, 30);
        let next = item("n", 100, 130);

        let state = boundary_overlap_state(&input(40, None, Some(&prev), Some(&next)));
        assert!(state.should_hold_prev_frame);
        assert!(!state.should_hold_next_frame);

        let state = boundary_overlap_state(&input(95, None, Some(&prev), Some(&next)));
        assert!(!state.should_hold_prev_frame);
        assert!(state.should_hold_next_frame);
    }

    #[test]
    fn test_exporting_disengages_everything() {
        let prev = item("p", 0, 30);
        let active = item("a", 30, 90);
        let mut opts = input(31, Some(&active), Some(&prev), None);
        opts.is_exporting = true;
        let state = boundary_overlap_state(&opts);
        assert!(!state.is_near_boundary_start);
        assert!(!state.should_hold_prev_frame);
        assert!(!state.should_hold_next_frame);
    }
}
