//! Frame layout builder.
//!
//! Turns an ordered clip list into `FrameLayoutItem` records in a single
//! left-to-right pass, assigning contiguous-group identity and, for
//! generated (non-visual) clips, a reference to the underlying visual
//! state the renderer should show beneath them.
//!
//! Group identity is derived from `(recording_id, group_start_frame)`, not
//! from clip ids, so grouping survives trims and splits that do not move
//! the group's start. The renderer relies on this to avoid reinitializing
//! decode state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use frameline_clip_model::clip::{Clip, Recording, SourceType};
use frameline_clip_model::time::{
    frame_duration_ms, frame_to_ms, ms_to_frame_ceil, ms_to_frame_floor,
};

use crate::index::LayoutIndex;

/// Playback rates within this tolerance are considered equal for grouping.
const RATE_EPSILON: f64 = 1e-6;

/// Maximum source-time gap (ms) across which two clips still read as one
/// continuous take.
const SOURCE_GAP_TOLERANCE_MS: f64 = 50.0;

/// The engine's resolved, frame-indexed view of one clip.
///
/// Created in bulk by [`FrameLayout::build`], immutable thereafter, and
/// discarded wholesale when the clip list changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameLayoutItem {
    /// The clip this item was derived from.
    pub clip: Clip,

    /// First frame of the item (inclusive).
    pub start_frame: i64,

    /// One past the last frame of the item (exclusive). Always greater
    /// than `start_frame`; a minimum one-frame duration is enforced.
    pub end_frame: i64,

    /// `end_frame - start_frame`.
    pub duration_frames: i64,

    /// Identity of the contiguous same-recording run this item belongs to,
    /// derived from `(recording_id, group_start_frame)`.
    pub group_id: String,

    /// First frame of the group.
    pub group_start_frame: i64,

    /// Source in-point (ms) of the group's first member.
    pub group_start_source_in_ms: f64,

    /// Total group length in frames, stamped when the group closes.
    pub group_duration_frames: i64,

    /// Source type of the clip's recording, or `None` when the recording
    /// is missing from the lookup.
    pub source_type: Option<SourceType>,

    /// For generated clips: the visual backdrop inherited from the nearest
    /// preceding video/image item.
    pub persisted_video_state: Option<PersistedVideoState>,
}

impl FrameLayoutItem {
    /// Whether `frame` falls within this item's range.
    pub fn contains_frame(&self, frame: i64) -> bool {
        frame >= self.start_frame && frame < self.end_frame
    }

    /// Whether this item is backed by decodable video.
    pub fn is_video_backed(&self) -> bool {
        matches!(self.source_type, Some(SourceType::Video))
    }
}

/// The visual backdrop a generated overlay clip renders on top of.
///
/// Points at the nearest preceding video/image item so the renderer can
/// show something underneath content that has no decodable visual of its
/// own. The underlying item is captured by its frame range rather than a
/// back-reference into the layout vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedVideoState {
    /// The underlying visual recording.
    pub recording: Recording,

    /// The underlying visual clip.
    pub clip: Clip,

    /// First frame of the underlying visual item.
    pub start_frame: i64,

    /// Exclusive end frame of the underlying visual item.
    pub end_frame: i64,

    /// Source time (ms) the backdrop should display at the overlay's start.
    pub base_source_time_ms: f64,

    /// True when the overlay starts at or past the visual item's end; the
    /// backdrop must hold its last valid frame rather than run past it.
    pub is_frozen: bool,
}

/// A frame-indexed layout plus the index answering queries against it.
///
/// Immutable after construction: items are only exposed by shared
/// reference, so the index can never go stale. Editing the timeline means
/// building a new `FrameLayout`.
#[derive(Debug, Clone)]
pub struct FrameLayout {
    items: Vec<FrameLayoutItem>,
    index: LayoutIndex,
}

impl FrameLayout {
    /// Build a layout from an ordered clip list.
    ///
    /// Never fails: an empty clip list yields an empty layout, and clips
    /// referencing missing recordings are laid out without a source type
    /// or persisted state.
    pub fn build(clips: &[Clip], fps: f64, recordings: &HashMap<String, Recording>) -> Self {
        let mut items: Vec<FrameLayoutItem> = Vec::with_capacity(clips.len());
        let mut group_start_index = 0usize;
        let mut last_visual_index: Option<usize> = None;

        for clip in clips {
            let start_frame = ms_to_frame_floor(clip.start_time_ms, fps);
            let end_frame = (start_frame + 1).max(ms_to_frame_ceil(clip.end_time_ms(), fps));

            let recording = recordings.get(&clip.recording_id);
            let source_type = recording.map(|r| r.source_type);

            let contiguous = items
                .last()
                .map(|prev| is_contiguous(prev, clip, start_frame, fps))
                .unwrap_or(false);

            if !contiguous {
                close_group(&mut items[group_start_index..]);
                group_start_index = items.len();
            }

            let (group_id, group_start_frame, group_start_source_in_ms) = if contiguous {
                let head = &items[group_start_index];
                (
                    head.group_id.clone(),
                    head.group_start_frame,
                    head.group_start_source_in_ms,
                )
            } else {
                (
                    group_id_for(&clip.recording_id, start_frame),
                    start_frame,
                    clip.source_in_ms,
                )
            };

            let persisted_video_state = match source_type {
                Some(SourceType::Generated) => last_visual_index.and_then(|i| {
                    let visual = &items[i];
                    recordings
                        .get(&visual.clip.recording_id)
                        .map(|rec| persisted_state(visual, rec, start_frame, fps))
                }),
                _ => None,
            };

            items.push(FrameLayoutItem {
                clip: clip.clone(),
                start_frame,
                end_frame,
                duration_frames: end_frame - start_frame,
                group_id,
                group_start_frame,
                group_start_source_in_ms,
                group_duration_frames: 0,
                source_type,
                persisted_video_state,
            });

            if source_type.map(|t| t.is_visual()).unwrap_or(false) {
                last_visual_index = Some(items.len() - 1);
            }
        }

        close_group(&mut items[group_start_index..]);

        tracing::debug!(
            clips = clips.len(),
            items = items.len(),
            "built frame layout"
        );

        let index = LayoutIndex::build(&items);
        Self { items, index }
    }

    /// An empty layout.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            index: LayoutIndex::build(&[]),
        }
    }

    /// The layout items, ascending by `start_frame`.
    pub fn items(&self) -> &[FrameLayoutItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FrameLayoutItem> {
        self.items.get(index)
    }

    pub(crate) fn index(&self) -> &LayoutIndex {
        &self.index
    }
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self::empty()
    }
}

/// Group identity: stable across trims/splits that keep the start put.
fn group_id_for(recording_id: &str, group_start_frame: i64) -> String {
    format!("{recording_id}@{group_start_frame}")
}

/// Whether `clip` continues the group ended by `prev`.
fn is_contiguous(prev: &FrameLayoutItem, clip: &Clip, start_frame: i64, fps: f64) -> bool {
    if prev.clip.recording_id != clip.recording_id {
        return false;
    }
    if prev.clip.transition_out.is_some() || clip.transition_in.is_some() {
        return false;
    }
    if (prev.clip.playback_rate - clip.playback_rate).abs() > RATE_EPSILON {
        return false;
    }

    let frame_gap = start_frame - prev.end_frame;
    let ms_gap = clip.start_time_ms - prev.clip.end_time_ms();
    if frame_gap > 1 && ms_gap > frame_duration_ms(fps) + 1.0 {
        return false;
    }

    let source_gap = clip.source_in_ms - prev.clip.source_out_ms;
    source_gap.abs() <= SOURCE_GAP_TOLERANCE_MS
}

/// Stamp `group_duration_frames` on every member of a closed group.
fn close_group(members: &mut [FrameLayoutItem]) {
    let Some(last_end) = members.last().map(|m| m.end_frame) else {
        return;
    };
    let group_start = members[0].group_start_frame;
    for member in members {
        member.group_duration_frames = last_end - group_start;
    }
}

/// Compute the inherited backdrop state for an overlay starting at
/// `overlay_start_frame` on top of `visual`.
fn persisted_state(
    visual: &FrameLayoutItem,
    recording: &Recording,
    overlay_start_frame: i64,
    fps: f64,
) -> PersistedVideoState {
    let is_frozen = overlay_start_frame >= visual.end_frame;
    let base_source_time_ms = if is_frozen {
        // Hold the last valid source frame; -1ms keeps us inside the trim.
        visual.clip.source_out_ms - 1.0
    } else {
        let frame_offset_ms = frame_to_ms(overlay_start_frame - visual.start_frame, fps);
        visual.clip.source_in_ms + frame_offset_ms * visual.clip.playback_rate
    };

    PersistedVideoState {
        recording: recording.clone(),
        clip: visual.clip.clone(),
        start_frame: visual.start_frame,
        end_frame: visual.end_frame,
        base_source_time_ms,
        is_frozen,
    }
}
