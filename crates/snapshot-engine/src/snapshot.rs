//! Frame snapshot calculation.
//!
//! Produces the consolidated per-frame descriptor handed to the renderer:
//! resolved clip state from the layout engine plus the independent
//! geometry concerns (video placement, mockup placement, transform
//! strings, canvas styling). One snapshot per rendered or scrubbed frame;
//! the renderer consumes and discards it.

use std::sync::Arc;

use frameline_clip_model::clip::CanvasStyle;
use frameline_common::{EngineConfig, PlaybackDefaults};
use frameline_layout_engine::boundary::{
    boundary_overlap_state, BoundaryOverlapInput, BoundaryOverlapState,
};
use frameline_layout_engine::builder::{FrameLayout, FrameLayoutItem, PersistedVideoState};
use frameline_layout_engine::resolver::{find_active_index, GapPolicy};
use frameline_layout_engine::visible::{VisibleLayoutOptions, VisibleLayoutResolver};

use crate::geometry::{fit_rect, mockup_placement, DeviceMockup, MockupPlacement, Rect};
use crate::transform::compose_transforms;

/// Inputs for one frame snapshot.
#[derive(Debug, Clone)]
pub struct FrameSnapshotInput<'a> {
    pub frame: i64,
    pub fps: f64,
    pub is_exporting: bool,

    /// Output composition size in pixels.
    pub composition_width: u32,
    pub composition_height: u32,

    /// Background padding/corner-radius/shadow styling, passed through.
    pub canvas: &'a CanvasStyle,

    /// Optional device frame to present the video inside.
    pub mockup: Option<&'a DeviceMockup>,

    /// 3D screen transform from the effects subsystem, if any.
    pub screen_transform_3d: Option<&'a str>,

    /// Active crop transform, if any.
    pub crop_transform: Option<&'a str>,

    /// Active zoom transform, if any.
    pub zoom_transform: Option<&'a str>,

    /// Source video resolution.
    pub source_width: u32,
    pub source_height: u32,
}

/// The fully composed per-frame geometry/state descriptor.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    /// The frame this snapshot describes.
    pub frame: i64,

    /// Video draw rectangle in output pixels, top-left origin.
    pub video_rect: Rect,

    /// Device mockup placement when a mockup is configured.
    pub mockup: Option<MockupPlacement>,

    /// Combined transform string: 3D screen transform, then crop+zoom.
    pub transform: String,

    /// Canvas styling passthrough for the renderer.
    pub canvas: CanvasStyle,

    /// The renderable item set for this frame.
    pub items: Arc<[FrameLayoutItem]>,

    /// The single best active item, if the layout is non-empty.
    pub active: Option<FrameLayoutItem>,

    /// Inherited visual backdrop when the active item is generated.
    pub persisted_video: Option<PersistedVideoState>,

    /// Boundary hold decisions for this frame.
    pub boundary: BoundaryOverlapState,
}

/// Computes frame snapshots, reusing a visible-layout resolver so the
/// renderable item set stays reference-stable across no-op recomputes.
#[derive(Debug, Default)]
pub struct FrameSnapshotCalculator {
    visible: VisibleLayoutResolver,
    playback: PlaybackDefaults,
}

impl FrameSnapshotCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use configured playback tuning (mount cap, hold window).
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            visible: VisibleLayoutResolver::new(),
            playback: config.playback.clone(),
        }
    }

    /// Compute the snapshot for one frame. Pure geometry plus the layout
    /// engine's resolved state; never fails.
    pub fn calculate(
        &mut self,
        layout: &FrameLayout,
        input: &FrameSnapshotInput<'_>,
    ) -> FrameSnapshot {
        let active_index = find_active_index(layout, input.frame, GapPolicy::HoldNearest);
        let active = active_index.map(|i| layout.items()[i].clone());
        let persisted_video = active
            .as_ref()
            .and_then(|item| item.persisted_video_state.clone());

        let boundary = match active_index {
            Some(i) => {
                let items = layout.items();
                let item = &items[i];
                let containing = item.contains_frame(input.frame);
                boundary_overlap_state(&BoundaryOverlapInput {
                    current_frame: input.frame,
                    fps: input.fps,
                    is_exporting: input.is_exporting,
                    active: containing.then_some(item),
                    prev: if containing {
                        i.checked_sub(1).map(|p| &items[p])
                    } else {
                        Some(item)
                    },
                    next: items.get(i + 1),
                    source_width: input.source_width,
                    source_height: input.source_height,
                })
            }
            None => BoundaryOverlapState::default(),
        };

        let items = self.visible.resolve(
            layout,
            &VisibleLayoutOptions {
                current_frame: input.frame,
                fps: input.fps,
                is_exporting: input.is_exporting,
                source_width: input.source_width,
                source_height: input.source_height,
                max_mounted_items: self.playback.max_mounted_items,
                hold_window_secs: self.playback.hold_window_secs,
            },
        );

        let container = Rect::new(
            0.0,
            0.0,
            input.composition_width as f64,
            input.composition_height as f64,
        )
        .inset(input.canvas.padding as f64);

        let (video_rect, mockup) = match input.mockup {
            Some(device) => {
                let placement = mockup_placement(
                    device,
                    container,
                    input.source_width as f64,
                    input.source_height as f64,
                );
                (placement.video_rect, Some(placement))
            }
            None => (
                fit_rect(
                    input.source_width as f64,
                    input.source_height as f64,
                    container,
                ),
                None,
            ),
        };

        let transform = compose_transforms(
            input.screen_transform_3d,
            input.crop_transform,
            input.zoom_transform,
        );

        tracing::trace!(
            frame = input.frame,
            items = items.len(),
            exporting = input.is_exporting,
            "computed frame snapshot"
        );

        FrameSnapshot {
            frame: input.frame,
            video_rect,
            mockup,
            transform,
            canvas: input.canvas.clone(),
            items,
            active,
            persisted_video,
            boundary,
        }
    }
}
