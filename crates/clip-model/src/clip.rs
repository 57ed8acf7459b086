//! Clip and recording types.
//!
//! A clip is a placement of a recording on the timeline with its own
//! timing, source trim, and playback rate. Recordings are the underlying
//! media sources; the engine only reads their type and dimensions.

use serde::{Deserialize, Serialize};

/// A placement of a recording on the timeline.
///
/// Clips are owned by the external timeline/project model. The layout
/// engine treats them as immutable inputs for the duration of one build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip identifier.
    pub id: String,

    /// Identifier of the recording this clip plays.
    pub recording_id: String,

    /// Timeline position in milliseconds.
    pub start_time_ms: f64,

    /// Timeline duration in milliseconds.
    pub duration_ms: f64,

    /// Source trim in-point in milliseconds.
    pub source_in_ms: f64,

    /// Source trim out-point in milliseconds.
    pub source_out_ms: f64,

    /// Playback rate multiplier (1.0 = realtime).
    pub playback_rate: f64,

    /// Transition on the incoming edge, if any.
    #[serde(default)]
    pub transition_in: Option<Transition>,

    /// Transition on the outgoing edge, if any.
    #[serde(default)]
    pub transition_out: Option<Transition>,

    /// Fade-in duration in milliseconds, if any.
    #[serde(default)]
    pub intro_fade_ms: Option<f64>,

    /// Fade-out duration in milliseconds, if any.
    #[serde(default)]
    pub outro_fade_ms: Option<f64>,
}

impl Clip {
    /// Timeline end position in milliseconds.
    pub fn end_time_ms(&self) -> f64 {
        self.start_time_ms + self.duration_ms
    }
}

/// A transition marker on a clip edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Transition style.
    pub kind: TransitionKind,

    /// Transition duration in milliseconds.
    pub duration_ms: f64,
}

/// Transition style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Crossfade,
    FadeToBlack,
    Slide,
}

/// The underlying media source a clip points to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Unique recording identifier.
    pub id: String,

    /// What kind of content this recording holds.
    pub source_type: SourceType,

    /// Source width in pixels.
    pub width: u32,

    /// Source height in pixels.
    pub height: u32,
}

/// Kind of media behind a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Decodable video.
    Video,
    /// Still image.
    Image,
    /// Procedurally generated content with no decodable visual of its own.
    /// Rendered over the nearest preceding visual recording.
    Generated,
}

impl SourceType {
    /// Whether this source carries its own visual content.
    pub fn is_visual(&self) -> bool {
        matches!(self, SourceType::Video | SourceType::Image)
    }
}

/// Canvas/background styling passed through to the frame snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasStyle {
    /// Background color as hex string (for example `#1a1a1a`).
    pub background: String,
    /// Rounded corner radius in output pixels.
    pub corner_radius: u32,
    /// Shadow intensity multiplier in `[0.0, 1.0]`.
    pub shadow_intensity: f64,
    /// Padding around the content window in output pixels.
    pub padding: u32,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            background: "#1a1a1a".to_string(),
            corner_radius: 20,
            shadow_intensity: 0.60,
            padding: 56,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_clip() -> Clip {
        Clip {
            id: "c1".to_string(),
            recording_id: "r1".to_string(),
            start_time_ms: 0.0,
            duration_ms: 1000.0,
            source_in_ms: 0.0,
            source_out_ms: 1000.0,
            playback_rate: 1.0,
            transition_in: None,
            transition_out: None,
            intro_fade_ms: None,
            outro_fade_ms: None,
        }
    }

    #[test]
    fn test_end_time() {
        let clip = sample_clip();
        assert!((clip.end_time_ms() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_source_type_visual() {
        assert!(SourceType::Video.is_visual());
        assert!(SourceType::Image.is_visual());
        assert!(!SourceType::Generated.is_visual());
    }

    #[test]
    fn test_clip_serialization_defaults_optional_fields() {
        let json = r#"{
            "id": "c1",
            "recording_id": "r1",
            "start_time_ms": 0.0,
            "duration_ms": 500.0,
            "source_in_ms": 0.0,
            "source_out_ms": 500.0,
            "playback_rate": 1.0
        }"#;
        let clip: Clip = serde_json::from_str(json).unwrap();
        assert!(clip.transition_in.is_none());
        assert!(clip.intro_fade_ms.is_none());
    }

    #[test]
    fn test_clip_round_trip_with_transition() {
        let mut clip = sample_clip();
        clip.transition_out = Some(Transition {
            kind: TransitionKind::Crossfade,
            duration_ms: 250.0,
        });
        let json = serde_json::to_string(&clip).unwrap();
        let parsed: Clip = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, clip);
    }

    #[test]
    fn test_canvas_style_defaults() {
        let style = CanvasStyle::default();
        assert_eq!(style.padding, 56);
        assert_eq!(style.background, "#1a1a1a");
    }
}
