//! Millisecond↔frame conversion.
//!
//! The timeline stores clip timing in milliseconds; the layout engine
//! indexes by whole frames derived from the active fps. Conversions here
//! are the single source of truth for that mapping.

/// Epsilon (in frames) used so boundary times that land within floating
/// point noise of an integer frame resolve to that integer in both the
/// floor and ceil direction. 1000 ms at 30 fps must be frame 30 exactly.
const FRAME_EPSILON: f64 = 1e-6;

/// Convert milliseconds to an exact fractional frame.
///
/// A non-positive fps yields 0.0 rather than NaN/infinity; the engine never
/// propagates degenerate configuration into frame math.
pub fn ms_to_frame(ms: f64, fps: f64) -> f64 {
    if fps <= 0.0 {
        return 0.0;
    }
    ms * fps / 1000.0
}

/// Convert milliseconds to the frame containing that time (floor).
pub fn ms_to_frame_floor(ms: f64, fps: f64) -> i64 {
    (ms_to_frame(ms, fps) + FRAME_EPSILON).floor() as i64
}

/// Convert milliseconds to the first frame at or after that time (ceil).
pub fn ms_to_frame_ceil(ms: f64, fps: f64) -> i64 {
    (ms_to_frame(ms, fps) - FRAME_EPSILON).ceil() as i64
}

/// Convert a frame number back to milliseconds.
pub fn frame_to_ms(frame: i64, fps: f64) -> f64 {
    if fps <= 0.0 {
        return 0.0;
    }
    frame as f64 * 1000.0 / fps
}

/// Duration of a single frame in milliseconds.
pub fn frame_duration_ms(fps: f64) -> f64 {
    if fps <= 0.0 {
        return 0.0;
    }
    1000.0 / fps
}
