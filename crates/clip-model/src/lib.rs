//! Frameline Clip Model
//!
//! Defines the data contracts consumed by the layout and snapshot engines:
//! - **Clips:** placements of recordings on the timeline with timing, source
//!   trim, playback rate, and transition markers
//! - **Recordings:** the underlying media sources (video, image, generated)
//! - **Time:** millisecond↔frame conversion for a given fps
//!
//! All timeline times are milliseconds; frames are derived via the active
//! fps and are the unit the layout engine indexes by.

pub mod clip;
pub mod time;

pub use clip::*;
pub use time::*;
