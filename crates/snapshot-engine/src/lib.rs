//! Frameline Snapshot Engine
//!
//! The top-level composition step: combines the layout engine's resolved
//! clip state with independent geometry concerns (video placement, device
//! mockup placement, crop/zoom/3D transform strings) into one
//! `FrameSnapshot` per frame, consumed and discarded by the renderer.
//!
//! Everything here is pure geometry; interval search lives in the layout
//! engine, and the camera/zoom path is supplied by the effects subsystem.

pub mod geometry;
pub mod snapshot;
pub mod transform;

pub use geometry::*;
pub use snapshot::*;
pub use transform::*;
