//! Frameline Layout Engine
//!
//! Converts a mutable list of timeline clips into a frame-indexed structure
//! and answers "what is visually active at frame N" in O(log n + k):
//! - **Builder:** single-pass layout build with contiguous-group identity
//!   and persisted visual state for generated overlays
//! - **Index:** sorted start frames and running-max end frames for pruned
//!   interval queries
//! - **Resolver:** active-item queries with an explicit gap policy
//! - **Boundary:** cut-adjacent overlap holds for flicker-free scrubbing
//! - **Visible:** the final renderable item set with reference stability
//!   and a decoder mount cap
//!
//! Every query is pure for a fixed `(layout, frame)` pair; a `FrameLayout`
//! is immutable after construction and carries its own index, so a new
//! layout always means a new index.

pub mod boundary;
pub mod builder;
mod index;
pub mod resolver;
pub mod visible;

pub use boundary::*;
pub use builder::*;
pub use resolver::*;
pub use visible::*;
