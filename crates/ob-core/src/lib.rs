//! ob-core: Shared types and utilities for Obverse
//!
//! Foundational types used across the Obverse crates: the traversal
//! direction between sections, easing curve selection for transports,
//! the render quality toggle and the asset preload tracker.

mod curve;
mod preload;
mod quality;
mod way;

pub use curve::*;
pub use preload::*;
pub use quality::*;
pub use way::*;
