//! Platform abstraction layer
//!
//! Translates raw device input (mouse, touch) into the per-frame
//! [`TickInput`](crate::sim::TickInput) snapshot the simulation consumes,
//! and provides a scripted input source for headless runs.

pub mod autopilot;
pub mod input;

pub use autopilot::steer;
pub use input::{PointerTracker, Viewport};
