//! Shared utilities.

/// Frame pacing and FPS smoothing.
pub mod frame_timing;
