//! Camera fitting, view presets, and the locked/free view controller.
//!
//! A loaded model's bounding box feeds [`fit::fit`], the resulting distance
//! scales a [`preset::ViewPreset`] direction into a target eye position, and
//! [`controller::ViewController`] eases the camera toward it each frame
//! until the user takes over through the orbit control.

/// Locked/free view controller that owns the camera and its control.
pub mod controller;
/// Perspective camera with a cached projection.
pub mod core;
/// Gesture event subscription between controls and listeners.
pub mod events;
/// Bounding-box camera distance and clip-plane fitting.
pub mod fit;
/// Mouse-driven orbit control.
pub mod orbit;
/// Named viewing directions.
pub mod preset;
/// Controller state and its pure transitions.
pub mod state;

pub use controller::ViewController;
pub use self::core::Camera;
pub use fit::{fit, CameraFit, GridMetrics};
pub use orbit::{CameraControl, OrbitControls};
pub use preset::ViewPreset;
pub use state::{ControlMode, ViewControllerState};
