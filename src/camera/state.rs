//! View controller state and its pure transitions.
//!
//! Every transition takes the state by value and returns the next state, so
//! the preset/lock logic can be exercised without a camera or control.

use glam::Vec3;

use crate::camera::fit::CameraFit;
use crate::camera::preset::ViewPreset;
use crate::model::BoundingBox;

/// Who is driving the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlMode {
    /// Automatic, preset-driven approach toward the target position.
    #[default]
    Locked,
    /// Direct user control through the orbit control.
    Free,
}

/// Snapshot of the view controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewControllerState {
    /// Where the camera eye is heading while locked.
    pub target_position: Vec3,
    /// Point the camera looks at.
    pub target_look_at: Vec3,
    /// Locked or free.
    pub mode: ControlMode,
    /// Eye-to-target distance used for presets.
    pub camera_distance: f32,
    /// Most recently selected preset.
    pub preset: ViewPreset,
    /// Bounds of the loaded model, if one has been fitted.
    pub bounds: Option<BoundingBox>,
}

impl ViewControllerState {
    /// Fresh state: locked on `preset` at `default_distance`, nothing fitted.
    #[must_use]
    pub fn initial(preset: ViewPreset, default_distance: f32) -> Self {
        Self {
            target_position: preset.direction() * default_distance,
            target_look_at: Vec3::ZERO,
            mode: ControlMode::Locked,
            camera_distance: default_distance,
            preset,
            bounds: None,
        }
    }

    /// Whether the camera is under preset control.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.mode == ControlMode::Locked
    }

    /// A model finished loading and was fitted. The lock mode is kept.
    #[must_use]
    pub fn model_loaded(self, bounds: BoundingBox, fit: &CameraFit) -> Self {
        Self {
            target_position: self.preset.direction() * fit.distance,
            camera_distance: fit.distance,
            bounds: Some(bounds),
            ..self
        }
    }

    /// A preset was chosen; always re-locks.
    #[must_use]
    pub fn preset_selected(self, preset: ViewPreset) -> Self {
        Self {
            target_position: preset.direction() * self.camera_distance,
            mode: ControlMode::Locked,
            preset,
            ..self
        }
    }

    /// The user grabbed the orbit control.
    #[must_use]
    pub fn interaction_started(self) -> Self {
        Self {
            mode: ControlMode::Free,
            ..self
        }
    }
}
