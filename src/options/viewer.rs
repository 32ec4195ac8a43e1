use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::ViewPreset;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewer", inline)]
#[serde(default)]
/// Session-level viewer settings.
pub struct ViewerOptions {
    /// Preset the view locks onto when mounted or reset.
    #[schemars(title = "Initial View")]
    pub initial_preset: ViewPreset,
    /// Frame rate the headless driver paces itself to (0 = unlimited).
    #[schemars(skip)]
    pub target_fps: u32,
    /// Initial viewport width in pixels.
    #[schemars(skip)]
    pub width: u32,
    /// Initial viewport height in pixels.
    #[schemars(skip)]
    pub height: u32,
}

impl ViewerOptions {
    /// Viewport aspect ratio, falling back to 1.0 for a zero height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            initial_preset: ViewPreset::Isometric,
            target_fps: 60,
            width: 1280,
            height: 720,
        }
    }
}
