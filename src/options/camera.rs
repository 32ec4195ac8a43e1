use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Approach fraction used when the configured one is unusable.
pub const DEFAULT_APPROACH_FACTOR: f32 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, fitting and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Multiplier applied to the fitted distance for visual margin.
    #[schemars(title = "Fit Padding", range(min = 1.0, max = 3.0), extend("step" = 0.05))]
    pub padding: f32,
    /// Eye-to-target distance before any model is fitted.
    #[schemars(skip)]
    pub default_distance: f32,
    /// Floor for the largest box dimension when fitting degenerate models.
    #[schemars(skip)]
    pub min_dimension: f32,
    /// Fraction of the remaining distance covered per frame while locked.
    #[schemars(title = "Approach Speed", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub approach_factor: f32,
    /// Orbit rotation in radians per pixel dragged.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Pan distance per pixel, as a fraction of the orbit distance.
    #[schemars(title = "Pan Speed", range(min = 0.0005, max = 0.01), extend("step" = 0.0005))]
    pub pan_speed: f32,
    /// Zoom fraction per scroll step.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 50.0,
            padding: 1.2,
            default_distance: 10.0,
            min_dimension: crate::camera::fit::MIN_DIMENSION,
            approach_factor: DEFAULT_APPROACH_FACTOR,
            rotate_speed: 0.01,
            pan_speed: 0.002,
            zoom_speed: 0.1,
        }
    }
}

impl CameraOptions {
    /// `approach_factor` clamped into `(0, 1]`. Non-finite or non-positive
    /// values fall back to [`DEFAULT_APPROACH_FACTOR`].
    #[must_use]
    pub fn approach_step(&self) -> f32 {
        if self.approach_factor.is_finite() && self.approach_factor > 0.0 {
            self.approach_factor.min(1.0)
        } else {
            DEFAULT_APPROACH_FACTOR
        }
    }
}
