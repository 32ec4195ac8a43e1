use glam::{Mat4, Vec3};

use crate::camera::fit::CameraFit;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
///
/// The projection matrix is cached; anything that mutates `fovy`, `aspect`,
/// `znear` or `zfar` must be followed by [`Camera::refresh_projection`].
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    projection: Mat4,
}

impl Camera {
    /// Create a camera and compute its initial projection.
    #[must_use]
    pub fn new(eye: Vec3, target: Vec3, fovy: f32, aspect: f32) -> Self {
        let mut camera = Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy,
            znear: 0.1,
            zfar: 1000.0,
            projection: Mat4::IDENTITY,
        };
        camera.refresh_projection();
        camera
    }

    /// Vertical field of view in radians.
    #[must_use]
    pub fn fovy_radians(&self) -> f32 {
        self.fovy.to_radians()
    }

    /// Apply the clip planes of a fit and refresh the projection.
    pub fn apply_fit(&mut self, fit: &CameraFit) {
        self.znear = fit.near;
        self.zfar = fit.far;
        self.refresh_projection();
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.refresh_projection();
    }

    /// Recompute the cached projection matrix from the current parameters.
    pub fn refresh_projection(&mut self) {
        // perspective_rh uses the [0,1] depth range
        self.projection = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
    }

    /// The cached projection matrix.
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Build the view matrix.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.projection * self.view()
    }

    /// Unit vector from the eye toward the target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }
}
