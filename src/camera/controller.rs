use glam::Vec3;

use crate::camera::core::Camera;
use crate::camera::events::{ControlEvent, EventLatch, SubscriptionToken};
use crate::camera::fit::{fit_with_floor, CameraFit};
use crate::camera::orbit::{CameraControl, OrbitControls};
use crate::camera::preset::ViewPreset;
use crate::camera::state::{ControlMode, ViewControllerState};
use crate::input::InputEvent;
use crate::model::BoundingBox;
use crate::options::CameraOptions;

/// Fraction of the remaining eye-to-target distance below which the eye
/// snaps onto the target.
const SETTLE_FRACTION: f32 = 1e-5;

/// Drives the camera toward preset views and hands over to the orbit
/// control once the user grabs it.
///
/// The controller is the only writer of the camera and the control. It
/// learns about gestures through a `Start` subscription on the control.
pub struct ViewController<C: CameraControl = OrbitControls> {
    state: ViewControllerState,
    camera: Camera,
    controls: C,
    options: CameraOptions,
    interaction: EventLatch,
    subscription: SubscriptionToken,
}

impl ViewController<OrbitControls> {
    /// Create a controller with a fresh camera and orbit control.
    #[must_use]
    pub fn new(options: CameraOptions, initial_preset: ViewPreset, aspect: f32) -> Self {
        let state = ViewControllerState::initial(initial_preset, options.default_distance);
        let mut camera = Camera::new(state.target_position, state.target_look_at, options.fovy, aspect);
        camera.apply_fit(&CameraFit::from_distance(options.default_distance));
        let mut controls = OrbitControls::new(&camera, &options);
        let (min, max) = CameraFit::from_distance(options.default_distance).orbit_limits();
        controls.set_distance_limits(min, max);
        Self::with_control(options, state, camera, controls)
    }
}

impl<C: CameraControl> ViewController<C> {
    /// Assemble a controller around an existing camera and control.
    pub fn with_control(
        options: CameraOptions,
        state: ViewControllerState,
        camera: Camera,
        mut controls: C,
    ) -> Self {
        let interaction = EventLatch::default();
        let subscription = controls.subscribe(ControlEvent::Start, interaction.handler());
        Self {
            state,
            camera,
            controls,
            options,
            interaction,
            subscription,
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> &ViewControllerState {
        &self.state
    }

    /// The camera being driven.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The user-facing control.
    #[must_use]
    pub fn controls(&self) -> &C {
        &self.controls
    }

    /// Whether the camera is under preset control.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Fit the camera to a freshly loaded model.
    ///
    /// Updates the distance, clip planes, orbit zoom limits and the target
    /// position for the current preset. Does not change the lock mode.
    pub fn on_model_loaded(&mut self, bounds: &BoundingBox) -> CameraFit {
        let fit = fit_with_floor(
            bounds.size(),
            self.camera.fovy_radians(),
            self.options.padding,
            self.options.min_dimension,
        );
        self.camera.apply_fit(&fit);
        let (min, max) = fit.orbit_limits();
        self.controls.set_distance_limits(min, max);

        self.transition(|state| state.model_loaded(*bounds, &fit));
        log::info!(
            "fitted camera: distance {:.3}, near {:.4}, far {:.1}",
            fit.distance,
            fit.near,
            fit.far
        );
        fit
    }

    /// Aim for `preset` and re-lock.
    pub fn select_preset(&mut self, preset: ViewPreset) {
        log::debug!("preset selected: {preset}");
        self.transition(|state| state.preset_selected(preset));
    }

    /// The user started a gesture; hand the camera over.
    pub fn on_user_interaction_start(&mut self) {
        if self.state.mode == ControlMode::Locked {
            log::debug!("view unlocked by user interaction");
        }
        self.transition(ViewControllerState::interaction_started);
    }

    /// Forward an input event to the control.
    ///
    /// Returns `true` if the event started a user gesture, in which case the
    /// controller is now free.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let _ = self.controls.handle_input(event, &mut self.camera);
        if self.interaction.take() {
            self.on_user_interaction_start();
            return true;
        }
        false
    }

    /// Per-frame update. Moves the eye a fixed fraction of the way to the
    /// target while locked; does nothing while free.
    ///
    /// `dt` is the frame delta in seconds. The approach is per call, not
    /// per second. Returns `true` while the eye is still moving.
    pub fn on_frame_advance(&mut self, _dt: f32) -> bool {
        if !self.state.is_locked() {
            return false;
        }
        let target = self.state.target_position;
        if self.camera.eye == target && self.camera.target == self.state.target_look_at {
            return false;
        }

        let next = self.camera.eye.lerp(target, self.options.approach_step());
        let remaining = next.distance(target);
        self.camera.eye = if remaining <= self.state.camera_distance * SETTLE_FRACTION {
            target
        } else {
            next
        };
        self.camera.target = self.state.target_look_at;
        self.camera.up = Vec3::Y;
        self.controls.sync_to_camera(&self.camera);
        self.camera.eye != target
    }

    /// Update the viewport aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Return to the freshly mounted state: default distance, locked on
    /// `preset`, nothing fitted.
    pub fn reset(&mut self, preset: ViewPreset) {
        self.state = ViewControllerState::initial(preset, self.options.default_distance);
        let fit = CameraFit::from_distance(self.options.default_distance);
        self.camera.eye = self.state.target_position;
        self.camera.target = self.state.target_look_at;
        self.camera.up = Vec3::Y;
        self.camera.apply_fit(&fit);
        let (min, max) = fit.orbit_limits();
        self.controls.set_distance_limits(min, max);
        self.controls.sync_to_camera(&self.camera);
        let _ = self.interaction.take();
    }

    /// Detach from the control, returning it.
    pub fn into_control(mut self) -> C {
        let _ = self.controls.unsubscribe(self.subscription);
        self.controls
    }

    fn transition(&mut self, f: impl FnOnce(ViewControllerState) -> ViewControllerState) {
        self.state = f(self.state.clone());
    }
}
