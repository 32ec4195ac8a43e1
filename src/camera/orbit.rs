use glam::{Mat3, Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::camera::events::{ControlEvent, ControlEvents, Handler, Subscribers, SubscriptionToken};
use crate::input::{InputEvent, MouseButton};
use crate::options::CameraOptions;

/// Closest the eye may get to the focus point, whatever the limits say.
pub const MIN_ORBIT_DISTANCE: f32 = 1e-4;

/// Smallest per-event zoom factor; keeps a large scroll from crossing the
/// focus point.
const MIN_ZOOM_STEP: f32 = 0.1;

/// A user-driven camera control the view controller can defer to.
pub trait CameraControl: ControlEvents {
    /// Feed a raw input event. Returns `true` if the control consumed it.
    fn handle_input(&mut self, event: InputEvent, camera: &mut Camera) -> bool;

    /// Adopt the camera's current pose as the control's orbit state, so the
    /// next gesture continues from where the camera actually is.
    fn sync_to_camera(&mut self, camera: &Camera);

    /// Restrict zoom to `[min, max]` eye-to-focus distance.
    fn set_distance_limits(&mut self, min: f32, max: f32);
}

/// Orbit control: rotate around a focus point, pan it, zoom toward it.
///
/// Left drag rotates, shift+left or right drag pans, scroll zooms. Each
/// gesture publishes `Start`, then `Change` for every camera move, then
/// `End`.
#[derive(Debug)]
pub struct OrbitControls {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    min_distance: f32,
    max_distance: f32,

    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,

    last_cursor: Option<Vec2>,
    drag: Option<DragMode>,
    shift_pressed: bool,

    subscribers: Subscribers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
}

impl OrbitControls {
    /// Create a control orbiting the camera's current target.
    #[must_use]
    pub fn new(camera: &Camera, options: &CameraOptions) -> Self {
        let mut controls = Self {
            orientation: Quat::IDENTITY,
            distance: 1.0,
            focus_point: Vec3::ZERO,
            min_distance: MIN_ORBIT_DISTANCE,
            max_distance: f32::INFINITY,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            last_cursor: None,
            drag: None,
            shift_pressed: false,
            subscribers: Subscribers::new(),
        };
        controls.sync_to_camera(camera);
        controls
    }

    /// Current eye-to-focus distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Current focus point.
    #[must_use]
    pub fn focus_point(&self) -> Vec3 {
        self.focus_point
    }

    /// Eye position implied by the orbit state.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.focus_point + (self.orientation * Vec3::Z) * self.distance
    }

    /// Whether a drag gesture is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn apply(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.focus_point;
        camera.up = self.orientation * Vec3::Y;
    }

    /// Orbit by a cursor delta in pixels.
    pub fn rotate(&mut self, delta: Vec2, camera: &mut Camera) {
        // Horizontal rotation around camera's up vector
        let up = self.orientation * Vec3::Y;
        let horizontal = Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal * self.orientation;

        // Vertical rotation around camera's right vector
        let right = self.orientation * Vec3::X;
        let vertical = Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = (vertical * self.orientation).normalize();

        self.apply(camera);
        self.subscribers.emit(ControlEvent::Change);
    }

    /// Slide the focus point in the view plane by a cursor delta in pixels.
    pub fn pan(&mut self, delta: Vec2, camera: &mut Camera) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        // Scale with distance so panning feels the same at any model size
        let step = self.pan_speed * self.distance;

        self.focus_point += right * (-delta.x * step) + up * (delta.y * step);
        self.apply(camera);
        self.subscribers.emit(ControlEvent::Change);
    }

    /// Zoom by a scroll amount (positive = in).
    pub fn zoom(&mut self, delta: f32, camera: &mut Camera) {
        let step = (1.0 - delta * self.zoom_speed).max(MIN_ZOOM_STEP);
        if step.is_finite() {
            self.distance = (self.distance * step).clamp(self.min_distance, self.max_distance);
        }
        self.apply(camera);
        self.subscribers.emit(ControlEvent::Change);
    }

    fn begin_drag(&mut self, mode: DragMode) {
        if self.drag.is_none() {
            self.subscribers.emit(ControlEvent::Start);
        }
        self.drag = Some(mode);
    }

    fn end_drag(&mut self) {
        if self.drag.take().is_some() {
            self.subscribers.emit(ControlEvent::End);
        }
    }
}

impl ControlEvents for OrbitControls {
    fn subscribe(&mut self, event: ControlEvent, handler: Handler) -> SubscriptionToken {
        self.subscribers.subscribe(event, handler)
    }

    fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        self.subscribers.unsubscribe(token)
    }
}

impl CameraControl for OrbitControls {
    fn handle_input(&mut self, event: InputEvent, camera: &mut Camera) -> bool {
        match event {
            InputEvent::MouseButton { button, pressed } => {
                if !pressed {
                    self.end_drag();
                    return true;
                }
                let mode = match button {
                    MouseButton::Left if self.shift_pressed => DragMode::Pan,
                    MouseButton::Left => DragMode::Rotate,
                    MouseButton::Right => DragMode::Pan,
                    MouseButton::Middle => return false,
                };
                self.begin_drag(mode);
                true
            }
            InputEvent::CursorMoved { x, y } => {
                let current = Vec2::new(x, y);
                let delta = self
                    .last_cursor
                    .map_or(Vec2::ZERO, |last| current - last);
                self.last_cursor = Some(current);

                match self.drag {
                    Some(DragMode::Rotate) => self.rotate(delta, camera),
                    Some(DragMode::Pan) => self.pan(delta, camera),
                    None => return false,
                }
                true
            }
            InputEvent::Scroll { delta } => {
                // A wheel notch is a complete gesture on its own
                self.subscribers.emit(ControlEvent::Start);
                self.zoom(delta, camera);
                self.subscribers.emit(ControlEvent::End);
                true
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                false
            }
        }
    }

    fn sync_to_camera(&mut self, camera: &Camera) {
        let offset = camera.eye - camera.target;
        let distance = offset.length();
        if distance <= f32::EPSILON || !distance.is_finite() {
            return;
        }
        let back = offset / distance;
        let right = Vec3::Y.cross(back);
        let right = if right.length_squared() > 1e-12 {
            right.normalize()
        } else {
            // Looking straight along the up axis; any horizontal right works
            Vec3::X
        };
        let up = back.cross(right);

        self.orientation = Quat::from_mat3(&Mat3::from_cols(right, up, back)).normalize();
        self.distance = distance;
        self.focus_point = camera.target;
    }

    fn set_distance_limits(&mut self, min: f32, max: f32) {
        self.min_distance = if min.is_finite() {
            min.max(MIN_ORBIT_DISTANCE)
        } else {
            MIN_ORBIT_DISTANCE
        };
        self.max_distance = if max.is_nan() {
            f32::INFINITY
        } else {
            max.max(self.min_distance)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::events::EventLatch;

    fn setup() -> (Camera, OrbitControls) {
        let camera = Camera::new(Vec3::new(3.0, 4.0, 5.0), Vec3::ZERO, 50.0, 1.0);
        let controls = OrbitControls::new(&camera, &CameraOptions::default());
        (camera, controls)
    }

    #[test]
    fn sync_reproduces_camera_eye() {
        let (camera, controls) = setup();
        assert!((controls.eye() - camera.eye).length() < 1e-4);
        assert!((controls.distance() - camera.eye.length()).abs() < 1e-4);
    }

    #[test]
    fn sync_handles_straight_down_view() {
        let mut camera = Camera::new(Vec3::new(0.0, 8.0, 0.0), Vec3::ZERO, 50.0, 1.0);
        let mut controls = OrbitControls::new(&camera, &CameraOptions::default());
        assert!((controls.eye() - camera.eye).length() < 1e-4);
        controls.rotate(Vec2::new(5.0, 0.0), &mut camera);
        assert!(camera.eye.is_finite());
    }

    #[test]
    fn drag_publishes_start_change_end() {
        let (mut camera, mut controls) = setup();
        let start = EventLatch::default();
        let change = EventLatch::default();
        let end = EventLatch::default();
        let _ = controls.subscribe(ControlEvent::Start, start.handler());
        let _ = controls.subscribe(ControlEvent::Change, change.handler());
        let _ = controls.subscribe(ControlEvent::End, end.handler());

        let _ = controls.handle_input(InputEvent::CursorMoved { x: 10.0, y: 10.0 }, &mut camera);
        assert!(!change.take(), "hover alone does not move the camera");

        let press = InputEvent::MouseButton { button: MouseButton::Left, pressed: true };
        assert!(controls.handle_input(press, &mut camera));
        assert!(start.take());

        let before = camera.eye;
        let _ = controls.handle_input(InputEvent::CursorMoved { x: 30.0, y: 12.0 }, &mut camera);
        assert!(change.take());
        assert_ne!(before, camera.eye);
        assert!((camera.eye.length() - before.length()).abs() < 1e-3, "rotation keeps distance");

        let release = InputEvent::MouseButton { button: MouseButton::Left, pressed: false };
        let _ = controls.handle_input(release, &mut camera);
        assert!(end.take());
        assert!(!controls.is_dragging());
    }

    #[test]
    fn scroll_is_a_whole_gesture_and_respects_limits() {
        let (mut camera, mut controls) = setup();
        let start = EventLatch::default();
        let _ = controls.subscribe(ControlEvent::Start, start.handler());
        controls.set_distance_limits(5.0, 8.0);

        for _ in 0..100 {
            let _ = controls.handle_input(InputEvent::Scroll { delta: 1.0 }, &mut camera);
        }
        assert!(start.take());
        assert!((controls.distance() - 5.0).abs() < 1e-5);

        for _ in 0..100 {
            let _ = controls.handle_input(InputEvent::Scroll { delta: -1.0 }, &mut camera);
        }
        assert!((controls.distance() - 8.0).abs() < 1e-5);
    }

    #[test]
    fn huge_scroll_never_reaches_focus_point() {
        let (mut camera, mut controls) = setup();
        controls.set_distance_limits(0.0, f32::INFINITY);
        let _ = controls.handle_input(InputEvent::Scroll { delta: 10.0 }, &mut camera);
        assert!(controls.distance() > 0.0);
        assert_ne!(camera.eye, camera.target);

        for _ in 0..1000 {
            let _ = controls.handle_input(InputEvent::Scroll { delta: 50.0 }, &mut camera);
        }
        assert!((controls.distance() - MIN_ORBIT_DISTANCE).abs() < 1e-9);

        let near = controls.distance();
        let _ = controls.handle_input(InputEvent::Scroll { delta: -1.0 }, &mut camera);
        assert!(controls.distance() > near);
    }

    #[test]
    fn shift_drag_pans_focus() {
        let (mut camera, mut controls) = setup();
        let _ = controls.handle_input(InputEvent::ModifiersChanged { shift: true }, &mut camera);
        let _ = controls.handle_input(InputEvent::CursorMoved { x: 0.0, y: 0.0 }, &mut camera);
        let _ = controls.handle_input(
            InputEvent::MouseButton { button: MouseButton::Left, pressed: true },
            &mut camera,
        );
        let _ = controls.handle_input(InputEvent::CursorMoved { x: 20.0, y: 0.0 }, &mut camera);
        assert_ne!(controls.focus_point(), Vec3::ZERO);
        assert_eq!(camera.target, controls.focus_point());
    }
}
