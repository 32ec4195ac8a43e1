/// Platform-agnostic input events.
///
/// Hosts translate their windowing events into these and hand them to
/// [`ViewController::handle_input`](crate::camera::ViewController::handle_input),
/// which forwards them to the active camera control.
///
/// # Example
///
/// ```ignore
/// use vantage::camera::{ViewController, ViewPreset};
/// use vantage::input::{InputEvent, MouseButton};
/// use vantage::options::CameraOptions;
///
/// let mut view = ViewController::new(CameraOptions::default(), ViewPreset::Top, 1.5);
/// let began = view.handle_input(InputEvent::MouseButton {
///     button: MouseButton::Left,
///     pressed: true,
/// });
/// assert!(began);
/// assert!(!view.is_locked());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position over the viewport.
    CursorMoved {
        /// Pixels from the left edge.
        x: f32,
        /// Pixels from the top edge.
        y: f32,
    },
    /// A button went down or up.
    MouseButton {
        /// Button that changed.
        button: MouseButton,
        /// Down when `true`.
        pressed: bool,
    },
    /// One wheel notch, or a trackpad scroll scaled to notches.
    Scroll {
        /// Positive moves the eye closer to the model.
        delta: f32,
    },
    /// Shift turns a left drag into a pan.
    ModifiersChanged {
        /// Shift is held.
        shift: bool,
    },
}

/// Pointer buttons the orbit control distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Rotates (pans with shift).
    Left,
    /// Pans.
    Right,
    /// Ignored by the orbit control.
    Middle,
}
