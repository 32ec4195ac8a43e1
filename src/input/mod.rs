//! Platform-agnostic input events consumed by camera controls.

/// Platform-agnostic input events.
pub mod event;

pub use event::{InputEvent, MouseButton};
