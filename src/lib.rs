// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera fitting and view-preset control for a 3D model viewer.
//!
//! Vantage takes a model file (STL, OBJ, glTF or GLB), measures its bounding
//! box and frames it: the camera distance is chosen so the whole model fits
//! the vertical field of view with some padding, and the eye eases toward one
//! of five named preset directions. The view stays locked on the preset until
//! the user starts an orbit gesture, then stays free until a preset is picked
//! again.
//!
//! # Key entry points
//!
//! - [`session::ViewerSession`] - a mounted viewer: file validation,
//!   background loading, error banner and preset buttons
//! - [`camera::ViewController`] - locked/free camera state machine
//! - [`camera::fit`] - the distance and clip-plane fit
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! Parsing runs on a background [`model::LoadWorker`] thread. Every load is
//! stamped by a [`model::LoadTracker`]; when a newer file is opened, results
//! for older ones are discarded on arrival. The frame loop polls for
//! completions, applies the current one to the controller, and advances the
//! camera one step per frame.

pub mod camera;
pub mod error;
pub mod input;
pub mod model;
pub mod options;
pub mod session;
pub mod util;

pub use camera::{CameraFit, ViewController, ViewPreset};
pub use error::VantageError;
pub use options::Options;
pub use session::ViewerSession;
