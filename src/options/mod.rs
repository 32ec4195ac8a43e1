//! Viewer options with TOML file support.
//!
//! Camera fitting/control parameters and session settings are consolidated
//! here. Options serialize to/from TOML so a viewer setup can be saved and
//! reloaded.

mod camera;
mod viewer;

use std::path::Path;

pub use camera::{CameraOptions, DEFAULT_APPROACH_FACTOR};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use viewer::ViewerOptions;

use crate::error::VantageError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection, fitting and control parameters.
    pub camera: CameraOptions,
    /// Session-level viewer settings.
    pub viewer: ViewerOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`VantageError::Io`] if the file cannot be read,
    /// [`VantageError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, VantageError> {
        let content = std::fs::read_to_string(path).map_err(VantageError::Io)?;
        toml::from_str(&content)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// [`VantageError::Io`] on write failure.
    pub fn save(&self, path: &Path) -> Result<(), VantageError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VantageError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VantageError::Io)?;
        }
        std::fs::write(path, content).map_err(VantageError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ViewPreset;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[camera]
padding = 1.5

[viewer]
initial_preset = "front"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.padding, 1.5);
        assert_eq!(opts.viewer.initial_preset, ViewPreset::Front);
        // Everything else should be default
        assert_eq!(opts.camera.fovy, 50.0);
        assert_eq!(opts.camera.default_distance, 10.0);
        assert_eq!(opts.viewer.target_fps, 60);
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("viewer.toml");
        let mut opts = Options::default();
        opts.camera.approach_factor = 0.25;
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[camera\nfovy = ").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(VantageError::OptionsParse(_))
        ));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("viewer"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("padding").is_some());
        assert!(camera.get("default_distance").is_none());
        assert!(camera.get("min_dimension").is_none());
    }
}
