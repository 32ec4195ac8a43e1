use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Offset that tilts the top view off the world up axis. Looking exactly
/// down +Y leaves the orbit up vector parallel to the view direction.
pub const TOP_VIEW_TILT: f32 = 1e-4;

/// Named camera viewing direction.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewPreset {
    /// Looking at the origin from the (+1, +1, +1) octant.
    #[default]
    Isometric,
    /// Looking straight down.
    Top,
    /// Looking along -Z.
    Front,
    /// Looking along -X.
    Right,
    /// Looking along +X.
    Left,
}

impl ViewPreset {
    /// Every preset, in button order.
    pub const ALL: [Self; 5] = [
        Self::Isometric,
        Self::Top,
        Self::Front,
        Self::Right,
        Self::Left,
    ];

    /// Unit direction from the look-at target toward the camera.
    #[must_use]
    pub fn direction(self) -> Vec3 {
        match self {
            Self::Isometric => Vec3::ONE.normalize(),
            Self::Top => Vec3::new(0.0, 1.0, TOP_VIEW_TILT).normalize(),
            Self::Front => Vec3::Z,
            Self::Right => Vec3::X,
            Self::Left => Vec3::NEG_X,
        }
    }

    /// Button label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Isometric => "Isometric",
            Self::Top => "Top",
            Self::Front => "Front",
            Self::Right => "Right",
            Self::Left => "Left",
        }
    }
}

impl fmt::Display for ViewPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown view preset '{}' (expected one of: isometric, top, \
             front, right, left)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPreset {}

impl FromStr for ViewPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isometric" | "iso" => Ok(Self::Isometric),
            "top" => Ok(Self::Top),
            "front" => Ok(Self::Front),
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            _ => Err(UnknownPreset(s.to_owned())),
        }
    }
}
