//! Camera distance and clip-plane fitting for an axis-aligned bounding box.
//!
//! The distance frames the largest box dimension inside the vertical field
//! of view, then scales by a padding factor. Clip planes scale with the
//! distance so models spanning orders of magnitude in size neither clip nor
//! z-fight.

use glam::Vec3;

/// Smallest box dimension used for fitting. Degenerate boxes (a single
/// point, an empty model) are floored to this so the distance stays finite.
pub const MIN_DIMENSION: f32 = 1e-3;

/// Ratio between the fitted distance and the near plane, and between the
/// far plane and the fitted distance.
pub const CLIP_RATIO: f32 = 100.0;

/// Orbit zoom limits are this factor either side of the fitted distance.
const ORBIT_LIMIT_RATIO: f32 = 10.0;

/// Result of fitting a camera to a bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFit {
    /// Eye-to-target distance that frames the box.
    pub distance: f32,
    /// Near clipping plane (`distance / 100`).
    pub near: f32,
    /// Far clipping plane (`distance * 100`).
    pub far: f32,
}

/// Ground-grid metrics derived from a fitted distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    /// Size of a minor grid cell.
    pub cell_size: f32,
    /// Size of a major grid section.
    pub section_size: f32,
    /// Distance at which the grid has faded out.
    pub fade_distance: f32,
}

impl CameraFit {
    /// Derive a fit from a known distance.
    #[must_use]
    pub fn from_distance(distance: f32) -> Self {
        Self {
            distance,
            near: distance / CLIP_RATIO,
            far: distance * CLIP_RATIO,
        }
    }

    /// Closest and farthest orbit zoom distances for this fit.
    #[must_use]
    pub fn orbit_limits(&self) -> (f32, f32) {
        (
            self.distance / ORBIT_LIMIT_RATIO,
            self.distance * ORBIT_LIMIT_RATIO,
        )
    }

    /// Grid cell, section and fade sizes scaled to this fit.
    #[must_use]
    pub fn grid(&self) -> GridMetrics {
        GridMetrics {
            cell_size: self.distance / 10.0,
            section_size: self.distance,
            fade_distance: self.distance * 3.0,
        }
    }
}

/// Fit a camera to a box of the given size.
///
/// `vertical_fov` is in radians and is clamped into the open interval
/// (0, π). A non-positive or non-finite `padding` falls back to 1.0.
#[must_use]
pub fn fit(box_size: Vec3, vertical_fov: f32, padding: f32) -> CameraFit {
    fit_with_floor(box_size, vertical_fov, padding, MIN_DIMENSION)
}

/// [`fit`] with an explicit minimum-dimension floor.
#[must_use]
pub fn fit_with_floor(
    box_size: Vec3,
    vertical_fov: f32,
    padding: f32,
    min_dimension: f32,
) -> CameraFit {
    let floor = if min_dimension.is_finite() && min_dimension > 0.0 {
        min_dimension
    } else {
        MIN_DIMENSION
    };
    let max_dim = box_size.max_element();
    let max_dim = if max_dim.is_finite() {
        max_dim.max(floor)
    } else {
        floor
    };

    let fov = clamp_fov(vertical_fov);
    let padding = if padding.is_finite() && padding > 0.0 {
        padding
    } else {
        1.0
    };

    let distance = (max_dim / (2.0 * (fov / 2.0).tan())) * padding;
    CameraFit::from_distance(distance)
}

fn clamp_fov(fov: f32) -> f32 {
    const EPS: f32 = 1e-4;
    if fov.is_nan() {
        return std::f32::consts::FRAC_PI_4;
    }
    fov.clamp(EPS, std::f32::consts::PI - EPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOV_50: f32 = 0.872_664_6;

    #[test]
    fn reference_scenario() {
        let fit = fit(Vec3::splat(2.0), FOV_50, 1.2);
        assert!((fit.distance - 2.573).abs() < 1e-2, "got {}", fit.distance);
        assert!((fit.near - 0.025_73).abs() < 1e-3);
        assert!((fit.far - 257.3).abs() < 1.0);
    }

    #[test]
    fn zero_box_uses_floor() {
        let fit = fit(Vec3::ZERO, FOV_50, 1.2);
        assert!(fit.distance.is_finite());
        assert!(fit.distance > 0.0);
        let expected = MIN_DIMENSION / (2.0 * (FOV_50 / 2.0).tan()) * 1.2;
        assert!((fit.distance - expected).abs() < 1e-6);
    }

    #[test]
    fn non_finite_sizes_are_floored() {
        let fit = fit(Vec3::new(f32::NAN, f32::NEG_INFINITY, 0.0), FOV_50, 1.2);
        assert!(fit.distance.is_finite() && fit.distance > 0.0);
    }

    #[test]
    fn distance_is_finite_across_fov_range() {
        let sizes = [Vec3::ZERO, Vec3::ONE, Vec3::new(1e6, 0.0, 3.0)];
        for size in sizes {
            for step in 1..32 {
                let fov = std::f32::consts::PI * step as f32 / 32.0;
                let fit = fit(size, fov, 1.5);
                assert!(fit.distance.is_finite(), "{size:?} {fov}");
                assert!(fit.distance > 0.0);
                assert!(fit.near > 0.0 && fit.near < fit.far);
            }
        }
    }

    #[test]
    fn monotonic_in_max_dimension() {
        let mut last = 0.0;
        for i in 0..50 {
            let size = Vec3::new(0.5, i as f32 * 0.3, 1.0);
            let d = fit(size, FOV_50, 1.2).distance;
            assert!(d >= last, "distance shrank at step {i}");
            last = d;
        }
    }

    #[test]
    fn bad_padding_falls_back_to_unity() {
        let unpadded = fit(Vec3::ONE, FOV_50, 1.0);
        assert_eq!(fit(Vec3::ONE, FOV_50, 0.0), unpadded);
        assert_eq!(fit(Vec3::ONE, FOV_50, f32::NAN), unpadded);
    }

    #[test]
    fn orbit_limits_and_grid_scale_with_distance() {
        let fit = CameraFit::from_distance(20.0);
        assert_eq!(fit.orbit_limits(), (2.0, 200.0));
        let grid = fit.grid();
        assert_eq!(grid.cell_size, 2.0);
        assert_eq!(grid.section_size, 20.0);
        assert_eq!(grid.fade_distance, 60.0);
    }
}
