use serde::Serialize;

use crate::calc::angles::{EffectiveGeometry, SidePanels};
use crate::types::Vec3;
use crate::units::normalize_deg;

/// Field of view in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fov {
    pub horizontal: f64,
    pub vertical: f64,
}

/// Screens only curve horizontally, so this always uses the flat distance.
pub fn vertical_fov(panel_height: f64, distance: f64) -> f64 {
    2.0 * (panel_height / (2.0 * distance)).atan().to_degrees()
}

pub fn single_horizontal_fov(geometry: &EffectiveGeometry) -> f64 {
    2.0 * (geometry.width / (2.0 * geometry.distance))
        .atan()
        .to_degrees()
}

/// Bearing of a point seen from the eye, degrees counter-clockwise from `+x`
/// in the horizontal plane. Points in front of the viewer fall in
/// `(180, 360)`.
pub fn bearing_deg(p: Vec3) -> f64 {
    p.z.atan2(p.x).to_degrees()
}

/// Angle swept going from the right edge's bearing to the left edge's,
/// through the screens. Normally the short way round; when the short arc's
/// middle points behind the viewer the sides have wrapped past the eye and
/// the long way round is the one covered by screens.
pub fn angular_span(right_deg: f64, left_deg: f64) -> f64 {
    let r = normalize_deg(right_deg);
    let l = normalize_deg(left_deg);
    let delta = (l - r + 540.0).rem_euclid(360.0) - 180.0;
    let mid = (r + delta / 2.0).to_radians();
    let small = delta.abs();
    if mid.sin() > 0.0 { 360.0 - small } else { small }
}

pub fn triple_horizontal_fov(geometry: &EffectiveGeometry, sides: &SidePanels) -> f64 {
    let right = bearing_deg(sides.right.outer_edge());
    let left = bearing_deg(sides.left.outer_edge());
    let bezel = 2.0 * (geometry.bezel / geometry.distance).atan().to_degrees();
    angular_span(right, left) + bezel
}

pub fn calculate_fov(
    geometry: &EffectiveGeometry,
    sides: Option<&SidePanels>,
    panel_height: f64,
    distance: f64,
) -> Fov {
    let horizontal = match sides {
        Some(sides) => triple_horizontal_fov(geometry, sides),
        None => single_horizontal_fov(geometry),
    };
    Fov {
        horizontal,
        vertical: vertical_fov(panel_height, distance),
    }
}
