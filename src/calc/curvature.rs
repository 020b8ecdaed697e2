use serde::Serialize;

use crate::error::GeometryError;

/// Shape of a panel bent around a vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Curvature {
    /// Straight line between the panel's two edges
    pub chord_length: f64,
    /// Depth of the arc's middle behind the chord
    pub sagitta: f64,
    pub radius: f64,
    /// Angle subtended at the curve center, degrees
    pub theta_deg: f64,
}

impl Curvature {
    pub fn theta_rad(&self) -> f64 {
        self.theta_deg.to_radians()
    }
}

/// Chord and sagitta of a panel of flat width `panel_width` curved to
/// `radius`.
///
/// The flat width is the arc length, so the subtended angle is
/// `width / radius`. Every caller in the crate goes through here, so chord,
/// sagitta and footprint all agree on that one angle.
pub fn curved_geometry(panel_width: f64, radius: f64) -> Result<Curvature, GeometryError> {
    let half_width = panel_width / 2.0;
    if radius <= half_width {
        return Err(GeometryError::RadiusTooSmall { radius, half_width });
    }

    let theta = panel_width / radius;
    let half = theta / 2.0;
    Ok(Curvature {
        chord_length: 2.0 * radius * half.sin(),
        sagitta: radius * (1.0 - half.cos()),
        radius,
        theta_deg: theta.to_degrees(),
    })
}
