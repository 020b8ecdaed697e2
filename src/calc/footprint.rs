use serde::Serialize;

use crate::calc::angles::{EffectiveGeometry, SidePanels};
use crate::calc::curvature::Curvature;

/// Desk space taken up by the screens, millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Footprint {
    pub total_width: f64,
    pub depth: f64,
}

pub fn calculate_footprint(
    geometry: &EffectiveGeometry,
    sides: Option<&SidePanels>,
    curvature: Option<&Curvature>,
    side_angle_deg: f64,
) -> Footprint {
    let bezel = geometry.bezel;
    let total_width = match (sides, curvature) {
        (Some(sides), _) => {
            let span = sides.right.outer_edge().x - sides.left.outer_edge().x;
            // Outer bezels turn with the side panels
            span + 2.0 * bezel * side_angle_deg.to_radians().cos()
        }
        (None, Some(c)) => {
            let outer_radius = c.radius + bezel;
            2.0 * outer_radius * (c.theta_rad() / 2.0).sin()
        }
        (None, None) => geometry.width + 2.0 * bezel,
    };

    Footprint {
        total_width,
        depth: geometry.distance,
    }
}
