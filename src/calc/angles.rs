use log::{debug, warn};
use serde::Serialize;

use crate::calc::curvature::Curvature;
use crate::calc::dimensions::Dimensions;
use crate::config::{AngleMode, Configuration};
use crate::types::Vec3;
use crate::units::clamp;

pub const MIN_SIDE_ANGLE_DEG: f64 = 0.0;
pub const MAX_SIDE_ANGLE_DEG: f64 = 90.0;

/// What the arrangement looks like to the angle, FOV and footprint
/// calculators once curvature is folded in: a curved panel acts as a flat one
/// spanning its chord, set back by its sagitta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectiveGeometry {
    /// `W_eff`: panel width, or the chord when curved
    pub width: f64,
    /// `d_eff`: eye to the plane of the center panel's edges
    pub distance: f64,
    /// `a`: center axis to a side panel's pivot, half the width plus one bezel
    pub half_span: f64,
    pub bezel: f64,
}

impl EffectiveGeometry {
    pub fn new(
        dims: &Dimensions,
        bezel: f64,
        distance: f64,
        curvature: Option<&Curvature>,
    ) -> Self {
        let (width, distance) = match curvature {
            Some(c) => (c.chord_length, distance - c.sagitta),
            None => (dims.panel.width, distance),
        };
        Self {
            width,
            distance,
            half_span: width / 2.0 + bezel,
            bezel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Angles {
    pub recommended_side_angle: f64,
    pub actual_side_angle: f64,
}

/// Where a side panel hinges and which way it runs, in the horizontal
/// plane (`y` is always zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SidePanel {
    /// Inner edge, next to the center panel
    pub pivot: Vec3,
    /// Unit vector from the inner edge towards the outer edge
    pub direction: Vec3,
    pub width: f64,
}

impl SidePanel {
    pub fn point_along(&self, t: f64) -> Vec3 {
        Vec3 {
            x: self.pivot.x + self.direction.x * t,
            y: self.pivot.y,
            z: self.pivot.z + self.direction.z * t,
        }
    }

    pub fn outer_edge(&self) -> Vec3 {
        self.point_along(self.width)
    }

    /// Midpoint of the chord between the two edges.
    pub fn midpoint(&self) -> Vec3 {
        self.point_along(self.width / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SidePanels {
    pub left: SidePanel,
    pub right: SidePanel,
}

impl SidePanels {
    /// Mirror-image side panels rotated `angle_deg` towards the viewer.
    pub fn new(geometry: &EffectiveGeometry, angle_deg: f64) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let a = geometry.half_span;
        let z = -geometry.distance;
        Self {
            left: SidePanel {
                pivot: Vec3::new(-a, 0.0, z),
                direction: Vec3::new(-cos, 0.0, sin),
                width: geometry.width,
            },
            right: SidePanel {
                pivot: Vec3::new(a, 0.0, z),
                direction: Vec3::new(cos, 0.0, sin),
                width: geometry.width,
            },
        }
    }
}

/// Side angle at which a panel hinged at `(a, -d)` keeps its middle on the
/// circle through the center panel's middle, so every panel faces the eye.
pub fn recommended_side_angle(geometry: &EffectiveGeometry) -> f64 {
    let w = geometry.width;
    let d = geometry.distance;
    let a = geometry.half_span;
    let d2 = d * d;

    let x_c = w * d2 / (d2 + a * a);
    let y_c = (a * x_c - d2) / d;
    let ux = 2.0 * (x_c - a);
    let uy = 2.0 * (y_c + d);

    let angle = uy.atan2(ux).to_degrees().abs();
    clamp(angle, MIN_SIDE_ANGLE_DEG, MAX_SIDE_ANGLE_DEG)
}

/// Both angles are zero for a single screen. A manual angle is clamped to
/// the same `[0, 90]` range as the recommendation.
pub fn calculate_angles(cfg: &Configuration, geometry: &EffectiveGeometry) -> Angles {
    if !cfg.arrangement.is_triple() {
        return Angles {
            recommended_side_angle: 0.0,
            actual_side_angle: 0.0,
        };
    }

    let recommended = recommended_side_angle(geometry);
    let actual = match cfg.angle_mode {
        AngleMode::Auto => recommended,
        AngleMode::Manual => {
            let clamped = clamp(cfg.manual_angle_deg, MIN_SIDE_ANGLE_DEG, MAX_SIDE_ANGLE_DEG);
            if clamped != cfg.manual_angle_deg {
                warn!(
                    "manual side angle {:.1}° clamped to {:.1}°",
                    cfg.manual_angle_deg, clamped
                );
            }
            clamped
        }
    };
    debug!("side angle: recommended {recommended:.2}°, actual {actual:.2}°");

    Angles {
        recommended_side_angle: recommended,
        actual_side_angle: actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::curvature::curved_geometry;
    use crate::calc::dimensions::calculate_dimensions;
    use crate::config::Arrangement;
    use crate::test_utils::{approx, make_config};

    fn flat(width: f64, distance: f64, bezel: f64) -> EffectiveGeometry {
        EffectiveGeometry {
            width,
            distance,
            half_span: width / 2.0 + bezel,
            bezel,
        }
    }

    #[test]
    fn zero_bezel_angle_matches_angle_subtended_by_the_center_panel() {
        // Each panel subtends 2·atan(W/2d); the side turns by the same amount.
        let g = flat(600.0, 700.0, 0.0);
        let expected = 2.0 * (300.0_f64 / 700.0).atan().to_degrees();
        assert!(approx(recommended_side_angle(&g), expected, 1e-9));
    }

    #[test]
    fn side_panel_middle_sits_on_the_viewing_circle() {
        for (w, d) in [(597.7, 700.0), (800.0, 600.0), (520.0, 900.0)] {
            let g = flat(w, d, 0.0);
            let sides = SidePanels::new(&g, recommended_side_angle(&g));
            assert!(approx(sides.right.midpoint().length(), d, 0.1));
            assert!(approx(sides.left.midpoint().length(), d, 0.1));
        }
    }

    #[test]
    fn bezel_increases_the_recommended_angle() {
        let bare = recommended_side_angle(&flat(600.0, 700.0, 0.0));
        let bezeled = recommended_side_angle(&flat(600.0, 700.0, 15.0));
        assert!(bezeled > bare);
    }

    #[test]
    fn closer_eye_needs_steeper_sides() {
        let far = recommended_side_angle(&flat(600.0, 900.0, 5.0));
        let near = recommended_side_angle(&flat(600.0, 500.0, 5.0));
        assert!(near > far);
    }

    #[test]
    fn recommendation_stays_within_ninety_degrees() {
        let a = recommended_side_angle(&flat(1200.0, 150.0, 0.0));
        assert!((MIN_SIDE_ANGLE_DEG..=MAX_SIDE_ANGLE_DEG).contains(&a));
    }

    #[test]
    fn single_arrangement_has_no_side_angle() {
        let cfg = make_config(|c| {
            c.angle_mode = AngleMode::Manual;
            c.manual_angle_deg = 40.0;
        });
        let dims = calculate_dimensions(&cfg);
        let g = EffectiveGeometry::new(&dims, cfg.bezel_mm, cfg.distance_mm, None);
        let angles = calculate_angles(&cfg, &g);
        assert_eq!(angles.recommended_side_angle, 0.0);
        assert_eq!(angles.actual_side_angle, 0.0);
    }

    #[test]
    fn manual_angle_is_used_verbatim_in_range() {
        let cfg = make_config(|c| {
            c.arrangement = Arrangement::Triple;
            c.angle_mode = AngleMode::Manual;
            c.manual_angle_deg = 30.0;
        });
        let dims = calculate_dimensions(&cfg);
        let g = EffectiveGeometry::new(&dims, cfg.bezel_mm, cfg.distance_mm, None);
        let angles = calculate_angles(&cfg, &g);
        assert_eq!(angles.actual_side_angle, 30.0);
        assert!(angles.recommended_side_angle > 30.0);
    }

    #[test]
    fn manual_angle_is_clamped() {
        let cfg = make_config(|c| {
            c.arrangement = Arrangement::Triple;
            c.angle_mode = AngleMode::Manual;
            c.manual_angle_deg = 120.0;
        });
        let dims = calculate_dimensions(&cfg);
        let g = EffectiveGeometry::new(&dims, cfg.bezel_mm, cfg.distance_mm, None);
        assert_eq!(calculate_angles(&cfg, &g).actual_side_angle, 90.0);

        let cfg = make_config(|c| {
            c.arrangement = Arrangement::Triple;
            c.angle_mode = AngleMode::Manual;
            c.manual_angle_deg = -15.0;
        });
        assert_eq!(calculate_angles(&cfg, &g).actual_side_angle, 0.0);
    }

    #[test]
    fn curvature_uses_chord_and_pulls_the_pivot_closer() {
        let cfg = make_config(|c| c.bezel_mm = 8.0);
        let dims = calculate_dimensions(&cfg);
        let curve = curved_geometry(dims.panel.width, 1000.0).unwrap();
        let g = EffectiveGeometry::new(&dims, 8.0, 700.0, Some(&curve));
        assert!(approx(g.width, curve.chord_length, 1e-12));
        assert!(approx(g.distance, 700.0 - curve.sagitta, 1e-12));
        assert!(approx(g.half_span, curve.chord_length / 2.0 + 8.0, 1e-12));
    }

    #[test]
    fn side_panels_mirror_each_other() {
        let g = flat(600.0, 700.0, 10.0);
        let sides = SidePanels::new(&g, 40.0);
        let l = sides.left.outer_edge();
        let r = sides.right.outer_edge();
        assert!(approx(l.x, -r.x, 1e-9));
        assert!(approx(l.z, r.z, 1e-9));
        assert!(approx(sides.right.pivot.x, 310.0, 1e-12));
        assert!(approx(sides.right.pivot.z, -700.0, 1e-12));
    }
}
