use log::debug;
use serde::Serialize;

use crate::calc::{CalculationResults, SidePanel};
use crate::config::Configuration;
use crate::error::{LayoutError, ensure_finite};
use crate::projection::project_top_down;
use crate::types::{Point, Rect, Vec3};

pub mod debug;
pub mod entities;

pub use debug::DebugOverlay;
pub use entities::{EntityId, FovRay, LayerTag, Placement, RigBase, Screen, ViewPoint};

/// Cockpit or desk outline, millimetres.
pub const RIG_WIDTH_MM: f64 = 600.0;
pub const RIG_DEPTH_MM: f64 = 1500.0;
/// Distance from the back of the rig forward to the eye.
pub const HEAD_OFFSET_MM: f64 = 400.0;

/// World-space bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn around(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut b = Bounds {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        };
        for p in points {
            b.min = Vec3::new(b.min.x.min(p.x), b.min.y.min(p.y), b.min.z.min(p.z));
            b.max = Vec3::new(b.max.x.max(p.x), b.max.y.max(p.y), b.max.z.max(p.z));
        }
        b
    }

    /// The box as seen from above.
    pub fn plan_rect(&self) -> Rect {
        let a = project_top_down(self.min);
        let b = project_top_down(self.max);
        Rect {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }
}

/// Positioned entities for one configuration. Built from scratch on every
/// call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Center first, then left and right for a triple arrangement
    pub screens: Vec<Screen>,
    pub view_point: ViewPoint,
    pub rig_base: RigBase,
    /// Left then right
    pub fov_rays: [FovRay; 2],
    /// Covers every screen and rig corner plus the eye
    pub bounds: Bounds,
}

impl Scene {
    /// Every screen and rig corner, the points the bounds are built from.
    pub fn corner_points(&self) -> Vec<(EntityId, Vec3)> {
        let mut out = Vec::with_capacity(4 * (self.screens.len() + 1));
        for s in &self.screens {
            out.extend(s.corners().into_iter().map(|p| (s.placement.id, p)));
        }
        out.extend(
            self.rig_base
                .corners()
                .into_iter()
                .map(|p| (EntityId::RigBase, p)),
        );
        out
    }
}

fn side_screen(
    id: EntityId,
    side: &SidePanel,
    yaw_deg: f64,
    template: &Screen,
) -> Result<Screen, LayoutError> {
    let mid = side.midpoint();
    // Away-from-viewer normal of the side panel
    let (sin, cos) = yaw_deg.to_radians().sin_cos();
    let setback = template.edge_setback();
    let position = Vec3::new(mid.x + setback * sin, 0.0, mid.z - setback * cos);
    ensure_finite("side screen x", position.x)?;
    ensure_finite("side screen z", position.z)?;

    Ok(Screen {
        placement: Placement::new(id, position, yaw_deg, LayerTag::Screens),
        ..template.clone()
    })
}

fn fov_ray(id: EntityId, angle_deg: f64, length: f64) -> FovRay {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    FovRay {
        placement: Placement::new(id, Vec3::ZERO, 0.0, LayerTag::Fov),
        direction: Vec3::new(sin, 0.0, -cos),
        length,
        angle_deg,
    }
}

/// Lay out screens, eye, rig and FOV rays in world space. The eye is the
/// origin and the center screen faces it down `-z`.
pub fn build_scene(
    cfg: &Configuration,
    results: &CalculationResults,
) -> Result<Scene, LayoutError> {
    let distance = ensure_finite("viewing distance", cfg.distance_mm)?;
    let panel = &results.dimensions.panel;
    ensure_finite("panel width", panel.width)?;
    ensure_finite("panel height", panel.height)?;
    let side_angle = ensure_finite("side angle", results.angles.actual_side_angle)?;
    let h_fov = ensure_finite("horizontal fov", results.fov.horizontal)?;
    ensure_finite("vertical fov", results.fov.vertical)?;

    let center = Screen {
        placement: Placement::new(
            EntityId::CenterScreen,
            Vec3::new(0.0, 0.0, -distance),
            0.0,
            LayerTag::Screens,
        ),
        width: panel.width,
        height: panel.height,
        bezel: cfg.bezel_mm,
        curvature: results.curvature,
    };

    let mut screens = vec![center.clone()];
    if let Some(sides) = &results.sides {
        screens.push(side_screen(
            EntityId::LeftScreen,
            &sides.left,
            -side_angle,
            &center,
        )?);
        screens.push(side_screen(
            EntityId::RightScreen,
            &sides.right,
            side_angle,
            &center,
        )?);
    }

    let view_point = ViewPoint {
        placement: Placement::new(EntityId::ViewPoint, Vec3::ZERO, 0.0, LayerTag::ViewPoint),
        eye_height: panel.height / 2.0,
        fov: results.fov,
    };

    let rig_base = RigBase {
        placement: Placement::new(
            EntityId::RigBase,
            Vec3::new(0.0, 0.0, -(RIG_DEPTH_MM / 2.0 - HEAD_OFFSET_MM)),
            0.0,
            LayerTag::Rig,
        ),
        width: RIG_WIDTH_MM,
        depth: RIG_DEPTH_MM,
    };

    // Rays reach as far as the furthest screen corner
    let ray_length = screens
        .iter()
        .flat_map(|s| s.corners())
        .map(|p| Vec3::new(p.x, 0.0, p.z).length())
        .fold(distance, f64::max);
    let fov_rays = [
        fov_ray(EntityId::FovRayLeft, -h_fov / 2.0, ray_length),
        fov_ray(EntityId::FovRayRight, h_fov / 2.0, ray_length),
    ];

    let mut scene = Scene {
        screens,
        view_point,
        rig_base,
        fov_rays,
        bounds: Bounds {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        },
    };
    scene.bounds = Bounds::around(scene.corner_points().into_iter().map(|(_, p)| p));
    debug!(
        "scene: {} screen(s), bounds x {:.0}..{:.0}, z {:.0}..{:.0}",
        scene.screens.len(),
        scene.bounds.min.x,
        scene.bounds.max.x,
        scene.bounds.min.z,
        scene.bounds.max.z
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::calculate;
    use crate::config::{AngleMode, Arrangement};
    use crate::test_utils::{approx, make_config};

    fn screen(scene: &Scene, id: EntityId) -> Option<&Screen> {
        scene.screens.iter().find(|s| s.placement.id == id)
    }

    fn scene_for(patch: impl FnOnce(&mut Configuration)) -> Scene {
        let cfg = make_config(patch);
        let results = calculate(&cfg).unwrap();
        build_scene(&cfg, &results).unwrap()
    }

    #[test]
    fn single_has_one_centered_screen() {
        let scene = scene_for(|_| {});
        assert_eq!(scene.screens.len(), 1);
        let s = &scene.screens[0];
        assert_eq!(s.placement.id, EntityId::CenterScreen);
        assert_eq!(s.placement.position, Vec3::new(0.0, 0.0, -700.0));
        assert_eq!(s.placement.yaw_deg, 0.0);
        assert!(screen(&scene, EntityId::LeftScreen).is_none());
    }

    #[test]
    fn triple_side_screens_lie_on_the_viewing_circle() {
        let scene = scene_for(|c| c.arrangement = Arrangement::Triple);
        assert_eq!(scene.screens.len(), 3);
        for id in [EntityId::LeftScreen, EntityId::RightScreen] {
            let s = screen(&scene, id).unwrap();
            assert!(
                approx(s.placement.position.length(), 700.0, 0.1),
                "{id:?} at {:?}",
                s.placement.position
            );
        }
    }

    #[test]
    fn side_screens_mirror_each_other() {
        let scene = scene_for(|c| {
            c.arrangement = Arrangement::Triple;
            c.angle_mode = AngleMode::Manual;
            c.manual_angle_deg = 30.0;
            c.bezel_mm = 12.0;
        });
        let l = screen(&scene, EntityId::LeftScreen).unwrap();
        let r = screen(&scene, EntityId::RightScreen).unwrap();
        assert_eq!(r.placement.yaw_deg, 30.0);
        assert_eq!(l.placement.yaw_deg, -30.0);
        assert!(approx(l.placement.position.x, -r.placement.position.x, 1e-9));
        assert!(approx(l.placement.position.z, r.placement.position.z, 1e-9));
    }

    #[test]
    fn side_screen_inner_edge_sits_at_the_pivot() {
        let cfg = make_config(|c| {
            c.arrangement = Arrangement::Triple;
            c.bezel_mm = 10.0;
        });
        let results = calculate(&cfg).unwrap();
        let scene = build_scene(&cfg, &results).unwrap();
        let pivot = results.sides.unwrap().right.pivot;
        let r = screen(&scene, EntityId::RightScreen).unwrap();
        // Bottom-left corner of the right screen is its inner edge, one bezel
        // further in than the panel edge at the pivot.
        let inner = r.corners()[0];
        let expect_x = pivot.x - 10.0 * r.placement.yaw_deg.to_radians().cos();
        assert!(approx(inner.x, expect_x, 1e-6));
    }

    #[test]
    fn curved_triple_keeps_screen_middles_on_the_arc_midpoint_line() {
        let cfg = make_config(|c| {
            c.arrangement = Arrangement::Triple;
            c.curved = true;
            c.curve_radius_mm = Some(1000.0);
        });
        let results = calculate(&cfg).unwrap();
        let scene = build_scene(&cfg, &results).unwrap();
        let r = screen(&scene, EntityId::RightScreen).unwrap();
        let mid = results.sides.unwrap().right.midpoint();
        let sagitta = results.curvature.unwrap().sagitta;
        let dx = r.placement.position.x - mid.x;
        let dz = r.placement.position.z - mid.z;
        assert!(approx(dx.hypot(dz), sagitta, 1e-9));
        assert!(r.placement.position.length() > mid.length());
    }

    #[test]
    fn viewpoint_is_the_origin_with_half_panel_eye_height() {
        let cfg = make_config(|_| {});
        let results = calculate(&cfg).unwrap();
        let scene = build_scene(&cfg, &results).unwrap();
        assert_eq!(scene.view_point.placement.position, Vec3::ZERO);
        assert!(approx(
            scene.view_point.eye_height,
            results.dimensions.panel.height / 2.0,
            1e-12
        ));
        assert_eq!(scene.view_point.fov, results.fov);
    }

    #[test]
    fn rig_base_is_offset_behind_the_eye() {
        let scene = scene_for(|_| {});
        let rig = &scene.rig_base;
        assert!(approx(rig.placement.position.z, -350.0, 1e-12));
        let back = rig.corners()[2];
        assert!(approx(back.z, HEAD_OFFSET_MM, 1e-12));
    }

    #[test]
    fn fov_rays_bound_the_horizontal_fov() {
        let cfg = make_config(|c| c.arrangement = Arrangement::Triple);
        let results = calculate(&cfg).unwrap();
        let scene = build_scene(&cfg, &results).unwrap();
        let [left, right] = &scene.fov_rays;
        assert!(approx(right.angle_deg - left.angle_deg, results.fov.horizontal, 1e-9));
        assert!(approx(right.direction.length(), 1.0, 1e-12));
        assert!(right.end().x > 0.0 && left.end().x < 0.0);
        assert!(right.length >= 700.0);
    }

    #[test]
    fn bounds_cover_every_corner_and_the_eye() {
        let scene = scene_for(|c| {
            c.arrangement = Arrangement::Triple;
            c.bezel_mm = 5.0;
        });
        let b = scene.bounds;
        assert!(b.min.x <= 0.0 && b.max.x >= 0.0);
        assert!(b.min.z <= 0.0 && b.max.z >= 0.0);
        for (_, p) in scene.corner_points() {
            assert!(p.x >= b.min.x && p.x <= b.max.x);
            assert!(p.z >= b.min.z && p.z <= b.max.z);
        }
        // 4 corners per screen plus the rig
        assert_eq!(scene.corner_points().len(), 16);
    }

    #[test]
    fn non_finite_results_are_rejected() {
        let cfg = make_config(|_| {});
        let mut results = calculate(&cfg).unwrap();
        results.angles.actual_side_angle = f64::NAN;
        assert!(matches!(
            build_scene(&cfg, &results),
            Err(LayoutError::NonFinite {
                what: "side angle",
                ..
            })
        ));
    }

    #[test]
    fn building_twice_gives_the_same_scene() {
        let cfg = make_config(|c| c.arrangement = Arrangement::Triple);
        let results = calculate(&cfg).unwrap();
        assert_eq!(
            build_scene(&cfg, &results).unwrap(),
            build_scene(&cfg, &results).unwrap()
        );
    }
}
