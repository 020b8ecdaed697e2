use serde::Serialize;

use crate::scene::entities::EntityId;
use crate::scene::{Bounds, Scene};
use crate::types::Vec3;

const SCREEN_CORNER_LABELS: [&str; 4] = ["bl", "br", "tr", "tl"];
const RIG_CORNER_LABELS: [&str; 4] = ["fl", "fr", "br", "bl"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugPoint {
    pub owner: EntityId,
    pub label: String,
    pub position: Vec3,
}

/// Corner markers for diagnosing a layout. Built on request from a finished
/// scene; the scene itself never carries them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugOverlay {
    pub enabled: bool,
    pub points: Vec<DebugPoint>,
    pub bounds: Bounds,
}

impl DebugOverlay {
    pub fn from_scene(scene: &Scene) -> Self {
        let mut points = Vec::new();
        for s in &scene.screens {
            for (p, label) in s.corners().into_iter().zip(SCREEN_CORNER_LABELS) {
                points.push(DebugPoint {
                    owner: s.placement.id,
                    label: format!("{}:{label}", s.placement.id.as_str()),
                    position: p,
                });
            }
        }
        for (p, label) in scene.rig_base.corners().into_iter().zip(RIG_CORNER_LABELS) {
            points.push(DebugPoint {
                owner: EntityId::RigBase,
                label: format!("rig-base:{label}"),
                position: p,
            });
        }
        let bounds = Bounds::around(points.iter().map(|p| p.position));
        Self {
            enabled: true,
            points,
            bounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::calculate;
    use crate::config::Arrangement;
    use crate::scene::build_scene;
    use crate::test_utils::make_config;

    #[test]
    fn four_markers_per_screen_and_rig() {
        let cfg = make_config(|c| c.arrangement = Arrangement::Triple);
        let scene = build_scene(&cfg, &calculate(&cfg).unwrap()).unwrap();
        let overlay = DebugOverlay::from_scene(&scene);
        assert!(overlay.enabled);
        assert_eq!(overlay.points.len(), 16);
        let right = overlay
            .points
            .iter()
            .filter(|p| p.owner == EntityId::RightScreen)
            .count();
        assert_eq!(right, 4);
        assert_eq!(overlay.points[0].label, "center-screen:bl");
        assert_eq!(overlay.points[15].label, "rig-base:bl");
    }

    #[test]
    fn overlay_bounds_match_the_scene() {
        let cfg = make_config(|c| {
            c.bezel_mm = 7.0;
            c.curved = true;
            c.curve_radius_mm = Some(1800.0);
        });
        let scene = build_scene(&cfg, &calculate(&cfg).unwrap()).unwrap();
        assert_eq!(DebugOverlay::from_scene(&scene).bounds, scene.bounds);
    }
}
