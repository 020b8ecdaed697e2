use serde::Serialize;

use crate::calc::{Curvature, Fov};
use crate::types::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityId {
    CenterScreen,
    LeftScreen,
    RightScreen,
    ViewPoint,
    RigBase,
    FovRayLeft,
    FovRayRight,
}

impl EntityId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CenterScreen => "center-screen",
            Self::LeftScreen => "left-screen",
            Self::RightScreen => "right-screen",
            Self::ViewPoint => "view-point",
            Self::RigBase => "rig-base",
            Self::FovRayLeft => "fov-ray-left",
            Self::FovRayRight => "fov-ray-right",
        }
    }
}

/// Drawing layer an entity belongs to, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerTag {
    Rig,
    Fov,
    Screens,
    ViewPoint,
}

impl LayerTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rig => "rig",
            Self::Fov => "fov",
            Self::Screens => "screens",
            Self::ViewPoint => "view-point",
        }
    }
}

/// Identity and pose shared by every scene entity. Rotation is yaw only:
/// a positive yaw turns the entity's local `+x` from world `+x` towards
/// world `+z` (towards the viewer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub id: EntityId,
    pub position: Vec3,
    pub yaw_deg: f64,
    pub visible: bool,
    pub layer: LayerTag,
}

impl Placement {
    pub fn new(id: EntityId, position: Vec3, yaw_deg: f64, layer: LayerTag) -> Self {
        Self {
            id,
            position,
            yaw_deg,
            visible: true,
            layer,
        }
    }

    /// Map a local offset (`x` across, `y` up, `z` towards the viewer) into
    /// world space.
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        let (sin, cos) = self.yaw_deg.to_radians().sin_cos();
        Vec3 {
            x: self.position.x + local.x * cos - local.z * sin,
            y: self.position.y + local.y,
            z: self.position.z + local.x * sin + local.z * cos,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub placement: Placement,
    /// Panel width along the surface (the arc length when curved)
    pub width: f64,
    pub height: f64,
    pub bezel: f64,
    pub curvature: Option<Curvature>,
}

impl Screen {
    pub fn curve_radius(&self) -> Option<f64> {
        self.curvature.map(|c| c.radius)
    }

    fn half_chord(&self) -> f64 {
        self.curvature.map_or(self.width, |c| c.chord_length) / 2.0
    }

    /// Half the edge-to-edge width including bezels.
    pub fn half_extent(&self) -> f64 {
        self.half_chord() + self.bezel
    }

    /// How far the panel's edges sit in front of its position. The position
    /// is the middle of the panel surface, so this is the sagitta when
    /// curved.
    pub fn edge_setback(&self) -> f64 {
        self.curvature.map_or(0.0, |c| c.sagitta)
    }

    /// Left and right edge of the active panel at eye height, bezels
    /// excluded.
    pub fn panel_edges(&self) -> [Vec3; 2] {
        let hx = self.half_chord();
        let z = self.edge_setback();
        [
            self.placement.to_world(Vec3::new(-hx, 0.0, z)),
            self.placement.to_world(Vec3::new(hx, 0.0, z)),
        ]
    }

    /// Outer corners in world space: bottom-left, bottom-right, top-right,
    /// top-left as seen by the viewer.
    pub fn corners(&self) -> [Vec3; 4] {
        let hx = self.half_extent();
        let hy = self.height / 2.0 + self.bezel;
        let z = self.edge_setback();
        [
            self.placement.to_world(Vec3::new(-hx, -hy, z)),
            self.placement.to_world(Vec3::new(hx, -hy, z)),
            self.placement.to_world(Vec3::new(hx, hy, z)),
            self.placement.to_world(Vec3::new(-hx, hy, z)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPoint {
    pub placement: Placement,
    pub eye_height: f64,
    pub fov: Fov,
}

/// Desk or cockpit outline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RigBase {
    pub placement: Placement,
    pub width: f64,
    pub depth: f64,
}

impl RigBase {
    /// Axis-aligned floor corners: front-left, front-right, back-right,
    /// back-left.
    pub fn corners(&self) -> [Vec3; 4] {
        let p = self.placement.position;
        let hw = self.width / 2.0;
        let hd = self.depth / 2.0;
        [
            Vec3::new(p.x - hw, p.y, p.z - hd),
            Vec3::new(p.x + hw, p.y, p.z - hd),
            Vec3::new(p.x + hw, p.y, p.z + hd),
            Vec3::new(p.x - hw, p.y, p.z + hd),
        ]
    }
}

/// One edge of the horizontal field of view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FovRay {
    pub placement: Placement,
    /// Unit vector
    pub direction: Vec3,
    pub length: f64,
    /// Signed angle from straight ahead, positive to the right
    pub angle_deg: f64,
}

impl FovRay {
    pub fn origin(&self) -> Vec3 {
        self.placement.position
    }

    pub fn end(&self) -> Vec3 {
        let o = self.origin();
        Vec3 {
            x: o.x + self.direction.x * self.length,
            y: o.y + self.direction.y * self.length,
            z: o.z + self.direction.z * self.length,
        }
    }
}
