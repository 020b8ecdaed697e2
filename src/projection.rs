use serde::Serialize;

use crate::scene::{EntityId, Scene};
use crate::types::{Point, Rect, Vec3};
use crate::viewport::Viewport;

/// Radius the eye is drawn with, pixels.
pub const VIEW_POINT_RADIUS_PX: f64 = 6.0;

/// Floor-plan view: drop height, `+y` points from the eye towards the
/// screens.
#[inline]
pub fn project_top_down(p: Vec3) -> Point {
    Point { x: p.x, y: -p.z }
}

/// Viewport coordinates to SVG pixels, which grow downwards.
#[inline]
pub fn to_pixels(p: Point) -> Point {
    Point { x: p.x, y: -p.y }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedScreen {
    pub id: EntityId,
    /// Same order as `Screen::corners`. From above, bottom and top corners
    /// coincide.
    pub corners: [Point; 4],
    /// Ends of the active panel, inside the bezels
    pub panel_edges: [Point; 2],
    pub center: Point,
    pub yaw_deg: f64,
    /// Scaled curve radius for drawing an arc, curved screens only
    pub arc_radius: Option<f64>,
}

impl ProjectedScreen {
    /// Left and right edge as the viewer sees them.
    pub fn edges(&self) -> (Point, Point) {
        (self.corners[0], self.corners[1])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedViewPoint {
    pub center: Point,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedRigBase {
    pub corners: [Point; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedRay {
    pub id: EntityId,
    pub start: Point,
    pub end: Point,
    pub angle_deg: f64,
}

/// Sizing for an SVG root element. The view box is centered on zero so
/// projected points can be used as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SvgProps {
    pub view_box: String,
    pub width: f64,
    pub height: f64,
}

/// Everything a renderer needs, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderData {
    pub screens: Vec<ProjectedScreen>,
    pub view_point: ProjectedViewPoint,
    pub rig_base: ProjectedRigBase,
    pub fov_rays: Vec<ProjectedRay>,
    pub svg_props: SvgProps,
}

/// Shorten the segment from `start` to `end` so it stops at the edge of
/// `rect`. `start` must lie inside.
pub fn clip_to(rect: &Rect, start: Point, end: Point) -> Point {
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let mut t: f64 = 1.0;
    if dx > 0.0 {
        t = t.min((rect.max.x - start.x) / dx);
    } else if dx < 0.0 {
        t = t.min((rect.min.x - start.x) / dx);
    }
    if dy > 0.0 {
        t = t.min((rect.max.y - start.y) / dy);
    } else if dy < 0.0 {
        t = t.min((rect.min.y - start.y) / dy);
    }
    let t = t.max(0.0);
    Point::new(start.x + dx * t, start.y + dy * t)
}

pub struct Projector<'a> {
    viewport: &'a Viewport,
}

impl<'a> Projector<'a> {
    pub fn new(viewport: &'a Viewport) -> Self {
        Self { viewport }
    }

    pub fn point(&self, p: Vec3) -> Point {
        self.plan_point(project_top_down(p))
    }

    fn plan_point(&self, p: Point) -> Point {
        to_pixels(self.viewport.world_to_screen(p))
    }

    pub fn length(&self, mm: f64) -> f64 {
        mm * self.viewport.scale
    }

    fn corners(&self, corners: [Vec3; 4]) -> [Point; 4] {
        corners.map(|c| self.point(c))
    }

    pub fn project(&self, scene: &Scene) -> RenderData {
        let screens = scene
            .screens
            .iter()
            .filter(|s| s.placement.visible)
            .map(|s| ProjectedScreen {
                id: s.placement.id,
                corners: self.corners(s.corners()),
                panel_edges: s.panel_edges().map(|p| self.point(p)),
                center: self.point(s.placement.position),
                yaw_deg: s.placement.yaw_deg,
                arc_radius: s.curve_radius().map(|r| self.length(r)),
            })
            .collect();

        // Rays are cut off where they leave the drawing
        let visible = self.viewport.visible_world_rect();
        let fov_rays = scene
            .fov_rays
            .iter()
            .filter(|r| r.placement.visible)
            .map(|r| {
                let start = project_top_down(r.origin());
                let end = clip_to(&visible, start, project_top_down(r.end()));
                ProjectedRay {
                    id: r.placement.id,
                    start: self.plan_point(start),
                    end: self.plan_point(end),
                    angle_deg: r.angle_deg,
                }
            })
            .collect();

        let (w, h) = (self.viewport.width, self.viewport.height);
        RenderData {
            screens,
            view_point: ProjectedViewPoint {
                center: self.point(scene.view_point.placement.position),
                radius: VIEW_POINT_RADIUS_PX,
            },
            rig_base: ProjectedRigBase {
                corners: self.corners(scene.rig_base.corners()),
            },
            fov_rays,
            svg_props: SvgProps {
                view_box: format!("{} {} {} {}", -w / 2.0, -h / 2.0, w, h),
                width: w,
                height: h,
            },
        }
    }
}

/// Project a scene through a viewport.
pub fn project_scene(scene: &Scene, viewport: &Viewport) -> RenderData {
    Projector::new(viewport).project(scene)
}
