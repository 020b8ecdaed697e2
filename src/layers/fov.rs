use svg::node::element::path::Data;
use svg::node::element::{Group, Line, Path};

use crate::context::DiagramContext;
use crate::layers::{Layer, group_with_class};
use crate::scene::LayerTag;
use crate::types::Point;

pub struct FovLayer {
    arc_radius_px: f64,
}
impl FovLayer {
    pub fn new() -> Self {
        Self { arc_radius_px: 28.0 }
    }

    // Past 180° the marker has to take the long way round
    fn large_arc_flag(horizontal_fov: f64) -> f64 {
        if horizontal_fov > 180.0 { 1.0 } else { 0.0 }
    }
}

impl Layer for FovLayer {
    fn render(&self, context: &DiagramContext) -> Group {
        let mut g = group_with_class(LayerTag::Fov.as_str());
        let rays = &context.render.fov_rays;

        for ray in rays {
            g = g.add(
                Line::new()
                    .set("class", "fov-ray")
                    .set("id", ray.id.as_str())
                    .set("x1", ray.start.x)
                    .set("y1", ray.start.y)
                    .set("x2", ray.end.x)
                    .set("y2", ray.end.y),
            );
        }

        // Angle marker between the two rays, drawn clockwise from the left ray
        if let [left, right] = rays.as_slice() {
            let r = self.arc_radius_px;
            let point_on = |end: Point| {
                let (dx, dy) = (end.x - left.start.x, end.y - left.start.y);
                let len = dx.hypot(dy);
                (left.start.x + dx / len * r, left.start.y + dy / len * r)
            };
            let from = point_on(left.end);
            let to = point_on(right.end);
            let large_arc = Self::large_arc_flag(context.results.fov.horizontal);
            let d = Data::new()
                .move_to(from)
                .elliptical_arc_to((r, r, 0.0, large_arc, 1.0, to.0, to.1));
            g = g.add(
                Path::new()
                    .set("class", "fov-arc")
                    .set("fill", "none")
                    .set("d", d),
            );
        }

        g
    }
}
