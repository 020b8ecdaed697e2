use svg::node::element::{Group, Line, Rectangle};

use crate::context::DiagramContext;
use crate::layers::{Layer, group_with_class, text};
use crate::scene::EntityId;

pub struct DebugLayer {
    marker_size: f64,
}
impl DebugLayer {
    pub fn new() -> Self {
        Self { marker_size: 6.0 }
    }
}

impl Layer for DebugLayer {
    fn render(&self, context: &DiagramContext) -> Group {
        let mut g = group_with_class("debug");
        let Some(overlay) = &context.debug else {
            return g;
        };
        let projector = context.projector();
        let half = self.marker_size / 2.0;

        for point in &overlay.points {
            let p = projector.point(point.position);
            g = g
                .add(
                    Line::new()
                        .set("class", "debug-marker")
                        .set("x1", p.x - half)
                        .set("y1", p.y - half)
                        .set("x2", p.x + half)
                        .set("y2", p.y + half),
                )
                .add(
                    Line::new()
                        .set("class", "debug-marker")
                        .set("x1", p.x - half)
                        .set("y1", p.y + half)
                        .set("x2", p.x + half)
                        .set("y2", p.y - half),
                );
            // Bottom and top corners coincide from above; label each spot once
            if point.label.ends_with(":bl")
                || point.label.ends_with(":br")
                || point.owner == EntityId::RigBase
            {
                g = g.add(text("debug-label", p.x + half, p.y - half, "start", &point.label));
            }
        }

        let a = projector.point(overlay.bounds.min);
        let b = projector.point(overlay.bounds.max);
        g = g.add(
            Rectangle::new()
                .set("class", "debug-bounds")
                .set("fill", "none")
                .set("x", a.x.min(b.x))
                .set("y", a.y.min(b.y))
                .set("width", (b.x - a.x).abs())
                .set("height", (b.y - a.y).abs()),
        );
        g
    }
}
