use svg::node::element::{Group, Polygon};

use crate::context::DiagramContext;
use crate::layers::{Layer, group_with_class};
use crate::scene::LayerTag;

pub struct RigLayer;
impl RigLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Layer for RigLayer {
    fn render(&self, context: &DiagramContext) -> Group {
        let mut g = group_with_class(LayerTag::Rig.as_str());
        if !context.scene.rig_base.placement.visible {
            return g;
        }

        let points = context
            .render
            .rig_base
            .corners
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        g = g.add(
            Polygon::new()
                .set("id", "rig-base")
                .set("class", "rig-base")
                .set("points", points),
        );
        g
    }
}
