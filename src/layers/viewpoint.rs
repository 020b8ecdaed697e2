use svg::node::element::{Circle, Group};

use crate::context::DiagramContext;
use crate::layers::{Layer, group_with_class};
use crate::scene::LayerTag;

pub struct ViewPointLayer;
impl ViewPointLayer {
    pub fn new() -> Self {
        Self
    }
}

impl Layer for ViewPointLayer {
    fn render(&self, context: &DiagramContext) -> Group {
        let mut g = group_with_class(LayerTag::ViewPoint.as_str());
        let vp = &context.render.view_point;
        g = g.add(
            Circle::new()
                .set("id", "view-point")
                .set("cx", vp.center.x)
                .set("cy", vp.center.y)
                .set("r", vp.radius),
        );
        g
    }
}
