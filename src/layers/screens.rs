use svg::node::element::path::Data;
use svg::node::element::{Group, Line, Path};

use crate::context::DiagramContext;
use crate::layers::{Layer, group_with_class};
use crate::projection::ProjectedScreen;
use crate::scene::LayerTag;

pub struct ScreensLayer;
impl ScreensLayer {
    pub fn new() -> Self {
        Self
    }

    fn flat(screen: &ProjectedScreen) -> Line {
        let (l, r) = screen.edges();
        Line::new()
            .set("id", screen.id.as_str())
            .set("class", "screen flat")
            .set("x1", l.x)
            .set("y1", l.y)
            .set("x2", r.x)
            .set("y2", r.y)
    }

    // Bezel, panel arc bowing away from the eye, bezel. The subtended angle
    // is always under 180° so the small arc is the right one.
    fn curved(screen: &ProjectedScreen, radius: f64) -> Path {
        let (outer_l, outer_r) = screen.edges();
        let [l, r] = screen.panel_edges;
        let d = Data::new()
            .move_to((outer_l.x, outer_l.y))
            .line_to((l.x, l.y))
            .elliptical_arc_to((radius, radius, 0.0, 0.0, 1.0, r.x, r.y))
            .line_to((outer_r.x, outer_r.y));
        Path::new()
            .set("id", screen.id.as_str())
            .set("class", "screen curved")
            .set("fill", "none")
            .set("d", d)
    }
}

impl Layer for ScreensLayer {
    fn render(&self, context: &DiagramContext) -> Group {
        let mut g = group_with_class(LayerTag::Screens.as_str());
        for screen in &context.render.screens {
            g = match screen.arc_radius {
                Some(radius) => g.add(Self::curved(screen, radius)),
                None => g.add(Self::flat(screen)),
            };
        }
        g
    }
}
