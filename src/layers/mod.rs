use svg::node::element::{Group, Text as TextEl};

use crate::context::DiagramContext;

pub trait Layer {
    /// Produce an SVG group for this layer.
    fn render(&self, context: &DiagramContext) -> Group;
}

pub fn group_with_class(class: &str) -> Group {
    let mut g = Group::new();
    g = g.set("class", class);
    g
}

pub fn text(class: &str, x: f64, y: f64, anchor: &str, content: &str) -> TextEl {
    TextEl::new(content)
        .set("class", class)
        .set("x", x)
        .set("y", y)
        .set("text-anchor", anchor)
}

pub mod debug;
pub mod fov;
pub mod labels;
pub mod rig;
pub mod screens;
pub mod viewpoint;

pub use debug::DebugLayer;
pub use fov::FovLayer;
pub use labels::LabelsLayer;
pub use rig::RigLayer;
pub use screens::ScreensLayer;
pub use viewpoint::ViewPointLayer;

/// Layer stack, back to front.
pub fn default_layers() -> Vec<Box<dyn Layer>> {
    vec![
        Box::new(RigLayer::new()),
        Box::new(FovLayer::new()),
        Box::new(ScreensLayer::new()),
        Box::new(ViewPointLayer::new()),
        Box::new(LabelsLayer::new()),
        Box::new(DebugLayer::new()),
    ]
}
