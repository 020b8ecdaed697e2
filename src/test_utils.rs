use crate::config::{Configuration, RenderConfig};
use crate::context::DiagramContext;

// Check that the error between a and b is close enough
pub fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

pub fn make_config(patch: impl FnOnce(&mut Configuration)) -> Configuration {
    let mut cfg = Configuration::default();
    patch(&mut cfg);
    cfg
}

pub fn make_context(patch: impl FnOnce(&mut Configuration), debug: bool) -> DiagramContext {
    let render_cfg = RenderConfig {
        debug,
        ..RenderConfig::default()
    };
    DiagramContext::new(make_config(patch), &render_cfg).unwrap()
}
