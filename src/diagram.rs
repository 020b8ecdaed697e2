use flate2::Compression;
use flate2::write::GzEncoder;
use log::warn;
use std::fs::{self, File};
use std::io;
use svg::Document;
use svg::node::element::{Group, Line, Style};

use crate::calc::calculate;
use crate::config::{Configuration, RenderConfig};
use crate::context::{DiagramContext, container};
use crate::error::RigError;
use crate::layers::default_layers;
use crate::scene::build_scene;
use crate::types::Size;
use crate::viewport::Viewport;

// Load the default css for embedding
const DEFAULT_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/styles/diagram.css"));

fn load_css_text(css_path: Option<&str>) -> String {
    if let Some(path) = css_path {
        match fs::read_to_string(path) {
            Ok(text) => return text,
            Err(e) => warn!("could not read css {path}: {e}; using the built-in style"),
        }
    }
    // Embedded fallback
    DEFAULT_CSS.to_owned()
}

fn draw_layers(context: &DiagramContext) -> Group {
    let mut g = Group::new();
    for layer in default_layers() {
        g = g.add(layer.render(context));
    }
    g
}

fn new_document(width: f64, height: f64, css_path: Option<&str>) -> Document {
    let mut doc = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("width", width)
        .set("height", height)
        .set(
            "viewBox",
            format!("{} {} {} {}", -width / 2.0, -height / 2.0, width, height),
        )
        .set("class", "diagram");

    let css = load_css_text(css_path);
    if !css.is_empty() {
        doc = doc.add(Style::new(css));
    }
    doc
}

/// Write `.svg`, or gzip-compressed `.svgz` when the path asks for it.
pub fn save_document(path: &str, doc: &Document) -> io::Result<()> {
    if path.ends_with(".svgz") {
        let mut encoder = GzEncoder::new(File::create(path)?, Compression::default());
        svg::write(&mut encoder, doc)?;
        encoder.finish()?;
        Ok(())
    } else {
        svg::save(path, doc)
    }
}

/// Top-down drawing of one monitor setup.
pub struct Diagram {
    pub context: DiagramContext,
    css_path: Option<String>,
}

impl Diagram {
    pub fn new(cfg: Configuration, render_cfg: &RenderConfig) -> Result<Self, RigError> {
        Ok(Self {
            context: DiagramContext::new(cfg, render_cfg)?,
            css_path: render_cfg.css_path.clone(),
        })
    }

    pub fn draw_document(&self) -> Document {
        let props = &self.context.render.svg_props;
        new_document(props.width, props.height, self.css_path.as_deref())
            .add(draw_layers(&self.context))
    }

    pub fn to_file(&self, path: &str) -> io::Result<()> {
        save_document(path, &self.draw_document())
    }
}

/// Two setups side by side at the same scale, so sizes compare directly.
pub struct Comparison {
    pub left: DiagramContext,
    pub right: DiagramContext,
    width: f64,
    height: f64,
    css_path: Option<String>,
}

impl Comparison {
    pub fn new(
        left: Configuration,
        right: Configuration,
        render_cfg: &RenderConfig,
    ) -> Result<Self, RigError> {
        let full = container(render_cfg);
        let half = Size::new(full.width / 2.0, full.height);

        let left_results = calculate(&left)?;
        let right_results = calculate(&right)?;
        let left_scene = build_scene(&left, &left_results)?;
        let right_scene = build_scene(&right, &right_results)?;

        let bounds = [left_scene.bounds.plan_rect(), right_scene.bounds.plan_rect()];
        // One viewport per bounds, in order
        let views = Viewport::fit_shared(&bounds, half, render_cfg.margin)?;
        let (left_view, right_view) = (views[0], views[1]);

        Ok(Self {
            left: DiagramContext::assemble(
                left,
                left_results,
                left_scene,
                left_view,
                render_cfg.debug,
            ),
            right: DiagramContext::assemble(
                right,
                right_results,
                right_scene,
                right_view,
                render_cfg.debug,
            ),
            width: full.width,
            height: full.height,
            css_path: render_cfg.css_path.clone(),
        })
    }

    pub fn draw_document(&self) -> Document {
        let quarter = self.width / 4.0;
        let half_height = self.height / 2.0;
        new_document(self.width, self.height, self.css_path.as_deref())
            .add(
                draw_layers(&self.left)
                    .set("class", "comparison-left")
                    .set("transform", format!("translate({},0)", -quarter)),
            )
            .add(
                draw_layers(&self.right)
                    .set("class", "comparison-right")
                    .set("transform", format!("translate({},0)", quarter)),
            )
            .add(
                Line::new()
                    .set("class", "comparison-divider")
                    .set("x1", 0)
                    .set("y1", -half_height)
                    .set("x2", 0)
                    .set("y2", half_height),
            )
    }

    pub fn to_file(&self, path: &str) -> io::Result<()> {
        save_document(path, &self.draw_document())
    }
}
