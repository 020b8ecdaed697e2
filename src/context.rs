use crate::calc::{CalculationResults, calculate};
use crate::config::{Configuration, RenderConfig};
use crate::error::RigError;
use crate::projection::{Projector, RenderData, project_scene};
use crate::scene::{DebugOverlay, Scene, build_scene};
use crate::types::Size;
use crate::viewport::{FitOptions, Viewport};

/// One configuration carried all the way to pixels, shared by every layer.
pub struct DiagramContext {
    pub cfg: Configuration,
    pub results: CalculationResults,
    pub scene: Scene,
    pub viewport: Viewport,
    pub render: RenderData,
    pub debug: Option<DebugOverlay>,
}

impl DiagramContext {
    pub fn new(cfg: Configuration, render_cfg: &RenderConfig) -> Result<Self, RigError> {
        let opts = FitOptions {
            margin: render_cfg.margin,
            ..FitOptions::default()
        };
        Self::with_fit(cfg, render_cfg, &opts)
    }

    /// Like `new`, with explicit fit options (shared scales for comparisons).
    pub fn with_fit(
        cfg: Configuration,
        render_cfg: &RenderConfig,
        opts: &FitOptions,
    ) -> Result<Self, RigError> {
        let results = calculate(&cfg)?;
        let scene = build_scene(&cfg, &results)?;
        let viewport = Viewport::fit(
            &scene.bounds.plan_rect(),
            container(render_cfg),
            opts,
        )?;
        Ok(Self::assemble(cfg, results, scene, viewport, render_cfg.debug))
    }

    pub fn assemble(
        cfg: Configuration,
        results: CalculationResults,
        scene: Scene,
        viewport: Viewport,
        debug: bool,
    ) -> Self {
        let render = project_scene(&scene, &viewport);
        let debug = debug.then(|| DebugOverlay::from_scene(&scene));
        Self {
            cfg,
            results,
            scene,
            viewport,
            render,
            debug,
        }
    }

    pub fn projector(&self) -> Projector<'_> {
        Projector::new(&self.viewport)
    }
}

pub fn container(render_cfg: &RenderConfig) -> Size {
    Size::new(render_cfg.width as f64, render_cfg.height as f64)
}
