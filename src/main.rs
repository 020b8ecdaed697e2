mod calc;
mod config;
mod context;
mod diagram;
mod error;
mod layers;
mod projection;
mod report;
mod scene;
mod snapshot;
mod types;
mod units;
mod viewport;

use crate::calc::CalculationResults;
use crate::config::{
    AngleMode, Arrangement, Configuration, InputMode, RenderConfig, parse_aspect_ratio,
};
use crate::diagram::{Comparison, Diagram};
use crate::report::{ReportRow, save_report};
use crate::snapshot::ConfigSnapshot;
use crate::types::AspectRatio;
use crate::units::{LengthUnit, mm_to_inches};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "rigplan")]
#[command(about = "Side angles, field of view and top-down diagrams for monitor rigs", version)]
struct Args {
    /// Screen diagonal in inches
    #[arg(long)]
    diagonal: Option<f64>,

    /// Aspect ratio, one of 16:9, 16:10, 21:9, 32:9, 4:3, 5:4
    #[arg(long)]
    aspect: Option<String>,

    /// Physical screen width including bezels; switches to manual dimensions
    #[arg(long, requires = "screen_height")]
    screen_width: Option<f64>,

    /// Physical screen height including bezels
    #[arg(long, requires = "screen_width")]
    screen_height: Option<f64>,

    /// Bezel width on each side
    #[arg(long)]
    bezel: Option<f64>,

    /// Eye to the center screen
    #[arg(long)]
    distance: Option<f64>,

    /// Either diagonal or manual; implied by --diagonal and --screen-width
    #[arg(long)]
    input_mode: Option<String>,

    /// Either single or triple
    #[arg(long)]
    arrangement: Option<String>,

    /// Either auto or manual; implied by --angle
    #[arg(long)]
    angle_mode: Option<String>,

    /// Fixed side-screen angle in degrees; the recommended angle is used if omitted
    #[arg(long)]
    angle: Option<f64>,

    /// Curve radius of a curved panel (e.g. 1000 for a 1000R screen)
    #[arg(long)]
    curve_radius: Option<f64>,

    /// Unit for lengths given on the command line: mm, cm or in
    #[arg(long, default_value = "mm")]
    units: String,

    /// Start from a saved configuration; other flags override its values
    #[arg(long)]
    config: Option<String>,

    /// Save the resulting configuration to this path
    #[arg(long)]
    save_config: Option<String>,

    /// Draw side by side with another saved configuration
    #[arg(long)]
    compare: Option<String>,

    /// Write the calculated values as CSV
    #[arg(long)]
    report: Option<String>,

    /// Mark entity corners and the scene bounds
    #[arg(long)]
    debug: bool,

    /// Output SVG path; a .svgz extension writes it gzip-compressed
    #[arg(short = 'o', long = "out")]
    out: String,

    /// Optional CSS override file path; if omitted embedded CSS is used
    #[arg(long)]
    css: Option<String>,

    /// Output image width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Output image height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,
}

fn parse_units(s: &str) -> Result<LengthUnit> {
    LengthUnit::from_str(&s.to_lowercase())
        .ok_or_else(|| anyhow!("invalid units '{s}'. Use: mm | cm | in"))
}

fn parse_arrangement(s: &str) -> Result<Arrangement> {
    Arrangement::from_str(&s.to_lowercase())
        .ok_or_else(|| anyhow!("invalid arrangement '{s}'. Use: single | triple"))
}

fn parse_input_mode(s: &str) -> Result<InputMode> {
    InputMode::from_str(&s.to_lowercase())
        .ok_or_else(|| anyhow!("invalid input mode '{s}'. Use: diagonal | manual"))
}

fn parse_angle_mode(s: &str) -> Result<AngleMode> {
    AngleMode::from_str(&s.to_lowercase())
        .ok_or_else(|| anyhow!("invalid angle mode '{s}'. Use: auto | manual"))
}

fn load_config(path: &str) -> Result<Configuration> {
    let snapshot =
        ConfigSnapshot::load(path).with_context(|| format!("loading configuration {path}"))?;
    Ok(snapshot.config)
}

/// Layer the command-line flags over `cfg`, converting lengths to millimetres.
fn apply_args(mut cfg: Configuration, args: &Args) -> Result<Configuration> {
    let unit = parse_units(&args.units)?;

    if let Some(diagonal) = args.diagonal {
        cfg.input_mode = InputMode::Diagonal;
        cfg.diagonal_in = diagonal;
    }
    if let Some(token) = &args.aspect {
        cfg.aspect_ratio = parse_aspect_ratio(token)
            .with_context(|| format!("supported ratios: {}", AspectRatio::supported().join(", ")))?;
    }
    if let (Some(w), Some(h)) = (args.screen_width, args.screen_height) {
        cfg.input_mode = InputMode::Manual;
        cfg.width_mm = Some(unit.to_mm(w));
        cfg.height_mm = Some(unit.to_mm(h));
    }
    if let Some(bezel) = args.bezel {
        cfg.bezel_mm = unit.to_mm(bezel);
    }
    if let Some(distance) = args.distance {
        cfg.distance_mm = unit.to_mm(distance);
    }
    if let Some(mode) = &args.input_mode {
        cfg.input_mode = parse_input_mode(mode)?;
    }
    if let Some(arrangement) = &args.arrangement {
        cfg.arrangement = parse_arrangement(arrangement)?;
    }
    if let Some(angle) = args.angle {
        cfg.angle_mode = AngleMode::Manual;
        cfg.manual_angle_deg = angle;
    }
    if let Some(mode) = &args.angle_mode {
        cfg.angle_mode = parse_angle_mode(mode)?;
    }
    if let Some(radius) = args.curve_radius {
        cfg.curved = true;
        cfg.curve_radius_mm = Some(unit.to_mm(radius));
    }
    Ok(cfg)
}

fn summary(label: &str, cfg: &Configuration, r: &CalculationResults) -> Vec<String> {
    let mut lines = vec![
        format!("{label}:"),
        format!(
            "  panel     {:.1}\" {:.1} x {:.1} mm ({:.1} x {:.1} mm with bezels)",
            mm_to_inches(r.dimensions.panel.diagonal),
            r.dimensions.panel.width,
            r.dimensions.panel.height,
            r.dimensions.physical.width,
            r.dimensions.physical.height
        ),
        format!(
            "  fov       {:.1}° horizontal, {:.1}° vertical",
            r.fov.horizontal, r.fov.vertical
        ),
        format!(
            "  footprint {:.0} mm wide, {:.0} mm deep",
            r.footprint.total_width, r.footprint.depth
        ),
    ];
    if cfg.arrangement.is_triple() {
        lines.push(format!(
            "  angle     {:.1}° (recommended {:.1}°)",
            r.angles.actual_side_angle, r.angles.recommended_side_angle
        ));
    }
    if let Some(c) = &r.curvature {
        lines.push(format!(
            "  curve     R{:.0}, chord {:.1} mm, depth {:.1} mm",
            c.radius, c.chord_length, c.sagitta
        ));
    }
    lines
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => Configuration::default(),
    };
    let cfg = apply_args(base, &args)?;

    if let Some(path) = &args.save_config {
        ConfigSnapshot::new(cfg.clone())
            .save(path)
            .with_context(|| format!("saving configuration {path}"))?;
    }

    let render_cfg = RenderConfig {
        width: args.width,
        height: args.height,
        css_path: args.css.clone(),
        debug: args.debug,
        ..RenderConfig::default()
    };

    let mut rows = Vec::new();
    match &args.compare {
        Some(other_path) => {
            let other = load_config(other_path)?;
            let comparison = Comparison::new(cfg, other, &render_cfg)
                .context("calculating the compared setups")?;
            comparison
                .to_file(&args.out)
                .with_context(|| format!("writing {}", args.out))?;
            let sides = [
                ("setup", &comparison.left),
                (other_path.as_str(), &comparison.right),
            ];
            for (label, ctx) in sides {
                println!("{}", summary(label, &ctx.cfg, &ctx.results).join("\n"));
                rows.push(ReportRow::from_results(label, &ctx.results));
            }
        }
        None => {
            let diagram = Diagram::new(cfg, &render_cfg).context("calculating the setup")?;
            diagram
                .to_file(&args.out)
                .with_context(|| format!("writing {}", args.out))?;
            let ctx = &diagram.context;
            println!("{}", summary("setup", &ctx.cfg, &ctx.results).join("\n"));
            rows.push(ReportRow::from_results("setup", &ctx.results));
        }
    }
    info!("wrote {}", args.out);

    if let Some(path) = &args.report {
        save_report(path, &rows).with_context(|| format!("writing report {path}"))?;
        info!("wrote {path}");
    }

    Ok(())
}

#[cfg(test)]
mod test_utils;
