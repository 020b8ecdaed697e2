use serde::Serialize;

use crate::config::{Configuration, InputMode};
use crate::types::AspectRatio;
use crate::units::inches_to_mm;

/// Width, height and diagonal of a rectangle, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
    pub diagonal: f64,
}

impl Extent {
    fn from_sides(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            diagonal: width.hypot(height),
        }
    }

    fn from_diagonal(diagonal: f64, ratio: &AspectRatio) -> Self {
        let (uw, uh) = ratio.unit();
        Self {
            width: diagonal * uw,
            height: diagonal * uh,
            diagonal,
        }
    }
}

/// `panel` is the active display area, `physical` includes the bezel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub panel: Extent,
    pub physical: Extent,
}

/// Split a diagonal along the aspect ratio. The physical extent grows the
/// diagonal by two bezels and splits it the same way, so both rectangles keep
/// the same ratio.
pub fn from_diagonal(diagonal_mm: f64, ratio: &AspectRatio, bezel_mm: f64) -> Dimensions {
    Dimensions {
        panel: Extent::from_diagonal(diagonal_mm, ratio),
        physical: Extent::from_diagonal(diagonal_mm + 2.0 * bezel_mm, ratio),
    }
}

/// Measured outer size; the panel is what's left inside the bezel.
pub fn from_physical(width_mm: f64, height_mm: f64, bezel_mm: f64) -> Dimensions {
    Dimensions {
        panel: Extent::from_sides(width_mm - 2.0 * bezel_mm, height_mm - 2.0 * bezel_mm),
        physical: Extent::from_sides(width_mm, height_mm),
    }
}

/// Expects a validated configuration.
pub fn calculate_dimensions(cfg: &Configuration) -> Dimensions {
    match cfg.input_mode {
        InputMode::Diagonal => from_diagonal(
            inches_to_mm(cfg.diagonal_in),
            &cfg.aspect_ratio,
            cfg.bezel_mm,
        ),
        InputMode::Manual => from_physical(
            cfg.width_mm.unwrap_or_default(),
            cfg.height_mm.unwrap_or_default(),
            cfg.bezel_mm,
        ),
    }
}
