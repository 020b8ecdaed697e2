use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use serde::Serialize;

use crate::calc::CalculationResults;

/// One configuration's results flattened into a CSV record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub panel_width_mm: f64,
    pub panel_height_mm: f64,
    pub physical_width_mm: f64,
    pub physical_height_mm: f64,
    pub recommended_angle_deg: f64,
    pub actual_angle_deg: f64,
    pub horizontal_fov_deg: f64,
    pub vertical_fov_deg: f64,
    pub footprint_width_mm: f64,
    pub footprint_depth_mm: f64,
    pub chord_mm: Option<f64>,
    pub sagitta_mm: Option<f64>,
}

impl ReportRow {
    pub fn from_results(label: &str, results: &CalculationResults) -> Self {
        let dims = &results.dimensions;
        Self {
            label: label.to_string(),
            panel_width_mm: dims.panel.width,
            panel_height_mm: dims.panel.height,
            physical_width_mm: dims.physical.width,
            physical_height_mm: dims.physical.height,
            recommended_angle_deg: results.angles.recommended_side_angle,
            actual_angle_deg: results.angles.actual_side_angle,
            horizontal_fov_deg: results.fov.horizontal,
            vertical_fov_deg: results.fov.vertical,
            footprint_width_mm: results.footprint.total_width,
            footprint_depth_mm: results.footprint.depth,
            chord_mm: results.curvature.map(|c| c.chord_length),
            sagitta_mm: results.curvature.map(|c| c.sagitta),
        }
    }
}

/// Header plus one record per row. Missing curvature leaves its columns empty.
pub fn write_report<W: std::io::Write>(writer: W, rows: &[ReportRow]) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_report(path: &str, rows: &[ReportRow]) -> Result<()> {
    write_report(File::create(path)?, rows)
}
