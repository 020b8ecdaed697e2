use log::debug;
use serde::Serialize;

use crate::config::Configuration;
use crate::error::{GeometryError, LayoutError, RigError, ensure_finite};

pub mod angles;
pub mod curvature;
pub mod dimensions;
pub mod footprint;
pub mod fov;

pub use angles::{Angles, EffectiveGeometry, SidePanel, SidePanels, calculate_angles};
pub use curvature::{Curvature, curved_geometry};
pub use dimensions::{Dimensions, calculate_dimensions};
pub use footprint::{Footprint, calculate_footprint};
pub use fov::{Fov, calculate_fov};

/// Everything derived from one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResults {
    pub dimensions: Dimensions,
    pub angles: Angles,
    pub fov: Fov,
    pub footprint: Footprint,
    pub curvature: Option<Curvature>,
    pub geometry: EffectiveGeometry,
    /// Present for triple arrangements only
    pub sides: Option<SidePanels>,
}

/// Run the whole calculation pipeline. Pure: the same configuration always
/// yields the same results.
pub fn calculate(cfg: &Configuration) -> Result<CalculationResults, RigError> {
    cfg.validate()?;

    let dimensions = calculate_dimensions(cfg);
    debug!(
        "panel {:.1}x{:.1} mm, physical {:.1}x{:.1} mm",
        dimensions.panel.width,
        dimensions.panel.height,
        dimensions.physical.width,
        dimensions.physical.height
    );

    let curvature = cfg
        .curve_radius()
        .map(|radius| curved_geometry(dimensions.panel.width, radius))
        .transpose()?;
    if let Some(c) = &curvature {
        if c.sagitta >= cfg.distance_mm {
            return Err(GeometryError::SagittaExceedsDistance {
                sagitta: c.sagitta,
                distance: cfg.distance_mm,
            }
            .into());
        }
        debug!(
            "curve R{:.0}: chord {:.1} mm, sagitta {:.1} mm",
            c.radius, c.chord_length, c.sagitta
        );
    }

    let geometry = EffectiveGeometry::new(
        &dimensions,
        cfg.bezel_mm,
        cfg.distance_mm,
        curvature.as_ref(),
    );
    let angles = calculate_angles(cfg, &geometry);
    let sides = cfg
        .arrangement
        .is_triple()
        .then(|| SidePanels::new(&geometry, angles.actual_side_angle));

    let fov = calculate_fov(
        &geometry,
        sides.as_ref(),
        dimensions.panel.height,
        cfg.distance_mm,
    );
    let footprint = calculate_footprint(
        &geometry,
        sides.as_ref(),
        curvature.as_ref(),
        angles.actual_side_angle,
    );
    debug!(
        "fov {:.1}° x {:.1}°, footprint {:.0} mm",
        fov.horizontal, fov.vertical, footprint.total_width
    );

    let results = CalculationResults {
        dimensions,
        angles,
        fov,
        footprint,
        curvature,
        geometry,
        sides,
    };
    results.ensure_finite()?;
    Ok(results)
}

impl CalculationResults {
    /// Overflowing inputs surface here rather than as NaN further down.
    fn ensure_finite(&self) -> Result<(), LayoutError> {
        let d = &self.dimensions;
        for (what, value) in [
            ("panel width", d.panel.width),
            ("panel height", d.panel.height),
            ("physical width", d.physical.width),
            ("physical height", d.physical.height),
            ("physical diagonal", d.physical.diagonal),
            ("recommended side angle", self.angles.recommended_side_angle),
            ("actual side angle", self.angles.actual_side_angle),
            ("horizontal fov", self.fov.horizontal),
            ("vertical fov", self.fov.vertical),
            ("footprint width", self.footprint.total_width),
            ("footprint depth", self.footprint.depth),
        ] {
            ensure_finite(what, value)?;
        }
        Ok(())
    }
}
