use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::AspectRatio;
use crate::units::inches_to_mm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    #[default]
    Diagonal,
    Manual,
}

impl InputMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "diagonal" => Some(Self::Diagonal),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    #[default]
    Single,
    Triple,
}

impl Arrangement {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "single" => Some(Self::Single),
            "triple" => Some(Self::Triple),
            _ => None,
        }
    }

    pub fn is_triple(self) -> bool {
        matches!(self, Self::Triple)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    #[default]
    Auto,
    Manual,
}

impl AngleMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(Self::Auto),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// One monitor setup to evaluate. Lengths are millimetres except the
/// diagonal, which is entered in inches as monitors are sold that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub input_mode: InputMode,
    pub diagonal_in: f64,
    pub aspect_ratio: AspectRatio,
    /// Physical (bezel-inclusive) width, manual input mode only
    pub width_mm: Option<f64>,
    /// Physical (bezel-inclusive) height, manual input mode only
    pub height_mm: Option<f64>,
    pub bezel_mm: f64,
    /// Eye to the center of the middle screen
    pub distance_mm: f64,
    pub arrangement: Arrangement,
    pub angle_mode: AngleMode,
    pub manual_angle_deg: f64,
    pub curved: bool,
    pub curve_radius_mm: Option<f64>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            input_mode: InputMode::Diagonal,
            diagonal_in: 27.0,
            aspect_ratio: AspectRatio::default(),
            width_mm: None,
            height_mm: None,
            bezel_mm: 0.0,
            distance_mm: 700.0,
            arrangement: Arrangement::Single,
            angle_mode: AngleMode::Auto,
            manual_angle_deg: 45.0,
            curved: false,
            curve_radius_mm: None,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

/// Parse an aspect-ratio token such as `"21:9"`.
pub fn parse_aspect_ratio(token: &str) -> Result<AspectRatio, ValidationError> {
    AspectRatio::from_token(token)
        .ok_or_else(|| ValidationError::UnknownAspectRatio(token.to_string()))
}

impl Configuration {
    /// Reject anything the calculators cannot handle. Runs before every
    /// calculation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.bezel_mm.is_finite() && self.bezel_mm >= 0.0) {
            return Err(ValidationError::Negative {
                field: "bezel",
                value: self.bezel_mm,
            });
        }
        positive("viewing distance", self.distance_mm)?;

        match self.input_mode {
            InputMode::Diagonal => {
                positive("diagonal", self.diagonal_in)?;
                if !inches_to_mm(self.diagonal_in).is_finite() {
                    return Err(ValidationError::NotFinite {
                        field: "diagonal",
                        value: self.diagonal_in,
                    });
                }
            }
            InputMode::Manual => {
                let width = self
                    .width_mm
                    .ok_or(ValidationError::MissingField("a width"))?;
                let height = self
                    .height_mm
                    .ok_or(ValidationError::MissingField("a height"))?;
                let sides = [
                    ("width", positive("width", width)?),
                    ("height", positive("height", height)?),
                ];
                for (field, value) in sides {
                    if value <= 2.0 * self.bezel_mm {
                        return Err(ValidationError::BezelTooWide {
                            field,
                            value,
                            bezel: self.bezel_mm,
                        });
                    }
                }
            }
        }

        if matches!(self.angle_mode, AngleMode::Manual) && !self.manual_angle_deg.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "manual angle",
                value: self.manual_angle_deg,
            });
        }

        if self.curved {
            let radius = self
                .curve_radius_mm
                .ok_or(ValidationError::MissingCurveRadius)?;
            positive("curve radius", radius)?;
        }

        Ok(())
    }

    /// Curve radius when curvature is switched on.
    pub fn curve_radius(&self) -> Option<f64> {
        if self.curved {
            self.curve_radius_mm
        } else {
            None
        }
    }
}

/// Output settings for a rendered diagram.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Extra room around the scene, as a fraction of its extent
    pub margin: f64,
    pub css_path: Option<String>,
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            margin: 0.1,
            css_path: None,
            debug: false,
        }
    }
}
