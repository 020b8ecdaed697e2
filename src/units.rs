use serde::{Deserialize, Serialize};

pub const MM_PER_INCH: f64 = 25.4;
pub const MM_PER_CM: f64 = 10.0;

#[inline]
pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

#[inline]
pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

#[inline]
pub fn cm_to_mm(cm: f64) -> f64 {
    cm * MM_PER_CM
}

#[inline]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Unit used for lengths entered at the command line or by other callers.
/// Everything past ingestion is millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    #[default]
    Mm,
    Cm,
    In,
}

impl LengthUnit {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "mm" => Some(Self::Mm),
            "cm" => Some(Self::Cm),
            "in" | "inch" | "inches" => Some(Self::In),
            _ => None,
        }
    }

    pub fn to_mm(self, value: f64) -> f64 {
        match self {
            Self::Mm => value,
            Self::Cm => cm_to_mm(value),
            Self::In => inches_to_mm(value),
        }
    }
}
