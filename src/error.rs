use thiserror::Error;

/// Malformed configuration, caught before any calculation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be a non-negative finite number, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("unsupported aspect ratio '{0}'")]
    UnknownAspectRatio(String),
    #[error("manual input mode requires {0}")]
    MissingField(&'static str),
    #[error("bezel of {bezel} mm leaves no panel inside {field} of {value} mm")]
    BezelTooWide {
        field: &'static str,
        value: f64,
        bezel: f64,
    },
    #[error("curvature is enabled but no curve radius was given")]
    MissingCurveRadius,
}

/// Physically impossible curved-screen geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("curve radius {radius} mm must exceed half the panel width ({half_width} mm)")]
    RadiusTooSmall { radius: f64, half_width: f64 },
    #[error("curved panel depth {sagitta} mm reaches past the viewing distance of {distance} mm")]
    SagittaExceedsDistance { sagitta: f64, distance: f64 },
}

/// Bad values reaching scene construction or viewport fitting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("non-finite {what} while building the scene: {value}")]
    NonFinite { what: &'static str, value: f64 },
    #[error("container must have a positive size, got {width}x{height}")]
    InvalidContainer { width: f64, height: f64 },
    #[error("viewport scale must be positive and finite, got {0}")]
    InvalidScale(f64),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed")]
    Io(#[from] std::io::Error),
    #[error("snapshot is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("snapshot version {found} is not supported (expected {expected})")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Any failure of the calculation pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RigError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Fail with a `LayoutError` when `value` is NaN or infinite.
pub fn ensure_finite(what: &'static str, value: f64) -> Result<f64, LayoutError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LayoutError::NonFinite { what, value })
    }
}
