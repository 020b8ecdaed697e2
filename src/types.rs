use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 2D point in plan (top-down) or viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// World-space position in millimetres. The viewer's eye sits at the origin,
/// `-z` points towards the center screen and `+y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in plan or viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point {
            x: (self.min.x + self.max.x) / 2.0,
            y: (self.min.y + self.max.y) / 2.0,
        }
    }
}

// Width:height pairs for the supported aspect-ratio tokens
static ASPECT_RATIOS: phf::Map<&'static str, (f64, f64)> = phf_map! {
    "16:9" => (16.0, 9.0),
    "16:10" => (16.0, 10.0),
    "21:9" => (21.0, 9.0),
    "32:9" => (32.0, 9.0),
    "4:3" => (4.0, 3.0),
    "5:4" => (5.0, 4.0),
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AspectRatio(String);

impl AspectRatio {
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        ASPECT_RATIOS
            .contains_key(token)
            .then(|| Self(token.to_string()))
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    /// Width and height components of the ratio, e.g. `(16, 9)`.
    pub fn components(&self) -> (f64, f64) {
        // Construction only goes through `from_token`, so the lookup succeeds.
        ASPECT_RATIOS.get(self.0.as_str()).copied().unwrap_or((16.0, 9.0))
    }

    /// Unit vector `(w, h) / hypot(w, h)`, used to split a diagonal.
    pub fn unit(&self) -> (f64, f64) {
        let (w, h) = self.components();
        let hyp = w.hypot(h);
        (w / hyp, h / hyp)
    }

    pub fn supported() -> Vec<&'static str> {
        let mut tokens: Vec<&'static str> = ASPECT_RATIOS.keys().copied().collect();
        tokens.sort();
        tokens
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self("16:9".to_string())
    }
}

impl TryFrom<String> for AspectRatio {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_token(&s).ok_or_else(|| format!("unsupported aspect ratio '{s}'"))
    }
}

impl From<AspectRatio> for String {
    fn from(ratio: AspectRatio) -> Self {
        ratio.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::approx;

    #[test]
    fn aspect_ratio_recognizes_known_tokens() {
        for token in ["16:9", "16:10", "21:9", "32:9", "4:3", "5:4"] {
            let ratio = AspectRatio::from_token(token).expect("known token");
            assert_eq!(ratio.token(), token);
        }
        assert_eq!(
            AspectRatio::from_token(" 21:9 ").map(|r| r.components()),
            Some((21.0, 9.0))
        );
    }

    #[test]
    fn aspect_ratio_rejects_unknown_tokens() {
        assert!(AspectRatio::from_token("17:9").is_none());
        assert!(AspectRatio::from_token("").is_none());
        assert!(AspectRatio::from_token("wide").is_none());
    }

    #[test]
    fn aspect_ratio_unit_is_normalized() {
        let (w, h) = AspectRatio::default().unit();
        assert!(approx(w.hypot(h), 1.0, 1e-12));
        assert!(approx(w / h, 16.0 / 9.0, 1e-12));
    }

    #[test]
    fn aspect_ratio_deserialize_validates_token() {
        let ok: AspectRatio = serde_json::from_str("\"32:9\"").unwrap();
        assert_eq!(ok.components(), (32.0, 9.0));
        assert!(serde_json::from_str::<AspectRatio>("\"3:1\"").is_err());
    }

    #[test]
    fn rect_size_and_center() {
        let u = Rect {
            min: Point::new(-1.0, -2.0),
            max: Point::new(3.0, 4.0),
        };
        assert!(approx(u.width(), 4.0, 1e-12));
        assert!(approx(u.height(), 6.0, 1e-12));
        assert_eq!(u.center(), Point::new(1.0, 1.0));
    }
}
