use log::debug;

use crate::error::LayoutError;
use crate::types::{Point, Rect, Size};

pub const DEFAULT_MARGIN: f64 = 0.1;

/// How to fit a scene into a container. An explicit scale or center wins
/// over the fitted one, which lets several scenes share one scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub margin: f64,
    pub scale: Option<f64>,
    pub center: Option<Point>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            scale: None,
            center: None,
        }
    }
}

/// Maps plan coordinates (millimetres) to viewport coordinates (pixels
/// relative to the container's middle) and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Pixels per millimetre
    pub scale: f64,
    /// Plan point shown in the middle of the container
    pub center: Point,
}

fn fit_scale(bounds: &Rect, container: Size, margin: f64) -> f64 {
    let grow = 1.0 + margin;
    let sx = (bounds.width() > 0.0).then(|| container.width / (bounds.width() * grow));
    let sy = (bounds.height() > 0.0).then(|| container.height / (bounds.height() * grow));
    match (sx, sy) {
        (Some(x), Some(y)) => x.min(y),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => 1.0,
    }
}

// Largest scale at which every one of `bounds` fits `container`
fn shared_scale(bounds: &[Rect], container: Size, margin: f64) -> f64 {
    bounds
        .iter()
        .map(|b| fit_scale(b, container, margin))
        .fold(f64::INFINITY, f64::min)
}

impl Viewport {
    pub fn fit(bounds: &Rect, container: Size, opts: &FitOptions) -> Result<Self, LayoutError> {
        if !(container.width > 0.0 && container.height > 0.0) {
            return Err(LayoutError::InvalidContainer {
                width: container.width,
                height: container.height,
            });
        }

        let scale = match opts.scale {
            Some(s) => s,
            None => fit_scale(bounds, container, opts.margin),
        };
        if !(scale.is_finite() && scale > 0.0) {
            return Err(LayoutError::InvalidScale(scale));
        }
        let center = opts.center.unwrap_or_else(|| bounds.center());
        debug!(
            "viewport {}x{} scale {:.4} px/mm centered on ({:.1}, {:.1})",
            container.width, container.height, scale, center.x, center.y
        );

        Ok(Self {
            width: container.width,
            height: container.height,
            scale,
            center,
        })
    }

    /// Fit several scenes into equally sized containers with one common
    /// scale, the smallest any of them needs on its own.
    pub fn fit_shared(
        bounds: &[Rect],
        container: Size,
        margin: f64,
    ) -> Result<Vec<Self>, LayoutError> {
        let opts = FitOptions {
            margin,
            scale: Some(shared_scale(bounds, container, margin)),
            center: None,
        };
        bounds
            .iter()
            .map(|b| Self::fit(b, container, &opts))
            .collect()
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        Point {
            x: (p.x - self.center.x) * self.scale,
            y: (p.y - self.center.y) * self.scale,
        }
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        Point {
            x: p.x / self.scale + self.center.x,
            y: p.y / self.scale + self.center.y,
        }
    }

    /// Plan-space area covered by the container.
    pub fn visible_world_rect(&self) -> Rect {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        Rect {
            min: self.screen_to_world(Point::new(-hw, -hh)),
            max: self.screen_to_world(Point::new(hw, hh)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::approx;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    #[test]
    fn fit_uses_the_tighter_axis_with_margin() {
        let b = rect(-1000.0, 0.0, 1000.0, 500.0);
        let v = Viewport::fit(&b, Size::new(800.0, 600.0), &FitOptions::default()).unwrap();
        // x: 800 / 2200, y: 600 / 550
        assert!(approx(v.scale, 800.0 / 2200.0, 1e-12));
        assert_eq!(v.center, Point::new(0.0, 250.0));
    }

    #[test]
    fn fitted_bounds_stay_inside_the_container() {
        let b = rect(-937.0, -120.0, 912.0, 1380.0);
        let v = Viewport::fit(&b, Size::new(640.0, 480.0), &FitOptions::default()).unwrap();
        let visible = v.visible_world_rect();
        assert!(visible.min.x <= b.min.x && visible.max.x >= b.max.x);
        assert!(visible.min.y <= b.min.y && visible.max.y >= b.max.y);
    }

    #[test]
    fn overrides_win() {
        let b = rect(-100.0, -100.0, 100.0, 100.0);
        let opts = FitOptions {
            scale: Some(2.5),
            center: Some(Point::new(40.0, -3.0)),
            ..FitOptions::default()
        };
        let v = Viewport::fit(&b, Size::new(100.0, 100.0), &opts).unwrap();
        assert_eq!(v.scale, 2.5);
        assert_eq!(v.center, Point::new(40.0, -3.0));
    }

    #[test]
    fn round_trip_is_identity() {
        let b = rect(-812.3, -77.0, 1044.9, 1391.2);
        let v = Viewport::fit(&b, Size::new(1024.0, 768.0), &FitOptions::default()).unwrap();
        for p in [
            Point::new(0.0, 0.0),
            Point::new(-812.3, 1391.2),
            Point::new(123.456, -987.654),
            Point::new(1e5, -1e5),
        ] {
            let back = v.screen_to_world(v.world_to_screen(p));
            assert!(approx(back.x, p.x, 1e-9 * p.x.abs().max(1.0)));
            assert!(approx(back.y, p.y, 1e-9 * p.y.abs().max(1.0)));
            let px = Point::new(p.x / 1000.0, p.y / 1000.0);
            let again = v.world_to_screen(v.screen_to_world(px));
            assert!(approx(again.x, px.x, 1e-9));
            assert!(approx(again.y, px.y, 1e-9));
        }
    }

    #[test]
    fn bounds_center_maps_to_container_middle() {
        let b = rect(10.0, 20.0, 110.0, 220.0);
        let v = Viewport::fit(&b, Size::new(300.0, 300.0), &FitOptions::default()).unwrap();
        assert_eq!(v.world_to_screen(b.center()), Point::new(0.0, 0.0));
    }

    #[test]
    fn flat_bounds_fall_back_to_the_other_axis() {
        let b = rect(-50.0, 0.0, 50.0, 0.0);
        let v = Viewport::fit(&b, Size::new(220.0, 100.0), &FitOptions::default()).unwrap();
        assert!(approx(v.scale, 2.0, 1e-12));

        let point = rect(0.0, 0.0, 0.0, 0.0);
        let v = Viewport::fit(&point, Size::new(220.0, 100.0), &FitOptions::default()).unwrap();
        assert_eq!(v.scale, 1.0);
    }

    #[test]
    fn bad_container_or_scale_is_rejected() {
        let b = rect(-1.0, -1.0, 1.0, 1.0);
        assert!(matches!(
            Viewport::fit(&b, Size::new(0.0, 100.0), &FitOptions::default()),
            Err(LayoutError::InvalidContainer { .. })
        ));
        let opts = FitOptions {
            scale: Some(0.0),
            ..FitOptions::default()
        };
        assert_eq!(
            Viewport::fit(&b, Size::new(10.0, 10.0), &opts),
            Err(LayoutError::InvalidScale(0.0))
        );
    }

    #[test]
    fn shared_fit_uses_the_smallest_scale() {
        let small = rect(-100.0, 0.0, 100.0, 100.0);
        let large = rect(-1000.0, 0.0, 1000.0, 1000.0);
        let views = Viewport::fit_shared(&[small, large], Size::new(400.0, 400.0), 0.1).unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].scale, views[1].scale);
        assert!(approx(views[0].scale, 400.0 / 2200.0, 1e-12));
        assert_eq!(views[0].center, small.center());
        assert_eq!(views[1].center, large.center());
    }
}
