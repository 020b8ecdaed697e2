use svg::node::element::Group;

use crate::context::DiagramContext;
use crate::layers::{Layer, group_with_class, text};
use crate::scene::EntityId;

pub struct LabelsLayer {
    line_height: f64,
    screen_offset: f64,
}
impl LabelsLayer {
    pub fn new() -> Self {
        Self {
            line_height: 14.0,
            screen_offset: 12.0,
        }
    }

    fn summary_lines(context: &DiagramContext) -> Vec<String> {
        let r = &context.results;
        let mut lines = vec![
            format!(
                "FOV {:.1}° H × {:.1}° V",
                r.fov.horizontal, r.fov.vertical
            ),
            format!(
                "Panel {:.0} × {:.0} mm",
                r.dimensions.panel.width, r.dimensions.panel.height
            ),
            format!("Footprint {:.0} mm wide", r.footprint.total_width),
        ];
        if context.cfg.arrangement.is_triple() {
            lines.push(format!(
                "Side angle {:.1}° (recommended {:.1}°)",
                r.angles.actual_side_angle, r.angles.recommended_side_angle
            ));
        }
        if let Some(c) = &r.curvature {
            lines.push(format!(
                "R{:.0}: chord {:.0} mm, depth {:.0} mm",
                c.radius, c.chord_length, c.sagitta
            ));
        }
        lines
    }
}

impl Layer for LabelsLayer {
    fn render(&self, context: &DiagramContext) -> Group {
        let mut g = group_with_class("labels");
        let props = &context.render.svg_props;
        let left = -props.width / 2.0 + 8.0;
        let top = -props.height / 2.0 + self.line_height;

        for (i, line) in Self::summary_lines(context).iter().enumerate() {
            let y = top + i as f64 * self.line_height;
            g = g.add(text("summary", left, y, "start", line));
        }

        // Angle next to each side screen, just behind it
        let angle = context.results.angles.actual_side_angle;
        for screen in &context.render.screens {
            if screen.id == EntityId::CenterScreen {
                continue;
            }
            let label = format!("{angle:.1}°");
            g = g.add(text(
                "angle-label",
                screen.center.x,
                screen.center.y - self.screen_offset,
                "middle",
                &label,
            ));
        }

        let eye = context.render.view_point.center;
        g = g.add(text(
            "fov-label",
            eye.x,
            eye.y + context.render.view_point.radius + self.line_height,
            "middle",
            &format!("{:.1}°", context.results.fov.horizontal),
        ));

        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AngleMode, Arrangement};
    use crate::test_utils::make_context;

    #[test]
    fn single_screen_has_no_angle_labels() {
        let context = make_context(|_| {}, false);
        let out = LabelsLayer::new().render(&context).to_string();
        assert!(!out.contains("angle-label"));
        assert!(!out.contains("Side angle"));
        assert!(out.contains("Footprint 598 mm wide"));
    }

    #[test]
    fn triple_labels_both_side_screens() {
        let context = make_context(
            |c| {
                c.arrangement = Arrangement::Triple;
                c.angle_mode = AngleMode::Manual;
                c.manual_angle_deg = 30.0;
            },
            false,
        );
        let out = LabelsLayer::new().render(&context).to_string();
        assert_eq!(out.matches("class=\"angle-label\"").count(), 2);
        assert!(out.contains("30.0°"));
        assert!(out.contains("Side angle 30.0°"));
    }

    #[test]
    fn curved_setup_reports_chord_and_depth() {
        let context = make_context(
            |c| {
                c.curved = true;
                c.curve_radius_mm = Some(1000.0);
            },
            false,
        );
        let out = LabelsLayer::new().render(&context).to_string();
        assert!(out.contains("R1000: chord 589 mm, depth 44 mm"));
    }
}
