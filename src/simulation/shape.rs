use crate::config::{ANNULUS_INNER_RADIUS, MEMBRANE_RADIUS};

/// Preset regions a membrane can take. All coordinates are in lattice cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { cx: f64, cy: f64, radius: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    /// Half-open box `[x0, x1) x [y0, y1)`
    Rectangle { x0: f64, y0: f64, x1: f64, y1: f64 },
    /// Ring with a reflecting island in the middle
    Annulus { cx: f64, cy: f64, inner: f64, outer: f64 },
}

impl Shape {
    /// Whether the point `(px, py)` belongs to the medium.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        match *self {
            Shape::Circle { cx, cy, radius } => (px - cx).hypot(py - cy) < radius,
            Shape::Ellipse { cx, cy, rx, ry } => {
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let nx = (px - cx) / rx;
                let ny = (py - cy) / ry;
                nx * nx + ny * ny < 1.0
            }
            Shape::Rectangle { x0, y0, x1, y1 } => px >= x0 && px < x1 && py >= y0 && py < y1,
            Shape::Annulus {
                cx,
                cy,
                inner,
                outer,
            } => {
                let d = (px - cx).hypot(py - cy);
                d >= inner && d < outer
            }
        }
    }

    /// Human-readable name for logs and the window title
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Circle { .. } => "circle",
            Shape::Ellipse { .. } => "ellipse",
            Shape::Rectangle { .. } => "rectangle",
            Shape::Annulus { .. } => "annulus",
        }
    }

    /// The four presets offered by the app, sized for a `width x height` lattice.
    ///
    /// Index 0 is the circular membrane; out-of-range indices wrap.
    pub fn preset(index: usize, width: u32, height: u32) -> Self {
        let cx = width as f64 / 2.0;
        let cy = height as f64 / 2.0;
        let fit = cx.min(cy) - 2.0;
        let radius = MEMBRANE_RADIUS.min(fit);

        match index % 4 {
            0 => Shape::Circle { cx, cy, radius },
            1 => Shape::Ellipse {
                cx,
                cy,
                rx: (cx - 2.0).min(radius * 1.8),
                ry: radius * 0.8,
            },
            2 => Shape::Rectangle {
                x0: cx - radius * 1.5,
                y0: cy - radius * 0.9,
                x1: cx + radius * 1.5,
                y1: cy + radius * 0.9,
            },
            _ => Shape::Annulus {
                cx,
                cy,
                inner: ANNULUS_INNER_RADIUS.min(radius / 2.0),
                outer: radius,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_is_strict() {
        let circle = Shape::Circle {
            cx: 10.0,
            cy: 10.0,
            radius: 5.0,
        };
        assert!(circle.contains(10.0, 10.0));
        assert!(circle.contains(14.0, 10.0));
        assert!(!circle.contains(15.0, 10.0), "Points on the rim are outside");
    }

    #[test]
    fn test_rectangle_half_open() {
        let rect = Shape::Rectangle {
            x0: 2.0,
            y0: 2.0,
            x1: 5.0,
            y1: 4.0,
        };
        assert!(rect.contains(2.0, 2.0));
        assert!(rect.contains(4.0, 3.0));
        assert!(!rect.contains(5.0, 3.0));
        assert!(!rect.contains(3.0, 4.0));
    }

    #[test]
    fn test_annulus_excludes_island() {
        let ring = Shape::Annulus {
            cx: 0.0,
            cy: 0.0,
            inner: 3.0,
            outer: 6.0,
        };
        assert!(!ring.contains(0.0, 0.0));
        assert!(ring.contains(4.0, 0.0));
        assert!(!ring.contains(0.0, 6.0));
    }

    #[test]
    fn test_degenerate_ellipse_is_empty() {
        let flat = Shape::Ellipse {
            cx: 0.0,
            cy: 0.0,
            rx: 0.0,
            ry: 3.0,
        };
        assert!(!flat.contains(0.0, 0.0));
    }

    #[test]
    fn test_presets_stay_inside_lattice() {
        let (w, h) = (120, 80);
        for index in 0..4 {
            let shape = Shape::preset(index, w, h);
            for x in 0..w {
                assert!(!shape.contains(x as f64, 0.0), "{} touches the top border", shape.name());
                assert!(!shape.contains(x as f64, (h - 1) as f64), "{} touches the bottom border", shape.name());
            }
            for y in 0..h {
                assert!(!shape.contains(0.0, y as f64), "{} touches the left border", shape.name());
                assert!(!shape.contains((w - 1) as f64, y as f64), "{} touches the right border", shape.name());
            }
            assert!(
                shape.contains(w as f64 / 2.0 + 25.0, h as f64 / 2.0),
                "{} should cover cells right of centre",
                shape.name()
            );
        }
    }

    #[test]
    fn test_preset_wraps() {
        assert_eq!(Shape::preset(4, 100, 100), Shape::preset(0, 100, 100));
    }
}
