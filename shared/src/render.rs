use crate::slices::SliceSet;

/// Distance between the rim and the edge of the surface.
pub const RIM_MARGIN: f64 = 10.0;
pub const LABEL_INSET: f64 = 20.0;
pub const LABEL_BASELINE: f64 = 10.0;
pub const LABEL_FONT: &str = "18px Arial";
pub const LABEL_COLOR: &str = "#222";
pub const POINTER_COLOR: &str = "#e53935";
pub const POINTER_HALF_WIDTH: f64 = 20.0;

/// Anything that can paint the wheel at a given rotation.
pub trait WheelSurface {
    fn draw(&mut self, slices: &SliceSet, angle: f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: String,
    pub label: String,
    /// Rotation of the label's frame, the mid-angle of the sector.
    pub label_angle: f64,
    /// Right-aligned text anchor inside the rotated frame.
    pub label_anchor: Point,
}

/// Everything needed to paint one frame, independent of the drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelLayout {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    pub radius: f64,
    pub sectors: Vec<Sector>,
    /// Downward-pointing triangle above the top of the wheel: base left,
    /// base right, apex.
    pub pointer: [Point; 3],
}

impl WheelLayout {
    pub fn compute(width: f64, height: f64, slices: &SliceSet, angle: f64) -> Self {
        let center = Point {
            x: width / 2.0,
            y: height / 2.0,
        };
        let radius = center.x.min(center.y) - RIM_MARGIN;
        let arc_size = slices.arc_size();

        let sectors = slices
            .iter()
            .map(|slice| {
                let i = slice.index as f64;
                Sector {
                    start_angle: angle + i * arc_size,
                    end_angle: angle + (i + 1.0) * arc_size,
                    color: slice.color.clone(),
                    label: slice.label.clone(),
                    label_angle: angle + (i + 0.5) * arc_size,
                    label_anchor: Point {
                        x: radius - LABEL_INSET,
                        y: LABEL_BASELINE,
                    },
                }
            })
            .collect();

        let base_y = center.y - radius - 10.0;
        let pointer = [
            Point { x: center.x - POINTER_HALF_WIDTH, y: base_y },
            Point { x: center.x + POINTER_HALF_WIDTH, y: base_y },
            Point { x: center.x, y: center.y - radius + 20.0 },
        ];

        Self {
            width,
            height,
            center,
            radius,
            sectors,
            pointer,
        }
    }
}
