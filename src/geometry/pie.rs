use serde::{Deserialize, Serialize};

use super::{fmt_coord, sanitize};

/// Sweep used for a slice that covers the whole circle. An SVG arc whose
/// start and end points coincide draws nothing, so a 100% slice stops just
/// short of 360 degrees.
pub const FULL_CIRCLE_SWEEP: f64 = 359.999;

/// Offset that puts the first slice boundary at 12 o'clock
const START_OFFSET_DEG: f64 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieLayout {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    /// Ring thickness for a doughnut; 0 draws a full pie
    pub stroke_width: f64,
}

impl PieLayout {
    /// Pie filling a square of `size` pixels
    pub fn centered(size: f64, stroke_width: f64) -> Self {
        let half = size / 2.0;
        Self {
            cx: half,
            cy: half,
            radius: half,
            stroke_width,
        }
    }

    /// Inner circle punched out for a doughnut, when it has a usable radius
    pub fn hole(&self) -> Option<DoughnutHole> {
        let inner = self.radius - self.stroke_width;
        (self.stroke_width > 0.0 && inner > 0.0 && inner < self.radius).then_some(DoughnutHole {
            cx: self.cx,
            cy: self.cy,
            r: inner,
        })
    }

    fn is_degenerate(&self) -> bool {
        !(self.radius.is_finite() && self.radius > 0.0 && self.cx.is_finite() && self.cy.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    /// Index of the value this slice was built from
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub percentage: f64,
    pub large_arc: bool,
    pub path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoughnutHole {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PieGeometry {
    /// Layout cannot hold a circle (zero radius, zero-size container)
    Empty,
    /// Nothing to divide: one neutral full circle
    Placeholder { cx: f64, cy: f64, r: f64 },
    Slices {
        slices: Vec<PieSlice>,
        hole: Option<DoughnutHole>,
    },
}

impl PieGeometry {
    pub fn slices(&self) -> &[PieSlice] {
        match self {
            PieGeometry::Slices { slices, .. } => slices,
            _ => &[],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PieGeometry::Placeholder { .. })
    }
}

/// Slice paths for `values`, clockwise from 12 o'clock.
///
/// Zero values get no slice; the remaining slices keep the index of their
/// source value so callers can map them back to segments.
pub fn pie_geometry(values: &[f64], layout: &PieLayout) -> PieGeometry {
    if layout.is_degenerate() {
        return PieGeometry::Empty;
    }

    let values: Vec<f64> = values.iter().copied().map(sanitize).collect();
    let total: f64 = values.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return PieGeometry::Placeholder {
            cx: layout.cx,
            cy: layout.cy,
            r: layout.radius,
        };
    }

    let mut cumulative = 0.0;
    let mut slices = Vec::new();

    for (index, value) in values.iter().enumerate() {
        if *value <= 0.0 {
            continue;
        }
        let share = value / total;
        let start_angle = cumulative * 360.0 + START_OFFSET_DEG;
        let mut end_angle = (cumulative + share) * 360.0 + START_OFFSET_DEG;
        if share >= 1.0 - f64::EPSILON {
            end_angle = start_angle + FULL_CIRCLE_SWEEP;
        }
        cumulative += share;

        let large_arc = end_angle - start_angle > 180.0;
        slices.push(PieSlice {
            index,
            start_angle,
            end_angle,
            percentage: share * 100.0,
            large_arc,
            path: slice_path(layout, start_angle, end_angle, large_arc),
        });
    }

    PieGeometry::Slices {
        slices,
        hole: layout.hole(),
    }
}

fn point_on_circle(layout: &PieLayout, angle_deg: f64) -> (f64, f64) {
    let radians = angle_deg.to_radians();
    (
        layout.radius.mul_add(radians.cos(), layout.cx),
        layout.radius.mul_add(radians.sin(), layout.cy),
    )
}

fn slice_path(layout: &PieLayout, start_angle: f64, end_angle: f64, large_arc: bool) -> String {
    let (x1, y1) = point_on_circle(layout, start_angle);
    let (x2, y2) = point_on_circle(layout, end_angle);
    let r = fmt_coord(layout.radius);
    format!(
        "M {} {} L {} {} A {r} {r} 0 {} 1 {} {} Z",
        fmt_coord(layout.cx),
        fmt_coord(layout.cy),
        fmt_coord(x1),
        fmt_coord(y1),
        u8::from(large_arc),
        fmt_coord(x2),
        fmt_coord(y2),
    )
}
