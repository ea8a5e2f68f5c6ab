use serde::{Deserialize, Serialize};

use super::{safe_denominator, sanitize, ticks::axis_ticks};
use crate::core::types::{BarDataPoint, BarSeriesConfig};

/// Share of each group's width left empty as the gap between groups
pub const GROUP_PADDING_RATIO: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    /// One bar per series, side by side
    #[default]
    Grouped,
    /// Series stacked on top of each other, first series at the bottom
    Stacked,
}

/// Plot area of a bar chart (axes and margins excluded)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarLayout {
    pub width: f64,
    pub height: f64,
    pub mode: BarMode,
    /// Gap between bars of the same group in grouped mode
    pub bar_gap: f64,
}

impl BarLayout {
    pub fn new(width: f64, height: f64, mode: BarMode) -> Self {
        Self {
            width,
            height,
            mode,
            bar_gap: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub group: usize,
    pub series: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
}

/// Invisible click/hover target. Always spans the full plot height so short
/// bars are as easy to hit as tall ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitArea {
    pub group: usize,
    /// Set in grouped mode, where every bar is its own target
    pub series: Option<usize>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// False when the target's value is 0
    pub clickable: bool,
}

impl HitArea {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub rects: Vec<BarRect>,
    pub hit_areas: Vec<HitArea>,
    pub axis_max: f64,
    pub ticks: Vec<f64>,
    pub group_width: f64,
}

impl BarGeometry {
    /// Y coordinate of a tick value inside the plot area
    pub fn tick_y(&self, tick: f64, plot_height: f64) -> f64 {
        plot_height - tick / safe_denominator(self.axis_max) * plot_height
    }
}

/// Largest single value (grouped) or largest group sum (stacked), floored at 1
pub fn axis_max(data: &[BarDataPoint], series: &[BarSeriesConfig], mode: BarMode) -> f64 {
    let max = data
        .iter()
        .map(|point| match mode {
            BarMode::Grouped => series
                .iter()
                .map(|s| point.value(&s.data_key))
                .fold(0.0_f64, f64::max),
            BarMode::Stacked => point.total(series),
        })
        .fold(0.0_f64, f64::max);
    max.max(1.0)
}

/// Rectangles and hit areas for `data` plotted with `series`.
///
/// Rects come out in paint order: per group, grouped bars left to right,
/// stacked bars top-down (descending cumulative sum) so the first series ends
/// up at the bottom.
pub fn bar_geometry(
    data: &[BarDataPoint],
    series: &[BarSeriesConfig],
    layout: &BarLayout,
) -> BarGeometry {
    let axis_max = axis_max(data, series, layout.mode);
    let ticks = axis_ticks(axis_max);

    let width = sanitize(layout.width);
    let height = sanitize(layout.height);
    if data.is_empty() || series.is_empty() || width == 0.0 || height == 0.0 {
        return BarGeometry {
            rects: Vec::new(),
            hit_areas: Vec::new(),
            axis_max,
            ticks,
            group_width: 0.0,
        };
    }

    let group_width = width / data.len() as f64;
    let padding = group_width * GROUP_PADDING_RATIO;
    let inner_width = group_width - padding;
    let scale = |value: f64| value / safe_denominator(axis_max) * height;

    let mut rects = Vec::with_capacity(data.len() * series.len());
    let mut hit_areas = Vec::new();

    for (group, point) in data.iter().enumerate() {
        let group_x = group as f64 * group_width + padding / 2.0;

        match layout.mode {
            BarMode::Grouped => {
                let count = series.len() as f64;
                let mut gap = sanitize(layout.bar_gap);
                if gap * (count - 1.0) >= inner_width {
                    gap = 0.0;
                }
                let bar_width = (inner_width - gap * (count - 1.0)) / count;

                for (index, s) in series.iter().enumerate() {
                    let value = point.value(&s.data_key);
                    let x = group_x + index as f64 * (bar_width + gap);
                    let bar_height = scale(value);
                    rects.push(BarRect {
                        group,
                        series: index,
                        x,
                        y: height - bar_height,
                        width: bar_width,
                        height: bar_height,
                        value,
                    });
                    hit_areas.push(HitArea {
                        group,
                        series: Some(index),
                        x,
                        y: 0.0,
                        width: bar_width,
                        height,
                        clickable: value > 0.0,
                    });
                }
            }
            BarMode::Stacked => {
                let mut cumulative = 0.0;
                let mut stacked = Vec::with_capacity(series.len());
                for (index, s) in series.iter().enumerate() {
                    let value = point.value(&s.data_key);
                    cumulative += value;
                    let bar_height = scale(value);
                    stacked.push(BarRect {
                        group,
                        series: index,
                        x: group_x,
                        y: height - scale(cumulative),
                        width: inner_width,
                        height: bar_height,
                        value,
                    });
                }
                rects.extend(stacked.into_iter().rev());
                hit_areas.push(HitArea {
                    group,
                    series: None,
                    x: group_x,
                    y: 0.0,
                    width: inner_width,
                    height,
                    clickable: cumulative > 0.0,
                });
            }
        }
    }

    BarGeometry {
        rects,
        hit_areas,
        axis_max,
        ticks,
        group_width,
    }
}
