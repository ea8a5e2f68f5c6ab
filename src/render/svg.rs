//! Standalone SVG output for chart views

use std::fmt::Write;

use crate::charts::{BarChartView, Cursor, PieChartView, SegmentState};
use crate::core::palette::NEUTRAL_COLOR;
use crate::geometry::{fmt_coord, PieGeometry};

/// Text shown in place of a chart with nothing to plot
pub const NO_DATA_TEXT: &str = "Няма данни";

const TEXT_COLOR: &str = "#374151";
const AXIS_COLOR: &str = "#9ca3af";
const TITLE_HEIGHT: f64 = 28.0;

/// Escape text for XML content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct SvgRenderer {
    background_color: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new("#ffffff")
    }
}

impl SvgRenderer {
    pub fn new(background_color: impl Into<String>) -> Self {
        Self {
            background_color: background_color.into(),
        }
    }

    fn open(&self, out: &mut String, width: f64, height: f64, title: &str) {
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = fmt_coord(width),
            h = fmt_coord(height),
        );
        let title = escape_xml(title);
        let _ = writeln!(out, "  <title>{title}</title>");
        let _ = writeln!(
            out,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            escape_xml(&self.background_color)
        );
        let _ = writeln!(
            out,
            r#"  <text x="{}" y="18" text-anchor="middle" fill="{TEXT_COLOR}" font-size="14" font-weight="bold">{title}</text>"#,
            fmt_coord(width / 2.0),
        );
    }

    fn no_data(out: &mut String, x: f64, y: f64) {
        let _ = writeln!(
            out,
            r#"  <text x="{}" y="{}" text-anchor="middle" fill="{TEXT_COLOR}" font-size="13">{NO_DATA_TEXT}</text>"#,
            fmt_coord(x),
            fmt_coord(y),
        );
    }

    /// Pie with per-segment state classes and opacity, plus a legend
    pub fn pie(&self, title: &str, view: &PieChartView) -> String {
        let layout = view.layout();
        let size = layout.cx * 2.0;
        let legend_height = 18.0 * view.segments().len() as f64;
        let width = size.max(160.0);
        let height = TITLE_HEIGHT + size.max(40.0) + legend_height + 8.0;

        let mut out = String::new();
        self.open(&mut out, width, height, title);
        let offset_x = (width - size) / 2.0;
        let _ = writeln!(
            out,
            r#"  <g transform="translate({} {})">"#,
            fmt_coord(offset_x),
            fmt_coord(TITLE_HEIGHT)
        );

        match view.geometry() {
            PieGeometry::Empty => Self::no_data(&mut out, size / 2.0, 20.0),
            PieGeometry::Placeholder { cx, cy, r } => {
                let _ = writeln!(
                    out,
                    r#"    <circle cx="{}" cy="{}" r="{}" fill="{NEUTRAL_COLOR}"/>"#,
                    fmt_coord(*cx),
                    fmt_coord(*cy),
                    fmt_coord(*r),
                );
                Self::no_data(&mut out, *cx, *cy + 4.0);
            }
            PieGeometry::Slices { hole, .. } => {
                let cursor = if view.is_interactive() {
                    Cursor::Pointer
                } else {
                    Cursor::Default
                };
                for visual in view.visuals() {
                    let id = visual.segment.id.as_deref().unwrap_or(&visual.segment.label);
                    let _ = writeln!(
                        out,
                        r#"    <path class="segment {}" d="{}" fill="{}" fill-opacity="{}" data-id="{}" style="cursor:{}"><title>{}: {} ({:.1}%)</title></path>"#,
                        state_class(visual.state),
                        visual.slice.path,
                        escape_xml(&visual.segment.color),
                        visual.opacity,
                        escape_xml(id),
                        cursor.css(),
                        escape_xml(&visual.segment.label),
                        visual.segment.value,
                        visual.slice.percentage,
                    );
                }
                if let Some(hole) = hole {
                    let _ = writeln!(
                        out,
                        r#"    <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                        fmt_coord(hole.cx),
                        fmt_coord(hole.cy),
                        fmt_coord(hole.r),
                        escape_xml(&self.background_color),
                    );
                }
            }
        }
        let _ = writeln!(out, "  </g>");

        let legend_top = TITLE_HEIGHT + size.max(40.0) + 8.0;
        for (i, segment) in view.segments().iter().enumerate() {
            let y = legend_top + i as f64 * 18.0;
            let _ = writeln!(
                out,
                r#"  <rect x="8" y="{}" width="12" height="12" fill="{}"/>"#,
                fmt_coord(y),
                escape_xml(&segment.color)
            );
            let _ = writeln!(
                out,
                r#"  <text x="26" y="{}" fill="{TEXT_COLOR}" font-size="12">{} ({})</text>"#,
                fmt_coord(y + 10.0),
                escape_xml(&segment.label),
                segment.value
            );
        }

        out.push_str("</svg>\n");
        out
    }

    /// Bars with axis ticks, group labels and invisible hit areas
    pub fn bar(&self, title: &str, view: &BarChartView) -> String {
        let options = view.options();
        let margin = options.margin;
        let (plot_width, plot_height) = view.plot_size();
        let width = plot_width + margin.horizontal();
        let height = options.height + TITLE_HEIGHT;

        let mut out = String::new();
        self.open(&mut out, width, height, title);

        if view.data().is_empty() || view.series().is_empty() {
            Self::no_data(&mut out, width / 2.0, height / 2.0);
            out.push_str("</svg>\n");
            return out;
        }

        let geometry = view.geometry();
        let _ = writeln!(
            out,
            r#"  <g transform="translate({} {})">"#,
            fmt_coord(margin.left),
            fmt_coord(margin.top + TITLE_HEIGHT)
        );

        for tick in &geometry.ticks {
            let y = geometry.tick_y(*tick, plot_height);
            let _ = writeln!(
                out,
                r#"    <line x1="0" y1="{y}" x2="{}" y2="{y}" stroke="{AXIS_COLOR}" stroke-width="0.5"/>"#,
                fmt_coord(plot_width),
                y = fmt_coord(y),
            );
            let _ = writeln!(
                out,
                r#"    <text x="-6" y="{}" text-anchor="end" fill="{TEXT_COLOR}" font-size="10">{}</text>"#,
                fmt_coord(y + 3.0),
                tick
            );
        }

        for rect in &geometry.rects {
            let Some(series) = view.series().get(rect.series) else {
                continue;
            };
            let _ = writeln!(
                out,
                r#"    <rect x="{}" y="{}" width="{}" height="{}" fill="{}"><title>{}: {}</title></rect>"#,
                fmt_coord(rect.x),
                fmt_coord(rect.y),
                fmt_coord(rect.width),
                fmt_coord(rect.height),
                escape_xml(&series.color),
                escape_xml(&series.label),
                rect.value,
            );
        }

        for (group, point) in view.data().iter().enumerate() {
            let x = group as f64 * geometry.group_width + geometry.group_width / 2.0;
            let _ = writeln!(
                out,
                r#"    <text x="{}" y="{}" text-anchor="middle" fill="{TEXT_COLOR}" font-size="10">{}</text>"#,
                fmt_coord(x),
                fmt_coord(plot_height + 14.0),
                escape_xml(&point.label)
            );
        }

        for area in &geometry.hit_areas {
            let cursor = if area.clickable {
                Cursor::Pointer
            } else {
                Cursor::Default
            };
            let _ = writeln!(
                out,
                r#"    <rect class="hit-area" x="{}" y="{}" width="{}" height="{}" fill="transparent" data-group="{}" style="cursor:{}"/>"#,
                fmt_coord(area.x),
                fmt_coord(area.y),
                fmt_coord(area.width),
                fmt_coord(area.height),
                area.group,
                cursor.css(),
            );
        }

        let _ = writeln!(out, "  </g>");

        let legend_y = height - 12.0;
        let mut legend_x = margin.left;
        for series in view.series() {
            let _ = writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="10" height="10" fill="{}"/>"#,
                fmt_coord(legend_x),
                fmt_coord(legend_y - 9.0),
                escape_xml(&series.color)
            );
            let _ = writeln!(
                out,
                r#"  <text x="{}" y="{}" fill="{TEXT_COLOR}" font-size="11">{}</text>"#,
                fmt_coord(legend_x + 14.0),
                fmt_coord(legend_y),
                escape_xml(&series.label)
            );
            legend_x += 24.0 + 7.0 * series.label.chars().count() as f64;
        }

        out.push_str("</svg>\n");
        out
    }
}

fn state_class(state: SegmentState) -> &'static str {
    match state {
        SegmentState::Idle => "idle",
        SegmentState::Hovered => "hovered",
        SegmentState::Active => "active",
        SegmentState::HoveredActive => "hovered active",
    }
}
