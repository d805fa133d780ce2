//! SVG chart surface.
//!
//! Turns a draw call into a [`ChartFigure`]: plain geometry in a fixed
//! viewBox that the chart view paints as SVG elements.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use contracts::domain::a001_report::Series;

use super::chart::{ChartSurface, PIE_PALETTE};

pub const VIEW_WIDTH: f64 = 640.0;
pub const VIEW_HEIGHT: f64 = 320.0;
pub const MARGIN: f64 = 40.0;

const BAR_FILL_RATIO: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct BarShape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointShape {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliceShape {
    pub path: String,
    pub fill: &'static str,
    pub label: String,
    pub value: f64,
    /// Fraction of the positive total, 0..=1
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartFigure {
    /// Nothing to plot; the view shows a "no data" note
    NoData { title: String },
    Bar {
        title: String,
        baseline: f64,
        bars: Vec<BarShape>,
    },
    Line {
        title: String,
        baseline: f64,
        path: String,
        points: Vec<PointShape>,
    },
    Pie {
        title: String,
        slices: Vec<SliceShape>,
    },
}

/// Surface that keeps the last drawn figure
#[derive(Debug, Default)]
pub struct SvgSurface {
    figure: Option<ChartFigure>,
}

impl SvgSurface {
    pub fn figure(&self) -> Option<&ChartFigure> {
        self.figure.as_ref()
    }
}

impl ChartSurface for SvgSurface {
    fn draw_bar(&mut self, series: &Series, title: &str) {
        self.figure = Some(bar_figure(series, title));
    }

    fn draw_line(&mut self, series: &Series, title: &str) {
        self.figure = Some(line_figure(series, title));
    }

    fn draw_pie(&mut self, series: &Series, title: &str) {
        self.figure = Some(pie_figure(series, title));
    }

    fn clear(&mut self) {
        self.figure = None;
    }
}

/// Linear map from values to the plot's vertical extent. Zero is always
/// inside the range so bars grow from a visible baseline.
struct ValueScale {
    top: f64,
    height: f64,
    max: f64,
    span: f64,
}

impl ValueScale {
    fn for_series(series: &Series) -> Self {
        let max = series.max_value();
        let min = series.min_value();
        let span = if max - min > 0.0 { max - min } else { 1.0 };
        Self {
            top: MARGIN,
            height: VIEW_HEIGHT - 2.0 * MARGIN,
            max,
            span,
        }
    }

    fn y(&self, value: f64) -> f64 {
        self.top + (self.max - value) / self.span * self.height
    }
}

fn slot_width(len: usize) -> f64 {
    (VIEW_WIDTH - 2.0 * MARGIN) / len as f64
}

fn no_data(title: &str) -> ChartFigure {
    ChartFigure::NoData {
        title: title.to_string(),
    }
}

pub fn bar_figure(series: &Series, title: &str) -> ChartFigure {
    if series.is_empty() {
        return no_data(title);
    }
    let scale = ValueScale::for_series(series);
    let slot = slot_width(series.len());
    let width = slot * BAR_FILL_RATIO;
    let baseline = scale.y(0.0);

    let bars = series
        .points()
        .enumerate()
        .map(|(i, (label, value))| {
            let top = scale.y(value);
            BarShape {
                x: MARGIN + slot * i as f64 + (slot - width) / 2.0,
                y: top.min(baseline),
                width,
                height: (top - baseline).abs(),
                label: label.to_string(),
                value,
            }
        })
        .collect();

    ChartFigure::Bar {
        title: title.to_string(),
        baseline,
        bars,
    }
}

pub fn line_figure(series: &Series, title: &str) -> ChartFigure {
    if series.is_empty() {
        return no_data(title);
    }
    let scale = ValueScale::for_series(series);
    let slot = slot_width(series.len());

    let points: Vec<PointShape> = series
        .points()
        .enumerate()
        .map(|(i, (label, value))| PointShape {
            x: MARGIN + slot * (i as f64 + 0.5),
            y: scale.y(value),
            label: label.to_string(),
            value,
        })
        .collect();

    let path = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!("{}{:.2} {:.2}", cmd, p.x, p.y)
        })
        .collect::<Vec<_>>()
        .join(" ");

    ChartFigure::Line {
        title: title.to_string(),
        baseline: scale.y(0.0),
        path,
        points,
    }
}

/// Slices for the positive values, clockwise from twelve o'clock.
/// Zero and negative values get no slice.
pub fn pie_figure(series: &Series, title: &str) -> ChartFigure {
    let total: f64 = series.values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return no_data(title);
    }

    let cx = VIEW_WIDTH / 2.0;
    let cy = VIEW_HEIGHT / 2.0;
    let r = VIEW_HEIGHT / 2.0 - MARGIN / 2.0;
    let mut start = -FRAC_PI_2;

    let slices = series
        .points()
        .enumerate()
        .filter(|(_, (_, value))| *value > 0.0)
        .map(|(i, (label, value))| {
            let share = value / total;
            let sweep = share * TAU;
            let end = start + sweep;
            let path = if share >= 1.0 - 1e-9 {
                full_circle_path(cx, cy, r)
            } else {
                let large_arc = if sweep > PI { 1 } else { 0 };
                format!(
                    "M{:.2} {:.2} L{:.2} {:.2} A{:.2} {:.2} 0 {} 1 {:.2} {:.2} Z",
                    cx,
                    cy,
                    cx + r * start.cos(),
                    cy + r * start.sin(),
                    r,
                    r,
                    large_arc,
                    cx + r * end.cos(),
                    cy + r * end.sin(),
                )
            };
            start = end;
            SliceShape {
                path,
                fill: PIE_PALETTE[i % PIE_PALETTE.len()],
                label: label.to_string(),
                value,
                share,
            }
        })
        .collect();

    ChartFigure::Pie {
        title: title.to_string(),
        slices,
    }
}

fn full_circle_path(cx: f64, cy: f64, r: f64) -> String {
    format!(
        "M{:.2} {:.2} A{:.2} {:.2} 0 1 1 {:.2} {:.2} A{:.2} {:.2} 0 1 1 {:.2} {:.2} Z",
        cx,
        cy - r,
        r,
        r,
        cx,
        cy + r,
        r,
        r,
        cx,
        cy - r,
    )
}
