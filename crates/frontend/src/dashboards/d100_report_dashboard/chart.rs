use contracts::domain::a001_report::Series;
use contracts::enums::ChartKind;

/// Fixed series styling
pub const SERIES_FILL: &str = "rgba(14, 165, 233, 0.5)";
pub const SERIES_STROKE: &str = "rgba(14, 165, 233, 1)";
pub const SERIES_STROKE_WIDTH: f64 = 1.0;

/// Slice fills for pie charts, cycled by index
pub const PIE_PALETTE: [&str; 6] = [
    "rgba(14, 165, 233, 0.7)",
    "rgba(34, 197, 94, 0.7)",
    "rgba(239, 68, 68, 0.7)",
    "rgba(234, 179, 8, 0.7)",
    "rgba(168, 85, 247, 0.7)",
    "rgba(249, 115, 22, 0.7)",
];

/// The chart-drawing backend. Receives the series untouched.
pub trait ChartSurface {
    fn draw_bar(&mut self, series: &Series, title: &str);
    fn draw_line(&mut self, series: &Series, title: &str);
    fn draw_pie(&mut self, series: &Series, title: &str);

    /// Remove whatever is currently drawn
    fn clear(&mut self) {}
}

/// Draw `series` as the chart `kind` names.
///
/// Exactly one draw call is made for a known kind. A kind outside
/// bar/line/pie draws nothing and returns `None`.
pub fn render<S>(surface: &mut S, series: &Series, kind: &str, title: &str) -> Option<ChartKind>
where
    S: ChartSurface + ?Sized,
{
    let Some(chart_kind) = ChartKind::from_code(kind) else {
        log::warn!("Report '{}' has unsupported chart kind '{}'", title, kind);
        return None;
    };

    match chart_kind {
        ChartKind::Bar => surface.draw_bar(series, title),
        ChartKind::Line => surface.draw_line(series, title),
        ChartKind::Pie => surface.draw_pie(series, title),
    }
    Some(chart_kind)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Records every draw call
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<(ChartKind, Series, String)>,
        pub clears: usize,
    }

    impl ChartSurface for RecordingSurface {
        fn draw_bar(&mut self, series: &Series, title: &str) {
            self.calls.push((ChartKind::Bar, series.clone(), title.to_string()));
        }

        fn draw_line(&mut self, series: &Series, title: &str) {
            self.calls.push((ChartKind::Line, series.clone(), title.to_string()));
        }

        fn draw_pie(&mut self, series: &Series, title: &str) {
            self.calls.push((ChartKind::Pie, series.clone(), title.to_string()));
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }
}
