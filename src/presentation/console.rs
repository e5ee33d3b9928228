// Console rendering of the dashboard panels
use crate::domain::dashboard::{Axis, AxisSpec, ChartRow, SeriesSummary};
use crate::presentation::dashboard_state::{ChartView, DashboardState, Theme};
use std::fmt::Write;

const TITLE: &str = "Conceptmachine Live Data";

struct Palette {
    heading: &'static str,
    muted: &'static str,
    error: &'static str,
    reset: &'static str,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                heading: "\x1b[1;32m",
                muted: "\x1b[90m",
                error: "\x1b[1;31m",
                reset: "\x1b[0m",
            },
            Theme::Dark => Palette {
                heading: "\x1b[1;92m",
                muted: "\x1b[37m",
                error: "\x1b[1;91m",
                reset: "\x1b[0m",
            },
        }
    }
}

/// Draw one full frame: header, then whichever panels apply.
pub fn render(state: &DashboardState) -> String {
    let palette = Palette::for_theme(state.theme());
    let snapshot = state.snapshot();
    let mut out = String::new();

    render_header(&mut out, state, &palette);

    if snapshot.is_loading && snapshot.series.is_none() {
        let _ = writeln!(out, "{}Loading temperature data...{}", palette.muted, palette.reset);
    }

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "{}Error Loading Data{}", palette.error, palette.reset);
        let _ = writeln!(out, "  {}", error);
        let _ = writeln!(out, "  type `refresh` to retry");
    }

    if snapshot.series.is_some() && state.rows().is_empty() {
        let _ = writeln!(out, "No Data Available");
        let _ = writeln!(out, "  No valid data points to display. Please check the data source.");
    }

    if !state.rows().is_empty() {
        for chart in state.charts() {
            render_chart(&mut out, chart, state.rows(), &palette);
        }
    }

    out
}

fn render_header(out: &mut String, state: &DashboardState, palette: &Palette) {
    let snapshot = state.snapshot();
    let _ = write!(out, "{}{}{}", palette.heading, TITLE, palette.reset);

    if let Some(updated) = snapshot.last_updated {
        let _ = write!(out, "  {}Last updated: {}{}", palette.muted, updated.format("%H:%M:%S"), palette.reset);
    }
    if snapshot.is_refetching {
        let _ = write!(out, "  Refreshing...");
    }
    if state.is_zoomed() {
        let _ = write!(out, "  [zoomed]");
    }
    let _ = writeln!(out);
}

fn render_chart(out: &mut String, chart: &ChartView, rows: &[ChartRow], palette: &Palette) {
    let spec = chart.spec();
    let visible = chart.visible_rows(rows);
    let _ = writeln!(out, "\n{}{}{}", palette.heading, spec.title, palette.reset);

    if let (Some(range), Some(first), Some(last)) = (chart.visible_range(), visible.first(), visible.last()) {
        let _ = writeln!(
            out,
            "  {}{} .. {}  (samples {}-{} of {}, {} shown){}",
            palette.muted,
            first.full_timestamp,
            last.time_label,
            range.start,
            range.end,
            rows.len(),
            range.count(),
            palette.reset
        );
    }

    let _ = write!(out, "  {}axis: {}", palette.muted, describe_axis(&spec.left_axis));
    if let Some(right) = &spec.right_axis {
        let _ = write!(out, " | right axis: {}", describe_axis(right));
    }
    let _ = writeln!(out, "{}", palette.reset);

    for series in &spec.series {
        let summary = SeriesSummary::over(visible, series.channel);
        let unit = series.channel.unit();
        let mut name = series.name.to_string();
        if series.dashed {
            name.push_str(" - dashed");
        }
        if series.axis == Axis::Right {
            name.push_str(" (R)");
        }
        let _ = writeln!(
            out,
            "  {:<32} last {:>10}  min {:>10}  max {:>10}",
            name,
            format_value(summary.last, unit),
            format_value(summary.min, unit),
            format_value(summary.max, unit),
        );
    }
}

fn describe_axis(axis: &AxisSpec) -> String {
    match axis.domain {
        Some((min, max)) => format!("{} [{}, {}]", axis.label, min, max),
        None => format!("{} [auto]", axis.label),
    }
}

fn format_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}{}", v, unit),
        _ => "N/A".to_string(),
    }
}
