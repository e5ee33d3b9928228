// Local UI state for the dashboard
use crate::application::series_store::SeriesSnapshot;
use crate::domain::dashboard::{ChartKind, ChartRow, ChartSpec, project_rows};
use crate::domain::viewport::{SyncedViewport, ViewportHandle, VisibleRange};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Theme::Dark } else { Theme::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// One chart on the page. Range gestures go straight into the shared viewport.
#[derive(Debug, Clone)]
pub struct ChartView {
    spec: ChartSpec,
    viewport: ViewportHandle,
}

impl ChartView {
    pub fn new(kind: ChartKind, viewport: ViewportHandle) -> Self {
        Self { spec: kind.spec(), viewport }
    }

    pub fn kind(&self) -> ChartKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    /// Brush/zoom callback.
    pub fn on_range_change(&self, start: i64, end: i64) {
        self.viewport.set_range(start, end);
    }

    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.viewport.visible_range()
    }

    pub fn visible_rows<'a>(&self, rows: &'a [ChartRow]) -> &'a [ChartRow] {
        match self.visible_range() {
            Some(range) if range.end < rows.len() => range.slice(rows),
            _ => &[],
        }
    }
}

/// Everything the console needs to draw one frame.
pub struct DashboardState {
    theme: Theme,
    viewport: ViewportHandle,
    charts: Vec<ChartView>,
    snapshot: SeriesSnapshot,
    rows: Vec<ChartRow>,
}

impl DashboardState {
    pub fn new(theme: Theme) -> Self {
        let viewport = ViewportHandle::new(SyncedViewport::default());
        let charts = ChartKind::ALL
            .into_iter()
            .map(|kind| ChartView::new(kind, viewport.clone()))
            .collect();

        Self {
            theme,
            viewport,
            charts,
            snapshot: SeriesSnapshot::default(),
            rows: Vec::new(),
        }
    }

    /// Take a new store snapshot. Rows are re-projected only when the series
    /// itself was replaced.
    pub fn update(&mut self, snapshot: SeriesSnapshot) {
        let replaced = match (&self.snapshot.series, &snapshot.series) {
            (Some(old), Some(new)) => !Arc::ptr_eq(old, new),
            (None, None) => false,
            _ => true,
        };

        if replaced {
            self.rows = snapshot.series.as_deref().map(project_rows).unwrap_or_default();
            self.viewport.set_series_len(self.rows.len());
        }
        self.snapshot = snapshot;
    }

    pub fn snapshot(&self) -> &SeriesSnapshot {
        &self.snapshot
    }

    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }

    pub fn charts(&self) -> &[ChartView] {
        &self.charts
    }

    pub fn chart(&self, kind: ChartKind) -> Option<&ChartView> {
        self.charts.iter().find(|c| c.kind() == kind)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn reset_zoom(&self) {
        self.viewport.reset_zoom();
    }

    pub fn is_zoomed(&self) -> bool {
        self.viewport.is_zoomed()
    }

    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.viewport.visible_range()
    }
}
