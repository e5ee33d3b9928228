// Operator command handlers
use crate::application::polling_service::PollingService;
use crate::presentation::commands::{Command, HELP};
use crate::presentation::console::render;
use crate::presentation::dashboard_state::DashboardState;
use std::ops::ControlFlow;

/// Apply one command. Returns text to print, or `Break` to exit.
pub fn handle_command(
    command: Command,
    polling: &mut PollingService,
    dashboard: &mut DashboardState,
) -> ControlFlow<(), String> {
    match command {
        Command::Refresh => {
            let ticket = polling.trigger();
            tracing::info!("Manual refresh requested (fetch #{})", ticket.seq());
            dashboard.update(polling.snapshot());
            ControlFlow::Continue(render(dashboard))
        }
        Command::Zoom { chart, start, end } => {
            if let Some(view) = dashboard.chart(chart) {
                view.on_range_change(start, end);
            }
            ControlFlow::Continue(render(dashboard))
        }
        Command::Reset => {
            dashboard.reset_zoom();
            ControlFlow::Continue(render(dashboard))
        }
        Command::Theme => {
            dashboard.toggle_theme();
            ControlFlow::Continue(render(dashboard))
        }
        Command::Status => ControlFlow::Continue(status_line(dashboard)),
        Command::Help => ControlFlow::Continue(HELP.to_string()),
        Command::Quit => ControlFlow::Break(()),
    }
}

/// Start a scheduled poll. Returns a frame when the fetch puts the dashboard
/// into its loading or refreshing state, so the indicator is on screen while
/// the request is in flight.
pub fn handle_tick(polling: &mut PollingService, dashboard: &mut DashboardState) -> Option<String> {
    polling.trigger();
    dashboard.update(polling.snapshot());
    let snapshot = dashboard.snapshot();
    (snapshot.is_loading || snapshot.is_refetching).then(|| render(dashboard))
}

fn status_line(dashboard: &DashboardState) -> String {
    let snapshot = dashboard.snapshot();
    let state = if snapshot.is_loading {
        "loading"
    } else if snapshot.is_refetching {
        "refreshing"
    } else if snapshot.error.is_some() {
        "error"
    } else if snapshot.series.is_some() {
        "ok"
    } else {
        "idle"
    };

    let window = match dashboard.visible_range() {
        Some(range) if dashboard.is_zoomed() => format!("{}-{}", range.start, range.end),
        Some(_) => "full".to_string(),
        None => "-".to_string(),
    };

    format!(
        "status: {}  samples: {}  window: {}  last updated: {}",
        state,
        snapshot.len(),
        window,
        snapshot
            .last_updated
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string())
    )
}
