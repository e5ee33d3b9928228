// Operator commands read from stdin
use crate::domain::dashboard::ChartKind;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Manual refetch, also used as "retry" after an error
    Refresh,
    /// Range gesture reported by one chart
    Zoom { chart: ChartKind, start: i64, end: i64 },
    Reset,
    Theme,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("unknown chart `{0}` (expected temperature, co2, climate or fans)")]
    UnknownChart(String),

    #[error("invalid index `{0}`")]
    InvalidIndex(String),

    #[error("usage: zoom [chart] <start> <end>")]
    ZoomUsage,
}

pub const HELP: &str = "\
commands:
  refresh                     fetch now (retry after an error)
  zoom [chart] <start> <end>  zoom every chart to an index range
  reset                       show the full series again
  theme                       toggle dark mode
  status                      show fetch status
  quit                        exit";

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "refresh" | "retry" | "r" => Command::Refresh,
        "zoom" | "z" => parse_zoom(&args)?,
        "reset" => Command::Reset,
        "theme" => Command::Theme,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_zoom(args: &[&str]) -> Result<Command, CommandError> {
    let (chart, start, end) = match args {
        [start, end] => (ChartKind::Temperature, *start, *end),
        [chart, start, end] => {
            let chart = ChartKind::from_key(chart)
                .ok_or_else(|| CommandError::UnknownChart(chart.to_string()))?;
            (chart, *start, *end)
        }
        _ => return Err(CommandError::ZoomUsage),
    };

    Ok(Command::Zoom {
        chart,
        start: parse_index(start)?,
        end: parse_index(end)?,
    })
}

fn parse_index(text: &str) -> Result<i64, CommandError> {
    text.parse().map_err(|_| CommandError::InvalidIndex(text.to_string()))
}
