// Dashboard domain model - chart definitions and the shared row projection
use super::telemetry::{CHANNEL_COUNT, Channel, SamplePoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Temperature,
    Co2,
    Climate,
    Fans,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct SeriesSpec {
    pub channel: Channel,
    pub name: &'static str,
    pub dashed: bool,
    pub axis: Axis,
}

impl SeriesSpec {
    const fn left(channel: Channel, name: &'static str) -> Self {
        Self { channel, name, dashed: false, axis: Axis::Left }
    }

    const fn dashed(channel: Channel, name: &'static str) -> Self {
        Self { channel, name, dashed: true, axis: Axis::Left }
    }

    const fn right(channel: Channel, name: &'static str) -> Self {
        Self { channel, name, dashed: false, axis: Axis::Right }
    }
}

#[derive(Debug, Clone)]
pub struct AxisSpec {
    pub label: &'static str,
    pub domain: Option<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: &'static str,
    pub left_axis: AxisSpec,
    pub right_axis: Option<AxisSpec>,
    pub series: Vec<SeriesSpec>,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Temperature,
        ChartKind::Co2,
        ChartKind::Climate,
        ChartKind::Fans,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ChartKind::Temperature => "temperature",
            ChartKind::Co2 => "co2",
            ChartKind::Climate => "climate",
            ChartKind::Fans => "fans",
        }
    }

    pub fn from_key(key: &str) -> Option<ChartKind> {
        ChartKind::ALL.into_iter().find(|k| k.key().eq_ignore_ascii_case(key))
    }

    pub fn spec(self) -> ChartSpec {
        match self {
            ChartKind::Temperature => ChartSpec {
                kind: self,
                title: "Temperature Over Time",
                left_axis: AxisSpec { label: "Temperature (°F)", domain: Some((70.0, 102.0)) },
                right_axis: None,
                series: vec![
                    SeriesSpec::left(Channel::TemperatureFiltered, "Temperature Filtered (°F)"),
                    SeriesSpec::dashed(Channel::TemperatureReference, "Temperature CSV (°F)"),
                ],
            },
            ChartKind::Co2 => ChartSpec {
                kind: self,
                title: "CO₂ Over Time",
                left_axis: AxisSpec { label: "CO₂ Level (%)", domain: None },
                right_axis: None,
                series: vec![
                    SeriesSpec::left(Channel::Co2Right, "CO2 Right (%)"),
                    SeriesSpec::left(Channel::Co2Left, "CO2 Left (%)"),
                    SeriesSpec::dashed(Channel::Co2Reference, "CO2 CSV (%)"),
                ],
            },
            ChartKind::Climate => ChartSpec {
                kind: self,
                title: "Cooling / Heating / Ventilation",
                left_axis: AxisSpec { label: "Percentage (%)", domain: Some((0.0, 100.0)) },
                right_axis: None,
                series: vec![
                    SeriesSpec::left(Channel::Cooling, "Cooling (%)"),
                    SeriesSpec::left(Channel::Heating, "Heating (%)"),
                    SeriesSpec::left(Channel::Ventilation, "Ventilation (%)"),
                ],
            },
            ChartKind::Fans => ChartSpec {
                kind: self,
                title: "Fan Voltage / Flow Control",
                left_axis: AxisSpec { label: "Voltage (V)", domain: Some((0.0, 10.0)) },
                right_axis: Some(AxisSpec { label: "Pressure (Pa)", domain: Some((0.0, 1000.0)) }),
                series: vec![
                    SeriesSpec::left(Channel::Fan1, "Fan 1 (V)"),
                    SeriesSpec::left(Channel::Fan2, "Fan 2 (V)"),
                    SeriesSpec::left(Channel::Fan3, "Fan 3 (V)"),
                    SeriesSpec::right(Channel::FlowControl, "Flow Control (Pa)"),
                ],
            },
        }
    }
}

/// Render-friendly shape of one sample, shared by every chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub time_ms: i64,
    pub time_label: String,
    pub full_timestamp: String,
    pub values: [Option<f64>; CHANNEL_COUNT],
}

impl ChartRow {
    pub fn from_sample(sample: &SamplePoint) -> Self {
        Self {
            time_ms: sample.time_ms(),
            time_label: sample.timestamp.format("%H:%M:%S").to_string(),
            full_timestamp: sample.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            values: Channel::ALL.map(|c| sample.value(c)),
        }
    }

    pub fn value(&self, channel: Channel) -> Option<f64> {
        self.values[channel as usize]
    }
}

/// Project the whole series once; charts index into the result.
pub fn project_rows(series: &[SamplePoint]) -> Vec<ChartRow> {
    series.iter().map(ChartRow::from_sample).collect()
}

/// Summary of one series over a slice of rows. Null values are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub last: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SeriesSummary {
    pub fn over(rows: &[ChartRow], channel: Channel) -> Self {
        let values = rows.iter().filter_map(|r| r.value(channel));
        let (min, max, last) = values.fold((None, None, None), |(min, max, _), v| {
            (
                Some(min.map_or(v, |m: f64| m.min(v))),
                Some(max.map_or(v, |m: f64| m.max(v))),
                Some(v),
            )
        });
        Self { last, min, max }
    }
}
