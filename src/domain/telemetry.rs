// Telemetry data domain models
use chrono::{DateTime, Local};
use serde::Deserialize;

pub const CHANNEL_COUNT: usize = 12;

/// One named measurement carried by a `SamplePoint`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    TemperatureFiltered,
    TemperatureReference,
    Co2Right,
    Co2Left,
    Co2Reference,
    Cooling,
    Heating,
    Ventilation,
    Fan1,
    Fan2,
    Fan3,
    FlowControl,
}

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::TemperatureFiltered,
        Channel::TemperatureReference,
        Channel::Co2Right,
        Channel::Co2Left,
        Channel::Co2Reference,
        Channel::Cooling,
        Channel::Heating,
        Channel::Ventilation,
        Channel::Fan1,
        Channel::Fan2,
        Channel::Fan3,
        Channel::FlowControl,
    ];

    /// Channels the temperature and CO₂ charts cannot render without.
    pub const TEMPERATURE_AND_CO2: [Channel; 5] = [
        Channel::TemperatureFiltered,
        Channel::TemperatureReference,
        Channel::Co2Right,
        Channel::Co2Left,
        Channel::Co2Reference,
    ];

    /// Column name in the spreadsheet export.
    pub fn field_name(self) -> &'static str {
        match self {
            Channel::TemperatureFiltered => "Temperature Filtered(F)",
            Channel::TemperatureReference => "Temperature CSV(F)",
            Channel::Co2Right => "CO2 Rechts",
            Channel::Co2Left => "CO2 Links",
            Channel::Co2Reference => "CO2 CSV(%)",
            Channel::Cooling => "Cooling(V)",
            Channel::Heating => "Heating(PWM)",
            Channel::Ventilation => "Ventilation(V)",
            Channel::Fan1 => "Fan 1(V)",
            Channel::Fan2 => "Fan 2(V)",
            Channel::Fan3 => "Fan 3(V)",
            Channel::FlowControl => "Stuursignaal debiet(Pa)",
        }
    }

    /// Key used in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            Channel::TemperatureFiltered => "temperature_filtered",
            Channel::TemperatureReference => "temperature_reference",
            Channel::Co2Right => "co2_right",
            Channel::Co2Left => "co2_left",
            Channel::Co2Reference => "co2_reference",
            Channel::Cooling => "cooling",
            Channel::Heating => "heating",
            Channel::Ventilation => "ventilation",
            Channel::Fan1 => "fan1",
            Channel::Fan2 => "fan2",
            Channel::Fan3 => "fan3",
            Channel::FlowControl => "flow_control",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Channel::TemperatureFiltered | Channel::TemperatureReference => "°F",
            Channel::Co2Right | Channel::Co2Left | Channel::Co2Reference => "%",
            Channel::Cooling | Channel::Heating | Channel::Ventilation => "%",
            Channel::Fan1 | Channel::Fan2 | Channel::Fan3 => "V",
            Channel::FlowControl => "Pa",
        }
    }

    /// Rescale a parsed raw value into the unit the channel is displayed in.
    ///
    /// Every conversion is a fixed linear map of the raw value alone.
    pub fn convert(self, raw: f64) -> f64 {
        match self {
            // Sensor counts to percent
            Channel::Co2Right | Channel::Co2Left => raw * 0.001,
            // 3-10 V to 0-100 %
            Channel::Cooling => (raw - 3.0) / 7.0 * 100.0,
            // 0-10 to 0-100 %
            Channel::Heating => raw * 10.0,
            // 2-10 V to 0-100 %
            Channel::Ventilation => (raw - 2.0) / 8.0 * 100.0,
            _ => raw,
        }
    }
}

/// Per-channel values of a single sample, indexed by `Channel`.
pub type ChannelValues = [Option<f64>; CHANNEL_COUNT];

/// A normalized, timestamped observation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplePoint {
    pub timestamp: DateTime<Local>,
    values: ChannelValues,
}

impl SamplePoint {
    pub fn new(timestamp: DateTime<Local>, values: ChannelValues) -> Self {
        // NaN never makes it into a sample
        let values = values.map(|v| v.filter(|x| !x.is_nan()));
        Self { timestamp, values }
    }

    pub fn value(&self, channel: Channel) -> Option<f64> {
        self.values[channel as usize]
    }

    pub fn time_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}
