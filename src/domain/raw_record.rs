// Raw spreadsheet row as delivered by the transport
use serde::Deserialize;
use serde_json::{Map, Value};

use super::telemetry::Channel;

pub const TIMESTAMP_FIELD: &str = "Timestamp";

/// One element of the JSON array returned by the spreadsheet endpoint.
///
/// Values are loosely typed (numbers, locale formatted strings, nulls) and any
/// column the dashboard does not know about is carried along and ignored.
/// Elements that are not JSON objects still deserialize; they simply have no
/// fields and are dropped during normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RawRecord {
    fields: Map<String, Value>,
}

impl RawRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn timestamp(&self) -> Option<&Value> {
        self.get(TIMESTAMP_FIELD)
    }

    pub fn channel(&self, channel: Channel) -> Option<&Value> {
        self.get(channel.field_name())
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}
