// Normalization - raw spreadsheet rows to an ordered sample series
use crate::domain::parsing::{parse_numeric_field, parse_timestamp_field};
use crate::domain::raw_record::RawRecord;
use crate::domain::telemetry::{CHANNEL_COUNT, Channel, ChannelValues, SamplePoint};

/// Normalize with the channel set the temperature and CO₂ charts need.
pub fn normalize(records: &[RawRecord]) -> Vec<SamplePoint> {
    normalize_with(records, &Channel::TEMPERATURE_AND_CO2)
}

/// Parse, convert and sort `records`.
///
/// A record is dropped when its timestamp or any of `required` does not parse.
/// Other channels are kept as `None` when missing. The result is sorted by
/// timestamp; records with equal timestamps keep their input order.
pub fn normalize_with(records: &[RawRecord], required: &[Channel]) -> Vec<SamplePoint> {
    let mut points: Vec<SamplePoint> = records
        .iter()
        .filter_map(|record| normalize_record(record, required))
        .collect();

    // Stable sort
    points.sort_by_key(|p| p.timestamp);

    tracing::debug!("Kept {} of {} records", points.len(), records.len());
    points
}

pub fn normalize_record(record: &RawRecord, required: &[Channel]) -> Option<SamplePoint> {
    let timestamp = record.timestamp().and_then(parse_timestamp_field)?;

    let mut values: ChannelValues = [None; CHANNEL_COUNT];
    for channel in Channel::ALL {
        values[channel as usize] = record
            .channel(channel)
            .and_then(parse_numeric_field)
            .map(|raw| channel.convert(raw));
    }

    let point = SamplePoint::new(timestamp, values);
    if required.iter().any(|&c| point.value(c).is_none()) {
        return None;
    }
    Some(point)
}
