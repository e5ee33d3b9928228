// Series store - stale-while-revalidate state for the polled series
use crate::application::sample_source::FetchError;
use crate::domain::telemetry::SamplePoint;
use chrono::{DateTime, Local};
use std::sync::Arc;

/// Identifies one fetch. Later tickets always carry larger sequence numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// New series is now displayed
    Updated,
    /// Error recorded, previous series (if any) still displayed
    Failed,
    /// A newer fetch was already applied; this result was dropped
    Superseded,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct SeriesSnapshot {
    pub series: Option<Arc<[SamplePoint]>>,
    pub is_loading: bool,
    pub is_refetching: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Local>>,
}

impl SeriesSnapshot {
    pub fn len(&self) -> usize {
        self.series.as_ref().map_or(0, |s| s.len())
    }
}

/// Holds the last good series until a newer fetch succeeds.
///
/// Completions are applied only if their ticket is newer than the last applied
/// one, so a slow request can never overwrite the result of a faster, later one.
#[derive(Debug, Default)]
pub struct SeriesStore {
    series: Option<Arc<[SamplePoint]>>,
    error: Option<String>,
    last_updated: Option<DateTime<Local>>,
    next_seq: u64,
    last_applied: Option<FetchTicket>,
    in_flight: usize,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        let ticket = FetchTicket(self.next_seq);
        self.next_seq += 1;
        self.in_flight += 1;
        ticket
    }

    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<SamplePoint>, FetchError>,
        now: DateTime<Local>,
    ) -> ApplyOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.last_applied.is_some_and(|last| ticket <= last) {
            tracing::debug!("Dropping result of fetch #{} (already applied #{:?})", ticket.seq(), self.last_applied.map(FetchTicket::seq));
            return ApplyOutcome::Superseded;
        }
        self.last_applied = Some(ticket);

        match result {
            Ok(series) => {
                self.series = Some(series.into());
                self.error = None;
                self.last_updated = Some(now);
                ApplyOutcome::Updated
            }
            Err(e) => {
                self.error = Some(e.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight > 0
    }

    pub fn snapshot(&self) -> SeriesSnapshot {
        let is_loading = self.series.is_none() && self.error.is_none() && self.is_fetching();
        SeriesSnapshot {
            series: self.series.clone(),
            is_loading,
            is_refetching: self.is_fetching() && !is_loading,
            error: self.error.clone(),
            last_updated: self.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::{CHANNEL_COUNT, ChannelValues};
    use chrono::TimeZone;

    fn series(len: u32) -> Vec<SamplePoint> {
        (0..len)
            .map(|s| {
                let ts = Local.with_ymd_and_hms(2026, 2, 10, 10, 0, s).unwrap();
                let values: ChannelValues = [Some(1.0); CHANNEL_COUNT];
                SamplePoint::new(ts, values)
            })
            .collect()
    }

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_initial_load() {
        let mut store = SeriesStore::new();
        let snap = store.snapshot();
        assert!(!snap.is_loading && !snap.is_refetching && snap.series.is_none());

        let ticket = store.begin_fetch();
        assert!(store.snapshot().is_loading);

        assert_eq!(store.complete(ticket, Ok(series(3)), now()), ApplyOutcome::Updated);
        let snap = store.snapshot();
        assert!(!snap.is_loading);
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.last_updated, Some(now()));
    }

    #[test]
    fn test_stale_while_revalidate() {
        let mut store = SeriesStore::new();
        let first = store.begin_fetch();
        store.complete(first, Ok(series(3)), now());

        let second = store.begin_fetch();
        let snap = store.snapshot();
        assert!(snap.is_refetching);
        assert_eq!(snap.len(), 3);

        assert_eq!(store.complete(second, Err(FetchError::Status(500)), now()), ApplyOutcome::Failed);
        let snap = store.snapshot();
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.error.as_deref(), Some("HTTP error! status: 500"));

        let third = store.begin_fetch();
        store.complete(third, Ok(series(5)), now());
        let snap = store.snapshot();
        assert_eq!(snap.len(), 5);
        assert_eq!(snap.error, None);
    }

    #[test]
    fn test_older_result_is_superseded() {
        let mut store = SeriesStore::new();
        let slow = store.begin_fetch();
        let fast = store.begin_fetch();
        assert!(fast > slow);

        assert_eq!(store.complete(fast, Ok(series(4)), now()), ApplyOutcome::Updated);
        assert_eq!(store.complete(slow, Ok(series(1)), now()), ApplyOutcome::Superseded);
        assert_eq!(store.snapshot().len(), 4);

        let slow = store.begin_fetch();
        let fast = store.begin_fetch();
        store.complete(fast, Ok(series(2)), now());
        assert_eq!(store.complete(slow, Err(FetchError::NotAnArray), now()), ApplyOutcome::Superseded);
        assert_eq!(store.snapshot().error, None);
        assert!(!store.is_fetching());
    }

    #[test]
    fn test_error_without_data_is_not_loading() {
        let mut store = SeriesStore::new();
        let ticket = store.begin_fetch();
        store.complete(ticket, Err(FetchError::NoValidSamples), now());

        let _retry = store.begin_fetch();
        let snap = store.snapshot();
        assert!(!snap.is_loading);
        assert!(snap.is_refetching);
        assert!(snap.error.is_some());
    }
}
