// Polling service - periodic and manual refetch of the series
use crate::application::ingestion_service::IngestionService;
use crate::application::sample_source::FetchError;
use crate::application::series_store::{ApplyOutcome, FetchTicket, SeriesSnapshot, SeriesStore};
use crate::domain::telemetry::SamplePoint;
use chrono::Local;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;

/// Result of one spawned fetch, delivered back to the UI task.
#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: Result<Vec<SamplePoint>, FetchError>,
}

/// Drives fetches and owns the series store.
///
/// Fetches run as spawned tasks so the UI task keeps serving the previous
/// series while a request is outstanding. Overlapping fetches are allowed;
/// ordering is enforced when their completions are applied.
pub struct PollingService {
    ingestion: IngestionService,
    store: SeriesStore,
    interval: Duration,
    completions: mpsc::UnboundedSender<FetchCompletion>,
}

impl PollingService {
    pub fn new(
        ingestion: IngestionService,
        interval: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<FetchCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let service = Self {
            ingestion,
            store: SeriesStore::new(),
            interval,
            completions: tx,
        };
        (service, rx)
    }

    /// Poll ticks. The first tick fires immediately; ticks keep coming
    /// whether or not anyone is looking at the dashboard.
    pub fn ticks(&self) -> IntervalStream {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        IntervalStream::new(interval)
    }

    /// Start a fetch (poll tick, manual refresh or retry).
    pub fn trigger(&mut self) -> FetchTicket {
        let ticket = self.store.begin_fetch();
        let ingestion = self.ingestion.clone();
        let tx = self.completions.clone();

        tracing::debug!("Starting fetch #{}", ticket.seq());
        tokio::spawn(async move {
            let result = ingestion.fetch_series().await;
            // Receiver gone means we are shutting down
            let _ = tx.send(FetchCompletion { ticket, result });
        });

        ticket
    }

    pub fn apply(&mut self, completion: FetchCompletion) -> ApplyOutcome {
        let ticket = completion.ticket;
        let outcome = self.store.complete(ticket, completion.result, Local::now());

        match outcome {
            ApplyOutcome::Updated => {
                tracing::info!("Fetch #{} applied: {} samples", ticket.seq(), self.store.snapshot().len());
            }
            ApplyOutcome::Failed => {
                tracing::warn!(
                    "Fetch #{} failed: {}",
                    ticket.seq(),
                    self.store.snapshot().error.unwrap_or_default()
                );
            }
            ApplyOutcome::Superseded => {}
        }
        outcome
    }

    pub fn snapshot(&self) -> SeriesSnapshot {
        self.store.snapshot()
    }
}
