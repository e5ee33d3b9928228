// Ingestion service - fetch raw records and normalize them into a series
use crate::application::normalization::normalize_with;
use crate::application::sample_source::{FetchError, SampleSource};
use crate::domain::telemetry::{Channel, SamplePoint};
use std::sync::Arc;

#[derive(Clone)]
pub struct IngestionService {
    source: Arc<dyn SampleSource>,
    required: Vec<Channel>,
}

impl IngestionService {
    pub fn new(source: Arc<dyn SampleSource>, required: Vec<Channel>) -> Self {
        Self { source, required }
    }

    /// Fetch and normalize one full series.
    ///
    /// An empty source yields an empty series. A source that returned records
    /// of which none survived normalization is reported as `NoValidSamples`.
    pub async fn fetch_series(&self) -> Result<Vec<SamplePoint>, FetchError> {
        let records = self.source.fetch_records().await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let series = normalize_with(&records, &self.required);
        if series.is_empty() {
            return Err(FetchError::NoValidSamples);
        }

        Ok(series)
    }
}
