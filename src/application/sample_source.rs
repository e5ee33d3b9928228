// Source trait for raw sensor records
use crate::domain::raw_record::RawRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Whole-fetch failure. Per-record problems never show up here.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid data format: expected an array")]
    NotAnArray,

    #[error("no valid data points found in the response")]
    NoValidSamples,
}

#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Fetch every raw record the source currently holds
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, FetchError>;
}
