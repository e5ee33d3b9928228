// Spreadsheet endpoint source implementation
use crate::application::sample_source::{FetchError, SampleSource};
use crate::domain::raw_record::RawRecord;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use std::time::Duration;

/// Reads the published spreadsheet as a JSON array of row objects.
#[derive(Debug, Clone)]
pub struct SheetSource {
    client: reqwest::Client,
    url: String,
}

impl SheetSource {
    pub fn new(url: String, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SampleSource for SheetSource {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&body)?;

        match payload {
            Value::Array(items) => {
                tracing::debug!("Received {} raw records from {}", items.len(), self.url);
                Ok(items.into_iter().map(RawRecord::from).collect())
            }
            _ => Err(FetchError::NotAnArray),
        }
    }
}
