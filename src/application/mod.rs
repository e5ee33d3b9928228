// Application layer - Use cases over the sample source
pub mod ingestion_service;
pub mod normalization;
pub mod polling_service;
pub mod sample_source;
pub mod series_store;
