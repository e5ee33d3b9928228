use crate::domain::telemetry::Channel;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str = "https://script.google.com/macros/s/AKfycbxnSb-bzTLWQmbHbo-ZBwxZn9444juSqzHjLokPZklrA86hXME_rt3NH8x1d-8xo8ZJoQ/exec";
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub source: SourceSettings,
    pub ingestion: IngestionSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub url: String,
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl SourceSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngestionSettings {
    pub required_channels: Vec<Channel>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    pub dark_mode: bool,
}

/// Load settings from built-in defaults, `config/dashboard.*` and
/// `DASHBOARD__*` environment variables, in that order of precedence.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let builder = defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(environment());

    let app_config: AppConfig = builder.build()?.try_deserialize()?;
    validate(&app_config)?;
    Ok(app_config)
}

/// `DASHBOARD__SOURCE__URL=...`, `DASHBOARD__INGESTION__REQUIRED_CHANNELS=fan1,fan2`
fn environment() -> config::Environment {
    config::Environment::with_prefix("DASHBOARD")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("ingestion.required_channels")
        .try_parsing(true)
}

fn defaults() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let required: Vec<&str> = Channel::TEMPERATURE_AND_CO2.iter().map(|c| c.key()).collect();

    Ok(config::Config::builder()
        .set_default("source.url", DEFAULT_SOURCE_URL)?
        .set_default("source.refresh_interval_secs", DEFAULT_REFRESH_INTERVAL_SECS)?
        .set_default("ingestion.required_channels", required)?
        .set_default("display.dark_mode", false)?)
}

fn validate(app_config: &AppConfig) -> anyhow::Result<()> {
    if app_config.source.url.trim().is_empty() {
        anyhow::bail!("source.url must not be empty");
    }
    if app_config.source.refresh_interval_secs == 0 {
        anyhow::bail!("source.refresh_interval_secs must be at least 1");
    }
    if app_config.source.request_timeout_secs == Some(0) {
        anyhow::bail!("source.request_timeout_secs must be at least 1");
    }
    Ok(())
}
