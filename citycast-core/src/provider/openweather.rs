use async_trait::async_trait;
use reqwest::Client;

use crate::{
    config::DEFAULT_API_BASE_URL,
    error::{FetchFailure, SearchError},
    model::WeatherReport,
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the provider at another API root, e.g. a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/weather", self.base_url.trim_end_matches('/'))
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReport, FetchFailure> {
        tracing::debug!(city, endpoint = %self.endpoint(), "requesting current weather");

        let res = self
            .http
            .get(self.endpoint())
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(transport_failure)?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        // A body cut off mid-transfer counts as no response.
        let body = res
            .text()
            .await
            .map_err(|e| FetchFailure::NoResponse(describe(&e.without_url())))?;

        serde_json::from_str::<WeatherReport>(&body).map_err(|e| {
            FetchFailure::Setup(format!(
                "Failed to parse weather response: {e} (body: {})",
                truncate_body(&body)
            ))
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, SearchError> {
        match self.fetch_current(city).await {
            Ok(report) => {
                tracing::debug!(city, name = %report.name, "received current weather");
                Ok(report)
            }
            Err(failure) => {
                tracing::error!(city, ?failure, "Error fetching weather data");
                Err(SearchError::from_failure(city, failure))
            }
        }
    }
}

/// Split send errors into "never left the building" and "sent, but nothing came back".
fn transport_failure(err: reqwest::Error) -> FetchFailure {
    // The URL carries the credential in its query.
    let err = err.without_url();

    if err.is_builder() {
        FetchFailure::Setup(describe(&err))
    } else {
        FetchFailure::NoResponse(describe(&err))
    }
}

/// Error text including its source chain.
fn describe(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
