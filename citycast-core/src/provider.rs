use crate::{Config, SearchError, WeatherReport, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current conditions for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Perform exactly one lookup for `city`. Failures come back already classified.
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, SearchError>;
}

/// Construct the OpenWeatherMap provider from config.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, SearchError> {
    let api_key = config.api_key().ok_or(SearchError::MissingCredential)?;

    let provider = OpenWeatherProvider::new(api_key.to_owned())
        .with_base_url(config.api_base_url.clone());

    Ok(Box::new(provider))
}
