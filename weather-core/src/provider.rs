use crate::{
    Config, WeatherError,
    forecast::{FORECAST_DAYS, pick_daily_forecast},
    model::{CurrentWeather, ForecastSample, LocationQuery, WeatherReport},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::info;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather, WeatherError>;

    /// Raw 3-hour samples, in the order the service returned them.
    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastSample>, WeatherError>;
}

/// Construct the OpenWeather provider from config.
///
/// `env_api_key` is the value of [`crate::config::API_KEY_ENV`], if set.
/// Fails before any network activity when no usable key is available.
pub fn provider_from_config(
    config: &Config,
    env_api_key: Option<String>,
) -> Result<OpenWeatherProvider, WeatherError> {
    let api_key = config.resolve_api_key(env_api_key)?;
    OpenWeatherProvider::new(api_key, &config.base_url, config.timeout_secs)
}

/// Fetch current conditions, then the forecast, and reduce the forecast to
/// one sample per upcoming day.
pub async fn fetch_report(
    provider: &dyn WeatherProvider,
    query: &LocationQuery,
) -> Result<WeatherReport, WeatherError> {
    let current = provider.current(query).await?;
    let samples = provider.forecast(query).await?;

    info!(
        location = %current.location_name,
        samples = samples.len(),
        offset = current.timezone_offset,
        "fetched weather"
    );

    let daily = pick_daily_forecast(&samples, current.timezone_offset, FORECAST_DAYS);
    Ok(WeatherReport { current, daily })
}
