use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::{
    WeatherError,
    model::{CurrentWeather, ForecastSample, LocationQuery},
};

use super::WeatherProvider;

/// Client for the OpenWeatherMap 2.5 `weather` and `forecast` endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout_secs: u64) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(WeatherError::Transport)?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// GET `{base_url}/{endpoint}` with the shared query parameters and decode
    /// a 200 body as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{endpoint}", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query.city.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", query.units.as_str()),
            ])
            .send()
            .await
            .map_err(transport)?;

        let status = res.status();
        let body = res.text().await.map_err(transport)?;
        debug!(%url, %status, bytes = body.len(), "OpenWeather response");

        if status != StatusCode::OK {
            return Err(WeatherError::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::Decode(format!("{endpoint}: {e}")))
    }
}

/// The request URL carries `appid`, so it is dropped from the error.
fn transport(err: reqwest::Error) -> WeatherError {
    WeatherError::Transport(err.without_url())
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl From<OwCurrentResponse> for CurrentWeather {
    fn from(raw: OwCurrentResponse) -> Self {
        let (keyword, description) = raw
            .weather
            .into_iter()
            .next()
            .map(|w| (w.main, w.description))
            .unwrap_or_else(|| (String::new(), "Unknown".to_string()));

        CurrentWeather {
            location_name: raw.name.unwrap_or_else(|| "Unknown location".to_string()),
            description,
            keyword,
            temperature: raw.main.temp,
            humidity_pct: raw.main.humidity,
            wind_speed: raw.wind.speed,
            timezone_offset: raw.timezone,
        }
    }
}

impl From<OwForecastEntry> for ForecastSample {
    fn from(raw: OwForecastEntry) -> Self {
        let description = raw
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .unwrap_or_else(|| "Unknown".to_string());

        ForecastSample { timestamp: raw.dt, temperature: raw.main.temp, description }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self), fields(city = %query.city, units = %query.units))]
    async fn current(&self, query: &LocationQuery) -> Result<CurrentWeather, WeatherError> {
        let raw: OwCurrentResponse = self.get_json("weather", query).await?;
        Ok(raw.into())
    }

    #[instrument(skip(self), fields(city = %query.city, units = %query.units))]
    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastSample>, WeatherError> {
        let raw: OwForecastResponse = self.get_json("forecast", query).await?;
        Ok(raw.list.into_iter().map(ForecastSample::from).collect())
    }
}
