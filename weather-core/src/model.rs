use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Unit system passed to the API as the `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Symbol shown next to temperatures.
    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = WeatherError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(Units::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(Units::Imperial),
            _ => Err(WeatherError::InvalidUnits(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    pub units: Units,
}

impl LocationQuery {
    pub fn new(city: impl Into<String>, units: Units) -> Self {
        Self { city: city.into(), units }
    }

    pub fn symbol(&self) -> &'static str {
        self.units.symbol()
    }
}

/// Conditions right now at the queried location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub description: String,
    /// Short category such as "Rain" or "Clouds".
    pub keyword: String,
    pub temperature: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    /// Offset from UTC in seconds.
    pub timezone_offset: i64,
}

/// One 3-hour slot of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Unix timestamp (UTC).
    pub timestamp: i64,
    pub temperature: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub daily: Vec<ForecastSample>,
}
