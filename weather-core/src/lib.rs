//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - Daily forecast selection (one sample per day, nearest local noon)
//! - Console rendering, including ASCII art for common conditions
//!
//! Errors are returned to the caller; deciding to exit is left to the binary.

pub mod art;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod render;

pub use config::Config;
pub use error::WeatherError;
pub use model::{CurrentWeather, ForecastSample, LocationQuery, Units, WeatherReport};
pub use provider::{WeatherProvider, fetch_report, provider_from_config};
