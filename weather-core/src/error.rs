use thiserror::Error;

/// Failures surfaced by the weather client and its inputs.
///
/// The `Display` text of each variant is the single-line diagnostic the CLI
/// prints before exiting.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// DNS failure, refused connection, timeout.
    #[error("Error: Could not connect to the weather service ({0})")]
    Transport(#[source] reqwest::Error),

    /// The API answered with something other than 200 OK.
    #[error("API Error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from the weather service: {0}")]
    Decode(String),

    #[error(
        "Please obtain your OpenWeatherMap API key and run `weather configure` \
         (or set OPENWEATHER_API_KEY)."
    )]
    MissingApiKey,

    #[error("Unknown unit system '{0}'. Supported: metric, imperial.")]
    InvalidUnits(String),
}

impl WeatherError {
    /// Build a [`WeatherError::Api`] from a status and the raw response body,
    /// pulling the `message` field out of a JSON error payload when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| match v.get("message") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(other) if !other.is_null() => Some(other.to_string()),
                _ => None,
            })
            .unwrap_or_default();

        WeatherError::Api { status, message }
    }
}
