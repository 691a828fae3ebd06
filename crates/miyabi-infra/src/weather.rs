//! OpenWeatherMap current-weather client.

use serde::Deserialize;

use miyabi_core::notify::WeatherProvider;
use miyabi_types::error::WeatherError;
use miyabi_types::weather::WeatherReport;

/// Production API origin.
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org";

/// REST client for the current-weather endpoint, metric units.
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, OPENWEATHER_API_BASE)
    }

    /// Point the client at a different origin (tests, proxies).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

/// Response subset the bot consumes: `weather[0].description`, `main.temp`.
#[derive(Debug, Deserialize)]
struct CurrentWeatherBody {
    weather: Vec<Condition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let response = self
            .http
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body: CurrentWeatherBody = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let condition = body
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("empty weather array".to_string()))?;

        Ok(WeatherReport {
            description: condition.description,
            temperature: body.main.temp,
        })
    }
}
