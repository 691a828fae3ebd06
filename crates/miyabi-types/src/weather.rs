//! Weather data shapes.

use serde::{Deserialize, Serialize};

/// Current conditions for one location, reduced to what the bot reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Human-readable condition, e.g. "clear sky".
    pub description: String,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
}
