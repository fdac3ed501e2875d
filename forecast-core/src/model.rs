use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates, in the field order the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Metadata about the queried location, returned alongside the forecast list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct City {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub coord: Coordinates,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub population: i64,
}

/// Main weather metrics for a single forecast entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MainMetrics {
    pub temp: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub sea_level: f64,
    #[serde(default)]
    pub grnd_level: f64,
    #[serde(default)]
    pub humidity: i64,
}

/// One weather condition descriptor (an entry may carry several).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

/// One timestamped weather snapshot within a multi-day forecast response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Forecast time, epoch seconds UTC.
    pub dt: i64,
    pub main: MainMetrics,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: i64,
}

impl ForecastEntry {
    /// Forecast time as a `DateTime<Utc>`, `None` for an out-of-range timestamp.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.dt, 0).single()
    }
}

/// Decoded body of a 5-day forecast query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub cod: String,
    #[serde(default)]
    pub message: f64,
    pub city: City,
    pub cnt: u32,
    pub list: Vec<ForecastEntry>,
}
