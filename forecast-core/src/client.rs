use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::error::Error;
use crate::model::{Coordinates, ForecastResponse};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Default base URL of the 5-day/3-hour forecast endpoint.
pub const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Language codes the upstream API documents. Matched case-insensitively.
pub const LANG_CODES: &[&str] = &[
    "af", "al", "ar", "az", "bg", "ca", "cz", "da", "de", "el", "en", "es", "eu", "fa", "fi",
    "fr", "gl", "he", "hi", "hr", "hu", "id", "it", "ja", "kr", "la", "lt", "mk", "nl", "no",
    "pl", "pt", "pt_br", "ro", "ru", "se", "sk", "sl", "sp", "sr", "th", "tr", "ua", "uk",
    "vi", "zh_cn", "zh_tw", "zu",
];

/// Returns true if `key` matches the upstream key format: 32 lowercase
/// alphanumeric characters.
pub fn valid_api_key(key: &str) -> bool {
    key.len() == 32
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// Returns true if `code` is a supported language code (case-insensitive).
pub fn valid_lang_code(code: &str) -> bool {
    let lower = code.to_ascii_lowercase();
    LANG_CODES.contains(&lower.as_str())
}

/// Measurement convention requested from the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Standard,
    Metric,
    Imperial,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Standard => "standard",
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Unit] {
        &[Unit::Standard, Unit::Metric, Unit::Imperial]
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "standard" => Ok(Unit::Standard),
            "metric" => Ok(Unit::Metric),
            "imperial" => Ok(Unit::Imperial),
            _ => Err(Error::UnsupportedUnit(value.to_string())),
        }
    }
}

/// Mutable connection settings, filled in by [`ClientOption`]s at construction.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub transport: Arc<dyn HttpTransport>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: FORECAST_URL.to_string(),
            transport: Arc::new(ReqwestTransport::new()),
        }
    }
}

/// Configuration option applied to [`Settings`] during client construction.
/// A failing option fails construction with the error it produced.
pub type ClientOption = Box<dyn FnOnce(&mut Settings) -> Result<(), Error> + Send>;

/// Override the forecast endpoint base URL (e.g. to point at a mock server).
pub fn with_base_url(url: impl Into<String>) -> ClientOption {
    let url = url.into();
    Box::new(move |settings| {
        settings.base_url = url;
        Ok(())
    })
}

/// Override the HTTP transport used for queries.
pub fn with_transport(transport: Arc<dyn HttpTransport>) -> ClientOption {
    Box::new(move |settings| {
        settings.transport = transport;
        Ok(())
    })
}

/// Client for the OpenWeatherMap 5-day/3-hour forecast endpoint.
///
/// Configuration is validated at construction and immutable afterwards. Each
/// query returns a freshly allocated [`ForecastResponse`], so one client can
/// serve concurrent queries from multiple tasks.
#[derive(Debug)]
pub struct ForecastClient {
    key: String,
    unit: Unit,
    lang: String,
    settings: Settings,
}

impl ForecastClient {
    /// Build a client from a unit string, language code and API key, then
    /// apply `options` in order.
    pub fn new(
        unit: &str,
        lang: &str,
        api_key: &str,
        options: Vec<ClientOption>,
    ) -> Result<Self, Error> {
        if !valid_api_key(api_key) {
            return Err(Error::InvalidKey);
        }

        let unit = Unit::from_str(unit)?;

        if !valid_lang_code(lang) {
            return Err(Error::UnsupportedLanguage(lang.to_string()));
        }

        let mut settings = Settings::default();
        for option in options {
            option(&mut settings)?;
        }

        Ok(Self {
            key: api_key.to_string(),
            unit,
            lang: lang.to_ascii_lowercase(),
            settings,
        })
    }

    /// Forecast for a location given by name, for the number of days given.
    pub async fn forecast_by_name(
        &self,
        location: &str,
        days: u32,
    ) -> Result<ForecastResponse, Error> {
        let locator = format!("q={}", urlencoding::encode(location));
        self.fetch(&locator, days).await
    }

    /// Forecast for a location given by coordinates, for the number of days given.
    pub async fn forecast_by_coordinates(
        &self,
        coords: &Coordinates,
        days: u32,
    ) -> Result<ForecastResponse, Error> {
        let locator = format!("lat={:.6}&lon={:.6}", coords.lat, coords.lon);
        self.fetch(&locator, days).await
    }

    /// Forecast for a location given by its city ID, for the number of days given.
    pub async fn forecast_by_id(&self, id: i64, days: u32) -> Result<ForecastResponse, Error> {
        let locator = format!("id={id}");
        self.fetch(&locator, days).await
    }

    async fn fetch(&self, locator: &str, days: u32) -> Result<ForecastResponse, Error> {
        let url = self.forecast_url(locator, days);

        debug!(locator, days, "requesting 5-day forecast");

        let body = self.settings.transport.get(&url).await?;
        let parsed: ForecastResponse = serde_json::from_str(&body)?;
        Ok(parsed)
    }

    // `days` is passed through unchecked; the upstream API governs its range.
    fn forecast_url(&self, locator: &str, days: u32) -> String {
        format!(
            "{}?appid={}&{}&units={}&lang={}&cnt={}",
            self.settings.base_url, self.key, locator, self.unit, self.lang, days
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "0123456789abcdef0123456789abcdef";

    fn client() -> ForecastClient {
        ForecastClient::new("metric", "en", KEY, vec![]).expect("valid configuration")
    }

    #[test]
    fn unit_parsing_is_case_insensitive() {
        for unit in Unit::all() {
            let parsed = Unit::from_str(&unit.as_str().to_uppercase()).expect("roundtrip");
            assert_eq!(*unit, parsed);
        }
    }

    #[test]
    fn unknown_unit_fails_construction() {
        let err = ForecastClient::new("kelvin", "en", KEY, vec![]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedUnit(u) if u == "kelvin"));
    }

    #[test]
    fn unknown_language_fails_construction() {
        let err = ForecastClient::new("metric", "xx", KEY, vec![]).unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage(l) if l == "xx"));
    }

    #[test]
    fn language_codes_match_case_insensitively() {
        assert!(valid_lang_code("EN"));
        assert!(valid_lang_code("zh_CN"));
        assert!(!valid_lang_code("klingon"));
    }

    #[test]
    fn malformed_key_fails_regardless_of_other_arguments() {
        let too_long = format!("{KEY}0");
        for bad in ["", "short", "0123456789ABCDEF0123456789ABCDEF", too_long.as_str()] {
            let err = ForecastClient::new("metric", "en", bad, vec![]).unwrap_err();
            assert!(matches!(err, Error::InvalidKey));
        }
    }

    #[test]
    fn url_by_name_contains_escaped_query() {
        let url = client().forecast_url(&format!("q={}", urlencoding::encode("London")), 5);
        assert!(url.contains("q=London"));
        assert!(url.contains(&format!("appid={KEY}")));
        assert!(url.contains("units=metric"));
        assert!(url.contains("lang=en"));
        assert!(url.contains("cnt=5"));
    }

    #[test]
    fn url_by_coordinates_uses_six_decimal_formatting() {
        let coords = Coordinates { lat: 51.5, lon: -0.12 };
        let locator = format!("lat={:.6}&lon={:.6}", coords.lat, coords.lon);
        let url = client().forecast_url(&locator, 3);
        assert!(url.contains("lat=51.500000"));
        assert!(url.contains("lon=-0.120000"));
    }

    #[test]
    fn url_by_id_contains_numeric_id() {
        let url = client().forecast_url("id=2643743", 5);
        assert!(url.contains("id=2643743"));
    }

    #[test]
    fn base_url_option_replaces_endpoint() {
        let client = ForecastClient::new(
            "imperial",
            "de",
            KEY,
            vec![with_base_url("http://localhost:8080/forecast")],
        )
        .expect("valid configuration");

        let url = client.forecast_url("id=1", 1);
        assert!(url.starts_with("http://localhost:8080/forecast?"));
        assert!(url.contains("units=imperial"));
        assert!(url.contains("lang=de"));
    }

    #[test]
    fn failing_option_fails_construction_with_its_error() {
        let broken: ClientOption = Box::new(|_| Err(Error::Network("option exploded".into())));
        let err = ForecastClient::new("metric", "en", KEY, vec![broken]).unwrap_err();
        assert!(matches!(err, Error::Network(msg) if msg == "option exploded"));
    }

    #[test]
    fn language_is_stored_lowercased() {
        let client = ForecastClient::new("metric", "ZH_CN", KEY, vec![]).expect("valid");
        let url = client.forecast_url("id=1", 1);
        assert!(url.contains("lang=zh_cn"));
    }
}
