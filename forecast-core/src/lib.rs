//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - A typed client for the OpenWeatherMap 5-day/3-hour forecast endpoint
//! - The decoded response model (city descriptor, forecast entries)
//! - A pluggable HTTP transport, swappable for testing
//! - Configuration & credentials handling for the CLI
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod transport;

pub use client::{
    ClientOption, ForecastClient, Settings, Unit, valid_api_key, valid_lang_code, with_base_url,
    with_transport,
};
pub use config::Config;
pub use error::Error;
pub use model::{City, Coordinates, ForecastEntry, ForecastResponse, MainMetrics, WeatherCondition, Wind};
pub use transport::{HttpTransport, ReqwestTransport};
