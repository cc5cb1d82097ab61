//! Core library for the `weatherbit` CLI.
//!
//! This crate defines:
//! - A typed client for the Weatherbit current-conditions and daily-forecast API
//! - Response models and the condition code/icon table
//! - Day/night icon correction and forecast min/max extraction
//! - Configuration & credentials handling
//!
//! It is used by `weatherbit-cli`, but can also be reused by other binaries or services.

pub mod codes;
pub mod config;
pub mod daynight;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod summary;

pub use config::{ClientConfig, Config, Language, Unit};
pub use error::{Error, ErrorKind, Result};
pub use model::{
    CurrentForApp, CurrentObservation, CurrentResponse, CurrentSummary, ForecastDay,
    ForecastForApp, ForecastResponse, ForecastSummary, PartOfDay, WeatherCondition,
};
pub use provider::{WeatherProvider, provider_from_config, weatherbit::WeatherbitProvider};
