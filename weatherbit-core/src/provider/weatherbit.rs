use async_trait::async_trait;
use chrono_tz::Tz;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    model::{CurrentResponse, ForecastResponse},
    provider::{Endpoint, WeatherProvider, validate_days},
};

pub const API_HOST: &str = "api.weatherbit.io";
pub const API_VERSION: &str = "v2.0";

/// Weatherbit REST client.
///
/// Documentation: <https://www.weatherbit.io/api/weather-current> and
/// <https://www.weatherbit.io/api/weather-forecast-16-day>.
#[derive(Debug, Clone)]
pub struct WeatherbitProvider {
    config: ClientConfig,
    base_url: String,
    http: Client,
}

impl WeatherbitProvider {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = format!("{}://{}/{}", config.schema(), API_HOST, API_VERSION);
        Self::with_base_url(config, &base_url)
    }

    /// Point the provider at another server (a proxy, or a mock in tests).
    pub fn with_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::unhandled(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.as_str())
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<T> {
        let res = self
            .http
            .get(self.url(endpoint))
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("lang", self.config.lang.as_str()),
                ("units", self.config.unit.as_str()),
            ])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key.
                unhandled(endpoint, format!("request failed: {}", e.without_url()))
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            unhandled(endpoint, format!("failed to read response body: {}", e.without_url()))
        })?;

        tracing::debug!(%endpoint, %status, body = %truncate_body(&body), "weatherbit response");

        if status == StatusCode::NO_CONTENT {
            tracing::warn!(%endpoint, "weatherbit returned no content");
            return Err(Error::empty_result(format!("{endpoint} returned no content")));
        }

        if !status.is_success() {
            return Err(unhandled(
                endpoint,
                format!("request failed with status {}: {}", status, truncate_body(&body)),
            ));
        }

        serde_json::from_str(&body)
            .map_err(|e| unhandled(endpoint, format!("failed to parse response JSON: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for WeatherbitProvider {
    fn reference_timezone(&self) -> Tz {
        self.config.reference_timezone
    }

    async fn now_by_coordinates(&self, latitude: f64, longitude: f64) -> Result<CurrentResponse> {
        let params = [("lat", latitude.to_string()), ("lon", longitude.to_string())];
        self.fetch(Endpoint::Current, &params).await
    }

    async fn now_by_city_name(
        &self,
        city: &str,
        state: Option<&str>,
        country: Option<&str>,
    ) -> Result<CurrentResponse> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Error::invalid_input("city name must not be empty"));
        }

        let city = match state {
            Some(state) => format!("{city},{state}"),
            None => city.to_string(),
        };

        let mut params = vec![("city", city)];
        if let Some(country) = country {
            params.push(("country", country.to_string()));
        }
        self.fetch(Endpoint::Current, &params).await
    }

    async fn now_by_postal_code(
        &self,
        postal_code: &str,
        country: Option<&str>,
    ) -> Result<CurrentResponse> {
        let postal_code = postal_code.trim();
        if postal_code.is_empty() {
            return Err(Error::invalid_input("postal code must not be empty"));
        }

        let mut params = vec![("postal_code", postal_code.to_string())];
        if let Some(country) = country {
            params.push(("country", country.to_string()));
        }
        self.fetch(Endpoint::Current, &params).await
    }

    async fn now_by_cities(&self, city_ids: &[&str]) -> Result<CurrentResponse> {
        if city_ids.is_empty() {
            return Err(Error::invalid_input("at least one city id is required"));
        }

        let params = [("cities", city_ids.join(","))];
        self.fetch(Endpoint::Current, &params).await
    }

    async fn forecast_daily_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<ForecastResponse> {
        validate_days(days)?;

        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("days", days.to_string()),
        ];
        self.fetch(Endpoint::ForecastDaily, &params).await
    }
}

/// Log a failure once and collapse it into `Unhandled`.
fn unhandled(endpoint: Endpoint, message: String) -> Error {
    tracing::error!(%endpoint, "{message}");
    Error::unhandled(format!("{endpoint}: {message}"))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
