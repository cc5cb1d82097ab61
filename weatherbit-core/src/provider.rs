use crate::{
    Config,
    error::{Error, Result},
    model::{CurrentForApp, CurrentResponse, ForecastForApp, ForecastResponse},
    provider::weatherbit::WeatherbitProvider,
    summary,
};
use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use std::fmt::{self, Debug};

pub mod weatherbit;

/// Longest daily forecast the API serves.
pub const MAX_FORECAST_DAYS: u8 = 16;

/// API path below the version segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Current,
    ForecastDaily,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Current => "current",
            Endpoint::ForecastDaily => "forecast/daily",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reject a forecast length outside `1..=16` before anything goes on the wire.
pub fn validate_days(days: u8) -> Result<()> {
    if (1..=MAX_FORECAST_DAYS).contains(&days) {
        Ok(())
    } else {
        Err(Error::invalid_input(format!(
            "forecast days must be between 1 and {MAX_FORECAST_DAYS}, got {days}"
        )))
    }
}

/// Current conditions and daily forecast, raw and reduced.
///
/// Implementors supply the raw calls; the `*_for_app_*` views are built on
/// top of them and pass domain errors through unchanged.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Timezone "now" is evaluated in for the day/night decision.
    fn reference_timezone(&self) -> Tz;

    async fn now_by_coordinates(&self, latitude: f64, longitude: f64) -> Result<CurrentResponse>;

    async fn now_by_city_name(
        &self,
        city: &str,
        state: Option<&str>,
        country: Option<&str>,
    ) -> Result<CurrentResponse>;

    async fn now_by_postal_code(
        &self,
        postal_code: &str,
        country: Option<&str>,
    ) -> Result<CurrentResponse>;

    /// Current conditions for several Weatherbit city ids in one request.
    async fn now_by_cities(&self, city_ids: &[&str]) -> Result<CurrentResponse>;

    async fn forecast_daily_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        days: u8,
    ) -> Result<ForecastResponse>;

    /// Current conditions with the icon corrected for day/night.
    async fn current_for_app_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentForApp> {
        let response = self.now_by_coordinates(latitude, longitude).await?;
        summary::summarize_current(response, self.reference_timezone(), Utc::now())
    }

    /// Today's minimum and maximum temperature.
    async fn forecast_for_app_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastForApp> {
        let response = self.forecast_daily_by_coordinates(latitude, longitude, 1).await?;
        summary::summarize_forecast(response)
    }
}

/// Construct the Weatherbit provider from the stored configuration.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let client_config = config.client_config()?;
    let provider = WeatherbitProvider::new(client_config)?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, model::fixtures::forecast_day_json};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn endpoint_paths() {
        assert_eq!(Endpoint::Current.as_str(), "current");
        assert_eq!(Endpoint::ForecastDaily.to_string(), "forecast/daily");
    }

    #[test]
    fn days_range_is_inclusive() {
        assert!(validate_days(1).is_ok());
        assert!(validate_days(16).is_ok());
        assert_eq!(validate_days(0).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(validate_days(17).unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let err = provider_from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let cfg = Config { api_key: Some("KEY".into()), ..Config::default() };
        let provider = provider_from_config(&cfg).expect("configured");
        assert_eq!(provider.reference_timezone(), chrono_tz::Asia::Seoul);
    }

    /// Serves canned responses and counts forecast calls.
    #[derive(Debug, Default)]
    struct Canned {
        forecast_days: Vec<serde_json::Value>,
        forecast_calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for Canned {
        fn reference_timezone(&self) -> Tz {
            chrono_tz::Asia::Seoul
        }

        async fn now_by_coordinates(&self, _: f64, _: f64) -> Result<CurrentResponse> {
            Ok(CurrentResponse { count: 0, data: vec![] })
        }

        async fn now_by_city_name(
            &self,
            _: &str,
            _: Option<&str>,
            _: Option<&str>,
        ) -> Result<CurrentResponse> {
            Err(Error::unhandled("not canned"))
        }

        async fn now_by_postal_code(&self, _: &str, _: Option<&str>) -> Result<CurrentResponse> {
            Err(Error::unhandled("not canned"))
        }

        async fn now_by_cities(&self, _: &[&str]) -> Result<CurrentResponse> {
            Err(Error::unhandled("not canned"))
        }

        async fn forecast_daily_by_coordinates(
            &self,
            _: f64,
            _: f64,
            days: u8,
        ) -> Result<ForecastResponse> {
            assert_eq!(days, 1);
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            Ok(serde_json::from_value(json!({
                "data": self.forecast_days,
                "city_name": "Daejeon",
                "timezone": "Asia/Seoul",
                "lon": 127.0,
                "lat": 36.0,
                "country_code": "KR"
            }))
            .expect("decode"))
        }
    }

    #[tokio::test]
    async fn current_for_app_reports_empty_result() {
        let provider = Canned::default();
        let err = provider.current_for_app_by_coordinates(36.0, 127.0).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
    }

    #[tokio::test]
    async fn forecast_for_app_requests_one_day() {
        let provider = Canned {
            forecast_days: vec![forecast_day_json("2024-01-05", -3.0, 5.0)],
            ..Canned::default()
        };
        let out = provider.forecast_for_app_by_coordinates(36.0, 127.0).await.unwrap();

        assert_eq!(out.summary.date, "2024-01-05");
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn forecast_for_app_reports_empty_result() {
        let provider = Canned::default();
        let err = provider.forecast_for_app_by_coordinates(36.0, 127.0).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
    }
}
