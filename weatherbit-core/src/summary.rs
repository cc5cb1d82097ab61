//! Reduce whole API responses to the views the application consumes.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{
    daynight::{self, SolarClock},
    error::{Error, Result},
    forecast,
    model::{
        CurrentForApp, CurrentResponse, CurrentSummary, ForecastForApp, ForecastResponse,
        WeatherCondition,
    },
};

/// First observation with its icon corrected for day/night at `now`.
///
/// A response with `count <= 0` or no rows is an empty result; nothing else
/// in it is looked at.
pub fn summarize_current(
    response: CurrentResponse,
    reference: Tz,
    now: DateTime<Utc>,
) -> Result<CurrentForApp> {
    let first = match response.data.first() {
        Some(obs) if response.count > 0 => obs,
        _ => {
            tracing::warn!(count = response.count, "current weather response is empty");
            return Err(Error::empty_result("current weather response contained no data"));
        }
    };

    let resolved = daynight::resolve(SolarClock::from(first), &first.weather.icon, reference, now)?;

    let summary = CurrentSummary {
        weather: WeatherCondition {
            icon: resolved.icon,
            code: first.weather.code,
            description: first.weather.description.clone(),
        },
        temperature: first.temp,
        sunrise: resolved.sunrise.fixed_offset(),
        sunset: resolved.sunset.fixed_offset(),
    };

    Ok(CurrentForApp { original: response, summary })
}

/// First forecast day reduced to its date and temperature extremes.
pub fn summarize_forecast(response: ForecastResponse) -> Result<ForecastForApp> {
    let Some(first) = response.data.first() else {
        tracing::warn!("daily forecast response is empty");
        return Err(Error::empty_result("daily forecast response contained no data"));
    };

    let summary = forecast::project(first);
    Ok(ForecastForApp { original: response, summary })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        model::fixtures::{forecast_day_json, observation_json},
    };
    use chrono::TimeZone;
    use serde_json::json;

    const SEOUL: Tz = chrono_tz::Asia::Seoul;

    fn current(count: i64, sunrise: &str, sunset: &str) -> CurrentResponse {
        let mut obs = observation_json();
        obs["sunrise"] = json!(sunrise);
        obs["sunset"] = json!(sunset);
        serde_json::from_value(json!({ "count": count, "data": [obs] })).expect("decode")
    }

    fn seoul_noon() -> DateTime<Utc> {
        SEOUL.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).single().expect("valid").with_timezone(&Utc)
    }

    #[test]
    fn current_summary_corrects_icon_and_keeps_original() {
        let response = current(1, "07:40", "17:30");
        let out = summarize_current(response.clone(), SEOUL, seoul_noon()).unwrap();

        assert_eq!(out.summary.weather.icon, "c01d");
        assert_eq!(out.summary.weather.code, 800);
        assert_eq!(out.summary.weather.description, "Clear sky");
        assert_eq!(out.summary.temperature, -1.5);
        assert_eq!(out.summary.sunrise.to_rfc3339(), "2024-01-05T07:40:00+09:00");
        assert_eq!(out.summary.sunset.to_rfc3339(), "2024-01-05T17:30:00+09:00");
        assert_eq!(out.original, response);
    }

    #[test]
    fn zero_count_is_empty_even_with_rows() {
        let err = summarize_current(current(0, "07:40", "17:30"), SEOUL, seoul_noon()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
    }

    #[test]
    fn no_rows_is_empty_without_touching_fields() {
        let response = CurrentResponse { count: 3, data: vec![] };
        let err = summarize_current(response, SEOUL, seoul_noon()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
    }

    #[test]
    fn bad_sunrise_is_parse_error() {
        let err = summarize_current(current(1, "--:--", "17:30"), SEOUL, seoul_noon()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    fn forecast(days: Vec<serde_json::Value>) -> ForecastResponse {
        serde_json::from_value(json!({
            "data": days,
            "city_name": "Daejeon",
            "timezone": "Asia/Seoul",
            "lon": 127.0,
            "lat": 36.0,
            "country_code": "KR",
            "state_code": "17"
        }))
        .expect("decode")
    }

    #[test]
    fn forecast_summary_uses_first_day() {
        let response = forecast(vec![
            forecast_day_json("2024-01-05", -3.0, 5.0),
            forecast_day_json("2024-01-06", -1.0, 7.0),
        ]);
        let out = summarize_forecast(response).unwrap();

        assert_eq!(out.summary.date, "2024-01-05");
        assert_eq!(out.summary.minimum_temperature, -3.0);
        assert_eq!(out.summary.maximum_temperature, 5.0);
        assert_eq!(out.original.data.len(), 2);
    }

    #[test]
    fn empty_forecast_is_empty_result() {
        let err = summarize_forecast(forecast(vec![])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyResult);
    }
}
