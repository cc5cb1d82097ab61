use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Part of the day as reported (or derived) for an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartOfDay {
    #[serde(rename = "d")]
    Day,
    #[serde(rename = "n")]
    Night,
}

impl PartOfDay {
    pub fn as_char(&self) -> char {
        match self {
            PartOfDay::Day => 'd',
            PartOfDay::Night => 'n',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub icon: String,
    pub code: u16,
    pub description: String,
}

/// `GET /current` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentResponse {
    pub count: i64,
    pub data: Vec<CurrentObservation>,
}

/// One reporting station's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentObservation {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Sunrise, `HH:MM`, no date component.
    pub sunrise: String,
    /// Sunset, `HH:MM`, no date component.
    pub sunset: String,
    /// Local IANA timezone name.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub station: Option<String>,
    /// Last observation time, `YYYY-MM-DD HH:MM`.
    #[serde(default)]
    pub ob_time: Option<String>,
    /// Current cycle hour, `YYYY-MM-DD:HH`.
    pub datetime: String,
    /// Last observation time as a Unix timestamp.
    #[serde(default)]
    pub ts: Option<i64>,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    /// Pressure (mb).
    #[serde(default)]
    pub pres: Option<f64>,
    /// Sea level pressure (mb).
    #[serde(default)]
    pub slp: Option<f64>,
    #[serde(default)]
    pub wind_spd: Option<f64>,
    #[serde(default)]
    pub wind_dir: Option<f64>,
    #[serde(default)]
    pub wind_cdir: Option<String>,
    #[serde(default)]
    pub wind_cdir_full: Option<String>,
    pub temp: f64,
    #[serde(default)]
    pub app_temp: Option<f64>,
    /// Relative humidity (%).
    #[serde(default)]
    pub rh: Option<f64>,
    #[serde(default)]
    pub dewpt: Option<f64>,
    /// Cloud coverage (%).
    #[serde(default)]
    pub clouds: Option<f64>,
    #[serde(default)]
    pub pod: Option<PartOfDay>,
    pub weather: WeatherCondition,
    /// Visibility (km by default).
    #[serde(default)]
    pub vis: Option<f64>,
    #[serde(default)]
    pub precip: Option<f64>,
    #[serde(default)]
    pub snow: Option<f64>,
    #[serde(default)]
    pub uv: Option<f64>,
    #[serde(default)]
    pub aqi: Option<f64>,
    #[serde(default)]
    pub dhi: Option<f64>,
    #[serde(default)]
    pub dni: Option<f64>,
    #[serde(default)]
    pub ghi: Option<f64>,
    #[serde(default)]
    pub solar_rad: Option<f64>,
    #[serde(default)]
    pub elev_angle: Option<f64>,
    #[serde(default)]
    pub h_angle: Option<f64>,
}

/// `GET /forecast/daily` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub data: Vec<ForecastDay>,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
}

/// One calendar day of the daily forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// `YYYY-MM-DD`, midnight to midnight local time.
    pub valid_date: String,
    #[serde(default)]
    pub ts: Option<i64>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub wind_gust_spd: Option<f64>,
    #[serde(default)]
    pub wind_spd: Option<f64>,
    #[serde(default)]
    pub wind_dir: Option<f64>,
    #[serde(default)]
    pub wind_cdir: Option<String>,
    #[serde(default)]
    pub wind_cdir_full: Option<String>,
    /// Average temperature.
    #[serde(default)]
    pub temp: Option<f64>,
    pub max_temp: f64,
    pub min_temp: f64,
    /// 6AM to 6AM local high.
    #[serde(default)]
    pub high_temp: Option<f64>,
    /// 6AM to 6AM local low.
    #[serde(default)]
    pub low_temp: Option<f64>,
    #[serde(default)]
    pub app_max_temp: Option<f64>,
    #[serde(default)]
    pub app_min_temp: Option<f64>,
    /// Probability of precipitation (%).
    #[serde(default)]
    pub pop: Option<f64>,
    #[serde(default)]
    pub precip: Option<f64>,
    #[serde(default)]
    pub snow: Option<f64>,
    #[serde(default)]
    pub snow_depth: Option<f64>,
    #[serde(default)]
    pub pres: Option<f64>,
    #[serde(default)]
    pub slp: Option<f64>,
    #[serde(default)]
    pub dewpt: Option<f64>,
    #[serde(default)]
    pub rh: Option<f64>,
    #[serde(default)]
    pub weather: Option<WeatherCondition>,
    #[serde(default)]
    pub pod: Option<PartOfDay>,
    #[serde(default)]
    pub clouds_low: Option<f64>,
    #[serde(default)]
    pub clouds_mid: Option<f64>,
    #[serde(default)]
    pub clouds_hi: Option<f64>,
    #[serde(default)]
    pub clouds: Option<f64>,
    #[serde(default)]
    pub vis: Option<f64>,
    #[serde(default)]
    pub max_dhi: Option<f64>,
    #[serde(default)]
    pub uv: Option<f64>,
    #[serde(default)]
    pub ozone: Option<f64>,
    #[serde(default)]
    pub moon_phase: Option<f64>,
    #[serde(default)]
    pub moon_phase_lunation: Option<f64>,
    #[serde(default)]
    pub moonrise_ts: Option<i64>,
    #[serde(default)]
    pub moonset_ts: Option<i64>,
    #[serde(default)]
    pub sunrise_ts: Option<i64>,
    #[serde(default)]
    pub sunset_ts: Option<i64>,
}

/// Current weather reduced for the application: icon corrected for
/// day/night, sunrise/sunset stamped onto today in the reference timezone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSummary {
    pub weather: WeatherCondition,
    pub temperature: f64,
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSummary {
    pub date: String,
    pub minimum_temperature: f64,
    pub maximum_temperature: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentForApp {
    pub original: CurrentResponse,
    pub summary: CurrentSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastForApp {
    pub original: ForecastResponse,
    pub summary: ForecastSummary,
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn observation_roundtrip_is_lossless() {
        let obs: CurrentObservation =
            serde_json::from_value(observation_json()).expect("fixture must decode");

        let encoded = serde_json::to_string(&obs).expect("serialize");
        let decoded: CurrentObservation = serde_json::from_str(&encoded).expect("deserialize");

        assert_eq!(obs, decoded);
        assert_eq!(decoded.weather.icon, "c01n");
        assert_eq!(decoded.pod, Some(PartOfDay::Day));
    }

    #[test]
    fn observation_tolerates_null_optional_fields() {
        let mut raw = observation_json();
        raw["aqi"] = serde_json::Value::Null;
        raw["station"] = serde_json::Value::Null;
        raw.as_object_mut().expect("object").remove("h_angle");

        let obs: CurrentObservation = serde_json::from_value(raw).expect("decode");
        assert_eq!(obs.aqi, None);
        assert_eq!(obs.station, None);
        assert_eq!(obs.h_angle, None);
    }

    #[test]
    fn sparse_observation_decodes() {
        let raw = serde_json::json!({
            "lat": 36.0,
            "lon": 127.0,
            "sunrise": "06:00",
            "sunset": "18:00",
            "timezone": "Asia/Seoul",
            "datetime": "2024-01-05:03",
            "ts": 1704423600,
            "temp": -1.5,
            "weather": { "icon": "c01n", "code": 800, "description": "Clear sky" },
            "vis": null
        });

        let obs: CurrentObservation = serde_json::from_value(raw).expect("decode");
        assert_eq!(obs.vis, None);
        assert_eq!(obs.city_name, None);
        assert_eq!(obs.pod, None);
        assert_eq!(obs.temp, -1.5);
    }

    #[test]
    fn sparse_forecast_day_decodes() {
        let raw = serde_json::json!({
            "valid_date": "2024-01-05",
            "min_temp": -3.0,
            "max_temp": 5.0,
            "pop": null
        });

        let day: ForecastDay = serde_json::from_value(raw).expect("decode");
        assert_eq!(day.pop, None);
        assert_eq!(day.weather, None);
    }

    #[test]
    fn forecast_day_decodes_and_respects_min_max() {
        let day: ForecastDay =
            serde_json::from_value(forecast_day_json("2024-01-05", -3.0, 5.0)).expect("decode");
        assert_eq!(day.valid_date, "2024-01-05");
        assert!(day.min_temp <= day.max_temp);
        assert_eq!(day.max_dhi, None);
    }

    #[test]
    fn summaries_serialize_camel_case() {
        let summary = ForecastSummary {
            date: "2024-01-05".into(),
            minimum_temperature: -3.0,
            maximum_temperature: 5.0,
        };
        let value = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(value["minimumTemperature"], -3.0);
        assert_eq!(value["maximumTemperature"], 5.0);
    }
}
