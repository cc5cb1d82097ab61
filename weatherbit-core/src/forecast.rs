use crate::model::{ForecastDay, ForecastSummary};

/// Pick the date and the min/max temperatures out of one forecast day.
pub fn project(day: &ForecastDay) -> ForecastSummary {
    ForecastSummary {
        date: day.valid_date.clone(),
        minimum_temperature: day.min_temp,
        maximum_temperature: day.max_temp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::forecast_day_json;

    #[test]
    fn projects_date_and_extremes() {
        let day: ForecastDay =
            serde_json::from_value(forecast_day_json("2024-01-05", -3.0, 5.0)).expect("decode");

        let summary = project(&day);

        assert_eq!(
            summary,
            ForecastSummary {
                date: "2024-01-05".to_string(),
                minimum_temperature: -3.0,
                maximum_temperature: 5.0,
            }
        );
    }
}
