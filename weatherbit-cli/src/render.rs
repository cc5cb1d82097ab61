use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use weatherbit_core::{
    CurrentForApp, CurrentResponse, ForecastForApp, ForecastResponse, Unit, WeatherCondition,
    codes,
};

pub struct Style {
    pub json: bool,
    pub korean: bool,
}

impl Style {
    fn describe(&self, weather: &WeatherCondition) -> String {
        if self.korean
            && let Some(text) = codes::korean_description(weather.code)
        {
            return text.to_string();
        }
        if weather.description.is_empty() {
            codes::localized_description(weather.code).unwrap_or("Unknown").to_string()
        } else {
            weather.description.clone()
        }
    }
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or("?")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn current(
    style: &Style,
    unit: Unit,
    reference: Tz,
    response: &CurrentResponse,
) -> anyhow::Result<()> {
    if style.json {
        return print_json(response);
    }

    if response.data.is_empty() {
        println!("No observations.");
        return Ok(());
    }

    let t = unit.temperature_suffix();
    for obs in &response.data {
        let observed = obs
            .ts
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.with_timezone(&reference).format("%Y-%m-%d %H:%M %Z").to_string())
            .unwrap_or_else(|| obs.ob_time.clone().unwrap_or_else(|| obs.datetime.clone()));

        let city = or_unknown(obs.city_name.as_deref());
        print!("{city}, {}", or_unknown(obs.country_code.as_deref()));
        match (obs.lat, obs.lon) {
            (Some(lat), Some(lon)) => println!(" ({lat:.4}, {lon:.4})"),
            _ => println!(),
        }
        println!("  observed:   {observed}");
        println!("  condition:  {} [{}]", style.describe(&obs.weather), obs.weather.icon);
        match obs.app_temp {
            Some(feels) => println!("  temp:       {:.1}{t} (feels like {feels:.1}{t})", obs.temp),
            None => println!("  temp:       {:.1}{t}", obs.temp),
        }
        if let Some(rh) = obs.rh {
            println!("  humidity:   {rh:.0}%");
        }
        if let Some(speed) = obs.wind_spd {
            let direction = obs.wind_cdir_full.as_deref().unwrap_or_default();
            println!("  wind:       {speed:.1} {direction}");
        }
        println!("  sun:        {} - {}", obs.sunrise, obs.sunset);
    }
    Ok(())
}

pub fn forecast(style: &Style, unit: Unit, response: &ForecastResponse) -> anyhow::Result<()> {
    if style.json {
        return print_json(response);
    }

    let t = unit.temperature_suffix();
    println!(
        "{}, {}",
        or_unknown(response.city_name.as_deref()),
        or_unknown(response.country_code.as_deref())
    );
    for day in &response.data {
        let rain = day.pop.map(|pop| format!("{pop:>3.0}% rain")).unwrap_or_default();
        let condition = day.weather.as_ref().map(|w| style.describe(w)).unwrap_or_default();
        println!(
            "  {}  {:>6.1}{t} / {:>6.1}{t}  {rain:>8}  {condition}",
            day.valid_date, day.min_temp, day.max_temp,
        );
    }
    Ok(())
}

pub fn summary(
    style: &Style,
    unit: Unit,
    current: &CurrentForApp,
    forecast: &ForecastForApp,
) -> anyhow::Result<()> {
    if style.json {
        return print_json(&serde_json::json!({
            "current": current.summary,
            "forecast": forecast.summary,
        }));
    }

    let t = unit.temperature_suffix();
    let now = &current.summary;
    let today = &forecast.summary;
    println!("{} [{}]", style.describe(&now.weather), now.weather.icon);
    println!("  now:      {:.1}{t}", now.temperature);
    println!(
        "  {}: {:.1}{t} / {:.1}{t}",
        today.date, today.minimum_temperature, today.maximum_temperature
    );
    println!("  sunrise:  {}", now.sunrise.format("%H:%M %:z"));
    println!("  sunset:   {}", now.sunset.format("%H:%M %:z"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_sky(description: &str) -> WeatherCondition {
        WeatherCondition { icon: "c01d".into(), code: 800, description: description.into() }
    }

    #[test]
    fn korean_style_prefers_korean_table() {
        let style = Style { json: false, korean: true };
        assert_eq!(style.describe(&clear_sky("Clear sky")), "맑음");
    }

    #[test]
    fn korean_style_falls_back_for_unknown_codes() {
        let style = Style { json: false, korean: true };
        let weather = WeatherCondition { code: 1, ..clear_sky("Mystery") };
        assert_eq!(style.describe(&weather), "Mystery");
    }

    #[test]
    fn plain_style_uses_reported_description() {
        let style = Style { json: false, korean: false };
        assert_eq!(style.describe(&clear_sky("Ciel dégagé")), "Ciel dégagé");
    }
}
