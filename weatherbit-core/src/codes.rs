//! Weatherbit condition codes and their icon pairs.
//!
//! See <https://www.weatherbit.io/api/codes>.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCode {
    pub code: u16,
    pub description: &'static str,
    pub day_icon: &'static str,
    pub night_icon: &'static str,
}

const fn entry(
    code: u16,
    description: &'static str,
    day_icon: &'static str,
    night_icon: &'static str,
) -> WeatherCode {
    WeatherCode { code, description, day_icon, night_icon }
}

pub static WEATHER_CODES: &[WeatherCode] = &[
    entry(200, "Thunderstorm with light rain", "t01d", "t01n"),
    entry(201, "Thunderstorm with rain", "t02d", "t02n"),
    entry(202, "Thunderstorm with heavy rain", "t03d", "t03n"),
    entry(230, "Thunderstorm with light drizzle", "t04d", "t04n"),
    entry(231, "Thunderstorm with drizzle", "t04d", "t04n"),
    entry(232, "Thunderstorm with heavy drizzle", "t04d", "t04n"),
    entry(233, "Thunderstorm with Hail", "t05d", "t05n"),
    entry(300, "Light Drizzle", "d01d", "d01n"),
    entry(301, "Drizzle", "d02d", "d02n"),
    entry(302, "Heavy Drizzle", "d03d", "d03n"),
    entry(500, "Light Rain", "r01d", "r01n"),
    entry(501, "Moderate Rain", "r02d", "r02n"),
    entry(502, "Heavy Rain", "r03d", "r03n"),
    entry(511, "Freezing rain", "f01d", "f01n"),
    entry(520, "Light shower rain", "r04d", "r04n"),
    entry(521, "Shower rain", "r05d", "r05n"),
    entry(522, "Heavy shower rain", "r06d", "r06n"),
    entry(600, "Light snow", "s01d", "s01n"),
    entry(601, "Snow", "s02d", "s02n"),
    entry(602, "Heavy Snow", "s03d", "s03n"),
    entry(610, "Mix snow/rain", "s04d", "s04n"),
    entry(611, "Sleet", "s05d", "s05n"),
    entry(612, "Heavy sleet", "s05d", "s05n"),
    entry(621, "Snow shower", "s01d", "s01n"),
    entry(622, "Heavy snow shower", "s02d", "s02n"),
    entry(623, "Flurries", "s06d", "s06n"),
    entry(700, "Mist", "a01d", "a01n"),
    entry(711, "Smoke", "a02d", "a02n"),
    entry(721, "Haze", "a03d", "a03n"),
    entry(731, "Sand/dust", "a04d", "a04n"),
    entry(741, "Fog", "a05d", "a05n"),
    entry(751, "Freezing Fog", "a06d", "a06n"),
    entry(800, "Clear sky", "c01d", "c01n"),
    entry(801, "Few clouds", "c02d", "c02n"),
    entry(802, "Scattered clouds", "c02d", "c02n"),
    entry(803, "Broken clouds", "c03d", "c03n"),
    entry(804, "Overcast clouds", "c04d", "c04n"),
    entry(900, "Unknown Precipitation", "u00d", "u00n"),
];

/// Look up a condition code.
pub fn lookup(code: u16) -> Option<&'static WeatherCode> {
    WEATHER_CODES.iter().find(|c| c.code == code)
}

/// Korean description for a condition code, when one exists.
pub fn korean_description(code: u16) -> Option<&'static str> {
    let text = match code {
        200 => "뇌우(약한 비)",
        201 => "뇌우(비)",
        202 => "뇌우(폭우)",
        230 => "뇌우(가벼운 이슬비)",
        231 => "뇌우(이슬비)",
        232 => "뇌우(강한 이슬비)",
        233 => "뇌우(우박)",
        300 => "가벼운 이슬비",
        301 => "이슬비",
        302 => "강한 이슬비",
        500 => "약한 비",
        501 => "온건한 비",
        502 => "폭우",
        511 => "얼어붙는 비",
        520 => "가벼운 소나기",
        521 => "소나기",
        522 => "폭우",
        600 => "약한 눈",
        601 => "눈",
        602 => "폭설",
        610 => "진눈깨비",
        611 => "진눈깨비",
        612 => "심한 진눈깨비",
        621 => "눈",
        622 => "폭설",
        623 => "강풍",
        700 => "엷은 안개",
        711 => "스모그",
        721 => "안개(연무)",
        731 => "황사",
        741 => "안개",
        751 => "착빙성 안개",
        800 => "맑음",
        801..=803 => "약간 흐림",
        804 => "흐림",
        _ => return None,
    };
    Some(text)
}

/// Korean description if known, otherwise the English one from the table.
pub fn localized_description(code: u16) -> Option<&'static str> {
    korean_description(code).or_else(|| lookup(code).map(|c| c.description))
}

impl WeatherCode {
    pub fn icon_for(&self, daytime: bool) -> &'static str {
        if daytime { self.day_icon } else { self.night_icon }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_code_has_description_and_two_icons() {
        for c in WEATHER_CODES {
            assert!(!c.description.is_empty(), "code {} has no description", c.code);
            assert!(c.day_icon.ends_with('d'), "code {} day icon {}", c.code, c.day_icon);
            assert!(c.night_icon.ends_with('n'), "code {} night icon {}", c.code, c.night_icon);
            assert_eq!(c.day_icon[..3], c.night_icon[..3]);
        }
    }

    #[test]
    fn codes_are_unique() {
        let mut seen = HashSet::new();
        for c in WEATHER_CODES {
            assert!(seen.insert(c.code), "duplicate code {}", c.code);
        }
    }

    #[test]
    fn lookup_known_and_unknown() {
        let clear = lookup(800).expect("800 is in the table");
        assert_eq!(clear.description, "Clear sky");
        assert_eq!(clear.icon_for(true), "c01d");
        assert_eq!(clear.icon_for(false), "c01n");

        assert!(lookup(999).is_none());
    }

    #[test]
    fn korean_falls_back_to_english() {
        assert_eq!(localized_description(800), Some("맑음"));
        assert_eq!(localized_description(802), Some("약간 흐림"));
        assert_eq!(localized_description(900), Some("Unknown Precipitation"));
        assert_eq!(localized_description(1), None);
    }
}
