//! Icon code to display token mapping
//!
//! OpenWeatherMap tags every condition with a short icon code ("01d", "10n", ...).
//! The widget maps those onto a small set of pictograms.

use serde::Serialize;

/// Pictogram shown for a weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    Sun,
    Moon,
    CloudSun,
    CloudMoon,
    Cloud,
    CloudRain,
    CloudSunRain,
    CloudMoonRain,
    Bolt,
    Snowflake,
    Smog,
}

impl WeatherIcon {
    /// Stable display token, e.g. "cloud-sun"
    pub fn token(&self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::CloudSun => "cloud-sun",
            Self::CloudMoon => "cloud-moon",
            Self::Cloud => "cloud",
            Self::CloudRain => "cloud-rain",
            Self::CloudSunRain => "cloud-sun-rain",
            Self::CloudMoonRain => "cloud-moon-rain",
            Self::Bolt => "bolt",
            Self::Snowflake => "snowflake",
            Self::Smog => "smog",
        }
    }

    /// Terminal pictogram
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sun => "\u{2600}",            // ☀
            Self::Moon => "\u{263E}",           // ☾
            Self::CloudSun => "\u{26C5}",       // ⛅
            Self::CloudMoon => "\u{2601}",      // ☁
            Self::Cloud => "\u{2601}",          // ☁
            Self::CloudRain => "\u{1F327}",     // 🌧
            Self::CloudSunRain => "\u{1F326}",  // 🌦
            Self::CloudMoonRain => "\u{1F327}", // 🌧
            Self::Bolt => "\u{26A1}",           // ⚡
            Self::Snowflake => "\u{2744}",      // ❄
            Self::Smog => "\u{1F32B}",          // 🌫
        }
    }
}

/// Maps an icon code to its pictogram.
///
/// Total over arbitrary input: anything outside the known vocabulary maps to
/// [`WeatherIcon::Cloud`].
pub fn lookup_icon_class(icon_code: &str) -> WeatherIcon {
    match icon_code {
        "01d" => WeatherIcon::Sun,
        "01n" => WeatherIcon::Moon,
        "02d" => WeatherIcon::CloudSun,
        "02n" => WeatherIcon::CloudMoon,
        "03d" | "03n" | "04d" | "04n" => WeatherIcon::Cloud,
        "09d" | "09n" => WeatherIcon::CloudRain,
        "10d" => WeatherIcon::CloudSunRain,
        "10n" => WeatherIcon::CloudMoonRain,
        "11d" | "11n" => WeatherIcon::Bolt,
        "13d" | "13n" => WeatherIcon::Snowflake,
        "50d" | "50n" => WeatherIcon::Smog,
        _ => WeatherIcon::Cloud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_mapping_known_codes() {
        assert_eq!(lookup_icon_class("01d"), WeatherIcon::Sun);
        assert_eq!(lookup_icon_class("01n"), WeatherIcon::Moon);
        assert_eq!(lookup_icon_class("02d"), WeatherIcon::CloudSun);
        assert_eq!(lookup_icon_class("02n"), WeatherIcon::CloudMoon);
        assert_eq!(lookup_icon_class("03d"), WeatherIcon::Cloud);
        assert_eq!(lookup_icon_class("04n"), WeatherIcon::Cloud);
        assert_eq!(lookup_icon_class("09d"), WeatherIcon::CloudRain);
        assert_eq!(lookup_icon_class("10d"), WeatherIcon::CloudSunRain);
        assert_eq!(lookup_icon_class("10n"), WeatherIcon::CloudMoonRain);
        assert_eq!(lookup_icon_class("11n"), WeatherIcon::Bolt);
        assert_eq!(lookup_icon_class("13d"), WeatherIcon::Snowflake);
        assert_eq!(lookup_icon_class("50n"), WeatherIcon::Smog);
    }

    #[test]
    fn test_icon_mapping_unknown_defaults_to_cloud() {
        assert_eq!(lookup_icon_class("99z"), WeatherIcon::Cloud);
        assert_eq!(lookup_icon_class(""), WeatherIcon::Cloud);
        assert_eq!(lookup_icon_class("01D"), WeatherIcon::Cloud);
        assert_eq!(lookup_icon_class("01d "), WeatherIcon::Cloud);
        assert_eq!(lookup_icon_class("\u{1F327}"), WeatherIcon::Cloud);
    }

    #[test]
    fn test_icon_tokens() {
        assert_eq!(lookup_icon_class("01d").token(), "sun");
        assert_eq!(lookup_icon_class("99z").token(), "cloud");
        assert_eq!(WeatherIcon::CloudSunRain.token(), "cloud-sun-rain");
    }

    #[test]
    fn test_every_icon_has_a_glyph() {
        let icons = [
            WeatherIcon::Sun,
            WeatherIcon::Moon,
            WeatherIcon::CloudSun,
            WeatherIcon::CloudMoon,
            WeatherIcon::Cloud,
            WeatherIcon::CloudRain,
            WeatherIcon::CloudSunRain,
            WeatherIcon::CloudMoonRain,
            WeatherIcon::Bolt,
            WeatherIcon::Snowflake,
            WeatherIcon::Smog,
        ];
        for icon in icons {
            assert!(!icon.glyph().is_empty());
            assert!(!icon.token().is_empty());
        }
    }
}
