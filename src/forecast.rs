use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    FreezingRain,
    Snow,
    Showers,
    Thunderstorm,
    #[default]
    Unknown,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition.
    /// Code 1 ("mainly clear") reads as partly cloudy by day and clear at night.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32, is_day: bool) -> Self {
        match code {
            0 => Self::Clear,
            1 if is_day => Self::PartlyCloudy,
            1 => Self::Clear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 | 66 | 67 => Self::FreezingRain,
            61 | 63 | 65 => Self::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            80..=82 => Self::Showers,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::FreezingRain => "Freezing Rain",
            Self::Snow => "Snow",
            Self::Showers => "Showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}

/// Hourly forecast entry. Temperatures are kept in Celsius; see [crate::TemperatureUnit]
/// for display conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: DateTime<FixedOffset>,
    pub temperature: f64,
    pub condition: WeatherCondition,
    /// Millimetres expected during the hour.
    pub precipitation: f64,
    /// Chance of precipitation, 0-100.
    pub precipitation_probability: u8,
}

impl HourlyForecast {
    pub fn new(time: DateTime<FixedOffset>, temperature: f64) -> Self {
        Self {
            time,
            temperature,
            condition: WeatherCondition::default(),
            precipitation: 0.0,
            precipitation_probability: 0,
        }
    }

    pub fn with_condition(mut self, condition: WeatherCondition) -> Self {
        self.condition = condition;
        self
    }

    pub fn with_precipitation(mut self, precipitation: f64, probability: u8) -> Self {
        self.precipitation = precipitation;
        self.precipitation_probability = probability.min(100);
        self
    }
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub condition: WeatherCondition,
    pub high: f64,
    pub low: f64,
    /// Millimetres expected over the day.
    pub precipitation: f64,
    /// Highest hourly chance of precipitation, 0-100.
    pub precipitation_probability: u8,
    pub sunrise: Option<DateTime<FixedOffset>>,
    pub sunset: Option<DateTime<FixedOffset>>,
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub time: DateTime<FixedOffset>,
    pub temperature: f64,
    pub feels_like: f64,
    pub condition: WeatherCondition,
    /// km/h
    pub wind_speed: f64,
    /// Degrees the wind blows from.
    pub wind_direction: f64,
    pub is_day: bool,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
    /// Surface pressure in hPa.
    pub pressure: Option<f64>,
    /// Metres
    pub visibility: Option<f64>,
    pub uv_index: Option<f64>,
}

/// Place returned by a location search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    /// First-level administrative area, such as a state or region.
    pub admin1: Option<String>,
    pub timezone: Option<String>,
}

impl Location {
    /// Name followed by whichever of region and country are known, e.g. "Berlin, Land Berlin, Germany".
    pub fn display_name(&self) -> String {
        let mut parts = vec![self.name.as_str()];
        parts.extend(self.admin1.as_deref());
        parts.extend(self.country.as_deref());
        parts.join(", ")
    }
}
