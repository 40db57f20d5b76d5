//! Decoding of Open-Meteo forecast and geocoding responses.
//!
//! Fetching is left to the caller; this module only maps an already
//! downloaded JSON body onto [HourlyForecast], [DailyForecast],
//! [CurrentWeather] and [Location] records.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::ForecastError;
use crate::forecast::{CurrentWeather, DailyForecast, HourlyForecast, Location, WeatherCondition};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Hours already started this long ago are still shown.
const PAST_HOUR_GRACE_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    #[allow(dead_code)]
    timezone: Option<String>,
    hourly: Option<HourlyBlock>,
    daily: Option<DailyBlock>,
    current: Option<CurrentBlock>,
}

impl ForecastResponse {
    fn offset(&self) -> Result<FixedOffset, ForecastError> {
        FixedOffset::east_opt(self.utc_offset_seconds)
            .ok_or(ForecastError::InvalidOffset(self.utc_offset_seconds))
    }
}

#[derive(Debug, Deserialize)]
struct HourlyBlock {
    time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    temperature: Vec<f64>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability: Vec<Option<u8>>,
    #[serde(default)]
    is_day: Vec<Option<u8>>,
}

impl HourlyBlock {
    fn check_lengths(&self) -> Result<(), ForecastError> {
        let expected = self.time.len();
        check_length("temperature_2m", expected, self.temperature.len(), false)?;
        check_length("weather_code", expected, self.weather_code.len(), true)?;
        check_length("precipitation", expected, self.precipitation.len(), true)?;
        check_length(
            "precipitation_probability",
            expected,
            self.precipitation_probability.len(),
            true,
        )?;
        check_length("is_day", expected, self.is_day.len(), true)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Vec<f64>,
    #[serde(default)]
    weather_code: Vec<Option<i32>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<u8>>,
    // sunrise and sunset may run shorter than the day list (polar days)
    #[serde(default)]
    sunrise: Vec<Option<String>>,
    #[serde(default)]
    sunset: Vec<Option<String>>,
}

impl DailyBlock {
    fn check_lengths(&self) -> Result<(), ForecastError> {
        let expected = self.time.len();
        check_length("temperature_2m_max", expected, self.temperature_max.len(), false)?;
        check_length("temperature_2m_min", expected, self.temperature_min.len(), false)?;
        check_length("weather_code", expected, self.weather_code.len(), true)?;
        check_length("precipitation_sum", expected, self.precipitation_sum.len(), true)?;
        check_length(
            "precipitation_probability_max",
            expected,
            self.precipitation_probability_max.len(),
            true,
        )?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: String,
    #[serde(rename = "temperature_2m")]
    temperature: f64,
    apparent_temperature: Option<f64>,
    weather_code: Option<i32>,
    #[serde(rename = "wind_speed_10m")]
    wind_speed: Option<f64>,
    #[serde(rename = "wind_direction_10m")]
    wind_direction: Option<f64>,
    is_day: Option<u8>,
    #[serde(rename = "relative_humidity_2m")]
    humidity: Option<f64>,
    surface_pressure: Option<f64>,
    visibility: Option<f64>,
    uv_index: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
    #[allow(dead_code)]
    generationtime_ms: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
    timezone: Option<String>,
    #[allow(dead_code)]
    country_code: Option<String>,
}

impl From<GeocodingResult> for Location {
    fn from(result: GeocodingResult) -> Self {
        Location {
            name: result.name,
            latitude: result.latitude,
            longitude: result.longitude,
            country: result.country,
            admin1: result.admin1,
            timezone: result.timezone,
        }
    }
}

// optional series may be omitted altogether, but never truncated
fn check_length(
    field: &'static str,
    expected: usize,
    found: usize,
    optional: bool,
) -> Result<(), ForecastError> {
    if found == expected || (optional && found == 0) {
        return Ok(());
    }
    Err(ForecastError::LengthMismatch { field, expected, found })
}

/// Parse the hourly block of an Open-Meteo forecast response.
///
/// Hours that ended before `now` minus one hour are dropped and at most
/// `hours` entries are returned, in the order the response lists them.
/// Timestamps that cannot be read are skipped.
pub fn parse_hourly(
    json: &str,
    now: DateTime<Utc>,
    hours: usize,
) -> Result<Vec<HourlyForecast>, ForecastError> {
    let response: ForecastResponse = serde_json::from_str(json)?;

    let offset = response.offset()?;
    let hourly = response.hourly.ok_or(ForecastError::MissingData("hourly"))?;
    hourly.check_lengths()?;

    let cutoff = now - Duration::seconds(PAST_HOUR_GRACE_SECS);
    let mut forecasts = Vec::with_capacity(hours.min(hourly.time.len()));

    for (index, raw_time) in hourly.time.iter().enumerate() {
        if forecasts.len() >= hours {
            break;
        }

        let Some(time) = parse_local_time(raw_time, &offset) else {
            tracing::warn!("Skipping hourly entry with unreadable time: {}", raw_time);
            continue;
        };
        if time.with_timezone(&Utc) < cutoff {
            continue;
        }

        let is_day = value_at(&hourly.is_day, index).map_or(true, |flag| flag == 1);
        let condition = value_at(&hourly.weather_code, index)
            .map_or(WeatherCondition::Unknown, |code| {
                WeatherCondition::from_wmo_code(code, is_day)
            });

        forecasts.push(
            HourlyForecast::new(time, hourly.temperature[index])
                .with_condition(condition)
                .with_precipitation(
                    value_at(&hourly.precipitation, index).unwrap_or(0.0),
                    value_at(&hourly.precipitation_probability, index).unwrap_or(0),
                ),
        );
    }

    tracing::debug!(
        "Decoded {} of {} hourly entries",
        forecasts.len(),
        hourly.time.len()
    );
    Ok(forecasts)
}

/// Parse the daily block of an Open-Meteo forecast response.
///
/// At most `days` entries are returned, starting with the first day listed.
/// Days whose date cannot be read are skipped; unreadable sunrise or sunset
/// times are left empty.
pub fn parse_daily(json: &str, days: usize) -> Result<Vec<DailyForecast>, ForecastError> {
    let response: ForecastResponse = serde_json::from_str(json)?;

    let offset = response.offset()?;
    let daily = response.daily.ok_or(ForecastError::MissingData("daily"))?;
    daily.check_lengths()?;

    let mut forecasts = Vec::with_capacity(days.min(daily.time.len()));

    for (index, raw_date) in daily.time.iter().enumerate() {
        if forecasts.len() >= days {
            break;
        }

        let Ok(date) = NaiveDate::parse_from_str(raw_date, DATE_FORMAT) else {
            tracing::warn!("Skipping daily entry with unreadable date: {}", raw_date);
            continue;
        };

        forecasts.push(DailyForecast {
            date,
            condition: value_at(&daily.weather_code, index)
                .map_or(WeatherCondition::Unknown, |code| {
                    WeatherCondition::from_wmo_code(code, true)
                }),
            high: daily.temperature_max[index],
            low: daily.temperature_min[index],
            precipitation: value_at(&daily.precipitation_sum, index).unwrap_or(0.0),
            precipitation_probability: value_at(&daily.precipitation_probability_max, index)
                .unwrap_or(0)
                .min(100),
            sunrise: text_at(&daily.sunrise, index).and_then(|raw| parse_local_time(raw, &offset)),
            sunset: text_at(&daily.sunset, index).and_then(|raw| parse_local_time(raw, &offset)),
        });
    }

    tracing::debug!("Decoded {} of {} daily entries", forecasts.len(), daily.time.len());
    Ok(forecasts)
}

/// Parse the current block of an Open-Meteo forecast response.
///
/// Missing feels-like temperature falls back to the air temperature, missing
/// wind to calm, and a missing day flag to daytime.
pub fn parse_current(json: &str) -> Result<CurrentWeather, ForecastError> {
    let response: ForecastResponse = serde_json::from_str(json)?;

    let offset = response.offset()?;
    let current = response.current.ok_or(ForecastError::MissingData("current"))?;

    let time = parse_local_time(&current.time, &offset)
        .ok_or_else(|| ForecastError::InvalidTime(current.time.clone()))?;
    let is_day = current.is_day.map_or(true, |flag| flag == 1);

    Ok(CurrentWeather {
        time,
        temperature: current.temperature,
        feels_like: current.apparent_temperature.unwrap_or(current.temperature),
        condition: current
            .weather_code
            .map_or(WeatherCondition::Unknown, |code| WeatherCondition::from_wmo_code(code, is_day)),
        wind_speed: current.wind_speed.unwrap_or(0.0),
        wind_direction: current.wind_direction.unwrap_or(0.0),
        is_day,
        humidity: current.humidity,
        pressure: current.surface_pressure,
        visibility: current.visibility,
        uv_index: current.uv_index,
    })
}

/// Parse an Open-Meteo geocoding search response.
///
/// A response without matches carries no `results` key at all and yields an
/// empty list.
pub fn parse_locations(json: &str) -> Result<Vec<Location>, ForecastError> {
    let response: GeocodingResponse = serde_json::from_str(json)?;

    let locations: Vec<Location> = response.results.into_iter().map(Location::from).collect();
    tracing::debug!("Decoded {} locations", locations.len());
    Ok(locations)
}

fn text_at(values: &[Option<String>], index: usize) -> Option<&str> {
    values.get(index).and_then(|value| value.as_deref())
}

fn value_at<T: Copy>(values: &[Option<T>], index: usize) -> Option<T> {
    values.get(index).copied().flatten()
}

fn parse_local_time(raw: &str, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::parse_from_str(raw, TIME_FORMAT).ok()?;
    offset.from_local_datetime(&naive).single()
}
