//! Smooth hourly temperature curves for weather forecasts.
//!
//! The core is a Catmull-Rom interpolator over chart-space [Sample]s: [build_path] produces the
//! outline a renderer draws, [interpolate_at] gives the height of that same curve under any
//! horizontal position, which is what pointer scrubbing and the "now" marker need. Around it sit
//! the pieces that feed it: decoding of Open-Meteo forecast and geocoding data, projection of
//! forecasts into chart space, unit display and a TOML configuration. Nothing here draws or
//! fetches.
//!
//! # Example
//! ```
//! use forecast_curve::{build_path, interpolate_at, Sample};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let samples = vec![
//!     Sample::new(0.0, 10.0),
//!     Sample::new(1.0, 12.0),
//!     Sample::new(2.0, 9.0),
//!     Sample::new(3.0, 15.0),
//! ];
//! let path = build_path(&samples);
//!
//! assert_eq!(3, path.segment_count());
//! assert_eq!(Some(12.0), interpolate_at(1.0, &samples));
//! assert_approx_eq!(10.25, interpolate_at(1.5, &samples).unwrap(), 1e-9);
//! ```

mod chart;
mod config;
mod curve;
mod error;
mod forecast;
mod path;
mod polynomial;
mod sample;
mod units;

pub mod open_meteo;

pub use chart::{
    ChartLayout, HourlyChart, LabelKind, PrecipitationBar, ScrubPoint, TemperatureLabel,
    TemperatureRange,
};
pub use config::ChartConfig;
pub use curve::{build_path, interpolate_at, CurveInterpolator};
pub use error::{ConfigError, ForecastError};
pub use forecast::{CurrentWeather, DailyForecast, HourlyForecast, Location, WeatherCondition};
pub use path::{Path, PathElement};
pub use sample::Sample;
pub use units::TemperatureUnit;
