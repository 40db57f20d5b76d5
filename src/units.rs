use serde::{Deserialize, Serialize};

/// Temperature unit preference. Forecast data is always Celsius; the unit only
/// affects what is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn convert(&self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Whole degrees, truncated toward zero, e.g. `"12°"`.
    /// # Example
    /// ```
    /// use forecast_curve::TemperatureUnit;
    ///
    /// assert_eq!("21°", TemperatureUnit::Celsius.format(21.7));
    /// assert_eq!("71°", TemperatureUnit::Fahrenheit.format(21.7));
    /// ```
    pub fn format(&self, celsius: f64) -> String {
        format!("{}°", self.convert(celsius).trunc() as i64)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}
