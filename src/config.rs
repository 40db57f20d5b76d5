use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::chart::ChartLayout;
use crate::error::ConfigError;
use crate::units::TemperatureUnit;

/// Chart settings, usually read from a TOML file:
///
/// ```toml
/// unit = "fahrenheit"
/// forecast_hours = 24
///
/// [layout]
/// point_spacing = 48.0
/// max_points = 10
/// ```
///
/// Every key is optional and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Temperature unit preference
    pub unit: TemperatureUnit,

    /// Number of hourly entries kept from the forecast
    pub forecast_hours: usize,

    /// Chart geometry
    pub layout: ChartLayout,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            unit: TemperatureUnit::default(),
            forecast_hours: 24,
            layout: ChartLayout::default(),
        }
    }
}

impl ChartConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ChartConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No chart config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded chart config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;

        if !(layout.point_spacing.is_finite() && layout.point_spacing > 0.0) {
            return Err(ConfigError::invalid("layout.point_spacing", "must be greater than zero"));
        }
        if !(layout.chart_height.is_finite() && layout.chart_height > 0.0) {
            return Err(ConfigError::invalid("layout.chart_height", "must be greater than zero"));
        }
        if !(layout.vertical_padding.is_finite() && layout.vertical_padding >= 0.0) {
            return Err(ConfigError::invalid("layout.vertical_padding", "must not be negative"));
        }
        if !(layout.precipitation_bar_height.is_finite() && layout.precipitation_bar_height >= 0.0) {
            return Err(ConfigError::invalid(
                "layout.precipitation_bar_height",
                "must not be negative",
            ));
        }
        if layout.max_points < 2 {
            return Err(ConfigError::invalid("layout.max_points", "must be at least 2"));
        }
        if self.forecast_hours == 0 {
            return Err(ConfigError::invalid("forecast_hours", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ChartConfig::default();

        assert_eq!(config.forecast_hours, 24);
        assert_eq!(config.unit, TemperatureUnit::Celsius);
        assert_eq!(config.layout.point_spacing, 52.0);
        assert_eq!(config.layout.max_points, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ChartConfig::from_toml_str(
            r#"
            unit = "fahrenheit"

            [layout]
            point_spacing = 48.0
            "#,
        )
        .unwrap();

        assert_eq!(config.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(config.layout.point_spacing, 48.0);
        assert_eq!(config.layout.chart_height, 120.0);
        assert_eq!(config.forecast_hours, 24);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = ChartConfig::from_toml_str("[layout]\npoint_spacing = 0.0\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { ref field, .. }) if field == "layout.point_spacing"
        ));

        let result = ChartConfig::from_toml_str("[layout]\nmax_points = 1\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));

        let result = ChartConfig::from_toml_str("forecast_hours = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));

        let mut config = ChartConfig::default();
        config.layout.vertical_padding = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        let result = ChartConfig::from_toml_str("unit = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = ChartConfig::from_toml_str("unit = \"kelvin\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ChartConfig::load(&dir.path().join("chart.toml")).unwrap();

        assert_eq!(config, ChartConfig::default());
    }

    #[test]
    fn test_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.toml");

        let mut config = ChartConfig::default();
        config.unit = TemperatureUnit::Fahrenheit;
        config.layout.max_points = 8;
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        let loaded = ChartConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
