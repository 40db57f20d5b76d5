use serde::{Deserialize, Serialize};

/// Sample represents one forecast entry projected into chart space.
/// - `x` - horizontal position, derived from the entry's place in time,
/// - `y` - vertical position, derived from the entry's temperature.
///
/// Sequences of samples handed to the curve functions are expected to be ordered by `x`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    /// Creates [Sample] at given position.
    /// # Example
    /// ```
    /// use forecast_curve::Sample;
    ///
    /// let sample = Sample::new(26.0, 84.0);
    ///
    /// assert_eq!(26.0, sample.x);
    /// assert_eq!(84.0, sample.y);
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Sample { x, y }
    }

    /// Point lying at fraction `t` of the way from `self` to `other`.
    pub fn lerp(&self, other: &Sample, t: f64) -> Sample {
        Sample {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Translates sample by the given offsets.
    pub fn offset(&self, dx: f64, dy: f64) -> Sample {
        Sample { x: self.x + dx, y: self.y + dy }
    }
}

impl From<(f64, f64)> for Sample {
    fn from(value: (f64, f64)) -> Self {
        Sample { x: value.0, y: value.1 }
    }
}
