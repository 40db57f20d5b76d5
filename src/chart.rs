//! Projection of hourly forecasts into chart space and the interactions built
//! on the resulting curve: the "now" marker, scrubbing and temperature labels.
//!
//! Coordinates follow the usual screen convention: `x` grows to the right,
//! `y` grows downwards, so warmer hours sit higher on the chart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    curve::{build_path, interpolate_at},
    forecast::HourlyForecast,
    path::Path,
    sample::Sample,
};

const RANGE_PADDING_RATIO: f64 = 0.15;
const MIN_RANGE_PADDING: f64 = 2.0;
const LABEL_OFFSET: f64 = 16.0;
const MIN_BAR_HEIGHT: f64 = 2.0;

/// Geometry of the hourly chart, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    /// Horizontal distance between consecutive hours.
    pub point_spacing: f64,
    /// Height of the band the temperature curve is drawn in.
    pub chart_height: f64,
    /// Space kept free above and below the curve band.
    pub vertical_padding: f64,
    /// Height of a bar at 100% precipitation probability.
    pub precipitation_bar_height: f64,
    /// Number of leading forecast hours that are charted.
    pub max_points: usize,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            point_spacing: 52.0,
            chart_height: 120.0,
            vertical_padding: 30.0,
            precipitation_bar_height: 40.0,
            max_points: 12,
        }
    }
}

impl ChartLayout {
    /// Forecasts that fit on the chart.
    pub fn visible<'a>(&self, forecasts: &'a [HourlyForecast]) -> &'a [HourlyForecast] {
        &forecasts[..forecasts.len().min(self.max_points)]
    }

    pub fn x_for_index(&self, index: usize) -> f64 {
        index as f64 * self.point_spacing + self.point_spacing / 2.0
    }

    /// Maps the visible forecasts onto chart samples: one column per hour, temperature scaled
    /// linearly between the padded minimum (bottom) and maximum (top).
    pub fn project(&self, forecasts: &[HourlyForecast]) -> Vec<Sample> {
        let visible = self.visible(forecasts);
        let range = TemperatureRange::of(visible);

        visible
            .iter()
            .enumerate()
            .map(|(index, forecast)| {
                let normalized = range.normalize(forecast.temperature);
                Sample::new(
                    self.x_for_index(index),
                    self.vertical_padding + self.chart_height * (1.0 - normalized),
                )
            })
            .collect()
    }

    pub fn total_width(&self, count: usize) -> f64 {
        count.saturating_sub(1).max(1) as f64 * self.point_spacing + self.point_spacing
    }

    /// Bottom edge of the curve band; the area fill is closed along it.
    pub fn baseline_y(&self) -> f64 {
        self.chart_height + self.vertical_padding
    }

    /// Hour column under the pointer position `x`, if any of the `count` columns is hit.
    pub fn resolve_hour_index(&self, x: f64, count: usize) -> Option<usize> {
        let position = ((x - self.point_spacing / 4.0) / self.point_spacing).trunc();
        if !position.is_finite() || position < 0.0 || position >= count as f64 {
            return None;
        }
        Some(position as usize)
    }

    pub fn precipitation_bar_height(&self, probability: u8) -> f64 {
        let fraction = f64::from(probability.min(100)) / 100.0;
        (self.precipitation_bar_height * fraction).max(MIN_BAR_HEIGHT)
    }
}

/// Temperature span mapped onto the chart height, padded so the curve never touches the edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl TemperatureRange {
    /// Padding is 15% of the observed span, but at least two degrees.
    /// # Example
    /// ```
    /// use forecast_curve::TemperatureRange;
    ///
    /// let range = TemperatureRange::of(&[]);
    ///
    /// assert_eq!(-2.0, range.min);
    /// assert_eq!(3.0, range.max);
    /// ```
    pub fn of(forecasts: &[HourlyForecast]) -> Self {
        let (min, max) = if forecasts.is_empty() {
            (0.0, 1.0)
        } else {
            forecasts.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), f| {
                (min.min(f.temperature), max.max(f.temperature))
            })
        };
        let padding = ((max - min) * RANGE_PADDING_RATIO).max(MIN_RANGE_PADDING);
        TemperatureRange {
            min: min - padding,
            max: max + padding,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `temperature` within the range, 0 at `min` and 1 at `max`.
    pub fn normalize(&self, temperature: f64) -> f64 {
        (temperature - self.min) / self.span()
    }
}

/// Pointer position resolved against the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubPoint<'a> {
    pub index: usize,
    pub forecast: &'a HourlyForecast,
    /// Data point of the resolved hour.
    pub anchor: Sample,
    /// Point on the curve directly under the pointer.
    pub position: Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    First,
    Last,
    LocalMinimum,
    LocalMaximum,
}

/// Where a temperature label goes: below local minima, above everything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureLabel {
    pub index: usize,
    pub kind: LabelKind,
    pub temperature: f64,
    pub position: Sample,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationBar {
    pub index: usize,
    /// Horizontal centre of the bar, aligned with the hour's sample.
    pub x: f64,
    pub height: f64,
    pub probability: u8,
}

/// Hourly temperature chart: the visible forecasts together with their projected samples.
#[derive(Debug, Clone)]
pub struct HourlyChart {
    layout: ChartLayout,
    forecasts: Vec<HourlyForecast>,
    samples: Vec<Sample>,
    range: TemperatureRange,
}

impl HourlyChart {
    pub fn new(layout: ChartLayout, forecasts: &[HourlyForecast]) -> Self {
        let visible = layout.visible(forecasts).to_vec();
        let samples = layout.project(&visible);
        let range = TemperatureRange::of(&visible);

        tracing::debug!(
            "Charting {} of {} hourly forecasts, range {:.1}..{:.1}",
            visible.len(),
            forecasts.len(),
            range.min,
            range.max
        );

        HourlyChart {
            layout,
            forecasts: visible,
            samples,
            range,
        }
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn forecasts(&self) -> &[HourlyForecast] {
        &self.forecasts
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn range(&self) -> TemperatureRange {
        self.range
    }

    pub fn width(&self) -> f64 {
        self.layout.total_width(self.samples.len())
    }

    pub fn path(&self) -> Path {
        build_path(&self.samples)
    }

    /// Area below the curve, closed along the baseline.
    pub fn fill_path(&self) -> Path {
        let mut path = self.path();
        if let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) {
            if !path.is_empty() {
                let baseline = self.layout.baseline_y();
                path.line_to(Sample::new(last.x, baseline));
                path.line_to(Sample::new(first.x, baseline));
                path.close();
            }
        }
        path
    }

    /// Point on the curve matching `now`.
    ///
    /// Inside an hour the marker moves linearly with elapsed time between the two hour columns.
    /// Before the first forecast it sits on the first sample; after the last hour started there
    /// is no marker.
    pub fn now_marker(&self, now: DateTime<Utc>) -> Option<Sample> {
        if self.forecasts.len() < 2 {
            return None;
        }

        for i in 0..self.forecasts.len() - 1 {
            let t0 = self.forecasts[i].time.with_timezone(&Utc);
            let t1 = self.forecasts[i + 1].time.with_timezone(&Utc);

            if now >= t0 && now < t1 {
                let elapsed = (now - t0).num_milliseconds() as f64;
                let hour = (t1 - t0).num_milliseconds() as f64;
                let straight = self.samples[i].lerp(&self.samples[i + 1], elapsed / hour);

                let y = interpolate_at(straight.x, &self.samples).unwrap_or(straight.y);
                return Some(Sample::new(straight.x, y));
            }
        }

        if now < self.forecasts[0].time.with_timezone(&Utc) {
            return Some(self.samples[0]);
        }
        None
    }

    /// Resolves a pointer at `x` to the hour under it and the curve point beneath the pointer.
    pub fn scrub(&self, x: f64) -> Option<ScrubPoint<'_>> {
        let index = self.layout.resolve_hour_index(x, self.forecasts.len())?;
        let anchor = self.samples[index];
        let y = interpolate_at(x, &self.samples).unwrap_or(anchor.y);

        tracing::trace!("Scrub at {:.1} resolved to hour {}", x, index);
        Some(ScrubPoint {
            index,
            forecast: &self.forecasts[index],
            anchor,
            position: Sample::new(x, y),
        })
    }

    /// Labels for the first and last hour and for every interior turning point of the curve.
    pub fn labels(&self) -> Vec<TemperatureLabel> {
        let size = self.forecasts.len();
        let mut labels = Vec::new();

        for (index, forecast) in self.forecasts.iter().enumerate() {
            let kind = if self.is_local_minimum(index) {
                LabelKind::LocalMinimum
            } else if self.is_local_maximum(index) {
                LabelKind::LocalMaximum
            } else if index == 0 {
                LabelKind::First
            } else if index == size - 1 {
                LabelKind::Last
            } else {
                continue;
            };

            let offset = if kind == LabelKind::LocalMinimum { LABEL_OFFSET } else { -LABEL_OFFSET };
            labels.push(TemperatureLabel {
                index,
                kind,
                temperature: forecast.temperature,
                position: self.samples[index].offset(0.0, offset),
            });
        }
        labels
    }

    pub fn precipitation_bars(&self) -> Vec<PrecipitationBar> {
        self.forecasts
            .iter()
            .enumerate()
            .map(|(index, forecast)| PrecipitationBar {
                index,
                x: self.layout.x_for_index(index),
                height: self.layout.precipitation_bar_height(forecast.precipitation_probability),
                probability: forecast.precipitation_probability,
            })
            .collect()
    }

    fn is_local_minimum(&self, index: usize) -> bool {
        if index == 0 || index + 1 >= self.forecasts.len() {
            return false;
        }
        let t = self.forecasts[index].temperature;
        t <= self.forecasts[index - 1].temperature && t <= self.forecasts[index + 1].temperature
    }

    fn is_local_maximum(&self, index: usize) -> bool {
        if index == 0 || index + 1 >= self.forecasts.len() {
            return false;
        }
        let t = self.forecasts[index].temperature;
        t >= self.forecasts[index - 1].temperature && t >= self.forecasts[index + 1].temperature
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::{Duration, FixedOffset};

    use crate::path::PathElement;

    use super::*;

    fn start() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-06-01T10:00:00+02:00").unwrap()
    }

    fn forecasts(temperatures: &[f64]) -> Vec<HourlyForecast> {
        temperatures
            .iter()
            .enumerate()
            .map(|(i, t)| HourlyForecast::new(start() + Duration::hours(i as i64), *t))
            .collect()
    }

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn range_padding() {
        let eps = 1e-9;

        let narrow = TemperatureRange::of(&forecasts(&[10.0, 12.0, 9.0, 15.0]));
        assert_approx_eq!(narrow.min, 7.0, eps);
        assert_approx_eq!(narrow.max, 17.0, eps);

        let wide = TemperatureRange::of(&forecasts(&[0.0, 40.0]));
        assert_approx_eq!(wide.min, -6.0, eps);
        assert_approx_eq!(wide.max, 46.0, eps);

        let flat = TemperatureRange::of(&forecasts(&[5.0, 5.0]));
        assert_approx_eq!(flat.span(), 4.0, eps);
        assert_approx_eq!(flat.normalize(5.0), 0.5, eps);
    }

    #[test]
    fn projection() {
        let eps = 1e-9;
        let layout = ChartLayout::default();
        let samples = layout.project(&forecasts(&[10.0, 12.0, 9.0, 15.0]));

        assert_eq!(samples.len(), 4);
        assert_approx_eq!(samples[0].x, 26.0, eps);
        assert_approx_eq!(samples[0].y, 114.0, eps);
        assert_approx_eq!(samples[3].x, 182.0, eps);
        assert_approx_eq!(samples[3].y, 54.0, eps);
        // warmest hour is drawn highest
        assert!(samples[3].y < samples[1].y && samples[1].y < samples[0].y);
    }

    #[test]
    fn projection_keeps_leading_hours_only() {
        let layout = ChartLayout::default();
        let temperatures: Vec<f64> = (0..15).map(|i| i as f64).collect();
        let all = forecasts(&temperatures);

        assert_eq!(layout.visible(&all).len(), 12);
        assert_eq!(layout.project(&all).len(), 12);

        let chart = HourlyChart::new(layout, &all);
        assert_eq!(chart.forecasts().len(), 12);
        assert_eq!(chart.range().max, 11.0 + 2.0);
    }

    #[test]
    fn widths() {
        let layout = ChartLayout::default();

        assert_eq!(layout.total_width(12), 624.0);
        assert_eq!(layout.total_width(1), 104.0);
        assert_eq!(layout.total_width(0), 104.0);
        assert_eq!(layout.baseline_y(), 150.0);
    }

    #[test]
    fn hour_index_resolution() {
        let layout = ChartLayout::default();

        assert_eq!(layout.resolve_hour_index(0.0, 12), Some(0));
        assert_eq!(layout.resolve_hour_index(60.0, 12), Some(0));
        assert_eq!(layout.resolve_hour_index(70.0, 12), Some(1));
        assert_eq!(layout.resolve_hour_index(-100.0, 12), None);
        assert_eq!(layout.resolve_hour_index(10_000.0, 12), None);
        assert_eq!(layout.resolve_hour_index(f64::NAN, 12), None);
        assert_eq!(layout.resolve_hour_index(0.0, 0), None);
    }

    #[test]
    fn precipitation_bar_heights() {
        let eps = 1e-9;
        let layout = ChartLayout::default();

        assert_approx_eq!(layout.precipitation_bar_height(0), 2.0, eps);
        assert_approx_eq!(layout.precipitation_bar_height(50), 20.0, eps);
        assert_approx_eq!(layout.precipitation_bar_height(100), 40.0, eps);
        assert_approx_eq!(layout.precipitation_bar_height(250), 40.0, eps);

        let mut hours = forecasts(&[10.0, 11.0]);
        hours[1] = hours[1].clone().with_precipitation(0.4, 70);
        let bars = HourlyChart::new(layout, &hours).precipitation_bars();
        assert_eq!(bars.len(), 2);
        assert_approx_eq!(bars[1].x, 78.0, eps);
        assert_approx_eq!(bars[1].height, 28.0, eps);
        assert_eq!(bars[1].probability, 70);
    }

    #[test]
    fn fill_path_closes_along_baseline() {
        let chart = HourlyChart::new(ChartLayout::default(), &forecasts(&[10.0, 12.0, 9.0, 15.0]));
        let fill = chart.fill_path();
        let elements = fill.elements();

        assert_eq!(elements.len(), 7);
        assert_eq!(elements[4], PathElement::LineTo(Sample::new(182.0, 150.0)));
        assert_eq!(elements[5], PathElement::LineTo(Sample::new(26.0, 150.0)));
        assert_eq!(elements[6], PathElement::Close);

        let single = HourlyChart::new(ChartLayout::default(), &forecasts(&[10.0]));
        assert!(single.fill_path().is_empty());
        assert!(single.path().is_empty());
    }

    #[test]
    fn now_marker_inside_hour() {
        let eps = 1e-9;
        let chart = HourlyChart::new(ChartLayout::default(), &forecasts(&[10.0, 12.0, 9.0, 15.0]));

        // half past the first hour, 10:30 local
        let marker = chart.now_marker(utc("2024-06-01T08:30:00Z")).unwrap();
        assert_approx_eq!(marker.x, 52.0, eps);
        assert_approx_eq!(marker.y, interpolate_at(52.0, chart.samples()).unwrap(), eps);
    }

    #[test]
    fn now_marker_on_hour_boundary() {
        let chart = HourlyChart::new(ChartLayout::default(), &forecasts(&[10.0, 12.0, 9.0, 15.0]));

        let marker = chart.now_marker(utc("2024-06-01T09:00:00Z")).unwrap();
        assert_eq!(marker, chart.samples()[1]);
    }

    #[test]
    fn now_marker_outside_forecast() {
        let chart = HourlyChart::new(ChartLayout::default(), &forecasts(&[10.0, 12.0, 9.0, 15.0]));

        assert_eq!(chart.now_marker(utc("2024-06-01T07:00:00Z")), Some(chart.samples()[0]));
        assert_eq!(chart.now_marker(utc("2024-06-01T11:00:00Z")), None);

        let single = HourlyChart::new(ChartLayout::default(), &forecasts(&[10.0]));
        assert_eq!(single.now_marker(utc("2024-06-01T07:00:00Z")), None);
    }

    #[test]
    fn scrub_follows_curve() {
        let eps = 1e-9;
        let chart = HourlyChart::new(ChartLayout::default(), &forecasts(&[10.0, 12.0, 9.0, 15.0]));

        let point = chart.scrub(60.0).unwrap();
        assert_eq!(point.index, 0);
        assert_eq!(point.forecast.temperature, 10.0);
        assert_eq!(point.anchor, chart.samples()[0]);
        assert_approx_eq!(point.position.x, 60.0, eps);
        assert_approx_eq!(point.position.y, interpolate_at(60.0, chart.samples()).unwrap(), eps);

        let on_sample = chart.scrub(78.0).unwrap();
        assert_eq!(on_sample.index, 1);
        assert_eq!(on_sample.position, chart.samples()[1]);

        assert!(chart.scrub(-100.0).is_none());
        assert!(chart.scrub(10_000.0).is_none());
    }

    #[test]
    fn scrub_single_hour_uses_sample() {
        let chart = HourlyChart::new(ChartLayout::default(), &forecasts(&[10.0]));

        let point = chart.scrub(30.0).unwrap();
        assert_eq!(point.index, 0);
        assert_eq!(point.position.y, chart.samples()[0].y);
    }

    #[test]
    fn labels_on_turning_points() {
        let eps = 1e-9;
        let chart = HourlyChart::new(
            ChartLayout::default(),
            &forecasts(&[10.0, 12.0, 9.0, 15.0, 15.0, 11.0]),
        );
        let labels = chart.labels();
        let kinds: Vec<LabelKind> = labels.iter().map(|l| l.kind).collect();

        assert_eq!(
            kinds,
            vec![
                LabelKind::First,
                LabelKind::LocalMaximum,
                LabelKind::LocalMinimum,
                LabelKind::LocalMaximum,
                LabelKind::LocalMaximum,
                LabelKind::Last,
            ]
        );
        assert_approx_eq!(labels[2].position.y, chart.samples()[2].y + 16.0, eps);
        assert_approx_eq!(labels[1].position.y, chart.samples()[1].y - 16.0, eps);
        assert_eq!(labels[2].temperature, 9.0);
    }

    #[test]
    fn labels_on_monotonic_curve() {
        let chart = HourlyChart::new(ChartLayout::default(), &forecasts(&[10.0, 11.0, 12.0, 13.0]));
        let indices: Vec<usize> = chart.labels().iter().map(|l| l.index).collect();

        assert_eq!(indices, vec![0, 3]);
    }

    #[test]
    fn plateau_is_labelled_as_minimum() {
        let chart = HourlyChart::new(ChartLayout::default(), &forecasts(&[8.0, 8.0, 8.0]));
        let labels = chart.labels();

        assert_eq!(labels[1].kind, LabelKind::LocalMinimum);
    }
}
