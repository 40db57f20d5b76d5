use crate::{path::Path, polynomial::Polynomial, sample::Sample};

/// Smooth curve through an ordered sequence of [Sample]s.
///
/// Consecutive samples are joined by uniform Catmull-Rom segments whose tangents come from the
/// neighbouring samples; at both ends the missing neighbour is replaced by the end sample itself.
/// Two samples give a straight line. Fewer than two give nothing to draw: an empty [Path] and no
/// interpolated values.
///
/// The interpolator only borrows the samples and holds no other state, so it may be rebuilt for
/// every pointer event.
/// # Example
/// ```
/// use forecast_curve::{CurveInterpolator, Sample};
///
/// let samples = vec![
///     Sample::new(0.0, 10.0),
///     Sample::new(1.0, 12.0),
///     Sample::new(2.0, 9.0),
///     Sample::new(3.0, 15.0),
/// ];
/// let curve = CurveInterpolator::new(&samples);
///
/// assert_eq!(Some(12.0), curve.interpolate(1.0));
/// assert_eq!(Some(10.0), curve.interpolate(-5.0));
/// assert_eq!(Some(15.0), curve.interpolate(100.0));
/// assert_eq!(4, curve.path().elements().len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurveInterpolator<'a> {
    samples: &'a [Sample],
}

impl<'a> CurveInterpolator<'a> {
    pub fn new(samples: &'a [Sample]) -> Self {
        CurveInterpolator { samples }
    }

    pub fn samples(&self) -> &'a [Sample] {
        self.samples
    }

    pub fn is_drawable(&self) -> bool {
        self.samples.len() >= 2
    }

    pub fn path(&self) -> Path {
        if !self.is_drawable() {
            return Path::new();
        }

        let size = self.samples.len();
        let mut path = Path::with_capacity(size);
        path.move_to(self.samples[0]);

        if size == 2 {
            path.line_to(self.samples[1]);
            return path;
        }

        for i in 0..size - 1 {
            let (p0, p1, p2, p3) = self.neighbourhood(i);

            // Bézier form of the uniform Catmull-Rom segment p1 -> p2
            let control1 = Sample::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
            let control2 = Sample::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);
            path.cubic_to(control1, control2, *p2);
        }
        path
    }

    pub fn interpolate(&self, x: f64) -> Option<f64> {
        if !self.is_drawable() {
            return None;
        }

        match self.find_segment_index(x) {
            Some(index) => Some(self.evaluate_segment(index, x)),
            None => Some(self.clamp_to_boundary(x)),
        }
    }

    /// Interpolates every value of ascending `x_vector`, resuming the segment search where the
    /// previous query ended. Results match [CurveInterpolator::interpolate] query by query.
    pub fn batch_interpolate(&self, x_vector: &[f64]) -> Option<Vec<f64>> {
        if !self.is_drawable() {
            return None;
        }

        let mut results = Vec::with_capacity(x_vector.len());
        let mut index = 0;

        for x in x_vector {
            match self.find_segment_index_with_hint(index, *x) {
                Some(found) => {
                    index = found;
                    results.push(self.evaluate_segment(index, *x));
                }
                None => results.push(self.clamp_to_boundary(*x)),
            }
        }
        Some(results)
    }

    /// Steepness of the curve at `x`, in `y` units per `x` unit.
    ///
    /// Zero outside the sample range, where the curve is clamped flat, and on zero-width segments.
    pub fn slope(&self, x: f64) -> Option<f64> {
        if !self.is_drawable() {
            return None;
        }

        let Some(index) = self.find_segment_index(x) else {
            return Some(0.0);
        };
        let (_, p1, p2, _) = self.neighbourhood(index);

        let width = p2.x - p1.x;
        if width.abs() < f64::EPSILON {
            return Some(0.0);
        }
        let t = ((x - p1.x) / width).clamp(0.0, 1.0);
        Some(self.segment_polynomial(index).derivative(t) / width)
    }

    fn neighbourhood(&self, i: usize) -> (&Sample, &Sample, &Sample, &Sample) {
        let last = self.samples.len() - 1;
        (
            &self.samples[i.saturating_sub(1)],
            &self.samples[i],
            &self.samples[(i + 1).min(last)],
            &self.samples[(i + 2).min(last)],
        )
    }

    fn evaluate_segment(&self, index: usize, x: f64) -> f64 {
        let (_, p1, p2, _) = self.neighbourhood(index);

        let width = p2.x - p1.x;
        let t = if width.abs() < f64::EPSILON { 0.0 } else { (x - p1.x) / width };

        // segment ends hand back the samples untouched so the curve hits them exactly
        if t <= 0.0 {
            return p1.y;
        }
        if t >= 1.0 {
            return p2.y;
        }

        self.segment_polynomial(index).evaluate(t)
    }

    fn segment_polynomial(&self, index: usize) -> Polynomial {
        let (p0, p1, p2, p3) = self.neighbourhood(index);
        if self.samples.len() == 2 {
            Polynomial::linear(p1.y, p2.y)
        } else {
            Polynomial::catmull_rom(p0.y, p1.y, p2.y, p3.y)
        }
    }

    fn clamp_to_boundary(&self, x: f64) -> f64 {
        let first = &self.samples[0];
        if x <= first.x {
            return first.y;
        }
        self.samples[self.samples.len() - 1].y
    }

    fn is_in_segment_range(&self, index: usize, x: f64) -> bool {
        self.samples[index].x <= x && x <= self.samples[index + 1].x
    }

    fn find_segment_index(&self, x: f64) -> Option<usize> {
        (0..self.samples.len() - 1).find(|i| self.is_in_segment_range(*i, x))
    }

    fn find_segment_index_with_hint(&self, index_hint: usize, x: f64) -> Option<usize> {
        if self.is_in_segment_range(index_hint, x) {
            return Some(index_hint);
        }
        if index_hint + 2 < self.samples.len() && self.is_in_segment_range(index_hint + 1, x) {
            return Some(index_hint + 1);
        }
        self.find_segment_index(x)
    }
}

/// Builds the smooth path through `samples`; empty when fewer than two samples are given.
pub fn build_path(samples: &[Sample]) -> Path {
    CurveInterpolator::new(samples).path()
}

/// Height of the curve through `samples` at horizontal position `x`.
///
/// Positions left of the first sample take the first sample's `y`, positions right of the last
/// take the last one's. `None` only when fewer than two samples are given.
/// # Example
/// ```
/// use forecast_curve::{interpolate_at, Sample};
///
/// let samples = vec![Sample::new(0.0, 4.0), Sample::new(10.0, 8.0)];
///
/// assert_eq!(Some(6.0), interpolate_at(5.0, &samples));
/// assert_eq!(None, interpolate_at(5.0, &samples[..1]));
/// ```
pub fn interpolate_at(x: f64, samples: &[Sample]) -> Option<f64> {
    CurveInterpolator::new(samples).interpolate(x)
}
