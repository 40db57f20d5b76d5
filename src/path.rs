use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::sample::Sample;

/// Single drawing command of a [Path].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathElement {
    MoveTo(Sample),
    LineTo(Sample),
    /// Cubic Bézier from the current point to `to`.
    CubicTo {
        control1: Sample,
        control2: Sample,
        to: Sample,
    },
    Close,
}

/// Renderer-agnostic outline produced by the curve functions.
///
/// A [Path] is plain data: any drawing layer can replay its elements, and
/// [Path::to_svg_data] gives the usual SVG `d` attribute for web output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    pub fn new() -> Self {
        Path { elements: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Path { elements: Vec::with_capacity(capacity) }
    }

    pub fn move_to(&mut self, to: Sample) {
        self.elements.push(PathElement::MoveTo(to));
    }

    pub fn line_to(&mut self, to: Sample) {
        self.elements.push(PathElement::LineTo(to));
    }

    pub fn cubic_to(&mut self, control1: Sample, control2: Sample, to: Sample) {
        self.elements.push(PathElement::CubicTo { control1, control2, to });
    }

    pub fn close(&mut self) {
        self.elements.push(PathElement::Close);
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of line and curve segments, the leading move excluded.
    pub fn segment_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, PathElement::LineTo(_) | PathElement::CubicTo { .. }))
            .count()
    }

    pub fn start(&self) -> Option<Sample> {
        match self.elements.first() {
            Some(PathElement::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    /// Last point reached by a drawing element.
    pub fn end(&self) -> Option<Sample> {
        self.elements.iter().rev().find_map(|e| match e {
            PathElement::MoveTo(p) | PathElement::LineTo(p) => Some(*p),
            PathElement::CubicTo { to, .. } => Some(*to),
            PathElement::Close => None,
        })
    }

    /// Evaluates the `segment`-th line or curve (counting from 0, moves excluded) at `t` in [0, 1].
    /// # Example
    /// ```
    /// use forecast_curve::{Path, Sample};
    ///
    /// let mut path = Path::new();
    /// path.move_to(Sample::new(0.0, 0.0));
    /// path.line_to(Sample::new(10.0, 4.0));
    ///
    /// assert_eq!(Some(Sample::new(5.0, 2.0)), path.point_at(0, 0.5));
    /// assert_eq!(None, path.point_at(1, 0.5));
    /// ```
    pub fn point_at(&self, segment: usize, t: f64) -> Option<Sample> {
        let mut current: Option<Sample> = None;
        let mut index = 0;

        for element in &self.elements {
            match element {
                PathElement::MoveTo(p) => current = Some(*p),
                PathElement::LineTo(p) => {
                    if index == segment {
                        return current.map(|from| from.lerp(p, t));
                    }
                    index += 1;
                    current = Some(*p);
                }
                PathElement::CubicTo { control1, control2, to } => {
                    if index == segment {
                        return current.map(|from| cubic_bezier(&from, control1, control2, to, t));
                    }
                    index += 1;
                    current = Some(*to);
                }
                PathElement::Close => {}
            }
        }
        None
    }

    /// SVG path data (`d` attribute) with coordinates rounded to two decimals.
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        for element in &self.elements {
            if !data.is_empty() {
                data.push(' ');
            }
            // writing into a String cannot fail
            let _ = match element {
                PathElement::MoveTo(p) => write!(data, "M {:.2} {:.2}", p.x, p.y),
                PathElement::LineTo(p) => write!(data, "L {:.2} {:.2}", p.x, p.y),
                PathElement::CubicTo { control1, control2, to } => write!(
                    data,
                    "C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                    control1.x, control1.y, control2.x, control2.y, to.x, to.y
                ),
                PathElement::Close => write!(data, "Z"),
            };
        }
        data
    }
}

fn cubic_bezier(p0: &Sample, p1: &Sample, p2: &Sample, p3: &Sample, t: f64) -> Sample {
    let s = 1.0 - t;
    let b0 = s * s * s;
    let b1 = 3.0 * s * s * t;
    let b2 = 3.0 * s * t * t;
    let b3 = t * t * t;
    Sample {
        x: b0 * p0.x + b1 * p1.x + b2 * p2.x + b3 * p3.x,
        y: b0 * p0.y + b1 * p1.y + b2 * p2.y + b3 * p3.y,
    }
}
