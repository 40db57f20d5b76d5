use nalgebra::{Matrix4, Vector4};

/// Cubic in the local segment parameter `t`, stored in power basis (t^0..t^3).
pub struct Polynomial {
    coefficients: Vector4<f64>,
}

impl Polynomial {

    pub fn new(coefficients: Vector4<f64>) -> Self {
        Polynomial { coefficients }
    }

    /// Uniform Catmull-Rom segment running from `p1` (t = 0) to `p2` (t = 1).
    pub fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64) -> Self {
        Polynomial::new(catmull_rom_basis() * Vector4::new(p0, p1, p2, p3))
    }

    /// Straight segment running from `a` (t = 0) to `b` (t = 1).
    pub fn linear(a: f64, b: f64) -> Self {
        Polynomial::new(Vector4::new(a, b - a, 0.0, 0.0))
    }

    pub fn evaluate(&self, t: f64) -> f64 {
        let c = &self.coefficients;
        ((c[3] * t + c[2]) * t + c[1]) * t + c[0]
    }

    /// Rate of change with respect to `t`.
    pub fn derivative(&self, t: f64) -> f64 {
        let c = &self.coefficients;
        (3.0 * c[3] * t + 2.0 * c[2]) * t + c[1]
    }
}

// rows are the power-basis coefficients of t^0..t^3, columns weight p0..p3
fn catmull_rom_basis() -> Matrix4<f64> {
    Matrix4::new(
         0.0,  2.0,  0.0,  0.0,
        -1.0,  0.0,  1.0,  0.0,
         2.0, -5.0,  4.0, -1.0,
        -1.0,  3.0, -3.0,  1.0,
    ) * 0.5
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use super::*;

    #[test]
    fn evaluate() {

        let eps = 1e-6;
        let coefficients = Vector4::new(1.0, 2.5, -0.25, 0.0);
        let polynomial = Polynomial::new(coefficients);

        assert_approx_eq!(polynomial.evaluate(2.1), 5.1475, eps);
        assert_approx_eq!(polynomial.evaluate(-3.14), -9.3149, eps);
        assert_approx_eq!(polynomial.evaluate(0.0), 1.0, eps);
    }

    #[test]
    fn catmull_rom_passes_through_inner_points() {
        let eps = 1e-12;
        let polynomial = Polynomial::catmull_rom(10.0, 12.0, 9.0, 15.0);

        assert_eq!(polynomial.evaluate(0.0), 12.0);
        assert_approx_eq!(polynomial.evaluate(1.0), 9.0, eps);
    }

    #[test]
    fn catmull_rom_tangents() {
        let eps = 1e-12;
        let polynomial = Polynomial::catmull_rom(10.0, 12.0, 9.0, 15.0);

        // tangent at each end is half the difference of the neighbours
        assert_approx_eq!(polynomial.derivative(0.0), (9.0 - 10.0) / 2.0, eps);
        assert_approx_eq!(polynomial.derivative(1.0), (15.0 - 12.0) / 2.0, eps);
    }

    #[test]
    fn derivative() {
        let eps = 1e-9;
        let coefficients = Vector4::new(1.0, 2.5, -0.25, 0.5);
        let polynomial = Polynomial::new(coefficients);

        assert_approx_eq!(polynomial.derivative(0.0), 2.5, eps);
        assert_approx_eq!(polynomial.derivative(2.0), 7.5, eps);
        assert_approx_eq!(Polynomial::linear(4.0, 8.0).derivative(0.7), 4.0, eps);
    }

    #[test]
    fn catmull_rom_reproduces_line() {
        let eps = 1e-12;
        let polynomial = Polynomial::catmull_rom(0.0, 1.0, 2.0, 3.0);

        assert_approx_eq!(polynomial.evaluate(0.25), 1.25, eps);
        assert_approx_eq!(polynomial.evaluate(0.5), 1.5, eps);
        assert_approx_eq!(polynomial.evaluate(3.0), 4.0, eps);
    }

    #[test]
    fn clamped_ends_meet_at_average() {
        let eps = 1e-12;
        let polynomial = Polynomial::catmull_rom(4.0, 4.0, 8.0, 8.0);

        assert_approx_eq!(polynomial.evaluate(0.5), 6.0, eps);
    }

    #[test]
    fn linear() {
        let eps = 1e-12;
        let polynomial = Polynomial::linear(4.0, 8.0);

        assert_approx_eq!(polynomial.evaluate(0.25), 5.0, eps);
        assert_approx_eq!(polynomial.evaluate(1.0), 8.0, eps);
    }
}
