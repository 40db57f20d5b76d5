extern crate forecast_curve;

use forecast_curve::{CurveInterpolator, Sample};

fn main() {

    let samples = vec![
        Sample::new(26.0, 114.0),
        Sample::new(78.0, 90.0),
        Sample::new(130.0, 126.0),
        Sample::new(182.0, 54.0),
        Sample::new(234.0, 66.0),
        Sample::new(286.0, 102.0),
    ];

    let curve = CurveInterpolator::new(&samples);

    let x_min = 0.0;
    let x_max = 312.0;
    let number_of_steps = 78;
    let step = (x_max - x_min) / number_of_steps as f64;

    let mut x_vector = Vec::new();

    for i in 0..=number_of_steps {
        x_vector.push(x_min + step * i as f64);
    }

    let result = match curve.batch_interpolate(&x_vector) {
        Some(result) => result,
        None => return,
    };

    println!("x;y");
    for i in 0..=number_of_steps {
        println!("{:.2};{:.2}", x_vector[i], result[i]);
    }
}
