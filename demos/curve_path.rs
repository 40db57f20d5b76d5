extern crate forecast_curve;

use forecast_curve::{build_path, interpolate_at, Sample};

fn main() {

    let samples = vec![
        Sample::new(0.0, 10.0),
        Sample::new(1.0, 12.0),
        Sample::new(2.0, 9.0),
        Sample::new(3.0, 15.0),
    ];

    println!("{}", build_path(&samples).to_svg_data());

    // queries outside the samples are clamped to the end values
    let x_min = -1.0;
    let x_max = 4.0;
    let number_of_steps = 50;
    let step = (x_max - x_min) / number_of_steps as f64;

    println!("x;y");
    for i in 0..=number_of_steps {
        let x = x_min + step * i as f64;
        if let Some(y) = interpolate_at(x, &samples) {
            println!("{:.2};{:.2}", x, y);
        }
    }
}
