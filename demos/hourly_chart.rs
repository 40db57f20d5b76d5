use anyhow::Result;
use chrono::{DateTime, Utc};
use forecast_curve::{open_meteo, ChartConfig, HourlyChart};

const RESPONSE: &str = r#"{
    "latitude": 52.52,
    "longitude": 13.41,
    "timezone": "Europe/Berlin",
    "utc_offset_seconds": 7200,
    "hourly": {
        "time": [
            "2024-06-01T09:00", "2024-06-01T10:00", "2024-06-01T11:00", "2024-06-01T12:00",
            "2024-06-01T13:00", "2024-06-01T14:00", "2024-06-01T15:00", "2024-06-01T16:00",
            "2024-06-01T17:00", "2024-06-01T18:00", "2024-06-01T19:00", "2024-06-01T20:00",
            "2024-06-01T21:00", "2024-06-01T22:00"
        ],
        "temperature_2m": [16.1, 17.4, 19.0, 20.8, 21.9, 22.3, 21.7, 20.2, 19.6, 20.1, 18.3, 16.9, 15.2, 14.0],
        "weather_code": [1, 1, 2, 3, 61, 63, 80, 3, 2, 1, 0, 0, 0, 0],
        "precipitation": [0.0, 0.0, 0.0, 0.1, 1.2, 2.4, 0.8, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        "precipitation_probability": [0, 0, 5, 20, 65, 80, 45, 15, 5, 0, 0, 0, 0, 0],
        "is_day": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0]
    }
}"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "chart.toml".to_string());
    let config = ChartConfig::load(std::path::Path::new(&config_path))?;

    let now: DateTime<Utc> = DateTime::parse_from_rfc3339("2024-06-01T08:40:00Z")?.with_timezone(&Utc);
    let forecasts = open_meteo::parse_hourly(RESPONSE, now, config.forecast_hours)?;
    let chart = HourlyChart::new(config.layout, &forecasts);

    println!("width: {:.0}", chart.width());
    println!("curve: {}", chart.path().to_svg_data());
    println!("fill:  {}", chart.fill_path().to_svg_data());

    if let Some(marker) = chart.now_marker(now) {
        println!("now at ({:.1}, {:.1})", marker.x, marker.y);
    }

    println!("labels:");
    for label in chart.labels() {
        println!(
            "  {:?} {} at ({:.1}, {:.1})",
            label.kind,
            config.unit.format(label.temperature),
            label.position.x,
            label.position.y
        );
    }

    println!("scrub:");
    for x in [10.0, 64.0, 200.0, 410.0, 700.0] {
        match chart.scrub(x) {
            Some(point) => println!(
                "  x={:.0} -> {} {} ({}), curve y {:.1}",
                x,
                point.forecast.time.format("%H:%M"),
                config.unit.format(point.forecast.temperature),
                point.forecast.condition.description(),
                point.position.y
            ),
            None => println!("  x={:.0} -> outside chart", x),
        }
    }

    println!("precipitation:");
    for bar in chart.precipitation_bars() {
        if bar.probability > 0 {
            println!("  x={:.0} {}% height {:.1}", bar.x, bar.probability, bar.height);
        }
    }

    Ok(())
}
