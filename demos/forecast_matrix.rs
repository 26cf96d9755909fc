// Prints the forecast matrix for the default locations.
//
// OPENWEATHER_API_KEY=... RUST_LOG=info cargo run --example forecast_matrix
use weather_matrix::{DaySlotValue, Slot, WeatherMatrix, WeatherMatrixError};

#[tokio::main]
async fn main() -> Result<(), WeatherMatrixError> {
    env_logger::init();

    let matrix = WeatherMatrix::from_env()?;
    let config = matrix.config();
    let unit = config.units.temperature_symbol();
    println!("Forecast matrix for {}", config.window);

    for row in matrix.report().await {
        println!("\n{}", row.location.name);
        for (index, day) in row.forecast.iter().enumerate() {
            let mut marker = String::new();
            if row.ranking.best_day == Some(index) {
                marker.push_str("  <- best");
            }
            if row.ranking.worst_day == Some(index) {
                marker.push_str("  <- worst");
            }
            let cells: Vec<String> = Slot::ALL
                .into_iter()
                .map(|slot| format!("{} {}", slot, cell(day.slot(slot), unit)))
                .collect();
            println!("  {}  {}{}", day.date.format("%b %d"), cells.join("  "), marker);
        }
    }

    Ok(())
}

fn cell(value: Option<&DaySlotValue>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:>5.1}{} {:>3}%", v.temperature, unit, v.rain_chance),
        None => format!("{:>13}", "N/A"),
    }
}
