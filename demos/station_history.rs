use soramame::Soramame;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    configure_polars_display();

    let station_code = env::args().nth(1).unwrap_or_else(|| "44201010".to_string());
    let client = Soramame::new()?;
    let history = client.list_station_measurement_history(&station_code)?;

    println!("{}", serde_json::to_string_pretty(&history.header)?);
    println!("{}", history.to_frame()?);

    if let Some(latest) = history.records.last() {
        println!("Latest record:\n{}", serde_json::to_string_pretty(latest)?);
    }
    Ok(())
}

fn configure_polars_display() {
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    env::set_var("POLARS_FMT_MAX_ROWS", "30");
}
