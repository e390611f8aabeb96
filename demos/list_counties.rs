//! Lists every county with the number of monitoring stations it hosts.

use soramame::{Soramame, SoramameError};

fn main() -> Result<(), SoramameError> {
    // Set RUST_LOG=info to see every fetched page
    env_logger::init();

    let client = Soramame::new()?;
    let attribute_names = client.list_station_attribute_names()?;
    println!("Attributes: {}", attribute_names.join(", "));

    for county in client.list_counties()? {
        let stations = client.list_county_stations(&county.id, &attribute_names)?;
        println!("{:>3} {} ({} stations)", county.id, county.name, stations.len());
    }
    Ok(())
}
