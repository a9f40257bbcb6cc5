//! Locate command - address of a coordinate

use crate::context::Settings;
use crate::output::{print_json, Status};
use anyhow::Result;
use owo_colors::OwoColorize;
use tourmap_geo::Coordinate;

pub async fn run(settings: &Settings, latitude: f64, longitude: f64) -> Result<()> {
    Coordinate::new(latitude, longitude).validate()?;

    let schema = settings.load_config()?;
    let client = settings.client(&schema)?;
    let lookup = client.address().resolve(latitude, longitude).await?;

    if settings.is_json() {
        return print_json(&lookup);
    }

    let Some(lookup) = lookup else {
        let miss = tourmap_core::Error::geocoding_miss(latitude, longitude);
        Status::warning(&miss.message);
        if let Some(suggestion) = &miss.suggestion {
            eprintln!("  {}", suggestion.dimmed());
        }
        return Ok(());
    };

    Status::header(&format!("{latitude}, {longitude}"));
    let fields = [
        ("Street", &lookup.street),
        ("Barangay", &lookup.barangay),
        ("City", &lookup.city),
        ("Province", &lookup.province),
        ("Region", &lookup.region),
        ("Postal code", &lookup.postal_code),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {:<12} {}", label.dimmed(), value);
        }
    }
    println!("  {:<12} {:?}", "Source".dimmed(), lookup.source);
    Ok(())
}
