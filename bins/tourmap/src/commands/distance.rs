//! Distance command - great-circle distance, no network needed

use crate::output::{format_distance, print_json};
use crate::OutputFormat;
use anyhow::Result;
use serde_json::json;
use tourmap_geo::{distance_km, Coordinate};

pub fn run(format: OutputFormat, from: (f64, f64), to: (f64, f64)) -> Result<()> {
    let from = Coordinate::from(from);
    let to = Coordinate::from(to);
    from.validate()?;
    to.validate()?;

    let km = distance_km(&from, &to);

    match format {
        OutputFormat::Json => print_json(&json!({ "from": from, "to": to, "km": km })),
        OutputFormat::Text => {
            println!("{}", format_distance(km));
            Ok(())
        }
    }
}
