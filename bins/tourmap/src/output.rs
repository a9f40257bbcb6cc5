//! Terminal output
//!
//! Text goes to stdout with `owo-colors` styling; notices go to stderr so
//! `--format json` output stays machine-readable.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use tourmap_dashboard::{DisplayItem, Notice};

/// Status message helpers
pub struct Status;

impl Status {
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Pretty-printed JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per destination: marker, name, category, distance, address.
pub fn print_items(items: &[DisplayItem]) {
    if items.is_empty() {
        Status::info("No destinations match");
        return;
    }

    for item in items {
        let d = &item.destination;
        let saved = if item.saved { "★".yellow().to_string() } else { " ".to_string() };
        let distance = item.distance_label().unwrap_or_default();

        println!(
            "  {} {} {:<32} {:<16} {:>9}  {}",
            saved,
            item.icon,
            d.name.bold(),
            d.category_label().dimmed(),
            distance.cyan(),
            d.address.dimmed()
        );
    }

    println!();
    println!("  {}", format_count(items.len(), "destination", "destinations").dimmed());
}

pub fn print_notices(notices: &[Notice]) {
    for notice in notices {
        Status::warning(&notice.to_string());
        if let Some(suggestion) = notice.suggestion() {
            eprintln!("  {}", suggestion.dimmed());
        }
    }
}

/// Kilometers with a unit that fits the magnitude
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else if km < 100.0 {
        format!("{km:.2} km")
    } else {
        format!("{km:.0} km")
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.25), "250 m");
        assert_eq!(format_distance(12.347), "12.35 km");
        assert_eq!(format_distance(571.4), "571 km");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "destination", "destinations"), "1 destination");
        assert_eq!(format_count(0, "destination", "destinations"), "0 destinations");
    }
}
