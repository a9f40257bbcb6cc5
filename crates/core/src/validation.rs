//! Input validation for destination drafts and configuration
//!
//! Validation runs before any request is made. Every failing field is
//! collected so a form can highlight all of them at once.
//!
//! # Example
//!
//! ```rust
//! use tourmap_core::validation::DestinationDraft;
//!
//! let draft = DestinationDraft {
//!     name: "Magellan's Cross".into(),
//!     category_id: "2".into(),
//!     latitude: "10.2934".into(),
//!     longitude: "123.9021".into(),
//!     points: 10,
//!     ..Default::default()
//! };
//!
//! let coords = draft.validate().unwrap();
//! assert!((coords.latitude - 10.2934).abs() < 1e-9);
//! ```

use crate::error::{Error, ErrorCode, Result};
use serde::{Deserialize, Serialize};
use tourmap_geo::Coordinate;

/// A single failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Collected validation failures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// True when `field` has at least one failure.
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Convert to Result type
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }

        let code = if self.errors.iter().all(|e| e.message == REQUIRED) {
            ErrorCode::MissingField
        } else {
            ErrorCode::ValidationError
        };
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        Err(Error::new(code, format!("Validation failed: {}", messages.join("; "))))
    }
}

const REQUIRED: &str = "is required";

/// Fluent validator builder
#[derive(Debug, Default)]
pub struct Validator {
    result: ValidationResult,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.result.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Value must be non-blank.
    #[must_use]
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.fail(field, REQUIRED);
        }
        self
    }

    /// Value must parse as a finite number within `[min, max]`.
    ///
    /// Returns the builder and the parsed number when it passed.
    pub fn number_in_range(mut self, field: &str, value: &str, min: f64, max: f64) -> (Self, Option<f64>) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.fail(field, REQUIRED);
            return (self, None);
        }

        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() && (min..=max).contains(&n) => (self, Some(n)),
            Ok(_) => {
                self.fail(field, format!("must be between {min} and {max}"));
                (self, None)
            }
            Err(_) => {
                self.fail(field, "must be a number");
                (self, None)
            }
        }
    }

    /// Value must be zero or greater.
    #[must_use]
    pub fn non_negative(mut self, field: &str, value: i64) -> Self {
        if value < 0 {
            self.fail(field, "must not be negative");
        }
        self
    }

    /// Value must be strictly positive.
    #[must_use]
    pub fn positive(mut self, field: &str, value: f64) -> Self {
        if !(value.is_finite() && value > 0.0) {
            self.fail(field, "must be greater than zero");
        }
        self
    }

    /// Arbitrary condition.
    #[must_use]
    pub fn ensure(mut self, field: &str, condition: bool, message: &str) -> Self {
        if !condition {
            self.fail(field, message);
        }
        self
    }

    /// Value must start with `http://` or `https://`.
    #[must_use]
    pub fn http_url(mut self, field: &str, value: &str) -> Self {
        if !(value.starts_with("http://") || value.starts_with("https://")) {
            self.fail(field, "must be an http(s) URL");
        }
        self
    }

    /// Finish and return the collected result.
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// A destination as entered in a create/edit form, before submission.
///
/// Coordinates are kept as the raw text the user typed. Absent fields
/// deserialize as blank so they are reported by [`check`](Self::check).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DestinationDraft {
    pub name: String,
    pub category_id: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(default)]
    pub points: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub barangay: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
}

impl DestinationDraft {
    /// Collect every failing field.
    pub fn check(&self) -> (ValidationResult, Option<Coordinate>) {
        let validator = Validator::new()
            .required("name", &self.name)
            .required("category", &self.category_id)
            .non_negative("points", self.points);

        let (validator, latitude) = validator.number_in_range("latitude", &self.latitude, -90.0, 90.0);
        let (validator, longitude) = validator.number_in_range("longitude", &self.longitude, -180.0, 180.0);

        let coordinate = latitude.zip(longitude).map(|(lat, lon)| Coordinate::new(lat, lon));
        (validator.validate(), coordinate)
    }

    /// Validate and return the parsed coordinate.
    pub fn validate(&self) -> Result<Coordinate> {
        let (result, coordinate) = self.check();
        result.into_result()?;
        coordinate.ok_or_else(|| Error::invalid_coordinate("Coordinates could not be parsed"))
    }
}
