//! Text-to-number boundary. Everything the engine receives passes through
//! here first, so the engine only ever sees non-negative finite numbers.

use crate::models::{CatalogError, RequestError};

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Quantity field. Empty or unparsable text clears the field to 0; a
/// negative number is rejected.
pub fn parse_quantity(raw: &str) -> Result<f64, RequestError> {
    match parse_finite(raw) {
        None => Ok(0.0),
        Some(v) if v < 0.0 => Err(RequestError::InvalidQuantity(v)),
        Some(v) => Ok(v),
    }
}

/// Limit field from the settings editor. Never clamped.
pub fn parse_limit(raw: &str) -> Result<f64, CatalogError> {
    match parse_finite(raw) {
        None => Err(CatalogError::UnparsableLimit(raw.to_string())),
        Some(v) if v < 0.0 => Err(CatalogError::InvalidLimit(v)),
        Some(v) => Ok(v),
    }
}

/// Search threshold field. `None` when empty or unparsable.
pub fn parse_threshold(raw: &str) -> Option<f64> {
    parse_finite(raw)
}

/// Calculator helper field: anything that is not a number counts as 0.
pub fn parse_or_zero(raw: &str) -> f64 {
    parse_finite(raw).unwrap_or(0.0)
}
