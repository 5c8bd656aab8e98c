//! Weight text parsing for the input boundary.

/// Rejected weight input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    /// Nothing was typed
    #[error("weight is empty")]
    Empty,

    /// Text is not a number
    #[error("not a number: {0}")]
    Unparseable(String),

    /// NaN, infinite, zero or negative
    #[error("weight must be a positive finite number, got {0}")]
    OutOfRange(f64),
}

/// Parse user-typed weight text.
///
/// Accepts a comma as decimal separator (`"180,5"` parses as `180.5`).
pub fn parse_weight(text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let normalized = trimmed.replace(',', ".");
    let weight: f64 = normalized
        .parse()
        .map_err(|_| InputError::Unparseable(trimmed.to_string()))?;

    if !weight.is_finite() || weight <= 0.0 {
        return Err(InputError::OutOfRange(weight));
    }
    Ok(weight)
}
