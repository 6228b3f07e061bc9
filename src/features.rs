//! Parsing and sampling of sonar feature vectors.
//!
//! The classifier consumes exactly [`FEATURE_COUNT`] readings. Input arrives
//! as a comma-separated string pasted by the user; validation happens here so
//! the submit path never issues a request for malformed input.

use rand::Rng;
use thiserror::Error;

/// Number of readings the classifier expects per sample.
pub const FEATURE_COUNT: usize = 60;

/// Fixed message shown when validation fails.
pub const VALIDATION_MESSAGE: &str =
    "Please provide exactly 60 valid numeric values separated by commas.";

/// Reasons a pasted sample fails validation.
///
/// All variants surface as the same fixed user-facing message; the variants
/// exist so logs can say what actually went wrong.
#[derive(Debug, Error, PartialEq)]
pub enum ParseFeaturesError {
    /// Token count differed from [`FEATURE_COUNT`].
    #[error("Expected {FEATURE_COUNT} values, got {0}")]
    WrongCount(usize),
    /// A token failed to parse or was not finite.
    #[error("Value {index} is not a finite number: {token:?}")]
    InvalidValue { index: usize, token: String },
}

/// Parse a comma-separated sample into an ordered feature vector.
///
/// Tokens are trimmed individually, so per-token whitespace, negative values
/// and scientific notation are all accepted. Order is preserved.
pub fn parse_features(input: &str) -> Result<Vec<f64>, ParseFeaturesError> {
    let tokens: Vec<&str> = input.split(',').collect();
    if tokens.len() != FEATURE_COUNT {
        return Err(ParseFeaturesError::WrongCount(tokens.len()));
    }
    let mut features = Vec::with_capacity(FEATURE_COUNT);
    for (index, token) in tokens.iter().enumerate() {
        let trimmed = token.trim();
        let value = trimmed
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ParseFeaturesError::InvalidValue {
                index,
                token: trimmed.to_string(),
            })?;
        features.push(value);
    }
    Ok(features)
}

/// Generate a demo sample: 60 values uniform in [0.2, 0.6), 4 decimal places,
/// joined with ", " so the result round-trips through [`parse_features`].
pub fn random_sample(rng: &mut impl Rng) -> String {
    let values: Vec<String> = (0..FEATURE_COUNT)
        .map(|_| format!("{:.4}", rng.random_range(0.2..0.6)))
        .collect();
    values.join(", ")
}
