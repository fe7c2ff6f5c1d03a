use thiserror::Error;

/// Conditions that abort a whole query. Per-row problems never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryFailure {
    #[error("could not find coordinates for postcode: {postcode}")]
    UnresolvableOrigin { postcode: String },

    #[error("could not find a postcode column; available columns: {}", .available.join(", "))]
    NoPostcodeColumn { available: Vec<String> },

    #[error("radius must be a positive number of miles, got {0}")]
    InvalidRadius(f64),
}
