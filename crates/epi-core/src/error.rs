//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `EpiError` as one
//! variant via `#[from]`, so configuration failures surface unchanged.

use thiserror::Error;

/// Errors raised while validating a run configuration.
///
/// All of these are fatal and are reported before any simulation state is
/// created.
#[derive(Debug, Error)]
pub enum EpiError {
    #[error("population size must be at least 1")]
    EmptyPopulation,

    #[error("probability `{name}` = {value} is outside [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("duration `{name}` = {value} must be a finite, non-negative number of days")]
    InvalidDuration { name: &'static str, value: f64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `epi-core`.
pub type EpiResult<T> = Result<T, EpiError>;
