//! Error type shared by the dice samplers and the statistical tests.

use thiserror::Error;

/// Errors returned by the public, checked entry points of the crate.
///
/// Transitions inside a chain that started from a valid state never fail, so
/// the Gibbs sweep itself is infallible; only caller-supplied values are checked.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("die face {0} is outside 1..=6")]
    FaceOutOfRange(u8),

    #[error("sum of two dice {0} is outside 2..=12")]
    SumOutOfRange(u8),

    #[error("pair (x = {x}, y = {y}) cannot be produced by two dice")]
    InvalidPair { x: u8, y: u8 },

    #[error("expected at least one observation")]
    EmptySample,

    #[error("bad chi-squared statistic: {0}")]
    BadStatistic(String),
}

pub type Result<T> = std::result::Result<T, Error>;
