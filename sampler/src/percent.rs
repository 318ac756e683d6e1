use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A utilization figure in `0.0..=100.0`, rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percent(f64);

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum PercentError {
    #[error("not a finite number :: {0}")]
    NotFinite(f64),

    #[error("outside 0..=100 :: {0}")]
    OutOfRange(f64),
}

impl Percent {
    pub const ZERO: Percent = Percent(0.0);
    pub const FULL: Percent = Percent(100.0);

    /// Rounding happens before the range check, so float noise such as
    /// `100.000_01` is accepted as `100.0`.
    pub fn new(value: f64) -> Result<Self, PercentError> {
        if !value.is_finite() {
            return Err(PercentError::NotFinite(value));
        }

        let rounded = (value * 10.0).round() / 10.0;
        match rounded {
            // -0.0 compares equal to 0.0 but serializes as "-0.0"
            v if v == 0.0 => Ok(Self::ZERO),
            v if (0.0..=100.0).contains(&v) => Ok(Self(v)),
            _ => Err(PercentError::OutOfRange(value)),
        }
    }

    /// `part / whole` as a percentage.
    pub fn from_ratio(part: u64, whole: u64) -> Result<Self, PercentError> {
        Self::new(part as f64 / whole as f64 * 100.0)
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Percent {
    type Error = PercentError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for f64 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
