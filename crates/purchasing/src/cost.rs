//! Estimated cost of a procurement request.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tiergate_core::{DomainError, ValueObject};

/// Why a cost value could not be classified.
///
/// Classification refuses to guess: every variant here means "no tier".
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidCost {
    #[error("estimated cost is missing")]
    Missing,

    #[error("estimated cost is not a number")]
    NotANumber,

    #[error("estimated cost must be finite")]
    NotFinite,

    #[error("estimated cost cannot be negative (got {0})")]
    Negative(f64),

    #[error("estimated cost is not numeric: {0:?}")]
    Unparseable(String),
}

impl From<InvalidCost> for DomainError {
    fn from(value: InvalidCost) -> Self {
        DomainError::validation(value.to_string())
    }
}

/// A validated, non-negative, finite monetary estimate.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct EstimatedCost(f64);

impl ValueObject for EstimatedCost {}

impl EstimatedCost {
    pub fn new(amount: f64) -> Result<Self, InvalidCost> {
        if amount.is_nan() {
            return Err(InvalidCost::NotANumber);
        }
        if amount.is_infinite() {
            return Err(InvalidCost::NotFinite);
        }
        if amount < 0.0 {
            return Err(InvalidCost::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Read the cost from a raw record field. An unset field is `Missing`.
    pub fn from_field(raw: Option<&str>) -> Result<Self, InvalidCost> {
        match raw {
            Some(text) => text.parse(),
            None => Err(InvalidCost::Missing),
        }
    }

    pub fn amount(self) -> f64 {
        self.0
    }
}

impl FromStr for EstimatedCost {
    type Err = InvalidCost;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidCost::Missing);
        }
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| InvalidCost::Unparseable(trimmed.to_string()))?;
        Self::new(amount)
    }
}

impl TryFrom<f64> for EstimatedCost {
    type Error = InvalidCost;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EstimatedCost> for f64 {
    fn from(value: EstimatedCost) -> Self {
        value.0
    }
}

impl core::fmt::Display for EstimatedCost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
