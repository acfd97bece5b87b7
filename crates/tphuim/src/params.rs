//! Mining thresholds.
//!
//! All periodicity bounds are counted in transactions of the target-filtered
//! database. Defaults mirror the reference runs (`1..=3000` for gaps,
//! `1..=1000` for the average).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Item, Periodicity, Utility};

/// Engine parameters. Deserializes from a partial document; missing fields take defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningParams {
    pub min_utility: Utility,
    /// Items every reported itemset must contain, in any order.
    pub target: Vec<Item>,
    pub min_periodicity: Periodicity,
    pub max_periodicity: Periodicity,
    pub min_average_periodicity: Periodicity,
    pub max_average_periodicity: Periodicity,
}

impl Default for MiningParams {
    fn default() -> Self {
        Self {
            min_utility: 0,
            target: Vec::new(),
            min_periodicity: 1,
            max_periodicity: 3000,
            min_average_periodicity: 1,
            max_average_periodicity: 1000,
        }
    }
}

/// Parameter combinations the engine refuses to run with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamError {
    /// The support-pruning threshold divides by the maximum average periodicity.
    ZeroMaxAverage,
    PeriodicityBounds { min: Periodicity, max: Periodicity },
    AveragePeriodicityBounds { min: Periodicity, max: Periodicity },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::ZeroMaxAverage => write!(f, "max average periodicity must be > 0"),
            ParamError::PeriodicityBounds { min, max } => {
                write!(f, "min periodicity {min} exceeds max periodicity {max}")
            }
            ParamError::AveragePeriodicityBounds { min, max } => write!(
                f,
                "min average periodicity {min} exceeds max average periodicity {max}"
            ),
        }
    }
}

impl std::error::Error for ParamError {}

impl MiningParams {
    pub fn new(min_utility: Utility, target: impl Into<Vec<Item>>) -> Self {
        Self {
            min_utility,
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_periodicity(mut self, min: Periodicity, max: Periodicity) -> Self {
        self.min_periodicity = min;
        self.max_periodicity = max;
        self
    }

    pub fn with_average_periodicity(mut self, min: Periodicity, max: Periodicity) -> Self {
        self.min_average_periodicity = min;
        self.max_average_periodicity = max;
        self
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        if self.max_average_periodicity == 0 {
            return Err(ParamError::ZeroMaxAverage);
        }
        if self.min_periodicity > self.max_periodicity {
            return Err(ParamError::PeriodicityBounds {
                min: self.min_periodicity,
                max: self.max_periodicity,
            });
        }
        if self.min_average_periodicity > self.max_average_periodicity {
            return Err(ParamError::AveragePeriodicityBounds {
                min: self.min_average_periodicity,
                max: self.max_average_periodicity,
            });
        }
        Ok(())
    }

    /// Target items with duplicates collapsed, ascending by id.
    pub fn target_set(&self) -> Vec<Item> {
        let mut items = self.target.clone();
        items.sort_unstable();
        items.dedup();
        items
    }

    /// `|D| / maxAvg − 1`: fewer occurrences than this always exceed the average bound.
    #[inline]
    pub fn support_pruning_threshold(&self, database_size: usize) -> f64 {
        database_size as f64 / self.max_average_periodicity as f64 - 1.0
    }

    /// Whether an average periodicity lies inside `[minAvg, maxAvg]`.
    #[inline]
    pub fn average_in_bounds(&self, average: f64) -> bool {
        average >= self.min_average_periodicity as f64
            && average <= self.max_average_periodicity as f64
    }
}

/// `|D| / (support + 1)`.
#[inline]
pub fn average_periodicity(database_size: usize, support: usize) -> f64 {
    database_size as f64 / (support as f64 + 1.0)
}
