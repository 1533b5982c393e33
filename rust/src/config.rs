//! Configuration types for the roadmap scheduler.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::scheduler::SchedulerError;

/// Configuration for a single scheduling run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SchedulingConfig {
    /// Maximum number of skills studied in the same month
    #[pyo3(get, set)]
    pub max_parallel: i32,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Calendar month of month 1; labels fall back to "Month N" when unset
    #[pyo3(get, set)]
    pub start_date: Option<NaiveDate>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            max_parallel: 3,
            verbosity: 0,
            start_date: None,
        }
    }
}

impl SchedulingConfig {
    /// Reject settings the placement scan cannot work with.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.max_parallel < 1 {
            return Err(SchedulerError::InvalidParallelism(self.max_parallel));
        }
        Ok(())
    }
}

#[pymethods]
impl SchedulingConfig {
    #[new]
    #[pyo3(signature = (max_parallel=None, verbosity=None, start_date=None))]
    fn new(
        max_parallel: Option<i32>,
        verbosity: Option<u8>,
        start_date: Option<NaiveDate>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            max_parallel: max_parallel.unwrap_or(defaults.max_parallel),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            start_date,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulingConfig(max_parallel={}, verbosity={}, start_date={:?})",
            self.max_parallel, self.verbosity, self.start_date
        )
    }
}

/// Bounds for estimating a learner's planning horizon.
#[pyclass]
#[derive(Clone, Debug)]
pub struct HorizonConfig {
    /// Shortest horizon ever produced
    #[pyo3(get, set)]
    pub min_months: u32,
    /// Longest horizon ever produced
    #[pyo3(get, set)]
    pub max_months: u32,
    /// Horizon used when no graduation date is known
    #[pyo3(get, set)]
    pub default_months: u32,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            min_months: 3,
            max_months: 24,
            default_months: 12,
        }
    }
}

#[pymethods]
impl HorizonConfig {
    #[new]
    #[pyo3(signature = (min_months=None, max_months=None, default_months=None))]
    fn new(min_months: Option<u32>, max_months: Option<u32>, default_months: Option<u32>) -> Self {
        let defaults = Self::default();
        Self {
            min_months: min_months.unwrap_or(defaults.min_months),
            max_months: max_months.unwrap_or(defaults.max_months),
            default_months: default_months.unwrap_or(defaults.default_months),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "HorizonConfig(min_months={}, max_months={}, default_months={})",
            self.min_months, self.max_months, self.default_months
        )
    }
}
