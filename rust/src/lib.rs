//! Rust implementation of the skill roadmap scheduler.
//!
//! Turns a role's skill requirements and a planning horizon into a
//! conflict-free month-by-month learning timeline.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

mod config;
pub mod graph;
pub mod horizon;
pub mod interner;
pub mod logging;
mod models;
pub mod normalize;
pub mod scheduler;
pub mod sorting;

pub use config::{HorizonConfig, SchedulingConfig};
pub use graph::{DependencyGraph, GraphError};
pub use horizon::{estimate_horizon_months, month_labels};
pub use models::{
    Difficulty, Importance, ScheduleEntry, ScheduleOutcome, ScheduleWarning, Skill,
    SkillRequirement, SkillType, Timeline, CYCLE_WARNING_PREFIX,
};
pub use normalize::{normalize, NormalizedInput};
pub use scheduler::{schedule, RoadmapScheduler, SchedulerError};
pub use sorting::{partition, Tier, TierKey, Tiers};

/// Build a month-by-month timeline for a role's skills.
///
/// # Arguments
/// * `skills` - Skill requirements of the role
/// * `horizon_months` - Number of months available
/// * `config` - Scheduling configuration (defaults: max_parallel=3, verbosity=0)
///
/// # Returns
/// * Timeline; `cycle_detected` is set and `tasks` is empty when prerequisites form a cycle
///
/// # Raises
/// * ValueError if the horizon or max_parallel is not positive
#[pyfunction]
#[pyo3(signature = (skills, horizon_months, config=None))]
fn schedule_roadmap(
    skills: Vec<SkillRequirement>,
    horizon_months: i32,
    config: Option<SchedulingConfig>,
) -> PyResult<Timeline> {
    let config = config.unwrap_or_default();
    match schedule(&skills, horizon_months, &config) {
        Ok(outcome) => Ok(outcome.into_timeline()),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Estimate the planning horizon from an expected graduation date.
#[pyfunction]
#[pyo3(signature = (today, expected_graduation=None, config=None))]
fn estimate_horizon(
    today: NaiveDate,
    expected_graduation: Option<NaiveDate>,
    config: Option<HorizonConfig>,
) -> u32 {
    estimate_horizon_months(today, expected_graduation, &config.unwrap_or_default())
}

/// Display labels for each month of the horizon.
#[pyfunction]
#[pyo3(name = "month_labels", signature = (horizon_months, start_date=None))]
fn py_month_labels(horizon_months: u32, start_date: Option<NaiveDate>) -> Vec<String> {
    month_labels(horizon_months, start_date)
}

/// The roadmap.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<SkillRequirement>()?;
    m.add_class::<ScheduleEntry>()?;
    m.add_class::<Timeline>()?;

    // Config types
    m.add_class::<SchedulingConfig>()?;
    m.add_class::<HorizonConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(schedule_roadmap, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_horizon, m)?)?;
    m.add_function(wrap_pyfunction!(py_month_labels, m)?)?;

    Ok(())
}
