//! Scheduler module: greedy tiered placement followed by single-pass compaction.
//!
//! Pipeline per run: normalize -> prerequisite graph -> priority tiers ->
//! first-fit placement -> compaction -> timeline report.

mod compaction;
mod core;
mod occupancy;
mod report;

pub use compaction::compact;
pub use self::core::{schedule, Placement, RoadmapScheduler, SchedulerError};
pub use occupancy::{Conflict, MonthOccupancy};
pub use report::{build_timeline, leftover_suggestion, soft_overlaps};
