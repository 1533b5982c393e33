//! Month-indexed occupancy tracking for one scheduling run.

use std::fmt;

use crate::interner::SkillId;

/// Why a candidate span was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// The span would run past the last month.
    PastHorizon,
    /// Another critical technical skill is already active in this month.
    CriticalOverlap { month: u32, other: SkillId },
    /// The month already holds `max_parallel` skills.
    ParallelismCap { month: u32 },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PastHorizon => write!(f, "runs past the horizon"),
            Self::CriticalOverlap { month, other } => {
                write!(f, "critical skill #{} already active in month {}", other, month)
            }
            Self::ParallelismCap { month } => write!(f, "month {} is full", month),
        }
    }
}

/// Which skills are active in each month of the horizon.
///
/// Month numbers are 1-based; index 0 of the inner vectors is month 1.
/// Invariant: at most one critical technical skill per month.
#[derive(Clone, Debug)]
pub struct MonthOccupancy {
    horizon: u32,
    active: Vec<Vec<SkillId>>,
    critical_technical: Vec<Option<SkillId>>,
}

impl MonthOccupancy {
    pub fn new(horizon: u32) -> Self {
        Self {
            horizon,
            active: vec![Vec::new(); horizon as usize],
            critical_technical: vec![None; horizon as usize],
        }
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    /// Skills active in `month`. Empty outside the horizon.
    pub fn active_in(&self, month: u32) -> &[SkillId] {
        match month.checked_sub(1) {
            Some(idx) if idx < self.horizon => self.active[idx as usize].as_slice(),
            _ => &[],
        }
    }

    pub fn active_count(&self, month: u32) -> usize {
        self.active_in(month).len()
    }

    /// Latest legal start month for a skill of this duration.
    pub fn last_start(&self, duration: u32) -> Option<u32> {
        if duration == 0 || duration > self.horizon {
            return None;
        }
        Some(self.horizon - duration + 1)
    }

    /// Check whether `[start, start + duration - 1]` can take one more skill.
    pub fn check(
        &self,
        start: u32,
        duration: u32,
        critical_technical: bool,
        max_parallel: usize,
    ) -> Result<(), Conflict> {
        let end = match duration.checked_sub(1).and_then(|d| start.checked_add(d)) {
            Some(end) if start >= 1 && end <= self.horizon => end,
            _ => return Err(Conflict::PastHorizon),
        };

        for month in start..=end {
            let idx = (month - 1) as usize;
            if critical_technical {
                if let Some(other) = self.critical_technical[idx] {
                    return Err(Conflict::CriticalOverlap { month, other });
                }
            }
            if self.active[idx].len() + 1 > max_parallel {
                return Err(Conflict::ParallelismCap { month });
            }
        }

        Ok(())
    }

    /// First start in `[earliest, latest]` that passes `check`.
    pub fn first_fit(
        &self,
        earliest: u32,
        latest: u32,
        duration: u32,
        critical_technical: bool,
        max_parallel: usize,
    ) -> Option<u32> {
        (earliest.max(1)..=latest)
            .find(|&start| self.check(start, duration, critical_technical, max_parallel).is_ok())
    }

    /// Mark `id` active in every month of `[start, end]`.
    pub fn occupy(&mut self, id: SkillId, start: u32, end: u32, critical_technical: bool) {
        for month in start..=end.min(self.horizon) {
            let idx = (month - 1) as usize;
            self.active[idx].push(id);
            if critical_technical {
                self.critical_technical[idx] = Some(id);
            }
        }
    }

    /// Undo `occupy` for `id` over `[start, end]`.
    pub fn release(&mut self, id: SkillId, start: u32, end: u32) {
        for month in start..=end.min(self.horizon) {
            let idx = (month - 1) as usize;
            self.active[idx].retain(|&other| other != id);
            if self.critical_technical[idx] == Some(id) {
                self.critical_technical[idx] = None;
            }
        }
    }

    /// Highest month any skill is active in, or 0 when empty.
    pub fn last_busy_month(&self) -> u32 {
        self.active
            .iter()
            .rposition(|skills| !skills.is_empty())
            .map(|idx| idx as u32 + 1)
            .unwrap_or(0)
    }
}
