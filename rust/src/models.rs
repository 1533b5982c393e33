//! Core data types for the roadmap scheduler.

use pyo3::prelude::*;
use std::fmt;

/// Every cycle warning starts with this text so callers can tell a cycle
/// apart from "some skills didn't fit".
pub const CYCLE_WARNING_PREFIX: &str = "circular prerequisite dependency";

/// Lowercase, trim, and fold `_`/space separators into `-`.
fn canonical_label(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '_' || c == ' ' { '-' } else { c })
        .collect()
}

/// Skill category after vocabulary normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkillType {
    Technical,
    NonTechnical,
}

impl SkillType {
    /// Map a raw type label onto the two-value vocabulary.
    ///
    /// Legacy `soft` and `certification` labels count as non-technical;
    /// anything unrecognized defaults to technical.
    pub fn parse(raw: &str) -> Self {
        match canonical_label(raw).as_str() {
            "non-technical" | "nontechnical" | "soft" | "certification" => Self::NonTechnical,
            _ => Self::Technical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::NonTechnical => "non-technical",
        }
    }
}

/// Learning difficulty of a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse a difficulty label. Unknown labels fall back to intermediate.
    pub fn parse(raw: &str) -> Self {
        match canonical_label(raw).as_str() {
            "beginner" => Self::Beginner,
            "advanced" => Self::Advanced,
            _ => Self::Intermediate,
        }
    }

    /// Ordinal used for tie-breaking (easier first).
    pub fn rank(self) -> u8 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// How important a skill is for the target role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Importance {
    Essential,
    Important,
    GoodToHave,
}

impl Importance {
    /// Parse an importance label. Unknown labels get the lowest priority.
    pub fn parse(raw: &str) -> Self {
        match canonical_label(raw).as_str() {
            "essential" => Self::Essential,
            "important" => Self::Important,
            _ => Self::GoodToHave,
        }
    }

    /// Ordinal used for tie-breaking (more important first).
    pub fn rank(self) -> u8 {
        match self {
            Self::Essential => 1,
            Self::Important => 2,
            Self::GoodToHave => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Important => "important",
            Self::GoodToHave => "good-to-have",
        }
    }
}

/// A skill requirement as supplied by the caller (raw, unvalidated).
#[pyclass]
#[derive(Clone, Debug)]
pub struct SkillRequirement {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub skill_type: String,
    #[pyo3(get, set)]
    pub duration_months: i32,
    #[pyo3(get, set)]
    pub difficulty: String,
    #[pyo3(get, set)]
    pub importance: String,
    #[pyo3(get, set)]
    pub prerequisites: Vec<String>,
}

#[pymethods]
impl SkillRequirement {
    #[new]
    #[pyo3(signature = (
        name,
        skill_type,
        duration_months,
        difficulty,
        importance,
        prerequisites=None
    ))]
    fn new(
        name: String,
        skill_type: String,
        duration_months: i32,
        difficulty: String,
        importance: String,
        prerequisites: Option<Vec<String>>,
    ) -> Self {
        Self {
            name,
            skill_type,
            duration_months,
            difficulty,
            importance,
            prerequisites: prerequisites.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SkillRequirement(name={:?}, type={:?}, duration_months={}, prereqs={})",
            self.name,
            self.skill_type,
            self.duration_months,
            self.prerequisites.len()
        )
    }
}

/// A skill after normalization: typed vocabulary and a positive duration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub skill_type: SkillType,
    pub duration_months: u32,
    pub difficulty: Difficulty,
    pub importance: Importance,
    pub prerequisites: Vec<String>,
}

impl Skill {
    /// Essential and advanced, regardless of type.
    pub fn is_critical(&self) -> bool {
        self.importance == Importance::Essential && self.difficulty == Difficulty::Advanced
    }

    /// Critical technical skills may never share an active month.
    pub fn is_critical_technical(&self) -> bool {
        self.is_critical() && self.skill_type == SkillType::Technical
    }

    /// Advanced technical skills outside the critical tier should preferably not overlap.
    pub fn is_soft_exclusive(&self) -> bool {
        self.difficulty == Difficulty::Advanced
            && self.skill_type == SkillType::Technical
            && !self.is_critical()
    }
}

/// One scheduled skill on the timeline.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleEntry {
    #[pyo3(get)]
    pub skill_name: String,
    #[pyo3(get)]
    pub skill_type: String,
    #[pyo3(get)]
    pub difficulty: String,
    #[pyo3(get)]
    pub importance: String,
    #[pyo3(get)]
    pub duration_months: u32,
    #[pyo3(get)]
    pub prerequisites: Vec<String>,
    /// First active month (1-based).
    #[pyo3(get)]
    pub start_month: u32,
    /// Last active month (inclusive).
    #[pyo3(get)]
    pub end_month: u32,
    /// True if some month of this span has two or more active skills.
    #[pyo3(get)]
    pub parallel: bool,
    #[pyo3(get)]
    pub critical: bool,
}

impl ScheduleEntry {
    pub fn is_active_in(&self, month: u32) -> bool {
        self.start_month <= month && month <= self.end_month
    }

    pub fn span_months(&self) -> u32 {
        self.end_month + 1 - self.start_month
    }
}

#[pymethods]
impl ScheduleEntry {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleEntry(skill={:?}, start={}, end={}, parallel={})",
            self.skill_name, self.start_month, self.end_month, self.parallel
        )
    }
}

/// Month-by-month learning plan.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    #[pyo3(get)]
    pub total_months: u32,
    #[pyo3(get)]
    pub labels: Vec<String>,
    #[pyo3(get)]
    pub tasks: Vec<ScheduleEntry>,
    #[pyo3(get)]
    pub warnings: Vec<String>,
    #[pyo3(get)]
    pub leftover_months: u32,
    #[pyo3(get)]
    pub leftover_suggestion: String,
    #[pyo3(get)]
    pub cycle_detected: bool,
}

impl Timeline {
    /// Look up the entry for a skill by name.
    pub fn entry(&self, skill_name: &str) -> Option<&ScheduleEntry> {
        self.tasks.iter().find(|t| t.skill_name == skill_name)
    }
}

#[pymethods]
impl Timeline {
    fn __repr__(&self) -> String {
        format!(
            "Timeline(total_months={}, tasks={}, warnings={}, leftover_months={})",
            self.total_months,
            self.tasks.len(),
            self.warnings.len(),
            self.leftover_months
        )
    }
}

/// Terminal state of a scheduling run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// Normal completion, possibly with unscheduled skills reported as warnings.
    Scheduled(Timeline),
    /// Prerequisites form a cycle; nothing was placed.
    CycleDetected {
        total_months: u32,
        labels: Vec<String>,
        warnings: Vec<String>,
    },
}

impl ScheduleOutcome {
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::CycleDetected { .. })
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            Self::Scheduled(timeline) => &timeline.warnings,
            Self::CycleDetected { warnings, .. } => warnings,
        }
    }

    /// Flatten either terminal state into something a caller can render.
    pub fn into_timeline(self) -> Timeline {
        match self {
            Self::Scheduled(timeline) => timeline,
            Self::CycleDetected {
                total_months,
                labels,
                warnings,
            } => Timeline {
                total_months,
                labels,
                tasks: Vec::new(),
                warnings,
                leftover_months: total_months,
                leftover_suggestion: "No plan could be built because the prerequisites form a \
                                      cycle. Remove the circular dependency and try again."
                    .to_string(),
                cycle_detected: true,
            },
        }
    }
}

/// Warnings accumulated while scheduling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScheduleWarning {
    InvalidDuration { skill: String, duration: i32 },
    DuplicateSkill { skill: String },
    InsufficientTime { total: u32, horizon: u32 },
    Unschedulable { skill: String },
    PrerequisiteUnscheduled { skill: String, prerequisite: String },
    SoftOverlap { first: String, second: String, month: u32 },
    CircularDependency { cycle: Vec<String> },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration { skill, duration } => write!(
                f,
                "skill '{}' has invalid duration {}; clamped to 1 month",
                skill, duration
            ),
            Self::DuplicateSkill { skill } => write!(f, "duplicate skill '{}' ignored", skill),
            Self::InsufficientTime { total, horizon } => write!(
                f,
                "total duration of {} months exceeds the {}-month horizon; \
                 lower-priority skills may be left unscheduled",
                total, horizon
            ),
            Self::Unschedulable { skill } => write!(
                f,
                "cannot schedule skill '{}' — insufficient time or constraint violation",
                skill
            ),
            Self::PrerequisiteUnscheduled {
                skill,
                prerequisite,
            } => write!(
                f,
                "cannot schedule skill '{}' — prerequisite '{}' could not be scheduled",
                skill, prerequisite
            ),
            Self::SoftOverlap {
                first,
                second,
                month,
            } => write!(
                f,
                "soft preference violation: advanced technical skills '{}' and '{}' overlap in month {}",
                first, second, month
            ),
            Self::CircularDependency { cycle } => {
                if cycle.is_empty() {
                    write!(f, "{}; no schedule was produced", CYCLE_WARNING_PREFIX)
                } else {
                    write!(
                        f,
                        "{}: {}; no schedule was produced",
                        CYCLE_WARNING_PREFIX,
                        cycle.join(" -> ")
                    )
                }
            }
        }
    }
}
