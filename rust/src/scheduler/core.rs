//! Roadmap scheduler: tiered greedy placement of skills onto a month grid.

use thiserror::Error;

use crate::config::SchedulingConfig;
use crate::graph::{DependencyGraph, GraphError};
use crate::horizon::month_labels;
use crate::interner::SkillId;
use crate::models::{ScheduleOutcome, ScheduleWarning, Skill, SkillRequirement};
use crate::normalize::normalize;
use crate::sorting::partition;
use crate::{log_changes, log_checks, log_debug};

use super::compaction::compact;
use super::occupancy::MonthOccupancy;
use super::report::build_timeline;

/// Errors that can occur before scheduling starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid planning horizon: {0} months (must be at least 1)")]
    InvalidHorizon(i32),
    #[error("Invalid parallelism cap: {0} (must be at least 1)")]
    InvalidParallelism(i32),
}

/// Months occupied by a placed skill (1-based, inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub start: u32,
    pub end: u32,
}

/// Schedules one role's skills within a fixed horizon.
///
/// Holds only the normalized input; every call to `schedule` builds its own
/// occupancy table, so a scheduler can be reused and shared freely.
pub struct RoadmapScheduler {
    skills: Vec<Skill>,
    graph: DependencyGraph,
    input_warnings: Vec<ScheduleWarning>,
    horizon: u32,
    max_parallel: usize,
    config: SchedulingConfig,
}

impl RoadmapScheduler {
    /// Validate the run parameters and normalize the input.
    pub fn new(
        requirements: &[SkillRequirement],
        horizon_months: i32,
        config: SchedulingConfig,
    ) -> Result<Self, SchedulerError> {
        if horizon_months <= 0 {
            return Err(SchedulerError::InvalidHorizon(horizon_months));
        }
        config.validate()?;

        let normalized = normalize(requirements);
        let graph = DependencyGraph::build(&normalized.skills);

        Ok(Self {
            skills: normalized.skills,
            graph,
            input_warnings: normalized.warnings,
            horizon: horizon_months as u32,
            max_parallel: config.max_parallel as usize,
            config,
        })
    }

    /// Normalized skills, in input order (index = `SkillId`).
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// Run the scheduling pipeline.
    pub fn schedule(&self) -> ScheduleOutcome {
        let verbosity = self.config.verbosity;
        let labels = month_labels(self.horizon, self.config.start_date);

        let order = match self.graph.resolve_order() {
            Ok(order) => order,
            Err(GraphError::CircularDependency(cycle)) => {
                log_changes!(verbosity, "Cycle detected: {}", cycle.join(" -> "));
                return ScheduleOutcome::CycleDetected {
                    total_months: self.horizon,
                    labels,
                    warnings: vec![ScheduleWarning::CircularDependency { cycle }.to_string()],
                };
            }
        };

        let tiers = partition(&self.skills, &order);
        log_debug!(
            verbosity,
            "Tiers: critical_technical={:?} critical_non_technical={:?} other={:?}",
            self.names(&tiers.critical_technical),
            self.names(&tiers.critical_non_technical),
            self.names(&tiers.other)
        );

        let mut warnings = self.input_warnings.clone();
        let total: u32 = self.skills.iter().map(|s| s.duration_months).sum();
        if total > self.horizon {
            warnings.push(ScheduleWarning::InsufficientTime {
                total,
                horizon: self.horizon,
            });
        }

        let sequence = tiers.sequence();
        let mut occupancy = MonthOccupancy::new(self.horizon);
        let mut placements: Vec<Option<Placement>> = vec![None; self.skills.len()];

        self.place_all(&sequence, &mut occupancy, &mut placements, &mut warnings);

        let moved = compact(
            &self.skills,
            &self.graph,
            &sequence,
            &mut occupancy,
            &mut placements,
            self.max_parallel,
            verbosity,
        );
        log_debug!(verbosity, "Compaction moved {} skill(s)", moved);

        ScheduleOutcome::Scheduled(build_timeline(
            &self.skills,
            &sequence,
            &placements,
            &occupancy,
            labels,
            warnings,
        ))
    }

    /// Visit skills in priority sequence, but never before their prerequisites.
    ///
    /// The next skill taken is always the earliest one in `sequence` whose
    /// prerequisites have all been visited (placed or given up on).
    fn place_all(
        &self,
        sequence: &[SkillId],
        occupancy: &mut MonthOccupancy,
        placements: &mut [Option<Placement>],
        warnings: &mut Vec<ScheduleWarning>,
    ) {
        let mut visited = vec![false; self.skills.len()];
        let mut pending: Vec<SkillId> = sequence.to_vec();

        while !pending.is_empty() {
            // Acyclic input always has a ready skill
            let pos = pending
                .iter()
                .position(|&id| {
                    self.graph
                        .prerequisites(id)
                        .iter()
                        .all(|&p| visited[p as usize])
                })
                .unwrap_or(0);
            let id = pending.remove(pos);

            if let Some(placement) = self.place_skill(id, occupancy, placements, warnings) {
                placements[id as usize] = Some(placement);
            }
            visited[id as usize] = true;
        }
    }

    /// First-fit placement of a single skill.
    fn place_skill(
        &self,
        id: SkillId,
        occupancy: &mut MonthOccupancy,
        placements: &[Option<Placement>],
        warnings: &mut Vec<ScheduleWarning>,
    ) -> Option<Placement> {
        let verbosity = self.config.verbosity;
        let skill = &self.skills[id as usize];
        let prereqs = self.graph.prerequisites(id);

        if let Some(&failed) = prereqs.iter().find(|&&p| placements[p as usize].is_none()) {
            log_changes!(
                verbosity,
                "  Skipping {}: prerequisite {} is unscheduled",
                skill.name,
                self.graph.name(failed)
            );
            warnings.push(ScheduleWarning::PrerequisiteUnscheduled {
                skill: skill.name.clone(),
                prerequisite: self.graph.name(failed).to_string(),
            });
            return None;
        }

        let earliest = prereqs
            .iter()
            .filter_map(|&p| placements[p as usize])
            .map(|p| p.end + 1)
            .max()
            .unwrap_or(1);
        let duration = skill.duration_months;
        let critical = skill.is_critical_technical();

        log_checks!(
            verbosity,
            "  Considering {} (duration={}, earliest={}, critical={})",
            skill.name,
            duration,
            earliest,
            critical
        );

        let mut chosen: Option<u32> = None;
        if let Some(latest) = occupancy.last_start(duration) {
            for start in earliest..=latest {
                match occupancy.check(start, duration, critical, self.max_parallel) {
                    Ok(()) => {
                        chosen = Some(start);
                        break;
                    }
                    Err(conflict) => log_checks!(
                        verbosity,
                        "    {} cannot start in month {}: {}",
                        skill.name,
                        start,
                        conflict
                    ),
                }
            }
        }

        let Some(start) = chosen else {
            log_changes!(verbosity, "  Unable to schedule {}", skill.name);
            warnings.push(ScheduleWarning::Unschedulable {
                skill: skill.name.clone(),
            });
            return None;
        };

        let end = (start + duration - 1).min(self.horizon);
        occupancy.occupy(id, start, end, critical);
        log_changes!(
            verbosity,
            "  Scheduled {} in months {}-{}",
            skill.name,
            start,
            end
        );
        Some(Placement { start, end })
    }

    fn names(&self, ids: &[SkillId]) -> Vec<&str> {
        ids.iter().map(|&id| self.graph.name(id)).collect()
    }
}

/// Schedule a role's skills in one call.
///
/// # Returns
/// * `Ok(ScheduleOutcome)` - a timeline, or `CycleDetected` for circular prerequisites
/// * `Err(SchedulerError)` - the horizon or parallelism cap is not positive
pub fn schedule(
    requirements: &[SkillRequirement],
    horizon_months: i32,
    config: &SchedulingConfig,
) -> Result<ScheduleOutcome, SchedulerError> {
    let scheduler = RoadmapScheduler::new(requirements, horizon_months, config.clone())?;
    Ok(scheduler.schedule())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Timeline, CYCLE_WARNING_PREFIX};
    use chrono::NaiveDate;

    fn make_skill(
        name: &str,
        duration: i32,
        skill_type: &str,
        difficulty: &str,
        importance: &str,
        prereqs: Vec<&str>,
    ) -> SkillRequirement {
        SkillRequirement {
            name: name.to_string(),
            skill_type: skill_type.to_string(),
            duration_months: duration,
            difficulty: difficulty.to_string(),
            importance: importance.to_string(),
            prerequisites: prereqs.into_iter().map(String::from).collect(),
        }
    }

    fn simple(name: &str, duration: i32, prereqs: Vec<&str>) -> SkillRequirement {
        make_skill(name, duration, "technical", "beginner", "important", prereqs)
    }

    fn critical(name: &str, duration: i32, prereqs: Vec<&str>) -> SkillRequirement {
        make_skill(name, duration, "technical", "advanced", "essential", prereqs)
    }

    fn run(skills: &[SkillRequirement], horizon: i32, max_parallel: i32) -> Timeline {
        let config = SchedulingConfig {
            max_parallel,
            ..SchedulingConfig::default()
        };
        match schedule(skills, horizon, &config).unwrap() {
            ScheduleOutcome::Scheduled(timeline) => timeline,
            other => panic!("expected a schedule, got {:?}", other),
        }
    }

    fn span(timeline: &Timeline, name: &str) -> (u32, u32) {
        let entry = timeline.entry(name).unwrap();
        (entry.start_month, entry.end_month)
    }

    fn assert_invariants(skills: &[SkillRequirement], timeline: &Timeline, max_parallel: usize) {
        for entry in &timeline.tasks {
            assert!(entry.start_month >= 1);
            assert!(entry.end_month <= timeline.total_months);
            assert_eq!(entry.span_months(), entry.duration_months);

            let req = skills.iter().find(|s| s.name == entry.skill_name).unwrap();
            for prereq in &req.prerequisites {
                if let Some(p) = timeline.entry(prereq) {
                    assert!(
                        entry.start_month > p.end_month,
                        "{} starts before prerequisite {} ends",
                        entry.skill_name,
                        prereq
                    );
                }
            }
        }

        for month in 1..=timeline.total_months {
            let active: Vec<_> = timeline.tasks.iter().filter(|t| t.is_active_in(month)).collect();
            assert!(active.len() <= max_parallel, "month {} over capacity", month);
            let critical_technical = active
                .iter()
                .filter(|t| t.critical && t.skill_type == "technical")
                .count();
            assert!(critical_technical <= 1, "critical overlap in month {}", month);
        }
    }

    #[test]
    fn test_independent_skills_run_in_parallel() {
        let skills = vec![simple("a", 2, vec![]), simple("b", 3, vec![]), simple("c", 1, vec![])];
        let timeline = run(&skills, 6, 3);

        assert_eq!(timeline.tasks.len(), 3);
        for entry in &timeline.tasks {
            assert_eq!(entry.start_month, 1);
            assert!(entry.parallel);
        }
        assert_eq!(span(&timeline, "b"), (1, 3));
        assert_eq!(timeline.leftover_months, 3);
        assert!(timeline.warnings.is_empty());
    }

    #[test]
    fn test_prerequisite_past_horizon_left_unscheduled() {
        let skills = vec![simple("a", 2, vec![]), simple("b", 2, vec!["a"])];
        let timeline = run(&skills, 3, 3);

        assert_eq!(span(&timeline, "a"), (1, 2));
        assert!(timeline.entry("b").is_none());
        assert_eq!(timeline.leftover_months, 1);
        assert!(timeline
            .warnings
            .iter()
            .any(|w| w.starts_with("cannot schedule skill 'b'")));
    }

    #[test]
    fn test_critical_technical_skills_never_overlap() {
        let skills = vec![critical("systems", 4, vec![]), critical("compilers", 4, vec![])];
        let timeline = run(&skills, 8, 3);

        assert_eq!(span(&timeline, "systems"), (1, 4));
        assert_eq!(span(&timeline, "compilers"), (5, 8));
        assert_eq!(timeline.leftover_months, 0);
        assert!(timeline.tasks.iter().all(|t| !t.parallel));
    }

    #[test]
    fn test_self_prerequisite_is_cycle() {
        let skills = vec![simple("a", 2, vec!["a"]), simple("b", 0, vec![])];
        let outcome = schedule(&skills, 6, &SchedulingConfig::default()).unwrap();

        assert!(outcome.is_cycle());
        assert_eq!(outcome.warnings().len(), 1);
        assert!(outcome.warnings()[0].starts_with(CYCLE_WARNING_PREFIX));

        let timeline = outcome.into_timeline();
        assert!(timeline.tasks.is_empty());
        assert_eq!(timeline.leftover_months, 6);
        assert_eq!(timeline.labels.len(), 6);
    }

    #[test]
    fn test_transitive_cycle_short_circuits() {
        let skills = vec![
            simple("a", 1, vec!["c"]),
            simple("b", 1, vec!["a"]),
            simple("c", 1, vec!["b"]),
            simple("d", 1, vec![]),
        ];
        let outcome = schedule(&skills, 12, &SchedulingConfig::default()).unwrap();
        assert!(outcome.is_cycle());
        assert!(outcome.into_timeline().cycle_detected);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let skills = vec![simple("a", 1, vec![])];
        assert_eq!(
            schedule(&skills, 0, &SchedulingConfig::default()).unwrap_err(),
            SchedulerError::InvalidHorizon(0)
        );
        let config = SchedulingConfig {
            max_parallel: 0,
            ..SchedulingConfig::default()
        };
        assert_eq!(
            schedule(&skills, 6, &config).unwrap_err(),
            SchedulerError::InvalidParallelism(0)
        );
    }

    #[test]
    fn test_parallelism_cap_pushes_later() {
        let skills = vec![
            simple("a", 2, vec![]),
            simple("b", 2, vec![]),
            simple("c", 2, vec![]),
        ];
        let timeline = run(&skills, 6, 2);

        assert_eq!(span(&timeline, "a"), (1, 2));
        assert_eq!(span(&timeline, "b"), (1, 2));
        assert_eq!(span(&timeline, "c"), (3, 4));
        assert!(!timeline.entry("c").unwrap().parallel);
    }

    #[test]
    fn test_critical_skill_waits_for_lower_tier_prerequisite() {
        let skills = vec![
            critical("deep learning", 3, vec!["python"]),
            simple("python", 2, vec![]),
        ];
        let timeline = run(&skills, 6, 3);

        assert_eq!(span(&timeline, "python"), (1, 2));
        assert_eq!(span(&timeline, "deep learning"), (3, 5));
        assert_invariants(&skills, &timeline, 3);
    }

    #[test]
    fn test_dependents_of_unscheduled_skill_are_skipped() {
        let skills = vec![
            simple("a", 3, vec![]),
            simple("b", 1, vec!["a"]),
            simple("c", 1, vec!["b"]),
        ];
        let timeline = run(&skills, 3, 3);

        assert_eq!(timeline.tasks.len(), 1);
        let expected = "cannot schedule skill 'b' — insufficient time or constraint violation";
        assert!(timeline.warnings.contains(&expected.to_string()));
        assert!(timeline.warnings.contains(
            &"cannot schedule skill 'c' — prerequisite 'b' could not be scheduled".to_string()
        ));
    }

    #[test]
    fn test_insufficient_time_schedules_priority_subset() {
        let skills = vec![
            make_skill("nice", 3, "technical", "beginner", "good-to-have", vec![]),
            make_skill("core", 3, "technical", "beginner", "essential", vec![]),
        ];
        let timeline = run(&skills, 3, 1);

        assert_eq!(span(&timeline, "core"), (1, 3));
        assert!(timeline.entry("nice").is_none());
        assert!(timeline.warnings[0]
            .starts_with("total duration of 6 months exceeds the 3-month horizon"));
        assert!(timeline.warnings[1].starts_with("cannot schedule skill 'nice'"));
    }

    #[test]
    fn test_oversized_skill_is_unschedulable() {
        let skills = vec![simple("thesis", 10, vec![]), simple("git", 1, vec![])];
        let timeline = run(&skills, 6, 3);
        assert!(timeline.entry("thesis").is_none());
        assert_eq!(span(&timeline, "git"), (1, 1));
    }

    #[test]
    fn test_dangling_prerequisite_ignored() {
        let skills = vec![simple("ml", 2, vec!["calculus"])];
        let timeline = run(&skills, 4, 3);
        assert_eq!(span(&timeline, "ml"), (1, 2));
        assert!(timeline.warnings.is_empty());
    }

    #[test]
    fn test_input_warnings_carried_through() {
        let skills = vec![simple("git", 0, vec![])];
        let timeline = run(&skills, 4, 3);
        assert_eq!(span(&timeline, "git"), (1, 1));
        assert_eq!(
            timeline.warnings,
            vec!["skill 'git' has invalid duration 0; clamped to 1 month".to_string()]
        );
    }

    fn data_engineer_role() -> Vec<SkillRequirement> {
        vec![
            make_skill("python", 2, "technical", "beginner", "essential", vec![]),
            make_skill("sql", 1, "technical", "beginner", "essential", vec![]),
            make_skill("spark", 3, "technical", "advanced", "essential", vec!["python", "sql"]),
            make_skill("kafka", 2, "technical", "advanced", "essential", vec!["python"]),
            make_skill("airflow", 2, "technical", "intermediate", "important", vec!["python"]),
            make_skill("dbt", 1, "technical", "intermediate", "important", vec!["sql"]),
            make_skill("communication", 1, "soft", "beginner", "important", vec![]),
            make_skill("aws cert", 2, "certification", "advanced", "essential", vec![]),
            make_skill("kubernetes", 2, "technical", "advanced", "good-to-have", vec!["docker"]),
            make_skill("docker", 1, "technical", "beginner", "important", vec![]),
            make_skill("flink", 2, "technical", "advanced", "important", vec!["kafka"]),
        ]
    }

    #[test]
    fn test_invariants_hold_for_realistic_role() {
        let skills = data_engineer_role();
        for (horizon, max_parallel) in [(6, 2), (9, 2), (12, 3), (4, 1)] {
            let timeline = run(&skills, horizon, max_parallel);
            assert_invariants(&skills, &timeline, max_parallel as usize);
            let scheduled = timeline.tasks.len();
            let unscheduled = timeline
                .warnings
                .iter()
                .filter(|w| w.starts_with("cannot schedule skill"))
                .count();
            assert_eq!(scheduled + unscheduled, skills.len());
        }
    }

    #[test]
    fn test_deterministic_output() {
        let skills = data_engineer_role();
        let config = SchedulingConfig {
            max_parallel: 2,
            start_date: NaiveDate::from_ymd_opt(2026, 9, 1),
            ..SchedulingConfig::default()
        };
        let first = schedule(&skills, 9, &config).unwrap();
        for _ in 0..5 {
            assert_eq!(schedule(&skills, 9, &config).unwrap(), first);
        }
    }

    #[test]
    fn test_scheduler_reusable() {
        let skills = data_engineer_role();
        let scheduler = RoadmapScheduler::new(&skills, 12, SchedulingConfig::default()).unwrap();
        assert_eq!(scheduler.skills().len(), skills.len());
        assert_eq!(scheduler.schedule(), scheduler.schedule());
    }

    #[test]
    fn test_calendar_labels() {
        let config = SchedulingConfig {
            start_date: NaiveDate::from_ymd_opt(2026, 11, 15),
            ..SchedulingConfig::default()
        };
        let timeline = schedule(&[simple("a", 1, vec![])], 3, &config)
            .unwrap()
            .into_timeline();
        assert_eq!(timeline.labels, vec!["Nov 2026", "Dec 2026", "Jan 2027"]);
    }
}
