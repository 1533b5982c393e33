//! Timeline assembly: entries, leftover time and soft-conflict warnings.

use crate::interner::SkillId;
use crate::models::{ScheduleEntry, ScheduleWarning, Skill, Timeline};

use super::core::Placement;
use super::occupancy::MonthOccupancy;

/// Human-readable advice about unused months.
pub fn leftover_suggestion(leftover_months: u32, horizon: u32) -> String {
    if leftover_months == 0 {
        return format!(
            "Your plan uses the full {}-month horizon; there is no slack left.",
            horizon
        );
    }
    let plural = if leftover_months == 1 { "" } else { "s" };
    format!(
        "You have {} month{} left after your planned skills. Consider filling them with \
         elective skills, projects, or internships. Existing skill durations were not \
         stretched to fill the remaining time.",
        leftover_months, plural
    )
}

/// Pairs of non-critical advanced technical skills that share a month.
///
/// Each unordered pair is reported once, naming the first shared month.
pub fn soft_overlaps(entries: &[ScheduleEntry], skills: &[&Skill]) -> Vec<ScheduleWarning> {
    let mut warnings = Vec::new();
    for i in 0..entries.len() {
        if !skills[i].is_soft_exclusive() {
            continue;
        }
        for j in (i + 1)..entries.len() {
            if !skills[j].is_soft_exclusive() {
                continue;
            }
            let (a, b) = (&entries[i], &entries[j]);
            let first_shared = a.start_month.max(b.start_month);
            if first_shared <= a.end_month.min(b.end_month) {
                warnings.push(ScheduleWarning::SoftOverlap {
                    first: a.skill_name.clone(),
                    second: b.skill_name.clone(),
                    month: first_shared,
                });
            }
        }
    }
    warnings
}

/// Build the final timeline from placements.
///
/// Entries are ordered by start month, ties by placement priority.
pub fn build_timeline(
    skills: &[Skill],
    sequence: &[SkillId],
    placements: &[Option<Placement>],
    occupancy: &MonthOccupancy,
    labels: Vec<String>,
    mut warnings: Vec<ScheduleWarning>,
) -> Timeline {
    let horizon = occupancy.horizon();

    let mut placed: Vec<(u32, usize, SkillId, Placement)> = sequence
        .iter()
        .enumerate()
        .filter_map(|(rank, &id)| placements[id as usize].map(|p| (p.start, rank, id, p)))
        .collect();
    placed.sort_unstable_by_key(|&(start, rank, _, _)| (start, rank));

    let placed_skills: Vec<&Skill> = placed
        .iter()
        .map(|&(_, _, id, _)| &skills[id as usize])
        .collect();
    let tasks: Vec<ScheduleEntry> = placed
        .iter()
        .zip(&placed_skills)
        .map(|(&(_, _, _, p), skill)| ScheduleEntry {
            skill_name: skill.name.clone(),
            skill_type: skill.skill_type.as_str().to_string(),
            difficulty: skill.difficulty.as_str().to_string(),
            importance: skill.importance.as_str().to_string(),
            duration_months: skill.duration_months,
            prerequisites: skill.prerequisites.clone(),
            start_month: p.start,
            end_month: p.end,
            parallel: (p.start..=p.end).any(|m| occupancy.active_count(m) >= 2),
            critical: skill.is_critical(),
        })
        .collect();

    warnings.extend(soft_overlaps(&tasks, &placed_skills));

    let last_end = tasks.iter().map(|t| t.end_month).max().unwrap_or(0);
    let leftover_months = horizon.saturating_sub(last_end);

    Timeline {
        total_months: horizon,
        labels,
        tasks,
        warnings: warnings.iter().map(|w| w.to_string()).collect(),
        leftover_months,
        leftover_suggestion: leftover_suggestion(leftover_months, horizon),
        cycle_detected: false,
    }
}
