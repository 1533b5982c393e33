//! Single-pass compaction: slide placed skills into earlier free months.

use crate::graph::DependencyGraph;
use crate::interner::SkillId;
use crate::log_changes;
use crate::models::Skill;

use super::core::Placement;
use super::occupancy::MonthOccupancy;

/// Move each placed skill to the earliest legal month before its current start.
///
/// Skills are visited once, by ascending start month (ties by priority
/// sequence). Each check runs against the current, possibly already moved,
/// positions of every other skill. No backtracking, so the result is not
/// guaranteed to be maximally compact.
///
/// After first-fit placement this never moves anything: every earlier slot
/// was already rejected when the skill was placed, and occupancy has only
/// grown since. It only changes layouts seeded some other way.
///
/// Returns the number of skills moved.
pub fn compact(
    skills: &[Skill],
    graph: &DependencyGraph,
    sequence: &[SkillId],
    occupancy: &mut MonthOccupancy,
    placements: &mut [Option<Placement>],
    max_parallel: usize,
    verbosity: u8,
) -> usize {
    let mut order: Vec<(u32, usize, SkillId)> = sequence
        .iter()
        .enumerate()
        .filter_map(|(rank, &id)| placements[id as usize].map(|p| (p.start, rank, id)))
        .collect();
    order.sort_unstable();

    let mut moved = 0;
    for (_, _, id) in order {
        let Some(current) = placements[id as usize] else {
            continue;
        };

        let earliest = graph
            .prerequisites(id)
            .iter()
            .filter_map(|&p| placements[p as usize])
            .map(|p| p.end + 1)
            .max()
            .unwrap_or(1);
        if earliest >= current.start {
            continue;
        }

        let skill = &skills[id as usize];
        let critical = skill.is_critical_technical();

        occupancy.release(id, current.start, current.end);
        let target = occupancy.first_fit(
            earliest,
            current.start - 1,
            skill.duration_months,
            critical,
            max_parallel,
        );

        let placement = match target {
            Some(start) => {
                let end = start + skill.duration_months - 1;
                log_changes!(
                    verbosity,
                    "  Compacted {} from months {}-{} to {}-{}",
                    skill.name,
                    current.start,
                    current.end,
                    start,
                    end
                );
                moved += 1;
                Placement { start, end }
            }
            None => current,
        };

        occupancy.occupy(id, placement.start, placement.end, critical);
        placements[id as usize] = Some(placement);
    }

    moved
}
