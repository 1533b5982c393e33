//! Priority tiers and the within-tier ordering.
//!
//! Skills are split into three tiers, placed in this order:
//! - critical technical: essential + advanced + technical (mutually exclusive in time)
//! - critical non-technical: essential + advanced, any other type
//! - other: everything else
//!
//! Within a tier, more important, easier and shorter skills are attempted first.

use crate::interner::SkillId;
use crate::models::{Skill, SkillType};

/// Which placement tier a skill belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    CriticalTechnical,
    CriticalNonTechnical,
    Other,
}

impl Tier {
    pub fn of(skill: &Skill) -> Self {
        match (skill.is_critical(), skill.skill_type) {
            (true, SkillType::Technical) => Self::CriticalTechnical,
            (true, SkillType::NonTechnical) => Self::CriticalNonTechnical,
            (false, _) => Self::Other,
        }
    }
}

/// Sort key within a tier. Lower = attempted first.
///
/// Field order matters: the derived `Ord` compares importance, then
/// difficulty, then duration, then topological position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TierKey {
    pub importance_rank: u8,
    pub difficulty_rank: u8,
    pub duration_months: u32,
    pub topo_position: usize,
}

impl TierKey {
    pub fn new(skill: &Skill, topo_position: usize) -> Self {
        Self {
            importance_rank: skill.importance.rank(),
            difficulty_rank: skill.difficulty.rank(),
            duration_months: skill.duration_months,
            topo_position,
        }
    }
}

/// Skill ids grouped by tier, each group already sorted by `TierKey`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tiers {
    pub critical_technical: Vec<SkillId>,
    pub critical_non_technical: Vec<SkillId>,
    pub other: Vec<SkillId>,
}

impl Tiers {
    /// All ids in placement priority order.
    pub fn sequence(&self) -> Vec<SkillId> {
        self.critical_technical
            .iter()
            .chain(&self.critical_non_technical)
            .chain(&self.other)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.critical_technical.len() + self.critical_non_technical.len() + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition topologically ordered skills into sorted tiers.
pub fn partition(skills: &[Skill], topo_order: &[SkillId]) -> Tiers {
    let mut keyed: Vec<(TierKey, Tier, SkillId)> = topo_order
        .iter()
        .enumerate()
        .map(|(pos, &id)| {
            let skill = &skills[id as usize];
            (TierKey::new(skill, pos), Tier::of(skill), id)
        })
        .collect();

    keyed.sort_by_key(|(key, _, _)| *key);

    let mut tiers = Tiers::default();
    for (_, tier, id) in keyed {
        match tier {
            Tier::CriticalTechnical => tiers.critical_technical.push(id),
            Tier::CriticalNonTechnical => tiers.critical_non_technical.push(id),
            Tier::Other => tiers.other.push(id),
        }
    }
    tiers
}
