//! Input sanitization for raw skill requirements.

use rustc_hash::FxHashSet;

use crate::models::{Difficulty, Importance, ScheduleWarning, Skill, SkillRequirement, SkillType};

/// Sanitized skills plus the data-quality warnings raised while cleaning them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedInput {
    pub skills: Vec<Skill>,
    pub warnings: Vec<ScheduleWarning>,
}

/// Clean raw requirements into typed skills.
///
/// * durations below 1 are clamped to 1 (with a warning)
/// * type, difficulty and importance labels are mapped onto fixed vocabularies
/// * repeated skill names keep the first occurrence (with a warning)
/// * repeated prerequisite names on one skill are collapsed
///
/// Input order is preserved; it is the final tie-breaker for everything downstream.
pub fn normalize(requirements: &[SkillRequirement]) -> NormalizedInput {
    let mut result = NormalizedInput::default();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for req in requirements {
        if !seen.insert(req.name.as_str()) {
            result.warnings.push(ScheduleWarning::DuplicateSkill {
                skill: req.name.clone(),
            });
            continue;
        }

        let duration_months = if req.duration_months < 1 {
            result.warnings.push(ScheduleWarning::InvalidDuration {
                skill: req.name.clone(),
                duration: req.duration_months,
            });
            1
        } else {
            req.duration_months as u32
        };

        let mut prereq_seen: FxHashSet<&str> = FxHashSet::default();
        let prerequisites = req
            .prerequisites
            .iter()
            .filter(|p| prereq_seen.insert(p.as_str()))
            .cloned()
            .collect();

        result.skills.push(Skill {
            name: req.name.clone(),
            skill_type: SkillType::parse(&req.skill_type),
            duration_months,
            difficulty: Difficulty::parse(&req.difficulty),
            importance: Importance::parse(&req.importance),
            prerequisites,
        });
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_req(
        name: &str,
        skill_type: &str,
        duration: i32,
        prereqs: Vec<&str>,
    ) -> SkillRequirement {
        SkillRequirement {
            name: name.to_string(),
            skill_type: skill_type.to_string(),
            duration_months: duration,
            difficulty: "beginner".to_string(),
            importance: "important".to_string(),
            prerequisites: prereqs.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_invalid_duration_clamped() {
        let reqs = vec![
            make_req("git", "technical", 0, vec![]),
            make_req("sql", "technical", -3, vec![]),
            make_req("python", "technical", 2, vec![]),
        ];
        let result = normalize(&reqs);

        assert_eq!(result.skills[0].duration_months, 1);
        assert_eq!(result.skills[1].duration_months, 1);
        assert_eq!(result.skills[2].duration_months, 2);
        assert_eq!(
            result.warnings,
            vec![
                ScheduleWarning::InvalidDuration {
                    skill: "git".to_string(),
                    duration: 0
                },
                ScheduleWarning::InvalidDuration {
                    skill: "sql".to_string(),
                    duration: -3
                },
            ]
        );
        assert!(result.warnings[0].to_string().contains("'git'"));
    }

    #[test]
    fn test_legacy_types_mapped() {
        let reqs = vec![
            make_req("public speaking", "soft", 1, vec![]),
            make_req("aws cert", "certification", 1, vec![]),
            make_req("docker", "devops", 1, vec![]),
        ];
        let result = normalize(&reqs);

        assert_eq!(result.skills[0].skill_type, SkillType::NonTechnical);
        assert_eq!(result.skills[1].skill_type, SkillType::NonTechnical);
        assert_eq!(result.skills[2].skill_type, SkillType::Technical);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_skill_dropped() {
        let reqs = vec![
            make_req("git", "technical", 1, vec![]),
            make_req("git", "technical", 4, vec![]),
        ];
        let result = normalize(&reqs);

        assert_eq!(result.skills.len(), 1);
        assert_eq!(result.skills[0].duration_months, 1);
        assert_eq!(
            result.warnings,
            vec![ScheduleWarning::DuplicateSkill {
                skill: "git".to_string()
            }]
        );
    }

    #[test]
    fn test_duplicate_prerequisites_collapsed() {
        let reqs = vec![make_req("ml", "technical", 2, vec!["python", "stats", "python"])];
        let result = normalize(&reqs);
        assert_eq!(result.skills[0].prerequisites, vec!["python", "stats"]);
    }
}
