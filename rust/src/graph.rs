//! Prerequisite graph construction, cycle detection and topological ordering.

use std::collections::VecDeque;
use thiserror::Error;

use crate::interner::{SkillId, SkillInterner};
use crate::models::Skill;

/// Structural problems in the prerequisite graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The prerequisites form a cycle. Holds the cycle path when DFS found it.
    #[error("Circular prerequisite dependency: {}", .0.join(" -> "))]
    CircularDependency(Vec<String>),
}

/// Directed graph with an edge `prereq -> skill` for every resolvable prerequisite.
///
/// Ids are positions in the skill slice the graph was built from.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    interner: SkillInterner,
    prerequisites: Vec<Vec<SkillId>>,
    dependents: Vec<Vec<SkillId>>,
}

impl DependencyGraph {
    /// Build the graph. Prerequisite names that do not match any skill are dropped.
    pub fn build(skills: &[Skill]) -> Self {
        let mut interner = SkillInterner::with_capacity(skills.len());
        for skill in skills {
            interner.intern(&skill.name);
        }

        let mut prerequisites: Vec<Vec<SkillId>> = vec![Vec::new(); skills.len()];
        let mut dependents: Vec<Vec<SkillId>> = vec![Vec::new(); skills.len()];

        for (idx, skill) in skills.iter().enumerate() {
            let skill_id = idx as SkillId;
            for prereq in &skill.prerequisites {
                let Some(prereq_id) = interner.get(prereq) else {
                    continue;
                };
                if prerequisites[idx].contains(&prereq_id) {
                    continue;
                }
                prerequisites[idx].push(prereq_id);
                dependents[prereq_id as usize].push(skill_id);
            }
        }

        Self {
            interner,
            prerequisites,
            dependents,
        }
    }

    pub fn len(&self) -> usize {
        self.prerequisites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prerequisites.is_empty()
    }

    /// Resolved prerequisites of a skill.
    pub fn prerequisites(&self, id: SkillId) -> &[SkillId] {
        &self.prerequisites[id as usize]
    }

    /// Skills that list this one as a prerequisite.
    pub fn dependents(&self, id: SkillId) -> &[SkillId] {
        &self.dependents[id as usize]
    }

    pub fn name(&self, id: SkillId) -> &str {
        self.interner.resolve(id).unwrap_or_default()
    }

    /// Depth-first search tracking which skills are on the current path.
    ///
    /// Returns the first cycle found as a closed path (`a, b, a`).
    pub fn find_cycle(&self) -> Option<Vec<SkillId>> {
        let mut visited = vec![false; self.len()];
        let mut on_stack = vec![false; self.len()];

        for id in 0..self.len() as SkillId {
            if visited[id as usize] {
                continue;
            }
            if let Some(cycle) = self.detect_cycle_dfs(id, &mut visited, &mut on_stack) {
                return Some(cycle);
            }
        }
        None
    }

    /// Iterative DFS from `root`; the explicit stack doubles as the current path.
    fn detect_cycle_dfs(
        &self,
        root: SkillId,
        visited: &mut [bool],
        on_stack: &mut [bool],
    ) -> Option<Vec<SkillId>> {
        // Each frame holds a skill and the index of its next prerequisite to follow
        let mut stack: Vec<(SkillId, usize)> = vec![(root, 0)];
        visited[root as usize] = true;
        on_stack[root as usize] = true;

        while let Some(frame) = stack.last_mut() {
            let (current, edge) = *frame;
            let Some(&next) = self.prerequisites(current).get(edge) else {
                on_stack[current as usize] = false;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            if !visited[next as usize] {
                visited[next as usize] = true;
                on_stack[next as usize] = true;
                stack.push((next, 0));
            } else if on_stack[next as usize] {
                // Back-edge: the cycle is the path suffix starting at `next`
                let start = stack.iter().position(|&(id, _)| id == next).unwrap_or(0);
                let mut cycle: Vec<SkillId> = stack[start..].iter().map(|&(id, _)| id).collect();
                cycle.push(next);
                return Some(cycle);
            }
        }
        None
    }

    /// Kahn's algorithm with a FIFO frontier seeded in input order.
    ///
    /// Prerequisites always come before the skills that need them.
    pub fn topological_order(&self) -> Result<Vec<SkillId>, GraphError> {
        let mut in_degree: Vec<usize> = self.prerequisites.iter().map(|p| p.len()).collect();

        let mut queue: VecDeque<SkillId> = (0..self.len() as SkillId)
            .filter(|&id| in_degree[id as usize] == 0)
            .collect();

        let mut order: Vec<SkillId> = Vec::with_capacity(self.len());

        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &dependent in self.dependents(id) {
                let degree = &mut in_degree[dependent as usize];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if order.len() != self.len() {
            return Err(GraphError::CircularDependency(Vec::new()));
        }

        Ok(order)
    }

    /// Check for cycles, then produce the topological order.
    pub fn resolve_order(&self) -> Result<Vec<SkillId>, GraphError> {
        if let Some(cycle) = self.find_cycle() {
            let names = cycle.iter().map(|&id| self.name(id).to_string()).collect();
            return Err(GraphError::CircularDependency(names));
        }
        self.topological_order()
    }
}
