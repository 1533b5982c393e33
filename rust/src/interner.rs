//! Skill name interning.
//!
//! Maps skill names to dense integer ids so graph and occupancy data can
//! live in plain vectors indexed by id.

use rustc_hash::FxHashMap;

/// Interned skill id (index into the normalized skill list).
pub type SkillId = u32;

/// Bidirectional map between skill names and dense ids.
#[derive(Debug, Clone)]
pub struct SkillInterner {
    to_id: FxHashMap<String, SkillId>,
    names: Vec<String>,
}

impl SkillInterner {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_id: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            names: Vec::with_capacity(capacity),
        }
    }

    /// Intern a name, returning its id. Existing names keep their id.
    pub fn intern(&mut self, name: &str) -> SkillId {
        if let Some(&id) = self.to_id.get(name) {
            return id;
        }
        let id = self.names.len() as SkillId;
        self.names.push(name.to_string());
        self.to_id.insert(name.to_string(), id);
        id
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<SkillId> {
        self.to_id.get(name).copied()
    }

    #[inline]
    pub fn resolve(&self, id: SkillId) -> Option<&str> {
        self.names.get(id as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for SkillInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
