// ABOUTME: Session-scoped set of agent ids the user has picked
// ABOUTME: Membership toggles on and off; never persisted

use std::collections::HashSet;

/// Agent ids currently selected for provisioning
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership for an agent id, returning whether it is now selected
    pub fn toggle(&mut self, agent_id: &str) -> bool {
        if self.ids.remove(agent_id) {
            false
        } else {
            self.ids.insert(agent_id.to_string());
            true
        }
    }

    pub fn is_selected(&self, agent_id: &str) -> bool {
        self.ids.contains(agent_id)
    }

    /// Selected ids in a stable order, ready for a provisioning request
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
