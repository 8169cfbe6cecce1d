use std::collections::HashMap;

use crate::api::DiscussionId;

/// Which discussions have their comment subtree expanded. Local-only UI
/// state: never sent to the backend, reset whenever the discussion list is
/// fully reloaded.
#[derive(Clone, Debug, Default)]
pub struct VisibilityState(HashMap<DiscussionId, bool>);

impl VisibilityState {
    pub fn new() -> VisibilityState {
        VisibilityState::default()
    }

    /// Flip one discussion, returning the new state
    pub fn toggle(&mut self, id: &DiscussionId) -> bool {
        let expanded = self.0.entry(id.clone()).or_insert(false);
        *expanded = !*expanded;
        *expanded
    }

    /// Collapsed unless explicitly expanded
    pub fn is_expanded(&self, id: &DiscussionId) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    pub fn forget(&mut self, id: &DiscussionId) {
        self.0.remove(id);
    }

    pub fn reset(&mut self) {
        self.0.clear();
    }
}
