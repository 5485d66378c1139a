use std::fmt;

use tracing::debug;

use crate::{
    controller::{BaseController, Controller},
    error::{Result, ViewStateError},
    view_state::ViewState,
};

/// Builds the root controller for each newly created view state.
pub type RootFactory = Box<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Append-only registry of view states. The view state at position `k`
/// always has `index() == k`; entries are never removed.
pub struct ViewStateManager {
    view_states: Vec<ViewState>,
    root_factory: RootFactory,
}

impl ViewStateManager {
    pub fn new() -> Self {
        Self::with_root_factory(|| Box::new(BaseController::new()))
    }

    pub fn with_root_factory<F>(root_factory: F) -> Self
    where
        F: Fn() -> Box<dyn Controller> + Send + Sync + 'static,
    {
        Self {
            view_states: Vec::new(),
            root_factory: Box::new(root_factory),
        }
    }

    /// Returns the view state at `id`, creating one when `id` is `None`,
    /// negative or past the end.
    ///
    /// A created view state always takes the next free index, never `id`
    /// itself, and negative ids are not treated as offsets from the end.
    /// With `no_create` set, anything that would create fails instead.
    pub fn get_view_state(&mut self, id: Option<i64>, no_create: bool) -> Result<&mut ViewState> {
        let existing = id
            .and_then(|id| usize::try_from(id).ok())
            .filter(|&index| index < self.view_states.len());

        match existing {
            Some(index) => Ok(&mut self.view_states[index]),
            None if no_create => Err(ViewStateError::NoViewState { requested: id }),
            None => Ok(self.create_view_state(id)),
        }
    }

    fn create_view_state(&mut self, requested: Option<i64>) -> &mut ViewState {
        let index = self.view_states.len();
        let root = (self.root_factory)();
        debug!(index, ?requested, root_type = root.type_path(), "creating view state");
        self.view_states.push(ViewState::with_index(root, index));
        &mut self.view_states[index]
    }

    pub fn get(&self, index: usize) -> Option<&ViewState> {
        self.view_states.get(index)
    }

    pub fn len(&self) -> usize {
        self.view_states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ViewState> {
        self.view_states.iter()
    }
}

impl Default for ViewStateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ViewStateManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewStateManager")
            .field("view_states", &self.view_states)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "tests/manager_tests.rs"]
mod tests;
