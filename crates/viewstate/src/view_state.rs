use shared::protocol::ControllerSummary;
use tracing::debug;

use crate::{
    controller::{BaseController, Controller},
    error::{Result, ViewStateError},
    factory::{ControllerArgs, ControllerFactory},
    path::ViewPath,
};

/// One tree of controllers, rooted at the `page` controller.
///
/// Every mutating operation resolves the parent of the addressed slot first
/// and only then touches the tree, so a failed call leaves it unchanged.
#[derive(Debug)]
pub struct ViewState {
    index: usize,
    root: Box<dyn Controller>,
}

#[derive(Debug, Default)]
pub struct ViewStateBuilder {
    root: Option<Box<dyn Controller>>,
    index: usize,
}

impl ViewStateBuilder {
    pub fn root(mut self, root: Box<dyn Controller>) -> Self {
        self.root = Some(root);
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn build(self) -> Result<ViewState> {
        let root = self.root.ok_or(ViewStateError::Construction)?;
        Ok(ViewState::with_index(root, self.index))
    }
}

/// A standalone view state rooted at a fresh [`BaseController`].
pub fn default_view_state() -> ViewState {
    ViewState::new(Box::new(BaseController::new()))
}

impl ViewState {
    pub fn new(root: Box<dyn Controller>) -> Self {
        Self::with_index(root, 0)
    }

    pub fn builder() -> ViewStateBuilder {
        ViewStateBuilder::default()
    }

    pub(crate) fn with_index(root: Box<dyn Controller>, index: usize) -> Self {
        Self { index, root }
    }

    /// Position of this view state in its owning manager.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn root(&self) -> &dyn Controller {
        self.root.as_ref()
    }

    pub fn controller_from_path(&self, path: &str) -> Result<&dyn Controller> {
        let path = ViewPath::parse(path)?;
        descend(self.root.as_ref(), path.slots(), &path)
    }

    pub fn controller_from_path_mut(&mut self, path: &str) -> Result<&mut dyn Controller> {
        let path = ViewPath::parse(path)?;
        descend_mut(self.root.as_mut(), path.slots(), &path)
    }

    pub fn summarize(&self, path: &str) -> Result<ControllerSummary> {
        Ok(self.controller_from_path(path)?.summary())
    }

    /// Replaces the stack at the addressed slot with `controller`.
    pub fn insert_controller(&mut self, path: &str, controller: Box<dyn Controller>) -> Result<()> {
        let index = self.index;
        self.with_parent(path, root_insert, |parent, slot| {
            debug!(index, path, slot, type_path = controller.type_path(), "inserting controller");
            parent.set_child(slot, controller);
            Some(())
        })
    }

    pub fn insert_new_controller(
        &mut self,
        factory: &dyn ControllerFactory,
        path: &str,
        type_path: &str,
        args: ControllerArgs,
    ) -> Result<()> {
        let controller = factory.init_controller(type_path, args)?;
        self.insert_controller(path, controller)
    }

    pub fn push_controller(&mut self, path: &str, controller: Box<dyn Controller>) -> Result<()> {
        let index = self.index;
        self.with_parent(path, root_insert, |parent, slot| {
            debug!(index, path, slot, type_path = controller.type_path(), "pushing controller");
            parent.push_child(slot, controller);
            Some(())
        })
    }

    pub fn push_new_controller(
        &mut self,
        factory: &dyn ControllerFactory,
        path: &str,
        type_path: &str,
        args: ControllerArgs,
    ) -> Result<()> {
        let controller = factory.init_controller(type_path, args)?;
        self.push_controller(path, controller)
    }

    /// Detaches the controller at `path` from its slot and hands it back.
    pub fn pop_controller(&mut self, path: &str) -> Result<Box<dyn Controller>> {
        let index = self.index;
        self.with_parent(path, root_pop, |parent, slot| {
            let popped = parent.pop_child(slot)?;
            debug!(index, path, slot, type_path = popped.type_path(), "popped controller");
            Some(popped)
        })
    }

    /// Resolves the parent of the last slot in `path` and runs `apply` on
    /// it. `apply` returning `None` means the slot itself was empty.
    fn with_parent<T>(
        &mut self,
        path: &str,
        root_error: fn(&ViewPath) -> ViewStateError,
        apply: impl FnOnce(&mut dyn Controller, &str) -> Option<T>,
    ) -> Result<T> {
        let path = ViewPath::parse(path)?;
        let Some((parents, slot)) = path.split_last() else {
            return Err(root_error(&path));
        };
        let parent = descend_mut(self.root.as_mut(), parents, &path)?;
        apply(parent, slot).ok_or_else(|| not_found(&path, slot))
    }
}

fn descend<'a>(
    mut node: &'a dyn Controller,
    slots: &[String],
    path: &ViewPath,
) -> Result<&'a dyn Controller> {
    for slot in slots {
        node = node.child(slot).ok_or_else(|| not_found(path, slot))?;
    }
    Ok(node)
}

fn descend_mut<'a>(
    mut node: &'a mut dyn Controller,
    slots: &[String],
    path: &ViewPath,
) -> Result<&'a mut dyn Controller> {
    for slot in slots {
        node = node.child_mut(slot).ok_or_else(|| not_found(path, slot))?;
    }
    Ok(node)
}

fn not_found(path: &ViewPath, slot: &str) -> ViewStateError {
    ViewStateError::PathNotFound {
        path: path.to_string(),
        segment: slot.to_owned(),
    }
}

fn root_insert(path: &ViewPath) -> ViewStateError {
    ViewStateError::RootInsert {
        path: path.to_string(),
    }
}

fn root_pop(path: &ViewPath) -> ViewStateError {
    ViewStateError::RootPop {
        path: path.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
