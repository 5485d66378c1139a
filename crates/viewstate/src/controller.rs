use std::{
    any::Any,
    collections::{btree_map::Entry, BTreeMap},
    fmt,
};

use shared::protocol::{ControllerSummary, SlotSummary};

use crate::factory::ControllerArgs;

pub const BASE_CONTROLLER_TYPE: &str = "controller.base";

/// Named child slots of a controller. Each slot is a LIFO stack; the last
/// element is the slot's current controller.
#[derive(Debug, Default)]
pub struct ChildSlots {
    stacks: BTreeMap<String, Vec<Box<dyn Controller>>>,
}

impl ChildSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole stack at `name` with `controller` alone.
    pub fn set(&mut self, name: &str, controller: Box<dyn Controller>) {
        self.stacks.insert(name.to_owned(), vec![controller]);
    }

    pub fn push(&mut self, name: &str, controller: Box<dyn Controller>) {
        self.stacks
            .entry(name.to_owned())
            .or_default()
            .push(controller);
    }

    /// Popping the last controller removes the slot itself.
    pub fn pop(&mut self, name: &str) -> Option<Box<dyn Controller>> {
        let Entry::Occupied(mut stack) = self.stacks.entry(name.to_owned()) else {
            return None;
        };
        let popped = stack.get_mut().pop();
        if stack.get().is_empty() {
            stack.remove();
        }
        popped
    }

    pub fn top(&self, name: &str) -> Option<&dyn Controller> {
        let top = self.stacks.get(name)?.last()?;
        Some(top.as_ref())
    }

    pub fn top_mut(&mut self, name: &str) -> Option<&mut dyn Controller> {
        let top = self.stacks.get_mut(name)?.last_mut()?;
        Some(top.as_mut())
    }

    pub fn depth(&self, name: &str) -> usize {
        self.stacks.get(name).map_or(0, Vec::len)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stacks.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

/// A node in a view state tree.
///
/// Implementors only supply storage for their slots; the stack operations
/// have default implementations over [`ChildSlots`] and may be overridden to
/// observe or veto changes.
pub trait Controller: Any + Send + fmt::Debug {
    /// Type path the controller was registered under.
    fn type_path(&self) -> &str;

    fn slots(&self) -> &ChildSlots;

    fn slots_mut(&mut self) -> &mut ChildSlots;

    fn as_any(&self) -> &dyn Any;

    fn set_child(&mut self, name: &str, controller: Box<dyn Controller>) {
        self.slots_mut().set(name, controller);
    }

    fn push_child(&mut self, name: &str, controller: Box<dyn Controller>) {
        self.slots_mut().push(name, controller);
    }

    /// Detaches and returns the top of the stack at `name`.
    fn pop_child(&mut self, name: &str) -> Option<Box<dyn Controller>> {
        self.slots_mut().pop(name)
    }

    fn child(&self, name: &str) -> Option<&dyn Controller> {
        self.slots().top(name)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut dyn Controller> {
        self.slots_mut().top_mut(name)
    }

    fn summary(&self) -> ControllerSummary {
        let slots = self.slots();
        ControllerSummary {
            type_path: self.type_path().to_owned(),
            slots: slots
                .names()
                .map(|name| SlotSummary {
                    name: name.to_owned(),
                    depth: slots.depth(name),
                    top_type: slots.top(name).map(|top| top.type_path().to_owned()),
                })
                .collect(),
        }
    }
}

impl dyn Controller {
    pub fn downcast_ref<T: Controller>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Plain controller with no behavior beyond its slots. Keeps the arguments
/// it was constructed with.
#[derive(Debug, Default)]
pub struct BaseController {
    slots: ChildSlots,
    args: ControllerArgs,
}

impl BaseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_args(args: ControllerArgs) -> Self {
        Self {
            slots: ChildSlots::new(),
            args,
        }
    }

    pub fn args(&self) -> &ControllerArgs {
        &self.args
    }
}

impl Controller for BaseController {
    fn type_path(&self) -> &str {
        BASE_CONTROLLER_TYPE
    }

    fn slots(&self) -> &ChildSlots {
        &self.slots
    }

    fn slots_mut(&mut self) -> &mut ChildSlots {
        &mut self.slots
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
