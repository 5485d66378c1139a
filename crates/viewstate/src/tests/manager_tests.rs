use std::any::Any;

use super::*;
use crate::controller::ChildSlots;

fn identity(view_state: &ViewState) -> *const ViewState {
    view_state
}

#[test]
fn creates_first_view_state_on_empty_registry() {
    let mut vsm = ViewStateManager::new();
    let vs = vsm.get_view_state(None, false).expect("view state");
    assert_eq!(vs.index(), 0);
    assert_eq!(vsm.len(), 1);
}

#[test]
fn none_id_always_creates() {
    let mut vsm = ViewStateManager::new();
    let first = identity(vsm.get_view_state(None, false).expect("first"));
    let second = vsm.get_view_state(None, false).expect("second");
    assert_eq!(second.index(), 1);
    assert_ne!(identity(second), first);
    assert_eq!(vsm.len(), 2);
}

#[test]
fn existing_index_returns_same_instance() {
    let mut vsm = ViewStateManager::new();
    let created = identity(vsm.get_view_state(None, false).expect("created"));
    let fetched = vsm.get_view_state(Some(0), false).expect("fetched");
    assert_eq!(fetched.index(), 0);
    assert_eq!(identity(fetched), created);
    assert_eq!(vsm.len(), 1);
}

#[test]
fn existing_index_is_returned_even_with_no_create() {
    let mut vsm = ViewStateManager::new();
    vsm.get_view_state(None, false).expect("created");
    let vs = vsm.get_view_state(Some(0), true).expect("fetched");
    assert_eq!(vs.index(), 0);
}

#[test]
fn out_of_range_id_appends_at_next_index() {
    let mut vsm = ViewStateManager::new();
    vsm.get_view_state(None, false).expect("first");
    let vs = vsm.get_view_state(Some(3), false).expect("second");
    assert_eq!(vs.index(), 1);
    assert_eq!(vsm.len(), 2);
    assert!(vsm.get(3).is_none());
}

#[test]
fn no_create_fails_for_none_and_out_of_range() {
    let mut vsm = ViewStateManager::new();

    let err = vsm.get_view_state(None, true).expect_err("none");
    assert!(matches!(err, ViewStateError::NoViewState { requested: None }));

    let err = vsm.get_view_state(Some(5), true).expect_err("out of range");
    assert!(matches!(err, ViewStateError::NoViewState { requested: Some(5) }));

    assert!(vsm.is_empty());
}

#[test]
fn no_create_with_negative_id_never_looks_up() {
    let mut vsm = ViewStateManager::new();
    vsm.get_view_state(None, false).expect("created");
    let err = vsm.get_view_state(Some(-1), true).expect_err("negative");
    assert!(matches!(err, ViewStateError::NoViewState { requested: Some(-1) }));
    assert_eq!(vsm.len(), 1);
}

#[test]
fn negative_ids_create_instead_of_indexing_from_end() {
    let mut vsm = ViewStateManager::new();
    assert_eq!(vsm.get_view_state(Some(-1), false).expect("vs").index(), 0);
    assert_eq!(vsm.get_view_state(Some(-1), false).expect("vs").index(), 1);
    assert_eq!(vsm.get_view_state(Some(-2), false).expect("vs").index(), 2);
    assert_eq!(vsm.get_view_state(Some(i64::MIN), false).expect("vs").index(), 3);
}

#[test]
fn indices_match_creation_order() {
    let mut vsm = ViewStateManager::new();
    for requested in [None, Some(10), Some(-4), None] {
        vsm.get_view_state(requested, false).expect("vs");
    }
    let indices: Vec<usize> = vsm.iter().map(ViewState::index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
}

#[test]
fn view_states_keep_independent_trees() {
    let mut vsm = ViewStateManager::new();
    vsm.get_view_state(None, false)
        .expect("first")
        .push_controller("page.main", Box::new(BaseController::new()))
        .expect("push");
    vsm.get_view_state(None, false).expect("second");

    let first = vsm.get_view_state(Some(0), true).expect("first");
    assert!(first.controller_from_path("page.main").is_ok());
    let second = vsm.get(1).expect("second");
    assert!(second.controller_from_path("page.main").is_err());
}

#[derive(Debug, Default)]
struct ShellController {
    slots: ChildSlots,
}

impl Controller for ShellController {
    fn type_path(&self) -> &str {
        "test.shell"
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

#[test]
fn root_factory_builds_each_new_root() {
    let mut vsm = ViewStateManager::with_root_factory(|| Box::new(ShellController::default()));
    let vs = vsm.get_view_state(None, false).expect("vs");
    assert_eq!(vs.root().type_path(), "test.shell");
    assert!(vs.root().downcast_ref::<ShellController>().is_some());
}
