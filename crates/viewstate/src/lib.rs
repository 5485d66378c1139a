//! Server-side UI state: trees of named controller slots, where every slot
//! holds a stack of controllers, plus a per-session registry of such trees.
//!
//! Controllers are addressed with dotted paths rooted at `page`
//! (`page.sidebar.panel`). Each segment after the root descends into the
//! top-of-stack controller of the named slot.

mod controller;
pub mod error;
mod factory;
mod manager;
pub mod path;
mod view_state;

pub use controller::{ChildSlots, Controller, BaseController, BASE_CONTROLLER_TYPE};
pub use error::{Result, ViewStateError};
pub use factory::{Constructor, ControllerArgs, ControllerFactory, ControllerRegistry};
pub use manager::{RootFactory, ViewStateManager};
pub use path::{split_and_validate_path, ViewPath, PATH_SEPARATOR, ROOT_SEGMENT};
pub use view_state::{default_view_state, ViewState, ViewStateBuilder};
