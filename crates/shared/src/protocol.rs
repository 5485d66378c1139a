use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{SessionId, ViewStateId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: SessionId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewStateRequest {
    #[serde(default)]
    pub view_state_id: Option<ViewStateId>,
    #[serde(default)]
    pub no_create: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewStateResponse {
    pub session_id: SessionId,
    pub index: usize,
}

/// Body for routes that instantiate a controller by type path before
/// placing it in the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewControllerRequest {
    pub controller_type: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub kwargs: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub name: String,
    pub depth: usize,
    pub top_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSummary {
    pub type_path: String,
    pub slots: Vec<SlotSummary>,
}
