use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::{
    domain::SessionId,
    error::{ApiError, ErrorCode},
    protocol::{
        ControllerSummary, NewControllerRequest, SessionResponse, ViewStateRequest,
        ViewStateResponse,
    },
};
use tracing::debug;
use uuid::Uuid;
use viewstate::{ControllerArgs, ViewStateError};

use crate::app_state::{AppState, SharedManager};

pub(crate) type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

type ControllerRoute = Path<(Uuid, i64, String)>;

pub(crate) async fn create_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session_id = state.create_session().await;
    Json(SessionResponse { session_id })
}

pub(crate) async fn view_state(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<ViewStateRequest>,
) -> ApiResult<ViewStateResponse> {
    let session_id = SessionId(session_id);
    let manager = session(&state, session_id).await?;
    let mut manager = manager.lock().await;
    let view_state = manager
        .get_view_state(req.view_state_id.map(|id| id.0), req.no_create)
        .map_err(reject)?;
    Ok(Json(ViewStateResponse {
        session_id,
        index: view_state.index(),
    }))
}

pub(crate) async fn get_controller(
    State(state): State<Arc<AppState>>,
    Path((session_id, index, path)): ControllerRoute,
) -> ApiResult<ControllerSummary> {
    let manager = session(&state, SessionId(session_id)).await?;
    let mut manager = manager.lock().await;
    let view_state = manager.get_view_state(Some(index), true).map_err(reject)?;
    view_state.summarize(&path).map(Json).map_err(reject)
}

pub(crate) async fn insert_controller(
    State(state): State<Arc<AppState>>,
    Path((session_id, index, path)): ControllerRoute,
    Json(req): Json<NewControllerRequest>,
) -> ApiResult<ControllerSummary> {
    let manager = session(&state, SessionId(session_id)).await?;
    let mut manager = manager.lock().await;
    let view_state = manager.get_view_state(Some(index), true).map_err(reject)?;
    let (type_path, args) = controller_args(req);
    view_state
        .insert_new_controller(state.factory.as_ref(), &path, &type_path, args)
        .map_err(reject)?;
    view_state.summarize(&path).map(Json).map_err(reject)
}

pub(crate) async fn push_controller(
    State(state): State<Arc<AppState>>,
    Path((session_id, index, path)): ControllerRoute,
    Json(req): Json<NewControllerRequest>,
) -> ApiResult<ControllerSummary> {
    let manager = session(&state, SessionId(session_id)).await?;
    let mut manager = manager.lock().await;
    let view_state = manager.get_view_state(Some(index), true).map_err(reject)?;
    let (type_path, args) = controller_args(req);
    view_state
        .push_new_controller(state.factory.as_ref(), &path, &type_path, args)
        .map_err(reject)?;
    view_state.summarize(&path).map(Json).map_err(reject)
}

pub(crate) async fn pop_controller(
    State(state): State<Arc<AppState>>,
    Path((session_id, index, path)): ControllerRoute,
) -> ApiResult<ControllerSummary> {
    let manager = session(&state, SessionId(session_id)).await?;
    let mut manager = manager.lock().await;
    let view_state = manager.get_view_state(Some(index), true).map_err(reject)?;
    let popped = view_state.pop_controller(&path).map_err(reject)?;
    Ok(Json(popped.summary()))
}

async fn session(
    state: &AppState,
    session_id: SessionId,
) -> Result<SharedManager, (StatusCode, Json<ApiError>)> {
    state.session(session_id).await.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(
                ErrorCode::NotFound,
                format!("unknown session {session_id}"),
            )),
        )
    })
}

fn controller_args(req: NewControllerRequest) -> (String, ControllerArgs) {
    let args = ControllerArgs {
        positional: req.args,
        keyword: req.kwargs,
    };
    (req.controller_type, args)
}

fn reject(error: ViewStateError) -> (StatusCode, Json<ApiError>) {
    let status = match error.code() {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    debug!(%error, %status, "rejecting view state request");
    (status, Json(error.into()))
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
