use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

pub type Result<T, E = ViewStateError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ViewStateError {
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
    #[error("no controller at slot '{segment}' while resolving '{path}'")]
    PathNotFound { path: String, segment: String },
    #[error("cannot insert or push at '{path}': the root controller has no enclosing slot")]
    RootInsert { path: String },
    #[error("cannot pop '{path}': the root controller can never be popped")]
    RootPop { path: String },
    #[error("unknown controller type '{type_path}'")]
    UnknownControllerType { type_path: String },
    #[error("controller type '{type_path}' rejected its arguments: {message}")]
    InvalidControllerArgs { type_path: String, message: String },
    #[error("no view state for id {requested:?} and creation is disabled")]
    NoViewState { requested: Option<i64> },
    #[error("a view state requires a root controller")]
    Construction,
}

impl ViewStateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPath { .. }
            | Self::RootInsert { .. }
            | Self::RootPop { .. }
            | Self::InvalidControllerArgs { .. } => ErrorCode::Validation,
            Self::PathNotFound { .. }
            | Self::UnknownControllerType { .. }
            | Self::NoViewState { .. } => ErrorCode::NotFound,
            Self::Construction => ErrorCode::Internal,
        }
    }
}

impl From<ViewStateError> for ApiError {
    fn from(value: ViewStateError) -> Self {
        ApiError::new(value.code(), value.to_string())
    }
}
