use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_core::{constant::MSG_STORE_UNAVAILABLE, state::MessageResponse, BlogError};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Blog(#[from] BlogError),

    /// The path segment is not a post id, so no post can match it.
    #[error("Post does not exist with the given ID({raw})")]
    InvalidId { raw: String },

    /// The request body could not be read as a post.
    #[error("{msg}")]
    BadRequest { msg: String },

    /// The store task is gone; nothing can be served anymore.
    #[error("post store unavailable")]
    StoreUnavailable,
}

impl ServerError {
    pub fn invalid_id(raw: String) -> Self {
        Self::InvalidId { raw }
    }

    pub fn bad_request(msg: String) -> Self {
        Self::BadRequest { msg }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Blog(BlogError::PostNotFound { .. }) | ServerError::InvalidId { .. } => {
                StatusCode::NOT_FOUND
            }
            ServerError::Blog(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            ServerError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ServerError::Blog(_) | ServerError::StoreUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The JSON body sent back to the caller.
    pub fn body(&self) -> MessageResponse {
        match self {
            ServerError::Blog(BlogError::PostNotFound { .. }) | ServerError::InvalidId { .. } => {
                MessageResponse::not_found()
            }
            ServerError::Blog(err) if err.is_validation() => MessageResponse::fields_required(),
            ServerError::Blog(err) => MessageResponse::new(err.to_string()),
            ServerError::BadRequest { msg } => MessageResponse::new(msg.clone()),
            ServerError::StoreUnavailable => MessageResponse::new(MSG_STORE_UNAVAILABLE),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self}");
        } else {
            warn!("Request rejected ({status}): {self}");
        }
        (status, Json(self.body())).into_response()
    }
}

impl<T> From<mpsc::error::SendError<T>> for ServerError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        Self::StoreUnavailable
    }
}

impl From<oneshot::error::RecvError> for ServerError {
    fn from(_: oneshot::error::RecvError) -> Self {
        Self::StoreUnavailable
    }
}
