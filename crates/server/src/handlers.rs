use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use blog_core::{
    post::Post,
    state::{MessageResponse, PostPayload},
    BlogError,
};
use tracing::info;

use crate::{ServerError, StoreHandle};

/// An id that is not a number can never match a post.
fn parse_id(raw: &str) -> Result<u64, ServerError> {
    raw.parse()
        .map_err(|_| ServerError::invalid_id(raw.to_string()))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// Read the post fields from the body. A body that is empty or not sent as
/// JSON carries no fields; only a JSON body that fails to parse is an error.
fn read_payload(headers: &HeaderMap, body: &[u8]) -> Result<PostPayload, ServerError> {
    if body.is_empty() || !is_json(headers) {
        return Ok(PostPayload::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        ServerError::bad_request(format!("Failed to parse the request body as JSON: {e}"))
    })
}

pub async fn list_posts(State(store): State<StoreHandle>) -> Result<Json<Vec<Post>>, ServerError> {
    Ok(Json(store.list().await?))
}

pub async fn create_post(
    State(store): State<StoreHandle>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Post>, ServerError> {
    let PostPayload { title, content } = read_payload(&headers, &body)?;
    let post = store.create(title, content).await?;
    info!("Created post {}", post.id());
    Ok(Json(post))
}

pub async fn update_post(
    State(store): State<StoreHandle>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Post>, ServerError> {
    let id = parse_id(&id)?;
    let PostPayload { title, content } = match read_payload(&headers, &body) {
        Ok(payload) => payload,
        // An unknown id is reported before a broken body.
        Err(err) => match store.get(id).await? {
            Some(_) => return Err(err),
            None => return Err(BlogError::PostNotFound { id }.into()),
        },
    };
    let post = store.update(id, title, content).await?;
    info!("Updated post {id}");
    Ok(Json(post))
}

pub async fn delete_post(
    State(store): State<StoreHandle>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ServerError> {
    let id = parse_id(&id)?;
    store.delete(id).await?;
    info!("Deleted post {id}");
    Ok(Json(MessageResponse::deleted()))
}
