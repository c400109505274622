//! REST API exposure
//!
//! Three fixed projections over the same resolution core the graph endpoint
//! uses. Each handler issues one pre-built lookup; nothing here is
//! client-configurable.
//!
//! Contract notes:
//! - `GET /users/{id}` resolves through the query executor with the fixed
//!   selection `{id, name, email}` and renders a 404 with
//!   `{"message": "User not found"}` when the root resolves to null.
//! - The two collection routes read the store's foreign-key indices directly
//!   and return an empty array, never a 404, when nothing matches.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::core::entity::{Comment, EntityId, Post};
use crate::core::error::RequestError;
use crate::query::{Executor, FieldSelection, SelectionSet};
use crate::server::AppState;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router over the shared application state.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/users/{id}", get(get_user))
            .route("/users/{id}/posts", get(list_user_posts))
            .route("/posts/{id}/comments", get(list_post_comments))
            .with_state(state)
    }
}

fn parse_entity_id(raw: &str) -> Result<EntityId, RequestError> {
    raw.parse().map_err(|_| RequestError::InvalidEntityId {
        id: raw.to_string(),
    })
}

/// `GET /users/{id}`: fixed `{id, name, email}` projection.
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, RequestError> {
    let id = parse_entity_id(&id)?;

    let selection = SelectionSet::new(vec![
        FieldSelection::field("user")
            .argument("id", json!(id))
            .select(FieldSelection::field("id"))
            .select(FieldSelection::field("name"))
            .select(FieldSelection::field("email")),
    ]);

    let resolved = Executor::new(&state.schema, &state.store).execute(&selection);

    match &resolved.data["user"] {
        Value::Null => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({"message": "User not found"})),
        )
            .into_response()),
        user => Ok(Json(user.clone()).into_response()),
    }
}

/// `GET /users/{id}/posts`: full Post records, empty array when the user
/// has no posts or does not exist.
async fn list_user_posts(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Post>>, RequestError> {
    let id = parse_entity_id(&id)?;
    let posts: Vec<Post> = state
        .store
        .posts_by_user(id)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(posts))
}

/// `GET /posts/{id}/comments`: same empty-array policy.
async fn list_post_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Comment>>, RequestError> {
    let id = parse_entity_id(&id)?;
    let comments: Vec<Comment> = state
        .store
        .comments_by_post(id)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(comments))
}
