use anyhow::Context;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::dto::{BatchRequest, BatchResponse};
use crate::{
    auth::extractors::AuthUser,
    error::ApiError,
    extractors::AppJson,
    state::AppState,
    users::repo_types::{User, UserStatus},
};

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", get(get_user))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/block", post(block_users))
        .route("/unblock", post(unblock_users))
        .route("/delete", post(delete_users))
}

// --- handlers ---

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.store.list_all().await?))
}

/// A missing row is reported as a store failure (500), not 404.
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    fetch_user(&state, &id).await.map(Json).map_err(|e| {
        debug!(%id, "get_user failed");
        ApiError::Internal(e)
    })
}

#[instrument(skip(state, body))]
pub async fn block_users(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(body): AppJson<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    set_status(&state, body, UserStatus::Blocked).await
}

#[instrument(skip(state, body))]
pub async fn unblock_users(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(body): AppJson<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    set_status(&state, body, UserStatus::Unblocked).await
}

#[instrument(skip(state, body))]
pub async fn delete_users(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(body): AppJson<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    let ids = body.ids()?;
    let deleted = state.store.delete_by_ids(&ids).await?;
    info!(requested = ids.len(), deleted, "users deleted");
    Ok(Json(BatchResponse { user_ids: body.user_ids }))
}

async fn fetch_user(state: &AppState, id: &str) -> anyhow::Result<User> {
    let id = Uuid::parse_str(id).context("parse user id")?;
    state
        .store
        .find_by_id(id)
        .await?
        .with_context(|| format!("no user row for id {id}"))
}

async fn set_status(
    state: &AppState,
    body: BatchRequest,
    status: UserStatus,
) -> Result<Json<BatchResponse>, ApiError> {
    let ids = body.ids()?;
    let updated = state.store.update_status(&ids, status).await?;
    info!(requested = ids.len(), updated, status = status.as_str(), "user status changed");
    Ok(Json(BatchResponse { user_ids: body.user_ids }))
}
