//! Interaction CRUD handlers.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::Result,
    middleware::auth::AuthenticatedUser,
    models::interactions::{
        CreateInteractionRequest, InteractionListQuery, UpdateInteractionRequest,
    },
    services::interactions,
    state::AppState,
};

/// GET /api/interactions
///
/// Lists the caller's interactions, newest first, optionally filtered to
/// one client or project.
pub async fn list_interactions(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<InteractionListQuery>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let page = interactions::list_interactions(&mut conn, auth_user.id, query).await?;

    Ok(Json(serde_json::json!({
        "message": "Interactions retrieved successfully",
        "interactions": page.items,
        "pagination": page.pagination,
    })))
}

/// GET /api/interactions/{id}
pub async fn get_interaction(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let interaction = interactions::get_interaction(&mut conn, auth_user.id, id).await?;

    Ok(Json(serde_json::json!({
        "message": "Interaction retrieved successfully",
        "interaction": interaction,
    })))
}

/// POST /api/interactions
///
/// Requires at least one of clientId/projectId, each owned by the caller.
pub async fn create_interaction(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateInteractionRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let mut conn = state.pool.acquire().await?;

    let interaction = interactions::create_interaction(&mut conn, auth_user.id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Interaction created successfully",
            "interaction": interaction,
        })),
    ))
}

/// PUT /api/interactions/{id}
pub async fn update_interaction(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInteractionRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let interaction =
        interactions::update_interaction(&mut conn, auth_user.id, id, request).await?;

    Ok(Json(serde_json::json!({
        "message": "Interaction updated successfully",
        "interaction": interaction,
    })))
}

/// DELETE /api/interactions/{id}
pub async fn delete_interaction(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    interactions::delete_interaction(&mut conn, auth_user.id, id).await?;

    Ok(Json(serde_json::json!({
        "message": "Interaction deleted successfully",
    })))
}
