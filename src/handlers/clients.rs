//! Client CRUD handlers
//!
//! Handlers follow the thin-layer pattern: they extract inputs, delegate
//! to the service layer, and wrap results in the response envelope. All
//! ownership and validation rules live in the services.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::Result,
    middleware::auth::AuthenticatedUser,
    models::clients::{ClientListQuery, CreateClientRequest, UpdateClientRequest},
    services::clients,
    state::AppState,
};

/// GET /api/clients
///
/// Lists the caller's clients with optional search, sorting, and paging.
pub async fn list_clients(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<ClientListQuery>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let page = clients::list_clients(&mut conn, auth_user.id, query).await?;

    Ok(Json(serde_json::json!({
        "message": "Clients retrieved successfully",
        "clients": page.items,
        "pagination": page.pagination,
    })))
}

/// GET /api/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let client = clients::get_client(&mut conn, auth_user.id, id).await?;

    Ok(Json(serde_json::json!({
        "message": "Client retrieved successfully",
        "client": client,
    })))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let mut conn = state.pool.acquire().await?;

    let client = clients::create_client(&mut conn, auth_user.id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Client created successfully",
            "client": client,
        })),
    ))
}

/// PUT /api/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let client = clients::update_client(&mut conn, auth_user.id, id, request).await?;

    Ok(Json(serde_json::json!({
        "message": "Client updated successfully",
        "client": client,
    })))
}

/// DELETE /api/clients/{id}
///
/// Removes the client and everything that references it.
pub async fn delete_client(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    clients::delete_client(&mut conn, auth_user.id, id).await?;

    Ok(Json(serde_json::json!({
        "message": "Client deleted successfully",
    })))
}
