//! Project CRUD handlers.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::Result,
    middleware::auth::AuthenticatedUser,
    models::projects::{CreateProjectRequest, ProjectListQuery, UpdateProjectRequest},
    services::projects,
    state::AppState,
};

/// GET /api/projects
///
/// Lists the caller's projects with search, status/client filters,
/// sorting, and paging. Rows carry the owning client's identity.
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let page = projects::list_projects(&mut conn, auth_user.id, query).await?;

    Ok(Json(serde_json::json!({
        "message": "Projects retrieved successfully",
        "projects": page.items,
        "pagination": page.pagination,
    })))
}

/// GET /api/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let project = projects::get_project(&mut conn, auth_user.id, id).await?;

    Ok(Json(serde_json::json!({
        "message": "Project retrieved successfully",
        "project": project,
    })))
}

/// POST /api/projects
///
/// The referenced client must belong to the caller, else 404.
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    let mut conn = state.pool.acquire().await?;

    let project = projects::create_project(&mut conn, auth_user.id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Project created successfully",
            "project": project,
        })),
    ))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    let project = projects::update_project(&mut conn, auth_user.id, id, request).await?;

    Ok(Json(serde_json::json!({
        "message": "Project updated successfully",
        "project": project,
    })))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    let mut conn = state.pool.acquire().await?;

    projects::delete_project(&mut conn, auth_user.id, id).await?;

    Ok(Json(serde_json::json!({
        "message": "Project deleted successfully",
    })))
}
